use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use tagsieve::source::{parse_document_events, xml_events};
use tagsieve::{Extraction, Matcher, TagExtractor, TreeBuilder};

const SAMPLE: &str = "<balise1 attribut1=valeur1><balise2 attribut2=valeur2><balise3 attribut3=valeur3>contenu_balise3</balise3>contenu_balise2</balise2>contenu_balise1</balise1>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// Lenient HTML tokenizer
    Html,
    /// xmlparser token stream
    Xml,
    /// roxmltree document
    Document,
}

/// Print every subtree whose root is TAG with the given attributes.
#[derive(Debug, Parser)]
#[command(name = "tagsieve", version)]
struct Args {
    /// Tag name to extract; without it the built-in sample is run
    tag: Option<String>,
    /// Markup file, stdin if omitted
    file: Option<PathBuf>,
    /// Required attribute, may be repeated
    #[arg(short, long = "attr", value_name = "NAME=VALUE", value_parser = parse_attr)]
    attrs: Vec<(String, String)>,
    #[arg(long, value_enum, default_value_t = Source::Html)]
    source: Source,
    /// Report end tags that do not match the tag they close
    #[arg(long)]
    strict: bool,
    /// Print text content instead of markup
    #[arg(long)]
    flatten: bool,
    /// Feed html input in chunks of this many bytes
    #[arg(long, value_name = "N")]
    chunk_size: Option<usize>,
}

fn parse_attr(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw.split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got `{}`", raw))?;
    Ok((name.to_string(), value.to_string()))
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).context("reading stdin")?;
            Ok(input)
        }
    }
}

/// Split at char boundaries into pieces of roughly `size` bytes
fn chunks(input: &str, size: usize) -> impl Iterator<Item=&str> {
    let size = size.max(1);
    let mut rest = input;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let mut end = size.min(rest.len());
        while !rest.is_char_boundary(end) {
            end += 1;
        }
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}

fn run(args: &Args, matcher: Matcher, input: &str) -> Result<Extraction> {
    let builder = TreeBuilder::new(matcher).strict(args.strict);
    match args.source {
        Source::Html => {
            let mut extractor = TagExtractor::with_builder(builder);
            match args.chunk_size {
                Some(size) => chunks(input, size).for_each(|chunk| extractor.feed(chunk)),
                None => extractor.feed(input),
            }
            for diagnostic in extractor.diagnostics() {
                eprintln!("warning: {}", diagnostic);
            }
            Ok(extractor.finish())
        }
        Source::Xml => {
            let mut builder = builder;
            for event in xml_events(input) {
                builder.handle(event?);
            }
            Ok(builder.finish())
        }
        Source::Document => {
            let mut builder = builder;
            builder.feed(parse_document_events(input)?);
            Ok(builder.finish())
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (matcher, input) = match &args.tag {
        Some(tag) => {
            let matcher = args.attrs.iter()
                .fold(Matcher::tag(tag.as_str()), |matcher, (name, value)| matcher.require(name.as_str(), value.as_str()));
            (matcher, read_input(args.file.as_ref())?)
        }
        None => {
            info!("no tag given, running the built-in sample");
            (Matcher::tag("balise2").require("attribut2", "valeur2"), SAMPLE.to_string())
        }
    };

    let extraction = run(&args, matcher, &input)?;
    for node in &extraction.matches {
        if args.flatten {
            println!("{}", node.flatten());
        } else {
            println!("{}", node);
        }
    }
    if let Some(partial) = &extraction.unterminated {
        eprintln!("warning: input ended inside <{}>, partial match not printed", partial.tag);
    }
    info!("{} match(es)", extraction.matches.len());
    Ok(())
}
