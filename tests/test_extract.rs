use quickcheck_macros::quickcheck;

use tagsieve::build::TreeBuilder;
use tagsieve::event::Attribute;
use tagsieve::extract::{extract, TagExtractor};
use tagsieve::matcher::Matcher;
use tagsieve::node::{TagNode, TextNode};
use tagsieve::wasm::WasmExtractor;

const REFERENCE: &str = "<balise1 attribut1=valeur1><balise2 attribut2=valeur2><balise3 attribut3=valeur3>contenu_balise3</balise3>contenu_balise2</balise2>contenu_balise1</balise1>";

fn reference_matcher() -> Matcher {
    Matcher::tag("balise2").require("attribut2", "valeur2")
}

#[test]
pub fn test_reference_document() {
    let matches = extract(REFERENCE, reference_matcher());
    let expected = TagNode::with_children(
        "balise2",
        vec![Attribute::new("attribut2", "valeur2")],
        vec![
            TagNode::with_children(
                "balise3",
                vec![Attribute::new("attribut3", "valeur3")],
                vec![TextNode::new("contenu_balise3").into()],
            ).into(),
            TextNode::new("contenu_balise2").into(),
        ],
    );
    assert_eq!(vec![expected], matches);
    assert_eq!("contenu_balise3contenu_balise2", matches[0].flatten());
    assert_eq!(
        "<balise2 attribut2=\"valeur2\"><balise3 attribut3=\"valeur3\">contenu_balise3</balise3>contenu_balise2</balise2>",
        matches[0].to_string()
    );
}

#[test]
pub fn test_wrong_attribute_value() {
    let matches = extract(REFERENCE, Matcher::tag("balise2").require("attribut2", "valeur3"));
    assert!(matches.is_empty());
}

#[test]
pub fn test_any_attributes() {
    let html = "<ul><li class=a>1</li><li>2</li><li id=x>3</li></ul>";
    let texts: Vec<String> = extract(html, Matcher::tag("li")).iter().map(TagNode::flatten).collect();
    assert_eq!(vec!["1", "2", "3"], texts);
}

#[test]
pub fn test_text_before_match_is_dropped() {
    let matches = extract("intro <b>outside</b> <p>inside</p> outro", Matcher::tag("p"));
    assert_eq!(1, matches.len());
    assert_eq!("inside", matches[0].flatten());
}

#[test]
pub fn test_incremental_results() {
    let mut extractor = TagExtractor::new(Matcher::tag("p"));
    extractor.feed("<p>one</p><p>tw");
    assert_eq!(1, extractor.results().len());
    extractor.feed("o</p><p>three");
    assert_eq!(2, extractor.results().len());
    extractor.close();
    let extraction = extractor.finish();
    assert_eq!(2, extraction.matches.len());
    assert_eq!(Some("three".to_string()), extraction.unterminated.map(|node| node.flatten()));
}

#[test]
pub fn test_strict_extractor() {
    let mut extractor = TagExtractor::with_builder(TreeBuilder::new(Matcher::tag("p")).strict(true));
    extractor.feed("<p><b>bold</p></i>");
    assert_eq!(1, extractor.results().len());
    assert_eq!(2, extractor.diagnostics().len());
}

#[quickcheck]
fn chunked_extraction_matches_one_shot(cut_a: usize, cut_b: usize) -> bool {
    let (a, b) = {
        let a = cut_a % (REFERENCE.len() + 1);
        let b = cut_b % (REFERENCE.len() + 1);
        (a.min(b), a.max(b))
    };
    let mut extractor = TagExtractor::new(reference_matcher());
    extractor.feed(&REFERENCE[..a]);
    extractor.feed(&REFERENCE[a..b]);
    extractor.feed(&REFERENCE[b..]);
    extractor.finish().matches == extract(REFERENCE, reference_matcher())
}

#[test]
pub fn test_wasm_extractor() {
    let mut extractor = WasmExtractor::new("balise2");
    assert!(extractor.require("attribut2", "valeur2").is_ok());
    extractor.feed(&REFERENCE[..40]);
    extractor.feed(&REFERENCE[40..]);
    extractor.close();
    assert_eq!(1, extractor.match_count());
    assert_eq!(Some("contenu_balise3contenu_balise2".to_string()), extractor.flattened(0));
    assert!(extractor.markup(0).unwrap().starts_with("<balise2 "));
    assert_eq!(None, extractor.flattened(1));
}

#[test]
pub fn test_very_deep_match() {
    let depth = 200_000;
    let html = format!("{}x{}", "<d>".repeat(depth), "</d>".repeat(depth));
    let matches = extract(&html, Matcher::tag("d"));
    assert_eq!(1, matches.len());
    assert_eq!("x", matches[0].flatten());
    assert_eq!(html, matches[0].to_string());
}
