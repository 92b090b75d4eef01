use crate::build::{Extraction, TreeBuilder};
use crate::error::ExtractError;
use crate::matcher::Matcher;
use crate::node::TagNode;
use crate::tokenize::HtmlTokenizer;

/// Push-style HTML extractor: an [HtmlTokenizer] feeding a [TreeBuilder].
#[derive(Debug)]
pub struct TagExtractor {
    tokenizer: HtmlTokenizer,
    builder: TreeBuilder,
}

impl TagExtractor {
    pub fn new(matcher: Matcher) -> Self {
        Self::with_builder(TreeBuilder::new(matcher))
    }

    pub fn with_builder(builder: TreeBuilder) -> Self {
        TagExtractor { tokenizer: HtmlTokenizer::new(), builder }
    }

    /// Feed the next chunk of markup. Chunks may be split anywhere.
    pub fn feed(&mut self, chunk: &str) {
        let events = self.tokenizer.feed(chunk);
        self.builder.feed(events);
    }

    /// Signal the end of input, flushing text the tokenizer still holds back.
    pub fn close(&mut self) {
        let events = self.tokenizer.close();
        self.builder.feed(events);
    }

    pub fn results(&self) -> &[TagNode] {
        self.builder.results()
    }

    pub fn diagnostics(&self) -> &[ExtractError] {
        self.builder.diagnostics()
    }

    pub fn finish(mut self) -> Extraction {
        self.close();
        self.builder.finish()
    }
}

/// Extract all matches from a complete HTML document.
pub fn extract(html: &str, matcher: Matcher) -> Vec<TagNode> {
    let mut extractor = TagExtractor::new(matcher);
    extractor.feed(html);
    extractor.finish().matches
}
