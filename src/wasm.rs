use wasm_bindgen::prelude::*;

use crate::extract::TagExtractor;
use crate::matcher::Matcher;
use crate::node::TagNode;

/// JavaScript facing wrapper around [TagExtractor].
///
/// The extractor is created on the first `feed`, constraints must be added before that.
#[wasm_bindgen]
pub struct WasmExtractor {
    matcher: Matcher,
    inner: Option<TagExtractor>,
}

#[wasm_bindgen]
impl WasmExtractor {
    #[wasm_bindgen(constructor)]
    pub fn new(tag: &str) -> WasmExtractor {
        WasmExtractor { matcher: Matcher::tag(tag), inner: None }
    }

    pub fn require(&mut self, name: &str, value: &str) -> Result<(), JsValue> {
        if self.inner.is_some() {
            return Err(JsValue::from_str("attribute constraints must be added before feeding markup"));
        }
        self.matcher.require_mut(name, value);
        Ok(())
    }

    pub fn feed(&mut self, chunk: &str) {
        let matcher = &self.matcher;
        self.inner
            .get_or_insert_with(|| TagExtractor::new(matcher.clone()))
            .feed(chunk);
    }

    pub fn close(&mut self) {
        if let Some(inner) = &mut self.inner {
            inner.close();
        }
    }

    pub fn match_count(&self) -> usize {
        self.results().len()
    }

    /// The i-th match serialized as markup
    pub fn markup(&self, index: usize) -> Option<String> {
        self.results().get(index).map(|node| node.to_string())
    }

    /// The text content of the i-th match
    pub fn flattened(&self, index: usize) -> Option<String> {
        self.results().get(index).map(TagNode::flatten)
    }
}

impl WasmExtractor {
    fn results(&self) -> &[TagNode] {
        match &self.inner {
            Some(inner) => inner.results(),
            None => &[],
        }
    }
}
