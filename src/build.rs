use log::{debug, trace, warn};

use crate::error::ExtractError;
use crate::event::{Attribute, MarkupEvent};
use crate::matcher::Matcher;
use crate::node::{TagNode, TextNode};

/// Everything a [TreeBuilder] produced once its input has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Completed matches in the order they were closed
    pub matches: Vec<TagNode>,
    /// The match still open when input ended, with every open descendant closed into its parent.
    /// Never part of `matches`.
    pub unterminated: Option<TagNode>,
}

/// Consumes markup events and collects every subtree whose root satisfies the [Matcher].
///
/// While idle (empty stack) only matching start tags are of interest. Once a match is open,
/// every start tag, matching or not, is pushed as a descendant and every end tag pops one node.
/// A node popped off the bottom of the stack is a completed match.
///
/// End tag names are not checked against the node they close unless [strict](TreeBuilder::strict)
/// mode is enabled, and even then a mismatch is only recorded.
#[derive(Debug)]
pub struct TreeBuilder {
    matcher: Matcher,
    stack: Vec<TagNode>,
    results: Vec<TagNode>,
    strict: bool,
    diagnostics: Vec<ExtractError>,
}

impl TreeBuilder {
    pub fn new(matcher: Matcher) -> Self {
        TreeBuilder {
            matcher,
            stack: vec![],
            results: vec![],
            strict: false,
            diagnostics: vec![],
        }
    }

    /// Record a [StructuralMismatch](ExtractError::StructuralMismatch) whenever an end tag
    /// does not name the node it closes.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Matches completed so far
    pub fn results(&self) -> &[TagNode] {
        &self.results
    }

    pub fn diagnostics(&self) -> &[ExtractError] {
        &self.diagnostics
    }

    /// If a match is currently open
    pub fn is_tracking(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Number of currently open tags inside the tracked match
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn feed<I: IntoIterator<Item=MarkupEvent>>(&mut self, events: I) {
        for event in events {
            self.handle(event);
        }
    }

    pub fn handle(&mut self, event: MarkupEvent) {
        trace!(target: "tagsieve.build", "depth {}: {:?}", self.stack.len(), event);
        match event {
            MarkupEvent::StartTag { name, attrs } => self.handle_start_tag(name, attrs),
            MarkupEvent::EndTag { name } => self.handle_end_tag(&name),
            MarkupEvent::Text(data) => self.handle_text(data),
        }
    }

    fn handle_start_tag(&mut self, name: String, attrs: Vec<Attribute>) {
        if self.matcher.matches(&name, &attrs) {
            if self.stack.is_empty() {
                debug!(target: "tagsieve.build", "match <{}> opened", name);
            }
            self.stack.push(TagNode::new(name, attrs));
        } else if !self.stack.is_empty() {
            self.stack.push(TagNode::new(name, attrs));
        }
    }

    fn handle_end_tag(&mut self, name: &str) {
        let finished = match self.stack.pop() {
            Some(finished) => finished,
            None => return,
        };
        if self.strict && finished.tag != name {
            warn!(target: "tagsieve.build", "</{}> closes <{}>", name, finished.tag);
            self.diagnostics.push(ExtractError::StructuralMismatch {
                expected: finished.tag.clone(),
                found: name.to_string(),
            });
        }
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(finished.into()),
            None => {
                debug!(target: "tagsieve.build", "match <{}> completed", finished.tag);
                self.results.push(finished);
            }
        }
    }

    fn handle_text(&mut self, data: String) {
        if data.is_empty() {
            return;
        }
        if let Some(top) = self.stack.last_mut() {
            top.children.push(TextNode::new(data).into());
        }
    }

    /// Collapse the open stack into its root, innermost node first.
    fn close_open_tags(&mut self) -> Option<TagNode> {
        let mut closed = self.stack.pop()?;
        while let Some(mut parent) = self.stack.pop() {
            parent.children.push(closed.into());
            closed = parent;
        }
        Some(closed)
    }

    /// End the input. Tags still open are kept out of `matches`.
    pub fn finish(mut self) -> Extraction {
        if !self.stack.is_empty() {
            warn!(target: "tagsieve.build", "input ended with {} open tag(s), partial match dropped", self.stack.len());
        }
        let unterminated = self.close_open_tags();
        Extraction { matches: self.results, unterminated }
    }

    /// Take the completed matches, discarding any open ones.
    pub fn into_results(self) -> Vec<TagNode> {
        self.finish().matches
    }
}
