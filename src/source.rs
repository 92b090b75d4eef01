//! Event sources for well-formed XML, as an alternative to the lenient [HtmlTokenizer](crate::tokenize::HtmlTokenizer).

use std::collections::VecDeque;

use roxmltree::{Document, Node};
use xmlparser::{ElementEnd, StrSpan, Token, Tokenizer};

use crate::error::ExtractError;
use crate::event::{Attribute, MarkupEvent};

fn qualified_name(prefix: StrSpan, local: StrSpan) -> String {
    if prefix.as_str().is_empty() {
        local.as_str().to_string()
    } else {
        format!("{}:{}", prefix.as_str(), local.as_str())
    }
}

/// Adapts the `xmlparser` token stream to [MarkupEvent]s.
///
/// Attributes arrive as separate tokens after `ElementStart`, so a start tag is only emitted once
/// its `ElementEnd` has been seen. Empty element tags produce a start and an end event.
pub struct XmlEvents<'a> {
    tokenizer: Tokenizer<'a>,
    open_tag: Option<(String, Vec<Attribute>)>,
    queued: VecDeque<MarkupEvent>,
    failed: bool,
}

impl<'a> XmlEvents<'a> {
    pub fn new(xml: &'a str) -> Self {
        XmlEvents {
            tokenizer: Tokenizer::from(xml),
            open_tag: None,
            queued: VecDeque::new(),
            failed: false,
        }
    }

    fn handle_token(&mut self, token: Token<'a>) {
        match token {
            Token::ElementStart { prefix, local, .. } => {
                self.open_tag = Some((qualified_name(prefix, local), vec![]));
            }
            Token::Attribute { prefix, local, value, .. } => {
                if let Some((_, attrs)) = &mut self.open_tag {
                    attrs.push(Attribute::new(qualified_name(prefix, local), value.as_str()));
                }
            }
            Token::ElementEnd { end, .. } => match end {
                ElementEnd::Open => {
                    if let Some((name, attrs)) = self.open_tag.take() {
                        self.queued.push_back(MarkupEvent::start(name, attrs));
                    }
                }
                ElementEnd::Empty => {
                    if let Some((name, attrs)) = self.open_tag.take() {
                        self.queued.push_back(MarkupEvent::start(name.clone(), attrs));
                        self.queued.push_back(MarkupEvent::end(name));
                    }
                }
                ElementEnd::Close(prefix, local) => {
                    self.queued.push_back(MarkupEvent::end(qualified_name(prefix, local)));
                }
            },
            Token::Text { text } => self.queued.push_back(MarkupEvent::text(text.as_str())),
            Token::Cdata { text, .. } => self.queued.push_back(MarkupEvent::text(text.as_str())),
            // declarations, comments, processing instructions and the DTD carry no content
            _ => {}
        }
    }
}

impl Iterator for XmlEvents<'_> {
    type Item = Result<MarkupEvent, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.queued.pop_front() {
                return Some(Ok(event));
            }
            if self.failed {
                return None;
            }
            match self.tokenizer.next()? {
                Ok(token) => self.handle_token(token),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err.into()));
                }
            }
        }
    }
}

/// Events of an XML document as produced by `xmlparser`. Stops after the first tokenizer error.
pub fn xml_events(xml: &str) -> XmlEvents<'_> {
    XmlEvents::new(xml)
}

/// `prefix:local` for a name in namespace `uri`, as written in the source.
/// Names in the default namespace or in no namespace stay unprefixed.
fn prefixed_name(scope: Node<'_, '_>, uri: Option<&str>, local: &str) -> String {
    match uri.and_then(|uri| scope.lookup_prefix(uri)) {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

/// Namespace declarations made on `node` itself, turned back into `xmlns` attributes.
fn namespace_declarations(node: Node<'_, '_>) -> Vec<Attribute> {
    let inherited = node.parent_element().map(|parent| parent.namespaces()).unwrap_or(&[]);
    node.namespaces()
        .iter()
        .filter(|ns| !inherited.iter().any(|outer| outer.name() == ns.name() && outer.uri() == ns.uri()))
        .map(|ns| match ns.name() {
            Some(name) => Attribute::new(format!("xmlns:{}", name), ns.uri()),
            None => Attribute::new("xmlns", ns.uri()),
        })
        .collect()
}

fn element_start(node: Node<'_, '_>) -> MarkupEvent {
    let mut attrs = namespace_declarations(node);
    for attr in node.attributes() {
        attrs.push(Attribute::new(prefixed_name(node, attr.namespace(), attr.name()), attr.value()));
    }
    let tag_name = node.tag_name();
    MarkupEvent::start(prefixed_name(node, tag_name.namespace(), tag_name.name()), attrs)
}

fn element_end(node: Node<'_, '_>) -> MarkupEvent {
    let tag_name = node.tag_name();
    MarkupEvent::end(prefixed_name(node, tag_name.namespace(), tag_name.name()))
}

/// Step of the document walk: a node still to be visited, or an element whose children are done
enum Visit<'a, 'input> {
    Enter(Node<'a, 'input>),
    Leave(Node<'a, 'input>),
}

/// Events of an already parsed document, in document order.
///
/// Walks the tree with an explicit stack, element names and namespace declarations are written
/// the way `xml_events` reports them.
pub fn document_events(document: &Document) -> Vec<MarkupEvent> {
    let mut events = vec![];
    let mut pending: Vec<Visit<'_, '_>> = document.root().children().rev().map(Visit::Enter).collect();
    while let Some(visit) = pending.pop() {
        match visit {
            Visit::Enter(node) if node.is_element() => {
                events.push(element_start(node));
                pending.push(Visit::Leave(node));
                pending.extend(node.children().rev().map(Visit::Enter));
            }
            Visit::Enter(node) if node.is_text() => {
                if let Some(text) = node.text() {
                    events.push(MarkupEvent::text(text));
                }
            }
            // comments and processing instructions
            Visit::Enter(_) => {}
            Visit::Leave(node) => events.push(element_end(node)),
        }
    }
    events
}

/// Parse `xml` with `roxmltree` and return its events.
pub fn parse_document_events(xml: &str) -> Result<Vec<MarkupEvent>, ExtractError> {
    let document = Document::parse(xml)?;
    Ok(document_events(&document))
}
