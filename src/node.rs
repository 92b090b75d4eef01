use std::fmt::{Display, Formatter};

use crate::event::Attribute;
use crate::flatten::flatten;

/// Anything that can appear in an extracted tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Text(TextNode),
    Tag(TagNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    pub tag: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Element>,
}

impl TextNode {
    pub fn new(content: impl Into<String>) -> Self {
        TextNode { content: content.into() }
    }
}

impl TagNode {
    pub fn new(tag: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        TagNode { tag: tag.into(), attrs, children: vec![] }
    }

    /// Convenience constructor for building expected trees
    pub fn with_children(tag: impl Into<String>, attrs: Vec<Attribute>, children: Vec<Element>) -> Self {
        TagNode { tag: tag.into(), attrs, children }
    }

    /// Value of the attribute `name`. If the name repeats, the last occurrence wins.
    /// Returns `None` both for a missing attribute and for one written without a value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .rev()
            .find(|attr| attr.name == name)
            .and_then(|attr| attr.value.as_deref())
    }

    pub fn text_children(&self) -> impl Iterator<Item=&TextNode> {
        self.children.iter().filter_map(|child| match child {
            Element::Text(text) => Some(text),
            Element::Tag(_) => None,
        })
    }

    pub fn tag_children(&self) -> impl Iterator<Item=&TagNode> {
        self.children.iter().filter_map(|child| match child {
            Element::Tag(tag) => Some(tag),
            Element::Text(_) => None,
        })
    }

    /// Concatenated text content of this subtree
    pub fn flatten(&self) -> String {
        flatten(self)
    }
}

impl From<TextNode> for Element {
    fn from(text: TextNode) -> Self {
        Element::Text(text)
    }
}

impl From<TagNode> for Element {
    fn from(tag: TagNode) -> Self {
        Element::Tag(tag)
    }
}

impl Display for TextNode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&self.content)
    }
}

/// Drops descendants from a work stack, the derived drop glue would recurse once per nesting level.
impl Drop for TagNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Element::Tag(mut tag) = child {
                pending.append(&mut tag.children);
            }
        }
    }
}

enum MarkupPiece<'a> {
    Open(&'a TagNode),
    Close(&'a str),
    Text(&'a str),
}

/// Serializes the subtree back to markup. Content is written verbatim, nothing is escaped.
impl Display for TagNode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut pending = vec![MarkupPiece::Open(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                MarkupPiece::Open(tag) => {
                    write!(f, "<{}", tag.tag)?;
                    for attr in &tag.attrs {
                        write!(f, " {}", attr)?;
                    }
                    f.write_str(">")?;
                    pending.push(MarkupPiece::Close(&tag.tag));
                    pending.extend(tag.children.iter().rev().map(|child| match child {
                        Element::Text(text) => MarkupPiece::Text(&text.content),
                        Element::Tag(child) => MarkupPiece::Open(child),
                    }));
                }
                MarkupPiece::Close(name) => write!(f, "</{}>", name)?,
                MarkupPiece::Text(content) => f.write_str(content)?,
            }
        }
        Ok(())
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Element::Text(text) => text.fmt(f),
            Element::Tag(tag) => tag.fmt(f),
        }
    }
}
