use crate::node::{Element, TagNode, TextNode};

/// Borrowed view of a tree position, the unit of work while flattening.
pub enum NodeRef<'a> {
    Text(&'a TextNode),
    Tag(&'a TagNode),
}

/// Implemented by every node type so [flatten] works on any of them.
pub trait Flatten {
    fn as_node_ref(&self) -> NodeRef<'_>;
}

impl Flatten for TextNode {
    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::Text(self)
    }
}

impl Flatten for TagNode {
    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::Tag(self)
    }
}

impl Flatten for Element {
    fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Element::Text(text) => NodeRef::Text(text),
            Element::Tag(tag) => NodeRef::Tag(tag),
        }
    }
}

/// Concatenate all text content below `node` in document order.
///
/// Uses an explicit stack instead of recursion, deeply nested input cannot overflow the call stack.
pub fn flatten<F: Flatten + ?Sized>(node: &F) -> String {
    let mut result = String::new();
    let mut pending = vec![node.as_node_ref()];
    while let Some(current) = pending.pop() {
        match current {
            NodeRef::Text(text) => result.push_str(&text.content),
            // reversed so the first child is popped first
            NodeRef::Tag(tag) => pending.extend(tag.children.iter().rev().map(Element::as_node_ref)),
        }
    }
    result
}
