use quickcheck_macros::quickcheck;

use tagsieve::flatten::flatten;
use tagsieve::node::{Element, TagNode, TextNode};

#[quickcheck]
fn flatten_text_is_identity(content: String) -> bool {
    flatten(&TextNode::new(content.clone())) == content
        && flatten(&Element::from(TextNode::new(content.clone()))) == content
}

#[quickcheck]
fn flatten_concatenates_children(parts: Vec<String>) -> bool {
    let children = parts.iter().map(|part| TextNode::new(part.as_str()).into()).collect();
    let node = TagNode::with_children("p", vec![], children);
    flatten(&node) == parts.concat()
}

#[test]
pub fn test_empty_tag() {
    assert_eq!("", flatten(&TagNode::new("br", vec![])));
    assert_eq!("", flatten(&TextNode::new("")));
}

#[test]
pub fn test_nested() {
    let node = TagNode::with_children("root", vec![], vec![
        TextNode::new("root level ").into(),
        TagNode::with_children("a", vec![], vec![
            TextNode::new("first level ").into(),
            TagNode::with_children("b", vec![], vec![TextNode::new("second level ").into()]).into(),
            TagNode::new("empty", vec![]).into(),
            TextNode::new("more first level ").into(),
        ]).into(),
        TextNode::new("another root level").into(),
    ]);
    assert_eq!("root level first level second level more first level another root level", node.flatten());
}

#[test]
pub fn test_deep_nesting_does_not_overflow() {
    let mut node = TagNode::with_children("d", vec![], vec![TextNode::new("bottom").into()]);
    for _ in 0..100_000 {
        node = TagNode::with_children("d", vec![], vec![node.into()]);
    }
    assert_eq!("bottom", flatten(&node));
}
