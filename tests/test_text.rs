use tagsieve::extract::extract;
use tagsieve::matcher::Matcher;
use tagsieve::node::{Element, TagNode, TextNode};

fn root(children: Vec<Element>) -> TagNode {
    TagNode::with_children("root", vec![], children)
}

fn element(name: &str, children: Vec<Element>) -> Element {
    TagNode::with_children(name, vec![], children).into()
}

fn text(content: &str) -> Element {
    TextNode::new(content).into()
}

fn parse_root(html: &str) -> TagNode {
    let mut matches = extract(html, Matcher::tag("root"));
    assert_eq!(1, matches.len());
    matches.remove(0)
}

#[test]
pub fn test_single() {
    let content = "this is some text";
    let html = format!("<root>{}</root>", content);
    assert_eq!(root(vec![text(content)]), parse_root(&html));
}

#[test]
pub fn test_nested() {
    let html = "<root>root level<a>first level<b>second level</b>more first level</a>another root level</root>";
    let expected = root(vec![
        text("root level"),
        element("a", vec![
            text("first level"),
            element("b", vec![text("second level")]),
            text("more first level"),
        ]),
        text("another root level"),
    ]);
    let actual = parse_root(html);
    assert_eq!(expected, actual);
    assert_eq!("root levelfirst levelsecond levelmore first levelanother root level", actual.flatten());
}

#[test]
pub fn test_spaces() {
    let html = "<root>\r\n  <a>\n    indented text\n  </a></root>";
    let expected = root(vec![
        text("\r\n  "),
        element("a", vec![text("\n    indented text\n  ")]),
    ]);
    assert_eq!(expected, parse_root(html));
}

#[test]
pub fn test_valid_unicode() {
    let content = "😀;->ä和製漢字";
    let html = format!("<root>{}</root>", content);
    assert_eq!(root(vec![text(content)]), parse_root(&html));
}

#[test]
pub fn test_entities_are_kept_verbatim() {
    let html = "<root>&amp;&lt;&#x9;</root>";
    assert_eq!("&amp;&lt;&#x9;", parse_root(html).flatten());
}

#[test]
pub fn test_text_around_root() {
    let html = "before<root>inside</root>after";
    assert_eq!(root(vec![text("inside")]), parse_root(html));
}
