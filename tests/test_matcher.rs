use std::collections::HashMap;

use tagsieve::event::Attribute;
use tagsieve::matcher::Matcher;

#[test]
pub fn test_tag_name_only() {
    let matcher = Matcher::tag("a");
    assert!(matcher.matches("a", &[]));
    assert!(matcher.matches("a", &[Attribute::new("href", "/"), Attribute::flag("download")]));
    assert!(!matcher.matches("b", &[]));
    // names are compared exactly
    assert!(!matcher.matches("A", &[]));
}

#[test]
pub fn test_required_attributes() {
    let mut required = HashMap::new();
    required.insert("class".to_string(), "x".to_string());
    required.insert("id".to_string(), "main".to_string());
    let matcher = Matcher::new("div", Some(required));

    let attrs = [Attribute::new("id", "main"), Attribute::new("class", "x"), Attribute::new("lang", "fr")];
    assert!(matcher.matches("div", &attrs));
    assert!(!matcher.matches("span", &attrs));
    assert!(!matcher.matches("div", &[Attribute::new("id", "main")]));
    assert!(!matcher.matches("div", &[Attribute::new("id", "main"), Attribute::new("class", "y")]));
    assert!(!matcher.matches("div", &[Attribute::new("id", "main"), Attribute::new("class", "x ")]));
}

#[test]
pub fn test_valueless_attribute_never_satisfies_a_value() {
    let matcher = Matcher::tag("input").require("disabled", "");
    assert!(!matcher.matches("input", &[Attribute::flag("disabled")]));
    assert!(matcher.matches("input", &[Attribute::new("disabled", "")]));
}

#[test]
pub fn test_last_repeated_attribute_wins() {
    let matcher = Matcher::tag("p").require("class", "a");
    assert!(matcher.matches("p", &[Attribute::new("class", "b"), Attribute::new("class", "a")]));
    assert!(!matcher.matches("p", &[Attribute::new("class", "a"), Attribute::new("class", "b")]));
}

#[test]
pub fn test_empty_constraints_match_any() {
    let matcher = Matcher::new("p", Some(HashMap::new()));
    assert!(matcher.matches("p", &[Attribute::new("class", "b")]));
    assert_eq!(None, Matcher::tag("p").target_attrs());
    assert_eq!(1, Matcher::tag("p").require("k", "v").target_attrs().map(HashMap::len).unwrap_or(0));
}
