use std::collections::HashMap;

use crate::event::Attribute;

/// Decides which start tags open a new match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    target_tag: String,
    target_attrs: Option<HashMap<String, String>>,
}

impl Matcher {
    /// `target_attrs` of `None` accepts any attributes
    pub fn new(target_tag: impl Into<String>, target_attrs: Option<HashMap<String, String>>) -> Self {
        Matcher { target_tag: target_tag.into(), target_attrs }
    }

    /// Match every tag named `target_tag`
    pub fn tag(target_tag: impl Into<String>) -> Self {
        Self::new(target_tag, None)
    }

    /// Additionally require `name` to be present with exactly `value`.
    pub fn require(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.require_mut(name, value);
        self
    }

    pub fn require_mut(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.target_attrs
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
    }

    pub fn target_tag(&self) -> &str {
        &self.target_tag
    }

    pub fn target_attrs(&self) -> Option<&HashMap<String, String>> {
        self.target_attrs.as_ref()
    }

    /// True if `tag_name` is the target and every required attribute is present
    /// with an identical value. For repeated attribute names only the last occurrence counts.
    pub fn matches(&self, tag_name: &str, attrs: &[Attribute]) -> bool {
        if tag_name != self.target_tag {
            return false;
        }
        let required = match &self.target_attrs {
            Some(required) => required,
            None => return true,
        };
        required.iter().all(|(name, value)| {
            let actual = attrs.iter()
                .rev()
                .find(|attr| &attr.name == name)
                .and_then(|attr| attr.value.as_ref());
            actual == Some(value)
        })
    }
}
