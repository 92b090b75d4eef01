use std::fmt::{Display, Formatter};

/// A single `name` or `name=value` pair as it appeared inside a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute { name: name.into(), value: Some(value.into()) }
    }

    /// An attribute written without `=`, e.g. `<input disabled>`
    pub fn flag(name: impl Into<String>) -> Self {
        Attribute { name: name.into(), value: None }
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}=\"{}\"", self.name, value),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The events every markup source produces, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    StartTag { name: String, attrs: Vec<Attribute> },
    EndTag { name: String },
    Text(String),
}

impl MarkupEvent {
    pub fn start(name: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        MarkupEvent::StartTag { name: name.into(), attrs }
    }

    pub fn end(name: impl Into<String>) -> Self {
        MarkupEvent::EndTag { name: name.into() }
    }

    pub fn text(data: impl Into<String>) -> Self {
        MarkupEvent::Text(data.into())
    }
}
