use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// Only reported by a strict [TreeBuilder](crate::build::TreeBuilder), never fatal.
    #[error("end tag </{found}> closes <{expected}>")]
    StructuralMismatch { expected: String, found: String },
    #[error("xml tokenizer: {0}")]
    Xml(#[from] xmlparser::Error),
    #[error("xml document: {0}")]
    Document(#[from] roxmltree::Error),
}

impl ExtractError {
    /// The markup fragment the error refers to, if there is one.
    pub fn get_target(&self) -> Option<String> {
        match self {
            ExtractError::StructuralMismatch { found, .. } => Some(format!("</{}>", found)),
            ExtractError::Xml(_) |
            ExtractError::Document(_) => None,
        }
    }
}
