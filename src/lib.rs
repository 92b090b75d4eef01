pub mod event;
pub mod node;
pub mod matcher;
pub mod build;
pub mod flatten;
pub mod error;

pub mod tokenize;
pub mod source;
pub mod extract;
pub mod wasm;

mod chariter;
mod htmlchar;

pub use build::{Extraction, TreeBuilder};
pub use error::ExtractError;
pub use event::{Attribute, MarkupEvent};
pub use extract::{extract, TagExtractor};
pub use flatten::{flatten, Flatten};
pub use matcher::Matcher;
pub use node::{Element, TagNode, TextNode};
pub use tokenize::HtmlTokenizer;
