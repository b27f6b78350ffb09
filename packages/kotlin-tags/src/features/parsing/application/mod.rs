//! Parsing application layer (use cases)

mod extract_tags;

pub use extract_tags::{BatchResult, ExtractTagsUseCase};
