//! Core models
//!
//! - `Span` : source positions
//! - `Tag`, `TagKind` : extracted declarations
//! - `TagsError` : crate error type

mod error;
mod span;
mod tag;

pub use error::{Result, TagsError};
pub use span::Span;
pub use tag::{Tag, TagKind};
