//! Parsing Feature
//!
//! Responsible for turning Kotlin source into tags.
//!
//! ## Structure
//! - `domain/` - Token, ParsedTree, SyntaxIssue models
//! - `ports/` - Parser trait, LanguagePlugin trait
//! - `application/` - ExtractTagsUseCase
//! - `infrastructure/` - Lexer, TreeSitterParser
//! - `plugins/` - Language-specific tag scanners

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugins;
pub mod ports;

// Re-exports
pub use application::{BatchResult, ExtractTagsUseCase};
pub use domain::{IssueOrigin, ParsedTree, SyntaxIssue};

// Re-export infrastructure (internal use - prefer application layer)
#[doc(hidden)]
pub use infrastructure::TreeSitterParser;
pub use plugins::{create_registry, KotlinPlugin};
pub use ports::{
    ExtractOptions, ExtractionContext, ExtractionResult, LanguageId, LanguagePlugin,
    LanguageRegistry, Parser,
};
