//! Parsing ports (interfaces)

mod language_plugin;
mod parser;

pub use language_plugin::{
    ExtractOptions, ExtractionContext, ExtractionResult, LanguageId, LanguagePlugin,
    LanguageRegistry, ScopeEntry,
};
pub use parser::Parser;
