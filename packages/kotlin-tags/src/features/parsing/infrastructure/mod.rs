//! Parsing infrastructure - lexer and external grammar

pub mod lexer;
pub mod tree_sitter;

pub use self::lexer::{tokenize, Checkpoint, Lexer};
pub use self::tree_sitter::TreeSitterParser;
