//! Tree-sitter based syntax validation

mod parser;

pub use parser::TreeSitterParser;
