//! Parsing domain models

mod parsed_tree;
mod token;

pub use parsed_tree::{IssueOrigin, ParsedTree, SyntaxIssue};
pub use token::{Token, TokenKind};
