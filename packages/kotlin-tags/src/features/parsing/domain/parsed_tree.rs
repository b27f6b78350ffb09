//! Syntax check results
//!
//! A `ParsedTree` summarizes a grammar parse: it only keeps what tagging
//! reports back to callers (issues and basic shape), not the tree itself.

use serde::Serialize;

use crate::shared::models::Span;

/// Where a syntax issue was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueOrigin {
    /// Token scanner (unbalanced generics, braces)
    Scanner,
    /// Grammar parser ERROR / MISSING nodes
    Grammar,
}

/// Syntax issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxIssue {
    pub message: String,
    pub span: Span,
    pub origin: IssueOrigin,
}

impl SyntaxIssue {
    pub fn scanner(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            origin: IssueOrigin::Scanner,
        }
    }

    pub fn grammar(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            origin: IssueOrigin::Grammar,
        }
    }
}

/// Parsed syntax tree summary
#[derive(Debug, Clone)]
pub struct ParsedTree {
    /// File path (for error messages)
    pub file_path: String,

    /// Language
    pub language: String,

    /// Whether parsing had errors
    pub has_errors: bool,

    /// Grammar issues (if any)
    pub issues: Vec<SyntaxIssue>,
}

impl ParsedTree {
    pub fn new(file_path: String, language: String) -> Self {
        Self {
            file_path,
            language,
            has_errors: false,
            issues: Vec::new(),
        }
    }

    pub fn with_issues(mut self, issues: Vec<SyntaxIssue>) -> Self {
        self.has_errors = !issues.is_empty();
        self.issues = issues;
        self
    }
}
