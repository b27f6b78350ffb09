//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter dependency lives. The grammar is only
//! used to locate syntax errors; tags come from the token scanner.

use tree_sitter::{Language as TSLanguage, Node as TSNode, Parser as TSParser, Tree};

use crate::features::parsing::domain::{ParsedTree, SyntaxIssue};
use crate::features::parsing::ports::{LanguageId, LanguagePlugin, Parser};
use crate::shared::models::{Result, Span, TagsError};

/// Tree-sitter based parser
pub struct TreeSitterParser {
    language: LanguageId,
    ts_language: TSLanguage,
}

fn node_span(node: &TSNode) -> Span {
    Span::new(
        node.start_position().row as u32 + 1,
        node.start_position().column as u32,
        node.end_position().row as u32 + 1,
        node.end_position().column as u32,
    )
}

impl TreeSitterParser {
    pub fn new(language: LanguageId, ts_language: TSLanguage) -> Self {
        Self {
            language,
            ts_language,
        }
    }

    /// Create a Kotlin parser
    pub fn kotlin() -> Self {
        Self::new(LanguageId::Kotlin, tree_sitter_kotlin::language())
    }

    /// Parser for the grammar a plugin declares
    pub fn for_plugin(plugin: &dyn LanguagePlugin) -> Self {
        Self::new(plugin.language_id(), plugin.tree_sitter_language())
    }

    fn convert_tree(&self, tree: &Tree, file_path: &str) -> ParsedTree {
        let root = tree.root_node();

        let mut issues = Vec::new();
        self.collect_issues(&root, &mut issues);

        ParsedTree::new(file_path.to_string(), self.language_name().to_string())
            .with_issues(issues)
    }

    /// Collect ERROR and MISSING nodes; clean subtrees are skipped
    fn collect_issues(&self, node: &TSNode, issues: &mut Vec<SyntaxIssue>) {
        if node.is_missing() {
            issues.push(SyntaxIssue::grammar(
                format!("missing `{}`", node.kind()),
                node_span(node),
            ));
            return;
        }
        if node.is_error() {
            issues.push(SyntaxIssue::grammar("unexpected syntax", node_span(node)));
            return;
        }
        if !node.has_error() {
            return;
        }

        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.collect_issues(&child, issues);
            }
        }
    }
}

impl Parser for TreeSitterParser {
    fn parse(&self, source: &str, file_path: &str) -> Result<ParsedTree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.ts_language)
            .map_err(|e| TagsError::parse(format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| TagsError::parse(format!("Failed to parse {}", file_path)))?;

        Ok(self.convert_tree(&tree, file_path))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        self.language
            .extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }

    fn language_name(&self) -> &'static str {
        self.language.name()
    }
}
