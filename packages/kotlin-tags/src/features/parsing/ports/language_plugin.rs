//! Language Plugin Port
//!
//! Defines the contract for language-specific tag extraction plugins.

use std::collections::{BTreeSet, HashMap};
use tree_sitter::Language as TSLanguage;

use crate::features::parsing::domain::SyntaxIssue;
use crate::shared::models::{Result, Tag, TagKind};

/// Language identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Kotlin,
}

impl LanguageId {
    /// Get language name as string
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::Kotlin => "kotlin",
        }
    }

    /// Get language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "kt" | "kts" => Some(LanguageId::Kotlin),
            _ => None,
        }
    }

    /// Get supported file extensions
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            LanguageId::Kotlin => &["kt", "kts"],
        }
    }
}

/// Per-run extraction switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Kinds that produce tags; disabled kinds still open scopes
    pub kinds: BTreeSet<TagKind>,
    /// Tag declarations inside function bodies and other code blocks
    pub include_locals: bool,
}

impl ExtractOptions {
    pub fn is_enabled(&self, kind: TagKind) -> bool {
        self.kinds.contains(&kind)
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            kinds: TagKind::ALL.into_iter().collect(),
            include_locals: false,
        }
    }
}

/// Named scope currently open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeEntry {
    pub name: String,
    pub kind: TagKind,
}

/// Extraction context passed to plugins
pub struct ExtractionContext<'a> {
    /// Source code
    pub source: &'a str,
    /// File path
    pub file_path: &'a str,
    /// Language being parsed
    pub language: LanguageId,
    /// Package declared by the file (e.g., "com.example")
    pub package: Option<String>,
    /// Open named scopes, outermost first
    pub scope_stack: Vec<ScopeEntry>,
    pub options: ExtractOptions,
    line_starts: Vec<usize>,
}

impl<'a> ExtractionContext<'a> {
    pub fn new(source: &'a str, file_path: &'a str, language: LanguageId) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            file_path,
            language,
            package: None,
            scope_stack: Vec::new(),
            options: ExtractOptions::default(),
            line_starts,
        }
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Dot-joined names of the open scopes
    pub fn scope_path(&self) -> Option<String> {
        if self.scope_stack.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.scope_stack.iter().map(|s| s.name.as_str()).collect();
        Some(names.join("."))
    }

    pub fn push_scope(&mut self, name: &str, kind: TagKind) {
        self.scope_stack.push(ScopeEntry {
            name: name.to_string(),
            kind,
        });
    }

    pub fn pop_scope(&mut self) {
        self.scope_stack.pop();
    }

    /// Text of a 1-based line, without the line terminator
    pub fn line_text(&self, line: u32) -> &'a str {
        let idx = (line as usize).saturating_sub(1);
        let Some(&start) = self.line_starts.get(idx) else {
            return "";
        };
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());
        let text = self.source.get(start..end).unwrap_or("");
        text.strip_suffix('\r').unwrap_or(text)
    }
}

/// Result of extraction from a single file
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub file_path: String,
    pub language: LanguageId,
    /// Extracted tags, in source order
    pub tags: Vec<Tag>,
    /// Syntax issues from the scanner and the grammar check
    pub issues: Vec<SyntaxIssue>,
}

impl ExtractionResult {
    pub fn new(file_path: impl Into<String>, language: LanguageId) -> Self {
        Self {
            file_path: file_path.into(),
            language,
            tags: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    pub fn add_issue(&mut self, issue: SyntaxIssue) {
        self.issues.push(issue);
    }

    pub fn merge_issues(&mut self, issues: impl IntoIterator<Item = SyntaxIssue>) {
        self.issues.extend(issues);
        self.issues.sort_by_key(|i| (i.span.start_line, i.span.start_col));
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Language Plugin trait
///
/// Each supported language implements this trait to provide:
/// - Tree-sitter grammar (syntax validation)
/// - Kind table
/// - Tag extraction logic
pub trait LanguagePlugin: Send + Sync {
    /// Get the tree-sitter language
    fn tree_sitter_language(&self) -> TSLanguage;

    /// Get the language identifier
    fn language_id(&self) -> LanguageId;

    /// Get supported file extensions
    fn extensions(&self) -> &[&str] {
        self.language_id().extensions()
    }

    /// Check if this plugin supports a file extension
    fn supports(&self, ext: &str) -> bool {
        self.extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Kinds this plugin can emit
    fn kinds(&self) -> &'static [TagKind];

    /// Extract tags from the source held by `ctx`
    fn extract(&self, ctx: &mut ExtractionContext) -> Result<ExtractionResult>;
}

/// Registry for language plugins
pub struct LanguageRegistry {
    plugins: HashMap<LanguageId, Box<dyn LanguagePlugin>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Register a language plugin
    pub fn register(&mut self, plugin: Box<dyn LanguagePlugin>) {
        self.plugins.insert(plugin.language_id(), plugin);
    }

    /// Get plugin by language ID
    pub fn get(&self, lang: LanguageId) -> Option<&dyn LanguagePlugin> {
        self.plugins.get(&lang).map(|p| p.as_ref())
    }

    /// Get plugin by file extension
    pub fn get_by_extension(&self, ext: &str) -> Option<&dyn LanguagePlugin> {
        let lang = LanguageId::from_extension(ext)?;
        self.get(lang)
    }

    /// Check if any plugin supports the extension
    pub fn supports(&self, ext: &str) -> bool {
        self.get_by_extension(ext).is_some()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_id_from_extension() {
        assert_eq!(LanguageId::from_extension("kt"), Some(LanguageId::Kotlin));
        assert_eq!(LanguageId::from_extension("KTS"), Some(LanguageId::Kotlin));
        assert_eq!(LanguageId::from_extension("java"), None);
    }

    #[test]
    fn test_extraction_context_scope_path() {
        let mut ctx = ExtractionContext::new("", "A.kt", LanguageId::Kotlin);
        assert_eq!(ctx.scope_path(), None);

        ctx.push_scope("Outer", TagKind::Class);
        ctx.push_scope("Inner", TagKind::Object);
        assert_eq!(ctx.scope_path().as_deref(), Some("Outer.Inner"));

        ctx.pop_scope();
        assert_eq!(ctx.scope_path().as_deref(), Some("Outer"));
    }

    #[test]
    fn test_line_text() {
        let source = "first\r\nsecond\n\nlast";
        let ctx = ExtractionContext::new(source, "A.kt", LanguageId::Kotlin);
        assert_eq!(ctx.line_text(1), "first");
        assert_eq!(ctx.line_text(2), "second");
        assert_eq!(ctx.line_text(3), "");
        assert_eq!(ctx.line_text(4), "last");
        assert_eq!(ctx.line_text(9), "");
    }

    #[test]
    fn test_default_options_enable_every_kind() {
        let options = ExtractOptions::default();
        assert!(TagKind::ALL.iter().all(|k| options.is_enabled(*k)));
        assert!(!options.include_locals);
    }
}
