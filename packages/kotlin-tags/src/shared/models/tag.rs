//! Tag model
//!
//! A tag is one named declaration found in a source file.

use serde::{Deserialize, Serialize};

use super::Span;

/// Declaration kind
///
/// Variant order is significant: scope-capable kinds come first,
/// mirroring the kind table exposed by `--list-kinds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Package,
    Interface,
    Class,
    Object,
    Method,
    TypeAlias,
    Constant,
    Variable,
}

impl TagKind {
    pub const ALL: [TagKind; 8] = [
        TagKind::Package,
        TagKind::Interface,
        TagKind::Class,
        TagKind::Object,
        TagKind::Method,
        TagKind::TypeAlias,
        TagKind::Constant,
        TagKind::Variable,
    ];

    /// One-letter kind used in tags files
    pub fn letter(&self) -> char {
        match self {
            TagKind::Package => 'p',
            TagKind::Interface => 'i',
            TagKind::Class => 'c',
            TagKind::Object => 'o',
            TagKind::Method => 'm',
            TagKind::TypeAlias => 'T',
            TagKind::Constant => 'C',
            TagKind::Variable => 'v',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TagKind::Package => "package",
            TagKind::Interface => "interface",
            TagKind::Class => "class",
            TagKind::Object => "object",
            TagKind::Method => "method",
            TagKind::TypeAlias => "typealias",
            TagKind::Constant => "constant",
            TagKind::Variable => "variable",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            TagKind::Package => "packages",
            TagKind::Interface => "interfaces",
            TagKind::Class => "classes",
            TagKind::Object => "objects",
            TagKind::Method => "methods",
            TagKind::TypeAlias => "typealiases",
            TagKind::Constant => "constants",
            TagKind::Variable => "variables",
        }
    }

    /// Kotlin keyword that introduces this kind
    pub fn keyword(&self) -> &'static str {
        match self {
            TagKind::Package => "package",
            TagKind::Interface => "interface",
            TagKind::Class => "class",
            TagKind::Object => "object",
            TagKind::Method => "fun",
            TagKind::TypeAlias => "typealias",
            TagKind::Constant => "val",
            TagKind::Variable => "var",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.keyword() == keyword)
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.letter() == letter)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Whether a body following this declaration becomes a named scope
    pub fn opens_scope(&self) -> bool {
        matches!(
            self,
            TagKind::Interface | TagKind::Class | TagKind::Object | TagKind::Method
        )
    }
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Extracted declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub kind: TagKind,
    /// 1-based line of the name
    pub line: u32,
    /// Span of the name token
    pub span: Span,
    /// Full source line the tag was found on
    pub pattern: String,
    /// Enclosing named scopes joined by `.` (package excluded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_kind: Option<TagKind>,
    /// Normalized generic parameter list, e.g. `<T: Any>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_params: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, kind: TagKind, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            line: span.start_line,
            span,
            pattern: String::new(),
            scope: None,
            scope_kind: None,
            type_params: None,
            package: None,
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>, kind: TagKind) -> Self {
        self.scope = Some(scope.into());
        self.scope_kind = Some(kind);
        self
    }

    pub fn with_type_params(mut self, type_params: Option<String>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_package(mut self, package: Option<String>) -> Self {
        self.package = package;
        self
    }

    /// Package, scope and name joined by `.`
    pub fn qualified_name(&self) -> String {
        let parts: Vec<&str> = [self.package.as_deref(), self.scope.as_deref()]
            .into_iter()
            .flatten()
            .chain(std::iter::once(self.name.as_str()))
            .collect();
        parts.join(".")
    }
}
