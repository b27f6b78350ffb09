//! Lexical tokens
//!
//! Comments and whitespace never become tokens.

use crate::shared::models::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or dotted path (`a.b.c`); backtick names are unquoted
    Identifier,
    /// `::`
    DoubleColon,
    /// Any other single character
    Punct(char),
    StringLit,
    CharLit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Identifier text; empty for literals
    pub text: String,
    /// 1-based
    pub line: u32,
    /// 0-based, in characters
    pub col: u32,
    /// Byte offset of the first character
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, col: u32, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
            offset,
        }
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    /// Last segment of a dotted identifier (`String.ext` -> `ext`)
    pub fn name(&self) -> &str {
        match self.text.rsplit_once('.') {
            Some((_, last)) if !last.is_empty() => last,
            _ => &self.text,
        }
    }

    /// Span of `name()`, assuming the dotted path sits on one line
    pub fn name_span(&self) -> Span {
        let full = self.text.chars().count() as u32;
        let name = self.name().chars().count() as u32;
        Span::on_line(self.line, self.col + full.saturating_sub(name), name)
    }
}
