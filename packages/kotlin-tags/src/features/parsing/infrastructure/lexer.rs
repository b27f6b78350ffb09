//! Kotlin tokenizer
//!
//! Produces just enough structure for tag scanning: identifiers, `::`,
//! single punctuation characters and opaque string/char literals.
//! Comments and whitespace are skipped. Never fails: unterminated
//! literals and comments run to the end of input.

use crate::features::parsing::domain::{Token, TokenKind};

/// Saved lexer position for bounded look-ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pos: usize,
    line: u32,
    col: u32,
}

pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    col: u32,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            col: 0,
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            line: self.line,
            col: self.col,
        }
    }

    pub fn reset(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.line = checkpoint.line;
        self.col = checkpoint.col;
    }

    /// Current 1-based line
    pub fn line(&self) -> u32 {
        self.line
    }

    fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or("")
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) {
        loop {
            while matches!(self.peek(), Some(c) if c <= ' ' || c.is_whitespace()) {
                self.bump();
            }
            match (self.peek(), self.peek_nth(1)) {
                (Some('/'), Some('/')) => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    /// Kotlin block comments nest
    fn skip_block_comment(&mut self) {
        self.bump();
        self.bump();
        let mut depth = 1usize;
        while depth > 0 {
            match self.bump() {
                None => return,
                Some('/') if self.peek() == Some('*') => {
                    self.bump();
                    depth += 1;
                }
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    depth -= 1;
                }
                _ => {}
            }
        }
    }

    /// Next character that is not whitespace or comment
    pub fn peek_char(&mut self) -> Option<char> {
        self.skip_trivia();
        self.peek()
    }

    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        let (line, col, offset) = (self.line, self.col, self.pos);
        let c = self.peek()?;

        let kind = match c {
            '"' => {
                self.read_string();
                TokenKind::StringLit
            }
            '\'' => {
                self.read_char_literal();
                TokenKind::CharLit
            }
            '`' => {
                let text = self.read_quoted_identifier();
                return Some(Token::new(TokenKind::Identifier, text, line, col, offset));
            }
            c if is_ident_char(c) => {
                let text = self.read_identifier();
                return Some(Token::new(TokenKind::Identifier, text, line, col, offset));
            }
            ':' if self.peek_nth(1) == Some(':') => {
                self.bump();
                self.bump();
                TokenKind::DoubleColon
            }
            c => {
                self.bump();
                TokenKind::Punct(c)
            }
        };
        Some(Token::new(kind, String::new(), line, col, offset))
    }

    /// `a.b.c` is read as one token; `..` and trailing dots are not part of it
    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        loop {
            while let Some(c) = self.peek().filter(|c| is_ident_char(*c)) {
                text.push(c);
                self.bump();
            }
            match (self.peek(), self.peek_nth(1)) {
                (Some('.'), Some(next)) if is_ident_char(next) => {
                    text.push('.');
                    self.bump();
                }
                (Some('.'), Some('`')) => {
                    self.bump();
                    text.push('.');
                    text.push_str(&self.read_quoted_identifier());
                    return text;
                }
                _ => return text,
            }
        }
    }

    fn read_quoted_identifier(&mut self) -> String {
        self.bump();
        let mut text = String::new();
        while let Some(c) = self.bump() {
            if c == '`' || c == '\n' {
                break;
            }
            text.push(c);
        }
        text
    }

    fn read_string(&mut self) {
        if self.rest().starts_with("\"\"\"") {
            self.read_raw_string();
            return;
        }
        self.bump();
        loop {
            match self.bump() {
                None | Some('"') | Some('\n') => return,
                Some('\\') => {
                    self.bump();
                }
                Some('$') if self.peek() == Some('{') => self.skip_template(),
                _ => {}
            }
        }
    }

    fn read_raw_string(&mut self) {
        for _ in 0..3 {
            self.bump();
        }
        loop {
            match self.bump() {
                None => return,
                Some('$') if self.peek() == Some('{') => self.skip_template(),
                Some('"') if self.rest().starts_with("\"\"") => {
                    // extra quotes before the delimiter belong to the string
                    while self.peek() == Some('"') {
                        self.bump();
                    }
                    return;
                }
                _ => {}
            }
        }
    }

    /// Skips `{...}` of a `${...}` template; the lexer sits on `{`
    fn skip_template(&mut self) {
        self.bump();
        let mut depth = 1usize;
        loop {
            match self.peek() {
                None => return,
                Some('"') => self.read_string(),
                Some('\'') => self.read_char_literal(),
                Some('{') => {
                    self.bump();
                    depth += 1;
                }
                Some('}') => {
                    self.bump();
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn read_char_literal(&mut self) {
        self.bump();
        loop {
            match self.bump() {
                None | Some('\'') | Some('\n') => return,
                Some('\\') => {
                    self.bump();
                }
                _ => {}
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Tokenize a whole source string
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
