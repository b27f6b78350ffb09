//! Kotlin Language Plugin
//!
//! Implements LanguagePlugin for Kotlin source code.
//! Declarations are recognized by keyword (`class`, `fun`, `val`, ...) on a
//! token stream, so malformed code still yields tags for everything that
//! can be recognized. Scopes follow brace nesting.

use tracing::debug;
use tree_sitter::Language as TSLanguage;

use crate::features::parsing::domain::{SyntaxIssue, Token, TokenKind};
use crate::features::parsing::infrastructure::Lexer;
use crate::features::parsing::ports::{
    ExtractionContext, ExtractionResult, LanguageId, LanguagePlugin,
};
use crate::shared::models::{Result, Span, Tag, TagKind};

/// Kotlin language plugin
pub struct KotlinPlugin;

impl KotlinPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KotlinPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguagePlugin for KotlinPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_kotlin::language()
    }

    fn language_id(&self) -> LanguageId {
        LanguageId::Kotlin
    }

    fn kinds(&self) -> &'static [TagKind] {
        &TagKind::ALL
    }

    fn extract(&self, ctx: &mut ExtractionContext) -> Result<ExtractionResult> {
        let mut scanner = TagScanner::new(ctx);
        scanner.run();
        Ok(scanner.finish())
    }
}

/// Declaration whose body has not been seen yet
#[derive(Debug, Clone)]
struct Pending {
    name: String,
    kind: TagKind,
    /// Paren depth at the declaration keyword
    parens: u32,
}

/// Outcome of looking for a `<...>` list after a declaration keyword
#[derive(Debug)]
enum TypeParams {
    Absent,
    Captured(String),
    /// Reported and rewound to just after the `<`
    Unterminated,
}

impl TypeParams {
    fn text(self) -> Option<String> {
        match self {
            TypeParams::Captured(text) => Some(text),
            _ => None,
        }
    }
}

/// Block opened by `{`
#[derive(Debug)]
struct Block {
    /// Kind of the named scope this block pushed, `None` for code blocks
    scope: Option<TagKind>,
    saved_parens: u32,
    saved_pending: Option<Pending>,
}

struct TagScanner<'c, 's> {
    ctx: &'c mut ExtractionContext<'s>,
    lexer: Lexer<'s>,
    result: ExtractionResult,
    blocks: Vec<Block>,
    pending: Option<Pending>,
    /// Paren depth inside the innermost block
    parens: u32,
    prev: Option<Token>,
    current: Option<Token>,
}

impl<'c, 's> TagScanner<'c, 's> {
    fn new(ctx: &'c mut ExtractionContext<'s>) -> Self {
        let lexer = Lexer::new(ctx.source);
        let result = ExtractionResult::new(ctx.file_path, ctx.language);
        Self {
            ctx,
            lexer,
            result,
            blocks: Vec::new(),
            pending: None,
            parens: 0,
            prev: None,
            current: None,
        }
    }

    fn run(&mut self) {
        while let Some(tok) = self.advance() {
            match tok.kind {
                TokenKind::Punct('{') => self.open_block(),
                TokenKind::Punct('}') => self.close_block(&tok),
                TokenKind::Punct('(') => self.parens += 1,
                TokenKind::Punct(')') => self.parens = self.parens.saturating_sub(1),
                TokenKind::Punct(';') => self.pending = None,
                TokenKind::Punct('=') => self.end_pending_header(),
                TokenKind::Identifier => self.keyword(&tok),
                _ => {}
            }
        }
    }

    fn finish(mut self) -> ExtractionResult {
        if !self.blocks.is_empty() {
            let line = self.lexer.line();
            self.result.add_issue(SyntaxIssue::scanner(
                format!("{} unclosed block(s) at end of input", self.blocks.len()),
                Span::on_line(line, 0, 0),
            ));
            for block in self.blocks.drain(..) {
                if block.scope.is_some() {
                    self.ctx.pop_scope();
                }
            }
        }
        debug!(
            "{}: {} tags, {} scanner issues",
            self.result.file_path,
            self.result.tags.len(),
            self.result.issues.len()
        );
        self.result
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.lexer.next_token()?;
        self.prev = self.current.replace(tok.clone());
        Some(tok)
    }

    fn peek_token(&mut self) -> Option<Token> {
        let cp = self.lexer.checkpoint();
        let tok = self.lexer.next_token();
        self.lexer.reset(cp);
        tok
    }

    /// Next identifier that can name a declaration
    fn declared_name(&mut self) -> Option<Token> {
        self.peek_token()
            .filter(|t| t.is_identifier() && TagKind::from_keyword(&t.text).is_none())
    }

    fn keyword(&mut self, tok: &Token) {
        let Some(kind) = TagKind::from_keyword(&tok.text) else {
            return;
        };
        // `Foo::class`, `x?.val`
        if matches!(
            self.prev.as_ref().map(|t| t.kind),
            Some(TokenKind::DoubleColon) | Some(TokenKind::Punct('.'))
        ) {
            return;
        }
        self.end_pending_header();

        match kind {
            TagKind::Package => self.package(),
            TagKind::Method => self.function(),
            TagKind::Constant | TagKind::Variable => self.property(kind),
            TagKind::Object => self.object(tok),
            _ => self.named(kind),
        }
    }

    /// A header ends at `=` or at the next declaration on its own level
    fn end_pending_header(&mut self) {
        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.parens == self.parens)
        {
            self.pending = None;
        }
    }

    fn package(&mut self) {
        let Some(tok) = self.peek_token().filter(|t| t.is_identifier()) else {
            return;
        };
        self.advance();

        if self.ctx.options.is_enabled(TagKind::Package) {
            let span = Span::on_line(tok.line, tok.col, tok.text.chars().count() as u32);
            let tag = Tag::new(tok.text.clone(), TagKind::Package, span)
                .with_pattern(self.ctx.line_text(tok.line));
            self.result.add_tag(tag);
        }
        self.ctx.package = Some(tok.text);
    }

    /// `interface`, `class`, `typealias`
    fn named(&mut self, kind: TagKind) {
        let Some(name) = self.declared_name() else {
            return;
        };
        self.advance();
        let type_params = self.type_parameters().text();
        self.emit(kind, &name, type_params);
    }

    fn function(&mut self) {
        let type_params = match self.type_parameters() {
            TypeParams::Unterminated => {
                if let Some(name) = self.name_before_paren() {
                    self.emit(TagKind::Method, &name, None);
                }
                return;
            }
            other => other.text(),
        };
        if self
            .peek_token()
            .is_some_and(|t| t.is_identifier() && t.text == "interface")
        {
            self.advance();
            return self.named(TagKind::Interface);
        }
        // anonymous functions have no name
        let Some(tok) = self.declared_name() else {
            return;
        };
        self.advance();
        let name = self.receiver_member(tok);
        self.emit(TagKind::Method, &name, type_params);
    }

    /// After an abandoned `fun <...` list: the identifier directly before
    /// the parameter list's `(`. The lexer position is left unchanged.
    fn name_before_paren(&mut self) -> Option<Token> {
        let cp = self.lexer.checkpoint();
        let mut last: Option<Token> = None;
        let mut name = None;
        while let Some(tok) = self.lexer.next_token() {
            match tok.kind {
                TokenKind::Punct('(') => {
                    name = last;
                    break;
                }
                TokenKind::Identifier if TagKind::from_keyword(&tok.text).is_some() => break,
                TokenKind::Identifier => last = Some(tok),
                TokenKind::Punct('{' | '}' | '=' | ';') => break,
                _ => last = None,
            }
        }
        self.lexer.reset(cp);
        name
    }

    fn property(&mut self, kind: TagKind) {
        let type_params = self.type_parameters().text();
        match self.peek_token() {
            Some(tok) if tok.is_punct('(') => {
                self.advance();
                self.destructuring(kind);
            }
            Some(tok) if tok.is_identifier() && TagKind::from_keyword(&tok.text).is_none() => {
                self.advance();
                let name = self.receiver_member(tok);
                self.emit(kind, &name, type_params);
            }
            _ => {}
        }
    }

    fn object(&mut self, keyword: &Token) {
        let companion = self
            .prev
            .as_ref()
            .is_some_and(|t| t.is_identifier() && t.text == "companion");

        if let Some(name) = self.declared_name() {
            self.advance();
            self.emit(TagKind::Object, &name, None);
        } else if companion {
            let name = Token::new(
                TokenKind::Identifier,
                "Companion",
                keyword.line,
                keyword.col,
                keyword.offset,
            );
            self.emit(TagKind::Object, &name, None);
        }
        // otherwise an object expression: its body is a code block
    }

    /// `(a, _, b: Int)` after `val` / `var`; the lexer sits after `(`
    fn destructuring(&mut self, kind: TagKind) {
        let mut expect_name = true;
        loop {
            let cp = self.lexer.checkpoint();
            let Some(tok) = self.lexer.next_token() else {
                return;
            };
            match tok.kind {
                TokenKind::Identifier if expect_name => {
                    expect_name = false;
                    if tok.text != "_" {
                        self.emit(kind, &tok, None);
                    }
                }
                TokenKind::Punct(',') => expect_name = true,
                TokenKind::Punct('<') => {
                    let after_open = self.lexer.checkpoint();
                    if self.read_angle_group().is_none() {
                        self.lexer.reset(after_open);
                    }
                }
                TokenKind::Punct(')') => return,
                TokenKind::Punct('{' | '}' | ';' | '=') => {
                    self.lexer.reset(cp);
                    return;
                }
                _ => {}
            }
        }
    }

    /// `List<T>.second`, `String?.orEmpty`: the declared name follows the receiver
    fn receiver_member(&mut self, tok: Token) -> Token {
        let cp = self.lexer.checkpoint();
        if self.lexer.peek_char() == Some('<') {
            self.lexer.next_token();
            if self.read_angle_group().is_none() {
                self.lexer.reset(cp);
                return tok;
            }
        }
        if self.lexer.peek_char() == Some('?') {
            self.lexer.next_token();
        }
        if self.lexer.peek_char() == Some('.') {
            self.lexer.next_token();
            if let Some(name) = self.lexer.next_token().filter(|t| t.is_identifier()) {
                return name;
            }
        }
        self.lexer.reset(cp);
        tok
    }

    /// Captures a `<...>` list if one follows. An unterminated list is
    /// reported and left for the main loop to scan.
    fn type_parameters(&mut self) -> TypeParams {
        if self.lexer.peek_char() != Some('<') {
            return TypeParams::Absent;
        }
        let Some(open) = self.lexer.next_token() else {
            return TypeParams::Absent;
        };
        let after_open = self.lexer.checkpoint();
        match self.read_angle_group() {
            Some(text) => TypeParams::Captured(text),
            None => {
                self.lexer.reset(after_open);
                self.result.add_issue(SyntaxIssue::scanner(
                    "unterminated type parameter list",
                    Span::on_line(open.line, open.col, 1),
                ));
                TypeParams::Unterminated
            }
        }
    }

    /// Reads up to the `>` matching an already consumed `<`, returning the
    /// normalized text. A `(` opens a function type only where a type can
    /// start (`<F: (Int) -> Unit>`); after a name or `>` it ends the list
    /// as unterminated, as does any token that cannot appear in it.
    fn read_angle_group(&mut self) -> Option<String> {
        let mut depth = 1usize;
        let mut text = String::from("<");
        let mut type_can_start = true;
        while let Some(tok) = self.lexer.next_token() {
            match tok.kind {
                TokenKind::Punct('<') => {
                    depth += 1;
                    text.push('<');
                }
                TokenKind::Punct('>') => {
                    text.push('>');
                    depth -= 1;
                    if depth == 0 {
                        return Some(text);
                    }
                }
                TokenKind::Punct('-') if self.take_arrow(&tok) => {
                    text.push_str(" -> ");
                    type_can_start = true;
                    continue;
                }
                TokenKind::Punct('(') if type_can_start => {
                    if ends_with_word(&text) {
                        text.push(' ');
                    }
                    self.read_paren_group(&mut text)?;
                    type_can_start = false;
                    continue;
                }
                TokenKind::Punct('(' | ')' | '{' | '}' | '=' | ';') => return None,
                TokenKind::StringLit | TokenKind::CharLit => return None,
                _ => push_type_token(&mut text, &tok),
            }
            type_can_start = match tok.kind {
                TokenKind::Punct('<' | ',' | ':') => true,
                TokenKind::Identifier => tok.text == "suspend",
                _ => false,
            };
        }
        None
    }

    /// Balanced `(...)` of a function type; the lexer sits after `(`
    fn read_paren_group(&mut self, text: &mut String) -> Option<()> {
        let mut depth = 1usize;
        text.push('(');
        while let Some(tok) = self.lexer.next_token() {
            match tok.kind {
                TokenKind::Punct('(') => {
                    depth += 1;
                    text.push('(');
                }
                TokenKind::Punct(')') => {
                    text.push(')');
                    depth -= 1;
                    if depth == 0 {
                        return Some(());
                    }
                }
                TokenKind::Punct('-') if self.take_arrow(&tok) => text.push_str(" -> "),
                TokenKind::Punct('{' | '}' | '=' | ';') => return None,
                TokenKind::StringLit | TokenKind::CharLit => return None,
                _ => push_type_token(text, &tok),
            }
        }
        None
    }

    /// Consumes the `>` of `->` when it directly follows `minus`
    fn take_arrow(&mut self, minus: &Token) -> bool {
        let cp = self.lexer.checkpoint();
        match self.lexer.next_token() {
            Some(next) if next.is_punct('>') && next.offset == minus.offset + 1 => true,
            _ => {
                self.lexer.reset(cp);
                false
            }
        }
    }

    fn open_block(&mut self) {
        let saved_parens = self.parens;
        let (scope, saved_pending) = match self.pending.take() {
            Some(p) if p.parens == self.parens => {
                self.ctx.push_scope(&p.name, p.kind);
                (Some(p.kind), None)
            }
            other => (None, other),
        };
        self.blocks.push(Block {
            scope,
            saved_parens,
            saved_pending,
        });
        self.parens = 0;
    }

    fn close_block(&mut self, tok: &Token) {
        let Some(block) = self.blocks.pop() else {
            self.result.add_issue(SyntaxIssue::scanner(
                "unbalanced `}`",
                Span::on_line(tok.line, tok.col, 1),
            ));
            return;
        };
        if block.scope.is_some() {
            self.ctx.pop_scope();
        }
        self.parens = block.saved_parens;
        self.pending = block.saved_pending;
    }

    /// Inside a function body, initializer, lambda or object expression
    fn in_code_block(&self) -> bool {
        self.blocks
            .iter()
            .any(|b| matches!(b.scope, None | Some(TagKind::Method)))
    }

    /// Scope for a tag emitted now: open scopes, plus a pending
    /// declaration whose parameter list we are inside of
    fn current_scope(&self) -> Option<(String, TagKind)> {
        let open = self
            .ctx
            .scope_path()
            .zip(self.ctx.scope_stack.last().map(|s| s.kind));
        let pending = self.pending.as_ref().filter(|p| self.parens > p.parens);
        match (open, pending) {
            (Some((path, _)), Some(p)) => Some((format!("{}.{}", path, p.name), p.kind)),
            (None, Some(p)) => Some((p.name.clone(), p.kind)),
            (open, None) => open,
        }
    }

    fn emit(&mut self, kind: TagKind, tok: &Token, type_params: Option<String>) {
        let name = tok.name().to_string();
        if name.is_empty() {
            return;
        }
        let local = self.in_code_block();
        let scope = self.current_scope();
        if kind.opens_scope() {
            self.pending = Some(Pending {
                name: name.clone(),
                kind,
                parens: self.parens,
            });
        }

        if local && !self.ctx.options.include_locals {
            return;
        }
        if !self.ctx.options.is_enabled(kind) {
            return;
        }

        let mut tag = Tag::new(name, kind, tok.name_span())
            .with_pattern(self.ctx.line_text(tok.line))
            .with_type_params(type_params)
            .with_package(self.ctx.package.clone());
        if let Some((path, scope_kind)) = scope {
            tag = tag.with_scope(path, scope_kind);
        }
        self.result.add_tag(tag);
    }
}

fn ends_with_word(text: &str) -> bool {
    text.ends_with(|c: char| c.is_alphanumeric() || c == '_')
}

/// Appends one token of a type expression with normalized spacing
fn push_type_token(text: &mut String, tok: &Token) {
    match tok.kind {
        TokenKind::Punct(',') => text.push_str(", "),
        TokenKind::Punct(':') => text.push_str(": "),
        TokenKind::Punct(c) => text.push(c),
        TokenKind::DoubleColon => text.push_str("::"),
        TokenKind::Identifier => {
            if ends_with_word(text) {
                text.push(' ');
            }
            text.push_str(&tok.text);
        }
        TokenKind::StringLit | TokenKind::CharLit => {}
    }
}
