//! Core parser infrastructure: token cursor, error construction, helpers.

use yal_lexer::token::{Token, TokenKind};
use yal_types::ast::{Ident, Program};
use yal_types::{ErrorCode, SourceFile, Span, YalError};

/// Result of every parsing routine. The first error aborts the parse.
pub type ParseResult<T> = Result<T, YalError>;

/// The YAL parser.
///
/// Consumes a token stream produced by the lexer and builds a [`Program`].
/// All book-keeping lives in the cursor `pos`; sub-parsers advance it as
/// they consume tokens and never rewind.
pub struct Parser<'src> {
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    source_file: &'src SourceFile,
    /// Current expression nesting depth.
    pub(crate) expr_depth: u32,
}

impl<'src> Parser<'src> {
    /// Create a parser. A missing trailing `Eof` token is supplied.
    pub fn new(mut tokens: Vec<Token>, source_file: &'src SourceFile) -> Self {
        if tokens.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let span = tokens.last().map_or(Span::point(1, 1), |t| t.span);
            tokens.push(Token::new(TokenKind::Eof, "", span));
        }
        Self {
            tokens,
            pos: 0,
            source_file,
            expr_depth: 0,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Span of the most recently consumed token.
    pub(crate) fn previous_span(&self) -> Span {
        match self.pos {
            0 => Span::point(1, 1),
            n => self.tokens[n - 1].span,
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    pub(crate) fn check_exact(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check_exact(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn look_ahead(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    // ── Newline Handling ──────────────────────────────────────────────────────

    pub(crate) fn skip_newlines(&mut self) {
        while self.check_exact(&TokenKind::Newline) {
            self.advance();
        }
    }

    // ── Expect Helpers ────────────────────────────────────────────────────────

    pub(crate) fn expect(&mut self, expected: &TokenKind) -> ParseResult<Token> {
        if self.check_exact(expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&describe(expected)))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> ParseResult<Ident> {
        match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                let span = self.advance().span;
                Ok(Ident::new(name, span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    pub(crate) fn expect_string_literal(&mut self) -> ParseResult<String> {
        match self.peek_kind().clone() {
            TokenKind::String(value) => {
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("string literal")),
        }
    }

    // ── Error Construction ────────────────────────────────────────────────────

    /// "expected X, got Y" at the current token.
    pub(crate) fn unexpected(&self, expected: &str) -> YalError {
        self.error_at(
            ErrorCode::UNEXPECTED_TOKEN,
            format!("expected {expected}, got {}", describe(self.peek_kind())),
            self.peek().span,
        )
    }

    pub(crate) fn error_at(&self, code: ErrorCode, message: impl Into<String>, span: Span) -> YalError {
        YalError::at(self.source_file, code, message, span)
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the token stream into a `Program`.
    pub fn parse(mut self) -> ParseResult<Program> {
        self.parse_program()
    }
}

/// Human-readable token description for diagnostics.
pub(crate) fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Newline | TokenKind::Eof => kind.to_string(),
        TokenKind::Identifier(name) => format!("identifier '{name}'"),
        TokenKind::Number(n) => format!("number {n}"),
        TokenKind::String(s) => format!("string {s:?}"),
        other => format!("'{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_tokens() {
        assert_eq!(describe(&TokenKind::RBrace), "'}'");
        assert_eq!(describe(&TokenKind::Func), "'func'");
        assert_eq!(describe(&TokenKind::Newline), "newline");
        assert_eq!(describe(&TokenKind::Eof), "end of file");
        assert_eq!(describe(&TokenKind::Identifier("x".into())), "identifier 'x'");
        assert_eq!(describe(&TokenKind::Number(3.0)), "number 3");
    }

    #[test]
    fn missing_eof_is_supplied() {
        let sf = SourceFile::new("t.yal", "");
        let parser = Parser::new(Vec::new(), &sf);
        assert!(parser.at_end());
        assert_eq!(parser.look_ahead(5), &TokenKind::Eof);
    }
}
