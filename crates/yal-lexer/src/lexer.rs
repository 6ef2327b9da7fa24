//! Core YAL lexer: converts source text to a token stream.
//!
//! Scanning is a single left-to-right pass. At each position a run of
//! blanks is skipped, then token rules are tried in a fixed priority
//! order and the first match wins:
//!
//! 1. single-character punctuation and operators (including newline)
//! 2. `!=` and `==`
//! 3. integer literals
//! 4. words, classified afterwards as keywords or identifiers
//! 5. `:=`
//! 6. string literals
//!
//! The first character no rule accepts aborts the scan.

use yal_types::{ErrorCode, SourceFile, Span, YalError};

use crate::token::{Token, TokenKind};

/// The YAL lexer.
pub struct Lexer<'src> {
    source: &'src str,
    source_file: &'src SourceFile,
    /// Current byte offset into `source`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based, in bytes).
    col: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            source: &source_file.source,
            source_file,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Lex the entire source. On success the stream ends with `Eof`.
    pub fn lex(mut self) -> Result<Vec<Token>, YalError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_blanks();
            if self.at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.current_span()));
                return Ok(tokens);
            }
            tokens.push(self.scan_token()?);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn advance_char(&mut self, ch: char) {
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += ch.len_utf8() as u32;
        }
    }

    /// Advance over `n` ASCII bytes on the current line.
    fn advance_ascii(&mut self, n: usize) {
        self.pos += n;
        self.col += n as u32;
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>, span: Span) -> YalError {
        YalError::at(self.source_file, code, message, span)
    }

    /// Build a token for `source[start..pos]`. Tokens never span lines,
    /// so the end column follows from the byte length.
    fn finish(&self, kind: TokenKind, start: usize, line: u32, col: u32) -> Token {
        let len = (self.pos - start) as u32;
        let span = Span::new(line, col, line, col + len.saturating_sub(1));
        Token::new(kind, &self.source[start..self.pos], span)
    }

    // ─────────────────────────────────────────────────────────────
    // Blanks
    // ─────────────────────────────────────────────────────────────

    /// Skip spaces, tabs and carriage returns. Newlines are tokens.
    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r')) {
            self.advance_ascii(1);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Token rules, in priority order
    // ─────────────────────────────────────────────────────────────

    fn scan_token(&mut self) -> Result<Token, YalError> {
        let start = self.pos;
        let (line, col) = (self.line, self.col);

        if let Some(kind) = self.peek().and_then(single_char_kind) {
            if kind == TokenKind::Newline {
                let token = Token::new(kind, "\n", Span::point(line, col));
                self.advance_char('\n');
                return Ok(token);
            }
            self.advance_ascii(1);
            return Ok(self.finish(kind, start, line, col));
        }

        match (self.peek(), self.peek_at(1)) {
            (Some(b'!'), Some(b'=')) => {
                self.advance_ascii(2);
                return Ok(self.finish(TokenKind::BangEq, start, line, col));
            }
            (Some(b'='), Some(b'=')) => {
                self.advance_ascii(2);
                return Ok(self.finish(TokenKind::EqEq, start, line, col));
            }
            _ => {}
        }

        match self.peek() {
            Some(b'0'..=b'9') => return self.scan_number(start, line, col),
            Some(ch) if is_word_byte(ch) => return Ok(self.scan_word(start, line, col)),
            _ => {}
        }

        if self.peek() == Some(b':') && self.peek_at(1) == Some(b'=') {
            self.advance_ascii(2);
            return Ok(self.finish(TokenKind::ColonEq, start, line, col));
        }

        if self.peek() == Some(b'"') {
            return self.scan_string(start, line, col);
        }

        Err(self.unexpected_character(line, col))
    }

    fn scan_number(&mut self, start: usize, line: u32, col: u32) -> Result<Token, YalError> {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance_ascii(1);
        }
        let text = &self.source[start..self.pos];
        let value: f64 = text.parse().map_err(|_| {
            self.error(
                ErrorCode::UNEXPECTED_CHARACTER,
                format!("invalid number literal '{text}'"),
                Span::new(line, col, line, self.col - 1),
            )
        })?;
        Ok(self.finish(TokenKind::Number(value), start, line, col))
    }

    fn scan_word(&mut self, start: usize, line: u32, col: u32) -> Token {
        while self.peek().is_some_and(is_word_byte) {
            self.advance_ascii(1);
        }
        let text = &self.source[start..self.pos];
        let kind =
            TokenKind::from_keyword(text).unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
        self.finish(kind, start, line, col)
    }

    /// Scan a `"..."` literal. Strings end on the line they start on.
    fn scan_string(&mut self, start: usize, line: u32, col: u32) -> Result<Token, YalError> {
        self.advance_ascii(1); // opening quote
        let mut value = String::new();
        loop {
            match self.peek_char() {
                None | Some('\n') => {
                    return Err(self
                        .error(
                            ErrorCode::UNTERMINATED_STRING,
                            "unterminated string literal",
                            Span::new(line, col, self.line, self.col),
                        )
                        .with_suggestion("close the string with '\"' before the end of the line"));
                }
                Some('"') => {
                    self.advance_ascii(1);
                    return Ok(self.finish(TokenKind::String(value), start, line, col));
                }
                Some('\\') => {
                    let escape_col = self.col;
                    self.advance_ascii(1);
                    let Some(escaped) = self.peek_char().filter(|&c| c != '\n') else {
                        continue;
                    };
                    let unescaped = match escaped {
                        '"' => '"',
                        '\\' => '\\',
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => {
                            return Err(self.error(
                                ErrorCode::INVALID_ESCAPE,
                                format!("invalid escape sequence '\\{other}'"),
                                Span::new(self.line, escape_col, self.line, self.col),
                            ));
                        }
                    };
                    self.advance_char(escaped);
                    value.push(unescaped);
                }
                Some(ch) => {
                    self.advance_char(ch);
                    value.push(ch);
                }
            }
        }
    }

    fn unexpected_character(&self, line: u32, col: u32) -> YalError {
        let ch = self.peek_char().unwrap_or('\0');
        let err = self.error(
            ErrorCode::UNEXPECTED_CHARACTER,
            format!("unexpected character '{}'", ch.escape_default()),
            Span::point(line, col),
        );
        match ch {
            '!' => err.with_suggestion("use '!=' for inequality"),
            '=' => err.with_suggestion("use ':=' to declare a variable or '==' to compare"),
            ':' => err.with_suggestion("use ':=' to declare a variable"),
            _ => err,
        }
    }
}

/// Scan `source` under a placeholder file name.
pub fn scan(source: &str) -> Result<Vec<Token>, YalError> {
    let file = SourceFile::new("<input>", source);
    Lexer::new(&file).lex()
}

fn single_char_kind(ch: u8) -> Option<TokenKind> {
    Some(match ch {
        b'\n' => TokenKind::Newline,
        b'(' => TokenKind::LParen,
        b')' => TokenKind::RParen,
        b'{' => TokenKind::LBrace,
        b'}' => TokenKind::RBrace,
        b',' => TokenKind::Comma,
        b'+' => TokenKind::Plus,
        b'-' => TokenKind::Minus,
        b'*' => TokenKind::Star,
        b'/' => TokenKind::Slash,
        _ => return None,
    })
}

fn is_word_byte(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}
