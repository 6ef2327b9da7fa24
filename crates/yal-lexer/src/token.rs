//! Token types for the YAL lexer.

use std::fmt;
use yal_types::Span;

/// All reserved words of the language.
pub const ALL_KEYWORDS: &[&str] = &["func", "return", "true", "false", "import", "from"];

/// A single lexical token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text this token was scanned from.
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ─────────────────────────────────────────────

    /// Integer literal, stored as `f64`.
    Number(f64),
    /// Unescaped contents of a `"..."` literal.
    String(String),
    True,
    False,

    Identifier(String),

    // ── Keywords ─────────────────────────────────────────────

    /// `func`
    Func,
    /// `return`
    Return,
    /// `import`
    Import,
    /// `from`
    From,

    // ── Operators ────────────────────────────────────────────

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `:=`
    ColonEq,

    // ── Punctuation ──────────────────────────────────────────

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,

    // ── Special ──────────────────────────────────────────────

    /// Newline (statement separator)
    Newline,
    /// End of file
    Eof,
}

impl TokenKind {
    /// Look up a reserved word. `None` means `s` is a plain identifier.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        Some(match s {
            "func" => TokenKind::Func,
            "return" => TokenKind::Return,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "import" => TokenKind::Import,
            "from" => TokenKind::From,
            _ => return None,
        })
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Func
                | TokenKind::Return
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Import
                | TokenKind::From
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::String(s) => write!(f, "{s:?}"),
            TokenKind::True => f.write_str("true"),
            TokenKind::False => f.write_str("false"),
            TokenKind::Identifier(name) => f.write_str(name),
            TokenKind::Func => f.write_str("func"),
            TokenKind::Return => f.write_str("return"),
            TokenKind::Import => f.write_str("import"),
            TokenKind::From => f.write_str("from"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::EqEq => f.write_str("=="),
            TokenKind::BangEq => f.write_str("!="),
            TokenKind::ColonEq => f.write_str(":="),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBrace => f.write_str("{"),
            TokenKind::RBrace => f.write_str("}"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Newline => f.write_str("newline"),
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_keyword_recognises_all() {
        for &kw in ALL_KEYWORDS {
            let kind = TokenKind::from_keyword(kw).unwrap();
            assert!(kind.is_keyword(), "'{kw}' should be a keyword");
            assert_eq!(kind.to_string(), kw);
        }
    }

    #[test]
    fn from_keyword_returns_none_for_identifiers() {
        for name in ["main", "Func", "returns", "True", "fromage", "_import"] {
            assert!(
                TokenKind::from_keyword(name).is_none(),
                "'{name}' should not be a keyword"
            );
        }
    }

    #[test]
    fn display_of_special_tokens() {
        assert_eq!(TokenKind::Newline.to_string(), "newline");
        assert_eq!(TokenKind::Eof.to_string(), "end of file");
        assert_eq!(TokenKind::String("a b".into()).to_string(), "\"a b\"");
        assert_eq!(TokenKind::Number(42.0).to_string(), "42");
    }
}
