use crate::{SourceFile, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error severity. Every YAL error is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Lex,
    Parse,
    Binding,
    Resolution,
    Arity,
    Type,
    EntryPoint,
    Runtime,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lex => "lex",
            Self::Parse => "parse",
            Self::Binding => "binding",
            Self::Resolution => "resolution",
            Self::Arity => "arity",
            Self::Type => "type",
            Self::EntryPoint => "entry point",
            Self::Runtime => "runtime",
        })
    }
}

/// Numeric error code (E100–E899).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Lex errors (E100–E199) ──
    pub const UNEXPECTED_CHARACTER: Self = Self(100);
    pub const UNTERMINATED_STRING: Self = Self(101);
    pub const INVALID_ESCAPE: Self = Self(102);

    // ── Parse errors (E200–E299) ──
    pub const UNEXPECTED_TOKEN: Self = Self(200);
    pub const NESTING_LIMIT_EXCEEDED: Self = Self(201);

    // ── Binding errors (E300–E399) ──
    pub const DUPLICATE_FUNCTION: Self = Self(300);
    pub const DUPLICATE_VARIABLE: Self = Self(301);
    pub const UNDECLARED_VARIABLE: Self = Self(302);

    // ── Resolution errors (E400–E499) ──
    pub const UNKNOWN_FUNCTION: Self = Self(400);
    pub const UNKNOWN_MODULE: Self = Self(401);
    pub const UNKNOWN_NATIVE_FUNCTION: Self = Self(402);

    // ── Arity errors (E500–E599) ──
    pub const WRONG_ARG_COUNT: Self = Self(500);

    // ── Type errors (E600–E699) ──
    pub const TYPE_MISMATCH: Self = Self(600);

    // ── Entry point errors (E700–E799) ──
    pub const MISSING_ENTRY_POINT: Self = Self(700);

    // ── Runtime errors (E800–E899) ──
    pub const NATIVE_FAILURE: Self = Self(800);
    pub const CALL_DEPTH_EXCEEDED: Self = Self(801);

    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Lex,
            200..=299 => ErrorCategory::Parse,
            300..=399 => ErrorCategory::Binding,
            400..=499 => ErrorCategory::Resolution,
            500..=599 => ErrorCategory::Arity,
            600..=699 => ErrorCategory::Type,
            700..=799 => ErrorCategory::EntryPoint,
            _ => ErrorCategory::Runtime,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A structured YAL diagnostic.
///
/// The scanner and parser fail with this directly; runtime errors are
/// converted into it for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YalError {
    pub file: String,
    pub code: ErrorCode,
    pub severity: Severity,
    /// Derived from `code`.
    pub category: ErrorCategory,
    pub message: String,
    #[serde(flatten)]
    pub span: Span,
    /// The source line the span starts on, verbatim.
    pub source_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl YalError {
    pub fn new(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            code,
            severity: Severity::Error,
            category: code.category(),
            message: message.into(),
            span,
            source_line: source_line.into(),
            suggestion: None,
        }
    }

    /// Build an error whose file name and source line come from `source`.
    pub fn at(source: &SourceFile, code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        let line = source.line(span.start_line).unwrap_or("");
        Self::new(&source.name, code, message, span, line)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for YalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.file, self.span, self.code, self.category, self.message
        )
    }
}

impl std::error::Error for YalError {}
