//! Runtime error types for the YAL interpreter.

use crate::native::NativeError;
use thiserror::Error;
use yal_types::ast::BinOp;
use yal_types::{ErrorCategory, ErrorCode, SourceFile, Span, YalError};

/// Everything that can abort a run after parsing succeeded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("variable '{name}' is already declared in this scope")]
    DuplicateVariable { name: String, span: Span },

    #[error("undeclared variable '{name}'")]
    UndeclaredVariable { name: String, span: Span },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String, span: Span },

    #[error("unknown native module '{module}' (needed by '{function}')")]
    UnknownModule {
        module: String,
        function: String,
        span: Span,
    },

    #[error("native module '{module}' has no function '{function}'")]
    UnknownNativeFunction {
        module: String,
        function: String,
        span: Span,
    },

    #[error("function '{name}' expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
        span: Span,
    },

    #[error("cannot apply '{op}' to {lhs} and {rhs}")]
    TypeMismatch {
        op: BinOp,
        lhs: &'static str,
        rhs: &'static str,
        span: Span,
    },

    /// The requested function does not exist.
    #[error("program has no function '{name}' to run")]
    MissingEntryPoint { name: String },

    #[error("entry point '{name}' must be a script function without parameters")]
    InvalidEntryPoint { name: String, span: Span },

    #[error("native function '{module}.{function}' failed: {source}")]
    Native {
        module: String,
        function: String,
        #[source]
        source: NativeError,
        span: Span,
    },

    #[error("call to '{name}' exceeds the maximum call depth of {limit}")]
    CallDepthExceeded { name: String, limit: usize, span: Span },
}

/// Result alias for interpreter operations.
pub type EvalResult<T> = Result<T, EvalError>;

impl EvalError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateVariable { .. } => ErrorCode::DUPLICATE_VARIABLE,
            Self::UndeclaredVariable { .. } => ErrorCode::UNDECLARED_VARIABLE,
            Self::UnknownFunction { .. } => ErrorCode::UNKNOWN_FUNCTION,
            Self::UnknownModule { .. } => ErrorCode::UNKNOWN_MODULE,
            Self::UnknownNativeFunction { .. } => ErrorCode::UNKNOWN_NATIVE_FUNCTION,
            Self::ArityMismatch { .. } => ErrorCode::WRONG_ARG_COUNT,
            Self::TypeMismatch { .. } => ErrorCode::TYPE_MISMATCH,
            Self::MissingEntryPoint { .. } | Self::InvalidEntryPoint { .. } => {
                ErrorCode::MISSING_ENTRY_POINT
            }
            Self::Native { .. } => ErrorCode::NATIVE_FAILURE,
            Self::CallDepthExceeded { .. } => ErrorCode::CALL_DEPTH_EXCEEDED,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    /// Source location of the offending node. Only a missing entry point
    /// has none.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::DuplicateVariable { span, .. }
            | Self::UndeclaredVariable { span, .. }
            | Self::UnknownFunction { span, .. }
            | Self::UnknownModule { span, .. }
            | Self::UnknownNativeFunction { span, .. }
            | Self::ArityMismatch { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::InvalidEntryPoint { span, .. }
            | Self::Native { span, .. }
            | Self::CallDepthExceeded { span, .. } => Some(*span),
            Self::MissingEntryPoint { .. } => None,
        }
    }

    /// Render as a structured diagnostic against the program's source.
    pub fn to_diagnostic(&self, source: &SourceFile) -> YalError {
        let message = self.to_string();
        let diagnostic = match self.span() {
            Some(span) => YalError::at(source, self.code(), message, span),
            None => YalError::new(&source.name, self.code(), message, Span::point(1, 1), ""),
        };
        match self {
            Self::MissingEntryPoint { name } | Self::InvalidEntryPoint { name, .. } => {
                diagnostic.with_suggestion(format!("declare 'func {name}() {{' with no parameters"))
            }
            Self::UndeclaredVariable { name, .. } => diagnostic.with_suggestion(format!(
                "declare '{name}' with '{name} := ...' before using it"
            )),
            _ => diagnostic,
        }
    }
}
