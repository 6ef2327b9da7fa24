//! Shared types for the YAL interpreter.
//!
//! This crate defines the AST node types, source spans, and the
//! structured diagnostic used by every pipeline stage.

mod error;
mod span;
pub mod ast;

pub use error::{ErrorCategory, ErrorCode, Severity, YalError};
pub use span::{SourceFile, Span};

/// Result type used by the scanner and parser.
pub type Result<T> = std::result::Result<T, YalError>;
