//! YAL runner: orchestrates the full pipeline.
//!
//! ```text
//! YAL Source → Lexer → Parser → Interpreter → Value
//! ```
//!
//! Scan and parse failures come back as [`YalError`] diagnostics; runtime
//! failures as [`EvalError`]. Both are wrapped in [`RunError`], and
//! [`run_to_report`] flattens either outcome into a serializable
//! [`RunReport`].

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;
use yal_eval::{EvalConfig, EvalError, Interpreter, NativeRegistry, Value};
use yal_types::{SourceFile, YalError};

/// Failure of any pipeline stage.
#[derive(Debug, Clone, Error)]
pub enum RunError {
    /// Scanning or parsing failed.
    #[error(transparent)]
    Compile(#[from] YalError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] EvalError),
}

impl RunError {
    /// Structured diagnostic for either stage.
    pub fn diagnostic(&self, source: &SourceFile) -> YalError {
        match self {
            RunError::Compile(err) => err.clone(),
            RunError::Runtime(err) => err.to_diagnostic(source),
        }
    }
}

/// Parse `source` and evaluate its `main` function.
pub async fn run(source: &SourceFile, natives: &dyn NativeRegistry) -> Result<Value, RunError> {
    run_with_config(source, natives, EvalConfig::default()).await
}

/// [`run`] with explicit interpreter settings.
pub async fn run_with_config(
    source: &SourceFile,
    natives: &dyn NativeRegistry,
    config: EvalConfig,
) -> Result<Value, RunError> {
    let program = yal_parser::parse(source)?;
    debug!(file = %source.name, functions = program.len(), "parsed");
    let value = Interpreter::new(&program, natives)
        .with_config(config)
        .run()
        .await?;
    Ok(value)
}

/// Blocking form of [`run`], driven by a local executor.
pub fn run_blocking(source: &SourceFile, natives: &dyn NativeRegistry) -> Result<Value, RunError> {
    futures::executor::block_on(run(source, natives))
}

/// Outcome of a whole run, shaped for JSON consumers.
///
/// ```json
/// { "success": true, "value": 8.0 }
/// { "success": true, "value": null }
/// { "success": false, "error": { "code": 600, "message": "...", "line": 2, ... } }
/// ```
///
/// A void result is written as `"value": null` and read back as
/// `Some(Value::Void)`. An absent `value` key reads back as `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub success: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<YalError>,
}

impl RunReport {
    pub fn succeeded(value: Value) -> Self {
        Self {
            success: true,
            value: Some(value),
            error: None,
        }
    }

    pub fn failed(error: YalError) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(error),
        }
    }
}

/// A `value` key that is present always holds a value, `null` included.
fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Run `source` to completion and report the outcome.
pub fn run_to_report(source: &str, file_name: &str, natives: &dyn NativeRegistry) -> RunReport {
    let source_file = SourceFile::new(file_name, source);
    match run_blocking(&source_file, natives) {
        Ok(value) => RunReport::succeeded(value),
        Err(err) => RunReport::failed(err.diagnostic(&source_file)),
    }
}

/// [`run_to_report`] rendered as a JSON string.
pub fn run_to_json(source: &str, file_name: &str, natives: &dyn NativeRegistry) -> String {
    let report = run_to_report(source, file_name, natives);
    serde_json::to_string(&report).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"error":{{"message":"serialization error: {}"}}}}"#,
            e
        )
    })
}

/// Return the runner version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
