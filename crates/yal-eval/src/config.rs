//! Interpreter configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENTRY_POINT: &str = "main";
pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;

/// Knobs for a single interpreter. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Function evaluated by [`Interpreter::run`](crate::Interpreter::run).
    pub entry_point: String,
    /// Maximum number of nested script invocations.
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl EvalConfig {
    pub fn with_entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry_point = name.into();
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EvalConfig::default();
        assert_eq!(config.entry_point, "main");
        assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EvalConfig = serde_json::from_str(r#"{"max_call_depth": 16}"#).unwrap();
        assert_eq!(config, EvalConfig::default().with_max_call_depth(16));
    }

    #[test]
    fn builder() {
        let config = EvalConfig::default().with_entry_point("start");
        assert_eq!(config.entry_point, "start");
    }
}
