//! Per-invocation variable scope.

use crate::value::Value;
use std::collections::BTreeMap;

/// Bindings of a single function invocation.
///
/// A fresh scope is created for every call, seeded with the parameters.
/// There is no outer scope and no reassignment: a name is bound at most
/// once, and presence is decided by key alone, whatever the stored value.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: BTreeMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`. Returns `false`, leaving the scope
    /// untouched, if `name` is already bound.
    pub fn declare(&mut self, name: &str, value: Value) -> bool {
        if self.bindings.contains_key(name) {
            return false;
        }
        self.bindings.insert(name.to_string(), value);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
