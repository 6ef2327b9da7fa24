//! Native function contract.
//!
//! Programs import host functions with `import { name } from "module"`.
//! The interpreter resolves each import through a [`NativeRegistry`]
//! supplied by the host: first the module, then the function inside it.

use crate::value::Value;
use futures::future::{self, BoxFuture, FutureExt};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a native callable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NativeError {
    pub message: String,
}

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for NativeError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for NativeError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

pub type NativeResult = Result<Value, NativeError>;

/// The future a native callable hands back to the interpreter.
pub type NativeFuture = BoxFuture<'static, NativeResult>;

type Callable = dyn Fn(Vec<Value>) -> NativeFuture + Send + Sync;

/// A host function with a fixed parameter list.
///
/// The interpreter checks the argument count against `params` before the
/// callable runs, so implementations may index `args` freely.
#[derive(Clone)]
pub struct NativeFunction {
    params: Vec<String>,
    func: Arc<Callable>,
}

impl NativeFunction {
    /// Wrap an async callable.
    pub fn new<P, S, F, Fut>(params: P, func: F) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = NativeResult> + Send + 'static,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            func: Arc::new(move |args| func(args).boxed()),
        }
    }

    /// Wrap a callable that completes immediately.
    pub fn sync<P, S, F>(params: P, func: F) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(Vec<Value>) -> NativeResult + Send + Sync + 'static,
    {
        Self::new(params, move |args| future::ready(func(args)))
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn call(&self, args: Vec<Value>) -> NativeFuture {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A named group of native functions.
#[derive(Debug, Clone)]
pub struct NativeModule {
    name: String,
    functions: BTreeMap<String, NativeFunction>,
}

impl NativeModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: BTreeMap::new(),
        }
    }

    /// Add (or replace) a function.
    pub fn function(mut self, name: impl Into<String>, function: NativeFunction) -> Self {
        self.functions.insert(name.into(), function);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<&NativeFunction> {
        self.functions.get(name)
    }
}

/// Host-side lookup of native modules by name.
pub trait NativeRegistry {
    fn get_module(&self, name: &str) -> Option<&NativeModule>;
}

/// Map-backed [`NativeRegistry`].
///
/// ```
/// use yal_eval::{NativeFunction, NativeModule, Registry, Value};
///
/// let natives = Registry::new().module(
///     NativeModule::new("math").function(
///         "double",
///         NativeFunction::sync(["n"], |args| match args[0] {
///             Value::Number(n) => Ok(Value::Number(n * 2.0)),
///             _ => Err("double expects a number".into()),
///         }),
///     ),
/// );
/// assert_eq!(natives.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    modules: BTreeMap<String, NativeModule>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a module, keyed by its name.
    pub fn module(mut self, module: NativeModule) -> Self {
        self.modules.insert(module.name.clone(), module);
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl NativeRegistry for Registry {
    fn get_module(&self, name: &str) -> Option<&NativeModule> {
        self.modules.get(name)
    }
}
