//! YAL tree-walking interpreter.
//!
//! Executes a parsed [`Program`](yal_types::ast::Program) directly from the
//! AST. Calls to imported functions are routed through a host-supplied
//! [`NativeRegistry`].

pub mod config;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod native;
pub mod value;

pub use config::EvalConfig;
pub use env::Scope;
pub use error::{EvalError, EvalResult};
pub use evaluator::{apply_binary, interpret, interpret_blocking, Interpreter};
pub use native::{
    NativeError, NativeFunction, NativeFuture, NativeModule, NativeRegistry, NativeResult,
    Registry,
};
pub use value::Value;
