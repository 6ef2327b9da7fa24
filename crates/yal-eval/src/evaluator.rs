//! Tree-walking interpreter.
//!
//! Evaluation is depth-first and left to right. The walker is async so a
//! native call can await its future in place; everything else (arithmetic,
//! equality, scope access) is plain synchronous code.

use crate::config::EvalConfig;
use crate::env::Scope;
use crate::error::{EvalError, EvalResult};
use crate::native::NativeRegistry;
use crate::value::Value;
use futures::future::{FutureExt, LocalBoxFuture};
use tracing::{debug, trace};
use yal_types::ast::*;
use yal_types::Span;

/// Runs functions of one parsed [`Program`] against a native registry.
pub struct Interpreter<'a> {
    program: &'a Program,
    natives: &'a dyn NativeRegistry,
    config: EvalConfig,
}

impl<'a> Interpreter<'a> {
    pub fn new(program: &'a Program, natives: &'a dyn NativeRegistry) -> Self {
        Self {
            program,
            natives,
            config: EvalConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Evaluate the configured entry point (`main` by default).
    ///
    /// The entry point must be a script function without parameters.
    pub async fn run(&self) -> EvalResult<Value> {
        let name = &self.config.entry_point;
        match self.program.get(name) {
            Some(FunctionDef::Script(main)) if main.params.is_empty() => {
                self.invoke(main, Vec::new(), main.name.span, 0).await
            }
            Some(other) => Err(EvalError::InvalidEntryPoint {
                name: name.clone(),
                span: other.name().span,
            }),
            None => Err(EvalError::MissingEntryPoint { name: name.clone() }),
        }
    }

    /// Call any function of the program by name.
    pub async fn call(&self, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let def = self
            .program
            .get(name)
            .ok_or_else(|| EvalError::MissingEntryPoint {
                name: name.to_string(),
            })?;
        self.dispatch(def, args, def.name().span, 0).await
    }

    // ══════════════════════════════════════════════════════════════════════
    // Invocation
    // ══════════════════════════════════════════════════════════════════════

    /// Route a call to a script or native function.
    ///
    /// Both arms hand back an already boxed future, so a script call nests
    /// one `invoke` poll frame per level and no more.
    fn dispatch<'b>(
        &'b self,
        def: &'b FunctionDef,
        args: Vec<Value>,
        call_span: Span,
        depth: usize,
    ) -> LocalBoxFuture<'b, EvalResult<Value>> {
        match def {
            FunctionDef::Script(func) => self.invoke(func, args, call_span, depth),
            FunctionDef::Native(import) => self.call_native(import, args, call_span),
        }
    }

    /// Run a script function body in a fresh scope.
    ///
    /// `depth` counts the script invocations already on the stack.
    fn invoke<'b>(
        &'b self,
        func: &'b ScriptFunction,
        args: Vec<Value>,
        call_span: Span,
        depth: usize,
    ) -> LocalBoxFuture<'b, EvalResult<Value>> {
        async move {
            let name = &func.name.name;
            check_arity(name, func.arity(), args.len(), call_span)?;
            if depth >= self.config.max_call_depth {
                return Err(EvalError::CallDepthExceeded {
                    name: name.clone(),
                    limit: self.config.max_call_depth,
                    span: call_span,
                });
            }
            let depth = depth + 1;
            debug!(function = %name, depth, "invoke");

            let mut scope = Scope::new();
            for (param, value) in func.params.iter().zip(args) {
                if !scope.declare(&param.name, value) {
                    return Err(EvalError::DuplicateVariable {
                        name: param.name.clone(),
                        span: param.span,
                    });
                }
            }

            for stmt in &func.body {
                match stmt {
                    Stmt::Declaration(decl) => {
                        let value = self.eval_expr(&decl.value, &scope, depth).await?;
                        trace!(name = %decl.name.name, %value, "declare");
                        if !scope.declare(&decl.name.name, value) {
                            return Err(EvalError::DuplicateVariable {
                                name: decl.name.name.clone(),
                                span: decl.name.span,
                            });
                        }
                    }
                    Stmt::Expr(stmt) => {
                        self.eval_expr(&stmt.expr, &scope, depth).await?;
                    }
                    Stmt::Return(ret) => {
                        let value = self.eval_expr(&ret.value, &scope, depth).await?;
                        debug!(function = %name, %value, "return");
                        return Ok(value);
                    }
                }
            }
            debug!(function = %name, "return void");
            Ok(Value::Void)
        }
        .boxed_local()
    }

    fn call_native<'b>(
        &'b self,
        import: &'b NativeImport,
        args: Vec<Value>,
        call_span: Span,
    ) -> LocalBoxFuture<'b, EvalResult<Value>> {
        async move {
            let name = &import.name.name;
            let module = self.natives.get_module(&import.module).ok_or_else(|| {
                EvalError::UnknownModule {
                    module: import.module.clone(),
                    function: name.clone(),
                    span: call_span,
                }
            })?;
            let function = module
                .get(name)
                .ok_or_else(|| EvalError::UnknownNativeFunction {
                    module: import.module.clone(),
                    function: name.clone(),
                    span: call_span,
                })?;
            check_arity(name, function.arity(), args.len(), call_span)?;

            debug!(module = %import.module, function = %name, "native call");
            function.call(args).await.map_err(|source| EvalError::Native {
                module: import.module.clone(),
                function: name.clone(),
                source,
                span: call_span,
            })
        }
        .boxed_local()
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expression evaluation
    // ══════════════════════════════════════════════════════════════════════

    fn eval_expr<'b>(
        &'b self,
        expr: &'b Expr,
        scope: &'b Scope,
        depth: usize,
    ) -> LocalBoxFuture<'b, EvalResult<Value>> {
        async move {
            match &expr.kind {
                ExprKind::NumberLit(n) => Ok(Value::Number(*n)),
                ExprKind::BoolLit(b) => Ok(Value::Bool(*b)),
                ExprKind::StringLit(s) => Ok(Value::String(s.clone())),
                ExprKind::Identifier(name) => {
                    scope
                        .get(name)
                        .cloned()
                        .ok_or_else(|| EvalError::UndeclaredVariable {
                            name: name.clone(),
                            span: expr.span,
                        })
                }
                ExprKind::Equality(bin) | ExprKind::Term(bin) | ExprKind::Factor(bin) => {
                    let lhs = self.eval_expr(&bin.lhs, scope, depth).await?;
                    let rhs = self.eval_expr(&bin.rhs, scope, depth).await?;
                    apply_binary(bin.op, lhs, rhs, bin.op_span)
                }
                ExprKind::Call { callee, args } => {
                    let mut values = Vec::with_capacity(args.len());
                    for arg in args {
                        values.push(self.eval_expr(arg, scope, depth).await?);
                    }
                    let def = self.program.get(&callee.name).ok_or_else(|| {
                        EvalError::UnknownFunction {
                            name: callee.name.clone(),
                            span: callee.span,
                        }
                    })?;
                    self.dispatch(def, values, expr.span, depth).await
                }
            }
        }
        .boxed_local()
    }
}

fn check_arity(name: &str, expected: usize, actual: usize, span: Span) -> EvalResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(EvalError::ArityMismatch {
            name: name.to_string(),
            expected,
            actual,
            span,
        })
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════

/// Apply a binary operator to two evaluated operands.
///
/// Equality never fails: operands of different kinds are unequal under
/// both `==` and `!=`. Arithmetic follows IEEE 754, so dividing by zero
/// gives an infinity or NaN rather than an error.
pub fn apply_binary(op: BinOp, lhs: Value, rhs: Value, op_span: Span) -> EvalResult<Value> {
    use Value::{Number, String};

    let value = match (op, lhs, rhs) {
        (BinOp::Eq | BinOp::NotEq, lhs, rhs) if !lhs.same_kind(&rhs) => Value::Bool(false),
        (BinOp::Eq, lhs, rhs) => Value::Bool(lhs == rhs),
        (BinOp::NotEq, lhs, rhs) => Value::Bool(lhs != rhs),
        (BinOp::Add, Number(a), Number(b)) => Number(a + b),
        (BinOp::Add, String(a), String(b)) => String(a + &b),
        (BinOp::Sub, Number(a), Number(b)) => Number(a - b),
        (BinOp::Mul, Number(a), Number(b)) => Number(a * b),
        (BinOp::Div, Number(a), Number(b)) => Number(a / b),
        (op, lhs, rhs) => {
            return Err(EvalError::TypeMismatch {
                op,
                lhs: lhs.type_name(),
                rhs: rhs.type_name(),
                span: op_span,
            })
        }
    };
    Ok(value)
}

/// Evaluate the entry point of `program`.
pub async fn interpret(program: &Program, natives: &dyn NativeRegistry) -> EvalResult<Value> {
    Interpreter::new(program, natives).run().await
}

/// Blocking form of [`interpret`], driven by a local executor.
pub fn interpret_blocking(program: &Program, natives: &dyn NativeRegistry) -> EvalResult<Value> {
    futures::executor::block_on(interpret(program, natives))
}
