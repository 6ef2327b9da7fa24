//! AST node types for the YAL language.
//!
//! Every node carries a [`Span`] for error reporting. The tree is built
//! once by the parser and only read afterwards.

use crate::Span;
use std::collections::BTreeMap;
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete YAL program: every function reachable by name.
///
/// Names are unique; the parser rejects redeclarations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub functions: BTreeMap<String, FunctionDef>,
}

impl Program {
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Functions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionDef {
    /// `func name(params) { body }`
    Script(ScriptFunction),
    /// A name brought in by `import { name } from "module"`.
    Native(NativeImport),
}

impl FunctionDef {
    pub fn name(&self) -> &Ident {
        match self {
            FunctionDef::Script(f) => &f.name,
            FunctionDef::Native(n) => &n.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            FunctionDef::Script(f) => f.span,
            FunctionDef::Native(n) => n.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptFunction {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl ScriptFunction {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Declaration only; the callable lives in the host's native registry.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeImport {
    pub name: Ident,
    pub module: String,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `name := expr`
    Declaration(Declaration),
    /// `return expr`
    Return(ReturnStmt),
    /// A bare expression; its value is discarded.
    Expr(ExprStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Declaration(d) => d.span,
            Stmt::Return(r) => r.span,
            Stmt::Expr(e) => e.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: Ident,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `==`, `!=`
    Equality(Binary),
    /// `+`, `-`
    Term(Binary),
    /// `*`, `/`
    Factor(Binary),
    /// `name(args...)`
    Call { callee: Ident, args: Vec<Expr> },
    NumberLit(f64),
    BoolLit(bool),
    StringLit(String),
    Identifier(String),
}

/// The shared shape of every binary node.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub lhs: Box<Expr>,
    pub op: BinOp,
    /// Span of the operator token itself.
    pub op_span: Span,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Eq,
    NotEq,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders the expression with every binary node parenthesized, which
/// makes grouping visible: `5 - 3 - 4` prints as `(5 - (3 - 4))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Equality(b) | ExprKind::Term(b) | ExprKind::Factor(b) => {
                write!(f, "({} {} {})", b.lhs, b.op, b.rhs)
            }
            ExprKind::Call { callee, args } => {
                write!(f, "{}(", callee.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            ExprKind::NumberLit(n) => write!(f, "{n}"),
            ExprKind::BoolLit(b) => write!(f, "{b}"),
            ExprKind::StringLit(s) => write!(f, "{s:?}"),
            ExprKind::Identifier(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Expr {
        Expr::new(ExprKind::NumberLit(n), Span::point(1, 1))
    }

    fn term(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        Expr::new(
            ExprKind::Term(Binary {
                lhs: Box::new(lhs),
                op,
                op_span: Span::point(1, 1),
                rhs: Box::new(rhs),
            }),
            Span::point(1, 1),
        )
    }

    #[test]
    fn display_parenthesizes_binary_nodes() {
        let e = term(num(5.0), BinOp::Sub, term(num(3.0), BinOp::Sub, num(4.0)));
        assert_eq!(e.to_string(), "(5 - (3 - 4))");
    }

    #[test]
    fn display_call_and_literals() {
        let call = Expr::new(
            ExprKind::Call {
                callee: Ident::new("greet", Span::point(1, 1)),
                args: vec![
                    Expr::new(ExprKind::StringLit("hi".into()), Span::point(1, 7)),
                    Expr::new(ExprKind::BoolLit(true), Span::point(1, 13)),
                    Expr::new(ExprKind::Identifier("x".into()), Span::point(1, 19)),
                ],
            },
            Span::point(1, 1),
        );
        assert_eq!(call.to_string(), "greet(\"hi\", true, x)");
    }

    #[test]
    fn function_def_name_and_arity() {
        let f = FunctionDef::Script(ScriptFunction {
            name: Ident::new("add", Span::point(1, 6)),
            params: vec![
                Ident::new("a", Span::point(1, 10)),
                Ident::new("b", Span::point(1, 13)),
            ],
            body: Vec::new(),
            span: Span::new(1, 1, 3, 1),
        });
        assert_eq!(f.name().name, "add");
        match &f {
            FunctionDef::Script(s) => assert_eq!(s.arity(), 2),
            FunctionDef::Native(_) => unreachable!(),
        }
    }
}
