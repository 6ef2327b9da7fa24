//! Parser tests: program structure, statements, expression grouping,
//! binding errors, newline rules, and determinism.

use yal_parser::ParseResult;
use yal_types::ast::*;
use yal_types::{ErrorCode, SourceFile, Span, YalError};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn parse(source: &str) -> ParseResult<Program> {
    yal_parser::parse(&SourceFile::new("test.yal", source))
}

/// Parse source and return the program, panicking on error.
fn parse_ok(source: &str) -> Program {
    match parse(source) {
        Ok(program) => program,
        Err(e) => panic!("unexpected parse error: {e}"),
    }
}

fn parse_err(source: &str) -> YalError {
    match parse(source) {
        Ok(program) => panic!("expected a parse error, got {program:?}"),
        Err(e) => e,
    }
}

fn script<'a>(program: &'a Program, name: &str) -> &'a ScriptFunction {
    match program.get(name) {
        Some(FunctionDef::Script(f)) => f,
        other => panic!("expected script function '{name}', got {other:?}"),
    }
}

/// Parse `expr` as the returned value of `main`.
fn return_expr(expr: &str) -> Expr {
    let program = parse_ok(&format!("func main() {{\n  return {expr}\n}}"));
    match &script(&program, "main").body[..] {
        [Stmt::Return(ret)] => ret.value.clone(),
        other => panic!("expected a single return, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Program structure
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_minimal_main() {
    let prog = parse_ok("func main() {\n  return 1\n}");
    assert_eq!(prog.len(), 1);
    let main = script(&prog, "main");
    assert_eq!(main.arity(), 0);
    assert_eq!(main.body.len(), 1);
    assert_eq!(main.span, Span::new(1, 1, 3, 1));
}

#[test]
fn test_empty_source_is_empty_program() {
    assert!(parse_ok("").is_empty());
    assert!(parse_ok("\n\n\n").is_empty());
}

#[test]
fn test_function_parameters() {
    let prog = parse_ok("func add(a, b) {\n  return a + b\n}");
    let add = script(&prog, "add");
    let names: Vec<&str> = add.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(add.params[1].span, Span::new(1, 13, 1, 13));
}

#[test]
fn test_functions_are_keyed_by_name() {
    let prog = parse_ok(
        "func zeta() {\n  return 1\n}\n\nfunc alpha() {\n  return 2\n}\nfunc main() {\n  return 3\n}",
    );
    let names: Vec<&String> = prog.functions.keys().collect();
    assert_eq!(names, ["alpha", "main", "zeta"]);
}

#[test]
fn test_functions_need_no_separating_newline() {
    let prog = parse_ok("func a() {\n  return 1\n}func b() {\n  return 2\n}");
    assert!(prog.contains("a"));
    assert!(prog.contains("b"));
}

#[test]
fn test_imports() {
    let prog = parse_ok(
        r#"import { get } from "http"
import { readFile, writeFile } from "fs"

func main() {
  return 0
}"#,
    );
    assert_eq!(prog.len(), 4);
    match prog.get("readFile") {
        Some(FunctionDef::Native(import)) => {
            assert_eq!(import.module, "fs");
            assert_eq!(import.name.span, Span::new(2, 10, 2, 17));
        }
        other => panic!("expected native import, got {other:?}"),
    }
    match prog.get("get") {
        Some(FunctionDef::Native(import)) => assert_eq!(import.module, "http"),
        other => panic!("expected native import, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Statements
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_declaration_statement() {
    let prog = parse_ok("func main() {\n  x := 5\n  return x\n}");
    let main = script(&prog, "main");
    match &main.body[0] {
        Stmt::Declaration(decl) => {
            assert_eq!(decl.name.name, "x");
            assert_eq!(decl.value.kind, ExprKind::NumberLit(5.0));
            assert_eq!(decl.span, Span::new(2, 3, 2, 8));
        }
        other => panic!("expected declaration, got {other:?}"),
    }
    assert!(matches!(main.body[1], Stmt::Return(_)));
}

#[test]
fn test_expression_statement() {
    let prog = parse_ok("func main() {\n  print(\"hi\")\n}");
    match &script(&prog, "main").body[0] {
        Stmt::Expr(stmt) => assert_eq!(stmt.expr.to_string(), "print(\"hi\")"),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn test_blank_lines_inside_body() {
    let prog = parse_ok("func main() {\n\n  x := 1\n\n\n  return x\n\n}");
    assert_eq!(script(&prog, "main").body.len(), 2);
}

#[test]
fn test_closing_brace_after_last_statement() {
    let prog = parse_ok("func main() {\n  return 1 }");
    assert_eq!(script(&prog, "main").body.len(), 1);
}

#[test]
fn test_empty_body() {
    let prog = parse_ok("func noop() {\n}");
    assert!(script(&prog, "noop").body.is_empty());
}

// ─────────────────────────────────────────────────────────────────────
// Expression grouping
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_literals() {
    assert_eq!(return_expr("42").kind, ExprKind::NumberLit(42.0));
    assert_eq!(return_expr("true").kind, ExprKind::BoolLit(true));
    assert_eq!(return_expr("false").kind, ExprKind::BoolLit(false));
    assert_eq!(
        return_expr(r#""a\nb""#).kind,
        ExprKind::StringLit("a\nb".into())
    );
    assert_eq!(return_expr("x").kind, ExprKind::Identifier("x".into()));
}

#[test]
fn test_subtraction_groups_right() {
    assert_eq!(return_expr("5 - 3 - 4").to_string(), "(5 - (3 - 4))");
}

#[test]
fn test_division_groups_right() {
    assert_eq!(return_expr("8 / 4 / 2").to_string(), "(8 / (4 / 2))");
}

#[test]
fn test_lower_operator_on_the_right_is_absorbed() {
    assert_eq!(return_expr("2 * 3 + 4").to_string(), "(2 * (3 + 4))");
    assert_eq!(return_expr("1 + 2 == 3").to_string(), "(1 + (2 == 3))");
}

#[test]
fn test_higher_operator_on_the_right_binds_tighter() {
    assert_eq!(return_expr("1 + 2 * 3").to_string(), "(1 + (2 * 3))");
    assert_eq!(return_expr("a == b + 1").to_string(), "(a == (b + 1))");
}

#[test]
fn test_equality_chain() {
    assert_eq!(return_expr("a == b != c").to_string(), "(a == (b != c))");
}

#[test]
fn test_binary_node_kinds() {
    assert!(matches!(return_expr("1 == 2").kind, ExprKind::Equality(_)));
    assert!(matches!(return_expr("1 - 2").kind, ExprKind::Term(_)));
    assert!(matches!(return_expr("1 / 2").kind, ExprKind::Factor(_)));
}

#[test]
fn test_binary_spans() {
    let expr = return_expr("10 - 3");
    assert_eq!(expr.span, Span::new(2, 10, 2, 15));
    match expr.kind {
        ExprKind::Term(b) => {
            assert_eq!(b.op, BinOp::Sub);
            assert_eq!(b.op_span, Span::new(2, 13, 2, 13));
        }
        other => panic!("expected term, got {other:?}"),
    }
}

#[test]
fn test_calls() {
    assert_eq!(return_expr("f()").to_string(), "f()");
    assert_eq!(
        return_expr(r#"f(1, g(2), "s")"#).to_string(),
        r#"f(1, g(2), "s")"#
    );
    assert_eq!(return_expr("f(a) + g(b)").to_string(), "(f(a) + g(b))");
}

#[test]
fn test_call_span_covers_parens() {
    let expr = return_expr("add(1, 2)");
    assert_eq!(expr.span, Span::new(2, 10, 2, 18));
}

// ─────────────────────────────────────────────────────────────────────
// Binding errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_duplicate_function() {
    let err = parse_err("func a() {\n  return 1\n}\nfunc a() {\n  return 2\n}");
    assert_eq!(err.code, ErrorCode::DUPLICATE_FUNCTION);
    assert_eq!(err.span, Span::new(4, 6, 4, 6));
    assert_eq!(err.message, "function 'a' is already declared at 1:6");
}

#[test]
fn test_function_clashes_with_import() {
    let err = parse_err("import { main } from \"io\"\nfunc main() {\n  return 1\n}");
    assert_eq!(err.code, ErrorCode::DUPLICATE_FUNCTION);
    assert_eq!(err.span.start_line, 2);
}

#[test]
fn test_duplicate_import() {
    let err = parse_err("import { print, print } from \"io\"");
    assert_eq!(err.code, ErrorCode::DUPLICATE_FUNCTION);
}

#[test]
fn test_duplicate_parameter() {
    let err = parse_err("func f(a, a) {\n  return a\n}");
    assert_eq!(err.code, ErrorCode::DUPLICATE_VARIABLE);
    assert_eq!(err.span, Span::new(1, 11, 1, 11));
    assert_eq!(err.message, "parameter 'a' is declared twice in function 'f'");
}

// ─────────────────────────────────────────────────────────────────────
// Syntax errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_newline_required_after_open_brace() {
    let err = parse_err("func main() { return 1 }");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.message, "expected newline, got 'return'");
    assert!(err.suggestion.is_some());
}

#[test]
fn test_statements_need_separate_lines() {
    let err = parse_err("func main() {\n  x := 1 return x\n}");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.message, "expected newline, got 'return'");
    assert_eq!(err.span.start_line, 2);
}

#[test]
fn test_import_after_function() {
    let err = parse_err("func main() {\n  return 1\n}\nimport { print } from \"io\"");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.message, "expected 'func', got 'import'");
    assert_eq!(
        err.suggestion.as_deref(),
        Some("imports must come before every function declaration")
    );
}

#[test]
fn test_missing_expression() {
    let err = parse_err("func main() {\n  return )\n}");
    assert_eq!(err.message, "expected expression, got ')'");
    assert_eq!(err.span, Span::new(2, 10, 2, 10));
    assert_eq!(err.source_line, "  return )");
}

#[test]
fn test_unterminated_body() {
    let err = parse_err("func main() {\n  return 1\n");
    assert_eq!(err.message, "expected '}', got end of file");
}

#[test]
fn test_missing_call_close_paren() {
    let err = parse_err("func main() {\n  return f(1, 2\n}");
    assert_eq!(err.message, "expected ')', got newline");
}

#[test]
fn test_import_needs_string_module() {
    let err = parse_err("import { print } from io");
    assert_eq!(err.message, "expected string literal, got identifier 'io'");
}

#[test]
fn test_scan_errors_surface_from_parse() {
    let err = parse_err("func main() {\n  return 1 ! 2\n}");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_CHARACTER);
    assert_eq!(err.file, "test.yal");
}

// ─────────────────────────────────────────────────────────────────────
// Nesting limit
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_long_operator_chain_within_limit() {
    let chain = vec!["1"; 100].join(" + ");
    let expr = return_expr(&chain);
    assert!(matches!(expr.kind, ExprKind::Term(_)));
}

#[test]
fn test_operator_chain_past_limit() {
    let chain = vec!["1"; 400].join(" + ");
    let err = parse_err(&format!("func main() {{\n  return {chain}\n}}"));
    assert_eq!(err.code, ErrorCode::NESTING_LIMIT_EXCEEDED);
}

#[test]
fn test_nested_calls_past_limit() {
    let depth = yal_parser::MAX_EXPR_DEPTH as usize + 1;
    let nested = format!("{}1{}", "f(".repeat(depth), ")".repeat(depth));
    let err = parse_err(&format!("func main() {{\n  return {nested}\n}}"));
    assert_eq!(err.code, ErrorCode::NESTING_LIMIT_EXCEEDED);
}

// ─────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_parse_determinism_100_iterations() {
    let source = r#"import { print } from "io"

func square(n) {
  return n * n
}

func main() {
  x := square(4) - 3 - 2
  print("done")
  return x == 13
}"#;
    let first = parse_ok(source);
    for _ in 0..100 {
        assert_eq!(parse_ok(source), first);
    }
}
