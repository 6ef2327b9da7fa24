//! YAL parser: converts a token stream into an AST.

mod parse_decl;
mod parse_expr;
mod parse_stmt;
mod parser;

pub use parse_expr::MAX_EXPR_DEPTH;
pub use parser::{ParseResult, Parser};

use yal_lexer::Lexer;
use yal_types::ast::Program;
use yal_types::SourceFile;

/// Scan and parse a whole source file.
pub fn parse(source_file: &SourceFile) -> ParseResult<Program> {
    let tokens = Lexer::new(source_file).lex()?;
    Parser::new(tokens, source_file).parse()
}
