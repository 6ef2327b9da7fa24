//! Statement parsing.

use crate::parser::{ParseResult, Parser};
use yal_lexer::token::TokenKind;
use yal_types::ast::*;

impl<'src> Parser<'src> {
    /// Statements up to (not including) the closing `}` of a function.
    ///
    /// Blank lines are skipped; every statement must be followed by a
    /// newline or the closing brace.
    pub(crate) fn parse_body(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        loop {
            self.skip_newlines();
            if self.check_exact(&TokenKind::RBrace) {
                return Ok(stmts);
            }
            if self.at_end() {
                return Err(self
                    .unexpected("'}'")
                    .with_suggestion("close the function body with '}'"));
            }
            stmts.push(self.parse_statement()?);
            if !self.check_exact(&TokenKind::RBrace) {
                self.expect(&TokenKind::Newline)?;
            }
        }
    }

    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.peek_kind() {
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Identifier(_) if self.look_ahead(1) == &TokenKind::ColonEq => {
                self.parse_declaration()
            }
            _ => {
                let expr = self.parse_expression()?;
                let span = expr.span;
                Ok(Stmt::Expr(ExprStmt { expr, span }))
            }
        }
    }

    /// `return expr`
    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span; // eat `return`
        let value = self.parse_expression()?;
        let span = start.merge(value.span);
        Ok(Stmt::Return(ReturnStmt { value, span }))
    }

    /// `name := expr`
    fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.expect_identifier()?;
        self.advance(); // eat `:=`
        let value = self.parse_expression()?;
        let span = name.span.merge(value.span);
        Ok(Stmt::Declaration(Declaration { name, value, span }))
    }
}
