//! Expression parsing.
//!
//! Precedence (lowest → highest):
//! 4. `==`, `!=`
//! 3. `+`, `-`
//! 2. `*`, `/`
//! 1. call, literal, identifier
//!
//! The right operand of every binary operator is a full expression, not
//! the next level down. Chains therefore group to the right
//! (`5 - 3 - 4` is `5 - (3 - 4)`), and a lower-precedence operator to the
//! right of a higher one is absorbed into its right operand
//! (`2 * 3 + 4` is `2 * (3 + 4)`).

use yal_lexer::token::TokenKind;
use yal_types::ast::*;
use yal_types::ErrorCode;

use crate::parser::{ParseResult, Parser};

/// Deepest expression nesting accepted before the parser gives up.
pub const MAX_EXPR_DEPTH: u32 = 256;

impl<'src> Parser<'src> {
    /// `Expression = Equality`
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.expr_depth += 1;
        if self.expr_depth > MAX_EXPR_DEPTH {
            let err = self.error_at(
                ErrorCode::NESTING_LIMIT_EXCEEDED,
                format!("maximum expression nesting depth is {MAX_EXPR_DEPTH}"),
                self.peek().span,
            );
            self.expr_depth -= 1;
            return Err(err);
        }
        let result = self.parse_equality();
        self.expr_depth -= 1;
        result
    }

    /// `Equality = Term (('==' | '!=') Expression)?`
    fn parse_equality(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_term()?;
        let op = match self.peek_kind() {
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::BangEq => BinOp::NotEq,
            _ => return Ok(lhs),
        };
        self.parse_binary_rhs(lhs, op, ExprKind::Equality)
    }

    /// `Term = Factor (('+' | '-') Expression)?`
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_factor()?;
        let op = match self.peek_kind() {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            _ => return Ok(lhs),
        };
        self.parse_binary_rhs(lhs, op, ExprKind::Term)
    }

    /// `Factor = Call (('*' | '/') Expression)?`
    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_call()?;
        let op = match self.peek_kind() {
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            _ => return Ok(lhs),
        };
        self.parse_binary_rhs(lhs, op, ExprKind::Factor)
    }

    /// Consume the operator at the cursor and a full expression after it.
    fn parse_binary_rhs(
        &mut self,
        lhs: Expr,
        op: BinOp,
        node: fn(Binary) -> ExprKind,
    ) -> ParseResult<Expr> {
        let op_span = self.advance().span;
        let rhs = self.parse_expression()?;
        let span = lhs.span.merge(rhs.span);
        Ok(Expr::new(
            node(Binary {
                lhs: Box::new(lhs),
                op,
                op_span,
                rhs: Box::new(rhs),
            }),
            span,
        ))
    }

    /// `Call = Identifier '(' (Expression (',' Expression)*)? ')' | Primary`
    fn parse_call(&mut self) -> ParseResult<Expr> {
        let is_call = matches!(self.peek_kind(), TokenKind::Identifier(_))
            && self.look_ahead(1) == &TokenKind::LParen;
        if !is_call {
            return self.parse_primary();
        }

        let callee = self.expect_identifier()?;
        self.advance(); // eat `(`
        let mut args = Vec::new();
        if !self.check_exact(&TokenKind::RParen) {
            args.push(self.parse_expression()?);
            while self.eat(&TokenKind::Comma) {
                args.push(self.parse_expression()?);
            }
        }
        let close = self.expect(&TokenKind::RParen)?;
        let span = callee.span.merge(close.span);
        Ok(Expr::new(ExprKind::Call { callee, args }, span))
    }

    /// `Primary = Number | Bool | String | Identifier`
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let kind = match self.peek_kind() {
            TokenKind::Number(n) => ExprKind::NumberLit(*n),
            TokenKind::True => ExprKind::BoolLit(true),
            TokenKind::False => ExprKind::BoolLit(false),
            TokenKind::String(s) => ExprKind::StringLit(s.clone()),
            TokenKind::Identifier(name) => ExprKind::Identifier(name.clone()),
            _ => return Err(self.unexpected("expression")),
        };
        let span = self.advance().span;
        Ok(Expr::new(kind, span))
    }
}
