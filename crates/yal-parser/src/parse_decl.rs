//! Top-level declarations: imports and functions.

use std::collections::btree_map::Entry;

use crate::parser::{describe, ParseResult, Parser};
use yal_lexer::token::TokenKind;
use yal_types::ast::*;
use yal_types::ErrorCode;

impl<'src> Parser<'src> {
    /// `Program = Import* Function*`
    pub(crate) fn parse_program(&mut self) -> ParseResult<Program> {
        let mut program = Program::default();

        self.skip_newlines();
        while self.check_exact(&TokenKind::Import) {
            for import in self.parse_import()? {
                self.declare(&mut program, FunctionDef::Native(import))?;
            }
            self.skip_newlines();
        }

        while !self.at_end() {
            let function = self.parse_function()?;
            self.declare(&mut program, FunctionDef::Script(function))?;
            self.skip_newlines();
        }

        Ok(program)
    }

    /// Bind a function name, rejecting redeclarations.
    fn declare(&self, program: &mut Program, def: FunctionDef) -> ParseResult<()> {
        let name = def.name().clone();
        match program.functions.entry(name.name.clone()) {
            Entry::Occupied(existing) => Err(self.error_at(
                ErrorCode::DUPLICATE_FUNCTION,
                format!(
                    "function '{}' is already declared at {}",
                    name.name,
                    existing.get().name().span
                ),
                name.span,
            )),
            Entry::Vacant(slot) => {
                slot.insert(def);
                Ok(())
            }
        }
    }

    /// `import { a, b } from "module"`
    fn parse_import(&mut self) -> ParseResult<Vec<NativeImport>> {
        let start = self.advance().span; // eat `import`
        self.expect(&TokenKind::LBrace)?;
        let mut names = vec![self.expect_identifier()?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_identifier()?);
        }
        self.expect(&TokenKind::RBrace)?;
        self.expect(&TokenKind::From)?;
        let module = self.expect_string_literal()?;
        let span = start.merge(self.previous_span());

        Ok(names
            .into_iter()
            .map(|name| NativeImport {
                name,
                module: module.clone(),
                span,
            })
            .collect())
    }

    /// `func name(a, b) {` NEWLINE statements `}`
    fn parse_function(&mut self) -> ParseResult<ScriptFunction> {
        if self.check_exact(&TokenKind::Import) {
            return Err(self
                .unexpected("'func'")
                .with_suggestion("imports must come before every function declaration"));
        }
        let start = self.expect(&TokenKind::Func)?.span;
        let name = self.expect_identifier()?;

        self.expect(&TokenKind::LParen)?;
        let mut params: Vec<Ident> = Vec::new();
        if !self.check_exact(&TokenKind::RParen) {
            loop {
                let param = self.expect_identifier()?;
                if params.iter().any(|p| p.name == param.name) {
                    return Err(self.error_at(
                        ErrorCode::DUPLICATE_VARIABLE,
                        format!(
                            "parameter '{}' is declared twice in function '{}'",
                            param.name, name.name
                        ),
                        param.span,
                    ));
                }
                params.push(param);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;

        self.expect(&TokenKind::LBrace)?;
        if !self.check_exact(&TokenKind::Newline) {
            return Err(self
                .unexpected(&describe(&TokenKind::Newline))
                .with_suggestion("start the function body on the line after '{'"));
        }
        self.advance();

        let body = self.parse_body()?;
        let end = self.expect(&TokenKind::RBrace)?.span;

        Ok(ScriptFunction {
            name,
            params,
            body,
            span: start.merge(end),
        })
    }
}
