//! Statement parsing for the parser.
//!
//! This module contains the main statement dispatcher and parsing for
//! the simple statements: assignment, OUTPUT and BREAK.
//!
//! Block statements (IF, LOOP, WHILE) are handled in `control_flow`.

use crate::ast::{Span, Statement, StatementKind};
use crate::lexer::TokenKind;

use super::{ParseError, ParseResult, Parser};

/// Tokens that close a block; a block body stops in front of any of them.
const BLOCK_CLOSERS: &[TokenKind] = &[TokenKind::Else, TokenKind::EndIf, TokenKind::EndLoop];

impl<'a> Parser<'a> {
    // ==================== Statement Dispatcher ====================

    /// Parses a single statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.nested(Self::dispatch_statement)
    }

    fn dispatch_statement(&mut self) -> ParseResult<Statement> {
        let Some(token) = self.peek() else {
            return Err(ParseError::eof("statement"));
        };

        match &token.kind {
            TokenKind::Output => self.parse_output(),
            TokenKind::Set | TokenKind::Identifier => self.parse_assignment(),

            // Control flow (delegated to control_flow.rs)
            TokenKind::If => self.parse_if(),
            TokenKind::Loop => self.parse_loop(),
            TokenKind::While => self.parse_while(),
            TokenKind::Break => self.parse_break(),

            TokenKind::Input => Err(ParseError::statement(
                "INPUT reads a value; assign it, as in x := INPUT(\"prompt\")",
                token.span.clone().into(),
            )),
            _ => Err(ParseError::unexpected(
                "statement",
                Self::describe(token),
                token.span.clone().into(),
            )),
        }
    }

    /// Parses statements until the end of input or a block closer.
    ///
    /// The closer is left for the caller, which knows which one it wants.
    pub(super) fn parse_block(&mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();

        while !self.is_at_end() && !self.check_any(BLOCK_CLOSERS) {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    // ==================== Simple Statements ====================

    /// Parses `[SET] name := expr`.
    pub(super) fn parse_assignment(&mut self) -> ParseResult<Statement> {
        let start = self.peek().map(|t| t.span.start).unwrap_or(0);
        self.match_token(&TokenKind::Set);

        let name = self.expect(&TokenKind::Identifier, "variable name")?;
        self.expect(&TokenKind::Assign, "':='")?;
        let value = self.parse_expression()?;

        Ok(Statement::new(
            StatementKind::Assignment {
                target: name.text.clone(),
                value,
            },
            self.span_from(start),
        ))
    }

    /// Parses `OUTPUT expr`.
    fn parse_output(&mut self) -> ParseResult<Statement> {
        let start = self.advance().map(|t| t.span.start).unwrap_or(0);
        let value = self.parse_expression()?;

        Ok(Statement::new(
            StatementKind::Output { value },
            self.span_from(start),
        ))
    }

    /// Parses `BREAK`, which is only legal inside a loop body.
    fn parse_break(&mut self) -> ParseResult<Statement> {
        let span: Span = match self.advance() {
            Some(token) => token.span.clone().into(),
            None => return Err(ParseError::eof("BREAK")),
        };

        if self.loop_depth == 0 {
            return Err(ParseError::BreakOutsideLoop { span });
        }

        Ok(Statement::new(StatementKind::Break, span))
    }
}
