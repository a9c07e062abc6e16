//! Control flow statement parsing.
//!
//! This module handles the block statements:
//! - IF/THEN/ELSE/ENDIF
//! - LOOP/ENDLOOP
//! - WHILE/DO/ENDLOOP
//!
//! Both loop forms produce a [`StatementKind::While`]; an unconditional
//! `LOOP` gets the test `TRUE`.

use crate::ast::{Expr, Span, Statement, StatementKind};
use crate::lexer::TokenKind;

use super::{ParseError, ParseResult, Parser};

impl<'a> Parser<'a> {
    // ==================== IF Statement ====================

    /// Parses `IF test THEN ... [ELSE ...] ENDIF`.
    pub(super) fn parse_if(&mut self) -> ParseResult<Statement> {
        let if_span = self.keyword_span();
        let test = self.parse_expression()?;
        self.expect(&TokenKind::Then, "THEN")?;

        let consequent = self.parse_block()?;

        let alternate = if self.match_token(&TokenKind::Else) {
            let alternate = self.parse_block()?;
            // An empty ELSE is the same as no ELSE
            (!alternate.is_empty()).then_some(alternate)
        } else {
            None
        };

        self.expect_closer(&TokenKind::EndIf, ParseError::MissingEndIf { if_span })?;

        Ok(Statement::new(
            StatementKind::If {
                test,
                consequent,
                alternate,
            },
            self.span_from(if_span.start),
        ))
    }

    // ==================== Loops ====================

    /// Parses `LOOP ... ENDLOOP`.
    pub(super) fn parse_loop(&mut self) -> ParseResult<Statement> {
        let loop_span = self.keyword_span();
        let body = self.parse_loop_body()?;
        self.expect_closer(&TokenKind::EndLoop, ParseError::MissingEndLoop { loop_span })?;

        Ok(Statement::new(
            StatementKind::While {
                test: Expr::literal(true, loop_span),
                body,
            },
            self.span_from(loop_span.start),
        ))
    }

    /// Parses `WHILE test DO ... ENDLOOP`.
    pub(super) fn parse_while(&mut self) -> ParseResult<Statement> {
        let loop_span = self.keyword_span();
        let test = self.parse_expression()?;
        self.expect(&TokenKind::Do, "DO")?;

        let body = self.parse_loop_body()?;
        self.expect_closer(&TokenKind::EndLoop, ParseError::MissingEndLoop { loop_span })?;

        Ok(Statement::new(
            StatementKind::While { test, body },
            self.span_from(loop_span.start),
        ))
    }

    /// Parses a loop body, where BREAK is allowed.
    fn parse_loop_body(&mut self) -> ParseResult<Vec<Statement>> {
        self.loop_depth += 1;
        let body = self.parse_block();
        self.loop_depth -= 1;
        body
    }

    // ==================== Helpers ====================

    /// Consumes the opening keyword and returns its span.
    fn keyword_span(&mut self) -> Span {
        self.advance()
            .map(|t| t.span.clone().into())
            .unwrap_or_default()
    }

    /// Expects the closer of a block, reporting `missing` at end of input.
    fn expect_closer(&mut self, closer: &TokenKind, missing: ParseError) -> ParseResult<()> {
        if self.is_at_end() {
            return Err(missing);
        }
        self.expect(closer, &closer.to_string())?;
        Ok(())
    }
}
