//! Token navigation utilities for the parser.
//!
//! This module provides the low-level token stream operations that form
//! the foundation of the recursive descent parser:
//! - Peeking at tokens without consuming them
//! - Advancing through the token stream
//! - Matching and expecting specific tokens

use crate::ast::Span;
use crate::lexer::{Token, TokenKind};

use super::{MAX_NESTING_DEPTH, ParseError, ParseResult, Parser};

impl<'a> Parser<'a> {
    // ==================== Token Navigation ====================

    /// Returns the current token without consuming it.
    pub(super) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.current)
    }

    /// Returns the kind of the current token.
    pub(super) fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    /// Consumes and returns the current token.
    pub(super) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.current)?;
        self.current += 1;
        Some(token)
    }

    /// Returns true if we've reached the end of the token stream.
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Checks if the current token matches the expected kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Checks if the current token is one of the expected kinds.
    pub(super) fn check_any(&self, kinds: &[TokenKind]) -> bool {
        self.peek_kind().is_some_and(|k| kinds.contains(k))
    }

    /// Consumes the current token if it matches, returns true if consumed.
    pub(super) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Expects the current token to match, or fails with an error.
    pub(super) fn expect(&mut self, kind: &TokenKind, expected_desc: &str) -> ParseResult<&'a Token> {
        match self.peek() {
            Some(token) if &token.kind == kind => {
                self.current += 1;
                Ok(token)
            }
            Some(token) => Err(ParseError::unexpected(
                expected_desc,
                Self::describe(token),
                token.span.clone().into(),
            )),
            None => Err(ParseError::eof(expected_desc)),
        }
    }

    /// Fails unless every token has been consumed.
    pub(super) fn expect_end(&self, what: &str) -> ParseResult<()> {
        match self.peek() {
            Some(token) => Err(ParseError::TrailingInput {
                what: what.to_string(),
                found: Self::describe(token),
                span: token.span.clone().into(),
            }),
            None => Ok(()),
        }
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// Fails with [`ParseError::NestingTooDeep`] once [`MAX_NESTING_DEPTH`]
    /// levels are open, so hostile input cannot exhaust the stack.
    pub(super) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            let span = self
                .peek()
                .map(|t| t.span.clone().into())
                .unwrap_or_else(|| self.span_from(0));
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span,
            });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Creates a span from start to the end of the last consumed token.
    pub(super) fn span_from(&self, start: usize) -> Span {
        let end = self
            .current
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span.end)
            .unwrap_or(start);
        Span::new(start, end)
    }

    /// How a token is named in error messages.
    pub(super) fn describe(token: &Token) -> String {
        match token.kind {
            TokenKind::Identifier | TokenKind::NumberLiteral | TokenKind::StringLiteral => {
                format!("'{}'", token.text)
            }
            ref kind => kind.to_string(),
        }
    }
}
