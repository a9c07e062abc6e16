//! Expression parsing using Pratt (precedence climbing) parsing.
//!
//! Pratt parsing handles:
//! - Binary operators with correct precedence and associativity
//! - Unary operators (negation, NOT)
//! - Parenthesized expressions
//! - `INPUT(prompt)`
//!
//! # Precedence Levels (lowest to highest)
//!
//! 1. Equality (==, !=, and the flowchart spellings =, <>)
//! 2. Relational (<, <=, >, >=)
//! 3. Additive (+, -)
//! 4. Multiplicative (*, /, %)
//! 5. Unary (-, NOT)
//!
//! Every binary level is left-associative.

use crate::ast::{BinaryOp, Expr, ExprKind, Span, UnaryOp};
use crate::lexer::TokenKind;

use super::{MAX_NESTING_DEPTH, ParseError, ParseResult, Parser, Precedence};

impl<'a> Parser<'a> {
    // ==================== Expression Parsing (Pratt Parser) ====================

    /// Parses an expression.
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_expr_precedence(Precedence::Lowest)
    }

    /// Parses an expression with the given minimum precedence.
    pub(super) fn parse_expr_precedence(&mut self, min_prec: Precedence) -> ParseResult<Expr> {
        self.nested(|parser| parser.parse_infix(min_prec))
    }

    /// One precedence-climbing level: a prefix, then every infix operator
    /// binding tighter than `min_prec`.
    fn parse_infix(&mut self, min_prec: Precedence) -> ParseResult<Expr> {
        // Parse prefix (primary expression or unary operator)
        let mut left = self.parse_prefix()?;

        // Parse infix operators while they bind tighter than the caller
        while let Some(kind) = self.peek_kind() {
            let Some(op) = Self::token_to_binary_op(kind) else {
                break;
            };
            let op_prec = op.precedence();
            if op_prec <= min_prec {
                break;
            }

            self.advance();
            let left_height = self.expr_height;
            // The right operand is parsed at the operator's own level, so a
            // following operator of the same level ends it: left associativity.
            let right = self.parse_expr_precedence(op_prec)?;
            let span = left.span.merge(&right.span);
            self.wrap(left_height.max(self.expr_height), span)?;
            left = Expr::new(
                ExprKind::Binary {
                    operator: op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    /// Parses a prefix expression (literal, identifier, unary op, or grouped).
    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.peek() else {
            return Err(ParseError::eof("expression"));
        };
        let span: Span = token.span.clone().into();

        match &token.kind {
            TokenKind::NumberLiteral => {
                self.advance();
                let n: f64 = token.text.parse().map_err(|_| ParseError::InvalidNumber {
                    span,
                    message: format!("'{}' is not a number", token.text),
                })?;
                self.expr_height = 1;
                Ok(Expr::literal(n, span))
            }
            TokenKind::StringLiteral => {
                self.advance();
                let text = &token.text[1..token.text.len() - 1];
                self.expr_height = 1;
                Ok(Expr::literal(text, span))
            }
            TokenKind::True => {
                self.advance();
                self.expr_height = 1;
                Ok(Expr::literal(true, span))
            }
            TokenKind::False => {
                self.advance();
                self.expr_height = 1;
                Ok(Expr::literal(false, span))
            }
            TokenKind::Identifier => {
                self.advance();
                self.expr_height = 1;
                Ok(Expr::new(
                    ExprKind::Identifier {
                        name: token.text.clone(),
                    },
                    span,
                ))
            }
            TokenKind::LeftParen => self.parse_grouped(),
            TokenKind::Input => self.parse_input(),
            TokenKind::Minus => self.parse_unary(UnaryOp::Negate),
            TokenKind::Not => self.parse_unary(UnaryOp::Not),
            _ => Err(ParseError::unexpected(
                "expression",
                Self::describe(token),
                span,
            )),
        }
    }

    /// Parses a unary expression: `-x` or `NOT x`.
    fn parse_unary(&mut self, operator: UnaryOp) -> ParseResult<Expr> {
        let start = self.advance().map(|t| t.span.start).unwrap_or(0);
        let operand = self.parse_expr_precedence(Precedence::Unary)?;
        let span = Span::new(start, operand.span.end);
        self.wrap(self.expr_height, span)?;

        Ok(Expr::new(
            ExprKind::Unary {
                operator,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// Parses a parenthesized expression.
    ///
    /// Grouping leaves no trace in the tree; the expression's span is widened
    /// to cover the parentheses.
    fn parse_grouped(&mut self) -> ParseResult<Expr> {
        let start = self.advance().map(|t| t.span.start).unwrap_or(0);
        let mut expr = self.parse_expression()?;
        self.expect(&TokenKind::RightParen, "')'")?;
        expr.span = self.span_from(start);
        Ok(expr)
    }

    /// Parses `INPUT(prompt)`.
    fn parse_input(&mut self) -> ParseResult<Expr> {
        let start = self.advance().map(|t| t.span.start).unwrap_or(0);
        self.expect(&TokenKind::LeftParen, "'(' after INPUT")?;
        let prompt = self.parse_expression()?;
        self.expect(&TokenKind::RightParen, "')'")?;
        let span = self.span_from(start);
        self.wrap(self.expr_height, span)?;

        Ok(Expr::new(
            ExprKind::Input {
                prompt: Box::new(prompt),
            },
            span,
        ))
    }

    /// Records that the expression being built sits one level above a
    /// subtree of height `below`, failing past [`MAX_NESTING_DEPTH`].
    fn wrap(&mut self, below: usize, span: Span) -> ParseResult<()> {
        self.expr_height = below + 1;
        if self.expr_height > MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span,
            });
        }
        Ok(())
    }

    /// Maps a token to its binary operator, if it is one.
    fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Subtract),
            TokenKind::Star => Some(BinaryOp::Multiply),
            TokenKind::Slash => Some(BinaryOp::Divide),
            TokenKind::Percent => Some(BinaryOp::Modulo),
            TokenKind::EqualEqual | TokenKind::EqualsLegacy => Some(BinaryOp::Equal),
            TokenKind::NotEquals | TokenKind::NotEqualsLegacy => Some(BinaryOp::NotEqual),
            TokenKind::LessThan => Some(BinaryOp::LessThan),
            TokenKind::LessEquals => Some(BinaryOp::LessEqual),
            TokenKind::GreaterThan => Some(BinaryOp::GreaterThan),
            TokenKind::GreaterEquals => Some(BinaryOp::GreaterEqual),
            _ => None,
        }
    }
}
