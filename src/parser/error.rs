//! Parser error types.
//!
//! Parse errors capture what went wrong and where, enabling good error messages.
//! Lexical errors share this type: a Rapcode text either tokenizes and parses
//! or it fails with exactly one `ParseError`, the first problem found.

use crate::ast::Span;
use thiserror::Error;

/// A parse error with location and description.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Expected a specific token but found something else.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// What we expected to find.
        expected: String,
        /// What we actually found.
        found: String,
        /// Location of the unexpected token.
        span: Span,
    },

    /// Reached end of input unexpectedly.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// What we expected to find.
        expected: String,
    },

    /// Invalid expression.
    #[error("invalid expression: {message}")]
    InvalidExpression {
        /// Location of the invalid expression.
        span: Span,
        /// Additional context about what went wrong.
        message: String,
    },

    /// Invalid statement.
    #[error("invalid statement: {message}")]
    InvalidStatement {
        /// Location of the invalid statement.
        span: Span,
        /// Description of the problem.
        message: String,
    },

    /// Invalid number literal.
    #[error("invalid number: {message}")]
    InvalidNumber {
        /// Location of the invalid number.
        span: Span,
        /// Description of the problem.
        message: String,
    },

    /// Unterminated string literal.
    #[error("unterminated string literal")]
    UnterminatedString {
        /// Location where the string started.
        span: Span,
    },

    /// A character no token starts with.
    #[error("unexpected character '{found}'")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// Its location.
        span: Span,
    },

    /// Missing ENDIF for IF.
    #[error("missing ENDIF")]
    MissingEndIf {
        /// Location of the IF that's missing its ENDIF.
        if_span: Span,
    },

    /// Missing ENDLOOP for LOOP or WHILE.
    #[error("missing ENDLOOP")]
    MissingEndLoop {
        /// Location of the loop that's missing its ENDLOOP.
        loop_span: Span,
    },

    /// BREAK with no enclosing loop.
    #[error("BREAK outside of a loop")]
    BreakOutsideLoop {
        /// Location of the BREAK.
        span: Span,
    },

    /// Statements or expressions nested deeper than the parser allows.
    #[error("nesting exceeds {limit} levels")]
    NestingTooDeep {
        /// The nesting limit.
        limit: usize,
        /// Location of the first token past the limit.
        span: Span,
    },

    /// Tokens left over after a complete expression or assignment.
    #[error("unexpected {found} after end of {what}")]
    TrailingInput {
        /// What had been parsed.
        what: String,
        /// The first extra token.
        found: String,
        /// Location of the first extra token.
        span: Span,
    },
}

impl ParseError {
    /// Returns the span of this error, if available.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::UnexpectedToken { span, .. } => Some(*span),
            ParseError::UnexpectedEof { .. } => None,
            ParseError::InvalidExpression { span, .. } => Some(*span),
            ParseError::InvalidStatement { span, .. } => Some(*span),
            ParseError::InvalidNumber { span, .. } => Some(*span),
            ParseError::UnterminatedString { span } => Some(*span),
            ParseError::UnexpectedCharacter { span, .. } => Some(*span),
            ParseError::MissingEndIf { if_span } => Some(*if_span),
            ParseError::MissingEndLoop { loop_span } => Some(*loop_span),
            ParseError::BreakOutsideLoop { span } => Some(*span),
            ParseError::NestingTooDeep { span, .. } => Some(*span),
            ParseError::TrailingInput { span, .. } => Some(*span),
        }
    }

    /// Creates an "unexpected token" error.
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    /// Creates an "unexpected end of input" error.
    pub fn eof(expected: impl Into<String>) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
        }
    }

    /// Creates an invalid-statement error with a message.
    pub fn statement(message: impl Into<String>, span: Span) -> Self {
        ParseError::InvalidStatement {
            span,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_span() {
        let err = ParseError::unexpected("THEN", "ELSE", Span::new(10, 14));
        assert_eq!(err.span(), Some(Span::new(10, 14)));
        assert_eq!(err.to_string(), "expected THEN, found ELSE");
    }

    #[test]
    fn test_eof_error() {
        let err = ParseError::eof("expression");
        assert_eq!(err.span(), None);
        assert!(err.to_string().contains("end of input"));
    }

    #[test]
    fn test_missing_end_spans_point_at_opener() {
        let err = ParseError::MissingEndLoop {
            loop_span: Span::new(4, 8),
        };
        assert_eq!(err.span(), Some(Span::new(4, 8)));
        assert_eq!(err.to_string(), "missing ENDLOOP");
    }

    #[test]
    fn test_unexpected_character_message() {
        let err = ParseError::UnexpectedCharacter {
            found: '$',
            span: Span::new(0, 1),
        };
        assert_eq!(err.to_string(), "unexpected character '$'");
    }
}
