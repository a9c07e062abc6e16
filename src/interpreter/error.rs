//! Runtime error types.
//!
//! Every runtime error is fatal: execution halts at the first one. Errors
//! carry the span of the node that failed and, when the interpreter was
//! given the program text, its line and column.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::ast::{Position, Span};

/// A runtime error with its location.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct RuntimeError {
    /// What went wrong.
    pub kind: RuntimeErrorKind,
    /// The node being executed.
    pub span: Span,
    /// Line/column of `span.start`, when the source text is known.
    pub position: Option<Position>,
}

impl RuntimeError {
    /// The broad class of this error.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

/// The kinds of runtime error.
#[derive(Debug, Error)]
pub enum RuntimeErrorKind {
    /// An operator applied to values of the wrong kind.
    #[error("type mismatch: {message}")]
    TypeMismatch { message: String },

    /// `/` or `%` with a zero right operand.
    #[error("division by zero: '{divisor}' evaluated to 0")]
    DivisionByZero {
        /// Text of the right operand's expression.
        divisor: String,
    },

    /// A variable read before any assignment to it.
    #[error("variable '{name}' is used before it is assigned")]
    UndefinedVariable { name: String },

    /// A `BREAK` that reached the top level.
    #[error("BREAK outside of a loop")]
    BreakOutsideLoop,

    /// Reading input or writing output failed, including end of input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RuntimeErrorKind {
    /// The broad class of this error kind.
    pub fn category(&self) -> ErrorCategory {
        match self {
            RuntimeErrorKind::TypeMismatch { .. } => ErrorCategory::Type,
            RuntimeErrorKind::DivisionByZero { .. } => ErrorCategory::Value,
            RuntimeErrorKind::UndefinedVariable { .. } => ErrorCategory::Name,
            RuntimeErrorKind::BreakOutsideLoop => ErrorCategory::Structural,
            RuntimeErrorKind::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Broad error classes, as reported to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Type,
    Value,
    Name,
    Structural,
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Type => "type error",
            ErrorCategory::Value => "value error",
            ErrorCategory::Name => "name error",
            ErrorCategory::Structural => "structural error",
            ErrorCategory::Io => "I/O error",
        };
        write!(f, "{}", name)
    }
}
