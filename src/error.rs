//! Crate-level error type.
//!
//! Each pipeline stage has its own error; [`Error`] wraps them all so a
//! caller driving the whole pipeline (the CLI, for one) can use `?` across
//! stages and still report where in the input things went wrong.
//!
//! Control-flow graph errors only arise while drawing a diagram, so they
//! arrive wrapped in a [`CodeGenError`].

use thiserror::Error;

use crate::ast::Span;
use crate::codegen::CodeGenError;
use crate::flowchart::FlowchartError;
use crate::interpreter::RuntimeError;
use crate::parser::ParseError;

/// Any error the Rapcode pipeline can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Rapcode source failed to lex or parse.
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    /// A flowchart could not be read or lowered.
    #[error("flowchart error: {0}")]
    Flowchart(#[from] FlowchartError),

    /// A JSON AST document could not be read.
    #[error("invalid AST document: {0}")]
    Json(#[from] serde_json::Error),

    /// Execution failed.
    #[error("{category}: {0}", category = .0.category())]
    Runtime(#[from] RuntimeError),

    /// An emitter could not express the program.
    #[error("{0}")]
    CodeGen(#[from] CodeGenError),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Byte offset in the input document the error points at, when known.
    ///
    /// Programs read from JSON carry default spans, which point nowhere.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Parse(err) => err.span().map(|s| s.start),
            Error::Flowchart(err) => err.offset(),
            Error::Runtime(err) => located(err.span),
            Error::CodeGen(err) => err.span.and_then(located),
            Error::Json(_) | Error::Io(_) => None,
        }
    }
}

fn located(span: Span) -> Option<usize> {
    (span != Span::default()).then_some(span.start)
}

/// Convenience alias for results using the crate error.
pub type Result<T> = std::result::Result<T, Error>;
