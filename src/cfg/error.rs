//! CFG construction errors.

use thiserror::Error;

use crate::ast::Span;

/// An error building a control-flow graph.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CfgError {
    /// A `BREAK` with no enclosing loop.
    #[error("BREAK outside of a loop")]
    BreakOutsideLoop {
        /// Location of the BREAK.
        span: Span,
    },
}

impl CfgError {
    /// Returns the span of this error.
    pub fn span(&self) -> Span {
        match self {
            CfgError::BreakOutsideLoop { span } => *span,
        }
    }
}
