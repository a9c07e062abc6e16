//! Code generation error types.
//!
//! Errors that can occur while emitting Rapcode, diagrams or JSON. Most
//! problems are caught by the parser; what is left are trees that came from
//! elsewhere (a JSON file, a flowchart) and hold something the target cannot
//! express.

use crate::ast::Span;
use crate::cfg::CfgError;
use std::fmt;

/// An error that occurred during code generation.
#[derive(Debug, Clone)]
pub struct CodeGenError {
    /// The kind of error.
    pub kind: CodeGenErrorKind,
    /// Source location where the error occurred.
    pub span: Option<Span>,
    /// Additional context about the error.
    pub context: Option<String>,
}

impl CodeGenError {
    /// Creates a new code generation error.
    pub fn new(kind: CodeGenErrorKind) -> Self {
        Self {
            kind,
            span: None,
            context: None,
        }
    }

    /// Adds a source span to the error.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Adds context information to the error.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates an error for a literal the target has no spelling for.
    pub fn unrepresentable(literal: impl Into<String>) -> Self {
        Self::new(CodeGenErrorKind::UnrepresentableLiteral(literal.into()))
    }
}

impl From<CfgError> for CodeGenError {
    fn from(err: CfgError) -> Self {
        let span = err.span();
        Self::new(CodeGenErrorKind::Cfg(err)).with_span(span)
    }
}

impl fmt::Display for CodeGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code generation error: {}", self.kind)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({})", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for CodeGenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            CodeGenErrorKind::Cfg(err) => Some(err),
            _ => None,
        }
    }
}

/// The specific kind of code generation error.
#[derive(Debug, Clone)]
pub enum CodeGenErrorKind {
    /// The control-flow graph could not be built.
    Cfg(CfgError),

    /// A literal with no Rapcode spelling: a string containing a double
    /// quote or a line break, or a non-finite number.
    UnrepresentableLiteral(String),

    /// Serializing the AST failed.
    Serialization(String),
}

impl fmt::Display for CodeGenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeGenErrorKind::Cfg(err) => write!(f, "{}", err),
            CodeGenErrorKind::UnrepresentableLiteral(literal) => {
                write!(f, "literal {:?} cannot be written in Rapcode", literal)
            }
            CodeGenErrorKind::Serialization(msg) => {
                write!(f, "serialization failed: {}", msg)
            }
        }
    }
}
