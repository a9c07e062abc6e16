//! Flowchart error types.

use thiserror::Error;

use crate::parser::ParseError;

/// An error reading or lowering a flowchart.
#[derive(Debug, Error)]
pub enum FlowchartError {
    /// The document is not well-formed XML.
    #[error("malformed flowchart XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document has no `Start` symbol.
    #[error("flowchart has no Start symbol")]
    MissingStart,

    /// A symbol's text is not valid Rapcode.
    #[error("invalid {context}: {source}")]
    Syntax {
        /// Which kind of text was being parsed.
        context: &'static str,
        /// The underlying parse error; its span points into the document.
        source: ParseError,
    },

    /// An input symbol whose target is not a plain variable name.
    #[error("input target '{text}' is not a variable name")]
    InvalidInputTarget {
        /// The symbol's text.
        text: String,
        /// Byte offset of the text in the document.
        offset: usize,
    },

    /// Decisions and loops nested deeper than the reader allows.
    #[error("flowchart nesting exceeds {limit} levels")]
    NestingTooDeep {
        /// The nesting limit.
        limit: usize,
        /// Byte offset of the symbol that went past it.
        offset: usize,
    },
}

impl FlowchartError {
    /// Byte offset in the document the error refers to, when known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            FlowchartError::Xml(_) | FlowchartError::MissingStart => None,
            FlowchartError::Syntax { source, .. } => source.span().map(|s| s.start),
            FlowchartError::InvalidInputTarget { offset, .. }
            | FlowchartError::NestingTooDeep { offset, .. } => Some(*offset),
        }
    }

    pub(crate) fn syntax(context: &'static str) -> impl FnOnce(ParseError) -> FlowchartError {
        move |source| FlowchartError::Syntax { context, source }
    }
}
