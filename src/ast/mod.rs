//! Abstract Syntax Tree (AST) definitions for Rapcode.
//!
//! The AST is the one intermediate representation shared by every stage of
//! the pipeline. Both front ends (the Rapcode text parser and the flowchart
//! lowering) produce it, and every back end (interpreter, CFG builder,
//! emitters) consumes it.
//!
//! # Structure
//!
//! ```text
//! Program
//! └── body: Vec<Statement>
//!     ├── Assignment { target, value: Expr }
//!     ├── Output { value: Expr }
//!     ├── If { test: Expr, consequent, alternate }
//!     ├── While { test: Expr, body }
//!     └── Break
//! ```
//!
//! # Design Decisions
//!
//! - **Owned nodes**: AST nodes own their children (no lifetimes), so the AST
//!   outlives the source text and can be handed between stages freely.
//! - **Span on every node**: every node tracks the byte range it came from.
//!   Synthesized nodes (the `Break` of a lowered flowchart loop, for instance)
//!   carry the span of the construct that produced them.
//! - **One loop form**: pre-test, post-test and infinite loops are all
//!   normalized to `While`, with an explicit `Break` inside an `If` when the
//!   source loop is exit-tested.
//! - **Interchange**: every node serializes to a JSON object with a `type`
//!   discriminator, so other tools can produce or consume the AST.

mod expr;
mod stmt;
mod value;

pub use expr::*;
pub use stmt::*;
pub use value::Value;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A span representing a range in the source text.
///
/// Spans are byte offsets from the start of the source, matching the lexer's spans.
///
/// # Example
///
/// ```
/// use rapcode::ast::Span;
///
/// let span = Span::new(0, 5);
/// assert_eq!(span.start, 0);
/// assert_eq!(span.end, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the start of the span (inclusive).
    pub start: usize,
    /// Byte offset of the end of the span (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span from start to end byte offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a span that covers both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

/// A 1-based line/column position in a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number in characters, starting at 1.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Maps byte offsets in a source document to line/column positions.
///
/// # Example
///
/// ```
/// use rapcode::ast::{LineIndex, Position};
///
/// let index = LineIndex::new("x := 1\nOUTPUT x");
/// assert_eq!(index.position(7), Position { line: 2, column: 1 });
/// ```
#[derive(Debug, Clone)]
pub struct LineIndex {
    text: String,
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Builds the index for `source`.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            text: source.to_string(),
            line_starts,
        }
    }

    /// Returns the position of a byte offset. Offsets past the end clamp to
    /// the end of the document.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self
            .text
            .get(line_start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(offset - line_start);
        Position {
            line: line + 1,
            column: column + 1,
        }
    }
}

/// A complete Rapcode program.
///
/// A program is a flat sequence of statements executed in order; Rapcode has
/// no declarations and no nested scopes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Program")]
pub struct Program {
    /// The statements that make up the program.
    pub body: Vec<Statement>,
}

impl Program {
    /// Creates a new program with the given statements.
    pub fn new(body: Vec<Statement>) -> Self {
        Self { body }
    }

    /// Returns a copy of this program with every span reset.
    ///
    /// Two programs built from different sources (or different front ends)
    /// are structurally equal when their span-free copies compare equal.
    pub fn without_spans(&self) -> Program {
        Program::new(self.body.iter().map(Statement::without_spans).collect())
    }

    /// Compares node kinds, operators, names, literals and nesting, ignoring
    /// source positions.
    pub fn same_structure(&self, other: &Program) -> bool {
        self.without_spans() == other.without_spans()
    }

    /// Reads a program from its JSON interchange form. Spans are optional.
    pub fn from_json(text: &str) -> Result<Program, serde_json::Error> {
        serde_json::from_str(text)
    }
}
