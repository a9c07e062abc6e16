//! Flowchart front end.
//!
//! RAPTOR flowcharts are stored as XML. This module reads that XML into a
//! small tree model ([`Flowchart`]) and lowers the tree into the same
//! [`Program`](crate::ast::Program) the Rapcode parser produces.
//!
//! # Example
//!
//! ```
//! use rapcode::flowchart;
//!
//! let xml = r#"<Project xmlns:i="http://www.w3.org/2001/XMLSchema-instance">
//!   <Start>
//!     <_Successor i:type="a:Parallelogram">
//!       <_text_str>"Hello"</_text_str>
//!       <_is_input>false</_is_input>
//!     </_Successor>
//!   </Start>
//! </Project>"#;
//!
//! let lowered = flowchart::load(xml).unwrap();
//! assert_eq!(lowered.program.body.len(), 1);
//! assert!(lowered.warnings.is_empty());
//! ```
//!
//! # Module Structure
//!
//! - [`xml`] - RAPTOR XML reader
//! - [`lower`] - flowchart tree → AST
//! - [`error`] - flowchart error types

mod error;
pub mod lower;
pub mod xml;

pub use error::FlowchartError;
pub use lower::{LoweredProgram, LoweringWarning, lower};
pub use xml::read_flowchart;

/// A whole flowchart, rooted at its `Start` symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Flowchart {
    /// The `Start` oval; the program is its successor chain.
    pub start: FlowNode,
}

/// One flowchart symbol and the chain that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    /// What kind of symbol this is.
    pub kind: FlowKind,
    /// The symbol's text: an assignment, an expression, a condition or a
    /// variable name, depending on the kind.
    pub text: String,
    /// Byte offset of `text` in the XML document (0 when absent).
    pub offset: usize,
    /// The next symbol in the same chain.
    pub successor: Option<Box<FlowNode>>,
}

impl FlowNode {
    /// Creates a symbol with no successor.
    pub fn new(kind: FlowKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
            successor: None,
        }
    }
}

/// Flowchart symbol kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowKind {
    /// Start and end terminals.
    Oval,
    /// Assignment box: `x := expr`.
    Rectangle,
    /// Input (`text` names the variable) or output (`text` is an expression).
    Parallelogram {
        is_input: bool,
        prompt: Option<Prompt>,
    },
    /// Two-way selection; `text` is the condition.
    Decision {
        /// Chain taken when the condition holds.
        yes: Option<Box<FlowNode>>,
        /// Chain taken otherwise.
        no: Option<Box<FlowNode>>,
    },
    /// Exit-tested loop; `text` is the exit condition, tested between
    /// `before` and `after`.
    Loop {
        before: Option<Box<FlowNode>>,
        after: Option<Box<FlowNode>>,
    },
    /// A symbol the lowering does not support, by its XML type name.
    Unknown(String),
}

/// The prompt of an input symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub text: String,
    /// Byte offset of `text` in the XML document.
    pub offset: usize,
}

/// Reads and lowers a RAPTOR XML document in one step.
pub fn load(xml: &str) -> Result<LoweredProgram, FlowchartError> {
    let chart = read_flowchart(xml)?;
    lower(&chart)
}
