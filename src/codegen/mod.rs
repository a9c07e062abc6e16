//! Code generation module for Rapcode.
//!
//! This module turns a [`Program`] into text: Rapcode source, a Mermaid or
//! Graphviz flowchart, or the JSON form of the AST. The architecture uses a
//! trait-based backend system, so every target is driven the same way.
//!
//! # Architecture
//!
//! ```text
//! Program ──→ CodeGenerator ──→ GeneratedOutput
//!                   ↑
//!     RapcodeBackend / MermaidBackend / DotBackend / JsonBackend
//! ```
//!
//! The diagram backends go through [`cfg::build`](crate::cfg::build) first.
//!
//! # Example
//!
//! ```
//! use rapcode::codegen::{CodeGenerator, RapcodeBackend};
//! use rapcode::parser::parse_program;
//!
//! let program = parse_program("LOOP BREAK ENDLOOP").unwrap();
//! let output = RapcodeBackend::new().generate(&program).unwrap();
//!
//! assert_eq!(output.code, "LOOP\n  BREAK\nENDLOOP\n");
//! assert_eq!(output.extension, "rapcode");
//! ```

mod dot;
mod error;
mod json;
mod mermaid;
mod rapcode;

pub use dot::DotBackend;
pub use error::{CodeGenError, CodeGenErrorKind};
pub use json::JsonBackend;
pub use mermaid::{Direction, MermaidBackend};
pub use rapcode::RapcodeBackend;

use crate::ast::Program;

/// Output from code generation.
#[derive(Debug)]
pub struct GeneratedOutput {
    /// The generated text.
    pub code: String,

    /// Human-readable description of the output format.
    pub format: String,

    /// Suggested file extension for the output.
    pub extension: String,
}

impl GeneratedOutput {
    fn new(code: String, format: &str, extension: &str) -> Self {
        Self {
            code,
            format: format.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Output holding Rapcode source.
    pub fn rapcode(code: String) -> Self {
        Self::new(code, "Rapcode", "rapcode")
    }

    /// Output holding a Mermaid flowchart.
    pub fn mermaid(code: String) -> Self {
        Self::new(code, "Mermaid", "mmd")
    }

    /// Output holding a Graphviz DOT graph.
    pub fn dot(code: String) -> Self {
        Self::new(code, "Graphviz DOT", "dot")
    }

    /// Output holding the JSON form of the AST.
    pub fn json(code: String) -> Self {
        Self::new(code, "JSON AST", "json")
    }
}

/// Trait for code generation backends.
///
/// Adding a target means adding an implementation; the pipeline and the CLI
/// only ever see this trait.
pub trait CodeGenerator {
    /// Generates output for a program.
    ///
    /// # Returns
    ///
    /// * `Ok(GeneratedOutput)` - Successfully generated output
    /// * `Err(CodeGenError)` - The program cannot be expressed in this target
    fn generate(&self, program: &Program) -> Result<GeneratedOutput, CodeGenError>;

    /// Returns the name of this backend for diagnostics.
    fn backend_name(&self) -> &str;
}

/// Makes a diagram label safe to emit: an empty label becomes a single
/// space, which both Mermaid and DOT draw as nothing.
fn display_label(label: &str) -> &str {
    if label.is_empty() { " " } else { label }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_output_kinds() {
        let output = GeneratedOutput::mermaid("graph TD;\n".to_string());
        assert_eq!(output.format, "Mermaid");
        assert_eq!(output.extension, "mmd");
        assert_eq!(GeneratedOutput::dot(String::new()).extension, "dot");
        assert_eq!(GeneratedOutput::json(String::new()).extension, "json");
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(RapcodeBackend::new().backend_name(), "Rapcode");
        assert_eq!(MermaidBackend::new().backend_name(), "Mermaid");
        assert_eq!(DotBackend::new().backend_name(), "DOT");
        assert_eq!(JsonBackend::new().backend_name(), "JSON");
    }

    #[test]
    fn test_backends_as_trait_objects() {
        let program = Program::default();
        let backends: Vec<Box<dyn CodeGenerator>> = vec![
            Box::new(RapcodeBackend::new()),
            Box::new(MermaidBackend::new()),
            Box::new(DotBackend::new()),
            Box::new(JsonBackend::new()),
        ];
        for backend in backends {
            assert!(backend.generate(&program).is_ok(), "{}", backend.backend_name());
        }
    }
}
