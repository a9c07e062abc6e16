//! # Rapcode
//!
//! A translator and interpreter for RAPTOR-style flowcharts and Rapcode, the
//! structured text language they correspond to.
//!
//! ## Architecture
//!
//! Two front ends feed one AST, and every back end reads that AST:
//!
//! ```text
//! .rapcode → Lexer → Parser ─────┐
//!                                ├→ AST ─┬→ Interpreter
//! .rap → XML reader → Lowering ──┘       ├→ Rapcode / JSON emitters
//!                                        └→ CFG → Mermaid / DOT emitters
//! ```
//!
//! Each phase is implemented as a separate module:
//!
//! - [`lexer`] - Tokenizes Rapcode text
//! - [`parser`] - Builds the AST from tokens
//! - [`ast`] - AST type definitions and runtime values
//! - [`flowchart`] - Reads flowchart XML and lowers it into the AST
//! - [`interpreter`] - Executes a program
//! - [`cfg`] - Derives the control-flow graph drawn by the diagram emitters
//! - [`codegen`] - Output backends
//! - [`source`] - Loads a program from any supported input format
//!
//! ## Example
//!
//! ```
//! use rapcode::interpreter::{Interpreter, ScriptedConsole};
//! use rapcode::parser::parse_program;
//!
//! let source = r#"
//!     SET x := 0
//!     LOOP
//!         x := x + 1
//!         IF x >= 3 THEN BREAK ENDIF
//!     ENDLOOP
//!     OUTPUT x
//! "#;
//!
//! let program = parse_program(source).expect("parse error");
//! let mut interpreter = Interpreter::with_console(ScriptedConsole::default());
//! interpreter.run(&program).expect("runtime error");
//!
//! assert_eq!(interpreter.console().output(), ["3"]);
//! ```

pub mod ast;
pub mod cfg;
pub mod codegen;
pub mod error;
pub mod flowchart;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod source;

pub use error::{Error, Result};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::ast::{Expr, ExprKind, Program, Span, Statement, StatementKind, Value};
    pub use crate::codegen::{
        CodeGenError, CodeGenerator, DotBackend, GeneratedOutput, JsonBackend, MermaidBackend,
        RapcodeBackend,
    };
    pub use crate::flowchart::{FlowchartError, LoweredProgram};
    pub use crate::interpreter::{Console, Interpreter, RuntimeError};
    pub use crate::lexer::{Lexer, Token, TokenKind};
    pub use crate::parser::{ParseError, Parser, parse_program};
    pub use crate::source::SourceKind;
}
