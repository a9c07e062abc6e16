//! Tree-walking interpreter for Rapcode programs.
//!
//! The interpreter executes a [`Program`] directly, depth first, against a
//! single variable store. Statements report how they finished through
//! [`Flow`]: a `BREAK` travels outward as [`Flow::Broke`] until the nearest
//! enclosing loop consumes it.
//!
//! # Example
//!
//! ```
//! use rapcode::interpreter::{Interpreter, ScriptedConsole};
//! use rapcode::parser::parse_program;
//!
//! let program = parse_program("x := 6 * 7 OUTPUT x").unwrap();
//! let mut interpreter = Interpreter::with_console(ScriptedConsole::default());
//! interpreter.run(&program).unwrap();
//!
//! assert_eq!(interpreter.console().output(), ["42"]);
//! ```
//!
//! # Module Structure
//!
//! - [`expressions`] - expression evaluation and the operator rules
//! - [`statements`] - statement execution and loops
//! - [`console`] - the I/O seam
//! - [`error`] - runtime error types

mod console;
mod error;
mod expressions;
mod statements;

pub use console::{Console, ScriptedConsole, StdConsole};
pub use error::{ErrorCategory, RuntimeError, RuntimeErrorKind};

use std::collections::HashMap;

use crate::ast::{Expr, LineIndex, Program, Span, Value};

/// How a statement finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Ran to the end; continue with the next statement.
    Completed,
    /// Hit a `BREAK` at this span; unwind to the innermost loop.
    Broke(Span),
}

/// The variable store: a flat, program-wide map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    vars: HashMap<String, Value>,
}

impl Environment {
    /// Looks up a variable.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Creates or overwrites a variable.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Number of variables assigned so far.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true if nothing has been assigned.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates over all variables, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A Rapcode interpreter.
pub struct Interpreter<C: Console = StdConsole> {
    env: Environment,
    console: C,
    lines: Option<LineIndex>,
}

impl Interpreter<StdConsole> {
    /// Creates an interpreter on standard input and output.
    pub fn new() -> Self {
        Self::with_console(StdConsole)
    }
}

impl Default for Interpreter<StdConsole> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Console> Interpreter<C> {
    /// Creates an interpreter on the given console.
    pub fn with_console(console: C) -> Self {
        Self {
            env: Environment::default(),
            console,
            lines: None,
        }
    }

    /// Supplies the program's source text so errors carry line/column.
    pub fn with_source(mut self, source: &str) -> Self {
        self.lines = Some(LineIndex::new(source));
        self
    }

    /// Runs a whole program in a fresh environment.
    ///
    /// Variables set by an earlier run are gone; [`environment`] shows the
    /// store as the last run left it.
    ///
    /// [`environment`]: Interpreter::environment
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        log::debug!("running program with {} statements", program.body.len());
        self.env = Environment::default();

        match self.execute_block(&program.body)? {
            Flow::Completed => Ok(()),
            Flow::Broke(span) => Err(self.error(RuntimeErrorKind::BreakOutsideLoop, span)),
        }
    }

    /// Evaluates one expression against the current variables.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        self.eval(expr)
    }

    /// The variables as they stand after the last run or evaluation.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// The console in use.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Consumes the interpreter, returning its console.
    pub fn into_console(self) -> C {
        self.console
    }

    /// Builds a runtime error at `span`.
    ///
    /// Nodes read from JSON carry the default span, which has no position.
    pub(crate) fn error(&self, kind: RuntimeErrorKind, span: Span) -> RuntimeError {
        let position = match &self.lines {
            Some(lines) if span != Span::default() => Some(lines.position(span.start)),
            _ => None,
        };
        RuntimeError {
            kind,
            span,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Position, Statement, StatementKind};
    use crate::parser::parse_program;

    fn run(source: &str, input: &[&str]) -> Result<Vec<String>, RuntimeError> {
        let program = parse_program(source).unwrap();
        let mut interpreter =
            Interpreter::with_console(ScriptedConsole::new(input.iter().copied())).with_source(source);
        interpreter.run(&program)?;
        Ok(interpreter.into_console().output().to_vec())
    }

    #[test]
    fn test_counting_loop() {
        let out = run(
            "SET x := 0\nLOOP\n  x := x + 1\n  IF x >= 3 THEN\n    BREAK\n  ENDIF\nENDLOOP\nOUTPUT x",
            &[],
        )
        .unwrap();
        assert_eq!(out, ["3"]);
    }

    #[test]
    fn test_environment_after_run() {
        let program = parse_program("a := 1 b := \"two\"").unwrap();
        let mut interpreter = Interpreter::with_console(ScriptedConsole::default());
        interpreter.run(&program).unwrap();

        let env = interpreter.environment();
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(env.get("b"), Some(&Value::String("two".into())));
    }

    #[test]
    fn test_each_run_starts_empty() {
        let mut interpreter = Interpreter::with_console(ScriptedConsole::default());
        interpreter.run(&parse_program("x := 1").unwrap()).unwrap();
        assert_eq!(interpreter.environment().get("x"), Some(&Value::Number(1.0)));

        let err = interpreter
            .run(&parse_program("OUTPUT x").unwrap())
            .unwrap_err();
        assert!(matches!(err.kind, RuntimeErrorKind::UndefinedVariable { .. }));
        assert!(interpreter.environment().get("x").is_none());
    }

    #[test]
    fn test_spanless_error_has_no_position() {
        let program = Program::from_json(
            r#"{ "type": "Program", "body": [
                { "type": "Output", "value": { "type": "Identifier", "name": "y" } }
            ] }"#,
        )
        .unwrap();
        let mut interpreter =
            Interpreter::with_console(ScriptedConsole::default()).with_source("OUTPUT y");
        let err = interpreter.run(&program).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Name);
        assert_eq!(err.position, None);
    }

    #[test]
    fn test_error_position() {
        let err = run("x := 1\nOUTPUT y", &[]).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Name);
        assert_eq!(err.position, Some(Position { line: 2, column: 8 }));
    }

    #[test]
    fn test_break_reaching_top_level() {
        // Only a hand-built (or deserialized) tree can do this; the parser
        // rejects it.
        let program = Program::new(vec![Statement::new(StatementKind::Break, Span::new(0, 5))]);
        let mut interpreter = Interpreter::with_console(ScriptedConsole::default());
        let err = interpreter.run(&program).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Structural);
    }
}
