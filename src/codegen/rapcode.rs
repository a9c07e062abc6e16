//! Rapcode text backend.
//!
//! Prints a [`Program`] back as Rapcode source. Loops with a `TRUE` test come
//! out as `LOOP ... ENDLOOP`, every other loop as `WHILE test DO ... ENDLOOP`.
//! Expressions use [`Expr`]'s `Display`, which inserts only the parentheses
//! the tree needs, so parsing the output gives back the same tree.
//!
//! # Example
//!
//! ```
//! use rapcode::codegen::{CodeGenerator, RapcodeBackend};
//! use rapcode::parser::parse_program;
//!
//! let program = parse_program("IF x > 0 THEN OUTPUT \"pos\" ELSE OUTPUT \"neg\" ENDIF").unwrap();
//! let output = RapcodeBackend::new().with_indent(4).generate(&program).unwrap();
//!
//! assert_eq!(
//!     output.code,
//!     "IF x > 0 THEN\n    OUTPUT \"pos\"\nELSE\n    OUTPUT \"neg\"\nENDIF\n"
//! );
//! ```

use crate::ast::{Expr, ExprKind, Program, Statement, StatementKind, Value};

use super::{CodeGenError, CodeGenerator, GeneratedOutput};

/// Backend that emits Rapcode source text.
#[derive(Debug, Clone)]
pub struct RapcodeBackend {
    /// Spaces per nesting level.
    indent: usize,
}

impl RapcodeBackend {
    /// Creates a backend with two-space indentation.
    pub fn new() -> Self {
        Self { indent: 2 }
    }

    /// Sets the number of spaces per nesting level.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

impl Default for RapcodeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for RapcodeBackend {
    fn generate(&self, program: &Program) -> Result<GeneratedOutput, CodeGenError> {
        let mut emitter = Emitter {
            unit: " ".repeat(self.indent),
            depth: 0,
            output: String::new(),
        };
        emitter.block(&program.body)?;
        log::debug!("emitted {} bytes of Rapcode", emitter.output.len());
        Ok(GeneratedOutput::rapcode(emitter.output))
    }

    fn backend_name(&self) -> &str {
        "Rapcode"
    }
}

/// Statement emission state.
struct Emitter {
    unit: String,
    depth: usize,
    output: String,
}

impl Emitter {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.output.push_str(&self.unit);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn block(&mut self, statements: &[Statement]) -> Result<(), CodeGenError> {
        statements.iter().try_for_each(|stmt| self.statement(stmt))
    }

    fn nested(&mut self, statements: &[Statement]) -> Result<(), CodeGenError> {
        self.depth += 1;
        let result = self.block(statements);
        self.depth -= 1;
        result
    }

    fn statement(&mut self, stmt: &Statement) -> Result<(), CodeGenError> {
        match &stmt.kind {
            StatementKind::Assignment { target, value } => {
                let value = expression(value)?;
                self.line(&format!("{} := {}", target, value));
            }

            StatementKind::Output { value } => {
                let value = expression(value)?;
                self.line(&format!("OUTPUT {}", value));
            }

            StatementKind::If {
                test,
                consequent,
                alternate,
            } => {
                let test = expression(test)?;
                self.line(&format!("IF {} THEN", test));
                self.nested(consequent)?;
                if let Some(alternate) = alternate
                    && !alternate.is_empty()
                {
                    self.line("ELSE");
                    self.nested(alternate)?;
                }
                self.line("ENDIF");
            }

            StatementKind::While { test, body } => {
                if test.is_literal_true() {
                    self.line("LOOP");
                } else {
                    let test = expression(test)?;
                    self.line(&format!("WHILE {} DO", test));
                }
                self.nested(body)?;
                self.line("ENDLOOP");
            }

            StatementKind::Break => self.line("BREAK"),
        }
        Ok(())
    }
}

/// Renders an expression after checking that every literal in it can be
/// spelled in Rapcode.
fn expression(expr: &Expr) -> Result<String, CodeGenError> {
    check_literals(expr)?;
    Ok(expr.to_string())
}

fn check_literals(expr: &Expr) -> Result<(), CodeGenError> {
    match &expr.kind {
        ExprKind::Literal {
            value: Value::String(s),
        } if s.contains(['"', '\n', '\r']) => {
            Err(CodeGenError::unrepresentable(s.as_str()).with_span(expr.span))
        }
        ExprKind::Literal {
            value: Value::Number(n),
        } if !n.is_finite() => {
            Err(CodeGenError::unrepresentable(n.to_string()).with_span(expr.span))
        }
        ExprKind::Literal { .. } | ExprKind::Identifier { .. } => Ok(()),
        ExprKind::Binary { left, right, .. } => {
            check_literals(left)?;
            check_literals(right)
        }
        ExprKind::Unary { operand, .. } => check_literals(operand),
        ExprKind::Input { prompt } => check_literals(prompt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::codegen::CodeGenErrorKind;
    use crate::parser::parse_program;

    fn emit(source: &str) -> String {
        let program = parse_program(source).unwrap();
        RapcodeBackend::new().generate(&program).unwrap().code
    }

    #[test]
    fn test_emit_straight_line() {
        assert_eq!(
            emit("SET x := 0 OUTPUT \"x = \" + x"),
            "x := 0\nOUTPUT \"x = \" + x\n"
        );
    }

    #[test]
    fn test_emit_loop_forms() {
        assert_eq!(
            emit("LOOP x := x + 1 IF x >= 3 THEN BREAK ENDIF ENDLOOP"),
            "LOOP\n  x := x + 1\n  IF x >= 3 THEN\n    BREAK\n  ENDIF\nENDLOOP\n"
        );
        assert_eq!(
            emit("WHILE n > 0 DO n := n - 1 ENDLOOP"),
            "WHILE n > 0 DO\n  n := n - 1\nENDLOOP\n"
        );
    }

    #[test]
    fn test_emit_input_and_parentheses() {
        assert_eq!(
            emit("n := INPUT(\"Enter n\") OUTPUT (n + 1) * 2"),
            "n := INPUT(\"Enter n\")\nOUTPUT (n + 1) * 2\n"
        );
    }

    #[test]
    fn test_emit_empty_else_omitted() {
        let program = Program::new(vec![Statement::new(
            StatementKind::If {
                test: Expr::literal(true, Span::default()),
                consequent: vec![],
                alternate: Some(vec![]),
            },
            Span::default(),
        )]);
        let code = RapcodeBackend::new().generate(&program).unwrap().code;
        assert_eq!(code, "IF TRUE THEN\nENDIF\n");
    }

    #[test]
    fn test_quote_in_string_is_rejected() {
        let program = Program::new(vec![Statement::new(
            StatementKind::Output {
                value: Expr::literal("say \"hi\"", Span::new(7, 17)),
            },
            Span::new(0, 17),
        )]);
        let err = RapcodeBackend::new().generate(&program).unwrap_err();
        assert!(matches!(err.kind, CodeGenErrorKind::UnrepresentableLiteral(_)));
        assert_eq!(err.span, Some(Span::new(7, 17)));
    }

    #[test]
    fn test_infinite_number_is_rejected() {
        let program = Program::new(vec![Statement::new(
            StatementKind::Assignment {
                target: "x".to_string(),
                value: Expr::literal(f64::INFINITY, Span::default()),
            },
            Span::default(),
        )]);
        assert!(RapcodeBackend::new().generate(&program).is_err());
    }

    #[test]
    fn test_emit_round_trips() {
        let source = "SET total := 0\n\
                      WHILE NOT (total >= 10) DO\n\
                      total := total + 2 * (3 - 1) % 4\n\
                      IF total == 4 THEN OUTPUT total ELSE OUTPUT -total ENDIF\n\
                      ENDLOOP";
        let first = parse_program(source).unwrap();
        let second = parse_program(&emit(source)).unwrap();
        assert!(first.same_structure(&second));
    }
}
