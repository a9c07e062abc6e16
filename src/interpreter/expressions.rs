//! Expression evaluation.
//!
//! # Operator rules
//!
//! - `+` adds numbers; if either side is a string, both sides are shown as
//!   text and concatenated.
//! - `-`, `*`, `/`, `%` and the relational operators need numbers.
//! - `/` and `%` fail on a zero divisor. `%` is floored: the result takes the
//!   divisor's sign.
//! - `==` and `!=` compare structurally; values of different kinds are never
//!   equal.
//! - `NOT` negates truthiness; unary `-` needs a number.

use std::io;

use crate::ast::{BinaryOp, Expr, ExprKind, Span, UnaryOp, Value};

use super::{Console, Interpreter, RuntimeError, RuntimeErrorKind};

impl<C: Console> Interpreter<C> {
    /// Evaluates an expression.
    pub(super) fn eval(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match &expr.kind {
            ExprKind::Literal { value } => Ok(value.clone()),

            ExprKind::Identifier { name } => self.env.get(name).cloned().ok_or_else(|| {
                self.error(
                    RuntimeErrorKind::UndefinedVariable { name: name.clone() },
                    expr.span,
                )
            }),

            ExprKind::Binary {
                operator,
                left,
                right,
            } => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                self.binary(*operator, lhs, rhs, right, expr.span)
            }

            ExprKind::Unary { operator, operand } => {
                let value = self.eval(operand)?;
                match operator {
                    UnaryOp::Not => Ok(Value::Boolean(!value.is_truthy())),
                    UnaryOp::Negate => match value {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        other => Err(self.type_mismatch(
                            format!("cannot negate a {}", other.type_name()),
                            expr.span,
                        )),
                    },
                }
            }

            ExprKind::Input { prompt } => {
                let prompt = self.eval(prompt)?.to_string();
                let line = self
                    .console
                    .read_line(&prompt)
                    .map_err(|e| self.error(RuntimeErrorKind::Io(e), expr.span))?;

                match line {
                    Some(line) => Ok(Value::from_input(&line)),
                    None => Err(self.error(
                        RuntimeErrorKind::Io(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "end of input while waiting for INPUT",
                        )),
                        expr.span,
                    )),
                }
            }
        }
    }

    /// Applies a binary operator to evaluated operands.
    fn binary(
        &self,
        op: BinaryOp,
        lhs: Value,
        rhs: Value,
        divisor: &Expr,
        span: Span,
    ) -> Result<Value, RuntimeError> {
        match op {
            BinaryOp::Add => match (&lhs, &rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(_), _) | (_, Value::String(_)) => {
                    Ok(Value::String(format!("{}{}", lhs, rhs)))
                }
                _ => Err(self.type_mismatch(
                    format!("cannot add {} and {}", lhs.type_name(), rhs.type_name()),
                    span,
                )),
            },

            BinaryOp::Equal => Ok(Value::Boolean(lhs == rhs)),
            BinaryOp::NotEqual => Ok(Value::Boolean(lhs != rhs)),

            BinaryOp::Subtract => {
                let (a, b) = self.numbers(op, &lhs, &rhs, span)?;
                Ok(Value::Number(a - b))
            }
            BinaryOp::Multiply => {
                let (a, b) = self.numbers(op, &lhs, &rhs, span)?;
                Ok(Value::Number(a * b))
            }
            BinaryOp::Divide | BinaryOp::Modulo => {
                let (a, b) = self.numbers(op, &lhs, &rhs, span)?;
                if b == 0.0 {
                    return Err(self.error(
                        RuntimeErrorKind::DivisionByZero {
                            divisor: divisor.to_string(),
                        },
                        span,
                    ));
                }
                if op == BinaryOp::Divide {
                    Ok(Value::Number(a / b))
                } else {
                    Ok(Value::Number(a - b * (a / b).floor()))
                }
            }

            BinaryOp::LessThan => {
                let (a, b) = self.numbers(op, &lhs, &rhs, span)?;
                Ok(Value::Boolean(a < b))
            }
            BinaryOp::LessEqual => {
                let (a, b) = self.numbers(op, &lhs, &rhs, span)?;
                Ok(Value::Boolean(a <= b))
            }
            BinaryOp::GreaterThan => {
                let (a, b) = self.numbers(op, &lhs, &rhs, span)?;
                Ok(Value::Boolean(a > b))
            }
            BinaryOp::GreaterEqual => {
                let (a, b) = self.numbers(op, &lhs, &rhs, span)?;
                Ok(Value::Boolean(a >= b))
            }
        }
    }

    /// Both operands as numbers, or a type mismatch naming the operator.
    fn numbers(
        &self,
        op: BinaryOp,
        lhs: &Value,
        rhs: &Value,
        span: Span,
    ) -> Result<(f64, f64), RuntimeError> {
        match (lhs.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(self.type_mismatch(
                format!(
                    "'{}' needs numbers, found {} and {}",
                    op.as_str(),
                    lhs.type_name(),
                    rhs.type_name()
                ),
                span,
            )),
        }
    }

    fn type_mismatch(&self, message: String, span: Span) -> RuntimeError {
        self.error(RuntimeErrorKind::TypeMismatch { message }, span)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Value;
    use crate::interpreter::{ErrorCategory, Interpreter, RuntimeError, ScriptedConsole};
    use crate::parser::parse_expression_text;

    fn eval(text: &str) -> Result<Value, RuntimeError> {
        let expr = parse_expression_text(text, 0).unwrap();
        Interpreter::with_console(ScriptedConsole::default()).evaluate(&expr)
    }

    fn num(text: &str) -> f64 {
        match eval(text).unwrap() {
            Value::Number(n) => n,
            other => panic!("expected number, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(num("2 + 3 * 4"), 14.0);
        assert_eq!(num("(2 + 3) * 4"), 20.0);
        assert_eq!(num("10 - 4 - 3"), 3.0);
        assert_eq!(num("-2 * 3"), -6.0);
    }

    #[test]
    fn test_floored_modulo() {
        assert_eq!(num("7 % 3"), 1.0);
        assert_eq!(num("-7 % 3"), 2.0);
        assert_eq!(num("7 % -3"), -2.0);
        assert_eq!(num("7.5 % 2"), 1.5);
    }

    #[test]
    fn test_concatenation() {
        assert_eq!(eval("\"n = \" + 3").unwrap(), Value::String("n = 3".into()));
        assert_eq!(eval("1.5 + \"!\"").unwrap(), Value::String("1.5!".into()));
        assert_eq!(eval("\"ok: \" + TRUE").unwrap(), Value::String("ok: TRUE".into()));
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(eval("1 == TRUE").unwrap(), Value::Boolean(false));
        assert_eq!(eval("\"1\" != 1").unwrap(), Value::Boolean(true));
        assert_eq!(eval("2 * 2 == 4").unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_not_uses_truthiness() {
        assert_eq!(eval("NOT 0").unwrap(), Value::Boolean(true));
        assert_eq!(eval("NOT \"text\"").unwrap(), Value::Boolean(false));
    }

    #[test]
    fn test_division_by_zero() {
        let err = eval("5 / 0").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Value);
        assert!(err.to_string().contains("'0'"));

        let err = eval("5 % (2 - 2)").unwrap_err();
        assert!(err.to_string().contains("'2 - 2'"));
    }

    #[test]
    fn test_type_errors() {
        assert_eq!(eval("\"a\" - 1").unwrap_err().category(), ErrorCategory::Type);
        assert_eq!(eval("TRUE + 1").unwrap_err().category(), ErrorCategory::Type);
        assert_eq!(eval("\"a\" < \"b\"").unwrap_err().category(), ErrorCategory::Type);
        assert_eq!(eval("-\"a\"").unwrap_err().category(), ErrorCategory::Type);
    }

    #[test]
    fn test_undefined_variable() {
        let err = eval("missing + 1").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Name);
        assert_eq!(err.span.start, 0);
    }

    #[test]
    fn test_input_coercion_and_prompt() {
        let expr = parse_expression_text("INPUT(\"Age?\") + 1", 0).unwrap();
        let mut interpreter = Interpreter::with_console(ScriptedConsole::new(["41"]));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Value::Number(42.0));
        assert_eq!(interpreter.console().prompts(), ["Age?"]);
    }

    #[test]
    fn test_input_at_end_of_input() {
        let expr = parse_expression_text("INPUT(\"more?\")", 0).unwrap();
        let mut interpreter = Interpreter::with_console(ScriptedConsole::default());
        let err = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Io);
    }
}
