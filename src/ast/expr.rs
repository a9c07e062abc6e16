//! Expression AST nodes.
//!
//! Expressions are constructs that evaluate to a value: literals, variable
//! reads, operators and `INPUT(prompt)`.
//!
//! # Expression Precedence
//!
//! From highest to lowest (as implemented in the parser):
//!
//! 1. Primary: literals, identifiers, parenthesized expressions, `INPUT(...)`
//! 2. Unary: `-x`, `NOT x`
//! 3. Multiplicative: `*`, `/`, `%`
//! 4. Additive: `+`, `-`
//! 5. Relational: `<`, `<=`, `>`, `>=`
//! 6. Equality: `==`, `!=`
//!
//! The AST keeps no parentheses; [`Expr`]'s `Display` re-inserts exactly the
//! ones needed to reproduce the same tree when parsed again.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Span, Value};
use crate::parser::Precedence;

/// An expression with its source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// The kind of expression.
    #[serde(flatten)]
    pub kind: ExprKind,
    /// Source location of this expression.
    #[serde(default)]
    pub span: Span,
}

impl Expr {
    /// Creates a new expression with the given kind and span.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Shorthand for a literal expression.
    pub fn literal(value: impl Into<Value>, span: Span) -> Self {
        Self::new(
            ExprKind::Literal {
                value: value.into(),
            },
            span,
        )
    }

    /// Returns true for the `TRUE` literal (the test of an unconditional loop).
    pub fn is_literal_true(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Literal {
                value: Value::Boolean(true)
            }
        )
    }

    /// Returns a copy with every span in the tree reset.
    pub fn without_spans(&self) -> Expr {
        let kind = match &self.kind {
            ExprKind::Binary {
                operator,
                left,
                right,
            } => ExprKind::Binary {
                operator: *operator,
                left: Box::new(left.without_spans()),
                right: Box::new(right.without_spans()),
            },
            ExprKind::Unary { operator, operand } => ExprKind::Unary {
                operator: *operator,
                operand: Box::new(operand.without_spans()),
            },
            ExprKind::Input { prompt } => ExprKind::Input {
                prompt: Box::new(prompt.without_spans()),
            },
            leaf => leaf.clone(),
        };
        Expr::new(kind, Span::default())
    }

    /// Binding strength of this expression when printed as an operand.
    fn print_precedence(&self) -> Precedence {
        match &self.kind {
            ExprKind::Binary { operator, .. } => operator.precedence(),
            ExprKind::Unary { .. } => Precedence::Unary,
            _ => Precedence::Primary,
        }
    }
}

/// The different kinds of expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExprKind {
    /// Literal value: `42`, `"Hello"`, `TRUE`
    Literal { value: Value },

    /// Variable reference: `x`
    Identifier { name: String },

    /// Binary operation: `left op right`
    ///
    /// Examples: `1 + 2`, `x * y`, `a > b`, `"n = " + n`
    Binary {
        operator: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary operation: `-x`, `NOT done`
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
    },

    /// `INPUT(prompt)` - reads a line from the user.
    Input { prompt: Box<Expr> },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `+` - Addition, or concatenation when either side is a string
    #[serde(rename = "+")]
    Add,
    /// `-` - Subtraction
    #[serde(rename = "-")]
    Subtract,
    /// `*` - Multiplication
    #[serde(rename = "*")]
    Multiply,
    /// `/` - Division
    #[serde(rename = "/")]
    Divide,
    /// `%` - Floored modulo
    #[serde(rename = "%")]
    Modulo,
    /// `==` - Structural equality
    #[serde(rename = "==")]
    Equal,
    /// `!=` - Structural inequality
    #[serde(rename = "!=")]
    NotEqual,
    /// `<`
    #[serde(rename = "<")]
    LessThan,
    /// `<=`
    #[serde(rename = "<=")]
    LessEqual,
    /// `>`
    #[serde(rename = ">")]
    GreaterThan,
    /// `>=`
    #[serde(rename = ">=")]
    GreaterEqual,
}

impl BinaryOp {
    /// Returns the Rapcode spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::LessThan => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterEqual => ">=",
        }
    }

    /// The grammar level this operator lives on.
    pub(crate) fn precedence(&self) -> Precedence {
        match self {
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => {
                Precedence::Multiplicative
            }
            BinaryOp::Add | BinaryOp::Subtract => Precedence::Additive,
            BinaryOp::LessThan
            | BinaryOp::LessEqual
            | BinaryOp::GreaterThan
            | BinaryOp::GreaterEqual => Precedence::Relational,
            BinaryOp::Equal | BinaryOp::NotEqual => Precedence::Equality,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `NOT` - Logical negation of truthiness
    #[serde(rename = "NOT")]
    Not,
    /// `-` - Numeric negation
    #[serde(rename = "-")]
    Negate,
}

impl UnaryOp {
    /// Returns the Rapcode spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "NOT",
            UnaryOp::Negate => "-",
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal {
                value: Value::String(s),
            } => write!(f, "\"{}\"", s),
            ExprKind::Literal { value } => write!(f, "{}", value),
            ExprKind::Identifier { name } => write!(f, "{}", name),
            ExprKind::Binary {
                operator,
                left,
                right,
            } => {
                let prec = operator.precedence();
                // Left-associative: a right operand on the same level needs
                // parentheses, a left one does not.
                write_operand(f, left, left.print_precedence() < prec)?;
                write!(f, " {} ", operator.as_str())?;
                write_operand(f, right, right.print_precedence() <= prec)
            }
            ExprKind::Unary { operator, operand } => {
                match operator {
                    UnaryOp::Not => write!(f, "NOT ")?,
                    UnaryOp::Negate => write!(f, "-")?,
                }
                write_operand(f, operand, operand.print_precedence() < Precedence::Unary)
            }
            ExprKind::Input { prompt } => write!(f, "INPUT({})", prompt),
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Expr {
        Expr::literal(n, Span::default())
    }

    fn ident(name: &str) -> Expr {
        Expr::new(
            ExprKind::Identifier {
                name: name.to_string(),
            },
            Span::default(),
        )
    }

    fn binary(operator: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::new(
            ExprKind::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
            Span::default(),
        )
    }

    #[test]
    fn test_binary_op_as_str() {
        assert_eq!(BinaryOp::Add.as_str(), "+");
        assert_eq!(BinaryOp::Modulo.as_str(), "%");
        assert_eq!(BinaryOp::NotEqual.as_str(), "!=");
    }

    #[test]
    fn test_display_minimal_parentheses() {
        let e = binary(
            BinaryOp::Multiply,
            binary(BinaryOp::Add, num(2.0), num(3.0)),
            num(4.0),
        );
        assert_eq!(e.to_string(), "(2 + 3) * 4");

        let e = binary(
            BinaryOp::Add,
            num(2.0),
            binary(BinaryOp::Multiply, num(3.0), num(4.0)),
        );
        assert_eq!(e.to_string(), "2 + 3 * 4");
    }

    #[test]
    fn test_display_right_operand_same_level() {
        let e = binary(
            BinaryOp::Subtract,
            ident("a"),
            binary(BinaryOp::Subtract, ident("b"), ident("c")),
        );
        assert_eq!(e.to_string(), "a - (b - c)");

        let e = binary(
            BinaryOp::Subtract,
            binary(BinaryOp::Subtract, ident("a"), ident("b")),
            ident("c"),
        );
        assert_eq!(e.to_string(), "a - b - c");
    }

    #[test]
    fn test_display_literals_and_unary() {
        let e = Expr::new(
            ExprKind::Unary {
                operator: UnaryOp::Not,
                operand: Box::new(binary(BinaryOp::Equal, ident("x"), Expr::literal("y", Span::default()))),
            },
            Span::default(),
        );
        assert_eq!(e.to_string(), "NOT (x == \"y\")");
        assert_eq!(Expr::literal(true, Span::default()).to_string(), "TRUE");
    }

    #[test]
    fn test_json_shape() {
        let e = binary(BinaryOp::LessEqual, ident("count"), num(8.0));
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "Binary");
        assert_eq!(json["operator"], "<=");
        assert_eq!(json["left"]["type"], "Identifier");
        assert_eq!(json["right"]["value"], 8.0);

        let back: Expr = serde_json::from_value(json).unwrap();
        assert_eq!(back, e);
    }
}
