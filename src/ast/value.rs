//! Runtime values.
//!
//! Rapcode is dynamically typed with exactly three kinds of value. There is
//! no null: reading a variable that was never assigned is an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Rapcode value.
///
/// Serialized as a plain JSON scalar (`3`, `"text"`, `true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// `TRUE` / `FALSE`
    Boolean(bool),
    /// 64-bit float; integral values display without a fractional part.
    Number(f64),
    /// Text.
    String(String),
}

impl Value {
    /// Truthiness: booleans are themselves, numbers are true when non-zero,
    /// strings are true when non-empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
        }
    }

    /// The kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }

    /// Returns the number if this value is numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Coerces a line of user input: a number when the text parses as one,
    /// otherwise the text itself.
    ///
    /// ```
    /// use rapcode::ast::Value;
    ///
    /// assert_eq!(Value::from_input("42\n"), Value::Number(42.0));
    /// assert_eq!(Value::from_input("forty-two"), Value::String("forty-two".into()));
    /// ```
    pub fn from_input(line: &str) -> Value {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        match line.trim().parse::<f64>() {
            Ok(n) if !line.trim().is_empty() => Value::Number(n),
            _ => Value::String(line.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(true) => write!(f, "TRUE"),
            Value::Boolean(false) => write!(f, "FALSE"),
            // f64's Display never uses exponent notation and prints integral
            // values without a fraction; only negative zero needs care.
            Value::Number(n) if *n == 0.0 => write!(f, "0"),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
