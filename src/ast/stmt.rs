//! Statement AST nodes.
//!
//! Statements perform actions and produce no value. Rapcode has five:
//! assignment, `OUTPUT`, `IF`, the single loop form `While`, and `BREAK`.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Expr, Span};

/// A statement with its source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// The kind of statement.
    #[serde(flatten)]
    pub kind: StatementKind,
    /// Source location of this statement.
    #[serde(default)]
    pub span: Span,
}

impl Statement {
    /// Creates a new statement with the given kind and span.
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns a copy with every span in the tree reset.
    pub fn without_spans(&self) -> Statement {
        let kind = match &self.kind {
            StatementKind::Assignment { target, value } => StatementKind::Assignment {
                target: target.clone(),
                value: value.without_spans(),
            },
            StatementKind::Output { value } => StatementKind::Output {
                value: value.without_spans(),
            },
            StatementKind::If {
                test,
                consequent,
                alternate,
            } => StatementKind::If {
                test: test.without_spans(),
                consequent: strip_all(consequent),
                alternate: alternate.as_deref().map(strip_all),
            },
            StatementKind::While { test, body } => StatementKind::While {
                test: test.without_spans(),
                body: strip_all(body),
            },
            StatementKind::Break => StatementKind::Break,
        };
        Statement::new(kind, Span::default())
    }
}

fn strip_all(stmts: &[Statement]) -> Vec<Statement> {
    stmts.iter().map(Statement::without_spans).collect()
}

/// The different kinds of statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatementKind {
    /// `[SET] target := value`
    Assignment { target: String, value: Expr },

    /// `OUTPUT value`
    Output { value: Expr },

    /// `IF test THEN consequent [ELSE alternate] ENDIF`
    ///
    /// `alternate` is either `None` or non-empty. Front ends never produce an
    /// empty-but-present alternate, and an empty list read from JSON becomes
    /// `None`.
    If {
        /// The condition to test (by truthiness).
        test: Expr,
        /// Statements to execute if the test is truthy.
        consequent: Vec<Statement>,
        /// Statements to execute otherwise.
        #[serde(default, deserialize_with = "non_empty")]
        alternate: Option<Vec<Statement>>,
    },

    /// `LOOP ... ENDLOOP` (test `TRUE`) or `WHILE test DO ... ENDLOOP`
    ///
    /// Every loop flavor of both front ends normalizes to this shape.
    While {
        /// Loop condition, checked before each iteration.
        test: Expr,
        /// Loop body.
        body: Vec<Statement>,
    },

    /// `BREAK` - leaves the innermost enclosing `While`.
    Break,
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<Vec<Statement>>, D::Error>
where
    D: Deserializer<'de>,
{
    let body = Option::<Vec<Statement>>::deserialize(deserializer)?;
    Ok(body.filter(|statements| !statements.is_empty()))
}
