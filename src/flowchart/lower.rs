//! Lowering: flowchart tree → AST.
//!
//! Every symbol's free text goes through the Rapcode parser, so a condition
//! on a decision means exactly what it would mean in a `.rapcode` file.
//!
//! | Symbol                    | Statement                                       |
//! |---------------------------|-------------------------------------------------|
//! | Oval                      | nothing                                         |
//! | Rectangle                 | `Assignment` parsed from the text               |
//! | Parallelogram (output)    | `Output(expr)`                                  |
//! | Parallelogram (input)     | `Assignment(var, Input(prompt))`                |
//! | Decision                  | `If(test, yes, no)`                             |
//! | Loop                      | `While(TRUE, before ++ [If(test, [Break])] ++ after)` |
//!
//! Symbols of an unsupported kind are skipped with a warning.

use std::fmt;

use crate::ast::{Expr, ExprKind, Program, Span, Statement, StatementKind};
use crate::lexer::{TokenKind, lex};
use crate::parser::{parse_assignment_text, parse_expression_text};

use super::{FlowKind, FlowNode, Flowchart, FlowchartError, Prompt};

/// The result of lowering: the program plus what had to be skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct LoweredProgram {
    pub program: Program,
    pub warnings: Vec<LoweringWarning>,
}

/// A flowchart symbol that was skipped during lowering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweringWarning {
    /// The symbol's type name.
    pub kind: String,
    /// Byte offset of the symbol's text in the document.
    pub offset: usize,
}

impl fmt::Display for LoweringWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped unsupported flowchart symbol '{}'", self.kind)
    }
}

/// Lowers a flowchart into a program.
pub fn lower(chart: &Flowchart) -> Result<LoweredProgram, FlowchartError> {
    let mut lowerer = Lowerer::default();
    let body = lowerer.chain(Some(&chart.start))?;
    log::debug!(
        "lowered flowchart into {} top-level statements ({} skipped symbols)",
        body.len(),
        lowerer.warnings.len()
    );

    Ok(LoweredProgram {
        program: Program::new(body),
        warnings: lowerer.warnings,
    })
}

#[derive(Default)]
struct Lowerer {
    warnings: Vec<LoweringWarning>,
}

impl Lowerer {
    /// Lowers a successor chain.
    fn chain(&mut self, first: Option<&FlowNode>) -> Result<Vec<Statement>, FlowchartError> {
        let mut statements = Vec::new();
        let mut current = first;
        while let Some(node) = current {
            if let Some(stmt) = self.symbol(node)? {
                statements.push(stmt);
            }
            current = node.successor.as_deref();
        }
        Ok(statements)
    }

    /// Lowers one symbol.
    fn symbol(&mut self, node: &FlowNode) -> Result<Option<Statement>, FlowchartError> {
        let span = Span::new(node.offset, node.offset + node.text.len());

        let kind = match &node.kind {
            FlowKind::Oval => return Ok(None),

            FlowKind::Rectangle => {
                let stmt = parse_assignment_text(&node.text, node.offset)
                    .map_err(FlowchartError::syntax("assignment"))?;
                return Ok(Some(stmt));
            }

            FlowKind::Parallelogram {
                is_input: false, ..
            } => StatementKind::Output {
                value: parse_expression_text(&node.text, node.offset)
                    .map_err(FlowchartError::syntax("output expression"))?,
            },

            FlowKind::Parallelogram {
                is_input: true,
                prompt,
            } => StatementKind::Assignment {
                target: input_target(node)?,
                value: Expr::new(
                    ExprKind::Input {
                        prompt: Box::new(prompt_expr(prompt.as_ref(), span)),
                    },
                    span,
                ),
            },

            FlowKind::Decision { yes, no } => {
                let test = parse_expression_text(&node.text, node.offset)
                    .map_err(FlowchartError::syntax("decision condition"))?;
                let consequent = self.chain(yes.as_deref())?;
                let alternate = self.chain(no.as_deref())?;
                StatementKind::If {
                    test,
                    consequent,
                    alternate: (!alternate.is_empty()).then_some(alternate),
                }
            }

            FlowKind::Loop { before, after } => {
                let exit_test = parse_expression_text(&node.text, node.offset)
                    .map_err(FlowchartError::syntax("loop condition"))?;
                let mut body = self.chain(before.as_deref())?;
                body.push(Statement::new(
                    StatementKind::If {
                        test: exit_test,
                        consequent: vec![Statement::new(StatementKind::Break, span)],
                        alternate: None,
                    },
                    span,
                ));
                body.extend(self.chain(after.as_deref())?);
                StatementKind::While {
                    test: Expr::literal(true, span),
                    body,
                }
            }

            FlowKind::Unknown(kind) => {
                log::warn!(
                    "skipping unsupported flowchart symbol '{}' at byte {}",
                    kind,
                    node.offset
                );
                self.warnings.push(LoweringWarning {
                    kind: kind.clone(),
                    offset: node.offset,
                });
                return Ok(None);
            }
        };

        Ok(Some(Statement::new(kind, span)))
    }
}

/// The variable an input symbol assigns to.
fn input_target(node: &FlowNode) -> Result<String, FlowchartError> {
    let name = node.text.trim();
    match lex(name).as_deref() {
        Ok([token]) if token.kind == TokenKind::Identifier => Ok(name.to_string()),
        _ => Err(FlowchartError::InvalidInputTarget {
            text: node.text.clone(),
            offset: node.offset,
        }),
    }
}

/// The prompt of an input symbol as an expression.
///
/// Prompts are normally string expressions (`"Enter n"`); text that does not
/// parse is shown as written, minus any surrounding quotes.
fn prompt_expr(prompt: Option<&Prompt>, fallback: Span) -> Expr {
    let Some(prompt) = prompt else {
        return Expr::literal("", fallback);
    };

    match parse_expression_text(&prompt.text, prompt.offset) {
        Ok(expr) => expr,
        Err(err) => {
            log::debug!("prompt {:?} is not an expression ({}); using it verbatim", prompt.text, err);
            let text = prompt.text.trim();
            let text = text
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(text);
            let span = Span::new(prompt.offset, prompt.offset + prompt.text.len());
            Expr::literal(text, span)
        }
    }
}
