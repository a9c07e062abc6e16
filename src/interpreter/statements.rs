//! Statement execution.

use crate::ast::{Statement, StatementKind};

use super::{Console, Flow, Interpreter, RuntimeError, RuntimeErrorKind};

impl<C: Console> Interpreter<C> {
    /// Executes statements in order until one breaks.
    pub(super) fn execute_block(&mut self, body: &[Statement]) -> Result<Flow, RuntimeError> {
        for stmt in body {
            if let Flow::Broke(span) = self.execute(stmt)? {
                return Ok(Flow::Broke(span));
            }
        }
        Ok(Flow::Completed)
    }

    /// Executes one statement.
    fn execute(&mut self, stmt: &Statement) -> Result<Flow, RuntimeError> {
        match &stmt.kind {
            StatementKind::Assignment { target, value } => {
                let value = self.eval(value)?;
                log::trace!("{} := {}", target, value);
                self.env.set(target.as_str(), value);
                Ok(Flow::Completed)
            }

            StatementKind::Output { value } => {
                let text = self.eval(value)?.to_string();
                self.console
                    .write_line(&text)
                    .map_err(|e| self.error(RuntimeErrorKind::Io(e), stmt.span))?;
                Ok(Flow::Completed)
            }

            StatementKind::If {
                test,
                consequent,
                alternate,
            } => {
                if self.eval(test)?.is_truthy() {
                    self.execute_block(consequent)
                } else if let Some(alternate) = alternate {
                    self.execute_block(alternate)
                } else {
                    Ok(Flow::Completed)
                }
            }

            StatementKind::While { test, body } => {
                while self.eval(test)?.is_truthy() {
                    if let Flow::Broke(span) = self.execute_block(body)? {
                        log::trace!("loop left by BREAK at byte {}", span.start);
                        break;
                    }
                }
                Ok(Flow::Completed)
            }

            StatementKind::Break => Ok(Flow::Broke(stmt.span)),
        }
    }
}
