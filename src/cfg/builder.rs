//! AST → CFG construction.
//!
//! Each statement is built into a fragment with an entry node and, unless
//! control can never fall out of it, an exit node. Sequences chain the
//! fragments exit-to-entry. Loops push their exit junction on a stack so a
//! `BREAK` can jump to the innermost one.

use crate::ast::{Expr, ExprKind, Program, Statement, StatementKind};

use super::{Branch, Cfg, CfgEdge, CfgError, CfgNode, NodeId, NodeKind};

/// Builds the control-flow graph of a program.
pub fn build(program: &Program) -> Result<Cfg, CfgError> {
    let mut builder = Builder::default();

    let start = builder.add_node(NodeKind::Start, "Start");
    let (entry, exit) = builder.sequence(&program.body)?;
    let end = builder.add_node(NodeKind::End, "End");

    match entry {
        Some(entry) => {
            builder.add_edge(start, entry, None);
            if let Some(exit) = exit {
                builder.add_edge(exit, end, None);
            }
        }
        None => builder.add_edge(start, end, None),
    }

    log::debug!(
        "built CFG with {} nodes and {} edges",
        builder.nodes.len(),
        builder.edges.len()
    );

    Ok(Cfg {
        nodes: builder.nodes,
        edges: builder.edges,
        start,
        end,
    })
}

/// Entry and exit of a built fragment; no entry means the fragment is empty,
/// no exit means control never falls out of it.
type Fragment = (Option<NodeId>, Option<NodeId>);

#[derive(Default)]
struct Builder {
    nodes: Vec<CfgNode>,
    edges: Vec<CfgEdge>,
    /// Exit junctions of the loops enclosing the statement being built.
    loop_exits: Vec<NodeId>,
}

impl Builder {
    fn add_node(&mut self, kind: NodeKind, label: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(CfgNode {
            id,
            kind,
            label: label.into(),
        });
        id
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId, label: Option<Branch>) {
        self.edges.push(CfgEdge { from, to, label });
    }

    /// Builds statements in order, chaining each exit to the next entry.
    fn sequence(&mut self, statements: &[Statement]) -> Result<Fragment, CfgError> {
        let mut first = None;
        let mut last_exit = None;

        for (i, stmt) in statements.iter().enumerate() {
            let (entry, exit) = self.statement(stmt)?;
            if i == 0 {
                first = entry;
            } else if let (Some(prev), Some(entry)) = (last_exit, entry) {
                self.add_edge(prev, entry, None);
            }
            last_exit = exit;
        }

        Ok((first, last_exit))
    }

    fn statement(&mut self, stmt: &Statement) -> Result<Fragment, CfgError> {
        match &stmt.kind {
            StatementKind::Assignment { target, value } => {
                let kind = match value.kind {
                    ExprKind::Input { .. } => NodeKind::Input,
                    _ => NodeKind::Assignment,
                };
                let node = self.add_node(kind, format!("{} := {}", target, value));
                Ok((Some(node), Some(node)))
            }

            StatementKind::Output { value } => {
                let node = self.add_node(NodeKind::Output, format!("OUTPUT {}", value));
                Ok((Some(node), Some(node)))
            }

            StatementKind::If {
                test,
                consequent,
                alternate,
            } => {
                let decision = self.add_node(NodeKind::Decision, test.to_string());
                let merge = self.add_node(NodeKind::Junction, "");

                self.branch(decision, Branch::True, consequent, merge)?;
                self.branch(
                    decision,
                    Branch::False,
                    alternate.as_deref().unwrap_or_default(),
                    merge,
                )?;

                Ok((Some(decision), Some(merge)))
            }

            StatementKind::While { test, body } => self.while_loop(test, body),

            StatementKind::Break => {
                let target = *self
                    .loop_exits
                    .last()
                    .ok_or(CfgError::BreakOutsideLoop { span: stmt.span })?;
                let node = self.add_node(NodeKind::Junction, "BREAK");
                self.add_edge(node, target, None);
                Ok((Some(node), None))
            }
        }
    }

    /// Builds one arm of a decision, joining it back at `merge`.
    fn branch(
        &mut self,
        decision: NodeId,
        label: Branch,
        body: &[Statement],
        merge: NodeId,
    ) -> Result<(), CfgError> {
        let (entry, exit) = self.sequence(body)?;
        self.add_edge(decision, entry.unwrap_or(merge), Some(label));
        if let Some(exit) = exit {
            self.add_edge(exit, merge, None);
        }
        Ok(())
    }

    fn while_loop(&mut self, test: &Expr, body: &[Statement]) -> Result<Fragment, CfgError> {
        let entry = self.add_node(NodeKind::Junction, "Loop Entry");
        let exit = self.add_node(NodeKind::Junction, "Loop Exit");

        // An unconditional loop goes straight into its body; any other test
        // gets a decision whose False edge leaves the loop.
        let head = if test.is_literal_true() {
            entry
        } else {
            let decision = self.add_node(NodeKind::Decision, test.to_string());
            self.add_edge(entry, decision, None);
            decision
        };
        let head_label = (head != entry).then_some(Branch::True);

        self.loop_exits.push(exit);
        let built = self.sequence(body);
        self.loop_exits.pop();
        let (body_entry, body_exit) = built?;

        match body_entry {
            Some(body_entry) => {
                self.add_edge(head, body_entry, head_label);
                if let Some(body_exit) = body_exit {
                    self.add_edge(body_exit, entry, None);
                }
            }
            None => self.add_edge(head, entry, head_label),
        }

        if head != entry {
            self.add_edge(head, exit, Some(Branch::False));
        }

        Ok((Some(entry), Some(exit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    fn cfg_of(source: &str) -> Cfg {
        build(&parse_program(source).unwrap()).unwrap()
    }

    fn find(cfg: &Cfg, label: &str) -> NodeId {
        cfg.nodes
            .iter()
            .find(|n| n.label == label)
            .map(|n| n.id)
            .unwrap_or_else(|| panic!("no node labelled {:?}", label))
    }

    fn targets(cfg: &Cfg, from: NodeId) -> Vec<(NodeId, Option<Branch>)> {
        cfg.edges_from(from).map(|e| (e.to, e.label)).collect()
    }

    #[test]
    fn test_empty_program() {
        let cfg = cfg_of("");
        assert_eq!(cfg.nodes.len(), 2);
        assert_eq!(targets(&cfg, cfg.start), [(cfg.end, None)]);
    }

    #[test]
    fn test_straight_line() {
        let cfg = cfg_of("x := 1 OUTPUT x");
        let assign = find(&cfg, "x := 1");
        let output = find(&cfg, "OUTPUT x");

        assert_eq!(cfg.node(assign).map(|n| n.kind), Some(NodeKind::Assignment));
        assert_eq!(targets(&cfg, cfg.start), [(assign, None)]);
        assert_eq!(targets(&cfg, assign), [(output, None)]);
        assert_eq!(targets(&cfg, output), [(cfg.end, None)]);
    }

    #[test]
    fn test_if_without_else() {
        let cfg = cfg_of("IF t THEN a := 1 ENDIF");
        let decision = find(&cfg, "t");
        let a = find(&cfg, "a := 1");
        let merge = cfg
            .nodes
            .iter()
            .find(|n| n.kind == NodeKind::Junction)
            .map(|n| n.id)
            .unwrap();

        assert_eq!(
            targets(&cfg, decision),
            [(a, Some(Branch::True)), (merge, Some(Branch::False))]
        );
        assert_eq!(targets(&cfg, a), [(merge, None)]);
        assert_eq!(targets(&cfg, merge), [(cfg.end, None)]);
    }

    #[test]
    fn test_input_node_kind() {
        let cfg = cfg_of("n := INPUT(\"n?\")");
        let node = find(&cfg, "n := INPUT(\"n?\")");
        assert_eq!(cfg.node(node).map(|n| n.kind), Some(NodeKind::Input));
    }

    #[test]
    fn test_infinite_loop_with_break() {
        let cfg = cfg_of("LOOP x := x + 1 IF x >= 3 THEN BREAK ENDIF ENDLOOP OUTPUT x");
        let entry = find(&cfg, "Loop Entry");
        let exit = find(&cfg, "Loop Exit");
        let step = find(&cfg, "x := x + 1");
        let brk = find(&cfg, "BREAK");
        let output = find(&cfg, "OUTPUT x");

        assert_eq!(targets(&cfg, entry), [(step, None)]);
        assert_eq!(targets(&cfg, brk), [(exit, None)]);
        assert_eq!(targets(&cfg, exit), [(output, None)]);

        // The merge after the IF loops back to the entry
        let merge = cfg.edges_to(entry).map(|e| e.from).next().unwrap();
        assert_eq!(cfg.node(merge).map(|n| n.kind), Some(NodeKind::Junction));
    }

    #[test]
    fn test_empty_loop_self_edge() {
        let cfg = cfg_of("LOOP ENDLOOP");
        let entry = find(&cfg, "Loop Entry");
        assert_eq!(targets(&cfg, entry), [(entry, None)]);
    }

    #[test]
    fn test_conditional_loop() {
        let cfg = cfg_of("WHILE n > 0 DO n := n - 1 ENDLOOP");
        let entry = find(&cfg, "Loop Entry");
        let exit = find(&cfg, "Loop Exit");
        let test = find(&cfg, "n > 0");
        let body = find(&cfg, "n := n - 1");

        assert_eq!(targets(&cfg, entry), [(test, None)]);
        assert_eq!(
            targets(&cfg, test),
            [(body, Some(Branch::True)), (exit, Some(Branch::False))]
        );
        assert_eq!(targets(&cfg, body), [(entry, None)]);
    }

    fn all(cfg: &Cfg, label: &str) -> Vec<NodeId> {
        cfg.nodes
            .iter()
            .filter(|n| n.label == label)
            .map(|n| n.id)
            .collect()
    }

    #[test]
    fn test_break_targets_innermost_loop() {
        let sources = [
            "LOOP LOOP BREAK ENDLOOP BREAK ENDLOOP",
            "LOOP LOOP IF t THEN BREAK ENDIF ENDLOOP BREAK ENDLOOP",
        ];
        for source in sources {
            let cfg = cfg_of(source);
            // Exits are created outer first; breaks in source order
            let exits = all(&cfg, "Loop Exit");
            let breaks = all(&cfg, "BREAK");
            assert_eq!((exits.len(), breaks.len()), (2, 2), "{}", source);
            let (outer, inner) = (exits[0], exits[1]);

            assert_eq!(targets(&cfg, breaks[0]), [(inner, None)], "{}", source);
            assert_eq!(targets(&cfg, breaks[1]), [(outer, None)], "{}", source);
            assert_eq!(targets(&cfg, inner), [(breaks[1], None)], "{}", source);
            assert_eq!(targets(&cfg, outer), [(cfg.end, None)], "{}", source);
        }
    }

    #[test]
    fn test_break_outside_loop() {
        let program = Program::new(vec![Statement::new(
            StatementKind::Break,
            crate::ast::Span::new(2, 7),
        )]);
        let err = build(&program).unwrap_err();
        assert_eq!(err.span(), crate::ast::Span::new(2, 7));
    }
}
