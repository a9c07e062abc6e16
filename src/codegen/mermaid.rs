//! Mermaid flowchart backend.
//!
//! Builds the program's CFG and writes it as a Mermaid `graph`: all node
//! definitions first, then all edges, both in CFG order.

use std::fmt;

use crate::ast::Program;
use crate::cfg::{self, Cfg, NodeKind};

use super::{CodeGenError, CodeGenerator, GeneratedOutput, display_label};

/// Layout direction of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Top to bottom.
    #[default]
    TopDown,
    /// Left to right.
    LeftRight,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopDown => write!(f, "TD"),
            Direction::LeftRight => write!(f, "LR"),
        }
    }
}

/// Backend that emits a Mermaid flowchart.
#[derive(Debug, Clone, Default)]
pub struct MermaidBackend {
    direction: Direction,
}

impl MermaidBackend {
    /// Creates a top-down Mermaid backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the layout direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    fn render(&self, cfg: &Cfg) -> String {
        let mut out = format!("graph {};\n", self.direction);

        for node in &cfg.nodes {
            let label = escape(display_label(&node.label));
            let (open, close) = shape(node.kind);
            out.push_str(&format!("  N{}{}\"{}\"{}\n", node.id, open, label, close));
        }

        for edge in &cfg.edges {
            match edge.label {
                Some(branch) => out.push_str(&format!(
                    "  N{} --\"{}\"--> N{}\n",
                    edge.from, branch, edge.to
                )),
                None => out.push_str(&format!("  N{} --> N{}\n", edge.from, edge.to)),
            }
        }

        out
    }
}

impl CodeGenerator for MermaidBackend {
    fn generate(&self, program: &Program) -> Result<GeneratedOutput, CodeGenError> {
        let cfg = cfg::build(program)?;
        Ok(GeneratedOutput::mermaid(self.render(&cfg)))
    }

    fn backend_name(&self) -> &str {
        "Mermaid"
    }
}

/// Opening and closing brackets of a node shape.
fn shape(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Start | NodeKind::End => ("([", "])"),
        NodeKind::Assignment => ("[", "]"),
        NodeKind::Input | NodeKind::Output => ("[/", "/]"),
        NodeKind::Decision => ("{", "}"),
        NodeKind::Junction => ("((", "))"),
    }
}

fn escape(label: &str) -> String {
    label.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    fn render(source: &str) -> String {
        let program = parse_program(source).unwrap();
        MermaidBackend::new().generate(&program).unwrap().code
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(
            render(""),
            "graph TD;\n  N0([\"Start\"])\n  N1([\"End\"])\n  N0 --> N1\n"
        );
    }

    #[test]
    fn test_shapes_and_escaping() {
        let code = render("n := INPUT(\"n?\") x := n * 2 OUTPUT x");
        assert!(code.contains("  N1[/\"n := INPUT(#quot;n?#quot;)\"/]\n"));
        assert!(code.contains("  N2[\"x := n * 2\"]\n"));
        assert!(code.contains("  N3[/\"OUTPUT x\"/]\n"));
    }

    #[test]
    fn test_decision_edges() {
        let code = render("IF x > 1 THEN OUTPUT x ENDIF");
        assert!(code.contains("  N1{\"x > 1\"}\n"));
        assert!(code.contains("  N2((\" \"))\n"));
        assert!(code.contains("  N1 --\"True\"--> N3\n"));
        assert!(code.contains("  N1 --\"False\"--> N2\n"));
    }

    #[test]
    fn test_nodes_before_edges() {
        let code = render("LOOP BREAK ENDLOOP");
        let last_node = code.rfind("((\"BREAK\"))").unwrap();
        let first_edge = code.find("-->").unwrap();
        assert!(last_node < first_edge);
    }

    #[test]
    fn test_left_right_direction() {
        let program = parse_program("OUTPUT 1").unwrap();
        let code = MermaidBackend::new()
            .with_direction(Direction::LeftRight)
            .generate(&program)
            .unwrap()
            .code;
        assert!(code.starts_with("graph LR;\n"));
    }
}
