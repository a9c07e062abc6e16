//! Graphviz DOT backend.

use crate::ast::Program;
use crate::cfg::{self, Cfg, NodeKind};

use super::{CodeGenError, CodeGenerator, GeneratedOutput, display_label};

/// Backend that emits a Graphviz `digraph`.
#[derive(Debug, Clone, Default)]
pub struct DotBackend;

impl DotBackend {
    /// Creates a DOT backend.
    pub fn new() -> Self {
        Self
    }

    fn render(&self, cfg: &Cfg) -> String {
        let mut out = String::from("digraph Flowchart {\n");
        out.push_str("  graph [splines=ortho];\n");
        out.push_str("  node [fontname=\"Helvetica\", fontsize=10, style=rounded];\n");
        out.push_str("  edge [fontname=\"Helvetica\", fontsize=9];\n");

        for node in &cfg.nodes {
            let label = escape(display_label(&node.label));
            let extra = if node.kind == NodeKind::Junction {
                ", width=\"0\", height=\"0\""
            } else {
                ""
            };
            out.push_str(&format!(
                "  node{} [label=\"{}\", shape={}{}];\n",
                node.id,
                label,
                shape(node.kind),
                extra
            ));
        }

        for edge in &cfg.edges {
            let attrs = edge
                .label
                .map(|branch| format!("xlabel=\"{}\"", branch))
                .unwrap_or_default();
            out.push_str(&format!(
                "  node{} -> node{} [{}];\n",
                edge.from, edge.to, attrs
            ));
        }

        out.push_str("}\n");
        out
    }
}

impl CodeGenerator for DotBackend {
    fn generate(&self, program: &Program) -> Result<GeneratedOutput, CodeGenError> {
        let cfg = cfg::build(program)?;
        Ok(GeneratedOutput::dot(self.render(&cfg)))
    }

    fn backend_name(&self) -> &str {
        "DOT"
    }
}

fn shape(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Start | NodeKind::End => "ellipse",
        NodeKind::Assignment => "box",
        NodeKind::Input | NodeKind::Output => "parallelogram",
        NodeKind::Decision => "diamond",
        NodeKind::Junction => "point",
    }
}

fn escape(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    fn render(source: &str) -> String {
        let program = parse_program(source).unwrap();
        DotBackend::new().generate(&program).unwrap().code
    }

    #[test]
    fn test_header_and_footer() {
        let code = render("");
        assert!(code.starts_with("digraph Flowchart {\n  graph [splines=ortho];\n"));
        assert!(code.contains("  node0 [label=\"Start\", shape=ellipse];\n"));
        assert!(code.contains("  node0 -> node1 [];\n"));
        assert!(code.ends_with("}\n"));
    }

    #[test]
    fn test_shapes() {
        let code = render("WHILE i < 3 DO OUTPUT \"i\" i := i + 1 ENDLOOP");
        assert!(code.contains(
            "  node1 [label=\"Loop Entry\", shape=point, width=\"0\", height=\"0\"];\n"
        ));
        assert!(code.contains("  node3 [label=\"i < 3\", shape=diamond];\n"));
        assert!(code.contains("  node4 [label=\"OUTPUT \\\"i\\\"\", shape=parallelogram];\n"));
        assert!(code.contains("  node5 [label=\"i := i + 1\", shape=box];\n"));
        assert!(code.contains("  node3 -> node4 [xlabel=\"True\"];\n"));
        assert!(code.contains("  node3 -> node2 [xlabel=\"False\"];\n"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a\\b\"c\nd"), "a\\\\b\\\"c\\nd");
    }
}
