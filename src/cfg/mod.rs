//! Control-flow graphs.
//!
//! A [`Cfg`] is the node/edge view of a program that the diagram back ends
//! draw. Statements become nodes; control structures become decisions plus
//! junctions where paths meet.
//!
//! # Example
//!
//! ```
//! use rapcode::cfg::{self, Branch, NodeKind};
//! use rapcode::parser::parse_program;
//!
//! let program = parse_program("IF x > 0 THEN OUTPUT x ENDIF").unwrap();
//! let graph = cfg::build(&program).unwrap();
//!
//! let decision = graph.nodes.iter().find(|n| n.kind == NodeKind::Decision).unwrap();
//! let branches: Vec<_> = graph.edges_from(decision.id).filter_map(|e| e.label).collect();
//! assert_eq!(branches, [Branch::True, Branch::False]);
//! ```

mod builder;
mod error;

pub use builder::build;
pub use error::CfgError;

use std::fmt;

/// Index of a node in [`Cfg::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a CFG node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Start,
    End,
    Assignment,
    /// An assignment whose value is read from the user.
    Input,
    Output,
    Decision,
    /// A meeting point with no action of its own.
    Junction,
}

/// A CFG node.
#[derive(Debug, Clone, PartialEq)]
pub struct CfgNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Text shown in diagrams (Rapcode syntax for statements and tests).
    pub label: String,
}

/// The outcome a decision edge is taken on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    True,
    False,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::True => write!(f, "True"),
            Branch::False => write!(f, "False"),
        }
    }
}

/// A directed CFG edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfgEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Set on the edges leaving a decision.
    pub label: Option<Branch>,
}

/// A control-flow graph.
///
/// Nodes are numbered in creation order: `Start` first, `End` last.
#[derive(Debug, Clone, PartialEq)]
pub struct Cfg {
    pub nodes: Vec<CfgNode>,
    pub edges: Vec<CfgEdge>,
    pub start: NodeId,
    pub end: NodeId,
}

impl Cfg {
    /// Looks up a node.
    pub fn node(&self, id: NodeId) -> Option<&CfgNode> {
        self.nodes.get(id.0)
    }

    /// Edges leaving `id`, in creation order.
    pub fn edges_from(&self, id: NodeId) -> impl Iterator<Item = &CfgEdge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    /// Edges entering `id`, in creation order.
    pub fn edges_to(&self, id: NodeId) -> impl Iterator<Item = &CfgEdge> {
        self.edges.iter().filter(move |e| e.to == id)
    }
}
