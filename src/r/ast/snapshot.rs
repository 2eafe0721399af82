//! AST Snapshot - a normalized intermediate representation of the tree
//!
//! The snapshot captures the tree structure with node types, labels, attributes and
//! children, so each output format (treeviz, JSON) only deals with presentation and never
//! walks the arena itself.
//!
//! The root is flattened: the global scope's statements appear as direct children of the
//! root snapshot.

use super::node::NodeKind;
use super::root::{AstRoot, NodeRef};
use crate::r::text::TextRange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of a node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstSnapshot {
    /// The kind of node (e.g., "Operator", "Scope", "Call")
    pub node_type: String,

    /// Token text for leaves and operators, first line of the node text otherwise
    pub label: String,

    pub range: TextRange,

    /// Additional attributes specific to the node type
    pub attributes: BTreeMap<String, String>,

    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: String, label: String, range: TextRange) -> Self {
        Self {
            node_type,
            label,
            range,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: String) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Snapshot of a whole tree, statements flattened under the root
pub fn snapshot_from_root(ast: &AstRoot) -> AstSnapshot {
    let root = ast.root_node();
    let statements: Vec<AstSnapshot> = ast
        .statements()
        .into_iter()
        .map(snapshot_node)
        .collect();
    let label = match statements.len() {
        1 => "1 statement".to_string(),
        count => format!("{} statements", count),
    };
    AstSnapshot::new("Root".to_string(), label, root.range())
        .with_attribute("comments", ast.comments().len().to_string())
        .with_children(statements)
}

/// Snapshot of a node and all its descendants
pub fn snapshot_node(node: NodeRef<'_>) -> AstSnapshot {
    let kind = node.kind();
    let snapshot = AstSnapshot::new(kind.name().to_string(), label(node), node.range());

    let snapshot = match kind {
        NodeKind::Token(token) => snapshot.with_attribute("kind", format!("{:?}", token.kind)),
        NodeKind::Operator(operator) => snapshot
            .with_attribute("op", operator.op.to_string())
            .with_attribute("precedence", operator.precedence().to_string())
            .with_attribute("association", format!("{:?}", operator.association())),
        _ => snapshot,
    };

    let children = node.children().into_iter().map(snapshot_node).collect();
    snapshot.with_children(children)
}

fn label(node: NodeRef<'_>) -> String {
    match node.kind() {
        NodeKind::Operator(operator) => node.root().node(operator.operator).text().to_string(),
        _ => node.text().lines().next().unwrap_or_default().trim().to_string(),
    }
}
