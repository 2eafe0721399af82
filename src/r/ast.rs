//! Syntax tree
//!
//!     The tree is an arena: [AstRoot] owns every node, nodes refer to each other by
//!     [NodeId], and [NodeKind] is a closed enum matched exhaustively wherever the tree is
//!     walked.
//!
//!     Structure
//!
//!         Root
//!           GlobalScope
//!             Statement*
//!               expression (Operator, Call, Index, Group, If, For, ..., Token)
//!
//!     Braced bodies are `Scope` nodes; bodies written without braces (`if (x) y`) are
//!     `SimpleScope` nodes holding exactly one statement. Both answer
//!     [NodeKind::statements].
//!
//!     Every node has a [TextRange](crate::r::text::TextRange). Use
//!     [SourceLocation] to turn offsets into line and column positions.

pub mod node;
pub mod operators;
pub mod range;
pub mod root;
pub mod snapshot;

pub use node::{Node, NodeId, NodeKind, OperatorNode};
pub use operators::{Association, OperatorType};
pub use range::{Location, Position, SourceLocation};
pub use root::{AstRoot, NodeRef};
pub use snapshot::{snapshot_from_root, snapshot_node, AstSnapshot};
