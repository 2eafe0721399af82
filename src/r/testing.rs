//! Testing utilities for syntax tree assertions
//!
//!     Tests that walk the arena by hand (match on `NodeKind`, unwrap the `Option` child,
//!     index into the node table) are long and break whenever a node kind gains a field.
//!     The fluent API below names what a test cares about instead: the statement count,
//!     the operator at a position, the operands on each side, the text a node covers.
//!
//!     Every step carries a context string such as `statements[0].right` so a failure
//!     points at the exact node that did not match.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use r_parser::r::parsing::parse;
//!     use r_parser::r::testing::assert_tree;
//!
//!     let (ast, errors) = parse("x <- 1 + 2 * 3");
//!     assert!(errors.is_empty());
//!
//!     assert_tree(&ast).statement_count(1).statement(0, |s| {
//!         s.assert_operator()
//!             .op(OperatorType::LeftAssign)
//!             .left(|x| x.text("x"))
//!             .right(|sum| {
//!                 sum.assert_operator()
//!                     .op(OperatorType::Add)
//!                     .right(|product| product.assert_operator().op(OperatorType::Multiply));
//!             });
//!     });
//!     ```
//!
//!     `statement(i, ..)` hands over the statement's expression, not the `Statement` node,
//!     since that is what nearly every test inspects. Use [NodeAssertion::kind] on the
//!     parent scope's [ScopeAssertion::statement_node] for the wrapper itself.

pub mod matchers;
mod tree_assertions;

pub use matchers::TextMatch;
pub use tree_assertions::{
    assert_tree, NodeAssertion, OperatorAssertion, ScopeAssertion, TreeAssertion,
};
