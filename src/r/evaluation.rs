//! Evaluation hook
//!
//!     The tree holds its evaluator as a trait object handed in at construction, see
//!     [AstRoot::with_evaluator](crate::r::ast::AstRoot::with_evaluator). The parser never
//!     calls it; consumers do, after parsing, through
//!     [AstRoot::evaluate](crate::r::ast::AstRoot::evaluate).
//!
//!     Only value-bearing nodes reach the evaluator: `AstRoot::evaluate` answers `NULL` for
//!     statements, arguments, scopes and other structural nodes itself. What a value-bearing
//!     node evaluates to is up to the implementation. [NullEvaluator] computes nothing.
//!     Any `Fn(&AstRoot, NodeId) -> RObject` closure is an evaluator too.

use crate::r::ast::{AstRoot, NodeId};
use crate::r::data_types::RObject;

pub trait CodeEvaluator: Send + Sync {
    fn evaluate(&self, ast: &AstRoot, node: NodeId) -> RObject;
}

/// Evaluates every node to `NULL`
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEvaluator;

impl CodeEvaluator for NullEvaluator {
    fn evaluate(&self, _ast: &AstRoot, _node: NodeId) -> RObject {
        RObject::Null
    }
}

impl<F> CodeEvaluator for F
where
    F: Fn(&AstRoot, NodeId) -> RObject + Send + Sync,
{
    fn evaluate(&self, ast: &AstRoot, node: NodeId) -> RObject {
        self(ast, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r::ast::NodeKind;
    use crate::r::parsing::{parse, parse_with_evaluator};
    use crate::r::token::TokenKind;
    use std::sync::Arc;

    #[test]
    fn test_default_evaluator_returns_null() {
        let (ast, _) = parse("1 + 2");
        for index in 0..ast.nodes().len() {
            assert_eq!(ast.evaluate(NodeId(index)), RObject::Null);
        }
    }

    #[test]
    fn test_evaluator_substitution() {
        let numbers = |ast: &AstRoot, node: NodeId| -> RObject {
            match ast.kind(node) {
                NodeKind::Token(token) if token.kind == TokenKind::Number => ast
                    .node(node)
                    .text()
                    .parse::<f64>()
                    .map(RObject::from)
                    .unwrap_or_default(),
                _ => RObject::Null,
            }
        };
        let (ast, _) = parse_with_evaluator("x <- 42", Arc::new(numbers));
        let number = ast.node_at(5);
        assert_eq!(number.evaluate(), RObject::from(42.0));
        assert_eq!(ast.root_node().evaluate(), RObject::Null);
    }

    #[test]
    fn test_structural_nodes_skip_the_evaluator() {
        let everything = |_: &AstRoot, _: NodeId| RObject::from(1.0);
        let (ast, _) = parse_with_evaluator("f(x = 2); y", Arc::new(everything));
        for (index, node) in ast.nodes().iter().enumerate() {
            let expected = if node.kind.is_value_node() {
                RObject::from(1.0)
            } else {
                RObject::Null
            };
            assert_eq!(ast.evaluate(NodeId(index)), expected, "{:?}", node.kind);
        }
        assert_eq!(ast.statements()[0].evaluate(), RObject::Null);
    }
}
