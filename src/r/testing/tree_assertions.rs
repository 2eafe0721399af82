//! Fluent assertions over a parsed tree

use super::matchers::TextMatch;
use crate::r::ast::{AstRoot, NodeId, NodeKind, NodeRef, OperatorNode, OperatorType};
use crate::r::data_types::RObject;
use crate::r::token::TokenKind;

/// Create an assertion builder for a parsed tree
pub fn assert_tree(ast: &AstRoot) -> TreeAssertion<'_> {
    TreeAssertion { ast }
}

fn summarize(nodes: &[NodeRef<'_>]) -> String {
    nodes
        .iter()
        .map(|node| format!("{}({:?})", node.kind().name(), node.text()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn expression_of<'a>(statement: NodeRef<'a>, context: &str) -> NodeRef<'a> {
    match statement.kind() {
        NodeKind::Statement { expression, .. } => statement.root().node(*expression),
        other => panic!("{}: Expected Statement, found {}", context, other.name()),
    }
}

// ============================================================================
// Tree
// ============================================================================

pub struct TreeAssertion<'a> {
    ast: &'a AstRoot,
}

impl<'a> TreeAssertion<'a> {
    /// Assert the number of top-level statements
    pub fn statement_count(self, expected: usize) -> Self {
        let statements = self.ast.statements();
        assert_eq!(
            statements.len(),
            expected,
            "Expected {} statements, found {}: [{}]",
            expected,
            statements.len(),
            summarize(&statements)
        );
        self
    }

    /// Assert on the expression of a top-level statement
    pub fn statement<F, R>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let statements = self.ast.statements();
        assert!(
            index < statements.len(),
            "Statement index {} out of bounds (tree has {} statements)",
            index,
            statements.len()
        );

        let context = format!("statements[{}]", index);
        let node = expression_of(statements[index], &context);
        assertion(NodeAssertion { node, context });
        self
    }

    pub fn global_scope<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(ScopeAssertion<'a>) -> R,
    {
        let scope = self
            .ast
            .global_scope()
            .unwrap_or_else(|| panic!("Expected a global scope, the tree has none"));
        assertion(ScopeAssertion {
            scope,
            context: "global".to_string(),
        });
        self
    }

    pub fn comment_count(self, expected: usize) -> Self {
        let actual = self.ast.comments().len();
        assert_eq!(
            actual, expected,
            "Expected {} comments, found {}",
            expected, actual
        );
        self
    }
}

// ============================================================================
// Any node
// ============================================================================

pub struct NodeAssertion<'a> {
    node: NodeRef<'a>,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    /// The node under test, for checks the fluent API does not cover
    pub fn node(&self) -> NodeRef<'a> {
        self.node
    }

    fn child<F, R>(&self, id: Option<NodeId>, name: &str, assertion: F)
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let id = id.unwrap_or_else(|| {
            panic!(
                "{}: Expected {} {}, found none",
                self.context,
                self.node.kind().name(),
                name
            )
        });
        assertion(NodeAssertion {
            node: self.node.root().node(id),
            context: format!("{}.{}", self.context, name),
        });
    }

    fn unexpected(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {} {:?}",
            self.context,
            expected,
            self.node.kind().name(),
            self.node.text()
        )
    }

    /// Assert the node kind by name ("Call", "If", "Token", ...)
    pub fn kind(self, expected: &str) -> Self {
        let actual = self.node.kind().name();
        assert_eq!(
            actual, expected,
            "{}: Expected {}, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.node.text(), &self.context);
        self
    }

    pub fn text_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(self.node.text(), &self.context);
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(self.node.text(), &self.context);
        self
    }

    /// Assert the node is a leaf holding a token of `expected` kind
    pub fn token_kind(self, expected: TokenKind) -> Self {
        match self.node.token() {
            Some(token) => assert_eq!(
                token.kind, expected,
                "{}: Expected {:?} token, found {:?}",
                self.context, expected, token.kind
            ),
            None => self.unexpected("Token"),
        }
        self
    }

    pub fn evaluates_to(self, expected: RObject) -> Self {
        let actual = self.node.evaluate();
        assert_eq!(
            actual, expected,
            "{}: Expected evaluation to give {:?}, got {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn assert_operator(self) -> OperatorAssertion<'a> {
        match self.node.as_operator() {
            Some(operator) => OperatorAssertion {
                operator,
                node: self.node,
                context: self.context,
            },
            None => self.unexpected("Operator"),
        }
    }

    pub fn assert_scope(self) -> ScopeAssertion<'a> {
        if !self.node.kind().is_scope() {
            self.unexpected("a scope");
        }
        ScopeAssertion {
            scope: self.node,
            context: self.context,
        }
    }

    /// Condition of an `if` or `while`
    pub fn condition<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let condition = match self.node.kind() {
            NodeKind::If { condition, .. } | NodeKind::While { condition, .. } => *condition,
            _ => self.unexpected("If or While"),
        };
        self.child(condition, "condition", assertion);
        self
    }

    /// Body scope of a control-flow construct or function definition
    pub fn body<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(ScopeAssertion<'a>) -> R,
    {
        let body = match self.node.kind() {
            NodeKind::If { body, .. }
            | NodeKind::For { body, .. }
            | NodeKind::While { body, .. }
            | NodeKind::Repeat { body, .. }
            | NodeKind::FunctionDefinition { body, .. } => *body,
            _ => self.unexpected("a construct with a body"),
        };
        self.child(body, "body", |body| assertion(body.assert_scope()));
        self
    }

    pub fn no_body(self) -> Self {
        match self.node.kind() {
            NodeKind::If { body, .. }
            | NodeKind::For { body, .. }
            | NodeKind::While { body, .. }
            | NodeKind::Repeat { body, .. }
            | NodeKind::FunctionDefinition { body, .. } => assert!(
                body.is_none(),
                "{}: Expected no body, found {:?}",
                self.context,
                body.map(|id| self.node.root().node(id).text())
            ),
            _ => self.unexpected("a construct with a body"),
        }
        self
    }

    pub fn else_body<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(ScopeAssertion<'a>) -> R,
    {
        let else_body = match self.node.kind() {
            NodeKind::If { else_body, .. } => *else_body,
            _ => self.unexpected("If"),
        };
        self.child(else_body, "else", |body| assertion(body.assert_scope()));
        self
    }

    pub fn no_else(self) -> Self {
        match self.node.kind() {
            NodeKind::If { else_keyword, .. } => assert!(
                else_keyword.is_none(),
                "{}: Expected no else branch",
                self.context
            ),
            _ => self.unexpected("If"),
        }
        self
    }

    /// Loop variable of a `for`
    pub fn variable<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let variable = match self.node.kind() {
            NodeKind::For { variable, .. } => *variable,
            _ => self.unexpected("For"),
        };
        self.child(variable, "variable", assertion);
        self
    }

    pub fn sequence<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let sequence = match self.node.kind() {
            NodeKind::For { sequence, .. } => *sequence,
            _ => self.unexpected("For"),
        };
        self.child(sequence, "sequence", assertion);
        self
    }

    /// Called expression of a call
    pub fn function<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let function = match self.node.kind() {
            NodeKind::Call { function, .. } => *function,
            _ => self.unexpected("Call"),
        };
        self.child(Some(function), "function", assertion);
        self
    }

    /// Indexed expression of `x[...]` or `x[[...]]`
    pub fn target<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let target = match self.node.kind() {
            NodeKind::Index { target, .. } => *target,
            _ => self.unexpected("Index"),
        };
        self.child(Some(target), "target", assertion);
        self
    }

    /// Expression inside `( )`
    pub fn inner<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let expression = match self.node.kind() {
            NodeKind::Group { expression, .. } => *expression,
            _ => self.unexpected("Group"),
        };
        self.child(expression, "inner", assertion);
        self
    }

    fn arguments(&self) -> Vec<NodeId> {
        let list = match self.node.kind() {
            NodeKind::Call { arguments, .. } | NodeKind::Index { arguments, .. } => {
                Some(*arguments)
            }
            NodeKind::FunctionDefinition { formals, .. } => *formals,
            _ => self.unexpected("Call, Index or FunctionDefinition"),
        };
        match list.map(|id| self.node.root().kind(id)) {
            Some(NodeKind::ArgumentList { arguments }) => arguments.clone(),
            _ => Vec::new(),
        }
    }

    /// Number of argument slots, formals for a function definition
    pub fn argument_count(self, expected: usize) -> Self {
        let actual = self.arguments().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} arguments, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn argument<F, R>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let arguments = self.arguments();
        assert!(
            index < arguments.len(),
            "{}: Argument index {} out of bounds ({} arguments)",
            self.context,
            index,
            arguments.len()
        );
        assertion(NodeAssertion {
            node: self.node.root().node(arguments[index]),
            context: format!("{}.arguments[{}]", self.context, index),
        });
        self
    }

    /// Name of an argument written `name = value`
    pub fn named(self, expected: &str) -> Self {
        match self.node.kind() {
            NodeKind::Argument { name: Some(name), .. } => {
                let name = self.node.root().node(*name);
                TextMatch::Exact(expected.to_string()).assert(name.text(), &self.context);
            }
            NodeKind::Argument { name: None, .. } => panic!(
                "{}: Expected argument named {:?}, found a positional one",
                self.context, expected
            ),
            _ => self.unexpected("Argument"),
        }
        self
    }

    pub fn value<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let value = match self.node.kind() {
            NodeKind::Argument { value, .. } => *value,
            _ => self.unexpected("Argument"),
        };
        self.child(value, "value", assertion);
        self
    }

    pub fn no_value(self) -> Self {
        match self.node.kind() {
            NodeKind::Argument { value, .. } => assert!(
                value.is_none(),
                "{}: Expected an empty argument, found {:?}",
                self.context,
                self.node.text()
            ),
            _ => self.unexpected("Argument"),
        }
        self
    }
}

// ============================================================================
// Operators
// ============================================================================

pub struct OperatorAssertion<'a> {
    operator: &'a OperatorNode,
    node: NodeRef<'a>,
    context: String,
}

impl<'a> OperatorAssertion<'a> {
    pub fn op(self, expected: OperatorType) -> Self {
        assert_eq!(
            self.operator.op, expected,
            "{}: Expected operator {}, found {} in {:?}",
            self.context,
            expected,
            self.operator.op,
            self.node.text()
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.node.text(), &self.context);
        self
    }

    fn operand<F, R>(&self, id: Option<NodeId>, side: &str, assertion: F)
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let id = id.unwrap_or_else(|| {
            panic!(
                "{}: Expected a {} operand for {}, found none",
                self.context, side, self.operator.op
            )
        });
        assertion(NodeAssertion {
            node: self.node.root().node(id),
            context: format!("{}.{}", self.context, side),
        });
    }

    pub fn left<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        self.operand(self.operator.left, "left", assertion);
        self
    }

    pub fn right<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        self.operand(self.operator.right, "right", assertion);
        self
    }

    /// Assert the operator is missing an operand it needs
    pub fn incomplete(self) -> Self {
        assert!(
            !self.operator.is_complete(),
            "{}: Expected {} to miss an operand in {:?}",
            self.context,
            self.operator.op,
            self.node.text()
        );
        self
    }
}

// ============================================================================
// Scopes
// ============================================================================

pub struct ScopeAssertion<'a> {
    scope: NodeRef<'a>,
    context: String,
}

impl<'a> ScopeAssertion<'a> {
    /// Assert the scope is delimited by `{ }`
    pub fn braced(self) -> Self {
        assert!(
            matches!(self.scope.kind(), NodeKind::Scope { .. }),
            "{}: Expected a braced scope, found {}",
            self.context,
            self.scope.kind().name()
        );
        self
    }

    /// Assert the scope is a single statement without braces
    pub fn simple(self) -> Self {
        assert!(
            matches!(self.scope.kind(), NodeKind::SimpleScope { .. }),
            "{}: Expected a simple scope, found {}",
            self.context,
            self.scope.kind().name()
        );
        self
    }

    /// Assert a braced scope has (or lacks) its closing `}`
    pub fn closed(self, expected: bool) -> Self {
        match self.scope.kind() {
            NodeKind::Scope { close_curly, .. } => assert_eq!(
                close_curly.is_some(),
                expected,
                "{}: Expected the scope {} a closing brace",
                self.context,
                if expected { "to have" } else { "to lack" }
            ),
            other => panic!(
                "{}: Expected a braced scope, found {}",
                self.context,
                other.name()
            ),
        }
        self
    }

    pub fn statement_count(self, expected: usize) -> Self {
        let statements = self.scope.statements();
        assert_eq!(
            statements.len(),
            expected,
            "{}: Expected {} statements, found {}: [{}]",
            self.context,
            expected,
            statements.len(),
            summarize(&statements)
        );
        self
    }

    fn nth_statement(&self, index: usize) -> (NodeRef<'a>, String) {
        let statements = self.scope.statements();
        assert!(
            index < statements.len(),
            "{}: Statement index {} out of bounds (scope has {} statements)",
            self.context,
            index,
            statements.len()
        );
        (
            statements[index],
            format!("{}.statements[{}]", self.context, index),
        )
    }

    /// Assert on the expression of a statement in this scope
    pub fn statement<F, R>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let (statement, context) = self.nth_statement(index);
        let node = expression_of(statement, &context);
        assertion(NodeAssertion { node, context });
        self
    }

    /// Assert on the `Statement` node itself, separator included
    pub fn statement_node<F, R>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let (node, context) = self.nth_statement(index);
        assertion(NodeAssertion { node, context });
        self
    }
}
