//! Tree root and node navigation
//!
//!     [AstRoot] owns everything a parse produced: the text snapshot, the node arena, the
//!     comments pulled out of the token stream and the evaluator. Nodes never own each other
//!     directly; parents and children are arena indices, so a node's root is simply the
//!     arena it lives in and upward navigation is a lookup.
//!
//!     [NodeRef] pairs a [NodeId] with its root for read access.

use super::node::{Node, NodeId, NodeKind, OperatorNode};
use crate::r::data_types::RObject;
use crate::r::evaluation::{CodeEvaluator, NullEvaluator};
use crate::r::parsing::scope::parse_global_scope;
use crate::r::parsing::ParseContext;
use crate::r::text::{TextProvider, TextRange, TextStream};
use crate::r::token::Token;
use std::fmt;
use std::sync::Arc;

pub struct AstRoot {
    text: TextStream,
    nodes: Vec<Node>,
    comments: Vec<Token>,
    evaluator: Arc<dyn CodeEvaluator>,
}

impl AstRoot {
    /// The root always occupies the first arena slot
    pub const ROOT: NodeId = NodeId(0);

    /// An empty tree over `text` using the no-op evaluator
    pub fn new(text: impl Into<TextStream>) -> Self {
        Self::with_evaluator(text, Arc::new(NullEvaluator))
    }

    pub fn with_evaluator(text: impl Into<TextStream>, evaluator: Arc<dyn CodeEvaluator>) -> Self {
        let text = text.into();
        let root = Node {
            kind: NodeKind::Root { global_scope: None },
            range: TextRange::new(0, text.len()),
            parent: None,
        };
        Self {
            text,
            nodes: vec![root],
            comments: Vec::new(),
            evaluator,
        }
    }

    /// Build the tree from a fresh parse context
    ///
    /// Comments are extracted first, so no production ever sees one. Never fails: problems
    /// end up in the context's error list.
    pub fn parse(&mut self, context: &mut ParseContext<'_>) {
        context.remove_comment_tokens();

        let global_scope = parse_global_scope(context, self);
        self.nodes[Self::ROOT.0].kind = NodeKind::Root {
            global_scope: Some(global_scope),
        };

        self.comments = context.take_comments();
        self.link_parents();
    }

    fn link_parents(&mut self) {
        for index in 0..self.nodes.len() {
            for child in self.nodes[index].kind.children() {
                self.nodes[child.0].parent = Some(NodeId(index));
            }
        }
    }

    pub(crate) fn add_node(&mut self, kind: NodeKind, range: TextRange) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            range,
            parent: None,
        });
        id
    }

    pub(crate) fn add_token(&mut self, token: Token) -> NodeId {
        self.add_node(NodeKind::Token(token), token.range())
    }

    pub fn text(&self) -> &str {
        self.text.text()
    }

    pub fn text_provider(&self) -> &TextStream {
        &self.text
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Comment tokens ordered by position
    pub fn comments(&self) -> &[Token] {
        &self.comments
    }

    /// The comment covering `offset`, if any
    pub fn comment_at(&self, offset: usize) -> Option<Token> {
        let index = self.comments.partition_point(|c| c.start <= offset);
        index
            .checked_sub(1)
            .map(|i| self.comments[i])
            .filter(|comment| comment.range().contains(offset))
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { root: self, id }
    }

    pub fn root_node(&self) -> NodeRef<'_> {
        self.node(Self::ROOT)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.nodes[id.0].range
    }

    pub fn global_scope(&self) -> Option<NodeRef<'_>> {
        match self.kind(Self::ROOT) {
            NodeKind::Root {
                global_scope: Some(scope),
            } => Some(self.node(*scope)),
            _ => None,
        }
    }

    /// Top level statements
    pub fn statements(&self) -> Vec<NodeRef<'_>> {
        self.global_scope()
            .map(|scope| scope.statements())
            .unwrap_or_default()
    }

    /// Deepest node whose range contains `offset`
    pub fn node_at(&self, offset: usize) -> NodeRef<'_> {
        let mut current = self.root_node();
        while let Some(child) = current
            .children()
            .into_iter()
            .find(|child| child.range().contains(offset))
        {
            current = child;
        }
        current
    }

    /// Value of `id` under the tree's evaluator, `NULL` for nodes that carry no value
    pub fn evaluate(&self, id: NodeId) -> RObject {
        if !self.kind(id).is_value_node() {
            return RObject::Null;
        }
        self.evaluator.evaluate(self, id)
    }
}

impl fmt::Debug for AstRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstRoot")
            .field("nodes", &self.nodes)
            .field("comments", &self.comments)
            .finish_non_exhaustive()
    }
}

/// Read access to one node of a tree
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    root: &'a AstRoot,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'a NodeKind {
        self.root.kind(self.id)
    }

    pub fn range(&self) -> TextRange {
        self.root.range(self.id)
    }

    pub fn root(&self) -> &'a AstRoot {
        self.root
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.root.nodes[self.id.0]
            .parent
            .map(|parent| self.root.node(parent))
    }

    pub fn children(&self) -> Vec<NodeRef<'a>> {
        self.kind()
            .children()
            .into_iter()
            .map(|id| self.root.node(id))
            .collect()
    }

    pub fn statements(&self) -> Vec<NodeRef<'a>> {
        self.kind()
            .statements()
            .into_iter()
            .map(|id| self.root.node(id))
            .collect()
    }

    /// Source text covered by the node
    pub fn text(&self) -> &'a str {
        self.root.text.get_text(self.range())
    }

    pub fn token(&self) -> Option<Token> {
        match self.kind() {
            NodeKind::Token(token) => Some(*token),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<&'a OperatorNode> {
        match self.kind() {
            NodeKind::Operator(operator) => Some(operator),
            _ => None,
        }
    }

    pub fn evaluate(&self) -> RObject {
        self.root.evaluate(self.id)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {} {:?}", self.kind().name(), self.id, self.range(), self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r::parsing::parse;

    #[test]
    fn test_empty_tree() {
        let ast = AstRoot::new("");
        assert_eq!(ast.nodes().len(), 1);
        assert!(ast.global_scope().is_none());
        assert!(ast.statements().is_empty());
    }

    #[test]
    fn test_parents_point_back() {
        let (ast, errors) = parse("x <- f(1)");
        assert!(errors.is_empty());
        for (index, node) in ast.nodes().iter().enumerate() {
            if index == 0 {
                assert!(node.parent.is_none());
                continue;
            }
            let parent = node.parent.expect("every non-root node has a parent");
            assert!(ast.kind(parent).children().contains(&NodeId(index)));
        }
    }

    #[test]
    fn test_node_at_finds_deepest() {
        let text = "x <- foo(1)";
        let (ast, _) = parse(text);
        let node = ast.node_at(6);
        assert_eq!(node.text(), "foo");
        assert!(node.token().is_some());
        assert_eq!(node.parent().unwrap().kind().name(), "Call");
    }

    #[test]
    fn test_comment_at() {
        let (ast, _) = parse("x # one\n# two\ny");
        assert_eq!(ast.comments().len(), 2);
        assert_eq!(ast.comment_at(3).map(|c| c.start), Some(2));
        assert_eq!(ast.comment_at(9).map(|c| c.start), Some(8));
        assert_eq!(ast.comment_at(0), None);
    }
}
