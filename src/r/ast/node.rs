//! Syntax node kinds
//!
//!     Nodes live in the arena owned by [AstRoot](super::root::AstRoot) and refer to each
//!     other through [NodeId]s. A node's kind lists its children in source order; the parent
//!     link is filled in once the whole tree has been built.
//!
//!     Optional children are `None` when the input did not provide them (an `if` without its
//!     `(`, a scope whose `}` never came). The error list says why; the tree keeps whatever
//!     did parse.

use super::operators::{Association, OperatorType};
use crate::r::text::TextRange;
use crate::r::token::{Token, TokenKind};
use serde::Serialize;
use std::fmt;

/// Index of a node in its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub range: TextRange,
    /// `None` only for the root
    pub parent: Option<NodeId>,
}

/// Operator application. Prefix operators leave `left` empty.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorNode {
    pub op: OperatorType,
    pub operator: NodeId,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl OperatorNode {
    pub fn precedence(&self) -> u32 {
        self.op.precedence()
    }

    pub fn association(&self) -> Association {
        self.op.association()
    }

    pub fn is_unary(&self) -> bool {
        self.op.is_unary()
    }

    /// Whether every operand slot the arity calls for is filled
    pub fn is_complete(&self) -> bool {
        if self.is_unary() {
            self.left.is_none() && self.right.is_some()
        } else {
            self.left.is_some() && self.right.is_some()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Root {
        global_scope: Option<NodeId>,
    },
    /// Leaf wrapping exactly one token
    Token(Token),
    GlobalScope {
        statements: Vec<NodeId>,
    },
    /// `{ ... }`
    Scope {
        open_curly: NodeId,
        statements: Vec<NodeId>,
        close_curly: Option<NodeId>,
    },
    /// Body without braces, as in `if (x) y`
    SimpleScope {
        statement: NodeId,
    },
    Statement {
        expression: NodeId,
        semicolon: Option<NodeId>,
    },
    Operator(OperatorNode),
    /// `( expression )`
    Group {
        open_brace: NodeId,
        expression: Option<NodeId>,
        close_brace: Option<NodeId>,
    },
    Call {
        function: NodeId,
        open_brace: NodeId,
        arguments: NodeId,
        close_brace: Option<NodeId>,
    },
    /// `x[...]` or `x[[...]]`
    Index {
        target: NodeId,
        open_bracket: NodeId,
        arguments: NodeId,
        close_bracket: Option<NodeId>,
    },
    ArgumentList {
        arguments: Vec<NodeId>,
    },
    /// One slot of an argument or formal list; every part may be missing (`f(, 1)`)
    Argument {
        name: Option<NodeId>,
        equals: Option<NodeId>,
        value: Option<NodeId>,
        comma: Option<NodeId>,
    },
    FunctionDefinition {
        keyword: NodeId,
        open_brace: Option<NodeId>,
        formals: Option<NodeId>,
        close_brace: Option<NodeId>,
        body: Option<NodeId>,
    },
    If {
        keyword: NodeId,
        open_brace: Option<NodeId>,
        condition: Option<NodeId>,
        close_brace: Option<NodeId>,
        body: Option<NodeId>,
        else_keyword: Option<NodeId>,
        else_body: Option<NodeId>,
    },
    For {
        keyword: NodeId,
        open_brace: Option<NodeId>,
        variable: Option<NodeId>,
        in_keyword: Option<NodeId>,
        sequence: Option<NodeId>,
        close_brace: Option<NodeId>,
        body: Option<NodeId>,
    },
    While {
        keyword: NodeId,
        open_brace: Option<NodeId>,
        condition: Option<NodeId>,
        close_brace: Option<NodeId>,
        body: Option<NodeId>,
    },
    Repeat {
        keyword: NodeId,
        body: Option<NodeId>,
    },
    Break {
        keyword: NodeId,
    },
    Next {
        keyword: NodeId,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root { .. } => "Root",
            NodeKind::Token(_) => "Token",
            NodeKind::GlobalScope { .. } => "GlobalScope",
            NodeKind::Scope { .. } => "Scope",
            NodeKind::SimpleScope { .. } => "SimpleScope",
            NodeKind::Statement { .. } => "Statement",
            NodeKind::Operator(_) => "Operator",
            NodeKind::Group { .. } => "Group",
            NodeKind::Call { .. } => "Call",
            NodeKind::Index { .. } => "Index",
            NodeKind::ArgumentList { .. } => "ArgumentList",
            NodeKind::Argument { .. } => "Argument",
            NodeKind::FunctionDefinition { .. } => "FunctionDefinition",
            NodeKind::If { .. } => "If",
            NodeKind::For { .. } => "For",
            NodeKind::While { .. } => "While",
            NodeKind::Repeat { .. } => "Repeat",
            NodeKind::Break { .. } => "Break",
            NodeKind::Next { .. } => "Next",
        }
    }

    /// Child ids in source order
    pub fn children(&self) -> Vec<NodeId> {
        let slots: Vec<Option<NodeId>> = match self {
            NodeKind::Root { global_scope } => vec![*global_scope],
            NodeKind::Token(_) => Vec::new(),
            NodeKind::GlobalScope { statements }
            | NodeKind::ArgumentList {
                arguments: statements,
            } => statements.iter().copied().map(Some).collect(),
            NodeKind::Scope {
                open_curly,
                statements,
                close_curly,
            } => {
                let mut slots = vec![Some(*open_curly)];
                slots.extend(statements.iter().copied().map(Some));
                slots.push(*close_curly);
                slots
            }
            NodeKind::SimpleScope { statement } => vec![Some(*statement)],
            NodeKind::Statement {
                expression,
                semicolon,
            } => vec![Some(*expression), *semicolon],
            NodeKind::Operator(operator) => {
                vec![operator.left, Some(operator.operator), operator.right]
            }
            NodeKind::Group {
                open_brace,
                expression,
                close_brace,
            } => vec![Some(*open_brace), *expression, *close_brace],
            NodeKind::Call {
                function,
                open_brace,
                arguments,
                close_brace,
            } => vec![
                Some(*function),
                Some(*open_brace),
                Some(*arguments),
                *close_brace,
            ],
            NodeKind::Index {
                target,
                open_bracket,
                arguments,
                close_bracket,
            } => vec![
                Some(*target),
                Some(*open_bracket),
                Some(*arguments),
                *close_bracket,
            ],
            NodeKind::Argument {
                name,
                equals,
                value,
                comma,
            } => vec![*name, *equals, *value, *comma],
            NodeKind::FunctionDefinition {
                keyword,
                open_brace,
                formals,
                close_brace,
                body,
            } => vec![Some(*keyword), *open_brace, *formals, *close_brace, *body],
            NodeKind::If {
                keyword,
                open_brace,
                condition,
                close_brace,
                body,
                else_keyword,
                else_body,
            } => vec![
                Some(*keyword),
                *open_brace,
                *condition,
                *close_brace,
                *body,
                *else_keyword,
                *else_body,
            ],
            NodeKind::For {
                keyword,
                open_brace,
                variable,
                in_keyword,
                sequence,
                close_brace,
                body,
            } => vec![
                Some(*keyword),
                *open_brace,
                *variable,
                *in_keyword,
                *sequence,
                *close_brace,
                *body,
            ],
            NodeKind::While {
                keyword,
                open_brace,
                condition,
                close_brace,
                body,
            } => vec![Some(*keyword), *open_brace, *condition, *close_brace, *body],
            NodeKind::Repeat { keyword, body } => vec![Some(*keyword), *body],
            NodeKind::Break { keyword } | NodeKind::Next { keyword } => vec![Some(*keyword)],
        };
        slots.into_iter().flatten().collect()
    }

    /// Whether the node stands for an expression that produces a value when evaluated
    pub fn is_value_node(&self) -> bool {
        match self {
            NodeKind::Token(token) => {
                token.kind.is_literal() || token.kind == TokenKind::Identifier
            }
            NodeKind::Scope { .. }
            | NodeKind::Operator(_)
            | NodeKind::Group { .. }
            | NodeKind::Call { .. }
            | NodeKind::Index { .. }
            | NodeKind::FunctionDefinition { .. }
            | NodeKind::If { .. }
            | NodeKind::For { .. }
            | NodeKind::While { .. }
            | NodeKind::Repeat { .. } => true,
            NodeKind::Root { .. }
            | NodeKind::GlobalScope { .. }
            | NodeKind::SimpleScope { .. }
            | NodeKind::Statement { .. }
            | NodeKind::ArgumentList { .. }
            | NodeKind::Argument { .. }
            | NodeKind::Break { .. }
            | NodeKind::Next { .. } => false,
        }
    }

    pub fn is_scope(&self) -> bool {
        matches!(
            self,
            NodeKind::GlobalScope { .. } | NodeKind::Scope { .. } | NodeKind::SimpleScope { .. }
        )
    }

    /// Statements of a scope node, empty for anything else
    pub fn statements(&self) -> Vec<NodeId> {
        match self {
            NodeKind::GlobalScope { statements } | NodeKind::Scope { statements, .. } => {
                statements.clone()
            }
            NodeKind::SimpleScope { statement } => vec![*statement],
            _ => Vec::new(),
        }
    }
}
