//! Expressions
//!
//!     Layers, loosest first:
//!
//!         binary     precedence climbing over every infix operator
//!         unary      prefix `-`, `+`, `!`, `~`, `?`
//!         postfix    calls `f(...)`, indexing `x[...]` `x[[...]]`, accessors `$ @ :: :::`
//!         primary    literals, identifiers, `( ... )`, `{ ... }`, keyword constructs
//!
//!     Precedence climbing: after an operand, an infix operator is taken when its
//!     precedence is at least the current minimum. Its right operand is parsed with the
//!     minimum raised past the operator for left association and kept at the operator for
//!     right association, which is what makes `1 - 2 - 3` fold left and `a <- b <- c` fold
//!     right. A prefix operator parses its operand at its own precedence, so `-2^2` is
//!     `-(2^2)` and `!a == b` is `!(a == b)`.
//!
//!     Line breaks after an infix or prefix operator continue the expression. Anywhere else
//!     outside parentheses and brackets they end it.
//!
//!     Past [MAX_NESTING_DEPTH](super::context::MAX_NESTING_DEPTH) levels the parser stops
//!     descending and records `NestingTooDeep` instead.
//!
//!     Every function here returns `None` only when it consumed nothing.

use super::context::ParseContext;
use super::error::ParseErrorType;
use super::helpers::{
    covering_range, parse_close_brace_sequence, parse_close_delimiter, parse_token,
    terminating_token_kind,
};
use super::scope::parse_scope;
use super::statements::parse_keyword_construct;
use crate::r::ast::{Association, AstRoot, NodeId, NodeKind, OperatorNode, OperatorType};
use crate::r::text::TextRange;
use crate::r::token::{Token, TokenKind};

/// How the items of an argument list are read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentStyle {
    /// `f(x, name = value, , ...)`: any expression, optionally named
    Call,
    /// `function(x, y = default, ...)`: an identifier with an optional default
    Formals,
}

pub fn parse_expression(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> Option<NodeId> {
    parse_binary(ctx, ast, 0)
}

fn parse_binary(
    ctx: &mut ParseContext<'_>,
    ast: &mut AstRoot,
    min_precedence: u32,
) -> Option<NodeId> {
    if ctx.nesting_limit_reached() {
        return parse_too_deep(ctx, ast);
    }
    ctx.with_nesting(|ctx| parse_binary_operators(ctx, ast, min_precedence))
}

fn parse_binary_operators(
    ctx: &mut ParseContext<'_>,
    ast: &mut AstRoot,
    min_precedence: u32,
) -> Option<NodeId> {
    let mut left = parse_unary(ctx, ast)?;

    loop {
        let token = ctx.current();
        let Some(op) = infix_operator(ctx, token) else {
            break;
        };
        let precedence = op.precedence();
        if precedence < min_precedence {
            break;
        }

        let operator = parse_token(ctx, ast);
        ctx.skip_line_breaks();

        let right_precedence = match op.association() {
            Association::Left => precedence + 1,
            Association::Right => precedence,
        };
        let right = parse_binary(ctx, ast, right_precedence);
        if right.is_none() {
            let token = ctx.current();
            ctx.add_error(ParseErrorType::OperandExpected, token);
        }

        left = add_operator(ast, op, operator, Some(left), right);
    }

    Some(left)
}

/// Stand-in for an expression below the nesting limit
///
/// The current token becomes a leaf. When it opens a bracket or a block, everything up to
/// the matching close is skipped, so the enclosing levels resume at a token they expect.
fn parse_too_deep(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> Option<NodeId> {
    let token = ctx.current();
    if token.kind.is_closing_delimiter()
        || matches!(
            token.kind,
            TokenKind::EndOfStream
                | TokenKind::LineBreak
                | TokenKind::Semicolon
                | TokenKind::Comma
        )
    {
        return None;
    }

    ctx.add_error(ParseErrorType::NestingTooDeep, token);
    let leaf = parse_token(ctx, ast);

    let mut open = usize::from(token.kind.is_opening_delimiter());
    while open > 0 {
        let token = ctx.current();
        if token.kind == TokenKind::EndOfStream {
            break;
        }
        if token.kind.is_opening_delimiter() {
            open += 1;
        } else if token.kind.is_closing_delimiter() {
            open -= 1;
        }
        ctx.advance();
    }

    Some(leaf)
}

/// Infix operator kind of `token`, accessors excluded (they belong to the postfix chain)
fn infix_operator(ctx: &ParseContext<'_>, token: Token) -> Option<OperatorType> {
    if token.kind != TokenKind::Operator {
        return None;
    }
    OperatorType::binary_from_text(ctx.token_text(token)).filter(|op| !op.is_postfix_accessor())
}

fn parse_unary(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> Option<NodeId> {
    let token = ctx.current();
    let prefix = match token.kind {
        TokenKind::Operator => OperatorType::unary_from_text(ctx.token_text(token)),
        _ => None,
    };

    let Some(op) = prefix else {
        return parse_postfix(ctx, ast);
    };

    let operator = parse_token(ctx, ast);
    ctx.skip_line_breaks();
    let operand = parse_binary(ctx, ast, op.precedence());
    if operand.is_none() {
        let token = ctx.current();
        ctx.add_error(ParseErrorType::OperandExpected, token);
    }
    Some(add_operator(ast, op, operator, None, operand))
}

fn parse_postfix(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> Option<NodeId> {
    let mut expression = parse_primary(ctx, ast)?;

    loop {
        let token = ctx.current();
        expression = match token.kind {
            TokenKind::OpenBrace => parse_call(ctx, ast, expression),
            TokenKind::OpenSquareBracket | TokenKind::OpenDoubleSquareBracket => {
                parse_index(ctx, ast, expression)
            }
            TokenKind::Operator => match OperatorType::binary_from_text(ctx.token_text(token)) {
                Some(op) if op.is_postfix_accessor() => parse_accessor(ctx, ast, expression, op),
                _ => break,
            },
            _ => break,
        };
    }

    Some(expression)
}

fn parse_primary(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> Option<NodeId> {
    let token = ctx.current();
    match token.kind {
        kind if kind.is_literal() => Some(parse_token(ctx, ast)),
        TokenKind::Identifier => Some(parse_token(ctx, ast)),
        TokenKind::OpenBrace => Some(parse_group(ctx, ast)),
        TokenKind::OpenCurlyBrace => parse_scope(ctx, ast, false),
        TokenKind::Keyword => parse_keyword_construct(ctx, ast),
        _ => None,
    }
}

fn parse_group(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> NodeId {
    let open_brace = parse_token(ctx, ast);

    let (expression, close_brace) = ctx.with_line_breaks_ignored(true, |ctx| {
        let expression = parse_expression(ctx, ast);
        if expression.is_none() {
            let token = ctx.current();
            ctx.add_error(ParseErrorType::OperandExpected, token);
        }
        let close_brace = parse_close_brace_sequence(ctx, ast);
        (expression, close_brace)
    });

    let range = covering_range(ast, [Some(open_brace), expression, close_brace])
        .unwrap_or_else(|| ast.range(open_brace));
    ast.add_node(
        NodeKind::Group {
            open_brace,
            expression,
            close_brace,
        },
        range,
    )
}

fn parse_call(ctx: &mut ParseContext<'_>, ast: &mut AstRoot, function: NodeId) -> NodeId {
    let open = ctx.current();
    let open_brace = parse_token(ctx, ast);

    let (arguments, close_brace) = ctx.with_line_breaks_ignored(true, |ctx| {
        let arguments = parse_argument_list(ctx, ast, ArgumentStyle::Call, open.kind, open.end());
        let close_brace = parse_close_delimiter(ctx, ast, open.kind);
        (arguments, close_brace)
    });

    let range = covering_range(ast, [Some(function), Some(open_brace), close_brace])
        .unwrap_or_else(|| ast.range(function))
        .union(ast.range(arguments));
    ast.add_node(
        NodeKind::Call {
            function,
            open_brace,
            arguments,
            close_brace,
        },
        range,
    )
}

fn parse_index(ctx: &mut ParseContext<'_>, ast: &mut AstRoot, target: NodeId) -> NodeId {
    let open = ctx.current();
    let open_bracket = parse_token(ctx, ast);

    let (arguments, close_bracket) = ctx.with_line_breaks_ignored(true, |ctx| {
        let arguments = parse_argument_list(ctx, ast, ArgumentStyle::Call, open.kind, open.end());
        let close_bracket = parse_close_delimiter(ctx, ast, open.kind);
        (arguments, close_bracket)
    });

    let range = covering_range(ast, [Some(target), Some(open_bracket), close_bracket])
        .unwrap_or_else(|| ast.range(target))
        .union(ast.range(arguments));
    ast.add_node(
        NodeKind::Index {
            target,
            open_bracket,
            arguments,
            close_bracket,
        },
        range,
    )
}

/// `x$name`, `x@slot`, `pkg::name`
fn parse_accessor(
    ctx: &mut ParseContext<'_>,
    ast: &mut AstRoot,
    target: NodeId,
    op: OperatorType,
) -> NodeId {
    let operator = parse_token(ctx, ast);
    let token = ctx.current();
    let member = match token.kind {
        TokenKind::Identifier | TokenKind::String => Some(parse_token(ctx, ast)),
        _ => {
            ctx.add_error(ParseErrorType::IdentifierExpected, token);
            None
        }
    };
    add_operator(ast, op, operator, Some(target), member)
}

/// Items up to the closer of `open_kind`, which is left for the caller
///
/// `start` positions the list when it is empty.
pub fn parse_argument_list(
    ctx: &mut ParseContext<'_>,
    ast: &mut AstRoot,
    style: ArgumentStyle,
    open_kind: TokenKind,
    start: usize,
) -> NodeId {
    let terminator = terminating_token_kind(open_kind);
    let mut arguments = Vec::new();

    loop {
        let token = ctx.current();
        if token.kind == terminator || token.kind == TokenKind::EndOfStream {
            break;
        }

        let argument = match style {
            ArgumentStyle::Call => parse_argument(ctx, ast),
            ArgumentStyle::Formals => parse_formal(ctx, ast),
        };
        let Some(argument) = argument else {
            break;
        };
        arguments.push(argument);

        let has_comma = matches!(
            ast.kind(argument),
            NodeKind::Argument { comma: Some(_), .. }
        );
        if !has_comma {
            break;
        }
    }

    let range = covering_range(ast, arguments.iter().copied().map(Some))
        .unwrap_or_else(|| TextRange::empty(start));
    ast.add_node(NodeKind::ArgumentList { arguments }, range)
}

fn parse_argument(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> Option<NodeId> {
    let token = ctx.current();
    let named = matches!(
        token.kind,
        TokenKind::Identifier | TokenKind::String | TokenKind::Null
    ) && ctx.is_operator(ctx.peek_next(), "=");

    let (name, equals) = if named {
        let name = parse_token(ctx, ast);
        let equals = parse_token(ctx, ast);
        (Some(name), Some(equals))
    } else {
        (None, None)
    };

    let value = parse_expression(ctx, ast);
    let comma = parse_comma(ctx, ast);
    add_argument(ast, name, equals, value, comma)
}

fn parse_formal(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> Option<NodeId> {
    let token = ctx.current();
    let (name, equals, value) = if token.kind == TokenKind::Identifier {
        let name = parse_token(ctx, ast);
        let next = ctx.current();
        if ctx.is_operator(next, "=") {
            let equals = parse_token(ctx, ast);
            (Some(name), Some(equals), parse_expression(ctx, ast))
        } else {
            (Some(name), None, None)
        }
    } else {
        if token.kind != TokenKind::Comma {
            ctx.add_error(ParseErrorType::IdentifierExpected, token);
        }
        // Keep whatever stands in place of the name so the list can continue
        (None, None, parse_expression(ctx, ast))
    };

    let comma = parse_comma(ctx, ast);
    add_argument(ast, name, equals, value, comma)
}

fn parse_comma(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> Option<NodeId> {
    if ctx.current().kind == TokenKind::Comma {
        Some(parse_token(ctx, ast))
    } else {
        None
    }
}

fn add_argument(
    ast: &mut AstRoot,
    name: Option<NodeId>,
    equals: Option<NodeId>,
    value: Option<NodeId>,
    comma: Option<NodeId>,
) -> Option<NodeId> {
    let range = covering_range(ast, [name, equals, value, comma])?;
    Some(ast.add_node(
        NodeKind::Argument {
            name,
            equals,
            value,
            comma,
        },
        range,
    ))
}

fn add_operator(
    ast: &mut AstRoot,
    op: OperatorType,
    operator: NodeId,
    left: Option<NodeId>,
    right: Option<NodeId>,
) -> NodeId {
    let range = covering_range(ast, [left, Some(operator), right])
        .unwrap_or_else(|| ast.range(operator));
    ast.add_node(
        NodeKind::Operator(OperatorNode {
            op,
            operator,
            left,
            right,
        }),
        range,
    )
}
