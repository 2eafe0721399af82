//! Statements and keyword constructs
//!
//! A statement is one expression with an optional trailing `;`. The keyword constructs
//! (`if`, `for`, `while`, `repeat`, `function`, `break`, `next`) are expressions in R and are
//! entered from the expression grammar through [parse_keyword_construct].
//!
//! Construct heads are parsed with line breaks ignored; bodies go through
//! [parse_scope](super::scope::parse_scope) and may be braced or a single statement.

use super::context::ParseContext;
use super::error::ParseErrorType;
use super::expressions::{parse_argument_list, parse_expression, ArgumentStyle};
use super::helpers::{
    covering_range, parse_close_brace_sequence, parse_keyword, parse_open_brace_sequence,
    parse_token, OpenBraceSequence,
};
use super::scope::parse_scope;
use crate::r::ast::{AstRoot, NodeId, NodeKind};
use crate::r::token::TokenKind;

pub fn parse_statement(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> Option<NodeId> {
    let expression = parse_expression(ctx, ast)?;

    let semicolon = if ctx.current().kind == TokenKind::Semicolon {
        Some(parse_token(ctx, ast))
    } else {
        None
    };

    let range = covering_range(ast, [Some(expression), semicolon])?;
    Some(ast.add_node(
        NodeKind::Statement {
            expression,
            semicolon,
        },
        range,
    ))
}

/// Parse the construct introduced by the current keyword
///
/// Returns `None` without consuming anything for keywords that cannot start an
/// expression (`else`, `in`).
pub fn parse_keyword_construct(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> Option<NodeId> {
    let token = ctx.current();
    let node = match ctx.token_text(token) {
        "if" => parse_if(ctx, ast),
        "for" => parse_for(ctx, ast),
        "while" => parse_while(ctx, ast),
        "repeat" => parse_repeat(ctx, ast),
        "function" => parse_function(ctx, ast),
        "break" => {
            let keyword = parse_keyword(ctx, ast);
            ast.add_node(NodeKind::Break { keyword }, token.range())
        }
        "next" => {
            let keyword = parse_keyword(ctx, ast);
            ast.add_node(NodeKind::Next { keyword }, token.range())
        }
        _ => return None,
    };
    Some(node)
}

/// `( expression )` of an `if` or `while` head, the `(` already consumed
fn parse_condition(
    ctx: &mut ParseContext<'_>,
    ast: &mut AstRoot,
) -> (Option<NodeId>, Option<NodeId>) {
    ctx.with_line_breaks_ignored(true, |ctx| {
        let condition = parse_expression(ctx, ast);
        if condition.is_none() {
            let token = ctx.current();
            ctx.add_error(ParseErrorType::OperandExpected, token);
        }
        let close_brace = parse_close_brace_sequence(ctx, ast);
        (condition, close_brace)
    })
}

fn parse_if(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> NodeId {
    let OpenBraceSequence {
        keyword,
        open_brace,
    } = parse_open_brace_sequence(ctx, ast);
    let (condition, close_brace) = match open_brace {
        Some(_) => parse_condition(ctx, ast),
        None => (None, None),
    };
    let body = parse_scope(ctx, ast, true);

    let (else_keyword, else_body) = if at_else(ctx) {
        let else_keyword = parse_keyword(ctx, ast);
        (Some(else_keyword), parse_scope(ctx, ast, true))
    } else {
        (None, None)
    };

    let range = covering_range(
        ast,
        [
            Some(keyword),
            open_brace,
            condition,
            close_brace,
            body,
            else_keyword,
            else_body,
        ],
    )
    .unwrap_or_else(|| ast.range(keyword));
    ast.add_node(
        NodeKind::If {
            keyword,
            open_brace,
            condition,
            close_brace,
            body,
            else_keyword,
            else_body,
        },
        range,
    )
}

/// Whether an `else` continues the `if` just parsed
///
/// At top level a line break ends the `if`; inside braces or parentheses the `else` may
/// sit on a following line.
fn at_else(ctx: &mut ParseContext<'_>) -> bool {
    let look_past_line_breaks = ctx.in_braces() || ctx.line_breaks_ignored();
    let token = if look_past_line_breaks {
        ctx.next_non_line_break()
    } else {
        ctx.current()
    };

    if !ctx.is_keyword(token, "else") {
        return false;
    }
    ctx.skip_line_breaks();
    true
}

fn parse_for(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> NodeId {
    let OpenBraceSequence {
        keyword,
        open_brace,
    } = parse_open_brace_sequence(ctx, ast);

    let (variable, in_keyword, sequence, close_brace) = match open_brace {
        Some(_) => ctx.with_line_breaks_ignored(true, |ctx| {
            let token = ctx.current();
            let variable = if token.kind == TokenKind::Identifier {
                Some(parse_token(ctx, ast))
            } else {
                ctx.add_error(ParseErrorType::IdentifierExpected, token);
                None
            };

            let token = ctx.current();
            let in_keyword = if ctx.is_keyword(token, "in") {
                Some(parse_keyword(ctx, ast))
            } else {
                ctx.add_error(ParseErrorType::InKeywordExpected, token);
                None
            };

            let sequence = parse_expression(ctx, ast);
            if sequence.is_none() {
                let token = ctx.current();
                ctx.add_error(ParseErrorType::OperandExpected, token);
            }

            let close_brace = parse_close_brace_sequence(ctx, ast);
            (variable, in_keyword, sequence, close_brace)
        }),
        None => (None, None, None, None),
    };
    let body = parse_scope(ctx, ast, true);

    let range = covering_range(
        ast,
        [
            Some(keyword),
            open_brace,
            variable,
            in_keyword,
            sequence,
            close_brace,
            body,
        ],
    )
    .unwrap_or_else(|| ast.range(keyword));
    ast.add_node(
        NodeKind::For {
            keyword,
            open_brace,
            variable,
            in_keyword,
            sequence,
            close_brace,
            body,
        },
        range,
    )
}

fn parse_while(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> NodeId {
    let OpenBraceSequence {
        keyword,
        open_brace,
    } = parse_open_brace_sequence(ctx, ast);
    let (condition, close_brace) = match open_brace {
        Some(_) => parse_condition(ctx, ast),
        None => (None, None),
    };
    let body = parse_scope(ctx, ast, true);

    let range = covering_range(
        ast,
        [Some(keyword), open_brace, condition, close_brace, body],
    )
    .unwrap_or_else(|| ast.range(keyword));
    ast.add_node(
        NodeKind::While {
            keyword,
            open_brace,
            condition,
            close_brace,
            body,
        },
        range,
    )
}

fn parse_repeat(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> NodeId {
    let keyword = parse_keyword(ctx, ast);
    let body = parse_scope(ctx, ast, true);
    let range = covering_range(ast, [Some(keyword), body]).unwrap_or_else(|| ast.range(keyword));
    ast.add_node(NodeKind::Repeat { keyword, body }, range)
}

fn parse_function(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> NodeId {
    let OpenBraceSequence {
        keyword,
        open_brace,
    } = parse_open_brace_sequence(ctx, ast);

    let (formals, close_brace) = match open_brace {
        Some(open) => ctx.with_line_breaks_ignored(true, |ctx| {
            let start = ast.range(open).end;
            let formals = parse_argument_list(
                ctx,
                ast,
                ArgumentStyle::Formals,
                TokenKind::OpenBrace,
                start,
            );
            let close_brace = parse_close_brace_sequence(ctx, ast);
            (Some(formals), close_brace)
        }),
        None => (None, None),
    };
    let body = parse_scope(ctx, ast, true);

    let range = covering_range(
        ast,
        [Some(keyword), open_brace, formals, close_brace, body],
    )
    .unwrap_or_else(|| ast.range(keyword));
    ast.add_node(
        NodeKind::FunctionDefinition {
            keyword,
            open_brace,
            formals,
            close_brace,
            body,
        },
        range,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r::parsing::parse;

    fn first_expression(ast: &AstRoot) -> &NodeKind {
        let statement = ast.statements()[0];
        match statement.kind() {
            NodeKind::Statement { expression, .. } => ast.kind(*expression),
            other => panic!("expected a statement, found {}", other.name()),
        }
    }

    #[test]
    fn test_if_else() {
        let (ast, errors) = parse("if (x) y else z");
        assert!(errors.is_empty(), "{:?}", errors);
        match first_expression(&ast) {
            NodeKind::If {
                condition,
                body,
                else_body,
                ..
            } => {
                assert_eq!(ast.node(condition.unwrap()).text(), "x");
                assert_eq!(ast.node(body.unwrap()).text(), "y");
                assert_eq!(ast.node(else_body.unwrap()).text(), "z");
            }
            other => panic!("expected If, found {}", other.name()),
        }
    }

    #[test]
    fn test_else_on_next_line_at_top_level_is_separate() {
        let (ast, errors) = parse("if (x) y\nelse z");
        match first_expression(&ast) {
            NodeKind::If { else_keyword, .. } => assert!(else_keyword.is_none()),
            other => panic!("expected If, found {}", other.name()),
        }
        assert_eq!(errors[0].error_type, ParseErrorType::UnexpectedToken);
    }

    #[test]
    fn test_else_on_next_line_inside_braces() {
        let (ast, errors) = parse("{\n  if (x) y\n  else z\n}");
        assert!(errors.is_empty(), "{:?}", errors);
        let scope = ast.node_at(2);
        assert_eq!(scope.kind().name(), "Scope");
        assert_eq!(scope.statements().len(), 1);
    }

    #[test]
    fn test_for_loop() {
        let (ast, errors) = parse("for (i in 1:10) {\n  print(i)\n}");
        assert!(errors.is_empty(), "{:?}", errors);
        match first_expression(&ast) {
            NodeKind::For {
                variable,
                sequence,
                body,
                ..
            } => {
                assert_eq!(ast.node(variable.unwrap()).text(), "i");
                assert_eq!(ast.node(sequence.unwrap()).text(), "1:10");
                assert_eq!(ast.node(body.unwrap()).kind().name(), "Scope");
            }
            other => panic!("expected For, found {}", other.name()),
        }
    }

    #[test]
    fn test_for_without_in() {
        let (_, errors) = parse("for (i 1:10) i");
        let types: Vec<_> = errors.iter().map(|e| e.error_type).collect();
        assert_eq!(types, vec![ParseErrorType::InKeywordExpected]);
    }

    #[test]
    fn test_while_without_open_brace() {
        let (ast, errors) = parse("while x");
        assert_eq!(errors[0].error_type, ParseErrorType::OpenBraceExpected);
        match first_expression(&ast) {
            NodeKind::While {
                open_brace,
                condition,
                body,
                ..
            } => {
                assert!(open_brace.is_none());
                assert!(condition.is_none());
                assert_eq!(ast.node(body.unwrap()).text(), "x");
            }
            other => panic!("expected While, found {}", other.name()),
        }
    }

    #[test]
    fn test_repeat_break_next() {
        let (ast, errors) = parse("repeat {\n  next\n  break\n}");
        assert!(errors.is_empty(), "{:?}", errors);
        match first_expression(&ast) {
            NodeKind::Repeat { body, .. } => {
                let body = ast.node(body.unwrap());
                let names: Vec<&str> = body
                    .statements()
                    .iter()
                    .map(|statement| statement.children()[0].kind().name())
                    .collect();
                assert_eq!(names, vec!["Next", "Break"]);
            }
            other => panic!("expected Repeat, found {}", other.name()),
        }
    }

    #[test]
    fn test_function_definition() {
        let (ast, errors) = parse("function(x, y = 2, ...) x + y");
        assert!(errors.is_empty(), "{:?}", errors);
        match first_expression(&ast) {
            NodeKind::FunctionDefinition { formals, body, .. } => {
                let formals = ast.node(formals.unwrap());
                assert_eq!(formals.children().len(), 3);
                assert_eq!(ast.node(body.unwrap()).kind().name(), "SimpleScope");
            }
            other => panic!("expected FunctionDefinition, found {}", other.name()),
        }
    }

    #[test]
    fn test_else_alone_is_not_a_statement() {
        let (ast, errors) = parse("else");
        assert!(ast.statements().is_empty());
        assert_eq!(errors.len(), 1);
    }
}
