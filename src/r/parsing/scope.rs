//! Scopes
//!
//!     Three entry policies, chosen by the calling production:
//!
//!     1. `{` opens a braced scope: statements up to the matching `}`.
//!     2. Otherwise, when the caller allows it, a simple scope: exactly one statement, no
//!        delimiters (`if (x) y`).
//!     3. Otherwise `OpenCurlyBraceExpected` is recorded and no scope is produced.
//!
//!     The global scope is the implicit outermost one. It takes statements until the end of
//!     the stream and never fails: a statement that cannot be parsed is reported and
//!     skipped up to the next line break, `;`, curly brace or end of stream.

use super::context::ParseContext;
use super::error::ParseErrorType;
use super::helpers::{covering_range, is_scope_separator, parse_close_delimiter, parse_token};
use super::statements::parse_statement;
use crate::r::ast::{AstRoot, NodeId, NodeKind};
use crate::r::text::TextRange;
use crate::r::token::TokenKind;
use log::{debug, trace};

/// Parse a construct body
///
/// Line breaks before the body are skipped. Returns `None` when no scope could be built;
/// the reason is on the context's error list.
pub fn parse_scope(
    ctx: &mut ParseContext<'_>,
    ast: &mut AstRoot,
    allows_simple_scope: bool,
) -> Option<NodeId> {
    ctx.skip_line_breaks();
    let token = ctx.current();

    if token.kind == TokenKind::OpenCurlyBrace {
        return Some(parse_braced_scope(ctx, ast));
    }

    if !allows_simple_scope {
        ctx.add_error(ParseErrorType::OpenCurlyBraceExpected, token);
        return None;
    }

    match parse_statement(ctx, ast) {
        Some(statement) => {
            let range = ast.range(statement);
            Some(ast.add_node(NodeKind::SimpleScope { statement }, range))
        }
        None => {
            ctx.add_error(ParseErrorType::StatementExpected, token);
            None
        }
    }
}

fn parse_braced_scope(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> NodeId {
    let open_curly = parse_token(ctx, ast);

    let (statements, close_curly) = ctx.with_braces(|ctx| {
        let statements = parse_statements(ctx, ast, Some(TokenKind::CloseCurlyBrace));
        let close_curly = parse_close_delimiter(ctx, ast, TokenKind::OpenCurlyBrace);
        (statements, close_curly)
    });

    let range = covering_range(
        ast,
        std::iter::once(Some(open_curly))
            .chain(statements.iter().copied().map(Some))
            .chain([close_curly]),
    )
    .unwrap_or_else(|| ast.range(open_curly));

    ast.add_node(
        NodeKind::Scope {
            open_curly,
            statements,
            close_curly,
        },
        range,
    )
}

/// Parse the whole token stream as the program's outermost scope
pub fn parse_global_scope(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> NodeId {
    let statements = parse_statements(ctx, ast, None);
    debug!(
        "global scope: {} statements, {} errors",
        statements.len(),
        ctx.errors().len()
    );
    let range = TextRange::new(0, ctx.text().len());
    ast.add_node(NodeKind::GlobalScope { statements }, range)
}

/// Statements until `terminator` (left unconsumed) or the end of the stream
fn parse_statements(
    ctx: &mut ParseContext<'_>,
    ast: &mut AstRoot,
    terminator: Option<TokenKind>,
) -> Vec<NodeId> {
    let mut statements = Vec::new();

    loop {
        while matches!(
            ctx.current().kind,
            TokenKind::LineBreak | TokenKind::Semicolon
        ) {
            ctx.advance();
        }

        let token = ctx.current();
        if token.kind == TokenKind::EndOfStream || Some(token.kind) == terminator {
            break;
        }

        if token.kind == TokenKind::CloseCurlyBrace {
            // A `}` with nothing to close
            ctx.add_error(ParseErrorType::UnexpectedToken, token);
            ctx.advance();
            continue;
        }

        let Some(statement) = parse_statement(ctx, ast) else {
            ctx.add_error(ParseErrorType::UnexpectedToken, token);
            ctx.advance();
            skip_to_statement_boundary(ctx);
            continue;
        };
        statements.push(statement);

        // A simple body such as `if (x) y;` keeps the `;` in its own statement
        let ends_with_semicolon = matches!(
            ast.kind(statement),
            NodeKind::Statement {
                semicolon: Some(_),
                ..
            }
        ) || ctx
            .tokens()
            .previous_token()
            .is_some_and(|token| token.kind == TokenKind::Semicolon);
        let next = ctx.current();
        let separated = ends_with_semicolon
            || matches!(
                next.kind,
                TokenKind::LineBreak | TokenKind::EndOfStream | TokenKind::CloseCurlyBrace
            );
        if !separated {
            ctx.add_error(ParseErrorType::UnexpectedToken, next);
            skip_to_statement_boundary(ctx);
        }
    }

    statements
}

fn skip_to_statement_boundary(ctx: &mut ParseContext<'_>) {
    loop {
        let token = ctx.current();
        if matches!(
            token.kind,
            TokenKind::LineBreak | TokenKind::Semicolon | TokenKind::EndOfStream
        ) || is_scope_separator(token.kind)
        {
            break;
        }
        trace!("skipping {} at {}", token.kind, token.range());
        ctx.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r::lexing::tokenize_text;

    fn setup(text: &str) -> (ParseContext<'_>, AstRoot) {
        (ParseContext::new(text, tokenize_text(text)), AstRoot::new(text))
    }

    #[test]
    fn test_braced_scope() {
        let (mut ctx, mut ast) = setup("{ a\n b }");
        let scope = parse_scope(&mut ctx, &mut ast, false).unwrap();
        assert_eq!(ast.kind(scope).statements().len(), 2);
        assert_eq!(ast.range(scope), TextRange::new(0, 8));
        assert!(ctx.errors().is_empty());
    }

    #[test]
    fn test_simple_scope() {
        let (mut ctx, mut ast) = setup("\n x + 1");
        let scope = parse_scope(&mut ctx, &mut ast, true).unwrap();
        assert!(matches!(ast.kind(scope), NodeKind::SimpleScope { .. }));
        assert_eq!(ast.node(scope).text(), "x + 1");
    }

    #[test]
    fn test_simple_scope_not_allowed() {
        let (mut ctx, mut ast) = setup("x");
        assert!(parse_scope(&mut ctx, &mut ast, false).is_none());
        assert_eq!(
            ctx.errors()[0].error_type,
            ParseErrorType::OpenCurlyBraceExpected
        );
        // The offending token is left for the caller
        assert_eq!(ctx.current().kind, TokenKind::Identifier);
    }

    #[test]
    fn test_simple_scope_without_statement() {
        let (mut ctx, mut ast) = setup(")");
        assert!(parse_scope(&mut ctx, &mut ast, true).is_none());
        assert_eq!(
            ctx.errors()[0].error_type,
            ParseErrorType::StatementExpected
        );
    }

    #[test]
    fn test_unclosed_scope_ends_at_last_statement() {
        let (mut ctx, mut ast) = setup("{ a\n b");
        let scope = parse_scope(&mut ctx, &mut ast, false).unwrap();
        assert_eq!(ast.range(scope), TextRange::new(0, 6));
        assert_eq!(ctx.errors().len(), 1);
        assert_eq!(
            ctx.errors()[0].error_type,
            ParseErrorType::CloseBraceExpected
        );
        assert_eq!(ctx.errors()[0].token.kind, TokenKind::EndOfStream);
    }

    #[test]
    fn test_global_scope_recovers_at_line_break() {
        let (mut ctx, mut ast) = setup("a\n) ) b\nc");
        let scope = parse_global_scope(&mut ctx, &mut ast);
        let texts: Vec<&str> = ast
            .node(scope)
            .statements()
            .iter()
            .map(|s| s.text())
            .collect();
        assert_eq!(texts, vec!["a", "c"]);
        assert_eq!(ctx.errors().len(), 1);
        assert_eq!(ast.range(scope), TextRange::new(0, 9));
    }

    #[test]
    fn test_stray_close_curly_at_global_level() {
        let (mut ctx, mut ast) = setup("a }\nb");
        let scope = parse_global_scope(&mut ctx, &mut ast);
        assert_eq!(ast.kind(scope).statements().len(), 2);
        assert_eq!(ctx.errors().len(), 1);
        assert_eq!(ctx.errors()[0].token.kind, TokenKind::CloseCurlyBrace);
    }

    #[test]
    fn test_statements_on_one_line_need_separator() {
        let (mut ctx, mut ast) = setup("a b; c; d");
        let scope = parse_global_scope(&mut ctx, &mut ast);
        let texts: Vec<&str> = ast
            .node(scope)
            .statements()
            .iter()
            .map(|s| s.text())
            .collect();
        assert_eq!(texts, vec!["a", "c;", "d"]);
        assert_eq!(ctx.errors()[0].error_type, ParseErrorType::UnexpectedToken);
        assert_eq!(ctx.errors().len(), 1);
    }

    #[test]
    fn test_semicolon_after_simple_body_separates() {
        let (mut ctx, mut ast) = setup("{ while (a) b; c }");
        let scope = parse_scope(&mut ctx, &mut ast, false).unwrap();
        let texts: Vec<&str> = ast
            .node(scope)
            .statements()
            .iter()
            .map(|s| s.text())
            .collect();
        assert_eq!(texts, vec!["while (a) b;", "c"]);
        assert!(ctx.errors().is_empty());
    }
}
