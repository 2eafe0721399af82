//! Shared grammar routines
//!
//! Every production that needs a keyword, a delimiter pair or a plain token goes through
//! these, so delimiter matching and its error reporting live in one place.
//!
//! Two kinds of failure are handled here. Malformed input is recorded on the context and
//! the routine returns `None`. A call that breaks the routine's own contract (a keyword
//! expected where the grammar has not checked for one, a closing kind asked for a token
//! that opens nothing) is a bug in the grammar and panics.

use super::context::ParseContext;
use super::error::ParseErrorType;
use crate::r::ast::{AstRoot, NodeId};
use crate::r::text::TextRange;
use crate::r::token::TokenKind;

/// A construct keyword and the `(` that should follow it
#[derive(Debug, Clone, Copy)]
pub struct OpenBraceSequence {
    pub keyword: NodeId,
    pub open_brace: Option<NodeId>,
}

/// Wrap the current keyword token and advance
///
/// Panics if the current token is not a keyword.
pub fn parse_keyword(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> NodeId {
    let token = ctx.current();
    assert!(
        token.kind == TokenKind::Keyword,
        "expected a keyword at {}, found {}",
        token.range(),
        token.kind
    );
    ctx.advance();
    ast.add_token(token)
}

/// Wrap the current token, whatever it is, and advance
pub fn parse_token(ctx: &mut ParseContext<'_>, ast: &mut AstRoot) -> NodeId {
    let token = ctx.advance();
    ast.add_token(token)
}

/// Keyword followed by `(`, as in `if (`, `for (`, `while (` and `function (`
pub fn parse_open_brace_sequence(
    ctx: &mut ParseContext<'_>,
    ast: &mut AstRoot,
) -> OpenBraceSequence {
    let keyword = parse_keyword(ctx, ast);
    let token = ctx.current();
    let open_brace = if token.kind == TokenKind::OpenBrace {
        Some(parse_token(ctx, ast))
    } else {
        ctx.add_error(ParseErrorType::OpenBraceExpected, token);
        None
    };
    OpenBraceSequence {
        keyword,
        open_brace,
    }
}

/// The `)` closing a construct head
pub fn parse_close_brace_sequence(
    ctx: &mut ParseContext<'_>,
    ast: &mut AstRoot,
) -> Option<NodeId> {
    parse_close_delimiter(ctx, ast, TokenKind::OpenBrace)
}

/// The token closing `open_kind`
///
/// When it is missing the error names the delimiter and the cursor stays on the offending
/// token so the caller can resynchronize on it.
pub fn parse_close_delimiter(
    ctx: &mut ParseContext<'_>,
    ast: &mut AstRoot,
    open_kind: TokenKind,
) -> Option<NodeId> {
    let expected = terminating_token_kind(open_kind);
    let token = ctx.current();
    if token.kind == expected {
        return Some(parse_token(ctx, ast));
    }

    let error_type = match expected {
        TokenKind::CloseSquareBracket => ParseErrorType::CloseSquareBracketExpected,
        TokenKind::CloseDoubleSquareBracket => ParseErrorType::CloseDoubleSquareBracketExpected,
        _ => ParseErrorType::CloseBraceExpected,
    };
    ctx.add_error(error_type, token);
    None
}

/// Closing kind for an opening delimiter kind
///
/// Panics for anything that is not an opening delimiter.
pub fn terminating_token_kind(open_kind: TokenKind) -> TokenKind {
    match open_kind {
        TokenKind::OpenBrace => TokenKind::CloseBrace,
        TokenKind::OpenCurlyBrace => TokenKind::CloseCurlyBrace,
        TokenKind::OpenSquareBracket => TokenKind::CloseSquareBracket,
        TokenKind::OpenDoubleSquareBracket => TokenKind::CloseDoubleSquareBracket,
        other => panic!("{} is not an opening delimiter", other),
    }
}

/// Curly braces delimit scopes; recovery never scans across one
pub fn is_scope_separator(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::OpenCurlyBrace | TokenKind::CloseCurlyBrace)
}

/// Smallest range covering every present node, `None` when all are absent
pub fn covering_range(
    ast: &AstRoot,
    ids: impl IntoIterator<Item = Option<NodeId>>,
) -> Option<TextRange> {
    ids.into_iter()
        .flatten()
        .map(|id| ast.range(id))
        .reduce(TextRange::union)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r::lexing::tokenize_text;
    use rstest::rstest;

    fn setup(text: &str) -> (ParseContext<'_>, AstRoot) {
        (ParseContext::new(text, tokenize_text(text)), AstRoot::new(text))
    }

    #[rstest]
    #[case(TokenKind::OpenBrace, TokenKind::CloseBrace)]
    #[case(TokenKind::OpenCurlyBrace, TokenKind::CloseCurlyBrace)]
    #[case(TokenKind::OpenSquareBracket, TokenKind::CloseSquareBracket)]
    #[case(TokenKind::OpenDoubleSquareBracket, TokenKind::CloseDoubleSquareBracket)]
    fn test_terminating_token_kind(#[case] open: TokenKind, #[case] close: TokenKind) {
        assert_eq!(terminating_token_kind(open), close);
    }

    #[test]
    #[should_panic(expected = "is not an opening delimiter")]
    fn test_terminating_token_kind_rejects_closers() {
        terminating_token_kind(TokenKind::CloseBrace);
    }

    #[test]
    fn test_scope_separators() {
        assert!(is_scope_separator(TokenKind::OpenCurlyBrace));
        assert!(is_scope_separator(TokenKind::CloseCurlyBrace));
        assert!(!is_scope_separator(TokenKind::OpenBrace));
        assert!(!is_scope_separator(TokenKind::LineBreak));
    }

    #[test]
    #[should_panic(expected = "expected a keyword")]
    fn test_parse_keyword_asserts() {
        let (mut ctx, mut ast) = setup("x");
        parse_keyword(&mut ctx, &mut ast);
    }

    #[test]
    fn test_open_brace_sequence() {
        let (mut ctx, mut ast) = setup("while (x)");
        let sequence = parse_open_brace_sequence(&mut ctx, &mut ast);
        assert!(sequence.open_brace.is_some());
        assert_eq!(ast.node(sequence.keyword).text(), "while");
        assert!(ctx.errors().is_empty());
    }

    #[test]
    fn test_missing_open_brace_is_recorded() {
        let (mut ctx, mut ast) = setup("while x");
        let sequence = parse_open_brace_sequence(&mut ctx, &mut ast);
        assert!(sequence.open_brace.is_none());
        assert_eq!(ctx.errors().len(), 1);
        assert_eq!(
            ctx.errors()[0].error_type,
            ParseErrorType::OpenBraceExpected
        );
        assert_eq!(ctx.current().kind, TokenKind::Identifier);
    }

    #[test]
    fn test_missing_close_does_not_advance() {
        let (mut ctx, mut ast) = setup("]");
        assert!(parse_close_brace_sequence(&mut ctx, &mut ast).is_none());
        assert_eq!(ctx.errors()[0].error_type, ParseErrorType::CloseBraceExpected);
        assert_eq!(ctx.current().kind, TokenKind::CloseSquareBracket);

        let close = parse_close_delimiter(&mut ctx, &mut ast, TokenKind::OpenSquareBracket);
        assert!(close.is_some());
        assert_eq!(ctx.current().kind, TokenKind::EndOfStream);
    }

    #[test]
    fn test_delimiter_specific_errors() {
        let (mut ctx, mut ast) = setup(")");
        parse_close_delimiter(&mut ctx, &mut ast, TokenKind::OpenDoubleSquareBracket);
        parse_close_delimiter(&mut ctx, &mut ast, TokenKind::OpenSquareBracket);
        let types: Vec<_> = ctx.errors().iter().map(|e| e.error_type).collect();
        assert_eq!(
            types,
            vec![
                ParseErrorType::CloseDoubleSquareBracketExpected,
                ParseErrorType::CloseSquareBracketExpected
            ]
        );
    }
}
