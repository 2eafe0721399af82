//! Parse session state
//!
//!     A [ParseContext] binds the token cursor, the error sink and the source text for the
//!     length of one parse. Whitespace never reaches it, and comments are moved aside by
//!     [ParseContext::remove_comment_tokens] before the first production runs.
//!
//!     Line breaks end statements, except inside parentheses and brackets. The context
//!     tracks which of the two applies: while line breaks are ignored, [ParseContext::current]
//!     steps over them so productions never see one.

use super::error::{ParseError, ParseErrorType};
use crate::r::token::{Token, TokenKind, TokenStream};
use log::trace;

/// How many expressions may enclose one another before the parser stops descending
pub const MAX_NESTING_DEPTH: usize = 128;

pub struct ParseContext<'a> {
    text: &'a str,
    tokens: TokenStream,
    errors: Vec<ParseError>,
    comments: Vec<Token>,
    line_breaks_ignored: bool,
    brace_depth: usize,
    nesting_depth: usize,
}

impl<'a> ParseContext<'a> {
    /// Bind `tokens` (as produced by the lexer for `text`) to a new session
    pub fn new(text: &'a str, tokens: impl IntoIterator<Item = Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|token| token.kind != TokenKind::Whitespace)
            .collect();
        Self {
            text,
            tokens: TokenStream::new(tokens, text.len()),
            errors: Vec::new(),
            comments: Vec::new(),
            line_breaks_ignored: false,
            brace_depth: 0,
            nesting_depth: 0,
        }
    }

    /// Move every comment token out of the stream into the side collection
    ///
    /// Runs before parsing starts and cannot be undone for this session. The cursor is
    /// reset to the first token.
    pub fn remove_comment_tokens(&mut self) {
        let (comments, tokens): (Vec<Token>, Vec<Token>) = self
            .tokens
            .tokens()
            .iter()
            .copied()
            .partition(|token| token.kind == TokenKind::Comment);
        self.comments.extend(comments);
        self.tokens = TokenStream::new(tokens, self.text.len());
    }

    /// Hand the extracted comments over, in source order
    pub fn take_comments(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.comments)
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    pub fn add_error(&mut self, error_type: ParseErrorType, token: Token) {
        trace!("{} at {}", error_type, token.range());
        self.errors.push(ParseError::new(error_type, token));
    }

    /// The token the grammar is looking at
    pub fn current(&mut self) -> Token {
        if self.line_breaks_ignored {
            self.tokens.skip(TokenKind::LineBreak);
        }
        self.tokens.current_token()
    }

    /// Consume the current token and return it
    pub fn advance(&mut self) -> Token {
        self.current();
        self.tokens.advance()
    }

    /// The token after the current one, under the same line break rules
    pub fn peek_next(&self) -> Token {
        let mut offset = 0;
        let mut seen = 0;
        loop {
            let token = self.tokens.peek(offset);
            let skipped = self.line_breaks_ignored && token.kind == TokenKind::LineBreak;
            if !skipped {
                if seen == 1 || token.kind == TokenKind::EndOfStream {
                    return token;
                }
                seen += 1;
            }
            offset += 1;
        }
    }

    /// The first token from the cursor that is not a line break
    pub fn next_non_line_break(&self) -> Token {
        let mut offset = 0;
        while self.tokens.peek(offset).kind == TokenKind::LineBreak {
            offset += 1;
        }
        self.tokens.peek(offset)
    }

    pub fn skip_line_breaks(&mut self) {
        self.tokens.skip(TokenKind::LineBreak);
    }

    pub fn token_text(&self, token: Token) -> &'a str {
        token.text(self.text)
    }

    pub fn is_keyword(&self, token: Token, word: &str) -> bool {
        token.kind == TokenKind::Keyword && self.token_text(token) == word
    }

    pub fn is_operator(&self, token: Token, text: &str) -> bool {
        token.kind == TokenKind::Operator && self.token_text(token) == text
    }

    pub fn line_breaks_ignored(&self) -> bool {
        self.line_breaks_ignored
    }

    /// Whether the cursor is inside at least one `{ }` block
    pub fn in_braces(&self) -> bool {
        self.brace_depth > 0
    }

    /// Run `f` with line breaks ignored or significant, restoring the previous rule after
    pub fn with_line_breaks_ignored<T>(
        &mut self,
        ignored: bool,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = std::mem::replace(&mut self.line_breaks_ignored, ignored);
        let result = f(self);
        self.line_breaks_ignored = saved;
        result
    }

    /// Run `f` inside a `{ }` block, where line breaks end statements again
    pub fn with_braces<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.brace_depth += 1;
        let result = self.with_line_breaks_ignored(false, f);
        self.brace_depth -= 1;
        result
    }

    pub fn nesting_limit_reached(&self) -> bool {
        self.nesting_depth >= MAX_NESTING_DEPTH
    }

    /// Run `f` one expression level deeper
    pub fn with_nesting<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.nesting_depth += 1;
        let result = f(self);
        self.nesting_depth -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r::lexing::tokenize_text;

    fn context(text: &str) -> ParseContext<'_> {
        ParseContext::new(text, tokenize_text(text))
    }

    #[test]
    fn test_whitespace_is_dropped() {
        let ctx = context("x <- 1");
        assert_eq!(ctx.tokens().len(), 3);
    }

    #[test]
    fn test_comments_are_moved_aside() {
        let mut ctx = context("# a\nx # b\n");
        ctx.remove_comment_tokens();
        assert!(ctx
            .tokens()
            .tokens()
            .iter()
            .all(|token| token.kind != TokenKind::Comment));
        let comments = ctx.take_comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].start, 0);
        assert_eq!(comments[1].start, 6);
    }

    #[test]
    fn test_line_breaks_ignored_only_inside_scope() {
        let mut ctx = context("\n\nx");
        assert_eq!(ctx.current().kind, TokenKind::LineBreak);
        let token = ctx.with_line_breaks_ignored(true, |ctx| ctx.current());
        assert_eq!(token.kind, TokenKind::Identifier);
        assert!(!ctx.line_breaks_ignored());
    }

    #[test]
    fn test_braces_make_line_breaks_significant() {
        let mut ctx = context("a\nb");
        ctx.with_line_breaks_ignored(true, |ctx| {
            ctx.with_braces(|ctx| {
                assert!(ctx.in_braces());
                assert!(!ctx.line_breaks_ignored());
            });
            assert!(ctx.line_breaks_ignored());
        });
        assert!(!ctx.in_braces());
    }

    #[test]
    fn test_peek_next_skips_ignored_line_breaks() {
        let mut ctx = context("a\n= 1");
        assert_eq!(ctx.peek_next().kind, TokenKind::LineBreak);
        ctx.with_line_breaks_ignored(true, |ctx| {
            assert!(ctx.is_operator(ctx.peek_next(), "="));
        });
        assert_eq!(ctx.next_non_line_break().kind, TokenKind::Identifier);
        ctx.advance();
        assert_eq!(ctx.next_non_line_break().kind, TokenKind::Operator);
    }

    #[test]
    fn test_nesting_depth_is_restored() {
        fn descend(ctx: &mut ParseContext<'_>, levels: usize) -> bool {
            match levels {
                0 => ctx.nesting_limit_reached(),
                _ => ctx.with_nesting(|ctx| descend(ctx, levels - 1)),
            }
        }

        let mut ctx = context("x");
        assert!(!descend(&mut ctx, MAX_NESTING_DEPTH - 1));
        assert!(descend(&mut ctx, MAX_NESTING_DEPTH));
        assert!(!ctx.nesting_limit_reached());
    }
}
