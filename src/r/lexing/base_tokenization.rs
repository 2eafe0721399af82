//! Base tokenization implementation for the R lexer
//!
//! This module provides the raw tokenization using the logos lexer library.
//! This is the entry point where source strings become token streams.
//!
//! The sequence is lazy: tokens are produced as the iterator is pulled, and the iterator can
//! be cloned or recreated from offset 0 at any time.

use crate::r::token::{classify_identifier, Token, TokenKind};
use logos::Logos;
use std::collections::VecDeque;

/// Lazy token sequence over a text window
#[derive(Clone)]
pub struct Tokens<'a> {
    lexer: logos::Lexer<'a, TokenKind>,
    /// Absolute offset of the lexer's source within the full text
    offset: usize,
    pending: VecDeque<Token>,
    brackets: Vec<TokenKind>,
}

/// Tokenize the window `[start, start + length)` of `text`
///
/// Token offsets are absolute positions in `text`. The window must lie within the text and
/// on char boundaries; violating that is a caller bug and panics.
pub fn tokenize(text: &str, start: usize, length: usize) -> Tokens<'_> {
    let end = start
        .checked_add(length)
        .filter(|end| *end <= text.len())
        .unwrap_or_else(|| {
            panic!(
                "token window {}+{} is out of bounds for text of length {}",
                start,
                length,
                text.len()
            )
        });

    Tokens {
        lexer: TokenKind::lexer(&text[start..end]),
        offset: start,
        pending: VecDeque::new(),
        brackets: Vec::new(),
    }
}

/// Tokenize the whole text
pub fn tokenize_text(text: &str) -> Tokens<'_> {
    tokenize(text, 0, text.len())
}

impl<'a> Tokens<'a> {
    /// Restart lexing `relative` bytes into the current lexer source
    fn resume_at(&mut self, relative: usize) {
        let source: &'a str = self.lexer.source();
        self.lexer = TokenKind::lexer(&source[relative..]);
        self.offset += relative;
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }

            let result = self.lexer.next()?;
            let span = self.lexer.span();
            let start = self.offset + span.start;

            let kind = match result {
                Ok(kind) => kind,
                Err(()) => {
                    // Unrecognized input becomes one Unknown token per character
                    for (index, ch) in self.lexer.slice().char_indices() {
                        self.pending.push_back(Token::new(
                            TokenKind::Unknown,
                            start + index,
                            ch.len_utf8(),
                        ));
                    }
                    continue;
                }
            };

            let token = match kind {
                TokenKind::Identifier => {
                    Token::new(classify_identifier(self.lexer.slice()), start, span.len())
                }
                TokenKind::OpenSquareBracket | TokenKind::OpenDoubleSquareBracket => {
                    self.brackets.push(kind);
                    Token::new(kind, start, span.len())
                }
                TokenKind::CloseSquareBracket => {
                    if self.brackets.last() == Some(&TokenKind::OpenSquareBracket) {
                        self.brackets.pop();
                    }
                    Token::new(kind, start, span.len())
                }
                TokenKind::CloseDoubleSquareBracket => match self.brackets.last() {
                    // `x[y[1]]`: the first `]` closes the inner single bracket only
                    Some(TokenKind::OpenSquareBracket) => {
                        self.brackets.pop();
                        self.resume_at(span.start + 1);
                        Token::new(TokenKind::CloseSquareBracket, start, 1)
                    }
                    Some(TokenKind::OpenDoubleSquareBracket) => {
                        self.brackets.pop();
                        Token::new(kind, start, span.len())
                    }
                    _ => Token::new(kind, start, span.len()),
                },
                _ => Token::new(kind, start, span.len()),
            };

            return Some(token);
        }
    }
}
