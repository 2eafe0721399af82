//! Forward-only cursor over a token sequence

use super::core::{Token, TokenKind};

/// A stateful, forward-only view over an immutable token sequence
///
/// The current token is always defined: once the cursor runs past the last real token it
/// rests on an [TokenKind::EndOfStream] sentinel of length 0, so lookahead never fails.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
    end_of_stream: Token,
}

impl TokenStream {
    /// Build a stream whose sentinel sits at `end_offset`
    pub fn new(tokens: Vec<Token>, end_offset: usize) -> Self {
        Self {
            tokens,
            position: 0,
            end_of_stream: Token::new(TokenKind::EndOfStream, end_offset, 0),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of real tokens, the sentinel excluded
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn current_token(&self) -> Token {
        self.peek(0)
    }

    pub fn next_token(&self) -> Token {
        self.peek(1)
    }

    /// Token `offset` positions ahead of the cursor (0 is the current token)
    pub fn peek(&self, offset: usize) -> Token {
        self.tokens
            .get(self.position + offset)
            .copied()
            .unwrap_or(self.end_of_stream)
    }

    /// The token right before the cursor, if any
    pub fn previous_token(&self) -> Option<Token> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .copied()
    }

    /// Move past the current token and return it
    ///
    /// At the end of the stream the cursor stays on the sentinel.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token();
        if !self.is_end_of_stream() {
            self.position += 1;
        }
        token
    }

    /// Advance while the current token is of `kind`
    pub fn skip(&mut self, kind: TokenKind) {
        while self.current_token().kind == kind {
            self.advance();
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> TokenStream {
        TokenStream::new(
            vec![
                Token::new(TokenKind::Identifier, 0, 1),
                Token::new(TokenKind::Operator, 2, 2),
                Token::new(TokenKind::Number, 5, 1),
            ],
            6,
        )
    }

    #[test]
    fn test_cursor_advances_monotonically() {
        let mut tokens = stream();
        assert_eq!(tokens.current_token().kind, TokenKind::Identifier);
        assert_eq!(tokens.next_token().kind, TokenKind::Operator);
        assert_eq!(tokens.previous_token(), None);

        assert_eq!(tokens.advance().kind, TokenKind::Identifier);
        assert_eq!(tokens.position(), 1);
        assert_eq!(tokens.previous_token().unwrap().kind, TokenKind::Identifier);
    }

    #[test]
    fn test_sentinel_at_end() {
        let mut tokens = stream();
        for _ in 0..10 {
            tokens.advance();
        }
        assert!(tokens.is_end_of_stream());
        assert_eq!(tokens.position(), 3);
        let sentinel = tokens.current_token();
        assert_eq!(sentinel.kind, TokenKind::EndOfStream);
        assert_eq!(sentinel.start, 6);
        assert_eq!(sentinel.length, 0);
        assert_eq!(tokens.peek(5).kind, TokenKind::EndOfStream);
    }

    #[test]
    fn test_empty_stream() {
        let tokens = TokenStream::new(Vec::new(), 0);
        assert!(tokens.is_empty());
        assert!(tokens.is_end_of_stream());
        assert_eq!(tokens.current_token().kind, TokenKind::EndOfStream);
    }
}
