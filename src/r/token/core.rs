//! Core token definitions for R source text
//!
//!     The token kinds are generated with the logos derive macro. Words are first lexed as
//!     identifiers and then classified against the reserved word tables, so reserved words
//!     always win over identifiers without the regexes having to know about them.
//!
//!     Tokens are plain `Copy` records of kind plus byte range. Their text is recovered by
//!     slicing the source, see [Token::text].

use crate::r::text::TextRange;
use logos::Logos;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

/// All the token kinds the R lexer produces
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Trivia
    #[regex(r"[ \t\f]+")]
    Whitespace,
    #[regex(r"\r\n|\n|\r")]
    LineBreak,
    #[regex(r"#[^\r\n]*")]
    Comment,

    // Words. Reserved words are split off after lexing, see `classify_identifier`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9._]*")]
    #[regex(r"\.[a-zA-Z._][a-zA-Z0-9._]*")]
    #[token(".")]
    #[regex(r"`[^`]*`?")]
    Identifier,
    Keyword,
    Logical,
    Null,
    Missing,

    // Literals
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?[Li]?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?[Li]?")]
    #[regex(r"0[xX][0-9a-fA-F]+[Li]?")]
    Number,
    #[regex(r#""([^"\\]|\\(.|\n))*"?"#)]
    #[regex(r#"'([^'\\]|\\(.|\n))*'?"#)]
    String,

    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("^")]
    #[token("**")]
    #[token("<")]
    #[token(">")]
    #[token("<=")]
    #[token(">=")]
    #[token("==")]
    #[token("!=")]
    #[token("!")]
    #[token("&")]
    #[token("&&")]
    #[token("|")]
    #[token("||")]
    #[token("|>")]
    #[token("~")]
    #[token("?")]
    #[token(":")]
    #[token("::")]
    #[token(":::")]
    #[token("$")]
    #[token("@")]
    #[token("=")]
    #[token("<-")]
    #[token("<<-")]
    #[token("->")]
    #[token("->>")]
    #[regex(r"%[^%\r\n]*%")]
    Operator,

    // Punctuation
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // Delimiters
    #[token("(")]
    OpenBrace,
    #[token(")")]
    CloseBrace,
    #[token("{")]
    OpenCurlyBrace,
    #[token("}")]
    CloseCurlyBrace,
    #[token("[")]
    OpenSquareBracket,
    #[token("]")]
    CloseSquareBracket,
    #[token("[[")]
    OpenDoubleSquareBracket,
    #[token("]]")]
    CloseDoubleSquareBracket,

    /// A single character the lexer does not recognize
    Unknown,
    /// Sentinel appended by the token stream, never produced by the lexer
    EndOfStream,
}

impl TokenKind {
    /// Tokens that never reach the grammar
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Tokens that stand for a constant value
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::Logical
                | TokenKind::Null
                | TokenKind::Missing
        )
    }

    pub fn is_opening_delimiter(&self) -> bool {
        matches!(
            self,
            TokenKind::OpenBrace
                | TokenKind::OpenCurlyBrace
                | TokenKind::OpenSquareBracket
                | TokenKind::OpenDoubleSquareBracket
        )
    }

    pub fn is_closing_delimiter(&self) -> bool {
        matches!(
            self,
            TokenKind::CloseBrace
                | TokenKind::CloseCurlyBrace
                | TokenKind::CloseSquareBracket
                | TokenKind::CloseDoubleSquareBracket
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::LineBreak => "line break",
            TokenKind::Comment => "comment",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Logical => "logical constant",
            TokenKind::Null => "NULL",
            TokenKind::Missing => "missing value",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Operator => "operator",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::OpenBrace => "'('",
            TokenKind::CloseBrace => "')'",
            TokenKind::OpenCurlyBrace => "'{'",
            TokenKind::CloseCurlyBrace => "'}'",
            TokenKind::OpenSquareBracket => "'['",
            TokenKind::CloseSquareBracket => "']'",
            TokenKind::OpenDoubleSquareBracket => "'[['",
            TokenKind::CloseDoubleSquareBracket => "']]'",
            TokenKind::Unknown => "unknown character",
            TokenKind::EndOfStream => "end of input",
        };
        f.write_str(name)
    }
}

static RESERVED_WORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut words = HashMap::new();
    for keyword in [
        "if", "else", "repeat", "while", "function", "for", "in", "next", "break",
    ] {
        words.insert(keyword, TokenKind::Keyword);
    }
    words.insert("TRUE", TokenKind::Logical);
    words.insert("FALSE", TokenKind::Logical);
    words.insert("NULL", TokenKind::Null);
    for missing in [
        "NA",
        "NA_integer_",
        "NA_real_",
        "NA_character_",
        "NA_complex_",
    ] {
        words.insert(missing, TokenKind::Missing);
    }
    words.insert("Inf", TokenKind::Number);
    words.insert("NaN", TokenKind::Number);
    words
});

/// Classify an identifier-shaped word against the reserved word tables
///
/// Reserved words take priority; anything else stays an identifier.
pub fn classify_identifier(word: &str) -> TokenKind {
    RESERVED_WORDS
        .get(word)
        .copied()
        .unwrap_or(TokenKind::Identifier)
}

/// A classified slice of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub length: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, length: usize) -> Self {
        Self {
            kind,
            start,
            length,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn range(&self) -> TextRange {
        TextRange::from_length(self.start, self.length)
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The source text this token covers
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        TokenKind::lexer(source).map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_operators_prefer_longest_match() {
        assert_eq!(
            kinds("<<-"),
            vec![TokenKind::Operator],
            "<<- should be a single operator"
        );
        assert_eq!(kinds("x<-1").len(), 3);
        assert_eq!(kinds("%in%"), vec![TokenKind::Operator]);
        assert_eq!(kinds(":::"), vec![TokenKind::Operator]);
    }

    #[test]
    fn test_numbers() {
        for number in ["1", "1.5", "1e10", "1.5e-3", ".5", "0x1F", "10L", "2i", "1."] {
            assert_eq!(kinds(number), vec![TokenKind::Number], "{}", number);
        }
    }

    #[test]
    fn test_identifiers() {
        for word in ["x", "my.var", "x_1", ".hidden", "...", "..1", "`odd name`"] {
            assert_eq!(kinds(word), vec![TokenKind::Identifier], "{}", word);
        }
    }

    #[test]
    fn test_strings_may_span_lines() {
        assert_eq!(kinds("\"a\nb\""), vec![TokenKind::String]);
        assert_eq!(kinds("'it\\'s'"), vec![TokenKind::String]);
        assert_eq!(kinds("\"unterminated"), vec![TokenKind::String]);
    }

    #[test]
    fn test_comment_stops_before_line_break() {
        assert_eq!(
            kinds("# note\nx"),
            vec![
                TokenKind::Comment,
                TokenKind::LineBreak,
                TokenKind::Identifier
            ]
        );
    }

    #[test]
    fn test_reserved_words() {
        assert_eq!(classify_identifier("function"), TokenKind::Keyword);
        assert_eq!(classify_identifier("TRUE"), TokenKind::Logical);
        assert_eq!(classify_identifier("NULL"), TokenKind::Null);
        assert_eq!(classify_identifier("NA_real_"), TokenKind::Missing);
        assert_eq!(classify_identifier("Inf"), TokenKind::Number);
        assert_eq!(classify_identifier("iffy"), TokenKind::Identifier);
        assert_eq!(classify_identifier("True"), TokenKind::Identifier);
    }

    #[test]
    fn test_token_text() {
        let token = Token::new(TokenKind::Identifier, 2, 3);
        assert_eq!(token.text("a <- foo"), "<- ");
        assert_eq!(token.end(), 5);
        assert_eq!(token.range(), TextRange::new(2, 5));
    }
}
