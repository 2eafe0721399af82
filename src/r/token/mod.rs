//! Core token types shared across the lexer, parser, and tooling.
//!
//! Token Layers
//!
//!     Core Tokens:
//!         Character/word level tokens produced by the logos lexer. See [core](self::core)
//!         for the kinds. Every byte of the input belongs to exactly one core token, including
//!         whitespace, line breaks and comments, so a token listing always reconstructs the
//!         text it came from.
//!
//!     Significant Tokens:
//!         What the grammar sees. The parse context drops whitespace and moves comments to a
//!         side collection before any production runs, see
//!         [ParseContext](crate::r::parsing::ParseContext). Line breaks survive because they
//!         terminate statements outside of parentheses and brackets.
//!
//!     Synthetic Tokens:
//!         The [TokenStream] appends an end of stream sentinel of length 0 so the current
//!         token is always defined. It never becomes part of the tree.

pub mod core;
pub mod stream;

pub use self::core::{classify_identifier, Token, TokenKind};
pub use self::stream::TokenStream;
