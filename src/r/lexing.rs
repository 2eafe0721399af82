//! Lexer
//!
//!     This module turns R source text into a sequence of classified tokens. Lexing never
//!     fails and never builds any structure: deciding what is acceptable is left to the
//!     parser.
//!
//! Coverage
//!
//!     The token sequence for a window `[start, start + length)` covers every byte of that
//!     window exactly once, in order. Whitespace, line breaks and comments are tokens like
//!     any other, and a character the lexer does not recognize becomes an `Unknown` token of
//!     one character. Concatenating the token texts therefore reproduces the window, which is
//!     what lets editor tooling re-lex only the part of a document that changed.
//!
//! Classification
//!
//!     1. Core tokenization with logos. See [base_tokenization](base_tokenization).
//!     2. Words are checked against the reserved word tables (keywords, `TRUE`/`FALSE`,
//!        `NULL`, the `NA` family, `Inf`/`NaN`). See
//!        [classify_identifier](crate::r::token::classify_identifier).
//!     3. A bracket stack decides whether `]]` closes a `[[` or two nested `[`.

pub mod base_tokenization;

pub use base_tokenization::{tokenize, tokenize_text, Tokens};
pub use crate::r::token::{Token, TokenKind};
