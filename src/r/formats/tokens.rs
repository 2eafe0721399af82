//! Token listing

use crate::r::token::Token;

/// One line per token: kind, byte range and the quoted token text
pub fn format_tokens(text: &str, tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| {
            format!(
                "{:?} [{}..{}] {:?}\n",
                token.kind,
                token.start,
                token.end(),
                token.text(text)
            )
        })
        .collect()
}
