//! Debug output formats
//!
//! Text dumps of tokens and trees, used by the `rparse` command and by snapshot tests.
//! They are for people reading them; nothing parses them back.
//!
//! - [tokens]: one token per line, `Kind [start..end] "text"`
//! - [treeviz]: one node per line with box-drawing connectors
//!
//! JSON output goes through serde directly on [Token](crate::r::token::Token) and
//! [AstSnapshot](crate::r::ast::AstSnapshot).

pub mod tokens;
pub mod treeviz;

pub use tokens::format_tokens;
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_params};
