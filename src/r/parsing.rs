//! Parsing module for R source text
//!
//! This module provides the processing pipeline from source text to syntax tree:
//! 1. **Lexing**: tokenization of the whole text, see [lexing](crate::r::lexing)
//! 2. **Context**: whitespace dropped, comments moved aside, see [ParseContext]
//! 3. **Grammar**: recursive descent from the global scope down, see [scope], [statements]
//!    and [expressions]
//!
//! ## Error tolerance
//!
//! Parsing is total: any text, including the empty string and text full of unbalanced
//! braces, yields a tree. What went wrong is reported in the returned error list, which may
//! be non-empty on an otherwise complete tree. Callers must inspect it.
//!
//! ## Threads
//!
//! A parse runs to completion on the calling thread. Independent parses share nothing and
//! may run in parallel; a finished [AstRoot] can be read from any number of threads.

pub mod context;
pub mod error;
pub mod expressions;
pub mod helpers;
pub mod scope;
pub mod statements;

pub use context::ParseContext;
pub use error::{ParseError, ParseErrorType};

use crate::r::ast::AstRoot;
use crate::r::evaluation::{CodeEvaluator, NullEvaluator};
use crate::r::lexing::tokenize_text;
use log::debug;
use std::sync::Arc;

/// Parse `text` into a tree and the list of problems found on the way
pub fn parse(text: &str) -> (AstRoot, Vec<ParseError>) {
    RParser::new().parse(text)
}

/// Like [parse], with `evaluator` installed in the resulting tree
pub fn parse_with_evaluator(
    text: &str,
    evaluator: Arc<dyn CodeEvaluator>,
) -> (AstRoot, Vec<ParseError>) {
    RParser::with_evaluator(evaluator).parse(text)
}

/// Reusable parser configured with the evaluator every tree it builds will hold
#[derive(Clone)]
pub struct RParser {
    evaluator: Arc<dyn CodeEvaluator>,
}

impl RParser {
    pub fn new() -> Self {
        Self::with_evaluator(Arc::new(NullEvaluator))
    }

    pub fn with_evaluator(evaluator: Arc<dyn CodeEvaluator>) -> Self {
        Self { evaluator }
    }

    pub fn parse(&self, text: &str) -> (AstRoot, Vec<ParseError>) {
        let mut context = ParseContext::new(text, tokenize_text(text));
        debug!("parsing {} bytes, {} tokens", text.len(), context.tokens().len());

        let mut ast = AstRoot::with_evaluator(text, Arc::clone(&self.evaluator));
        ast.parse(&mut context);

        let errors = context.into_errors();
        debug!(
            "parsed {} nodes, {} comments, {} errors",
            ast.nodes().len(),
            ast.comments().len(),
            errors.len()
        );
        (ast, errors)
    }
}

impl Default for RParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let (ast, errors) = parse("");
        assert!(errors.is_empty());
        assert!(ast.global_scope().is_some());
        assert!(ast.statements().is_empty());
    }

    #[test]
    fn test_parser_is_reusable() {
        let parser = RParser::default();
        let (first, _) = parser.parse("x <- 1");
        let (second, _) = parser.parse("y\nz");
        assert_eq!(first.statements().len(), 1);
        assert_eq!(second.statements().len(), 2);
    }

    #[test]
    fn test_tree_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AstRoot>();
        assert_send_sync::<RParser>();
    }
}
