//! Parse errors
//!
//! Errors are recorded, never raised: every production that meets something unexpected
//! pushes a [ParseError] onto the context and carries on with what it has.

use crate::r::ast::range::SourceLocation;
use crate::r::text::TextRange;
use crate::r::token::Token;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParseErrorType {
    /// `(` missing after `if`, `for`, `while` or `function`
    OpenBraceExpected,
    /// `)` or `}` missing
    CloseBraceExpected,
    /// A braced block was required
    OpenCurlyBraceExpected,
    CloseSquareBracketExpected,
    CloseDoubleSquareBracketExpected,
    /// An operator is missing its operand
    OperandExpected,
    IdentifierExpected,
    InKeywordExpected,
    /// A body that should hold one statement holds none
    StatementExpected,
    UnexpectedToken,
    /// Brackets, blocks or prefix operators nested past [MAX_NESTING_DEPTH]
    ///
    /// [MAX_NESTING_DEPTH]: super::context::MAX_NESTING_DEPTH
    NestingTooDeep,
}

impl ParseErrorType {
    pub fn message(&self) -> &'static str {
        match self {
            ParseErrorType::OpenBraceExpected => "expected '('",
            ParseErrorType::CloseBraceExpected => "expected closing brace",
            ParseErrorType::OpenCurlyBraceExpected => "expected '{'",
            ParseErrorType::CloseSquareBracketExpected => "expected ']'",
            ParseErrorType::CloseDoubleSquareBracketExpected => "expected ']]'",
            ParseErrorType::OperandExpected => "expected an operand",
            ParseErrorType::IdentifierExpected => "expected an identifier",
            ParseErrorType::InKeywordExpected => "expected 'in'",
            ParseErrorType::StatementExpected => "expected a statement",
            ParseErrorType::UnexpectedToken => "unexpected token",
            ParseErrorType::NestingTooDeep => "expression nested too deeply",
        }
    }
}

impl fmt::Display for ParseErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A structural problem found while parsing, anchored at the offending token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub error_type: ParseErrorType,
    pub token: Token,
}

impl ParseError {
    pub fn new(error_type: ParseErrorType, token: Token) -> Self {
        Self { error_type, token }
    }

    pub fn range(&self) -> TextRange {
        self.token.range()
    }

    /// Render as `line:column: message` with 1-based line and column
    pub fn display_with_position(&self, location: &SourceLocation) -> String {
        let position = location.byte_to_position(self.token.start);
        format!(
            "{}:{}: {} (found {})",
            position.line + 1,
            position.column + 1,
            self.error_type,
            self.token.kind
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} (found {})",
            self.error_type,
            self.range(),
            self.token.kind
        )
    }
}

impl std::error::Error for ParseError {}
