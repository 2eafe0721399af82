//! Operator kinds with their fixed precedence and association
//!
//!     Precedence is a property of the operator kind, never computed from context. Higher
//!     values bind tighter. The grammar resolves chains of equal precedence through
//!     [Association]: left associative chains fold left to right, right associative ones
//!     fold right to left.
//!
//!     The same token text can name two operator kinds (`-` is both subtraction and
//!     negation); which one applies depends on whether the token appears in prefix or infix
//!     position, see [OperatorType::unary_from_text] and [OperatorType::binary_from_text].

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Association {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperatorType {
    /// `a ? b`
    Help,
    /// `?topic`
    UnaryHelp,
    /// `=`
    EqualsAssign,
    /// `<-` and `<<-`
    LeftAssign,
    /// `->` and `->>`
    RightAssign,
    /// `y ~ x`
    Formula,
    /// `~ x`
    UnaryFormula,
    Or,
    OrOr,
    And,
    AndAnd,
    Not,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `%%`
    Modulo,
    /// `%/%`
    IntegerDivide,
    /// Any other `%op%`, such as `%in%` or `%*%`
    Special,
    /// `|>`
    Pipe,
    /// `:`
    Sequence,
    UnaryMinus,
    UnaryPlus,
    /// `^` and `**`
    Exponent,
    /// `$`
    ListIndex,
    /// `@`
    SlotAccess,
    /// `::` and `:::`
    Namespace,
}

impl OperatorType {
    pub fn precedence(self) -> u32 {
        match self {
            OperatorType::Help | OperatorType::UnaryHelp => 10,
            OperatorType::EqualsAssign => 20,
            OperatorType::LeftAssign => 30,
            OperatorType::RightAssign => 40,
            OperatorType::Formula | OperatorType::UnaryFormula => 50,
            OperatorType::Or | OperatorType::OrOr => 60,
            OperatorType::And | OperatorType::AndAnd => 70,
            OperatorType::Not => 80,
            OperatorType::Equal
            | OperatorType::NotEqual
            | OperatorType::Less
            | OperatorType::Greater
            | OperatorType::LessOrEqual
            | OperatorType::GreaterOrEqual => 90,
            OperatorType::Add | OperatorType::Subtract => 100,
            OperatorType::Multiply | OperatorType::Divide => 110,
            OperatorType::Modulo
            | OperatorType::IntegerDivide
            | OperatorType::Special
            | OperatorType::Pipe => 120,
            OperatorType::Sequence => 130,
            OperatorType::UnaryMinus | OperatorType::UnaryPlus => 140,
            OperatorType::Exponent => 150,
            OperatorType::ListIndex | OperatorType::SlotAccess => 160,
            OperatorType::Namespace => 170,
        }
    }

    pub fn association(self) -> Association {
        match self {
            OperatorType::EqualsAssign
            | OperatorType::LeftAssign
            | OperatorType::UnaryMinus
            | OperatorType::UnaryPlus
            | OperatorType::Exponent => Association::Right,
            _ => Association::Left,
        }
    }

    /// Prefix operators take only a right operand
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            OperatorType::UnaryHelp
                | OperatorType::UnaryFormula
                | OperatorType::Not
                | OperatorType::UnaryMinus
                | OperatorType::UnaryPlus
        )
    }

    /// Operators whose right side is a member name rather than an expression
    pub fn is_postfix_accessor(self) -> bool {
        matches!(
            self,
            OperatorType::ListIndex | OperatorType::SlotAccess | OperatorType::Namespace
        )
    }

    /// Operator kind of an operator token found in infix position
    pub fn binary_from_text(text: &str) -> Option<OperatorType> {
        let op = match text {
            "?" => OperatorType::Help,
            "=" => OperatorType::EqualsAssign,
            "<-" | "<<-" => OperatorType::LeftAssign,
            "->" | "->>" => OperatorType::RightAssign,
            "~" => OperatorType::Formula,
            "|" => OperatorType::Or,
            "||" => OperatorType::OrOr,
            "&" => OperatorType::And,
            "&&" => OperatorType::AndAnd,
            "==" => OperatorType::Equal,
            "!=" => OperatorType::NotEqual,
            "<" => OperatorType::Less,
            ">" => OperatorType::Greater,
            "<=" => OperatorType::LessOrEqual,
            ">=" => OperatorType::GreaterOrEqual,
            "+" => OperatorType::Add,
            "-" => OperatorType::Subtract,
            "*" => OperatorType::Multiply,
            "/" => OperatorType::Divide,
            "%%" => OperatorType::Modulo,
            "%/%" => OperatorType::IntegerDivide,
            "|>" => OperatorType::Pipe,
            ":" => OperatorType::Sequence,
            "^" | "**" => OperatorType::Exponent,
            "$" => OperatorType::ListIndex,
            "@" => OperatorType::SlotAccess,
            "::" | ":::" => OperatorType::Namespace,
            special
                if special.len() >= 2 && special.starts_with('%') && special.ends_with('%') =>
            {
                OperatorType::Special
            }
            _ => return None,
        };
        Some(op)
    }

    /// Operator kind of an operator token found in prefix position
    pub fn unary_from_text(text: &str) -> Option<OperatorType> {
        match text {
            "-" => Some(OperatorType::UnaryMinus),
            "+" => Some(OperatorType::UnaryPlus),
            "!" => Some(OperatorType::Not),
            "~" => Some(OperatorType::UnaryFormula),
            "?" => Some(OperatorType::UnaryHelp),
            _ => None,
        }
    }
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
