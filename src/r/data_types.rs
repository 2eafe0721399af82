//! Runtime values
//!
//!     The value model is deliberately small: the `NULL` singleton and length-1 scalars.
//!     Every value is a vector in R, so both implement [RVector]; a scalar is the vector
//!     whose length is always 1.
//!
//!     The mode is the value's dynamic type tag. It is fixed per payload type, see
//!     [ScalarPayload].

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RMode {
    Null,
    Numeric,
    Logical,
    Character,
}

impl fmt::Display for RMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RMode::Null => "NULL",
            RMode::Numeric => "numeric",
            RMode::Logical => "logical",
            RMode::Character => "character",
        };
        f.write_str(name)
    }
}

pub trait RVector {
    fn length(&self) -> usize;
    fn mode(&self) -> RMode;
}

/// Types that can be held by an [RScalar]
pub trait ScalarPayload {
    const MODE: RMode;
}

impl ScalarPayload for f64 {
    const MODE: RMode = RMode::Numeric;
}

impl ScalarPayload for i32 {
    const MODE: RMode = RMode::Numeric;
}

impl ScalarPayload for bool {
    const MODE: RMode = RMode::Logical;
}

impl ScalarPayload for String {
    const MODE: RMode = RMode::Character;
}

/// The absent value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct RNull;

impl RNull {
    pub const NULL: RNull = RNull;
}

impl RVector for RNull {
    fn length(&self) -> usize {
        0
    }

    fn mode(&self) -> RMode {
        RMode::Null
    }
}

/// A vector of exactly one element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RScalar<T> {
    value: T,
}

impl<T: ScalarPayload> RScalar<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: ScalarPayload> RVector for RScalar<T> {
    fn length(&self) -> usize {
        1
    }

    fn mode(&self) -> RMode {
        T::MODE
    }
}

pub type RNumber = RScalar<f64>;
pub type RInteger = RScalar<i32>;
pub type RLogical = RScalar<bool>;
pub type RString = RScalar<String>;

/// Any value an evaluator can produce
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum RObject {
    #[default]
    Null,
    Number(RNumber),
    Integer(RInteger),
    Logical(RLogical),
    String(RString),
}

impl RObject {
    pub fn is_null(&self) -> bool {
        matches!(self, RObject::Null)
    }
}

impl RVector for RObject {
    fn length(&self) -> usize {
        match self {
            RObject::Null => RNull::NULL.length(),
            RObject::Number(value) => value.length(),
            RObject::Integer(value) => value.length(),
            RObject::Logical(value) => value.length(),
            RObject::String(value) => value.length(),
        }
    }

    fn mode(&self) -> RMode {
        match self {
            RObject::Null => RNull::NULL.mode(),
            RObject::Number(value) => value.mode(),
            RObject::Integer(value) => value.mode(),
            RObject::Logical(value) => value.mode(),
            RObject::String(value) => value.mode(),
        }
    }
}

impl From<RNull> for RObject {
    fn from(_: RNull) -> Self {
        RObject::Null
    }
}

impl From<f64> for RObject {
    fn from(value: f64) -> Self {
        RObject::Number(RScalar::new(value))
    }
}

impl From<i32> for RObject {
    fn from(value: i32) -> Self {
        RObject::Integer(RScalar::new(value))
    }
}

impl From<bool> for RObject {
    fn from(value: bool) -> Self {
        RObject::Logical(RScalar::new(value))
    }
}

impl From<String> for RObject {
    fn from(value: String) -> Self {
        RObject::String(RScalar::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_modes() {
        assert_eq!(RNumber::new(1.5).mode(), RMode::Numeric);
        assert_eq!(RInteger::new(2).mode(), RMode::Numeric);
        assert_eq!(RLogical::new(true).mode(), RMode::Logical);
        assert_eq!(RString::new("a".to_string()).mode(), RMode::Character);
        assert_eq!(RNull::NULL.mode(), RMode::Null);
    }

    #[test]
    fn test_null_is_empty() {
        assert_eq!(RNull::NULL.length(), 0);
        assert_eq!(RObject::default(), RObject::Null);
        assert!(RObject::from(RNull).is_null());
    }

    proptest! {
        #[test]
        fn scalar_length_is_one_for_numbers(value in any::<f64>()) {
            prop_assert_eq!(RNumber::new(value).length(), 1);
            prop_assert_eq!(RObject::from(value).length(), 1);
        }

        #[test]
        fn scalar_length_is_one_for_strings(value in ".*") {
            prop_assert_eq!(RString::new(value.clone()).length(), 1);
            prop_assert_eq!(RObject::from(value).length(), 1);
        }

        #[test]
        fn scalar_length_is_one_for_integers_and_logicals(
            value in any::<i32>(),
            flag in any::<bool>(),
        ) {
            prop_assert_eq!(RInteger::new(value).length(), 1);
            prop_assert_eq!(RLogical::new(flag).length(), 1);
        }
    }
}
