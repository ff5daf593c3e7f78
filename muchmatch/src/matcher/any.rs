use std::fmt::{Formatter, Result as FmtResult};

use crate::value::Value;

use super::Matcher;

/// Matches every value.
pub fn any() -> Any {
    Any
}

/// Matches no value.
pub fn none() -> Never {
    Never
}

#[must_use]
#[derive(Clone, Copy, Debug)]
pub struct Any;

impl Matcher for Any {
    fn matches(&self, _actual: &Value) -> (bool, String) {
        (true, String::new())
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Any()")
    }
}

#[must_use]
#[derive(Clone, Copy, Debug)]
pub struct Never;

impl Matcher for Never {
    fn matches(&self, _actual: &Value) -> (bool, String) {
        (false, "None() never matches".into())
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "None()")
    }
}

impl_reflect!(Any, Never);
