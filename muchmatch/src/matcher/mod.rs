//! The [`matcher`](self) module contains the [`Matcher`] trait and all the
//! matchers that are shipped with this crate.

/// Implements [`Reflect`] for matcher types, so they can be passed wherever
/// an expectation value is expected.
macro_rules! impl_reflect {
    ($( $type:ty ),+ $(,)?) => {
        $(
            impl $crate::value::Reflect for $type {
                fn type_name() -> std::borrow::Cow<'static, str> {
                    std::borrow::Cow::Borrowed("Matcher")
                }

                fn reflect(&self) -> $crate::value::Value {
                    $crate::value::Value::Matcher(std::sync::Arc::new(self.clone()))
                }
            }
        )+
    };
}

mod aggregate;
mod any;
mod between;
mod contains;
mod equal;
mod func;
mod len;
mod logic;
mod map;
mod method;
mod regexp;
mod same;

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::value::{Reflect, Value};
use crate::MatcherError;

pub use aggregate::{
    all, any_of, at_least_of, at_most_of, between_of, one_of, Aggregate, Consumable, Stateful,
};
pub use any::{any, none, Any, Never};
pub use between::{between, between_strict, Between};
pub use contains::{contains, contains_key, contains_key_value, prefix, suffix, Contains};
pub use equal::{equal, equal_with, Equal, EqualOptions};
pub use func::{
    fn_, predicate, Dynamic, FromValue, Func, IntoPredicate, IntoVerdict, Predicate, Typed,
};
pub use len::{len, Len};
pub use logic::{if_, not, If, Not};
pub use map::{map, map_exact, Map};
pub use method::{method, Method};
pub use regexp::{regexp, Regexp};
pub use same::{same, same_pointer, Same};

/// A matcher checks if a dynamic [`Value`] fulfills a pre-defined
/// expectation and describes why it did not.
pub trait Matcher: Send + Sync {
    /// Check the passed `actual` value.
    ///
    /// Returns `(true, "")` on success, or `(false, description)` where the
    /// description explains why the value did not match.
    fn matches(&self, actual: &Value) -> (bool, String);

    /// Write a human readable representation of the matcher to the passed
    /// formatter.
    ///
    /// # Errors
    /// Returns an error if writing to the formatter failed.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult;

    /// Construction error of the matcher, if any.
    fn error(&self) -> Option<&MatcherError> {
        None
    }
}

/// Matcher that can be shared between other matchers.
pub type SharedMatcher = Arc<dyn Matcher>;

/// Convenience methods for every [`Matcher`].
pub trait MatcherExt: Matcher {
    /// Reflect `actual` and check it against the matcher.
    fn check<T: Reflect + ?Sized>(&self, actual: &T) -> (bool, String) {
        self.matches(&actual.reflect())
    }

    /// Human readable representation of the matcher.
    fn describe(&self) -> String {
        Described(self).to_string()
    }
}

impl<M: Matcher + ?Sized> MatcherExt for M {}

struct Described<'a, M: ?Sized>(&'a M);

impl<M: Matcher + ?Sized> Display for Described<'_, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Matcher::fmt(self.0, f)
    }
}

impl Display for dyn Matcher + '_ {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Matcher::fmt(self, f)
    }
}

impl Debug for dyn Matcher + '_ {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Matcher::fmt(self, f)
    }
}

impl<M: Matcher + ?Sized> Matcher for Arc<M> {
    fn matches(&self, actual: &Value) -> (bool, String) {
        (**self).matches(actual)
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Matcher::fmt(&**self, f)
    }

    fn error(&self) -> Option<&MatcherError> {
        (**self).error()
    }
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn matches(&self, actual: &Value) -> (bool, String) {
        (**self).matches(actual)
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Matcher::fmt(&**self, f)
    }

    fn error(&self) -> Option<&MatcherError> {
        (**self).error()
    }
}

/// A failed construction is a matcher that never matches.
impl<M: Matcher> Matcher for Result<M, MatcherError> {
    fn matches(&self, actual: &Value) -> (bool, String) {
        match self {
            Ok(matcher) => matcher.matches(actual),
            Err(err) => (false, err.to_string()),
        }
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Ok(matcher) => Matcher::fmt(matcher, f),
            Err(err) => write!(f, "InvalidMatcher({})", err.name()),
        }
    }

    fn error(&self) -> Option<&MatcherError> {
        match self {
            Ok(matcher) => matcher.error(),
            Err(err) => Some(err),
        }
    }
}

impl<M: Matcher + Clone + 'static> Reflect for Result<M, MatcherError> {
    fn type_name() -> std::borrow::Cow<'static, str> {
        std::borrow::Cow::Borrowed("Matcher")
    }

    fn reflect(&self) -> Value {
        Value::Matcher(Arc::new(self.clone()))
    }
}

/// Convert an expectation value into a matcher.
///
/// Matchers are used as they are, regular expressions become [`Regexp`],
/// predicates become [`Func`] and everything else is compared using
/// [`Equal`].
#[must_use]
pub fn to_matcher(value: Value) -> SharedMatcher {
    match value {
        Value::Matcher(matcher) => matcher,
        Value::Regex(regex) => Arc::new(Regexp::new(regex)),
        Value::Func(predicate) => Arc::new(Func::new(predicate)),
        value => Arc::new(Equal::new(value)),
    }
}

/// Convert a list of expectation values into matchers using [`to_matcher`].
#[must_use]
pub fn to_matchers(values: Vec<Value>) -> Vec<SharedMatcher> {
    values.into_iter().map(to_matcher).collect()
}

/// Construction error of the first invalid matcher in `matchers`.
pub(crate) fn first_error<'a, I>(matchers: I) -> Option<&'a MatcherError>
where
    I: IntoIterator<Item = &'a SharedMatcher>,
{
    matchers.into_iter().find_map(|matcher| matcher.error())
}
