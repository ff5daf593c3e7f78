//! Composable matchers that check dynamic values and describe precisely why
//! a value did not match.
//!
//! ```
//! use muchmatch::{all, any_of, len, values, MatcherExt};
//!
//! let matcher = all(values![len(2), any_of(values![vec!["So", "Much"], vec!["Such"]])]);
//!
//! assert!(matcher.check(&vec!["So", "Much"]).0);
//! ```

extern crate self as muchmatch;

pub mod error;
pub mod matcher;
pub mod value;

pub use muchmatch_macros::Reflect;

pub use error::MatcherError;
pub use matcher::{
    all, any, any_of, at_least_of, at_most_of, between, between_of, between_strict, contains,
    contains_key, contains_key_value, equal, equal_with, fn_, if_, len, map, map_exact, method,
    none, not, one_of, predicate, prefix, regexp, same, same_pointer, suffix, to_matcher,
    to_matchers, Aggregate, Any, Between, Consumable, Contains, Equal, EqualOptions, Func, If, Len,
    Map, Matcher, MatcherExt, Method, Never, Not, Predicate, Regexp, Same, SharedMatcher, Stateful,
};
pub use value::{trim_diff, Invoke, InvokeError, Kind, Reflect, Value};

/// Reflect every passed expression into a `Vec<Value>`.
#[macro_export]
macro_rules! values {
    ($( $value:expr ),* $(,)?) => {
        ::std::vec![$( $crate::Reflect::reflect(&$value) ),*]
    };
}

/// Assert that `actual` matches `matcher`, panicking with the failure
/// description otherwise.
#[macro_export]
macro_rules! assert_match {
    ($matcher:expr, $actual:expr $(,)?) => {{
        let (ok, desc) = $crate::MatcherExt::check(&$matcher, &$actual);
        if !ok {
            ::std::panic!("{}", desc);
        }
    }};
}
