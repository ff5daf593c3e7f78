use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{render, Reflect, Value};

use super::{to_matcher, Matcher, MatcherExt, SharedMatcher};

/// Matches texts, sequences and mappings whose length matches `len`.
///
/// `len` may be a plain number or any matcher, like [`between`](super::between).
/// The length of a text is its length in bytes.
pub fn len<T: Reflect>(len: T) -> Len {
    let len = len.reflect();

    Len {
        matcher: to_matcher(len.clone()),
        len,
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Len {
    len: Value,
    matcher: SharedMatcher,
}

impl Matcher for Len {
    fn matches(&self, actual: &Value) -> (bool, String) {
        let Some(length) = actual.length() else {
            return (
                false,
                format!("{}: length unavailable: {}", self.describe(), render(actual)),
            );
        };

        if self.matcher.matches(&length.reflect()).0 {
            (true, String::new())
        } else {
            (
                false,
                format!("{}: got {length}: {}", self.describe(), render(actual)),
            )
        }
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Len({})", render(&self.len))
    }
}

impl_reflect!(Len);
