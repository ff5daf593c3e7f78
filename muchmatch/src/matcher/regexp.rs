use std::fmt::{Formatter, Result as FmtResult};

use regex::Regex;

use crate::value::{plain, render, Reflect, Value};
use crate::MatcherError;

use super::{Matcher, MatcherExt};

/// Matches values whose text form matches the regular expression `pattern`.
///
/// `pattern` may be a text or an already compiled [`Regex`].
///
/// # Errors
/// Returns [`MatcherError::InvalidRegex`] if the pattern can not be compiled.
pub fn regexp<T: Reflect>(pattern: T) -> Result<Regexp, MatcherError> {
    let pattern = pattern.reflect();

    if let Value::Regex(regex) = pattern {
        return Ok(Regexp::new(regex));
    }

    let pattern = plain(&pattern);

    match Regex::new(&pattern) {
        Ok(regex) => Ok(Regexp::new(regex)),
        Err(err) => Err(MatcherError::invalid_regex(pattern, err)),
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Regexp {
    regex: Regex,
}

impl Regexp {
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }
}

impl Matcher for Regexp {
    fn matches(&self, actual: &Value) -> (bool, String) {
        let text = plain(actual);

        if self.regex.is_match(&text) {
            (true, String::new())
        } else {
            (
                false,
                format!("{}: not matched: {}", self.describe(), render(actual)),
            )
        }
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Regexp(`{}`)", self.regex.as_str())
    }
}

impl_reflect!(Regexp);
