use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{render, render_list, Reflect, Value};
use crate::MatcherError;

use super::{first_error, to_matcher, Matcher, MatcherExt, SharedMatcher};

/// Conditional matcher: if `condition` matches, the first branch decides,
/// otherwise the optional second branch decides.
///
/// Without a second branch the failure of the condition is reported.
///
/// # Errors
/// Returns an error if not exactly one or two branches are supplied.
pub fn if_<C: Reflect>(condition: C, branches: Vec<Value>) -> Result<If, MatcherError> {
    let condition = condition.reflect();
    let params = || format!("[{} {}]", render(&condition), render_list(&branches));

    let mut iter = branches.iter().cloned().map(to_matcher);
    let (then, otherwise) = match (iter.next(), iter.next(), iter.next()) {
        (None, _, _) => {
            return Err(MatcherError::invalid_arguments(
                "If",
                "at least one branch (then) must be supplied",
                params(),
            ))
        }
        (Some(then), otherwise, None) => (then, otherwise),
        (Some(_), _, Some(_)) => {
            return Err(MatcherError::invalid_arguments(
                "If",
                "at most 2 branches can be supplied (then-else)",
                params(),
            ))
        }
    };

    Ok(If {
        condition: to_matcher(condition),
        then,
        otherwise,
    })
}

/// Matches values that do not match `expected`.
pub fn not<T: Reflect>(expected: T) -> Not {
    let expected = expected.reflect();

    Not {
        matcher: to_matcher(expected.clone()),
        expected,
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct If {
    condition: SharedMatcher,
    then: SharedMatcher,
    otherwise: Option<SharedMatcher>,
}

impl Matcher for If {
    fn matches(&self, actual: &Value) -> (bool, String) {
        let children = [&self.condition, &self.then]
            .into_iter()
            .chain(self.otherwise.as_ref());
        if let Some(err) = first_error(children) {
            return (false, format!("{}: invalid matcher: {err}", self.describe()));
        }

        let (ok, desc) = self.condition.matches(actual);

        match (ok, &self.otherwise) {
            (true, _) => self.then.matches(actual),
            (false, Some(otherwise)) => otherwise.matches(actual),
            (false, None) => (false, desc),
        }
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "If({}, {}", self.condition, self.then)?;

        if let Some(otherwise) = &self.otherwise {
            write!(f, ", {otherwise}")?;
        }

        write!(f, ")")
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Not {
    expected: Value,
    matcher: SharedMatcher,
}

impl Matcher for Not {
    fn matches(&self, actual: &Value) -> (bool, String) {
        if let Some(err) = self.matcher.error() {
            return (false, format!("{}: invalid matcher: {err}", self.describe()));
        }

        if self.matcher.matches(actual).0 {
            (
                false,
                format!("{}: matched: {}", self.describe(), render(actual)),
            )
        } else {
            (true, String::new())
        }
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Not({})", render(&self.expected))
    }
}

impl_reflect!(If, Not);
