use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{render, InvokeError, Value};

use super::{first_error, to_matchers, Matcher, MatcherExt, SharedMatcher};

/// Matches values that have a method called `name` whose return values
/// match `results` (one expectation per return value).
///
/// The method is looked up using the [`Invoke`](crate::value::Invoke)
/// capability of the actual value.
pub fn method<S: Into<String>>(name: S, results: Vec<Value>) -> Method {
    Method {
        name: name.into(),
        args: Vec::new(),
        results: to_matchers(results),
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Method {
    name: String,
    args: Vec<Value>,
    results: Vec<SharedMatcher>,
}

impl Method {
    /// Arguments the method is invoked with.
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;

        self
    }
}

impl Matcher for Method {
    fn matches(&self, actual: &Value) -> (bool, String) {
        let this = self.describe();

        if let Some(err) = first_error(&self.results) {
            return (false, format!("{this}: invalid matcher: {err}"));
        }

        let Some(methods) = actual.methods() else {
            return (false, format!("{this}: not defined on: {}", render(actual)));
        };

        let values = match methods.invoke(&self.name, &self.args) {
            Ok(values) => values,
            Err(InvokeError::NotDefined) => {
                return (false, format!("{this}: not defined on: {}", render(actual)));
            }
            Err(err) => {
                return (
                    false,
                    format!("{this}: invocation failed: {err}: {}", render(actual)),
                );
            }
        };

        if values.len() != self.results.len() {
            return (
                false,
                format!(
                    "{this}: expected {} return values, got {}, value: {}",
                    values.len(),
                    self.results.len(),
                    render(actual)
                ),
            );
        }

        for (index, (matcher, value)) in self.results.iter().zip(&values).enumerate() {
            let (ok, desc) = matcher.matches(value);
            if !ok {
                return (
                    false,
                    format!("{this}: return value at index {index} not matched: {desc}"),
                );
            }
        }

        (true, String::new())
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Method({})", self.name)
    }
}

impl_reflect!(Method);
