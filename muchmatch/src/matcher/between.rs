use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{render, Number, Reflect, Value};

use super::{Matcher, MatcherExt};

/// Matches numbers inside the closed interval `[min, max]`.
///
/// Operands of different numeric types are compared exactly. If any operand
/// is a single precision float, all float operands are rounded to single
/// precision first.
pub fn between<A: Reflect, B: Reflect>(min: A, max: B) -> Between {
    Between {
        min: min.reflect(),
        max: max.reflect(),
        strict: false,
    }
}

/// Like [`between`], but `min`, `max` and the actual value need to have the
/// exact same type.
pub fn between_strict<A: Reflect, B: Reflect>(min: A, max: B) -> Between {
    Between {
        min: min.reflect(),
        max: max.reflect(),
        strict: true,
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Between {
    min: Value,
    max: Value,
    strict: bool,
}

impl Matcher for Between {
    fn matches(&self, actual: &Value) -> (bool, String) {
        if self.strict {
            if self.min.type_name() != self.max.type_name() {
                return (
                    false,
                    format!(
                        "{}: min and max have different types: min({}) max({})",
                        self.describe(),
                        self.min.type_name(),
                        self.max.type_name()
                    ),
                );
            }

            if self.min.type_name() != actual.type_name() {
                return (
                    false,
                    format!(
                        "{}: different type: {}({})",
                        self.describe(),
                        actual.type_name(),
                        render(actual)
                    ),
                );
            }
        }

        match in_range(&self.min, &self.max, actual) {
            Some(true) => (true, String::new()),
            Some(false) => (
                false,
                format!("{}: outside range: {}", self.describe(), render(actual)),
            ),
            None => (
                false,
                format!(
                    "{}: not comparable: {}({})",
                    self.describe(),
                    actual.type_name(),
                    render(actual)
                ),
            ),
        }
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = if self.strict { "BetweenStrict" } else { "Between" };

        write!(f, "{name}({}, {})", render(&self.min), render(&self.max))
    }
}

impl_reflect!(Between);

/// Check if `actual` is inside `[min, max]`.
///
/// Returns `None` if any operand is not a number.
pub(crate) fn in_range(min: &Value, max: &Value, actual: &Value) -> Option<bool> {
    let [Some((min, min_single)), Some((max, max_single)), Some((actual, actual_single))] =
        [min, max, actual].map(Number::from_value)
    else {
        return None;
    };

    let single = min_single || max_single || actual_single;
    let normalize = |number: Number| if single { number.to_single() } else { number };
    let (min, max, actual) = (normalize(min), normalize(max), normalize(actual));

    Some(min <= actual && actual <= max)
}
