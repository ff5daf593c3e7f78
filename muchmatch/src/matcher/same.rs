use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{diff, render, Kind, Reflect, Value};

use super::{Matcher, MatcherExt};

/// Matches values that are identical to `expected`: same runtime type and
/// equal data. Pointers are identical if they point to the same location.
///
/// Sequences and mappings have no identity and never match.
pub fn same<T: Reflect>(expected: T) -> Same {
    Same {
        expected: expected.reflect(),
        pointer: false,
    }
}

/// Like [`same`], but both values need to be pointers.
pub fn same_pointer<T: Reflect>(expected: T) -> Same {
    Same {
        expected: expected.reflect(),
        pointer: true,
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Same {
    expected: Value,
    pointer: bool,
}

impl Same {
    fn fail(&self, reason: &str, actual: &Value) -> (bool, String) {
        (false, format!("{}: {reason}: {}", self.describe(), render(actual)))
    }

    fn fail_not_same(&self, actual: &Value) -> (bool, String) {
        let mut desc = format!("{}: not same: ", self.describe());

        match actual.kind() {
            Kind::Record | Kind::Pointer => desc.push_str(&render(actual)),
            _ => desc.push_str(&format!("{}({})", actual.type_name(), render(actual))),
        }

        (false, desc)
    }
}

impl Matcher for Same {
    fn matches(&self, actual: &Value) -> (bool, String) {
        if self.pointer {
            if actual.kind() != Kind::Pointer {
                return self.fail("not pointer", actual);
            }

            if self.expected.type_name() != actual.type_name() {
                return self.fail("not same type", actual);
            }
        }

        if self.expected.identical(actual) == Some(true) {
            return (true, String::new());
        }

        let (ok, mut desc) = self.fail_not_same(actual);
        if let Some(diff) = diff(&self.expected, actual) {
            desc.push_str(&diff);
        }

        (ok, desc)
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = if self.pointer { "SamePointer" } else { "Same" };

        write!(f, "{name}({})", render(&self.expected))
    }
}

impl_reflect!(Same);
