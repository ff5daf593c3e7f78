use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{diff, render, Kind, Pointer, Reflect, Value};

use super::between::in_range;
use super::{Matcher, MatcherExt};

/// Matches values that are semantically equal to `expected`.
///
/// - Texts match texts and the display text of values.
/// - Numbers match numbers of any numeric type with the same value, and
///   texts equal to the number's decimal rendering.
/// - Sequences, mappings and records are compared recursively.
/// - Pointers are compared by their pointees.
pub fn equal<T: Reflect>(expected: T) -> Equal {
    Equal::new(expected.reflect())
}

/// Like [`equal`] with explicit [`EqualOptions`].
pub fn equal_with<T: Reflect>(expected: T, options: EqualOptions) -> Equal {
    Equal::new(expected.reflect()).with_options(options)
}

/// Options for the [`Equal`] matcher.
#[must_use]
#[derive(Clone, Copy, Debug, Default)]
pub struct EqualOptions {
    ignore_hidden: bool,
    without_diff: bool,
}

impl EqualOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Do not compare hidden record fields.
    pub fn ignore_hidden(mut self) -> Self {
        self.ignore_hidden = true;

        self
    }

    /// Do not append a diff to the failure description.
    pub fn without_diff(mut self) -> Self {
        self.without_diff = true;

        self
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Equal {
    expected: Value,
    options: EqualOptions,
}

impl Equal {
    pub fn new(expected: Value) -> Self {
        Self {
            expected,
            options: EqualOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EqualOptions) -> Self {
        self.options = options;

        self
    }

    fn compare(&self, expected: &Value, actual: &Value) -> bool {
        if expected.is_nil() || actual.is_nil() {
            return expected.is_nil() && actual.is_nil();
        }

        if let Value::Pointer(Pointer {
            target: Some(target),
            ..
        }) = actual
        {
            return self.compare(expected, target);
        }

        match expected.kind() {
            Kind::Text => compare_text(expected, actual),
            Kind::SignedInt | Kind::UnsignedInt | Kind::Float => compare_number(expected, actual),
            Kind::Complex => {
                actual.kind() == Kind::Complex && render(expected.peel()) == render(actual.peel())
            }
            Kind::Sequence => self.compare_seq(expected, actual),
            Kind::Mapping => self.compare_map(expected, actual),
            Kind::Record => self.compare_record(expected, actual),
            Kind::Pointer => match expected.peel() {
                Value::Pointer(Pointer {
                    target: Some(target),
                    ..
                }) => self.compare(target, actual),
                _ => false,
            },
            Kind::Other => expected.peel() == actual.peel(),
        }
    }

    fn compare_seq(&self, expected: &Value, actual: &Value) -> bool {
        let (Value::Seq { items: expected, .. }, Value::Seq { items: actual, .. }) =
            (expected.peel(), actual.peel())
        else {
            return false;
        };

        expected.len() == actual.len()
            && expected
                .iter()
                .zip(actual)
                .all(|(expected, actual)| self.compare(expected, actual))
    }

    fn compare_map(&self, expected: &Value, actual: &Value) -> bool {
        let (
            Value::Map {
                entries: expected, ..
            },
            Value::Map {
                entries: actual, ..
            },
        ) = (expected.peel(), actual.peel())
        else {
            return false;
        };

        if expected.len() != actual.len() {
            return false;
        }

        expected.iter().all(|(key, expected)| {
            let direct = actual.iter().find(|(actual_key, _)| actual_key == key);
            let found = direct.or_else(|| {
                actual
                    .iter()
                    .find(|(actual_key, _)| self.compare(key, actual_key))
            });

            found.is_some_and(|(_, actual)| self.compare(expected, actual))
        })
    }

    fn compare_record(&self, expected: &Value, actual: &Value) -> bool {
        let (Value::Record(expected), Value::Record(actual)) = (expected.peel(), actual.peel())
        else {
            return false;
        };

        if expected.fields.len() != actual.fields.len() {
            return false;
        }

        expected.fields.iter().zip(&actual.fields).all(|(expected, actual)| {
            if expected.name != actual.name {
                return false;
            }

            if self.options.ignore_hidden && (expected.hidden || actual.hidden) {
                return true;
            }

            self.compare(&expected.value, &actual.value)
        })
    }
}

fn compare_text(expected: &Value, actual: &Value) -> bool {
    let Value::Text {
        value: expected, ..
    } = expected.peel()
    else {
        return false;
    };

    match actual.peel() {
        Value::Text { value, .. } => value == expected,
        _ => actual.display_text() == Some(expected.as_str()),
    }
}

fn compare_number(expected: &Value, actual: &Value) -> bool {
    if actual.kind().is_numeric() {
        return in_range(expected, expected, actual) == Some(true);
    }

    let rendered = render(expected.peel());
    match actual.peel() {
        Value::Text { value, .. } => *value == rendered,
        _ => actual.display_text() == Some(rendered.as_str()),
    }
}

impl Matcher for Equal {
    fn matches(&self, actual: &Value) -> (bool, String) {
        if self.compare(&self.expected, actual) {
            return (true, String::new());
        }

        let mut desc = format!("{}: not equal: {}", self.describe(), render(actual));
        if !self.options.without_diff {
            if let Some(diff) = diff(&self.expected, actual) {
                desc.push_str(&diff);
            }
        }

        (false, desc)
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Equal({})", render(&self.expected))
    }
}

impl_reflect!(Equal);
