use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{render, stringify, Record, Reflect, Style, Value};

use super::{to_matcher, Matcher, MatcherExt};

/// Matches texts containing `value` as substring, and sequences, mappings
/// or records containing an element matching `value`.
pub fn contains<T: Reflect>(value: T) -> Contains {
    Contains::new("Contains", Mode::Contains, None, Some(value.reflect()))
}

/// Matches sequences with an element at index `key`, and mappings or
/// records with a key or field name matching `key`.
///
/// For sequences the element must not be the zero value.
pub fn contains_key<K: Reflect>(key: K) -> Contains {
    Contains::new("ContainsKey", Mode::Contains, Some(key.reflect()), None)
}

/// Like [`contains_key`], but the element at `key` must also match `value`.
pub fn contains_key_value<K: Reflect, V: Reflect>(key: K, value: V) -> Contains {
    Contains::new(
        "ContainsKeyValue",
        Mode::Contains,
        Some(key.reflect()),
        Some(value.reflect()),
    )
}

/// Matches texts starting with `value`.
pub fn prefix<T: Reflect>(value: T) -> Contains {
    Contains::new("Prefix", Mode::Prefix, None, Some(value.reflect()))
}

/// Matches texts ending with `value`.
pub fn suffix<T: Reflect>(value: T) -> Contains {
    Contains::new("Suffix", Mode::Suffix, None, Some(value.reflect()))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    Contains,
    Prefix,
    Suffix,
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Contains {
    name: &'static str,
    mode: Mode,
    key: Option<Value>,
    value: Option<Value>,
}

type Outcome = (bool, String);

impl Contains {
    fn new(name: &'static str, mode: Mode, key: Option<Value>, value: Option<Value>) -> Self {
        Self {
            name,
            mode,
            key,
            value,
        }
    }

    fn fail(&self, reason: &str) -> Outcome {
        (false, format!("{}: {reason}", self.describe()))
    }

    fn matches_text(&self, text: &str) -> Outcome {
        if self.key.is_some() {
            return self.fail("key can't be used when actual is text");
        }

        let Some(value) = &self.value else {
            return self.fail("value is missing");
        };

        if let Value::Matcher(_) = value {
            return self.fail("value can't be a matcher when actual is text");
        }

        let Some(expected) = stringify(value, Style::Plain) else {
            return self.fail(
                "invalid value; possible types: text, bytes, time, regex, types implementing Display",
            );
        };

        let (ok, reason) = match self.mode {
            Mode::Contains => (text.contains(&expected), "not contained in"),
            Mode::Prefix => (text.starts_with(&expected), "not prefixed"),
            Mode::Suffix => (text.ends_with(&expected), "not suffixed"),
        };

        if ok {
            (true, String::new())
        } else {
            self.fail(&format!("{reason}: {text:?}"))
        }
    }

    fn matches_seq(&self, container: &Value, items: &[Value]) -> Outcome {
        if let Some(key) = &self.key {
            let index = match key.peel() {
                Value::Int { value, .. } => usize::try_from(*value).ok(),
                Value::Uint { value, .. } => usize::try_from(*value).ok(),
                _ => return self.fail("key must be an integer when actual is a sequence"),
            };

            let Some(element) = index.and_then(|index| items.get(index)) else {
                return self.fail(&format!(
                    "key out of range: len(actual) == {}",
                    items.len()
                ));
            };

            return self.matches_element(element);
        }

        if self.mode != Mode::Contains {
            return self.fail("can't be used when actual is a sequence");
        }

        self.find_value(container, items.iter())
    }

    fn matches_map(&self, container: &Value, entries: &[(Value, Value)]) -> Outcome {
        if self.mode != Mode::Contains {
            return self.fail("can't be used when actual is a mapping");
        }

        match &self.key {
            Some(key) => self.find_key(
                container,
                "no such key in",
                entries.iter().map(|(key, value)| (key.clone(), value)),
                key,
            ),
            None => self.find_value(container, entries.iter().map(|(_, value)| value)),
        }
    }

    fn matches_record(&self, container: &Value, record: &Record) -> Outcome {
        if self.mode != Mode::Contains {
            return self.fail("can't be used when actual is a record");
        }

        match &self.key {
            Some(key) => self.find_key(
                container,
                "no such field in",
                record
                    .visible()
                    .map(|field| (Value::text(field.name.to_string()), &field.value)),
                key,
            ),
            None => self.find_value(container, record.visible().map(|field| &field.value)),
        }
    }

    /// Check the element found at the requested key.
    fn matches_element(&self, element: &Value) -> Outcome {
        match &self.value {
            Some(value) => {
                if to_matcher(value.clone()).matches(element).0 {
                    (true, String::new())
                } else {
                    self.fail(&format!("value not matched: {}", render(element)))
                }
            }
            None if element.is_zero() => {
                self.fail(&format!("value is zero: {}", render(element)))
            }
            None => (true, String::new()),
        }
    }

    fn find_key<'a, I>(&self, container: &Value, missing: &str, entries: I, key: &Value) -> Outcome
    where
        I: IntoIterator<Item = (Value, &'a Value)>,
    {
        let key = to_matcher(key.clone());

        for (candidate, element) in entries {
            if key.matches(&candidate).0 {
                return match &self.value {
                    Some(_) => self.matches_element(element),
                    None => (true, String::new()),
                };
            }
        }

        self.fail(&format!("{missing}: {}", render(container)))
    }

    fn find_value<'a, I>(&self, container: &Value, elements: I) -> Outcome
    where
        I: IntoIterator<Item = &'a Value>,
    {
        if let Some(value) = &self.value {
            let matcher = to_matcher(value.clone());

            for element in elements {
                if matcher.matches(element).0 {
                    return (true, String::new());
                }
            }
        }

        self.fail(&format!("no such value in: {}", render(container)))
    }
}

impl Matcher for Contains {
    fn matches(&self, actual: &Value) -> (bool, String) {
        let container = actual.pointee();

        match container {
            Value::Text { value, .. } => self.matches_text(value),
            Value::Seq { items, .. } => self.matches_seq(container, items),
            Value::Map { entries, .. } => self.matches_map(container, entries),
            Value::Record(record) => self.matches_record(container, record),
            _ => self.fail(&format!(
                "unsupported container kind: {}",
                actual.type_name()
            )),
        }
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}(", self.name)?;

        match (&self.key, &self.value) {
            (Some(key), Some(value)) => write!(f, "{}, {}", render(key), render(value))?,
            (Some(key), None) => write!(f, "{}", render(key))?,
            (None, Some(value)) => write!(f, "{}", render(value))?,
            (None, None) => (),
        }

        write!(f, ")")
    }
}

impl_reflect!(Contains);
