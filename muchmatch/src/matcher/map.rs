use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{render, render_list, Reflect, Value};
use crate::MatcherError;

use super::{all, contains_key_value, len, Matcher, MatcherExt};

/// Matches mappings (and records) containing every passed key with a value
/// matching the expectation that follows the key.
///
/// `pairs` is a flat list of alternating keys and values.
///
/// # Errors
/// Returns an error if `pairs` has an odd number of elements.
pub fn map(pairs: Vec<Value>) -> Result<Map, MatcherError> {
    Map::new(pairs, false)
}

/// Like [`map`], but the mapping must not contain any other entries.
///
/// # Errors
/// Returns an error if `pairs` has an odd number of elements.
pub fn map_exact(pairs: Vec<Value>) -> Result<Map, MatcherError> {
    Map::new(pairs, true)
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Map {
    pairs: Vec<Value>,
    exact: bool,
}

impl Map {
    fn new(pairs: Vec<Value>, exact: bool) -> Result<Self, MatcherError> {
        if pairs.len() % 2 != 0 {
            let name = if exact { "MapExact" } else { "Map" };

            return Err(MatcherError::invalid_arguments(
                name,
                "keys and values must be pairs; eg.: \"key\", \"lorem\", \"otherKey\", 123",
                render_list(&pairs),
            ));
        }

        Ok(Self { pairs, exact })
    }

    fn inner(&self) -> Box<dyn Matcher> {
        if self.exact {
            let map = Self {
                pairs: self.pairs.clone(),
                exact: false,
            };

            return Box::new(all(vec![map.reflect(), len(self.pairs.len() / 2).reflect()]));
        }

        if let [key, value] = self.pairs.as_slice() {
            return Box::new(contains_key_value(key.clone(), value.clone()));
        }

        let matchers = self
            .pairs
            .chunks_exact(2)
            .map(|pair| contains_key_value(pair[0].clone(), pair[1].clone()).reflect())
            .collect();

        Box::new(all(matchers))
    }
}

impl Matcher for Map {
    fn matches(&self, actual: &Value) -> (bool, String) {
        let inner = self.inner();

        let (ok, desc) = inner.matches(actual);
        if ok {
            return (true, String::new());
        }

        let prefix = inner.describe();
        let desc = desc.strip_prefix(prefix.as_str()).unwrap_or(&desc);

        (false, format!("{}{desc}", self.describe()))
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = if self.exact { "MapExact" } else { "Map" };
        let args = self.pairs.iter().map(render).collect::<Vec<_>>();

        write!(f, "{name}({})", args.join(", "))
    }
}

impl_reflect!(Map);
