use std::borrow::Cow;
use std::fmt::{Formatter, Result as FmtResult};
use std::mem::take;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::value::{render, render_list, Value};
use crate::MatcherError;

use super::{first_error, to_matchers, Matcher, SharedMatcher};

/// Matches if every matcher matches. Evaluation stops at the first failure.
pub fn all(matchers: Vec<Value>) -> Aggregate {
    let count = matchers.len();
    let title = format!("All({})", render_list(&matchers));

    Aggregate::new(title, matchers, Quantity::all(count))
}

/// Matches if at least one matcher matches.
pub fn any_of(matchers: Vec<Value>) -> Aggregate {
    let title = format!("AnyOf({})", render_list(&matchers));

    Aggregate::new(title, matchers, Quantity::new(1, None))
}

/// Matches if exactly one matcher matches.
pub fn one_of(matchers: Vec<Value>) -> Aggregate {
    let title = format!("OneOf({})", render_list(&matchers));

    Aggregate::new(title, matchers, Quantity::new(1, Some(1)))
}

/// Matches if at least `n` matchers match.
///
/// # Errors
/// Returns an error if `n` is less than 1.
pub fn at_least_of(n: usize, matchers: Vec<Value>) -> Result<Aggregate, MatcherError> {
    let list = render_list(&matchers);

    if n < 1 {
        return Err(MatcherError::invalid_arguments(
            "AtLeastOf",
            "n can't be less than 1",
            format!("[{n} {list}]"),
        ));
    }

    let title = format!("AtLeastOf({n}, {list})");

    Ok(Aggregate::new(title, matchers, Quantity::new(n, None)))
}

/// Matches if at most `n` matchers match.
pub fn at_most_of(n: usize, matchers: Vec<Value>) -> Aggregate {
    let title = format!("AtMostOf({n}, {})", render_list(&matchers));

    Aggregate::new(title, matchers, Quantity::new(0, Some(n)))
}

/// Matches if at least `min` and at most `max` matchers match.
///
/// # Errors
/// Returns an error if `min` is less than 1 or greater than `max`.
pub fn between_of(min: usize, max: usize, matchers: Vec<Value>) -> Result<Aggregate, MatcherError> {
    let list = render_list(&matchers);

    let reason = if min < 1 {
        Some("min can't be less than 1")
    } else if min > max {
        Some("min can't be more than max")
    } else {
        None
    };

    if let Some(reason) = reason {
        return Err(MatcherError::invalid_arguments(
            "BetweenOf",
            reason,
            format!("[{min} {max} {list}]"),
        ));
    }

    let title = format!("BetweenOf({min}, {max}, {list})");

    Ok(Aggregate::new(title, matchers, Quantity::new(min, Some(max))))
}

/// Aggregates that can be turned into a consuming matcher.
pub trait Stateful: Matcher {
    type Consumable: Matcher;

    /// Create a matcher that removes every candidate once it matched, so
    /// each candidate is satisfied at most once across repeated checks.
    ///
    /// The returned matcher must not be used concurrently.
    fn stateful(&self) -> Self::Consumable;
}

impl<M: Stateful> Stateful for Result<M, MatcherError> {
    type Consumable = Result<M::Consumable, MatcherError>;

    fn stateful(&self) -> Self::Consumable {
        self.as_ref().map(Stateful::stateful).map_err(Clone::clone)
    }
}

/// Required number of matching candidates.
#[derive(Clone, Copy, Debug)]
struct Quantity {
    min: usize,
    max: Option<usize>,
    all: bool,
}

impl Quantity {
    fn new(min: usize, max: Option<usize>) -> Self {
        Self {
            min,
            max,
            all: false,
        }
    }

    fn all(count: usize) -> Self {
        Self {
            min: count,
            max: Some(count),
            all: true,
        }
    }

    fn accepts(&self, count: usize) -> bool {
        let below_max = match self.max {
            Some(max) => count <= max,
            None => true,
        };

        count >= self.min && below_max
    }
}

/// Quantified combination of matchers, created by [`all`], [`any_of`],
/// [`one_of`], [`at_least_of`], [`at_most_of`] and [`between_of`].
#[must_use]
#[derive(Clone, Debug)]
pub struct Aggregate {
    title: Arc<str>,
    quantity: Quantity,
    candidates: Vec<SharedMatcher>,
}

impl Aggregate {
    fn new(title: String, matchers: Vec<Value>, quantity: Quantity) -> Self {
        Self {
            title: title.into(),
            quantity,
            candidates: to_matchers(matchers),
        }
    }
}

impl Matcher for Aggregate {
    fn matches(&self, actual: &Value) -> (bool, String) {
        let mut candidates = Cow::Borrowed(self.candidates.as_slice());

        evaluate(&self.title, self.quantity, &mut candidates, false, actual)
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.title)
    }
}

impl Stateful for Aggregate {
    type Consumable = Consumable;

    fn stateful(&self) -> Consumable {
        Consumable {
            title: self.title.clone(),
            quantity: self.quantity,
            remaining: Arc::new(Mutex::new(self.candidates.clone())),
        }
    }
}

/// Consuming variant of [`Aggregate`], created by [`Stateful::stateful`].
///
/// Clones share the remaining candidates.
#[must_use]
#[derive(Clone, Debug)]
pub struct Consumable {
    title: Arc<str>,
    quantity: Quantity,
    remaining: Arc<Mutex<Vec<SharedMatcher>>>,
}

impl Consumable {
    /// Number of candidates that did not match yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.lock().len()
    }
}

impl Matcher for Consumable {
    fn matches(&self, actual: &Value) -> (bool, String) {
        let mut remaining = self.remaining.lock();
        let mut candidates = Cow::Owned(take(&mut *remaining));

        let result = evaluate(&self.title, self.quantity, &mut candidates, true, actual);
        *remaining = candidates.into_owned();

        result
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.title)
    }
}

impl_reflect!(Aggregate, Consumable);

fn evaluate(
    title: &str,
    quantity: Quantity,
    candidates: &mut Cow<'_, [SharedMatcher]>,
    consume: bool,
    actual: &Value,
) -> (bool, String) {
    if let Some(err) = first_error(candidates.iter()) {
        return (false, format!("{title}: invalid matcher: {err}"));
    }

    let mut count = 0;
    let mut index = 0;

    while index < candidates.len() {
        let (ok, desc) = candidates[index].matches(actual);

        trace!(aggregate = title, index, ok, "Candidate checked");

        if !ok {
            if quantity.all {
                let failed = if candidates.len().saturating_sub(count) > 1 {
                    format!("at least one (index {index}) failed")
                } else {
                    format!("got {}", count_word(count))
                };

                return (false, format!("{title}: {failed}: {desc}"));
            }

            index += 1;

            continue;
        }

        if consume {
            candidates.to_mut().remove(index);

            trace!(aggregate = title, index, "Candidate consumed");
        } else {
            index += 1;
        }

        count += 1;
        if quantity.max.is_none() && count == quantity.min {
            return (true, String::new());
        }
    }

    if quantity.accepts(count) {
        (true, String::new())
    } else {
        (
            false,
            format!("{title}: got {}: {}", count_word(count), render(actual)),
        )
    }
}

fn count_word(count: usize) -> Cow<'static, str> {
    const WORDS: [&str; 13] = [
        "none", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve",
    ];

    match WORDS.get(count) {
        Some(word) => Cow::Borrowed(word),
        None => Cow::Owned(count.to_string()),
    }
}
