mod any;
mod derive;
mod equal;
mod len;
mod method;
mod regexp;
mod same;

use std::fmt::{Formatter, Result as FmtResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use muchmatch::{Matcher, MatcherExt, Reflect, Value};

/// Matcher with a fixed result that counts how often it was checked.
#[derive(Clone, Debug)]
pub struct Stub {
    name: &'static str,
    ok: bool,
    calls: Arc<AtomicUsize>,
}

impl Stub {
    pub fn new(name: &'static str, ok: bool) -> Self {
        Self {
            name,
            ok,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Matcher for Stub {
    fn matches(&self, _actual: &Value) -> (bool, String) {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.ok {
            (true, String::new())
        } else {
            (false, "nok".into())
        }
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}()", self.name)
    }
}

impl Reflect for Stub {
    fn type_name() -> std::borrow::Cow<'static, str> {
        std::borrow::Cow::Borrowed("Matcher")
    }

    fn reflect(&self) -> Value {
        Value::Matcher(Arc::new(self.clone()))
    }
}

/// Check `actual` and return the failure description without the diff.
pub fn failure<M: Matcher, T: Reflect + ?Sized>(matcher: &M, actual: &T) -> String {
    let (ok, desc) = matcher.check(actual);
    assert!(!ok, "expected {} to fail", matcher.describe());

    muchmatch::trim_diff(&desc).to_owned()
}

/// Assert that `actual` matches.
pub fn success<M: Matcher, T: Reflect + ?Sized>(matcher: &M, actual: &T) {
    let (ok, desc) = matcher.check(actual);
    assert!(ok, "unexpected failure: {desc}");
}
