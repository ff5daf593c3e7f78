use std::any::type_name;
use std::borrow::Cow;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::value::{render, Reflect, Value};

use super::{Matcher, MatcherExt};

/// Matches values for which the passed function returns `true`.
///
/// The function either takes the dynamic `&Value`, or a concrete type
/// implementing [`FromValue`]. In the latter case the actual value must have
/// exactly that runtime type. The function returns anything implementing
/// [`IntoVerdict`], like `bool` or `(bool, &str)`.
pub fn fn_<M, F: IntoPredicate<M>>(f: F) -> Func {
    Func::new(f.into_predicate())
}

/// Create a [`Predicate`] from the passed function.
///
/// Predicates are reflected as functions and turned into a [`Func`] matcher
/// wherever an expectation value is expected.
pub fn predicate<M, F: IntoPredicate<M>>(f: F) -> Predicate {
    f.into_predicate()
}

type Call = dyn Fn(&Value) -> Result<(bool, String), String> + Send + Sync;

/// Type erased predicate function.
#[derive(Clone)]
pub struct Predicate {
    signature: Cow<'static, str>,
    call: Arc<Call>,
}

impl Predicate {
    /// Signature of the wrapped function.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Returns `true` if both predicates wrap the same function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.call).cast::<()>() == Arc::as_ptr(&other.call).cast::<()>()
    }

    /// Call the predicate.
    ///
    /// # Errors
    /// Returns a description of the problem if the value could not be
    /// converted into the argument of the wrapped function.
    pub fn call(&self, actual: &Value) -> Result<(bool, String), String> {
        (self.call)(actual)
    }
}

impl Debug for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.signature)
    }
}

impl Reflect for Predicate {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("fn")
    }

    fn reflect(&self) -> Value {
        Value::Func(self.clone())
    }
}

/// Result of a predicate function.
pub trait IntoVerdict {
    fn into_verdict(self) -> (bool, String);
}

impl IntoVerdict for bool {
    fn into_verdict(self) -> (bool, String) {
        (self, String::new())
    }
}

impl IntoVerdict for (bool, String) {
    fn into_verdict(self) -> (bool, String) {
        self
    }
}

impl IntoVerdict for (bool, &str) {
    fn into_verdict(self) -> (bool, String) {
        (self.0, self.1.to_owned())
    }
}

/// Types that can be extracted from a [`Value`] of exactly their own
/// runtime type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($variant:ident => $( $type:ty ),+) => {
        $(
            impl FromValue for $type {
                fn from_value(value: &Value) -> Option<Self> {
                    match value.peel() {
                        Value::$variant { ty, value } if ty == stringify!($type) => {
                            <$type>::try_from(*value).ok()
                        }
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_from_value!(Int => i8, i16, i32, i64, isize, i128);
impl_from_value!(Uint => u8, u16, u32, u64, usize, u128);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value.peel() {
            Value::Float { ty, value, .. } if ty == "f64" => Some(*value),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Option<Self> {
        match value.peel() {
            Value::Float { ty, value, .. } if ty == "f32" => Some(*value as f32),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value.peel() {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value.peel() {
            Value::Text { ty, value } if ty == "String" || ty == "&str" => Some(value.clone()),
            _ => None,
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

/// Functions that can be turned into a [`Predicate`].
///
/// The `Marker` parameter only distinguishes the different function shapes.
pub trait IntoPredicate<Marker> {
    fn into_predicate(self) -> Predicate;
}

#[derive(Debug)]
pub struct Dynamic;

#[derive(Debug)]
pub struct Typed<T>(PhantomData<fn() -> T>);

impl<F, R> IntoPredicate<(Dynamic, R)> for F
where
    F: Fn(&Value) -> R + Send + Sync + 'static,
    R: IntoVerdict,
{
    fn into_predicate(self) -> Predicate {
        Predicate {
            signature: Cow::Borrowed("fn(&Value)"),
            call: Arc::new(move |actual: &Value| Ok(self(actual).into_verdict())),
        }
    }
}

impl<F, T, R> IntoPredicate<(Typed<T>, R)> for F
where
    F: Fn(T) -> R + Send + Sync + 'static,
    T: FromValue,
    R: IntoVerdict,
{
    fn into_predicate(self) -> Predicate {
        Predicate {
            signature: Cow::Owned(format!("fn({})", type_name::<T>())),
            call: Arc::new(move |actual: &Value| match T::from_value(actual) {
                Some(value) => Ok(self(value).into_verdict()),
                None => Err(format!(
                    "expected {}, got {}({})",
                    type_name::<T>(),
                    actual.type_name(),
                    render(actual)
                )),
            }),
        }
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Func {
    predicate: Predicate,
}

impl Func {
    pub fn new(predicate: Predicate) -> Self {
        Self { predicate }
    }
}

impl Matcher for Func {
    fn matches(&self, actual: &Value) -> (bool, String) {
        match self.predicate.call(actual) {
            Ok((true, _)) => (true, String::new()),
            Ok((false, desc)) if desc.is_empty() => (
                false,
                format!("{}: not matched value: {}", self.describe(), render(actual)),
            ),
            Ok((false, desc)) => (false, format!("{}: {desc}", self.describe())),
            Err(err) => (false, format!("{}: invalid argument: {err}", self.describe())),
        }
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Fn()")
    }
}

impl_reflect!(Func);
