//! The [`value`](self) module defines the dynamic [`Value`] every matcher
//! operates on, and the [`Reflect`] trait that produces it from ordinary
//! rust values.
//!
//! A [`Value`] is an owned, acyclic snapshot of the reflected data. Because
//! reflection never follows weak back-edges, every algorithm working on a
//! [`Value`] (rendering, comparing, searching) terminates.

mod diff;
mod number;
mod reflect;
mod render;

use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;

use crate::matcher::{Matcher, Predicate};

pub use diff::{diff, trim_diff, DIFF_PREFIX};
pub use number::Number;
pub use render::{plain, render, render_list, stringify, Style};

/// Types that can be converted into a dynamic [`Value`].
///
/// Implementations exist for the primitive types, strings, the standard
/// collections, smart pointers and time types. Records are usually
/// implemented using `#[derive(Reflect)]`.
pub trait Reflect {
    /// Name of the type as it is used in rendered values.
    fn type_name() -> Cow<'static, str>;

    /// Take a snapshot of `self` as dynamic [`Value`].
    fn reflect(&self) -> Value;
}

/// Runtime kind of a [`Value`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    Text,
    SignedInt,
    UnsignedInt,
    Float,
    Complex,
    Sequence,
    Mapping,
    Record,
    Pointer,
    Other,
}

impl Kind {
    /// Returns `true` for the signed, unsigned and floating point kinds.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::SignedInt | Self::UnsignedInt | Self::Float)
    }
}

/// Precision of a floating point (or complex) value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Precision {
    Single,
    Double,
}

/// Dynamic representation of any reflected value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int {
        ty: Cow<'static, str>,
        value: i128,
    },
    Uint {
        ty: Cow<'static, str>,
        value: u128,
    },
    Float {
        ty: Cow<'static, str>,
        value: f64,
        precision: Precision,
    },
    Complex {
        ty: Cow<'static, str>,
        re: f64,
        im: f64,
        precision: Precision,
    },
    Text {
        ty: Cow<'static, str>,
        value: String,
    },
    Seq {
        elem: Cow<'static, str>,
        items: Vec<Value>,
    },
    Map {
        key: Cow<'static, str>,
        value: Cow<'static, str>,
        entries: Vec<(Value, Value)>,
    },
    Record(Record),
    Pointer(Pointer),
    Object(Object),
    Time(DateTime<Utc>),
    Regex(Regex),
    Matcher(Arc<dyn Matcher>),
    Func(Predicate),
    Other {
        ty: Cow<'static, str>,
        repr: String,
    },
}

/// A record (struct like) value with named fields.
#[derive(Clone, PartialEq)]
pub struct Record {
    pub ty: Cow<'static, str>,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new<T: Into<Cow<'static, str>>>(ty: T, fields: Vec<Field>) -> Self {
        Self {
            ty: ty.into(),
            fields,
        }
    }

    /// Iterate over the fields that are not hidden.
    pub fn visible(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| !field.hidden)
    }
}

/// Single field of a [`Record`].
///
/// Hidden fields are the non-public fields of a rust struct. They take part
/// in equality checks but not in rendering or containment lookups.
#[derive(Clone, PartialEq)]
pub struct Field {
    pub name: Cow<'static, str>,
    pub value: Value,
    pub hidden: bool,
}

impl Field {
    pub fn new<N: Into<Cow<'static, str>>>(name: N, value: Value, hidden: bool) -> Self {
        Self {
            name: name.into(),
            value,
            hidden,
        }
    }
}

/// A shared pointer. `addr` identifies the pointee, a missing `target` is a
/// nil pointer.
#[derive(Clone)]
pub struct Pointer {
    pub ty: Cow<'static, str>,
    pub addr: usize,
    pub target: Option<Box<Value>>,
}

/// Wraps a structural value together with the capabilities of the type it
/// was reflected from.
#[derive(Clone)]
pub struct Object {
    pub ty: Cow<'static, str>,
    pub inner: Box<Value>,
    pub display: Option<String>,
    pub methods: Option<Arc<dyn Invoke>>,
}

/// Capability to invoke named methods on a reflected value.
///
/// Used by the [`Method`](crate::matcher::Method) matcher.
pub trait Invoke: Send + Sync {
    /// Invoke `method` with the passed `args` and return all return values.
    ///
    /// # Errors
    /// Returns [`InvokeError::NotDefined`] if the method does not exist, or
    /// any other [`InvokeError`] if the invocation failed.
    fn invoke(&self, method: &str, args: &[Value]) -> Result<Vec<Value>, InvokeError>;
}

/// Error returned by [`Invoke::invoke`].
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("not defined")]
    NotDefined,

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{0}")]
    Failed(String),
}

impl Value {
    /// Create a new text value of type `String`.
    pub fn text<S: Into<String>>(value: S) -> Self {
        Self::Text {
            ty: Cow::Borrowed("String"),
            value: value.into(),
        }
    }

    /// Create a new double precision complex value.
    #[must_use]
    pub fn complex(re: f64, im: f64) -> Self {
        Self::Complex {
            ty: Cow::Borrowed("Complex<f64>"),
            re,
            im,
            precision: Precision::Double,
        }
    }

    /// Create a new single precision complex value.
    #[must_use]
    pub fn complex32(re: f32, im: f32) -> Self {
        Self::Complex {
            ty: Cow::Borrowed("Complex<f32>"),
            re: f64::from(re),
            im: f64::from(im),
            precision: Precision::Single,
        }
    }

    /// Runtime kind of the value. [`Object`] wrappers are looked through.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Int { .. } => Kind::SignedInt,
            Self::Uint { .. } => Kind::UnsignedInt,
            Self::Float { .. } => Kind::Float,
            Self::Complex { .. } => Kind::Complex,
            Self::Text { .. } => Kind::Text,
            Self::Seq { .. } => Kind::Sequence,
            Self::Map { .. } => Kind::Mapping,
            Self::Record(_) => Kind::Record,
            Self::Pointer(_) => Kind::Pointer,
            Self::Object(object) => object.inner.kind(),
            Self::Nil
            | Self::Bool(_)
            | Self::Time(_)
            | Self::Regex(_)
            | Self::Matcher(_)
            | Self::Func(_)
            | Self::Other { .. } => Kind::Other,
        }
    }

    /// Runtime type name of the value.
    #[must_use]
    pub fn type_name(&self) -> Cow<'_, str> {
        match self {
            Self::Nil => Cow::Borrowed("nil"),
            Self::Bool(_) => Cow::Borrowed("bool"),
            Self::Int { ty, .. }
            | Self::Uint { ty, .. }
            | Self::Float { ty, .. }
            | Self::Complex { ty, .. }
            | Self::Text { ty, .. }
            | Self::Other { ty, .. } => Cow::Borrowed(ty),
            Self::Seq { elem, .. } => Cow::Owned(format!("[]{elem}")),
            Self::Map { key, value, .. } => Cow::Owned(format!("map[{key}]{value}")),
            Self::Record(record) => Cow::Borrowed(&record.ty),
            Self::Pointer(pointer) => Cow::Borrowed(&pointer.ty),
            Self::Object(object) => Cow::Borrowed(&object.ty),
            Self::Time(_) => Cow::Borrowed("time"),
            Self::Regex(_) => Cow::Borrowed("Regexp"),
            Self::Matcher(_) => Cow::Borrowed("Matcher"),
            Self::Func(predicate) => Cow::Borrowed(predicate.signature()),
        }
    }

    /// Strip all [`Object`] wrappers.
    #[must_use]
    pub fn peel(&self) -> &Value {
        let mut value = self;

        while let Self::Object(object) = value {
            value = &object.inner;
        }

        value
    }

    /// Strip all [`Object`] wrappers and follow all non-nil pointers.
    #[must_use]
    pub fn pointee(&self) -> &Value {
        let mut value = self;

        loop {
            match value {
                Self::Object(object) => value = &object.inner,
                Self::Pointer(Pointer {
                    target: Some(target),
                    ..
                }) => value = target,
                _ => return value,
            }
        }
    }

    /// Returns `true` if this is [`Value::Nil`] or a nil pointer.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Self::Nil | Self::Pointer(Pointer { target: None, .. })
        )
    }

    /// Returns `true` if the value equals the zero value of its type.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Nil => true,
            Self::Bool(value) => !value,
            Self::Int { value, .. } => *value == 0,
            Self::Uint { value, .. } => *value == 0,
            Self::Float { value, .. } => *value == 0.0,
            Self::Complex { re, im, .. } => *re == 0.0 && *im == 0.0,
            Self::Text { value, .. } => value.is_empty(),
            Self::Seq { items, .. } => items.is_empty(),
            Self::Map { entries, .. } => entries.is_empty(),
            Self::Record(record) => record.fields.iter().all(|field| field.value.is_zero()),
            Self::Pointer(pointer) => pointer.target.is_none(),
            Self::Object(object) => object.inner.is_zero(),
            Self::Time(time) => *time == DateTime::<Utc>::default(),
            Self::Regex(regex) => regex.as_str().is_empty(),
            Self::Matcher(_) | Self::Func(_) | Self::Other { .. } => false,
        }
    }

    /// Length of texts (in bytes), sequences and mappings.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        match self.pointee() {
            Self::Text { value, .. } => Some(value.len()),
            Self::Seq { items, .. } => Some(items.len()),
            Self::Map { entries, .. } => Some(entries.len()),
            _ => None,
        }
    }

    /// Text produced by the stringification capability of the value, if any.
    #[must_use]
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Self::Object(Object {
                display: Some(display),
                ..
            }) => Some(display),
            Self::Object(object) => object.inner.display_text(),
            Self::Pointer(Pointer {
                target: Some(target),
                ..
            }) => target.display_text(),
            _ => None,
        }
    }

    /// Method invocation capability of the value, if any.
    #[must_use]
    pub fn methods(&self) -> Option<&Arc<dyn Invoke>> {
        match self {
            Self::Object(Object {
                methods: Some(methods),
                ..
            }) => Some(methods),
            Self::Object(object) => object.inner.methods(),
            Self::Pointer(Pointer {
                target: Some(target),
                ..
            }) => target.methods(),
            _ => None,
        }
    }

    /// Attach the stringification capability to the value.
    #[must_use]
    pub fn with_display<S: Into<String>>(self, display: S) -> Self {
        let mut object = self.into_object();
        object.display = Some(display.into());

        Self::Object(object)
    }

    /// Attach the method invocation capability to the value.
    #[must_use]
    pub fn with_methods(self, methods: Arc<dyn Invoke>) -> Self {
        let mut object = self.into_object();
        object.methods = Some(methods);

        Self::Object(object)
    }

    /// Change the runtime type name of the value.
    ///
    /// Used for newtypes that should behave like the type they wrap.
    #[must_use]
    pub fn retyped<T: Into<Cow<'static, str>>>(self, name: T) -> Self {
        let name = name.into();

        match self {
            Self::Int { value, .. } => Self::Int { ty: name, value },
            Self::Uint { value, .. } => Self::Uint { ty: name, value },
            Self::Float {
                value, precision, ..
            } => Self::Float {
                ty: name,
                value,
                precision,
            },
            Self::Complex {
                re, im, precision, ..
            } => Self::Complex {
                ty: name,
                re,
                im,
                precision,
            },
            Self::Text { value, .. } => Self::Text { ty: name, value },
            Self::Record(record) => Self::Record(Record::new(name, record.fields)),
            Self::Object(mut object) => {
                object.ty = name;

                Self::Object(object)
            }
            value => Self::Object(Object {
                ty: name,
                inner: Box::new(value),
                display: None,
                methods: None,
            }),
        }
    }

    /// Language level identity of two values: same runtime type and equal
    /// data, pointers are compared by address.
    ///
    /// Returns `None` if the values are not comparable by identity
    /// (sequences, mappings and anything containing them).
    #[must_use]
    pub fn identical(&self, other: &Value) -> Option<bool> {
        if self.type_name() != other.type_name() {
            return Some(false);
        }

        match (self, other) {
            (Self::Seq { .. } | Self::Map { .. }, _) | (_, Self::Seq { .. } | Self::Map { .. }) => {
                None
            }
            (Self::Pointer(a), Self::Pointer(b)) => {
                Some(a.addr == b.addr && a.target.is_some() == b.target.is_some())
            }
            (Self::Record(a), Self::Record(b)) => {
                if a.fields.len() != b.fields.len() {
                    return Some(false);
                }

                let mut identical = true;
                for (a, b) in a.fields.iter().zip(&b.fields) {
                    identical &= a.name == b.name && a.value.identical(&b.value)?;
                }

                Some(identical)
            }
            (Self::Object(a), Self::Object(b)) => a.inner.identical(&b.inner),
            (a, b) => Some(a == b),
        }
    }

    fn into_object(self) -> Object {
        match self {
            Self::Object(object) => object,
            value => Object {
                ty: Cow::Owned(value.type_name().into_owned()),
                inner: Box::new(value),
                display: None,
                methods: None,
            },
        }
    }
}

/// Deep structural equality. Runtime types must match exactly, mappings are
/// compared independent of their entry order.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int { ty: t1, value: v1 }, Self::Int { ty: t2, value: v2 }) => {
                t1 == t2 && v1 == v2
            }
            (Self::Uint { ty: t1, value: v1 }, Self::Uint { ty: t2, value: v2 }) => {
                t1 == t2 && v1 == v2
            }
            (
                Self::Float {
                    ty: t1, value: v1, ..
                },
                Self::Float {
                    ty: t2, value: v2, ..
                },
            ) => t1 == t2 && v1 == v2,
            (
                Self::Complex {
                    ty: t1,
                    re: r1,
                    im: i1,
                    ..
                },
                Self::Complex {
                    ty: t2,
                    re: r2,
                    im: i2,
                    ..
                },
            ) => t1 == t2 && r1 == r2 && i1 == i2,
            (Self::Text { ty: t1, value: v1 }, Self::Text { ty: t2, value: v2 }) => {
                t1 == t2 && v1 == v2
            }
            (Self::Seq { elem: e1, items: i1 }, Self::Seq { elem: e2, items: i2 }) => {
                e1 == e2 && i1 == i2
            }
            (
                Self::Map {
                    key: k1,
                    value: v1,
                    entries: e1,
                },
                Self::Map {
                    key: k2,
                    value: v2,
                    entries: e2,
                },
            ) => {
                k1 == k2
                    && v1 == v2
                    && e1.len() == e2.len()
                    && e1.iter().all(|(key, value)| {
                        e2.iter()
                            .any(|(other_key, other_value)| key == other_key && value == other_value)
                    })
            }
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Pointer(a), Self::Pointer(b)) => a.ty == b.ty && a.target == b.target,
            (Self::Object(a), Self::Object(b)) => {
                a.ty == b.ty && a.display == b.display && a.inner == b.inner
            }
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            (Self::Matcher(a), Self::Matcher(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            (Self::Func(a), Self::Func(b)) => a.ptr_eq(b),
            (Self::Other { ty: t1, repr: r1 }, Self::Other { ty: t2, repr: r2 }) => {
                t1 == t2 && r1 == r2
            }
            (_, _) => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&render(self))
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&render(self))
    }
}

impl Debug for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&Value::Record(self.clone()), f)
    }
}

impl Debug for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{:?}", self.name, self.value)
    }
}

impl Debug for Pointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&Value::Pointer(self.clone()), f)
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&Value::Object(self.clone()), f)
    }
}
