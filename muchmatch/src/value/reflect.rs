use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;

use super::{render, Pointer, Precision, Reflect, Value};

macro_rules! impl_reflect_int {
    ($variant:ident, $target:ty => $( $type:ty ),+) => {
        $(
            impl Reflect for $type {
                fn type_name() -> Cow<'static, str> {
                    Cow::Borrowed(stringify!($type))
                }

                #[allow(clippy::cast_lossless, clippy::unnecessary_cast)]
                fn reflect(&self) -> Value {
                    Value::$variant {
                        ty: Self::type_name(),
                        value: *self as $target,
                    }
                }
            }
        )+
    };
}

impl_reflect_int!(Int, i128 => i8, i16, i32, i64, isize, i128);
impl_reflect_int!(Uint, u128 => u8, u16, u32, u64, usize, u128);

impl Reflect for f32 {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("f32")
    }

    fn reflect(&self) -> Value {
        Value::Float {
            ty: Self::type_name(),
            value: f64::from(*self),
            precision: Precision::Single,
        }
    }
}

impl Reflect for f64 {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("f64")
    }

    fn reflect(&self) -> Value {
        Value::Float {
            ty: Self::type_name(),
            value: *self,
            precision: Precision::Double,
        }
    }
}

#[cfg(feature = "complex")]
impl Reflect for num_complex::Complex<f32> {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("Complex<f32>")
    }

    fn reflect(&self) -> Value {
        Value::complex32(self.re, self.im)
    }
}

#[cfg(feature = "complex")]
impl Reflect for num_complex::Complex<f64> {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("Complex<f64>")
    }

    fn reflect(&self) -> Value {
        Value::complex(self.re, self.im)
    }
}

impl Reflect for bool {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("bool")
    }

    fn reflect(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Reflect for char {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("char")
    }

    fn reflect(&self) -> Value {
        Value::Text {
            ty: Self::type_name(),
            value: self.to_string(),
        }
    }
}

impl Reflect for str {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("&str")
    }

    fn reflect(&self) -> Value {
        Value::Text {
            ty: Self::type_name(),
            value: self.to_owned(),
        }
    }
}

impl Reflect for String {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("String")
    }

    fn reflect(&self) -> Value {
        Value::Text {
            ty: Self::type_name(),
            value: self.clone(),
        }
    }
}

impl Reflect for () {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("()")
    }

    fn reflect(&self) -> Value {
        Value::Other {
            ty: Self::type_name(),
            repr: "()".into(),
        }
    }
}

impl Reflect for Value {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("any")
    }

    fn reflect(&self) -> Value {
        self.clone()
    }
}

/* References */

impl<T: Reflect + ?Sized> Reflect for &T {
    fn type_name() -> Cow<'static, str> {
        T::type_name()
    }

    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
    fn type_name() -> Cow<'static, str> {
        T::type_name()
    }

    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn type_name() -> Cow<'static, str> {
        T::type_name()
    }

    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Rc<T> {
    fn type_name() -> Cow<'static, str> {
        pointer_name(T::type_name())
    }

    fn reflect(&self) -> Value {
        Value::Pointer(Pointer {
            ty: Self::type_name(),
            addr: Rc::as_ptr(self) as usize,
            target: Some(Box::new((**self).reflect())),
        })
    }
}

impl<T: Reflect> Reflect for Arc<T> {
    fn type_name() -> Cow<'static, str> {
        pointer_name(T::type_name())
    }

    fn reflect(&self) -> Value {
        Value::Pointer(Pointer {
            ty: Self::type_name(),
            addr: Arc::as_ptr(self) as usize,
            target: Some(Box::new((**self).reflect())),
        })
    }
}

/// `None` is reflected as nil pointer, `Some` is transparent.
impl<T: Reflect> Reflect for Option<T> {
    fn type_name() -> Cow<'static, str> {
        T::type_name()
    }

    fn reflect(&self) -> Value {
        match self {
            Some(value) => value.reflect(),
            None => Value::Pointer(Pointer {
                ty: pointer_name(T::type_name()),
                addr: 0,
                target: None,
            }),
        }
    }
}

fn pointer_name(name: Cow<'static, str>) -> Cow<'static, str> {
    if name.starts_with('*') {
        name
    } else {
        Cow::Owned(format!("*{name}"))
    }
}

/* Sequences */

fn reflect_seq<'a, T, I>(items: I) -> Value
where
    T: Reflect + 'a,
    I: IntoIterator<Item = &'a T>,
{
    Value::Seq {
        elem: T::type_name(),
        items: items.into_iter().map(Reflect::reflect).collect(),
    }
}

fn seq_name<T: Reflect + ?Sized>() -> Cow<'static, str> {
    Cow::Owned(format!("[]{}", T::type_name()))
}

impl<T: Reflect> Reflect for [T] {
    fn type_name() -> Cow<'static, str> {
        seq_name::<T>()
    }

    fn reflect(&self) -> Value {
        reflect_seq(self)
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn type_name() -> Cow<'static, str> {
        seq_name::<T>()
    }

    fn reflect(&self) -> Value {
        reflect_seq(self)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_name() -> Cow<'static, str> {
        seq_name::<T>()
    }

    fn reflect(&self) -> Value {
        reflect_seq(self)
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn type_name() -> Cow<'static, str> {
        seq_name::<T>()
    }

    fn reflect(&self) -> Value {
        reflect_seq(self)
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn type_name() -> Cow<'static, str> {
        seq_name::<T>()
    }

    fn reflect(&self) -> Value {
        reflect_seq(self)
    }
}

/// Items are sorted by their rendering to get a stable order.
impl<T: Reflect, S> Reflect for HashSet<T, S> {
    fn type_name() -> Cow<'static, str> {
        seq_name::<T>()
    }

    fn reflect(&self) -> Value {
        let mut items = self.iter().map(Reflect::reflect).collect::<Vec<_>>();
        items.sort_by_cached_key(render);

        Value::Seq {
            elem: T::type_name(),
            items,
        }
    }
}

/* Mappings */

fn map_name<K: Reflect, V: Reflect>() -> Cow<'static, str> {
    Cow::Owned(format!("map[{}]{}", K::type_name(), V::type_name()))
}

fn reflect_map<'a, K, V, I>(entries: I) -> Value
where
    K: Reflect + 'a,
    V: Reflect + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let mut entries = entries
        .into_iter()
        .map(|(key, value)| (key.reflect(), value.reflect()))
        .collect::<Vec<_>>();
    entries.sort_by_cached_key(|(key, _)| render(key));

    Value::Map {
        key: K::type_name(),
        value: V::type_name(),
        entries,
    }
}

/// Entries are sorted by the rendering of their keys to get a stable order.
impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn type_name() -> Cow<'static, str> {
        map_name::<K, V>()
    }

    fn reflect(&self) -> Value {
        reflect_map(self)
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_name() -> Cow<'static, str> {
        map_name::<K, V>()
    }

    fn reflect(&self) -> Value {
        reflect_map(self)
    }
}

/* Time */

/// Durations render like their debug output and compare by nanoseconds.
impl Reflect for Duration {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("Duration")
    }

    fn reflect(&self) -> Value {
        Value::Uint {
            ty: Self::type_name(),
            value: self.as_nanos(),
        }
        .with_display(format!("{self:?}"))
    }
}

impl Reflect for SystemTime {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("time")
    }

    fn reflect(&self) -> Value {
        Value::Time(DateTime::<Utc>::from(*self))
    }
}

impl<Tz: TimeZone> Reflect for DateTime<Tz> {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("time")
    }

    fn reflect(&self) -> Value {
        Value::Time(self.with_timezone(&Utc))
    }
}

impl Reflect for Regex {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("Regexp")
    }

    fn reflect(&self) -> Value {
        Value::Regex(self.clone())
    }
}
