use std::cmp::Ordering;

use super::{Precision, Value};

/// Numeric value used for exact comparisons across integer and floating
/// point types.
#[derive(Copy, Clone, Debug)]
pub enum Number {
    Int(i128),
    Uint(u128),
    Float(f64),
}

/// `2^127`, the first float that is larger than every `i128`.
const INT_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// `2^128`, the first float that is larger than every `u128`.
const UINT_LIMIT: f64 = 340_282_366_920_938_463_463_374_607_431_768_211_456.0;

impl Number {
    /// Extract the number of a numeric value, looking through objects.
    ///
    /// The returned flag is `true` for single precision floats.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<(Self, bool)> {
        match value.peel() {
            Value::Int { value, .. } => Some((Self::Int(*value), false)),
            Value::Uint { value, .. } => Some((Self::Uint(*value), false)),
            Value::Float {
                value, precision, ..
            } => Some((Self::Float(*value), *precision == Precision::Single)),
            _ => None,
        }
    }

    /// Round floating point numbers to single precision.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_single(self) -> Self {
        match self {
            Self::Float(value) => Self::Float(f64::from(value as f32)),
            int => int,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (Self::Uint(a), Self::Uint(b)) => Some(a.cmp(&b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(&b),
            (Self::Int(a), Self::Uint(b)) => Some(cmp_int_uint(a, b)),
            (Self::Uint(a), Self::Int(b)) => Some(cmp_int_uint(b, a).reverse()),
            (Self::Int(a), Self::Float(b)) => cmp_int_float(a, b),
            (Self::Float(a), Self::Int(b)) => cmp_int_float(b, a).map(Ordering::reverse),
            (Self::Uint(a), Self::Float(b)) => cmp_uint_float(a, b),
            (Self::Float(a), Self::Uint(b)) => cmp_uint_float(b, a).map(Ordering::reverse),
        }
    }
}

fn cmp_int_uint(int: i128, uint: u128) -> Ordering {
    match u128::try_from(int) {
        Ok(int) => int.cmp(&uint),
        Err(_) => Ordering::Less,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn cmp_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= INT_LIMIT {
        return Some(Ordering::Less);
    }
    if float < -INT_LIMIT {
        return Some(Ordering::Greater);
    }

    let truncated = float.trunc();
    match int.cmp(&(truncated as i128)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - truncated)),
        ordering => Some(ordering),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cmp_uint_float(uint: u128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= UINT_LIMIT {
        return Some(Ordering::Less);
    }
    if float < 0.0 {
        return Some(Ordering::Greater);
    }

    let truncated = float.trunc();
    match uint.cmp(&(truncated as u128)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - truncated)),
        ordering => Some(ordering),
    }
}
