use std::fmt::Write;

use chrono::{DateTime, Timelike, Utc};

use super::{Object, Pointer, Precision, Record, Value};

/// Style used by [`stringify`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Style {
    /// Bare text, as it would be printed.
    Plain,

    /// Text as it appears inside a rendered value.
    Quoted,
}

/// Convert the value into text, if it has a natural text form.
///
/// Text, byte sequences that are valid UTF-8, time stamps, regular
/// expressions, matchers and values with the stringification capability
/// have a text form. For everything else `None` is returned.
#[must_use]
pub fn stringify(value: &Value, style: Style) -> Option<String> {
    let quoted = style == Style::Quoted;

    match value {
        Value::Text { value, .. } if quoted => Some(format!("\"{value}\"")),
        Value::Text { value, .. } => Some(value.clone()),
        Value::Seq { elem, items } if elem == "u8" => {
            let bytes = items
                .iter()
                .map(|item| match item {
                    Value::Uint { value, .. } => u8::try_from(*value).ok(),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()?;
            let text = String::from_utf8(bytes).ok()?;

            Some(if quoted { format!("\"{text}\"") } else { text })
        }
        Value::Time(time) => Some(format_time(time)),
        Value::Regex(regex) if quoted => Some(format!("`{}`", regex.as_str())),
        Value::Regex(regex) => Some(regex.as_str().to_owned()),
        Value::Matcher(matcher) => Some(matcher.to_string()),
        Value::Object(Object {
            ty,
            display: Some(display),
            ..
        }) if quoted => Some(format!("{ty}({display})")),
        Value::Object(Object {
            display: Some(display),
            ..
        }) => Some(display.clone()),
        _ => None,
    }
}

/// Canonical single line rendering of a value.
///
/// This is the rendering used in every matcher description.
#[must_use]
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);

    out
}

/// Text form of the value if it has one, the canonical rendering otherwise.
#[must_use]
pub fn plain(value: &Value) -> String {
    stringify(value, Style::Plain).unwrap_or_else(|| render(value))
}

/// Render a list of values in their [`plain`] form as `[a b c]`.
#[must_use]
pub fn render_list(values: &[Value]) -> String {
    let items = values.iter().map(plain).collect::<Vec<_>>();

    format!("[{}]", items.join(" "))
}

fn write_value(out: &mut String, value: &Value) {
    if let Some(text) = stringify(value, Style::Quoted) {
        out.push_str(&text);

        return;
    }

    match value {
        Value::Nil => out.push_str("nil"),
        Value::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
        Value::Int { value, .. } => {
            let _ = write!(out, "{value}");
        }
        Value::Uint { value, .. } => {
            let _ = write!(out, "{value}");
        }
        Value::Float {
            value, precision, ..
        } => out.push_str(&format_float(*value, *precision)),
        Value::Complex {
            re, im, precision, ..
        } => {
            let im = format_float(*im, *precision);
            let sign = if im.starts_with(['-', '+']) || im == "NaN" {
                ""
            } else {
                "+"
            };

            let _ = write!(out, "({}{sign}{im}i)", format_float(*re, *precision));
        }
        Value::Seq { elem, items } => {
            let _ = write!(out, "[]{elem}{{");
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push('}');
        }
        Value::Map {
            key,
            value,
            entries,
        } => {
            let mut entries = entries
                .iter()
                .map(|(key, value)| (render(key), render(value)))
                .collect::<Vec<_>>();
            entries.sort();

            let _ = write!(out, "map[{key}]{value}{{");
            for (index, (key, value)) in entries.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{key}:{value}");
            }
            out.push('}');
        }
        Value::Record(record) => write_record(out, record),
        Value::Pointer(Pointer {
            target: Some(target),
            ..
        }) => {
            out.push('*');
            write_value(out, target);
        }
        Value::Pointer(Pointer { ty, .. }) => {
            let _ = write!(out, "{ty}(nil)");
        }
        Value::Object(object) => write_value(out, &object.inner),
        Value::Func(predicate) => out.push_str(predicate.signature()),
        Value::Other { repr, .. } => out.push_str(repr),
        // rendered by `stringify`
        Value::Text { .. } | Value::Time(_) | Value::Regex(_) | Value::Matcher(_) => (),
    }
}

fn write_record(out: &mut String, record: &Record) {
    let mut fields = record
        .visible()
        .filter(|field| !field.value.is_zero())
        .map(|field| (field.name.as_ref(), render(&field.value)))
        .collect::<Vec<_>>();
    fields.sort();

    let _ = write!(out, "{}{{", record.ty);
    for (index, (name, value)) in fields.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{name}:{value}");
    }
    out.push('}');
}

/// Format a time stamp as `2006-01-02 15:04:05.999999` where trailing zeros
/// of the fraction are trimmed.
pub(crate) fn format_time(time: &DateTime<Utc>) -> String {
    let mut text = time.format("%Y-%m-%d %H:%M:%S").to_string();

    let micros = time.nanosecond() % 1_000_000_000 / 1_000;
    if micros > 0 {
        let fraction = format!("{micros:06}");
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }

    text
}

/// Shortest decimal representation of a float that still round trips at the
/// given precision. Exponent notation is used for exponents below `-4` or
/// from `6` on.
pub(crate) fn format_float(value: f64, precision: Precision) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.into();
    }

    #[allow(clippy::cast_possible_truncation)]
    let scientific = match precision {
        Precision::Single => format!("{:e}", value as f32),
        Precision::Double => format!("{value:e}"),
    };

    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(mantissa) => ("-", mantissa),
        None => ("", mantissa),
    };
    let digits = mantissa.replace('.', "");

    if !(-4..6).contains(&exponent) {
        let (head, tail) = digits.split_at(1);
        let dot = if tail.is_empty() { "" } else { "." };
        let exp_sign = if exponent < 0 { '-' } else { '+' };

        return format!("{sign}{head}{dot}{tail}e{exp_sign}{:02}", exponent.abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat(usize::try_from(-exponent - 1).unwrap_or_default());

        return format!("{sign}0.{zeros}{digits}");
    }

    let point = usize::try_from(exponent + 1).unwrap_or_default();
    if digits.len() > point {
        let (int, fraction) = digits.split_at(point);

        format!("{sign}{int}.{fraction}")
    } else {
        let zeros = "0".repeat(point - digits.len());

        format!("{sign}{digits}{zeros}")
    }
}
