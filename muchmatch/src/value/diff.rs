use std::fmt::Write;

use similar::{ChangeTag, TextDiff};

use super::{render, Pointer, Value};

/// Separator between a failure description and the appended diff block.
pub const DIFF_PREFIX: &str = "\n\n\tDiff:\n";

/// Line based difference between the pretty renderings of `expected` and
/// `actual`, starting with [`DIFF_PREFIX`].
///
/// Returns `None` if both values render identically.
#[must_use]
pub fn diff(expected: &Value, actual: &Value) -> Option<String> {
    let old = pretty(expected);
    let new = pretty(actual);
    if old == new {
        return None;
    }

    let mut out = String::from(DIFF_PREFIX);
    for change in TextDiff::from_lines(&old, &new).iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => ' ',
        };

        let _ = writeln!(out, "\t\t{sign} {}", change.value().trim_end_matches('\n'));
    }

    Some(out)
}

/// Cut a failure description at the start of its diff block.
#[must_use]
pub fn trim_diff(desc: &str) -> &str {
    desc.find(DIFF_PREFIX).map_or(desc, |index| &desc[..index])
}

fn pretty(value: &Value) -> String {
    let mut out = String::new();
    write_pretty(&mut out, value, 0);
    out.push('\n');

    out
}

fn write_pretty(out: &mut String, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    let close = "  ".repeat(depth);

    match value {
        Value::Seq { elem, items } if elem != "u8" && !items.is_empty() => {
            let _ = writeln!(out, "[]{elem}{{");
            for item in items {
                out.push_str(&indent);
                write_pretty(out, item, depth + 1);
                out.push_str(",\n");
            }
            let _ = write!(out, "{close}}}");
        }
        Value::Map {
            key,
            value,
            entries,
        } if !entries.is_empty() => {
            let mut entries = entries.iter().collect::<Vec<_>>();
            entries.sort_by_cached_key(|(key, _)| render(key));

            let _ = writeln!(out, "map[{key}]{value}{{");
            for (key, value) in entries {
                let _ = write!(out, "{indent}{}: ", render(key));
                write_pretty(out, value, depth + 1);
                out.push_str(",\n");
            }
            let _ = write!(out, "{close}}}");
        }
        Value::Record(record) if !record.fields.is_empty() => {
            let _ = writeln!(out, "{}{{", record.ty);
            for field in &record.fields {
                let _ = write!(out, "{indent}{}: ", field.name);
                write_pretty(out, &field.value, depth + 1);
                out.push_str(",\n");
            }
            let _ = write!(out, "{close}}}");
        }
        Value::Pointer(Pointer {
            target: Some(target),
            ..
        }) => {
            out.push('&');
            write_pretty(out, target, depth);
        }
        Value::Object(object) if object.display.is_none() => {
            write_pretty(out, &object.inner, depth);
        }
        value => out.push_str(&render(value)),
    }
}
