use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use muchmatch::{same, same_pointer, MatcherExt, Reflect};

use crate::{failure, success};

#[derive(Clone, Reflect)]
struct Entry {
    pub message: &'static str,
    pub time: DateTime<Utc>,
}

#[derive(Reflect)]
struct Caller {
    pub file: &'static str,
}

fn entry() -> Entry {
    Entry {
        message: "lol",
        time: Utc.with_ymd_and_hms(2022, 8, 26, 13, 14, 58).unwrap(),
    }
}

const ENTRY: &str = r#"Entry{message:"lol", time:2022-08-26 13:14:58}"#;

#[test]
fn same_values() {
    let entry1 = Rc::new(entry());
    let entry2 = Rc::clone(&entry1);

    success(&same(Rc::clone(&entry1)), &entry2);
    success(&same(entry()), &entry());
    success(&same("Much"), &"Much");
    success(&same(123_i32), &123_i32);

    assert_eq!(
        failure(&same("Much"), &"Such"),
        r#"Same("Much"): not same: &str("Such")"#
    );
    assert_eq!(
        failure(&same(123_i32), &123_i16),
        "Same(123): not same: i16(123)"
    );
    assert_eq!(
        failure(&same("Much"), &String::from("Much")),
        r#"Same("Much"): not same: String("Much")"#
    );
}

#[test]
fn collections_are_never_same() {
    let items = vec![1_i32, 2];

    assert_eq!(
        failure(&same(items.clone()), &items),
        "Same([]i32{1, 2}): not same: []i32([]i32{1, 2})"
    );
}

#[test]
fn same_pointer_requires_identity() {
    let entry1 = Rc::new(entry());
    let entry2 = Rc::clone(&entry1);

    success(&same_pointer(Rc::clone(&entry1)), &entry2);

    let text = Rc::new(String::from("Much"));
    success(&same_pointer(Rc::clone(&text)), &Rc::clone(&text));

    assert_eq!(
        failure(&same_pointer(entry()), &entry()),
        format!("SamePointer({ENTRY}): not pointer: {ENTRY}")
    );
    assert_eq!(
        failure(&same_pointer(Rc::clone(&entry1)), &Rc::new(Caller { file: "much.rs" })),
        format!(r#"SamePointer(*{ENTRY}): not same type: *Caller{{file:"much.rs"}}"#)
    );
    assert_eq!(
        failure(&same_pointer(Rc::clone(&entry1)), &Rc::new(entry())),
        format!("SamePointer(*{ENTRY}): not same: *{ENTRY}")
    );
}

#[test]
fn same_pointer_prechecks_render_plain_values() {
    let number = Rc::new(5_i32);

    assert_eq!(
        failure(&same_pointer(Rc::clone(&number)), &5_i32),
        "SamePointer(*5): not pointer: 5"
    );
    assert_eq!(
        failure(&same_pointer(Rc::clone(&number)), &"Much"),
        r#"SamePointer(*5): not pointer: "Much""#
    );
    assert_eq!(
        failure(&same_pointer(number), &Rc::new(5_i64)),
        "SamePointer(*5): not same type: *5"
    );
}

#[test]
fn failure_contains_diff() {
    let (ok, desc) = same(Entry {
        message: "much",
        ..entry()
    })
    .check(&entry());

    assert!(!ok);
    assert!(desc.contains("\n\n\tDiff:\n"), "{desc}");
    assert!(desc.contains(r#"-   message: "much","#), "{desc}");
    assert!(desc.contains(r#"+   message: "lol","#), "{desc}");
}
