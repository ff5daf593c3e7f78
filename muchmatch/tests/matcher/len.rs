use std::collections::HashMap;

use muchmatch::{between, len, predicate, MatcherExt, Value};
use rstest::rstest;

use crate::{failure, success};

#[test]
fn title() {
    assert_eq!(len(2_usize).describe(), "Len(2)");
    assert_eq!(len(between(1_i32, 3_i32)).describe(), "Len(Between(1, 3))");
}

#[test]
fn collections() {
    success(&len(0_i32), &Vec::<String>::new());
    success(&len(1_i32), &vec!["Much"]);
    success(&len(2_u8), &HashMap::from([(1_i32, "So"), (2, "Much")]));
    success(&len(3_usize), &[1_i32, 2, 3]);

    assert_eq!(
        failure(&len(2_i32), &vec!["Much"]),
        r#"Len(2): got 1: []&str{"Much"}"#
    );
}

#[rstest]
#[case("Much", 4)]
#[case("Müch", 5)]
#[case("", 0)]
fn text_length_is_in_bytes(#[case] actual: &str, #[case] expected: usize) {
    success(&len(expected), &actual);
}

#[test]
fn length_matcher() {
    success(&len(between(1_i32, 4_i32)), &"Much");

    assert_eq!(
        failure(&len(between(1_i32, 3_i32)), &"Much"),
        r#"Len(Between(1, 3)): got 4: "Much""#
    );
}

#[test]
fn length_unavailable() {
    assert_eq!(
        failure(&len(2_i32), &3.6_f64),
        "Len(2): length unavailable: 3.6"
    );
    assert_eq!(
        failure(&len(2_i32), &predicate(|_: &Value| true)),
        "Len(2): length unavailable: fn(&Value)"
    );
}
