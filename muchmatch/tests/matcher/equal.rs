use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::rc::Rc;

use muchmatch::{equal, equal_with, values, Equal, EqualOptions, Matcher, MatcherExt, Reflect, Value};
use regex::Regex;
use rstest::rstest;

use crate::{failure, success};

#[derive(Reflect)]
#[reflect(display)]
struct Stringer {
    pub text: String,
}

impl Stringer {
    fn new(text: &str) -> Self {
        Self { text: text.into() }
    }
}

impl Display for Stringer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.text)
    }
}

#[derive(Reflect)]
#[reflect(transparent)]
struct Name(pub String);

#[derive(Reflect)]
struct Unexported {
    number: i32,
    text: String,
    stringer: Rc<Stringer>,
}

impl Unexported {
    fn new(stringer: &str) -> Self {
        Self {
            number: 123,
            text: "Much".into(),
            stringer: Rc::new(Stringer::new(stringer)),
        }
    }
}

fn numbers() -> Vec<Value> {
    values![
        123_i32, 123_i8, 123_i16, 123_i64, 123_isize, 123_u32, 123_u8, 123_u16, 123_u64,
        123_usize, 123.0_f32, 123.0_f64
    ]
}

#[test]
fn numbers_of_any_type_are_equal() {
    let texts = values!["123", Stringer::new("123")];
    let different = values![
        124_i32, 125_i8, 126_i16, 128_i64, 129_u32, 130_u8, 131_u16, 133_u64, 123.1_f32,
        123.2_f64, "134", Stringer::new("135")
    ];

    for expected in numbers() {
        let matcher = Equal::new(expected.clone());

        for actual in numbers().iter().chain(&texts) {
            let (ok, desc) = matcher.matches(actual);
            assert!(ok, "{expected:?} == {actual:?}: {desc}");
        }

        for actual in &different {
            let (ok, desc) = matcher.matches(actual);
            assert!(!ok, "{expected:?} != {actual:?}");
            assert!(
                muchmatch::trim_diff(&desc).starts_with(&format!("{}: not equal:", matcher.describe())),
                "{desc}"
            );
        }
    }
}

#[rstest]
#[case::strings(equal("Much"), "Much".reflect())]
#[case::string_and_stringer(equal("Much"), Stringer::new("Much").reflect())]
#[case::string_and_newtype(equal("Much"), Name("Much".into()).reflect())]
#[case::ints(equal(123_i32), 123_i32.reflect())]
#[case::ints_diff_types(equal(123_i32), 123_u8.reflect())]
#[case::uints_diff_types(equal(123_u64), 123_u16.reflect())]
#[case::floats(equal(12.3_f64), 12.3_f64.reflect())]
#[case::floats_diff_types(equal(12.3_f32), 12.3_f64.reflect())]
#[case::slices(equal(vec![123_i32, 456]), vec![123_i32, 456].reflect())]
#[case::slices_diff_types(equal([123_i32, 456]), values![123_i16, 456_i16].reflect())]
#[case::slices_recursive(
    equal(values![123_i32, 12.3_f32, values![["1", "2"], HashMap::from([(1_i32, 2_u64), (3, 4)])]]),
    values![123_i16, 12.3_f64, values![[Name("1".into()), Name("2".into())], HashMap::from([(1_i8, 2_u16), (3, 4)])]].reflect()
)]
#[case::maps(
    equal(HashMap::from([("Much", 123_i32), ("Test", 123)])),
    HashMap::from([("Much", 123_i32), ("Test", 123)]).reflect()
)]
#[case::maps_diff_types(
    equal(HashMap::from([("Much", 123_i32), ("Test", 123)])),
    HashMap::from([(String::from("Much"), 123_i16.reflect()), (String::from("Test"), 123_i16.reflect())]).reflect()
)]
#[case::records(equal(Unexported::new("Much")), Unexported::new("Much").reflect())]
#[case::pointer_to_value(equal(Rc::new(5_i32)), 5_u8.reflect())]
#[case::option(equal(Some(5_i32)), 5_i32.reflect())]
#[case::nil(Equal::new(Value::Nil), Value::Nil)]
fn equal_values(#[case] matcher: Equal, #[case] actual: Value) {
    let (ok, desc) = matcher.matches(&actual);

    assert!(ok, "unexpected failure: {desc}");
}

#[rstest]
#[case::nil_actual(equal("Much"), Value::Nil, r#"Equal("Much"): not equal: nil"#)]
#[case::nil_expected(Equal::new(Value::Nil), "Much".reflect(), r#"Equal(nil): not equal: "Much""#)]
#[case::strings(equal("Much"), "Such".reflect(), r#"Equal("Much"): not equal: "Such""#)]
#[case::string_and_stringer(
    equal("Much"),
    Stringer::new("Such").reflect(),
    r#"Equal("Much"): not equal: Stringer(Such)"#
)]
#[case::ints(equal(123_i32), 456_i32.reflect(), "Equal(123): not equal: 456")]
#[case::ints_diff_types(equal(123_i32), 456_i16.reflect(), "Equal(123): not equal: 456")]
#[case::uints(equal(123_u64), 456_u16.reflect(), "Equal(123): not equal: 456")]
#[case::floats(equal(12.3_f64), 13.4_f64.reflect(), "Equal(12.3): not equal: 13.4")]
#[case::floats_diff_types(equal(12.3_f32), 13.4_f64.reflect(), "Equal(12.3): not equal: 13.4")]
#[case::slices(
    equal(vec![123_i32, 456]),
    vec![456_i32, 123].reflect(),
    "Equal([]i32{123, 456}): not equal: []i32{456, 123}"
)]
#[case::slices_diff_types(
    equal(vec![123_i32, 456]),
    values![456_i16, 123_i16].reflect(),
    "Equal([]i32{123, 456}): not equal: []any{456, 123}"
)]
#[case::slices_diff_len(
    equal(vec![123_i32]),
    vec![123_i32, 456].reflect(),
    "Equal([]i32{123}): not equal: []i32{123, 456}"
)]
#[case::maps(
    equal(HashMap::from([("Much", 123_i32), ("Test", 123)])),
    HashMap::from([("Much", 123_i32), ("Test", 1)]).reflect(),
    r#"Equal(map[&str]i32{"Much":123, "Test":123}): not equal: map[&str]i32{"Much":123, "Test":1}"#
)]
#[case::records(
    equal(Unexported::new("Much")),
    Unexported::new("Such").reflect(),
    "Equal(Unexported{}): not equal: Unexported{}"
)]
#[case::kinds(equal(true), "true".reflect(), r#"Equal(true): not equal: "true""#)]
fn not_equal_values(#[case] matcher: Equal, #[case] actual: Value, #[case] expected: &str) {
    assert_eq!(failure(&matcher, &actual), expected);
}

#[test]
fn equal_128_bit_integers() {
    success(&equal(u128::MAX), &u128::MAX);
    success(&equal(i128::MIN), &i128::MIN);
    success(&equal(5_u128), &5_i8);
    assert_eq!(
        failure(&equal(u128::MAX), &(u128::MAX - 1)),
        format!("Equal({}): not equal: {}", u128::MAX, u128::MAX - 1)
    );
    assert_eq!(
        failure(&equal(i128::MAX), &u128::MAX),
        format!("Equal({}): not equal: {}", i128::MAX, u128::MAX)
    );
}

#[test]
fn hidden_fields_can_be_ignored() {
    let matcher = equal_with(Unexported::new("Much"), EqualOptions::new().ignore_hidden());

    success(&matcher, &Unexported::new("Such"));
}

#[test]
fn other_values_compare_structurally() {
    success(&equal(Regex::new("^M").unwrap()), &Regex::new("^M").unwrap());
    success(&equal(()), &());
}

#[test]
fn failure_contains_diff() {
    let (ok, desc) = equal(vec![1_i32, 2]).check(&vec![1_i32, 3]);

    assert!(!ok);
    assert!(desc.starts_with("Equal([]i32{1, 2}): not equal: []i32{1, 3}\n\n\tDiff:\n"), "{desc}");
    assert!(desc.contains("\t\t-   2,"), "{desc}");
    assert!(desc.contains("\t\t+   3,"), "{desc}");
}
