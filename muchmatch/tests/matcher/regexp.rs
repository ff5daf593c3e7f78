use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{TimeZone, Utc};
use muchmatch::{regexp, MatcherExt, Reflect};
use regex::Regex;

use crate::{failure, success};

const MATCHING: &str = r"[A-Z]est\W+Mu\w+\?";
const NOT_MATCHING: &str = r"\w+ not Much?";

#[derive(Reflect)]
#[reflect(display)]
struct Hello;

impl Display for Hello {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("w.w")
    }
}

#[test]
fn titles() {
    assert_eq!(regexp("Re.*x").describe(), "Regexp(`Re.*x`)");
    assert_eq!(regexp(Regex::new("Re.*x").unwrap()).describe(), "Regexp(`Re.*x`)");
}

#[test]
fn matches_text() {
    success(&regexp(MATCHING), &"Test Much?");
    success(&regexp(Regex::new(MATCHING).unwrap()), &"Test Much?");
    success(&regexp(Hello), &"Can I hear a wow?");

    assert_eq!(
        failure(&regexp(NOT_MATCHING), &"Test Much?"),
        r#"Regexp(`\w+ not Much?`): not matched: "Test Much?""#
    );
    assert_eq!(
        failure(&regexp(Regex::new(NOT_MATCHING).unwrap()), &"Test Much?"),
        r#"Regexp(`\w+ not Much?`): not matched: "Test Much?""#
    );
    assert_eq!(
        failure(&regexp(Hello), &"Can I hear a WOW?!"),
        r#"Regexp(`w.w`): not matched: "Can I hear a WOW?!""#
    );
}

#[test]
fn matches_text_form_of_other_values() {
    success(&regexp("^12"), &123_i32);
    success(&regexp(r"^2022-08-26 13:14:58$"), &Utc.with_ymd_and_hms(2022, 8, 26, 13, 14, 58).unwrap());
    success(&regexp("^Much$"), &b"Much".to_vec());
}

#[test]
fn invalid_pattern() {
    let matcher = regexp("*invalid");

    assert_eq!(matcher.describe(), "InvalidMatcher(Regexp)");
    assert!(
        failure(&matcher, &"Test Much?").starts_with("Invalid Regexp(`*invalid`): regex parse error"),
        "{}",
        matcher.check(&"Test Much?").1
    );
}
