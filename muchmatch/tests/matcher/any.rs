use muchmatch::{any, none, MatcherExt, Reflect, Value};
use rstest::rstest;

use crate::{failure, success};

#[test]
fn titles() {
    assert_eq!(any().describe(), "Any()");
    assert_eq!(none().describe(), "None()");
}

#[rstest]
#[case::nil(Value::Nil)]
#[case::int(0_i32.reflect())]
#[case::text("Much".reflect())]
#[case::unit(().reflect())]
fn any_and_none(#[case] actual: Value) {
    success(&any(), &actual);
    assert_eq!(failure(&none(), &actual), "None() never matches");
}
