use muchmatch::{any, between, method, values, Invoke, InvokeError, MatcherExt, Reflect, Value};

use crate::{failure, success};

#[derive(Clone, Reflect)]
#[reflect(methods)]
struct Counter {
    pub count: i32,
}

impl Invoke for Counter {
    fn invoke(&self, method: &str, args: &[Value]) -> Result<Vec<Value>, InvokeError> {
        match (method, args) {
            ("Count", []) => Ok(values![self.count]),
            ("Split", []) => Ok(values![self.count / 2, self.count % 2]),
            ("Add", [Value::Int { value, .. }]) => {
                let value = i64::try_from(*value)
                    .map_err(|_| InvokeError::InvalidArguments("argument out of range".into()))?;

                Ok(values![i64::from(self.count) + value])
            }
            ("Add", args) => Err(InvokeError::InvalidArguments(format!(
                "expected one integer, got {}",
                args.len()
            ))),
            ("Fail", _) => Err(InvokeError::Failed("counter is broken".into())),
            _ => Err(InvokeError::NotDefined),
        }
    }
}

const COUNTER: &str = "Counter{count:5}";

#[test]
fn title() {
    assert_eq!(method("Count", values![5_i32]).describe(), "Method(Count)");
}

#[test]
fn return_values() {
    let counter = Counter { count: 5 };

    success(&method("Count", values![5_i32]), &counter);
    success(&method("Count", values![between(1_i32, 9_i32)]), &counter);
    success(&method("Split", values![2_i32, any()]), &counter);
    success(&method("Count", values![5_i32]), &std::rc::Rc::new(counter.clone()));

    assert_eq!(
        failure(&method("Count", values![6_i32]), &counter),
        "Method(Count): return value at index 0 not matched: Equal(6): not equal: 5"
    );
    assert_eq!(
        failure(&method("Split", values![2_i32, 0_i32]), &counter),
        "Method(Split): return value at index 1 not matched: Equal(0): not equal: 1"
    );
}

#[test]
fn arguments() {
    let counter = Counter { count: 5 };

    success(&method("Add", values![7_i64]).with_args(values![2_i32]), &counter);

    assert_eq!(
        failure(&method("Add", values![7_i64]), &counter),
        format!("Method(Add): invocation failed: invalid arguments: expected one integer, got 0: {COUNTER}")
    );
}

#[test]
fn failures() {
    let counter = Counter { count: 5 };

    assert_eq!(
        failure(&method("Lorem", values![]), &counter),
        format!("Method(Lorem): not defined on: {COUNTER}")
    );
    assert_eq!(
        failure(&method("Count", values![]), &5_i32),
        "Method(Count): not defined on: 5"
    );
    assert_eq!(
        failure(&method("Fail", values![]), &counter),
        format!("Method(Fail): invocation failed: counter is broken: {COUNTER}")
    );
    assert_eq!(
        failure(&method("Split", values![2_i32]), &counter),
        format!("Method(Split): expected 2 return values, got 1, value: {COUNTER}")
    );
}
