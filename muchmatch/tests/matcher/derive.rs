use std::fmt::{Display, Formatter, Result as FmtResult};

use muchmatch::value::render;
use muchmatch::{contains_key, equal, Kind, Reflect, Value};

use crate::{failure, success};

#[derive(Reflect)]
struct Visible {
    pub name: &'static str,
    pub count: u32,
    secret: i32,
    #[reflect(hidden)]
    pub internal: bool,
    #[reflect(skip)]
    #[allow(dead_code)]
    pub cache: Vec<u8>,
}

fn visible() -> Visible {
    Visible {
        name: "Much",
        count: 0,
        secret: 7,
        internal: true,
        cache: vec![1, 2],
    }
}

#[test]
fn record_fields() {
    let value = visible().reflect();
    let Value::Record(record) = &value else {
        panic!("not a record: {value}");
    };

    let fields = record
        .fields
        .iter()
        .map(|field| (&*field.name, field.hidden))
        .collect::<Vec<_>>();

    assert_eq!(
        fields,
        [("name", false), ("count", false), ("secret", true), ("internal", true)]
    );
    assert_eq!(value.kind(), Kind::Record);
    assert_eq!(value.type_name(), "Visible");
    assert_eq!(<Visible as Reflect>::type_name(), "Visible");
}

#[test]
fn rendering_omits_hidden_and_zero_fields() {
    assert_eq!(render(&visible().reflect()), r#"Visible{name:"Much"}"#);
}

#[test]
fn hidden_fields_are_not_keys() {
    success(&contains_key("name"), &visible());
    assert_eq!(
        failure(&contains_key("secret"), &visible()),
        r#"ContainsKey("secret"): no such field in: Visible{name:"Much"}"#
    );
}

#[derive(Reflect)]
#[reflect(rename = "much.Renamed")]
struct Renamed(pub i32, pub &'static str);

#[test]
fn tuple_struct_with_rename() {
    let value = Renamed(1, "So").reflect();

    assert_eq!(value.type_name(), "much.Renamed");
    assert_eq!(render(&value), r#"much.Renamed{0:1, 1:"So"}"#);
}

#[derive(Reflect)]
#[reflect(transparent)]
struct Meters(pub f64);

#[test]
fn transparent_newtype() {
    let value = Meters(1.5).reflect();

    assert_eq!(value.kind(), Kind::Float);
    assert_eq!(value.type_name(), "Meters");
    assert_eq!(render(&value), "1.5");

    success(&equal(1.5_f64), &Meters(1.5));
}

#[derive(Reflect)]
#[reflect(display)]
struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

#[test]
fn display_capability() {
    let value = Version { major: 1, minor: 2 }.reflect();

    assert_eq!(value.kind(), Kind::Record);
    assert_eq!(value.display_text(), Some("v1.2"));
    assert_eq!(render(&value), "Version(v1.2)");

    success(&equal("v1.2"), &Version { major: 1, minor: 2 });
}

#[derive(Reflect)]
struct Wrapper<T> {
    pub inner: T,
}

#[test]
fn generic_records() {
    assert_eq!(render(&Wrapper { inner: 5_u8 }.reflect()), "Wrapper{inner:5}");
    assert_eq!(
        render(&Wrapper { inner: vec!["a"] }.reflect()),
        r#"Wrapper{inner:[]&str{"a"}}"#
    );
}
