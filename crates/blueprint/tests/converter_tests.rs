//! Integration tests for generated `Convertible` impls.

#![allow(non_snake_case)]

use blueprint::{ContractKind, Convert, ConversionError, Convertible, Value, generate};

#[derive(Debug, Clone, PartialEq, Convert)]
struct Measurement {
    #[validate(non_empty)]
    sensor: String,
    #[validate(non_negative)]
    value: f64,
    samples: Vec<u16>,
    unit: Option<String>,
    #[convert(skip)]
    #[builder(default = 7)]
    revision: u32,
}

#[derive(Debug, PartialEq, Convert)]
struct Marker {}

#[derive(Debug, PartialEq, Convert)]
struct Wrapper<T> {
    inner: T,
}

#[generate(converter, builder = false, partial)]
trait Coordinate {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
    #[derived(latitude.abs() + longitude.abs())]
    fn manhattan(&self) -> f64;
}

fn measurement() -> Measurement {
    Measurement {
        sensor: "probe-1".to_string(),
        value: 21.5,
        samples: vec![3, 4],
        unit: None,
        revision: 2,
    }
}

#[test]
fn Convert___to_value___writes_converted_fields_in_order() {
    let value = measurement().to_value();

    assert_eq!(
        value,
        Value::Tuple(vec![
            Value::String("probe-1".to_string()),
            Value::Decimal64(21.5),
            Value::List(vec![Value::Natural16(3), Value::Natural16(4)]),
            Value::Empty,
        ])
    );
}

#[test]
fn Convert___from_value___recovers_skipped_field_with_default() {
    let original = measurement();

    let recovered = Measurement::from_value(original.to_value()).unwrap();

    assert_eq!(recovered.sensor, original.sensor);
    assert_eq!(recovered.samples, original.samples);
    assert_eq!(recovered.unit, None);
    assert_eq!(recovered.revision, 7);
}

#[test]
fn Convert___from_value___wrong_arity___fails() {
    let value = Value::Tuple(vec![Value::String("probe-1".to_string())]);

    let err = Measurement::from_value(value).unwrap_err();

    assert_eq!(
        err,
        ConversionError::WrongArity {
            type_name: "Measurement",
            expected: 4,
            found: 1,
        }
    );
}

#[test]
fn Convert___from_value___not_a_tuple___fails() {
    let err = Measurement::from_value(Value::Boolean(true)).unwrap_err();

    assert!(matches!(
        err,
        ConversionError::TypeMismatch {
            expected: "tuple",
            found: "boolean"
        }
    ));
}

#[test]
fn Convert___from_value___field_of_wrong_kind___fails() {
    let value = Value::Tuple(vec![
        Value::String("probe-1".to_string()),
        Value::String("warm".to_string()),
        Value::List(vec![]),
        Value::Empty,
    ]);

    let err = Measurement::from_value(value).unwrap_err();

    assert_eq!(err.to_string(), "type mismatch: expected decimal64, found string");
}

#[test]
fn Convert___from_value___violated_contract___fails() {
    let value = Value::Tuple(vec![
        Value::String(String::new()),
        Value::Decimal64(1.0),
        Value::List(vec![]),
        Value::Empty,
    ]);

    let err = Measurement::from_value(value).unwrap_err();

    let ConversionError::Violation(violation) = err else {
        panic!("expected a violation, got {err:?}");
    };
    assert_eq!(violation.kind(), ContractKind::Precondition);
    assert!(violation.message().contains("sensor"));
}

#[test]
fn Convert___empty_struct___round_trips_through_empty_tuple() {
    assert_eq!(Marker {}.to_value(), Value::Tuple(vec![]));
    assert_eq!(Marker::from_value(Value::Tuple(vec![])).unwrap(), Marker {});
}

#[test]
fn Convert___generic_struct___nests_inner_value() {
    let wrapper = Wrapper {
        inner: Wrapper { inner: 5_i32 },
    };

    let value = wrapper.to_value();

    assert_eq!(
        value,
        Value::Tuple(vec![Value::Tuple(vec![Value::Integer32(5)])])
    );
    assert_eq!(Wrapper::<Wrapper<i32>>::from_value(value).unwrap(), wrapper);
}

#[test]
fn Convert___value___serializes_to_tagged_json() {
    let json = serde_json::to_string(&measurement().to_value()).unwrap();

    assert!(json.starts_with(r#"{"type":"tuple","value":[{"type":"string","value":"probe-1"}"#));
}

#[test]
fn Generate___converter___skips_derived_field_and_recomputes_it() {
    let coordinate = CoordinateSubclass::new(-1.5, 2.0);

    let value = coordinate.to_value();
    let recovered = CoordinateSubclass::from_value(value.clone()).unwrap();

    assert_eq!(
        value,
        Value::Tuple(vec![Value::Decimal64(-1.5), Value::Decimal64(2.0)])
    );
    assert_eq!(recovered.manhattan(), 3.5);
    assert_eq!(recovered, coordinate);
}
