//! Integration tests for array runtype validation.

use runtypes::{Failure, KeyPath, Runtype, ValidationError, ValidationOptions};
use serde_json::{json, Value};
use stillwater::Validation;

/// Helper to extract the success value from a Validation
fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
    v.into_result().unwrap()
}

/// Helper to extract the error value from a Validation
fn unwrap_failure<T, E>(v: Validation<T, E>) -> E
where
    T: std::fmt::Debug,
{
    v.into_result().unwrap_err()
}

fn keys(failure: &Failure) -> Vec<Option<String>> {
    failure.keys()
}

#[test]
fn test_non_array_inputs_report_their_kind() {
    let numbers = Runtype::array(Runtype::number());

    let cases: Vec<(Value, &str)> = vec![
        (json!("not an array"), "string"),
        (json!(0), "number"),
        (json!(false), "boolean"),
        (json!({"length": 0}), "object"),
    ];

    for (value, kind) in cases {
        let failure = unwrap_failure(numbers.validate(&value));
        assert_eq!(failure.len(), 1);
        assert!(failure.first().message.contains(kind));
        assert_eq!(failure.first().code, "invalid_type");
    }
}

#[test]
fn test_null_is_reported_as_null() {
    let numbers = Runtype::array(Runtype::number());
    let failure = unwrap_failure(numbers.validate(&json!(null)));
    assert_eq!(failure.len(), 1);
    assert_eq!(failure.first().message, "Expected array, but was null");
}

#[test]
fn test_string_input_scenario() {
    let failure = unwrap_failure(Runtype::array(Runtype::number()).validate(&json!("not an array")));
    assert_eq!(failure.len(), 1);
    assert_eq!(failure.first().key(), None);
    assert_eq!(failure.first().message, "Expected array, but was string");
}

#[test]
fn test_empty_array_succeeds_for_any_element() {
    let value = json!([]);
    for element in [Runtype::never(), Runtype::number(), Runtype::array(Runtype::string())] {
        let checked = unwrap_success(Runtype::array(element).validate(&value));
        assert!(std::ptr::eq(checked, &value));
    }
}

#[test]
fn test_success_returns_same_reference() {
    let value = json!([{"a": 1}, {"a": 2}]);
    let runtype = Runtype::array(Runtype::record([("a", Runtype::number())]));

    let checked = unwrap_success(runtype.validate(&value));
    assert!(std::ptr::eq(checked, &value));
}

#[test]
fn test_element_failure_scenario() {
    let failure =
        unwrap_failure(Runtype::array(Runtype::number()).validate(&json!([1, "x", 3])));

    let standard = unwrap_failure(Runtype::number().validate(&json!("x")));

    assert_eq!(failure.len(), 1);
    assert_eq!(failure.first().key(), Some("[1]".to_string()));
    assert_eq!(failure.first().message, standard.first().message);
}

#[test]
fn test_nested_array_scenario() {
    let matrix = Runtype::array(Runtype::array(Runtype::number()));
    let failure = unwrap_failure(matrix.validate(&json!([[1, 2], [3, "y"]])));

    assert_eq!(failure.len(), 1);
    assert_eq!(failure.first().key(), Some("[1].[1]".to_string()));
    assert_eq!(failure.first().path, KeyPath::from_index(1).push_index(1));
}

#[test]
fn test_child_keys_are_prefixed() {
    let people = Runtype::array(Runtype::record([("name", Runtype::string())]));
    let failure = unwrap_failure(people.validate(&json!([
        {"name": "Alice"},
        {"name": "Bob"},
        {"name": 3}
    ])));

    assert_eq!(keys(&failure), vec![Some("[2].name".to_string())]);
}

#[test]
fn test_keyless_child_error_gets_bare_index() {
    let element = Runtype::create("always-fails", |_, _, _| {
        Validation::Failure(Failure::single(ValidationError::at_root("nope")))
    });
    let failure = unwrap_failure(Runtype::array(element).validate(&json!([true])));

    assert_eq!(failure.first().key(), Some("[0]".to_string()));
    assert_eq!(failure.first().message, "nope");
}

#[test]
fn test_fail_fast_versus_collect_all() {
    let numbers = Runtype::array(Runtype::number());
    let value = json!([0, "one", 2, "three", 4]);

    let fast = unwrap_failure(numbers.validate_with(&value, &ValidationOptions::fail_fast_mode()));
    assert_eq!(keys(&fast), vec![Some("[1]".to_string())]);

    let all = unwrap_failure(numbers.validate_with(&value, &ValidationOptions::collect_all()));
    assert_eq!(keys(&all), vec![Some("[1]".to_string()), Some("[3]".to_string())]);
}

#[test]
fn test_multiple_child_errors_keep_child_order() {
    let pair = Runtype::array(Runtype::record([
        ("x", Runtype::number()),
        ("y", Runtype::number()),
    ]));
    let value = json!([{"x": "a", "y": "b"}, {"x": 1, "y": 2}, {"x": "c", "y": 3}]);

    let failure = unwrap_failure(pair.validate(&value));
    assert_eq!(
        keys(&failure),
        vec![
            Some("[0].x".to_string()),
            Some("[0].y".to_string()),
            Some("[2].x".to_string())
        ]
    );

    // Options reach the child unchanged, so the record stops at its first field too.
    let fast = unwrap_failure(pair.validate_with(&value, &ValidationOptions::fail_fast_mode()));
    assert_eq!(keys(&fast), vec![Some("[0].x".to_string())]);
}

#[test]
fn test_readonly_variant_accepts_the_same_values() {
    let mutable = Runtype::array(Runtype::number());
    let readonly = mutable.as_readonly().unwrap();

    let samples = vec![
        json!([]),
        json!([1, 2]),
        json!([1, "2"]),
        json!("x"),
        json!(null),
        json!([[1]]),
    ];

    for sample in &samples {
        assert_eq!(mutable.guard(sample), readonly.guard(sample));
        assert_eq!(
            mutable.validate(sample).into_result().err(),
            readonly.validate(sample).into_result().err()
        );
    }

    assert!(!mutable.as_array().unwrap().is_readonly());
    assert!(readonly.as_array().unwrap().is_readonly());
    assert_eq!(readonly.tag(), "array");
}

#[test]
fn test_as_readonly_is_repeatable() {
    let mutable = Runtype::array(Runtype::string());
    let first = mutable.as_readonly().unwrap();
    let second = mutable.as_readonly().unwrap();

    assert!(!first.ptr_eq(&second));
    assert_eq!(first.to_string(), second.to_string());
    assert!(first.as_readonly().unwrap().as_array().unwrap().is_readonly());
}

#[test]
fn test_as_readonly_on_non_array_is_none() {
    assert!(Runtype::number().as_readonly().is_none());
}

#[test]
fn test_large_array_reports_every_bad_index() {
    let values: Vec<Value> = (0..100)
        .map(|i| if i % 10 == 0 { json!("bad") } else { json!(i) })
        .collect();
    let value = Value::Array(values);

    let failure = unwrap_failure(Runtype::array(Runtype::number()).validate(&value));
    let expected: Vec<Option<String>> = (0..100)
        .step_by(10)
        .map(|i| Some(format!("[{}]", i)))
        .collect();
    assert_eq!(keys(&failure), expected);
}
