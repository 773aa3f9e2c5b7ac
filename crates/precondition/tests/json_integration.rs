//! Integration tests for JSON reporting of failures.

#![cfg(feature = "serde")]

use precondition::prelude::*;
use serde_json::json;

#[test]
fn guard_error_to_json() {
    let error = requires(None::<u8>, "count").is_not_null().unwrap_err();
    assert_eq!(
        error.to_json_value(),
        json!({
            "kind": "value_violation",
            "message": "Parameter 'count' is null.",
        })
    );
}

#[test]
fn misuse_kind_to_json() {
    let error = requires(3_u8, "n").each().is_true().unwrap_err();
    assert_eq!(error.to_json_value()["kind"], json!("framework_misuse"));
}

#[test]
fn kinds_round_trip() {
    let kinds = [
        ErrorKind::ValueViolation,
        ErrorKind::TypeMismatch,
        ErrorKind::NotComparable,
        ErrorKind::TypeConstraintViolation,
        ErrorKind::FrameworkMisuse,
    ];
    let encoded = serde_json::to_string(&kinds).unwrap();
    let decoded: Vec<ErrorKind> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, kinds);
}

#[test]
fn compare_outcome_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(CompareOutcome::GreaterThan).unwrap(),
        json!("greater_than")
    );
}
