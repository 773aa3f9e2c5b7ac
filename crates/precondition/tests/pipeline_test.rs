//! Integration tests for the validation pipeline.
//!
//! Runs checks through [`pipeline::run`] directly to observe stages and call
//! counts, and through [`Argument`] for the chaining behavior.

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use precondition::pipeline::{self, Mode, Stage, Subject};
use precondition::prelude::*;
use rstest::rstest;

/// A check that counts its invocations and passes for non-negative values.
fn counting_non_negative(calls: &Rc<Cell<usize>>) -> Check {
    let calls = Rc::clone(calls);
    Check::new("is_non_negative", "is negative", move |ctx| {
        calls.set(calls.get() + 1);
        Ok(*ctx.downcast::<i32>()? >= 0)
    })
    .requiring(TypeCheck::exactly::<i32>())
    .showing_value()
}

#[allow(clippy::ptr_arg)]
fn run_each(values: &Vec<i32>, check: &Check) -> Result<Stage, GuardError> {
    let ty = Vec::<i32>::describe();
    let subject = Subject {
        value: values,
        ty: &ty,
        name: Some("values"),
    };
    pipeline::run(subject, check, Mode::Each, None, Operations::global())
}

// ============================================================================
// EACH-MODE
// ============================================================================

#[rstest]
#[case(vec![-1, 2, 3], 0)]
#[case(vec![1, -2, 3], 1)]
#[case(vec![1, 2, -3], 2)]
#[case(vec![1, 2, 3, 4, -5, -6], 4)]
fn failure_at_k_means_k_plus_one_calls(#[case] values: Vec<i32>, #[case] k: usize) {
    let calls = Rc::new(Cell::new(0));
    let check = counting_non_negative(&calls);

    let error = run_each(&values, &check).unwrap_err();
    assert_eq!(calls.get(), k + 1);
    assert_eq!(error.kind(), ErrorKind::ValueViolation);
    assert_eq!(
        error.message(),
        format!(
            "Parameter 'values' contains an element that is negative. The actual value is '{}'.",
            values[k]
        )
    );
}

#[test]
fn all_elements_checked_on_success() {
    let calls = Rc::new(Cell::new(0));
    let check = counting_non_negative(&calls);

    let stage = run_each(&vec![1, 2, 3], &check).unwrap();
    assert_eq!(stage, Stage::Completed);
    assert_eq!(calls.get(), 3);
}

#[test]
fn empty_enumerable_succeeds_without_calls() {
    let calls = Rc::new(Cell::new(0));
    let check = counting_non_negative(&calls);

    assert_eq!(run_each(&Vec::new(), &check).unwrap(), Stage::Completed);
    assert_eq!(calls.get(), 0);
}

#[test]
fn each_mode_on_null_is_misuse() {
    let error = requires(None::<Vec<i32>>, "values")
        .each()
        .is_greater_than(0)
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::FrameworkMisuse);
    assert!(error.is_misuse());
}

#[test]
fn each_mode_on_scalar_is_misuse() {
    let error = requires(5_i32, "n").each().is_greater_than(0).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::FrameworkMisuse);
    assert!(error.message().contains("not enumerable"));

    let error = requires(5_i32, "n")
        .each()
        .because("n must be a list")
        .is_greater_than(0)
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::FrameworkMisuse);
    assert_eq!(error.message(), "n must be a list");
}

#[test]
fn reversed_range_is_misuse() {
    let error = requires(5_u8, "n").is_in_range(9_u8, 3_u8).unwrap_err();
    assert!(error.is_misuse());
    let error = requires(5_u8, "n")
        .because("bad range")
        .is_not_in_range(9_u8, 3_u8)
        .unwrap_err();
    assert_eq!(error.message(), "bad range");
}

#[test]
fn collection_equality_through_the_invoker() {
    assert!(requires(vec![1_i32, 2], "v").is_equal_to(vec![1_i32, 2]).is_ok());
    assert!(requires(Vec::<u8>::new(), "v").is_default().is_ok());
    assert!(requires(vec![vec![1_u8]], "v").contains(vec![1_u8]).is_ok());
}

#[test]
fn each_mode_type_checks_use_element_type() {
    let error = requires(vec![1_i64, 2], "values")
        .each()
        .is_greater_than(0_i32)
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    assert_eq!(
        error.message(),
        "Parameter 'values' contains an element that cannot be checked with 'is_greater_than' \
         because it requires a value of type 'i32'. Its type is 'i64'."
    );
}

#[test]
fn each_mode_over_nullable_enumerable() {
    let values = Some(vec![1_u8, 2, 3]);
    assert!(requires(values, "values").each().is_less_than(4_u8).is_ok());
}

// ============================================================================
// SINGLE MODE
// ============================================================================

#[test]
fn type_check_failure_skips_value_check() {
    let calls = Rc::new(Cell::new(0));
    let check = counting_non_negative(&calls);

    let error = requires(5_u8, "n").check(check).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    assert_eq!(calls.get(), 0);
}

#[test]
fn single_mode_stage() {
    let calls = Rc::new(Cell::new(0));
    let check = counting_non_negative(&calls);
    let ty = i32::describe();
    let subject = Subject {
        value: &7_i32,
        ty: &ty,
        name: None,
    };

    let stage = pipeline::run(subject, &check, Mode::Single, None, Operations::global()).unwrap();
    assert_eq!(stage, Stage::Completed);
    assert_eq!(calls.get(), 1);
}

#[test]
fn null_count_message() {
    let error = requires(None::<u32>, "count").is_not_null().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ValueViolation);
    assert_eq!(error.message(), "Parameter 'count' is null.");
}

#[test]
fn null_passes_is_null_and_marks_validated() {
    let arg = requires(None::<u32>, "count").is_null().unwrap();
    assert!(arg.is_validated());
}

#[rstest]
#[case::value_violation(requires(0_u32, "n").because("X").is_greater_than(0_u32).unwrap_err())]
#[case::type_mismatch(requires(0_u32, "n").because("X").is_true().unwrap_err())]
#[case::element(requires(vec![0_u32], "n").each().because("X").is_greater_than(0_u32).unwrap_err())]
#[case::misuse(requires(0_u32, "n").each().because("X").is_greater_than(0_u32).unwrap_err())]
fn because_replaces_whole_message(#[case] error: GuardError) {
    assert_eq!(error.message(), "X");
}
