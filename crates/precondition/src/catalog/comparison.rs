//! Equality, ordering and range checks
//!
//! Each check captures its operand(s) and requires the checked type (the
//! element type in each-mode) to be exactly the operand's type. Equality and
//! ordering go through the generic invoker, so nullable types compare with
//! null ordered before every value, and a type without an ordering fails with
//! [`ErrorKind::NotComparable`](crate::error::ErrorKind::NotComparable) only
//! when the check actually runs.

use std::rc::Rc;

use crate::argument::Argument;
use crate::check::{Check, TypeCheck, ValueContext};
use crate::error::{GuardError, OperationError};
use crate::ops::CompareOutcome;
use crate::types::Describe;

// ============================================================================
// EQUALITY
// ============================================================================

fn equality<U: Describe>(name: &'static str, phrase: &'static str, expected: U, wanted: bool) -> Check {
    let param = crate::types::render_element(&U::describe(), &expected);
    Check::new(name, phrase, move |ctx: &ValueContext<'_>| {
        Ok(ctx.ops.are_equal(ctx.ty, ctx.value, &expected)? == wanted)
    })
    .requiring(TypeCheck::exactly::<U>())
    .with_param("expected", param)
    .showing_value()
}

/// Fails unless the value equals `expected`.
#[must_use]
pub fn is_equal_to<U: Describe>(expected: U) -> Check {
    equality("is_equal_to", "is not equal to the expected value", expected, true)
}

/// Fails if the value equals `expected`.
#[must_use]
pub fn is_not_equal_to<U: Describe>(expected: U) -> Check {
    equality("is_not_equal_to", "is equal to the expected value", expected, false)
}

// ============================================================================
// ORDERING
// ============================================================================

fn bounded<U: Describe>(
    name: &'static str,
    phrase: &'static str,
    bound: U,
    accepts: fn(CompareOutcome) -> bool,
) -> Check {
    let param = crate::types::render_element(&U::describe(), &bound);
    Check::new(name, phrase, move |ctx: &ValueContext<'_>| {
        Ok(accepts(ctx.ops.compare(ctx.ty, ctx.value, &bound)?))
    })
    .requiring(TypeCheck::exactly::<U>())
    .with_param("bound", param)
    .showing_value()
}

/// Fails unless the value is strictly greater than `bound`.
#[must_use]
pub fn is_greater_than<U: Describe>(bound: U) -> Check {
    bounded("is_greater_than", "is not greater than the bound", bound, |outcome| {
        outcome == CompareOutcome::GreaterThan
    })
}

/// Fails unless the value is greater than or equal to `bound`.
#[must_use]
pub fn is_greater_or_equal<U: Describe>(bound: U) -> Check {
    bounded("is_greater_or_equal", "is less than the bound", bound, |outcome| {
        outcome != CompareOutcome::LessThan
    })
}

/// Fails unless the value is strictly less than `bound`.
#[must_use]
pub fn is_less_than<U: Describe>(bound: U) -> Check {
    bounded("is_less_than", "is not less than the bound", bound, |outcome| {
        outcome == CompareOutcome::LessThan
    })
}

/// Fails unless the value is less than or equal to `bound`.
#[must_use]
pub fn is_less_or_equal<U: Describe>(bound: U) -> Check {
    bounded("is_less_or_equal", "is greater than the bound", bound, |outcome| {
        outcome != CompareOutcome::GreaterThan
    })
}

// ============================================================================
// RANGE
// ============================================================================

fn in_range<U: Describe>(ctx: &ValueContext<'_>, minimum: &U, maximum: &U) -> Result<bool, OperationError> {
    let above = ctx.ops.compare(ctx.ty, ctx.value, minimum)? != CompareOutcome::LessThan;
    Ok(above && ctx.ops.compare(ctx.ty, ctx.value, maximum)? != CompareOutcome::GreaterThan)
}

fn range<U: Describe>(
    name: &'static str,
    phrase: &'static str,
    minimum: U,
    maximum: U,
    wanted: bool,
) -> Check {
    let info = U::describe();
    let (min_text, max_text) = (
        crate::types::render_element(&info, &minimum),
        crate::types::render_element(&info, &maximum),
    );
    let reversed = format!("its minimum '{min_text}' is greater than its maximum '{max_text}'");
    let bounds = Rc::new((minimum, maximum));
    let operands = Rc::clone(&bounds);

    Check::new(name, phrase, move |ctx: &ValueContext<'_>| {
        Ok(in_range(ctx, &bounds.0, &bounds.1)? == wanted)
    })
    .validating_operands(move |ops| {
        // Unordered operand types are reported when the value-check runs.
        match ops.compare(&info, &operands.0, &operands.1) {
            Ok(CompareOutcome::GreaterThan) => Err(reversed.clone()),
            _ => Ok(()),
        }
    })
    .requiring(TypeCheck::exactly::<U>())
    .with_param("minimum", min_text)
    .with_param("maximum", max_text)
    .showing_value()
}

/// Fails unless `minimum <= value <= maximum`.
#[must_use]
pub fn is_in_range<U: Describe>(minimum: U, maximum: U) -> Check {
    range("is_in_range", "is not in range", minimum, maximum, true)
}

/// Fails if `minimum <= value <= maximum`.
#[must_use]
pub fn is_not_in_range<U: Describe>(minimum: U, maximum: U) -> Check {
    range("is_not_in_range", "is in range", minimum, maximum, false)
}

// ============================================================================
// ARGUMENT METHODS
// ============================================================================

impl<T: Describe> Argument<T> {
    /// Fails unless the value equals `expected`.
    pub fn is_equal_to<U: Describe>(self, expected: U) -> Result<Self, GuardError> {
        self.check(is_equal_to(expected))
    }

    /// Fails if the value equals `expected`.
    pub fn is_not_equal_to<U: Describe>(self, expected: U) -> Result<Self, GuardError> {
        self.check(is_not_equal_to(expected))
    }

    /// Fails unless the value is strictly greater than `bound`.
    pub fn is_greater_than<U: Describe>(self, bound: U) -> Result<Self, GuardError> {
        self.check(is_greater_than(bound))
    }

    /// Fails unless the value is greater than or equal to `bound`.
    pub fn is_greater_or_equal<U: Describe>(self, bound: U) -> Result<Self, GuardError> {
        self.check(is_greater_or_equal(bound))
    }

    /// Fails unless the value is strictly less than `bound`.
    pub fn is_less_than<U: Describe>(self, bound: U) -> Result<Self, GuardError> {
        self.check(is_less_than(bound))
    }

    /// Fails unless the value is less than or equal to `bound`.
    pub fn is_less_or_equal<U: Describe>(self, bound: U) -> Result<Self, GuardError> {
        self.check(is_less_or_equal(bound))
    }

    /// Fails unless `minimum <= value <= maximum`.
    pub fn is_in_range<U: Describe>(self, minimum: U, maximum: U) -> Result<Self, GuardError> {
        self.check(is_in_range(minimum, maximum))
    }

    /// Fails if `minimum <= value <= maximum`.
    pub fn is_not_in_range<U: Describe>(self, minimum: U, maximum: U) -> Result<Self, GuardError> {
        self.check(is_not_in_range(minimum, maximum))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::argument::requires;
    use crate::error::ErrorKind;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Celsius(f32);

    impl std::fmt::Display for Celsius {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}°C", self.0)
        }
    }

    crate::describe_scalar!(Celsius => "Celsius");

    #[rstest]
    #[case(5, true)]
    #[case(1, true)]
    #[case(10, true)]
    #[case(0, false)]
    #[case(11, false)]
    fn test_is_in_range(#[case] value: i32, #[case] inside: bool) {
        assert_eq!(requires(value, "n").is_in_range(1, 10).is_ok(), inside);
        assert_eq!(requires(value, "n").is_not_in_range(1, 10).is_ok(), !inside);
    }

    #[rstest]
    #[case(is_greater_than::<i64>, 6, 5)]
    #[case(is_greater_or_equal::<i64>, 5, 4)]
    #[case(is_less_than::<i64>, 4, 5)]
    #[case(is_less_or_equal::<i64>, 5, 6)]
    fn test_bounds(#[case] check: fn(i64) -> Check, #[case] passing: i64, #[case] failing: i64) {
        assert!(requires(passing, "n").check(check(5)).is_ok());
        assert!(requires(failing, "n").check(check(5)).is_err());
    }

    #[test]
    fn test_range_message() {
        let error = requires(vec![80_u16, 0, 443], "ports")
            .each()
            .is_in_range(1_u16, 65535_u16)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueViolation);
        assert_eq!(
            error.message(),
            "Parameter 'ports' contains an element that is not in range. The actual value is '0'. \
             Specified 'minimum' is '1'. Specified 'maximum' is '65535'."
        );
    }

    #[test]
    fn test_equality_message() {
        let error = requires("prod".to_owned(), "env")
            .is_equal_to("dev".to_owned())
            .unwrap_err();
        assert_eq!(
            error.message(),
            "Parameter 'env' is not equal to the expected value. The actual value is 'prod'. \
             Specified 'expected' is 'dev'."
        );
        assert!(requires("dev".to_owned(), "env").is_not_equal_to("prod".to_owned()).is_ok());
    }

    #[test]
    fn test_operand_type_must_match() {
        let error = requires(5_i32, "n").is_greater_than(1_i64).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert!(error.message().contains("a value of type 'i64'"));
    }

    #[test]
    fn test_nullable_ordering() {
        // Null orders before every value.
        let error = requires(None::<i32>, "n").is_greater_or_equal(Some(0)).unwrap_err();
        assert_eq!(
            error.message(),
            "Parameter 'n' is less than the bound. The actual value is null. Specified 'bound' is '0'."
        );
        assert!(requires(Some(3), "n").is_greater_than(None::<i32>).is_ok());
        assert!(requires(None::<i32>, "n").is_equal_to(None::<i32>).is_ok());
    }

    #[test]
    fn test_nan_ordering() {
        assert!(requires(f64::NAN, "x").is_less_than(f64::NEG_INFINITY).is_ok());
        assert!(requires(f64::NAN, "x").is_equal_to(f64::NAN).is_ok());
        assert!(requires(-0.0_f64, "x").is_equal_to(0.0_f64).is_ok());
    }

    #[test]
    fn test_unordered_type_fails_late() {
        let error = requires(Celsius(21.5), "t").is_greater_than(Celsius(0.0)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotComparable);
        assert_eq!(
            error.message(),
            "Parameter 't' cannot be checked with 'is_greater_than' because type 'Celsius' \
             does not define an ordering. Specified 'bound' is '0°C'."
        );
    }

    #[test]
    fn test_reversed_range_is_misuse() {
        let error = requires(5_i32, "n").is_in_range(10, 1).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::FrameworkMisuse);
        assert_eq!(
            error.message(),
            "Parameter 'n' cannot be checked with 'is_in_range' because its minimum '10' \
             is greater than its maximum '1'."
        );

        let error = requires(vec![5_i32], "n").each().is_not_in_range(10, 1).unwrap_err();
        assert!(error.is_misuse());

        // A single-point range is valid.
        assert!(requires(1_i32, "n").is_in_range(1, 1).is_ok());
    }

    #[test]
    fn test_collection_equality() {
        assert!(requires(vec![1_i32, 2], "v").is_equal_to(vec![1_i32, 2]).is_ok());

        let error = requires(vec![1_i32, 2], "v").is_equal_to(vec![2_i32, 1]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueViolation);
        assert_eq!(
            error.message(),
            "Parameter 'v' is not equal to the expected value. The actual value is '[1, 2]'. \
             Specified 'expected' is '[2, 1]'."
        );
        assert!(requires([1_u8, 2, 3], "v").is_not_equal_to([1_u8, 2, 4]).is_ok());
    }

    #[test]
    fn test_because_replaces_message() {
        let error = requires(0_u32, "retries")
            .because("retries must be positive")
            .is_greater_than(0_u32)
            .unwrap_err();
        assert_eq!(error.message(), "retries must be positive");
    }
}
