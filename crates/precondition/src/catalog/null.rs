//! Null checks
//!
//! Both checks require a nullable type; on a non-nullable type they fail
//! with a type mismatch before the value is looked at.

use crate::check::TypeCheck;
use crate::macros::catalog_check;

catalog_check! {
    /// Fails unless the value is null.
    is_null => "is not null";
    requires(TypeCheck::nullable());
    show(showing_value);
    rule(ctx) { Ok(ctx.is_null()) }
}

catalog_check! {
    /// Fails if the value is null.
    is_not_null => "is null";
    requires(TypeCheck::nullable());
    rule(ctx) { Ok(!ctx.is_null()) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::argument::requires;
    use crate::error::ErrorKind;
    use crate::types::Object;

    #[test]
    fn test_is_not_null() {
        let error = requires(None::<i32>, "count").is_not_null().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueViolation);
        assert_eq!(error.message(), "Parameter 'count' is null.");

        let arg = requires(Some(3), "count").is_not_null().unwrap();
        assert!(arg.is_validated());
    }

    #[test]
    fn test_is_null() {
        assert!(requires(None::<i32>, "count").is_null().unwrap().is_validated());

        let error = requires(Some(3), "count").is_null().unwrap_err();
        assert_eq!(
            error.message(),
            "Parameter 'count' is not null. The actual value is '3'."
        );
    }

    #[test]
    fn test_non_nullable_type_is_a_type_mismatch() {
        let error = requires(3_i32, "count").is_not_null().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert!(error.message().contains("a nullable type"));
    }

    #[test]
    fn test_object_null() {
        assert!(requires(Object::null(), "o").is_null().is_ok());
        assert!(requires(Object::new(1_u8), "o").is_not_null().is_ok());
    }

    #[test]
    fn test_each_element_not_null() {
        let error = requires(vec![Some(1), None, Some(3)], "ids")
            .each()
            .is_not_null()
            .unwrap_err();
        assert_eq!(
            error.message(),
            "Parameter 'ids' contains an element that is null."
        );
    }
}
