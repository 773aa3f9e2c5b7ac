//! Default-value checks
//!
//! The default instance comes from the generic invoker: the type's own
//! `Default` for types that declare one, null for nullable types.

use crate::macros::catalog_check;

catalog_check! {
    /// Fails unless the value equals its type's default.
    is_default => "is not the default value";
    show(showing_value);
    rule(ctx) {
        let default = ctx.ops.default_value(ctx.ty)?;
        ctx.ops.are_equal(ctx.ty, ctx.value, &*default)
    }
}

catalog_check! {
    /// Fails if the value equals its type's default.
    is_not_default => "is the default value";
    show(showing_type);
    rule(ctx) {
        let default = ctx.ops.default_value(ctx.ty)?;
        Ok(!ctx.ops.are_equal(ctx.ty, ctx.value, &*default)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::argument::requires;
    use crate::error::ErrorKind;

    struct Handle;

    impl crate::types::Describe for Handle {
        fn describe() -> crate::types::TypeInfo {
            crate::types::TypeInfo::opaque::<Self>("Handle", |_| Some("handle".to_owned()))
        }
    }

    #[test]
    fn test_scalars() {
        assert!(requires(0_u32, "n").is_default().is_ok());
        assert!(requires(String::new(), "s").is_default().is_ok());
        assert!(requires(0.0_f64, "x").is_default().is_ok());

        let error = requires(7_u32, "n").is_default().unwrap_err();
        assert_eq!(
            error.message(),
            "Parameter 'n' is not the default value. The actual value is '7'."
        );
    }

    #[test]
    fn test_is_not_default() {
        assert!(requires(7_u32, "n").is_not_default().is_ok());

        let error = requires(0_i64, "id").is_not_default().unwrap_err();
        assert_eq!(
            error.message(),
            "Parameter 'id' is the default value. Its type is 'i64'."
        );
    }

    #[test]
    fn test_nullable_default_is_null() {
        assert!(requires(None::<u8>, "n").is_default().is_ok());
        assert!(requires(Some(0_u8), "n").is_not_default().is_ok());
    }

    #[test]
    fn test_each_element() {
        let error = requires(vec![1_u8, 2, 0], "ids")
            .each()
            .is_not_default()
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueViolation);
        assert!(error.message().starts_with("Parameter 'ids' contains an element that is the default value."));
    }

    #[test]
    fn test_collections() {
        assert!(requires(Vec::<u8>::new(), "v").is_default().is_ok());
        assert!(requires(vec![0_u8], "v").is_not_default().is_ok());
        assert!(requires(crate::types::ObjectList::new(), "v").is_default().is_ok());

        let error = requires(vec![0_u8], "v").is_default().unwrap_err();
        assert_eq!(
            error.message(),
            "Parameter 'v' is not the default value. The actual value is '[0]'."
        );
    }

    #[test]
    fn test_missing_default_fails_at_invocation() {
        let error = requires(Handle, "h").is_default().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TypeConstraintViolation);
        assert!(error.message().contains("'Handle'"));
    }
}
