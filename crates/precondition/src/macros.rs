//! Macros that cut the boilerplate of describing types and defining checks.
//!
//! # Available Macros
//!
//! - [`describe_scalar!`]: implement [`Describe`](crate::types::Describe) for a
//!   `Display` type, optionally with its natural operations
//! - `catalog_check!` (crate-internal): a parameterless named check: the
//!   [`Check`](crate::check::Check) factory plus the chaining method on
//!   [`Argument`](crate::Argument)
//!
//! # Examples
//!
//! ```rust,ignore
//! use precondition::describe_scalar;
//!
//! #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
//! struct Port(u16);
//!
//! impl std::fmt::Display for Port {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, ":{}", self.0)
//!     }
//! }
//!
//! describe_scalar!(Port => "Port", ordered);
//! ```

// ============================================================================
// DESCRIBE SCALAR
// ============================================================================

/// Implements [`Describe`](crate::types::Describe) for a scalar type that
/// implements `Display`.
///
/// # Variants
///
/// **Opaque** (no generic operations; ordering checks fail at invocation):
/// ```rust,ignore
/// describe_scalar!(Token => "Token");
/// ```
///
/// **Equatable** (`Default + PartialEq`):
/// ```rust,ignore
/// describe_scalar!(Color => "Color", equatable);
/// ```
///
/// **Ordered** (`Default + Ord`):
/// ```rust,ignore
/// describe_scalar!(Port => "Port", ordered);
/// ```
#[macro_export]
macro_rules! describe_scalar {
    ($ty:ty => $name:expr) => {
        impl $crate::types::Describe for $ty {
            fn describe() -> $crate::types::TypeInfo {
                $crate::types::TypeInfo::scalar::<$ty>($name)
            }
        }
    };

    ($ty:ty => $name:expr, equatable) => {
        impl $crate::types::Describe for $ty {
            fn describe() -> $crate::types::TypeInfo {
                $crate::types::TypeInfo::scalar::<$ty>($name).with_capabilities(
                    $crate::ops::Capabilities::none()
                        .with_default::<$ty>()
                        .with_equality::<$ty>(),
                )
            }
        }
    };

    ($ty:ty => $name:expr, ordered) => {
        impl $crate::types::Describe for $ty {
            fn describe() -> $crate::types::TypeInfo {
                $crate::types::TypeInfo::scalar::<$ty>($name)
                    .with_capabilities($crate::ops::Capabilities::ordered::<$ty>())
            }
        }
    };
}

// ============================================================================
// CATALOG CHECK
// ============================================================================

/// Defines a parameterless named check: a factory fn returning the
/// [`Check`](crate::check::Check) and a chaining method of the same name on
/// [`Argument`](crate::Argument).
///
/// ```rust,ignore
/// catalog_check! {
///     /// Fails unless the value is null.
///     is_null => "is not null";
///     requires(TypeCheck::nullable());
///     show(showing_value);
///     rule(ctx) { Ok(ctx.is_null()) }
/// }
/// ```
macro_rules! catalog_check {
    (
        $(#[$meta:meta])*
        $method:ident => $phrase:literal;
        $(requires($type_check:expr);)*
        $(show($($show:ident),+);)?
        rule($ctx:ident) $rule:block
    ) => {
        $(#[$meta])*
        #[must_use]
        pub fn $method() -> $crate::check::Check {
            $crate::check::Check::new(
                stringify!($method),
                $phrase,
                |$ctx: &$crate::check::ValueContext<'_>| $rule,
            )
            $(.requiring($type_check))*
            $($(.$show())+)?
        }

        impl<T: $crate::types::Describe> $crate::argument::Argument<T> {
            $(#[$meta])*
            pub fn $method(self) -> Result<Self, $crate::error::GuardError> {
                self.check($method())
            }
        }
    };
}

pub(crate) use catalog_check;
