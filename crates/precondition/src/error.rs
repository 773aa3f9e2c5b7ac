//! Error types for precondition failures
//!
//! Every failure raised by a check is a [`GuardError`]. The variant tells
//! *what went wrong* (bad input, unsupported type, missing capability, or
//! misuse of the chaining API); the payload is only the rendered message.
//!
//! Direct calls to the generic [`Operations`](crate::ops::Operations) invoker
//! return the lower-level [`OperationError`], which carries type names instead
//! of a message because the invoker knows nothing about parameter names.

use std::fmt;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Classification of a [`GuardError`] without its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    /// The value failed its semantic check.
    ValueViolation,
    /// The declared (or element) type is not supported by the check.
    TypeMismatch,
    /// The type defines no ordering.
    NotComparable,
    /// The type lacks a default value or an equality definition.
    TypeConstraintViolation,
    /// The chaining API itself was used incorrectly.
    FrameworkMisuse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ValueViolation => "value_violation",
            Self::TypeMismatch => "type_mismatch",
            Self::NotComparable => "not_comparable",
            Self::TypeConstraintViolation => "type_constraint_violation",
            Self::FrameworkMisuse => "framework_misuse",
        };
        f.write_str(name)
    }
}

// ============================================================================
// GUARD ERROR
// ============================================================================

/// A failed precondition.
///
/// `Display` renders exactly the message: either the caller's because-override
/// or the text assembled by [`MessageBuilder`](crate::message::MessageBuilder).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GuardError {
    /// The value does not satisfy the check.
    #[error("{message}")]
    ValueViolation {
        /// Rendered failure text.
        message: String,
    },

    /// The check cannot be applied to the declared or element type.
    #[error("{message}")]
    TypeMismatch {
        /// Rendered failure text.
        message: String,
    },

    /// An ordering comparison was requested for a type without one.
    #[error("{message}")]
    NotComparable {
        /// Rendered failure text.
        message: String,
    },

    /// A default value or equality was requested for a type without one.
    #[error("{message}")]
    TypeConstraintViolation {
        /// Rendered failure text.
        message: String,
    },

    /// Each-mode was requested on a null or non-enumerable value.
    #[error("{message}")]
    FrameworkMisuse {
        /// Rendered failure text.
        message: String,
    },
}

impl GuardError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::ValueViolation => Self::ValueViolation { message },
            ErrorKind::TypeMismatch => Self::TypeMismatch { message },
            ErrorKind::NotComparable => Self::NotComparable { message },
            ErrorKind::TypeConstraintViolation => Self::TypeConstraintViolation { message },
            ErrorKind::FrameworkMisuse => Self::FrameworkMisuse { message },
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValueViolation { .. } => ErrorKind::ValueViolation,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::NotComparable { .. } => ErrorKind::NotComparable,
            Self::TypeConstraintViolation { .. } => ErrorKind::TypeConstraintViolation,
            Self::FrameworkMisuse { .. } => ErrorKind::FrameworkMisuse,
        }
    }

    /// Returns the rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::ValueViolation { message }
            | Self::TypeMismatch { message }
            | Self::NotComparable { message }
            | Self::TypeConstraintViolation { message }
            | Self::FrameworkMisuse { message } => message,
        }
    }

    /// Returns true if the chaining API was used incorrectly.
    #[must_use]
    pub fn is_misuse(&self) -> bool {
        matches!(self, Self::FrameworkMisuse { .. })
    }

    /// Converts the error to a JSON structure.
    #[cfg(feature = "serde")]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "kind": self.kind(),
            "message": self.message(),
        })
    }
}

// ============================================================================
// OPERATION ERROR
// ============================================================================

/// Failure of a generic operation invoked through
/// [`Operations`](crate::ops::Operations).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum OperationError {
    /// The type exposes no ordering.
    #[error("type '{type_name}' does not define an ordering")]
    NotComparable {
        /// Name of the offending type.
        type_name: String,
    },

    /// The type exposes no default value or no equality.
    #[error("type '{type_name}' does not provide {capability}")]
    MissingCapability {
        /// Name of the offending type.
        type_name: String,
        /// Human-readable capability, e.g. "a default value".
        capability: &'static str,
    },

    /// An operand is not exactly of the bound type.
    #[error("expected a value of type '{expected}', found '{actual}'")]
    TypeMismatch {
        /// Name of the bound type.
        expected: String,
        /// Name (or id) of the operand's type.
        actual: String,
    },
}

impl From<OperationError> for GuardError {
    fn from(error: OperationError) -> Self {
        let kind = match &error {
            OperationError::NotComparable { .. } => ErrorKind::NotComparable,
            OperationError::MissingCapability { .. } => ErrorKind::TypeConstraintViolation,
            OperationError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
        };
        let mut message = error.to_string();
        // Messages read as sentences everywhere else.
        if let Some(first) = message.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        message.push('.');
        Self::new(kind, message)
    }
}

// ============================================================================
// TESTS
// ============================================================================
