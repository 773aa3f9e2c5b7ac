//! Generic operations over runtime-typed values
//!
//! [`Operations`] answers three questions about values whose concrete type
//! is only known through a [`TypeInfo`]:
//!
//! - [`default_value`](Operations::default_value): the type's default instance
//! - [`are_equal`](Operations::are_equal): natural equality
//! - [`compare`](Operations::compare): natural ordering as a [`CompareOutcome`]
//!
//! Each `(type, operation)` pair is resolved once and memoized in an
//! [`OperationCache`]. Resolution never fails; a type without the capability
//! is bound to an unsupported operation that fails when invoked.
//!
//! # Strict typing
//!
//! Both operands must be *exactly* of the bound type. Comparing an `i32`
//! with an `i64` or an `f64` is a [`OperationError::TypeMismatch`], never an
//! implicit conversion.
//!
//! # Examples
//!
//! ```rust,ignore
//! use precondition::ops::{CompareOutcome, Operations};
//! use precondition::types::Describe;
//!
//! let ops = Operations::global();
//! let info = i32::describe();
//! assert_eq!(ops.compare(&info, &1_i32, &2_i32)?, CompareOutcome::LessThan);
//! assert!(ops.compare(&info, &1_i32, &2_i64).is_err());
//! ```

mod cache;
mod capability;

pub use cache::OperationCache;
pub use capability::{
    BoundOperation, Capabilities, CompareFn, DefaultFn, ElementOrder, EqualFn, Float,
    OperationKind,
};

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use dashmap::DashMap;

use crate::error::OperationError;
use crate::types::{Describe, Object, TypeInfo, element_type};

static GLOBAL: LazyLock<Operations> = LazyLock::new(Operations::new);

// ============================================================================
// COMPARE OUTCOME
// ============================================================================

/// Result of an ordering comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CompareOutcome {
    /// Left operand orders first.
    LessThan,
    /// Operands are equivalent.
    Equal,
    /// Left operand orders last.
    GreaterThan,
}

impl CompareOutcome {
    /// The outcome with operands swapped.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::LessThan => Self::GreaterThan,
            Self::Equal => Self::Equal,
            Self::GreaterThan => Self::LessThan,
        }
    }
}

impl From<Ordering> for CompareOutcome {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::LessThan,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::GreaterThan,
        }
    }
}

impl From<CompareOutcome> for Ordering {
    fn from(outcome: CompareOutcome) -> Self {
        match outcome {
            CompareOutcome::LessThan => Self::Less,
            CompareOutcome::Equal => Self::Equal,
            CompareOutcome::GreaterThan => Self::Greater,
        }
    }
}

impl fmt::Display for CompareOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LessThan => "less than",
            Self::Equal => "equal to",
            Self::GreaterThan => "greater than",
        })
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// The generic operation invoker.
///
/// Use [`Operations::global`] for the process-wide instance that
/// [`Argument`](crate::Argument) checks run against, or [`Operations::new`]
/// for an isolated one.
#[derive(Debug, Default)]
pub struct Operations {
    cache: OperationCache,
    registered: DashMap<TypeId, Capabilities>,
}

impl Operations {
    /// Creates an invoker with an empty cache and no registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide invoker.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// The underlying cache.
    #[must_use]
    pub fn cache(&self) -> &OperationCache {
        &self.cache
    }

    /// Registers capabilities for `T`, taking precedence over the ones its
    /// [`Describe`] implementation declares.
    ///
    /// Bindings are immutable once published, so registration only affects
    /// operation kinds not yet resolved for `T`. Returns `false` (and logs a
    /// warning) when some operation of `T` was already bound.
    pub fn register<T: Describe>(&self, capabilities: Capabilities) -> bool {
        let info = T::describe();
        self.registered.insert(info.id(), capabilities);

        let fresh = !self.cache.contains_type(info.id());
        if fresh {
            tracing::debug!(type_name = %info.name(), ?capabilities, "registered capabilities");
        } else {
            tracing::warn!(
                type_name = %info.name(),
                "capabilities registered after first use; existing bindings are kept"
            );
        }
        fresh
    }

    /// Resolves the binding of `kind` for `info`, memoized.
    pub fn resolve(&self, info: &TypeInfo, kind: OperationKind) -> BoundOperation {
        self.cache.get_or_bind(info, kind, || {
            let registered = self.registered.get(&info.id()).map(|caps| *caps);
            capability::bind(info, registered, kind)
        })
    }

    /// Returns the default instance of `info`.
    pub fn default_value(&self, info: &TypeInfo) -> Result<Box<dyn Any>, OperationError> {
        match self.resolve(info, OperationKind::DefaultValue) {
            BoundOperation::Default(default) => Ok(default()),
            BoundOperation::Lifted(_) => match info.nullable() {
                Some(nullable) => Ok((nullable.null)()),
                None => Err(missing(info, OperationKind::DefaultValue)),
            },
            _ => Err(missing(info, OperationKind::DefaultValue)),
        }
    }

    /// Returns true if `a` and `b` are equal under `info`'s natural equality.
    pub fn are_equal(
        &self,
        info: &TypeInfo,
        a: &dyn Any,
        b: &dyn Any,
    ) -> Result<bool, OperationError> {
        ensure_exact(info, a)?;
        ensure_exact(info, b)?;

        match self.resolve(info, OperationKind::Equality) {
            BoundOperation::Equal(equal) => equal(a, b).ok_or_else(|| mismatch(info, b)),
            BoundOperation::Elements(order) => self.elements_equal(info, a, b, order),
            BoundOperation::Lifted(_) => match (unwrap_nullable(info, a), unwrap_nullable(info, b)) {
                (None, None) => Ok(true),
                (None, Some(_)) | (Some(_), None) => Ok(false),
                (Some((a, a_info)), Some((b, b_info))) => {
                    ensure_same(&a_info, &b_info)?;
                    self.are_equal(&a_info, a, b)
                }
            },
            _ => Err(missing(info, OperationKind::Equality)),
        }
    }

    /// Orders `a` relative to `b` under `info`'s natural ordering.
    ///
    /// For nullable types null orders before every value and equals null.
    pub fn compare(
        &self,
        info: &TypeInfo,
        a: &dyn Any,
        b: &dyn Any,
    ) -> Result<CompareOutcome, OperationError> {
        ensure_exact(info, a)?;
        ensure_exact(info, b)?;

        match self.resolve(info, OperationKind::Compare) {
            BoundOperation::Compare(compare) => compare(a, b)
                .map(CompareOutcome::from)
                .ok_or_else(|| mismatch(info, b)),
            BoundOperation::Lifted(_) => match (unwrap_nullable(info, a), unwrap_nullable(info, b)) {
                (None, None) => Ok(CompareOutcome::Equal),
                (None, Some(_)) => Ok(CompareOutcome::LessThan),
                (Some(_), None) => Ok(CompareOutcome::GreaterThan),
                (Some((a, a_info)), Some((b, b_info))) => {
                    ensure_same(&a_info, &b_info)?;
                    self.compare(&a_info, a, b)
                }
            },
            _ => Err(OperationError::NotComparable {
                type_name: info.name().to_owned(),
            }),
        }
    }

    /// Equality of two enumerables through their element type's binding.
    fn elements_equal(
        &self,
        info: &TypeInfo,
        a: &dyn Any,
        b: &dyn Any,
        order: ElementOrder,
    ) -> Result<bool, OperationError> {
        let element = element_type(info).ok_or_else(|| missing(info, OperationKind::Equality))?;
        if items(info, a)?.count() != items(info, b)?.count() {
            return Ok(false);
        }

        match order {
            ElementOrder::Ordered => {
                for (left, right) in items(info, a)?.zip(items(info, b)?) {
                    if !self.are_equal(&element, left, right)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            ElementOrder::Unordered => {
                let candidates: Vec<&dyn Any> = items(info, b)?.collect();
                let mut matched = vec![false; candidates.len()];
                for left in items(info, a)? {
                    let mut found = false;
                    for (index, right) in candidates.iter().enumerate() {
                        if !matched[index] && self.are_equal(&element, left, *right)? {
                            matched[index] = true;
                            found = true;
                            break;
                        }
                    }
                    if !found {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    /// Typed form of [`compare`](Self::compare).
    pub fn compare_values<T: Describe>(&self, a: &T, b: &T) -> Result<CompareOutcome, OperationError> {
        self.compare(&T::describe(), a, b)
    }

    /// Typed form of [`are_equal`](Self::are_equal).
    pub fn equal_values<T: Describe>(&self, a: &T, b: &T) -> Result<bool, OperationError> {
        self.are_equal(&T::describe(), a, b)
    }

    /// Typed form of [`default_value`](Self::default_value).
    pub fn default_of<T: Describe>(&self) -> Result<T, OperationError> {
        let info = T::describe();
        let value = self.default_value(&info)?;
        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|other| mismatch(&info, &*other))
    }
}

fn unwrap_nullable<'a>(info: &TypeInfo, value: &'a dyn Any) -> Option<(&'a dyn Any, TypeInfo)> {
    info.nullable().and_then(|nullable| (nullable.unwrap)(value))
}

fn ensure_exact(info: &TypeInfo, value: &dyn Any) -> Result<(), OperationError> {
    if info.matches(value) {
        Ok(())
    } else {
        Err(mismatch(info, value))
    }
}

fn ensure_same(expected: &TypeInfo, actual: &TypeInfo) -> Result<(), OperationError> {
    if expected.id() == actual.id() {
        Ok(())
    } else {
        Err(OperationError::TypeMismatch {
            expected: expected.name().to_owned(),
            actual: actual.name().to_owned(),
        })
    }
}

fn items<'v>(
    info: &TypeInfo,
    value: &'v dyn Any,
) -> Result<Box<dyn Iterator<Item = &'v dyn Any> + 'v>, OperationError> {
    info.elements(value)
        .ok_or_else(|| missing(info, OperationKind::Equality))
}

fn mismatch(info: &TypeInfo, value: &dyn Any) -> OperationError {
    OperationError::TypeMismatch {
        expected: info.name().to_owned(),
        actual: operand_name(value),
    }
}

/// Best-effort name of an operand's type; `dyn Any` only knows its `TypeId`.
fn operand_name(value: &dyn Any) -> String {
    value
        .downcast_ref::<Object>()
        .and_then(Object::type_info)
        .map_or_else(|| "another type".to_owned(), |info| info.name().to_owned())
}

fn missing(info: &TypeInfo, kind: OperationKind) -> OperationError {
    OperationError::MissingCapability {
        type_name: info.name().to_owned(),
        capability: kind.capability(),
    }
}
