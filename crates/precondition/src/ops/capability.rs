//! Capability records and operation binding
//!
//! A [`Capabilities`] record is the runtime stand-in for "this type has a
//! default value / an equality / an ordering". Records come from a type's
//! [`Describe`](crate::types::Describe) implementation or from explicit
//! registration; [`bind`] turns a record into the [`BoundOperation`] stored in
//! the cache.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use crate::types::TypeInfo;

/// Produces the default instance of a type.
pub type DefaultFn = fn() -> Box<dyn Any>;

/// Equality over two values of the same type; `None` if either operand has
/// another type.
pub type EqualFn = fn(&dyn Any, &dyn Any) -> Option<bool>;

/// Ordering over two values of the same type; `None` if either operand has
/// another type.
pub type CompareFn = fn(&dyn Any, &dyn Any) -> Option<Ordering>;

// ============================================================================
// OPERATION KIND
// ============================================================================

/// The generic operations the invoker can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperationKind {
    /// Default value lookup.
    DefaultValue,
    /// Natural equality.
    Equality,
    /// Natural ordering.
    Compare,
}

impl OperationKind {
    /// Human-readable capability, used in failure messages.
    #[must_use]
    pub fn capability(self) -> &'static str {
        match self {
            Self::DefaultValue => "a default value",
            Self::Equality => "an equality definition",
            Self::Compare => "an ordering",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DefaultValue => "default_value",
            Self::Equality => "equality",
            Self::Compare => "compare",
        })
    }
}

// ============================================================================
// CAPABILITIES
// ============================================================================

/// Operations a type supports, each optional.
///
/// # Examples
///
/// ```rust,ignore
/// use precondition::ops::Capabilities;
///
/// // Default + equality, no ordering
/// let caps = Capabilities::none().with_default::<Point>().with_equality::<Point>();
///
/// // Everything, from `Ord + Default`
/// let caps = Capabilities::ordered::<u32>();
/// ```
#[derive(Clone, Copy, Default)]
pub struct Capabilities {
    pub(crate) default: Option<DefaultFn>,
    pub(crate) equal: Option<EqualFn>,
    pub(crate) compare: Option<CompareFn>,
    pub(crate) elements: Option<ElementOrder>,
}

/// How an enumerable compares its elements for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementOrder {
    /// Same length and pairwise equal in iteration order.
    Ordered,
    /// Same length and every element matched by a distinct equal element,
    /// for collections whose iteration order is unspecified.
    Unordered,
}

impl Capabilities {
    /// No capabilities.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Default value, equality and ordering from `Ord + Default`.
    #[must_use]
    pub fn ordered<T: Ord + Default + Any>() -> Self {
        Self::none()
            .with_default::<T>()
            .with_equality::<T>()
            .with_ordering::<T>()
    }

    /// Adds the default value of `T`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_default<T: Default + Any>(mut self) -> Self {
        self.default = Some(default_of::<T>);
        self
    }

    /// Adds `PartialEq` equality of `T`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_equality<T: PartialEq + Any>(mut self) -> Self {
        self.equal = Some(equal_of::<T>);
        self
    }

    /// Adds the `Ord` ordering of `T`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_ordering<T: Ord + Any>(mut self) -> Self {
        self.compare = Some(compare_of::<T>);
        self
    }

    /// Adds element-wise equality in iteration order.
    ///
    /// Used when no [`with_equality`](Self::with_equality) is given; elements
    /// are compared through their own type's binding.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_ordered_elements(mut self) -> Self {
        self.elements = Some(ElementOrder::Ordered);
        self
    }

    /// Adds element-wise equality ignoring iteration order.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_unordered_elements(mut self) -> Self {
        self.elements = Some(ElementOrder::Unordered);
        self
    }

    /// Adds equality and ordering for a floating-point type.
    ///
    /// `-0.0` equals `0.0`, NaN equals NaN and orders before every number.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_total_order<T: Float>(mut self) -> Self {
        self.equal = Some(float_equal_of::<T>);
        self.compare = Some(float_compare_of::<T>);
        self
    }

    /// Returns true if the record supports `kind`.
    #[must_use]
    pub fn supports(&self, kind: OperationKind) -> bool {
        match kind {
            OperationKind::DefaultValue => self.default.is_some(),
            OperationKind::Equality => self.equal.is_some() || self.elements.is_some(),
            OperationKind::Compare => self.compare.is_some(),
        }
    }

    /// Returns true if the record supports nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.default.is_none()
            && self.equal.is_none()
            && self.compare.is_none()
            && self.elements.is_none()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("default", &self.default.is_some())
            .field("equal", &self.equal.is_some())
            .field("compare", &self.compare.is_some())
            .field("elements", &self.elements)
            .finish()
    }
}

fn default_of<T: Default + Any>() -> Box<dyn Any> {
    Box::new(T::default())
}

fn equal_of<T: PartialEq + Any>(a: &dyn Any, b: &dyn Any) -> Option<bool> {
    Some(a.downcast_ref::<T>()? == b.downcast_ref::<T>()?)
}

fn compare_of<T: Ord + Any>(a: &dyn Any, b: &dyn Any) -> Option<Ordering> {
    Some(a.downcast_ref::<T>()?.cmp(b.downcast_ref::<T>()?))
}

// ============================================================================
// FLOATS
// ============================================================================

/// Floating-point types with a NaN-aware total order.
pub trait Float: Copy + PartialOrd + Any {
    /// Returns true for NaN.
    fn is_nan(self) -> bool;
}

impl Float for f32 {
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
}

impl Float for f64 {
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
}

fn float_order<T: Float>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            _ => Ordering::Greater,
        })
}

fn float_equal_of<T: Float>(a: &dyn Any, b: &dyn Any) -> Option<bool> {
    let (a, b) = (*a.downcast_ref::<T>()?, *b.downcast_ref::<T>()?);
    Some(float_order(a, b) == Ordering::Equal)
}

fn float_compare_of<T: Float>(a: &dyn Any, b: &dyn Any) -> Option<Ordering> {
    Some(float_order(*a.downcast_ref::<T>()?, *b.downcast_ref::<T>()?))
}

// ============================================================================
// BINDING
// ============================================================================

/// A type-specialized implementation of one generic operation.
#[derive(Clone, Copy)]
pub enum BoundOperation {
    /// Default value from a capability record.
    Default(DefaultFn),
    /// Equality from a capability record.
    Equal(EqualFn),
    /// Ordering from a capability record.
    Compare(CompareFn),
    /// Null-aware delegation to the inner type of a nullable type.
    Lifted(OperationKind),
    /// Equality of an enumerable, delegated to its element type.
    Elements(ElementOrder),
    /// The type has no implementation; invoking fails.
    Unsupported(OperationKind),
}

impl BoundOperation {
    /// The operation kind this binding implements.
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Default(_) => OperationKind::DefaultValue,
            Self::Equal(_) => OperationKind::Equality,
            Self::Compare(_) => OperationKind::Compare,
            Self::Elements(_) => OperationKind::Equality,
            Self::Lifted(kind) | Self::Unsupported(kind) => *kind,
        }
    }

    /// Returns true unless the binding is [`BoundOperation::Unsupported`].
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl fmt::Debug for BoundOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default(_) => f.write_str("Default"),
            Self::Equal(_) => f.write_str("Equal"),
            Self::Compare(_) => f.write_str("Compare"),
            Self::Lifted(kind) => write!(f, "Lifted({kind})"),
            Self::Elements(order) => write!(f, "Elements({order:?})"),
            Self::Unsupported(kind) => write!(f, "Unsupported({kind})"),
        }
    }
}

/// Computes the binding of `kind` for `info`.
///
/// `registered` (an explicit registration) wins over the type's own
/// capabilities; within a record a direct equality wins over element-wise
/// equality; nullable types without a record delegate to their inner
/// type; everything else is unsupported.
pub(crate) fn bind(
    info: &TypeInfo,
    registered: Option<Capabilities>,
    kind: OperationKind,
) -> BoundOperation {
    let from_record = |caps: Capabilities| match kind {
        OperationKind::DefaultValue => caps.default.map(BoundOperation::Default),
        OperationKind::Equality => caps
            .equal
            .map(BoundOperation::Equal)
            .or_else(|| caps.elements.map(BoundOperation::Elements)),
        OperationKind::Compare => caps.compare.map(BoundOperation::Compare),
    };

    registered
        .and_then(from_record)
        .or_else(|| from_record(info.capabilities()))
        .unwrap_or_else(|| {
            if info.is_nullable() {
                BoundOperation::Lifted(kind)
            } else {
                BoundOperation::Unsupported(kind)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Describe, Object};

    #[test]
    fn test_ordered_record() {
        let caps = Capabilities::ordered::<i32>();
        assert!(caps.supports(OperationKind::DefaultValue));
        assert!(caps.supports(OperationKind::Equality));
        assert!(caps.supports(OperationKind::Compare));
        assert!(!Capabilities::none().supports(OperationKind::Compare));
        assert!(Capabilities::none().is_empty());
    }

    #[test]
    fn test_record_functions_reject_foreign_operands() {
        let caps = Capabilities::ordered::<i32>();
        let compare = caps.compare.unwrap();
        assert_eq!(compare(&1_i32, &2_i32), Some(Ordering::Less));
        assert_eq!(compare(&1_i32, &2_i64), None);
    }

    #[test]
    fn test_float_order_is_total() {
        assert_eq!(float_order(f64::NAN, f64::NAN), Ordering::Equal);
        assert_eq!(float_order(f64::NAN, 0.0), Ordering::Less);
        assert_eq!(float_order(0.0, f64::NAN), Ordering::Greater);
        assert_eq!(float_order(-0.0, 0.0), Ordering::Equal);
        assert_eq!(float_order(1.0_f32, 2.0), Ordering::Less);
    }

    #[test]
    fn test_bind_precedence() {
        let info = i32::describe();
        assert!(matches!(
            bind(&info, None, OperationKind::Compare),
            BoundOperation::Compare(_)
        ));

        let unordered = Capabilities::none().with_equality::<i32>();
        assert!(matches!(
            bind(&info, Some(unordered), OperationKind::Equality),
            BoundOperation::Equal(_)
        ));
        // A registration that lacks the kind falls through to the type's record.
        assert!(matches!(
            bind(&info, Some(unordered), OperationKind::Compare),
            BoundOperation::Compare(_)
        ));
    }

    #[test]
    fn test_bind_nullable_and_unsupported() {
        assert!(matches!(
            bind(&Object::describe(), None, OperationKind::Compare),
            BoundOperation::Lifted(OperationKind::Compare)
        ));

        let bare = crate::types::TypeInfo::scalar::<u8>("bare");
        let bound = bind(&bare, None, OperationKind::DefaultValue);
        assert!(!bound.is_supported());
        assert_eq!(bound.kind(), OperationKind::DefaultValue);
    }

    #[test]
    fn test_bind_element_equality() {
        use std::collections::HashSet;

        let bound = bind(&Vec::<i32>::describe(), None, OperationKind::Equality);
        assert!(matches!(bound, BoundOperation::Elements(ElementOrder::Ordered)));
        assert_eq!(bound.kind(), OperationKind::Equality);
        assert!(matches!(
            bind(&HashSet::<i32>::describe(), None, OperationKind::Equality),
            BoundOperation::Elements(ElementOrder::Unordered)
        ));
        // Enumerables still have no ordering.
        assert!(!bind(&Vec::<i32>::describe(), None, OperationKind::Compare).is_supported());

        // A direct equality wins over the element-wise one.
        let direct = Capabilities::none()
            .with_ordered_elements()
            .with_equality::<Vec<i32>>();
        assert!(matches!(
            bind(&Vec::<i32>::describe(), Some(direct), OperationKind::Equality),
            BoundOperation::Equal(_)
        ));
    }
}
