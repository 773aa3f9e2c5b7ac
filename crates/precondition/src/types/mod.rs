//! Runtime type descriptors
//!
//! Checks run against values whose concrete type is erased behind
//! `&dyn Any`. A [`TypeInfo`] carries what the engine needs to know about
//! such a type at runtime:
//!
//! - **Identity**: a [`TypeKey`] (`TypeId` plus a readable name)
//! - **Shape**: scalar, array, sequence, collection or untyped enumerable
//! - **Nullability**: how to detect null and unwrap the inner value
//! - **Capabilities**: default value, equality and ordering, when known at
//!   compile time
//! - **Rendering**: value → text for failure messages
//!
//! Types opt in through the [`Describe`] trait. Implementations ship for the
//! primitives, strings, `Option<T>` and the std collections; user types use
//! [`describe_scalar!`](crate::describe_scalar) or implement the trait by hand.

mod element;
mod impls;
mod object;

pub use element::{element_type, is_enumerable};
pub use object::{Object, ObjectList};

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

use crate::ops::Capabilities;

/// Produces the descriptor of a related type (e.g. an element type).
pub type Describer = fn() -> TypeInfo;

/// Unwraps a nullable value: `None` for null, otherwise the inner value and
/// its runtime descriptor.
pub type UnwrapFn = fn(&dyn Any) -> Option<(&dyn Any, TypeInfo)>;

/// Produces the null instance of a nullable type.
pub type NullFn = fn() -> Box<dyn Any>;

/// Renders a value; `None` means the value is null.
pub type RenderFn = fn(&dyn Any) -> Option<String>;

/// Iterates the elements of an enumerable value; `None` when the value is
/// null.
pub type ElementsFn = fn(&dyn Any) -> Option<Box<dyn Iterator<Item = &dyn Any> + '_>>;

// ============================================================================
// TYPE KEY
// ============================================================================

/// Identity of a concrete runtime type.
///
/// Equality and hashing use only the `TypeId`; the name is for messages.
#[derive(Debug, Clone)]
pub struct TypeKey {
    id: TypeId,
    name: Cow<'static, str>,
}

impl TypeKey {
    /// Creates a key for `T` with a display name.
    pub fn of<T: Any>(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: name.into(),
        }
    }

    /// The `TypeId`.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl std::hash::Hash for TypeKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// SHAPE
// ============================================================================

/// Structural shape of a type, as seen by the element-type resolver.
#[derive(Clone)]
pub enum Shape {
    /// Not enumerable.
    Scalar,
    /// Fixed or boxed array of `element`.
    Array {
        /// Element descriptor.
        element: Describer,
    },
    /// The canonical "sequence of T" type itself.
    Sequence {
        /// Element descriptor.
        element: Describer,
    },
    /// A collection implementing one or more "sequence of T" views, in
    /// declaration order.
    Collection {
        /// Element descriptors of the implemented views.
        implements: SmallVec<[Describer; 2]>,
    },
    /// Enumerable without a typed element view.
    Untyped,
}

impl Shape {
    /// Returns true for every shape except [`Shape::Scalar`].
    #[must_use]
    pub fn is_enumerable(&self) -> bool {
        !matches!(self, Self::Scalar)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.write_str("Scalar"),
            Self::Array { element } => write!(f, "Array({})", element().name()),
            Self::Sequence { element } => write!(f, "Sequence({})", element().name()),
            Self::Collection { implements } => f
                .debug_list()
                .entries(implements.iter().map(|describe| describe().key))
                .finish(),
            Self::Untyped => f.write_str("Untyped"),
        }
    }
}

// ============================================================================
// NULLABILITY
// ============================================================================

/// How a nullable type exposes its inner value.
#[derive(Clone, Copy)]
pub struct Nullable {
    pub(crate) unwrap: UnwrapFn,
    pub(crate) null: NullFn,
}

impl Nullable {
    /// Creates a nullability vtable.
    pub fn new(unwrap: UnwrapFn, null: NullFn) -> Self {
        Self { unwrap, null }
    }
}

// ============================================================================
// TYPE INFO
// ============================================================================

/// Runtime descriptor of a concrete type.
#[derive(Clone)]
pub struct TypeInfo {
    key: TypeKey,
    shape: Shape,
    nullable: Option<Nullable>,
    capabilities: Capabilities,
    render: RenderFn,
    elements: Option<ElementsFn>,
}

impl TypeInfo {
    /// Describes a non-enumerable, non-nullable type rendered with `Display`.
    pub fn scalar<T: Any + fmt::Display>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::opaque::<T>(name, render_display::<T>)
    }

    /// Describes a non-enumerable, non-nullable type with a custom renderer.
    pub fn opaque<T: Any>(name: impl Into<Cow<'static, str>>, render: RenderFn) -> Self {
        Self {
            key: TypeKey::of::<T>(name),
            shape: Shape::Scalar,
            nullable: None,
            capabilities: Capabilities::none(),
            render,
            elements: None,
        }
    }

    /// Describes an enumerable type.
    pub fn enumerable<T: Any>(
        name: impl Into<Cow<'static, str>>,
        shape: Shape,
        elements: ElementsFn,
        render: RenderFn,
    ) -> Self {
        Self {
            key: TypeKey::of::<T>(name),
            shape,
            nullable: None,
            capabilities: Capabilities::none(),
            render,
            elements: Some(elements),
        }
    }

    /// Sets the compile-time capabilities.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Marks the type nullable.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nullable(mut self, nullable: Nullable) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// Overrides shape and element enumeration (used by wrapper types that
    /// inherit the inner type's shape).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_shape(mut self, shape: Shape, elements: Option<ElementsFn>) -> Self {
        self.shape = shape;
        self.elements = elements;
        self
    }

    /// The cache identity.
    #[must_use]
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// The `TypeId`.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.key.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.key.name()
    }

    /// The structural shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Compile-time capabilities.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Nullability vtable, if the type can hold null.
    #[must_use]
    pub fn nullable(&self) -> Option<Nullable> {
        self.nullable
    }

    /// Returns true if values of this type can be null.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable.is_some()
    }

    /// Returns true if `value` is the null instance of this type.
    ///
    /// Always false for non-nullable types.
    pub fn is_null(&self, value: &dyn Any) -> bool {
        self.nullable
            .is_some_and(|nullable| (nullable.unwrap)(value).is_none())
    }

    /// Renders `value`; `None` means null.
    pub fn render(&self, value: &dyn Any) -> Option<String> {
        (self.render)(value)
    }

    /// Iterates the elements of `value`.
    ///
    /// Returns `None` when the type is not enumerable or the value is null.
    pub fn elements<'a>(
        &self,
        value: &'a dyn Any,
    ) -> Option<Box<dyn Iterator<Item = &'a dyn Any> + 'a>> {
        self.elements.and_then(|elements| elements(value))
    }

    /// Returns true if `value` has exactly this type.
    pub fn matches(&self, value: &dyn Any) -> bool {
        value.type_id() == self.key.id
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.key.name)
            .field("shape", &self.shape)
            .field("nullable", &self.nullable.is_some())
            .finish_non_exhaustive()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

// ============================================================================
// DESCRIBE
// ============================================================================

/// Types that can be checked at runtime.
///
/// # Examples
///
/// ```rust,ignore
/// use precondition::types::{Describe, TypeInfo};
/// use precondition::ops::Capabilities;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
/// struct Priority(u8);
///
/// impl std::fmt::Display for Priority {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "P{}", self.0)
///     }
/// }
///
/// impl Describe for Priority {
///     fn describe() -> TypeInfo {
///         TypeInfo::scalar::<Self>("Priority").with_capabilities(Capabilities::ordered::<Self>())
///     }
/// }
/// ```
pub trait Describe: Any {
    /// Builds the runtime descriptor of `Self`.
    fn describe() -> TypeInfo;
}

/// Renders a value of `T` through `Display`.
pub fn render_display<T: Any + fmt::Display>(value: &dyn Any) -> Option<String> {
    Some(
        value
            .downcast_ref::<T>()
            .map_or_else(|| String::from("?"), ToString::to_string),
    )
}

/// Renders one element, mapping null to the message sentinel.
pub(crate) fn render_element(info: &TypeInfo, value: &dyn Any) -> String {
    info.render(value)
        .unwrap_or_else(|| crate::message::NULL_SENTINEL.to_owned())
}

// ============================================================================
// TESTS
// ============================================================================
