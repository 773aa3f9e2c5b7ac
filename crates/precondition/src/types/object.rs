//! Type-erased values: the "any object" type
//!
//! [`Object`] is what the element-type resolver falls back to when an
//! enumerable exposes no typed element view. It is nullable and remembers the
//! descriptor of the value it holds, so null checks, rendering and the
//! generic operations all keep working on the erased value.

use std::any::Any;
use std::fmt;

use super::{Describe, Nullable, Shape, TypeInfo, render_element};
use crate::ops::Capabilities;

/// A nullable, type-erased value.
pub struct Object {
    inner: Option<(Box<dyn Any>, TypeInfo)>,
}

impl Object {
    /// Wraps a value.
    pub fn new<T: Describe>(value: T) -> Self {
        Self {
            inner: Some((Box::new(value), T::describe())),
        }
    }

    /// The null object.
    #[must_use]
    pub fn null() -> Self {
        Self { inner: None }
    }

    /// Returns true for the null object.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.inner.is_none()
    }

    /// Runtime descriptor of the held value.
    #[must_use]
    pub fn type_info(&self) -> Option<&TypeInfo> {
        self.inner.as_ref().map(|(_, info)| info)
    }

    /// The held value.
    #[must_use]
    pub fn value(&self) -> Option<&dyn Any> {
        self.inner.as_ref().map(|(value, _)| &**value)
    }

    /// Downcasts the held value.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value()?.downcast_ref::<T>()
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some((value, info)) => f
                .debug_tuple("Object")
                .field(&render_element(info, &**value))
                .finish(),
            None => f.write_str("Object(null)"),
        }
    }
}

fn unwrap_object(value: &dyn Any) -> Option<(&dyn Any, TypeInfo)> {
    let (inner, info) = value.downcast_ref::<Object>()?.inner.as_ref()?;
    Some((&**inner, info.clone()))
}

fn null_object() -> Box<dyn Any> {
    Box::new(Object::null())
}

fn render_object(value: &dyn Any) -> Option<String> {
    let (inner, info) = unwrap_object(value)?;
    info.render(inner)
}

impl Describe for Object {
    fn describe() -> TypeInfo {
        TypeInfo::opaque::<Self>("object", render_object)
            .with_nullable(Nullable::new(unwrap_object, null_object))
    }
}

// ============================================================================
// OBJECT LIST
// ============================================================================

/// An enumerable without a typed element view.
///
/// Its element type resolves to [`Object`].
#[derive(Debug, Default)]
pub struct ObjectList {
    items: Vec<Object>,
}

impl ObjectList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with<T: Describe>(mut self, value: T) -> Self {
        self.items.push(Object::new(value));
        self
    }

    /// Appends a null.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_null(mut self) -> Self {
        self.items.push(Object::null());
        self
    }

    /// Appends an object.
    pub fn push(&mut self, object: Object) {
        self.items.push(object);
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the items.
    pub fn iter(&self) -> std::slice::Iter<'_, Object> {
        self.items.iter()
    }
}

impl FromIterator<Object> for ObjectList {
    fn from_iter<I: IntoIterator<Item = Object>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

fn object_list_elements(value: &dyn Any) -> Option<Box<dyn Iterator<Item = &dyn Any> + '_>> {
    let list = value.downcast_ref::<ObjectList>()?;
    Some(Box::new(list.items.iter().map(|item| item as &dyn Any)))
}

fn render_object_list(value: &dyn Any) -> Option<String> {
    let list = value.downcast_ref::<ObjectList>()?;
    let info = Object::describe();
    let rendered: Vec<String> = list
        .items
        .iter()
        .map(|item| render_element(&info, item))
        .collect();
    Some(format!("[{}]", rendered.join(", ")))
}

impl Describe for ObjectList {
    fn describe() -> TypeInfo {
        TypeInfo::enumerable::<Self>(
            "ObjectList",
            Shape::Untyped,
            object_list_elements,
            render_object_list,
        )
        .with_capabilities(
            Capabilities::none()
                .with_default::<Self>()
                .with_ordered_elements(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_keeps_descriptor() {
        let object = Object::new(7_u32);
        assert_eq!(object.type_info().unwrap().name(), "u32");
        assert_eq!(object.downcast_ref::<u32>(), Some(&7));
        assert_eq!(format!("{object:?}"), "Object(\"7\")");
    }

    #[test]
    fn test_object_nullability() {
        let info = Object::describe();
        assert!(info.is_nullable());
        assert!(info.is_null(&Object::null()));
        assert!(!info.is_null(&Object::new("x")));
        assert_eq!(info.render(&Object::new(1.5_f64)), Some("1.5".to_owned()));
    }

    #[test]
    fn test_object_list_is_untyped() {
        let list = ObjectList::new().with(1_i32).with_null().with("two");
        let info = ObjectList::describe();
        assert!(matches!(info.shape(), Shape::Untyped));
        assert_eq!(info.elements(&list).unwrap().count(), 3);
        assert_eq!(info.render(&list), Some("[1, null, two]".to_owned()));
    }
}
