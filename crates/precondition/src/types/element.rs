//! Element type of enumerable types
//!
//! Resolution order, first match wins:
//!
//! 1. [`Shape::Array`] → its element type
//! 2. [`Shape::Sequence`] → its element type
//! 3. [`Shape::Collection`] → the element type of the **first** declared
//!    view; when a collection declares several views with different element
//!    types the choice is simply "first declared"
//! 4. [`Shape::Untyped`], or a collection declaring no view → [`Object`]
//!
//! There is no recursion: a view's element type is taken as is.

use super::{Describe, Object, Shape, TypeInfo};

/// Returns the element type of `info`, or `None` if it is not enumerable.
pub fn element_type(info: &TypeInfo) -> Option<TypeInfo> {
    let element = match info.shape() {
        Shape::Scalar => return None,
        Shape::Array { element } | Shape::Sequence { element } => element(),
        Shape::Collection { implements } => match implements.first() {
            Some(element) => element(),
            None => Object::describe(),
        },
        Shape::Untyped => Object::describe(),
    };
    tracing::trace!(
        enumerable = %info.name(),
        element = %element.name(),
        "resolved element type"
    );
    Some(element)
}

/// Returns true if values of `info` can be enumerated.
pub fn is_enumerable(info: &TypeInfo) -> bool {
    info.shape().is_enumerable() && info.elements.is_some()
}
