//! [`Describe`] implementations for std types

use std::any::Any;
use std::collections::{BTreeSet, BinaryHeap, HashSet, LinkedList, VecDeque};

use smallvec::smallvec;

use super::{Describe, ElementsFn, Nullable, Shape, TypeInfo, render_element};
use crate::ops::Capabilities;

// ============================================================================
// PRIMITIVES
// ============================================================================

macro_rules! describe_ordered {
    ($($ty:ty => $name:literal),+ $(,)?) => {$(
        impl Describe for $ty {
            fn describe() -> TypeInfo {
                TypeInfo::scalar::<$ty>($name).with_capabilities(Capabilities::ordered::<$ty>())
            }
        }
    )+};
}

describe_ordered! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    bool => "bool",
    char => "char",
    String => "String",
    &'static str => "&str",
}

impl Describe for f32 {
    fn describe() -> TypeInfo {
        TypeInfo::scalar::<Self>("f32").with_capabilities(
            Capabilities::none()
                .with_default::<Self>()
                .with_total_order::<Self>(),
        )
    }
}

impl Describe for f64 {
    fn describe() -> TypeInfo {
        TypeInfo::scalar::<Self>("f64").with_capabilities(
            Capabilities::none()
                .with_default::<Self>()
                .with_total_order::<Self>(),
        )
    }
}

// ============================================================================
// OPTION
// ============================================================================

fn unwrap_option<T: Describe>(value: &dyn Any) -> Option<(&dyn Any, TypeInfo)> {
    value
        .downcast_ref::<Option<T>>()?
        .as_ref()
        .map(|inner| (inner as &dyn Any, T::describe()))
}

fn null_option<T: Any>() -> Box<dyn Any> {
    Box::new(None::<T>)
}

fn render_option<T: Describe>(value: &dyn Any) -> Option<String> {
    let (inner, info) = unwrap_option::<T>(value)?;
    info.render(inner)
}

fn option_elements<T: Describe>(
    value: &dyn Any,
) -> Option<Box<dyn Iterator<Item = &dyn Any> + '_>> {
    let inner = value.downcast_ref::<Option<T>>()?.as_ref()?;
    T::describe().elements(inner)
}

/// `Option<T>` is the nullable form of `T`: it keeps `T`'s shape, so
/// `Option<Vec<T>>` is enumerable with element type `T`.
impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeInfo {
        let inner = T::describe();
        let elements = inner.elements.map(|_| option_elements::<T> as ElementsFn);
        TypeInfo::opaque::<Self>(format!("Option<{}>", inner.name()), render_option::<T>)
            .with_nullable(Nullable::new(unwrap_option::<T>, null_option::<T>))
            .with_shape(inner.shape().clone(), elements)
    }
}

// ============================================================================
// ARRAYS AND SEQUENCES
// ============================================================================

fn render_items<'a, T: Describe>(items: impl Iterator<Item = &'a T>) -> String {
    let info = T::describe();
    let rendered: Vec<String> = items.map(|item| render_element(&info, item)).collect();
    format!("[{}]", rendered.join(", "))
}

fn array_elements<T: Any, const N: usize>(
    value: &dyn Any,
) -> Option<Box<dyn Iterator<Item = &dyn Any> + '_>> {
    let array = value.downcast_ref::<[T; N]>()?;
    Some(Box::new(array.iter().map(|item| item as &dyn Any)))
}

fn render_array<T: Describe, const N: usize>(value: &dyn Any) -> Option<String> {
    value
        .downcast_ref::<[T; N]>()
        .map(|array| render_items(array.iter()))
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeInfo {
        TypeInfo::enumerable::<Self>(
            format!("[{}; {N}]", T::describe().name()),
            Shape::Array {
                element: T::describe,
            },
            array_elements::<T, N>,
            render_array::<T, N>,
        )
        .with_capabilities(Capabilities::none().with_ordered_elements())
    }
}

fn boxed_slice_elements<T: Any>(
    value: &dyn Any,
) -> Option<Box<dyn Iterator<Item = &dyn Any> + '_>> {
    let slice = value.downcast_ref::<Box<[T]>>()?;
    Some(Box::new(slice.iter().map(|item| item as &dyn Any)))
}

fn render_boxed_slice<T: Describe>(value: &dyn Any) -> Option<String> {
    value
        .downcast_ref::<Box<[T]>>()
        .map(|slice| render_items(slice.iter()))
}

impl<T: Describe> Describe for Box<[T]> {
    fn describe() -> TypeInfo {
        TypeInfo::enumerable::<Self>(
            format!("Box<[{}]>", T::describe().name()),
            Shape::Array {
                element: T::describe,
            },
            boxed_slice_elements::<T>,
            render_boxed_slice::<T>,
        )
        .with_capabilities(
            Capabilities::none()
                .with_default::<Self>()
                .with_ordered_elements(),
        )
    }
}

fn vec_elements<T: Any>(value: &dyn Any) -> Option<Box<dyn Iterator<Item = &dyn Any> + '_>> {
    let vec = value.downcast_ref::<Vec<T>>()?;
    Some(Box::new(vec.iter().map(|item| item as &dyn Any)))
}

fn render_vec<T: Describe>(value: &dyn Any) -> Option<String> {
    value
        .downcast_ref::<Vec<T>>()
        .map(|vec| render_items(vec.iter()))
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeInfo {
        TypeInfo::enumerable::<Self>(
            format!("Vec<{}>", T::describe().name()),
            Shape::Sequence {
                element: T::describe,
            },
            vec_elements::<T>,
            render_vec::<T>,
        )
        .with_capabilities(
            Capabilities::none()
                .with_default::<Self>()
                .with_ordered_elements(),
        )
    }
}

// ============================================================================
// COLLECTIONS
// ============================================================================

macro_rules! describe_collection {
    ($($coll:ident => $equality:ident),+ $(,)?) => {$(
        impl<T: Describe> Describe for $coll<T> {
            fn describe() -> TypeInfo {
                fn elements<T: Any>(
                    value: &dyn Any,
                ) -> Option<Box<dyn Iterator<Item = &dyn Any> + '_>> {
                    let collection = value.downcast_ref::<$coll<T>>()?;
                    Some(Box::new(collection.iter().map(|item| item as &dyn Any)))
                }

                fn render<T: Describe>(value: &dyn Any) -> Option<String> {
                    value
                        .downcast_ref::<$coll<T>>()
                        .map(|collection| render_items(collection.iter()))
                }

                TypeInfo::enumerable::<Self>(
                    format!(concat!(stringify!($coll), "<{}>"), T::describe().name()),
                    Shape::Collection {
                        implements: smallvec![T::describe as fn() -> TypeInfo],
                    },
                    elements::<T>,
                    render::<T>,
                )
                .with_capabilities(Capabilities::none().$equality())
            }
        }
    )+};
}

// Hash sets and heaps iterate in an unspecified order.
describe_collection!(
    VecDeque => with_ordered_elements,
    LinkedList => with_ordered_elements,
    BTreeSet => with_ordered_elements,
    HashSet => with_unordered_elements,
    BinaryHeap => with_unordered_elements,
);
