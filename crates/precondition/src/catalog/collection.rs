//! Emptiness and membership checks on enumerables
//!
//! A null enumerable is neither empty nor non-empty: it fails both.

use crate::argument::Argument;
use crate::check::{Check, TypeCheck, ValueContext};
use crate::error::{GuardError, OperationError};
use crate::macros::catalog_check;
use crate::types::{Describe, element_type};

catalog_check! {
    /// Fails unless the value is a non-null enumerable with no elements.
    is_empty => "is not empty";
    requires(TypeCheck::enumerable());
    show(showing_value);
    rule(ctx) {
        Ok(ctx.ty.elements(ctx.value).is_some_and(|mut items| items.next().is_none()))
    }
}

catalog_check! {
    /// Fails unless the value is a non-null enumerable with at least one element.
    is_not_empty => "is null or empty";
    requires(TypeCheck::enumerable());
    rule(ctx) {
        Ok(ctx.ty.elements(ctx.value).is_some_and(|mut items| items.next().is_some()))
    }
}

fn holds<U: Describe>(ctx: &ValueContext<'_>, item: &U) -> Result<bool, OperationError> {
    let (Some(element), Some(items)) = (element_type(ctx.ty), ctx.ty.elements(ctx.value)) else {
        return Ok(false);
    };
    for candidate in items {
        if ctx.ops.are_equal(&element, candidate, item)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn membership<U: Describe>(name: &'static str, phrase: &'static str, item: U, wanted: bool) -> Check {
    let param = crate::types::render_element(&U::describe(), &item);
    Check::new(name, phrase, move |ctx: &ValueContext<'_>| {
        Ok(holds(ctx, &item)? == wanted)
    })
    .requiring(TypeCheck::element_exactly::<U>())
    .with_param("item", param)
}

/// Fails unless an element equals `item`.
#[must_use]
pub fn contains<U: Describe>(item: U) -> Check {
    membership("contains", "does not contain the item", item, true)
}

/// Fails if an element equals `item`.
#[must_use]
pub fn does_not_contain<U: Describe>(item: U) -> Check {
    membership("does_not_contain", "contains the item", item, false)
}

impl<T: Describe> Argument<T> {
    /// Fails unless an element equals `item`.
    pub fn contains<U: Describe>(self, item: U) -> Result<Self, GuardError> {
        self.check(contains(item))
    }

    /// Fails if an element equals `item`.
    pub fn does_not_contain<U: Describe>(self, item: U) -> Result<Self, GuardError> {
        self.check(does_not_contain(item))
    }
}
