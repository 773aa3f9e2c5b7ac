//! Caller-supplied predicates

use std::borrow::Cow;

use crate::argument::Argument;
use crate::check::{Check, TypeCheck, ValueContext};
use crate::error::GuardError;
use crate::types::Describe;

/// Fails unless `predicate` holds for the value.
///
/// `phrase` completes the sentence "Parameter 'x' ...", e.g. `"is not even"`.
pub fn satisfies<U, F>(phrase: impl Into<Cow<'static, str>>, predicate: F) -> Check
where
    U: Describe,
    F: Fn(&U) -> bool + 'static,
{
    Check::new("satisfies", phrase, move |ctx: &ValueContext<'_>| {
        Ok(predicate(ctx.downcast::<U>()?))
    })
    .requiring(TypeCheck::exactly::<U>())
    .showing_value()
}

impl<T: Describe> Argument<T> {
    /// Fails unless `predicate` holds for the value (or each element).
    pub fn satisfies<U, F>(
        self,
        phrase: impl Into<Cow<'static, str>>,
        predicate: F,
    ) -> Result<Self, GuardError>
    where
        U: Describe,
        F: Fn(&U) -> bool + 'static,
    {
        self.check(satisfies(phrase, predicate))
    }
}
