//! The contract between named checks and the pipeline
//!
//! A [`Check`] is everything the pipeline needs to run one named check:
//!
//! - zero or more [`TypeCheck`]s, structural predicates evaluated once against
//!   the declared type (or the element type in each-mode) before any value is
//!   looked at
//! - exactly one value-check, a predicate over a concrete value
//! - the violation phrase and the auxiliary parameters shown on failure
//!
//! The [`catalog`](crate::catalog) builds its named checks from these pieces;
//! callers can build their own the same way.
//!
//! # Examples
//!
//! ```rust,ignore
//! use precondition::check::{Check, TypeCheck};
//!
//! let even = Check::new("is_even", "is not even", |ctx| {
//!     Ok(ctx.value.downcast_ref::<u32>().is_some_and(|n| n % 2 == 0))
//! })
//! .requiring(TypeCheck::exactly::<u32>())
//! .showing_value();
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

use crate::error::OperationError;
use crate::ops::Operations;
use crate::types::{Describe, TypeInfo, element_type, is_enumerable};

/// Predicate over a runtime type.
pub type TypePredicate = Box<dyn Fn(&TypeInfo) -> bool>;

/// Predicate over a concrete value.
pub type ValuePredicate = Box<dyn Fn(&ValueContext<'_>) -> Result<bool, OperationError>>;

/// Validation of a check's own operands; `Err` holds the reason.
pub type OperandPredicate = Box<dyn Fn(&Operations) -> Result<(), String>>;

// ============================================================================
// TYPE CHECK
// ============================================================================

/// A structural requirement on the checked type.
pub struct TypeCheck {
    requirement: Cow<'static, str>,
    predicate: TypePredicate,
}

impl TypeCheck {
    /// Creates a type-check. `requirement` completes the sentence
    /// "it requires ...", e.g. `"a nullable type"`.
    pub fn new<F>(requirement: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&TypeInfo) -> bool + 'static,
    {
        Self {
            requirement: requirement.into(),
            predicate: Box::new(predicate),
        }
    }

    /// The type can hold null.
    pub fn nullable() -> Self {
        Self::new("a nullable type", TypeInfo::is_nullable)
    }

    /// The type is enumerable.
    pub fn enumerable() -> Self {
        Self::new("an enumerable type", is_enumerable)
    }

    /// The type is exactly `U`.
    pub fn exactly<U: Describe>() -> Self {
        let expected = U::describe();
        Self::new(
            format!("a value of type '{}'", expected.name()),
            move |info| info.id() == expected.id(),
        )
    }

    /// The type is enumerable with element type exactly `U`.
    pub fn element_exactly<U: Describe>() -> Self {
        let expected = U::describe();
        Self::new(
            format!("an enumerable of '{}'", expected.name()),
            move |info| {
                is_enumerable(info)
                    && element_type(info).is_some_and(|element| element.id() == expected.id())
            },
        )
    }

    /// What the check requires, as a noun phrase.
    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    /// Evaluates the predicate.
    pub fn accepts(&self, info: &TypeInfo) -> bool {
        (self.predicate)(info)
    }
}

impl fmt::Debug for TypeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCheck")
            .field("requirement", &self.requirement)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// VALUE CONTEXT
// ============================================================================

/// What a value-check sees: the value, its current type and the invoker.
///
/// In each-mode `value` is one element and `ty` the element type.
#[derive(Clone, Copy)]
pub struct ValueContext<'a> {
    /// The value under check.
    pub value: &'a dyn Any,
    /// Its type.
    pub ty: &'a TypeInfo,
    /// Generic operations.
    pub ops: &'a Operations,
}

impl ValueContext<'_> {
    /// Returns true if the value is null.
    pub fn is_null(&self) -> bool {
        self.ty.is_null(self.value)
    }

    /// Downcasts the value, failing with a type mismatch.
    pub fn downcast<T: Describe>(&self) -> Result<&T, OperationError> {
        self.value
            .downcast_ref::<T>()
            .ok_or_else(|| OperationError::TypeMismatch {
                expected: T::describe().name().to_owned(),
                actual: self.ty.name().to_owned(),
            })
    }
}

// ============================================================================
// CHECK
// ============================================================================

/// One named check, ready to hand to the pipeline.
pub struct Check {
    name: Cow<'static, str>,
    phrase: Cow<'static, str>,
    type_checks: SmallVec<[TypeCheck; 2]>,
    value_check: ValuePredicate,
    operands: Option<OperandPredicate>,
    params: SmallVec<[(Cow<'static, str>, String); 2]>,
    show_type: bool,
    show_value: bool,
}

impl Check {
    /// Creates a check from its name, its violation phrase (e.g. `"is null"`)
    /// and its value-check.
    pub fn new<F>(
        name: impl Into<Cow<'static, str>>,
        phrase: impl Into<Cow<'static, str>>,
        value_check: F,
    ) -> Self
    where
        F: Fn(&ValueContext<'_>) -> Result<bool, OperationError> + 'static,
    {
        Self {
            name: name.into(),
            phrase: phrase.into(),
            type_checks: SmallVec::new(),
            value_check: Box::new(value_check),
            operands: None,
            params: SmallVec::new(),
            show_type: false,
            show_value: false,
        }
    }

    /// Adds a type-check.
    #[must_use = "builder methods must be chained or built"]
    pub fn requiring(mut self, type_check: TypeCheck) -> Self {
        self.type_checks.push(type_check);
        self
    }

    /// Validates the check's operands before anything else runs.
    ///
    /// `Err(reason)` completes the sentence "cannot be checked with 'name'
    /// because ..." and fails as [`FrameworkMisuse`](crate::GuardError::FrameworkMisuse).
    #[must_use = "builder methods must be chained or built"]
    pub fn validating_operands<F>(mut self, validate: F) -> Self
    where
        F: Fn(&Operations) -> Result<(), String> + 'static,
    {
        self.operands = Some(Box::new(validate));
        self
    }

    /// Adds an auxiliary parameter shown on failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Adds an auxiliary parameter rendered through its [`Describe`] impl.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_described_param<U: Describe>(
        self,
        name: impl Into<Cow<'static, str>>,
        value: &U,
    ) -> Self {
        let rendered = crate::types::render_element(&U::describe(), value);
        self.with_param(name, rendered)
    }

    /// Shows the declared type on failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn showing_type(mut self) -> Self {
        self.show_type = true;
        self
    }

    /// Shows the failing value on failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn showing_value(mut self) -> Self {
        self.show_value = true;
        self
    }

    /// The check's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The violation phrase.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// The type-checks, in order.
    pub fn type_checks(&self) -> &[TypeCheck] {
        &self.type_checks
    }

    /// Auxiliary parameters, in order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_ref(), value.as_str()))
    }

    pub(crate) fn shows_type(&self) -> bool {
        self.show_type
    }

    pub(crate) fn shows_value(&self) -> bool {
        self.show_value
    }

    /// Runs the operand validation, if any.
    pub fn check_operands(&self, ops: &Operations) -> Result<(), String> {
        self.operands.as_ref().map_or(Ok(()), |validate| validate(ops))
    }

    /// Runs the value-check.
    pub fn evaluate(&self, ctx: &ValueContext<'_>) -> Result<bool, OperationError> {
        (self.value_check)(ctx)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("phrase", &self.phrase)
            .field("type_checks", &self.type_checks)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_checks() {
        assert!(TypeCheck::nullable().accepts(&Option::<i32>::describe()));
        assert!(!TypeCheck::nullable().accepts(&i32::describe()));
        assert!(TypeCheck::enumerable().accepts(&Vec::<i32>::describe()));
        assert!(!TypeCheck::enumerable().accepts(&String::describe()));
        assert!(TypeCheck::exactly::<u8>().accepts(&u8::describe()));
        assert!(!TypeCheck::exactly::<u8>().accepts(&u16::describe()));
        assert!(TypeCheck::element_exactly::<u8>().accepts(&Vec::<u8>::describe()));
        assert!(!TypeCheck::element_exactly::<u8>().accepts(&u8::describe()));
    }

    #[test]
    fn test_requirement_text() {
        assert_eq!(
            TypeCheck::exactly::<i64>().requirement(),
            "a value of type 'i64'"
        );
    }

    #[test]
    fn test_check_builder() {
        let check = Check::new("is_positive", "is not positive", |ctx| {
            Ok(*ctx.downcast::<i32>()? > 0)
        })
        .requiring(TypeCheck::exactly::<i32>())
        .with_param("minimum", "1")
        .showing_value();

        assert_eq!(check.name(), "is_positive");
        assert_eq!(check.type_checks().len(), 1);
        assert_eq!(check.params().collect::<Vec<_>>(), vec![("minimum", "1")]);
        assert!(check.shows_value());
        assert!(!check.shows_type());

        let ops = Operations::new();
        let info = i32::describe();
        let ctx = ValueContext {
            value: &5_i32,
            ty: &info,
            ops: &ops,
        };
        assert!(check.evaluate(&ctx).unwrap());
    }
}
