//! Running one check against one wrapped value
//!
//! ```text
//! NotStarted ──type-checks──▶ TypeChecked ──value-check(s)──▶ ValueChecked ──▶ Completed
//!      └───────────────────────────┴──────────────────────────────┴──────▶ Failed
//! ```
//!
//! In [`Mode::Single`] the type-checks run against the declared type and the
//! value-check runs once. In [`Mode::Each`] the value must be a non-null
//! enumerable (anything else is a [`GuardError::FrameworkMisuse`]); the
//! type-checks run against the *element* type and the value-check runs once
//! per element, in iteration order, stopping at the first failing element.
//!
//! Before either mode, the check's own operands are validated (e.g. a range
//! whose minimum exceeds its maximum); a rejection is a framework misuse.
//! A because-override replaces the message of every failure kind.

use std::any::Any;

use crate::check::{Check, ValueContext};
use crate::error::{ErrorKind, GuardError, OperationError};
use crate::message::MessageBuilder;
use crate::ops::Operations;
use crate::types::{TypeInfo, element_type, is_enumerable};

/// Whether a check applies to the value or to each of its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Check the value as a whole.
    #[default]
    Single,
    /// Check every element of an enumerable.
    Each,
}

/// Pipeline state for one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing ran yet.
    NotStarted,
    /// All type-checks passed.
    TypeChecked,
    /// The value-check passed for the value or for every element.
    ValueChecked,
    /// The check succeeded.
    Completed,
    /// A check failed; terminal.
    Failed,
}

/// The value a check runs against.
#[derive(Clone, Copy)]
pub struct Subject<'a> {
    /// The wrapped value.
    pub value: &'a dyn Any,
    /// Its declared type.
    pub ty: &'a TypeInfo,
    /// Parameter name, when known.
    pub name: Option<&'a str>,
}

/// Per-invocation context handed to the message builder.
///
/// Rebuilt for every scalar value and every element.
struct ValidationRequest<'a> {
    check: &'a Check,
    because: Option<&'a str>,
    value: &'a dyn Any,
    ty: &'a TypeInfo,
    name: Option<&'a str>,
    is_element: bool,
}

impl ValidationRequest<'_> {
    fn message(&self, phrase: &str, with_value: bool) -> String {
        let mut builder = MessageBuilder::new(phrase)
            .because(self.because)
            .parameter(self.name)
            .element(self.is_element);
        if self.check.shows_type() {
            builder = builder.type_name(self.ty.name());
        }
        if with_value {
            builder = builder.value(self.ty.render(self.value));
        }
        for (name, value) in self.check.params() {
            builder = builder.param(name, value);
        }
        builder.build()
    }

    fn violation(&self) -> GuardError {
        let message = self.message(self.check.phrase(), self.check.shows_value());
        GuardError::new(ErrorKind::ValueViolation, message)
    }

    fn operation_failure(&self, error: &OperationError) -> GuardError {
        let (kind, phrase) = match error {
            OperationError::NotComparable { type_name } => (
                ErrorKind::NotComparable,
                format!(
                    "cannot be checked with '{}' because type '{type_name}' does not define an ordering",
                    self.check.name()
                ),
            ),
            OperationError::MissingCapability {
                type_name,
                capability,
            } => (
                ErrorKind::TypeConstraintViolation,
                format!(
                    "cannot be checked with '{}' because type '{type_name}' does not provide {capability}",
                    self.check.name()
                ),
            ),
            OperationError::TypeMismatch { expected, actual } => (
                ErrorKind::TypeMismatch,
                format!(
                    "cannot be checked with '{}' because a value of type '{expected}' was compared with '{actual}'",
                    self.check.name()
                ),
            ),
        };
        GuardError::new(kind, self.message(&phrase, false))
    }

    fn run(&self, ops: &Operations) -> Result<(), GuardError> {
        let ctx = ValueContext {
            value: self.value,
            ty: self.ty,
            ops,
        };
        match self.check.evaluate(&ctx) {
            Ok(true) => Ok(()),
            Ok(false) => Err(self.violation()),
            Err(error) => Err(self.operation_failure(&error)),
        }
    }
}

/// Drives one check through its stages.
struct Run<'a> {
    check: &'a Check,
    subject: Subject<'a>,
    because: Option<&'a str>,
    stage: Stage,
}

impl<'a> Run<'a> {
    fn advance(&mut self, next: Stage) {
        tracing::trace!(check = %self.check.name(), from = ?self.stage, to = ?next, "stage transition");
        self.stage = next;
    }

    fn fail(&mut self, error: GuardError) -> GuardError {
        self.advance(Stage::Failed);
        tracing::debug!(
            check = %self.check.name(),
            parameter = self.subject.name.unwrap_or_default(),
            kind = %error.kind(),
            "precondition failed"
        );
        error
    }

    fn operands(&mut self, ops: &Operations) -> Result<(), GuardError> {
        let Err(reason) = self.check.check_operands(ops) else {
            return Ok(());
        };
        let phrase = format!(
            "cannot be checked with '{}' because {reason}",
            self.check.name()
        );
        let message = MessageBuilder::new(&phrase)
            .because(self.because)
            .parameter(self.subject.name)
            .build();
        Err(self.fail(GuardError::new(ErrorKind::FrameworkMisuse, message)))
    }

    fn type_checks(&mut self, ty: &TypeInfo, is_element: bool) -> Result<(), GuardError> {
        if let Some(rejected) = self.check.type_checks().iter().find(|tc| !tc.accepts(ty)) {
            let phrase = format!(
                "cannot be checked with '{}' because it requires {}",
                self.check.name(),
                rejected.requirement()
            );
            let message = MessageBuilder::new(&phrase)
                .because(self.because)
                .parameter(self.subject.name)
                .element(is_element)
                .type_name(ty.name())
                .build();
            return Err(self.fail(GuardError::new(ErrorKind::TypeMismatch, message)));
        }
        self.advance(Stage::TypeChecked);
        Ok(())
    }

    fn request<'r>(
        &self,
        value: &'r dyn Any,
        ty: &'r TypeInfo,
        is_element: bool,
    ) -> ValidationRequest<'r>
    where
        'a: 'r,
    {
        ValidationRequest {
            check: self.check,
            because: self.because,
            value,
            ty,
            name: self.subject.name,
            is_element,
        }
    }

    fn single(&mut self, ops: &Operations) -> Result<(), GuardError> {
        self.type_checks(self.subject.ty, false)?;
        let request = self.request(self.subject.value, self.subject.ty, false);
        if let Err(error) = request.run(ops) {
            return Err(self.fail(error));
        }
        self.advance(Stage::ValueChecked);
        Ok(())
    }

    fn each(&mut self, ops: &Operations) -> Result<(), GuardError> {
        let Subject { value, ty, .. } = self.subject;

        if ty.is_null(value) || !is_enumerable(ty) {
            let phrase = format!(
                "cannot be checked element-wise with '{}' because it is {}",
                self.check.name(),
                if ty.is_null(value) { "null" } else { "not enumerable" }
            );
            let message = MessageBuilder::new(&phrase)
                .because(self.because)
                .parameter(self.subject.name)
                .type_name(ty.name())
                .build();
            return Err(self.fail(GuardError::new(ErrorKind::FrameworkMisuse, message)));
        }

        let (Some(element_ty), Some(elements)) = (element_type(ty), ty.elements(value)) else {
            let message = MessageBuilder::new("cannot be enumerated")
                .because(self.because)
                .parameter(self.subject.name)
                .type_name(ty.name())
                .build();
            return Err(self.fail(GuardError::new(ErrorKind::FrameworkMisuse, message)));
        };

        self.type_checks(&element_ty, true)?;
        for (index, element) in elements.enumerate() {
            let request = self.request(element, &element_ty, true);
            if let Err(error) = request.run(ops) {
                tracing::trace!(check = %self.check.name(), index, "element failed");
                return Err(self.fail(error));
            }
        }
        self.advance(Stage::ValueChecked);
        Ok(())
    }
}

/// Runs `check` against `subject`.
///
/// Returns the final stage, which is always [`Stage::Completed`] on success.
pub fn run(
    subject: Subject<'_>,
    check: &Check,
    mode: Mode,
    because: Option<&str>,
    ops: &Operations,
) -> Result<Stage, GuardError> {
    let mut run = Run {
        check,
        subject,
        because,
        stage: Stage::NotStarted,
    };
    run.operands(ops)?;
    match mode {
        Mode::Single => run.single(ops)?,
        Mode::Each => run.each(ops)?,
    }
    run.advance(Stage::Completed);
    Ok(run.stage)
}
