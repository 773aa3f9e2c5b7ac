//! The wrapped value callers chain checks on
//!
//! [`Argument`] owns the value under check. Every chaining method consumes
//! the argument and hands back a new one, so the per-chain state (pending
//! each-mode, pending because-override, validated) is threaded explicitly
//! from check to check and never shared between handles.
//!
//! # Examples
//!
//! ```rust,ignore
//! use precondition::requires;
//!
//! fn connect(host: Option<String>, ports: Vec<u16>) -> Result<(), precondition::GuardError> {
//!     let host = requires(host, "host").is_not_null()?.into_inner();
//!     let ports = requires(ports, "ports")
//!         .is_not_empty()?
//!         .each()
//!         .is_in_range(1_u16, 65535_u16)?
//!         .into_inner();
//!     // ...
//!     Ok(())
//! }
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::check::Check;
use crate::error::GuardError;
use crate::ops::Operations;
use crate::pipeline::{self, Mode, Subject};
use crate::types::{Describe, TypeInfo};

/// Per-chain state. Each-mode and because apply to the next check only.
#[derive(Debug, Clone, Default)]
struct ChainState {
    mode: Mode,
    because: Option<Cow<'static, str>>,
    validated: bool,
}

/// A value wrapped for precondition checks.
pub struct Argument<T: Describe> {
    value: T,
    name: Option<Cow<'static, str>>,
    ty: TypeInfo,
    state: ChainState,
}

/// Wraps `value` under the parameter name `name`.
pub fn requires<T: Describe>(value: T, name: impl Into<Cow<'static, str>>) -> Argument<T> {
    Argument::new(value, name)
}

impl<T: Describe> Argument<T> {
    /// Wraps `value` under the parameter name `name`.
    pub fn new(value: T, name: impl Into<Cow<'static, str>>) -> Self {
        Self::build(value, Some(name.into()))
    }

    /// Wraps `value` without a parameter name.
    pub fn unnamed(value: T) -> Self {
        Self::build(value, None)
    }

    fn build(value: T, name: Option<Cow<'static, str>>) -> Self {
        Self {
            value,
            name,
            ty: T::describe(),
            state: ChainState::default(),
        }
    }

    /// Applies the next check to every element instead of the whole value.
    pub fn each(mut self) -> Self {
        self.state.mode = Mode::Each;
        self
    }

    /// Replaces the failure message of the next check.
    pub fn because(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.state.because = Some(message.into());
        self
    }

    /// Runs `check` against the process-wide [`Operations`].
    pub fn check(self, check: Check) -> Result<Self, GuardError> {
        self.check_with(Operations::global(), check)
    }

    /// Runs `check` against `ops`.
    pub fn check_with(mut self, ops: &Operations, check: Check) -> Result<Self, GuardError> {
        let mode = std::mem::take(&mut self.state.mode);
        let because = self.state.because.take();

        let subject = Subject {
            value: &self.value,
            ty: &self.ty,
            name: self.name.as_deref(),
        };
        pipeline::run(subject, &check, mode, because.as_deref(), ops)?;

        self.state.validated = true;
        Ok(self)
    }

    /// The wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Unwraps the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// The parameter name, when given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The declared type.
    pub fn declared_type(&self) -> &TypeInfo {
        &self.ty
    }

    /// Returns true once a check has completed successfully.
    pub fn is_validated(&self) -> bool {
        self.state.validated
    }

    /// Returns true if the next check runs in each-mode.
    pub fn is_each(&self) -> bool {
        self.state.mode == Mode::Each
    }
}

impl<T: Describe> fmt::Debug for Argument<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argument")
            .field("name", &self.name)
            .field("type", &self.ty.name())
            .field("value", &self.ty.render(&self.value))
            .field("state", &self.state)
            .finish()
    }
}
