//! # precondition
//!
//! Runtime precondition checks over type-erased values, with memoized
//! generic operations and uniform failure messages.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use precondition::requires;
//!
//! fn open(path: Option<String>, retries: u32, ports: Vec<u16>) -> Result<(), precondition::GuardError> {
//!     requires(path, "path").is_not_null()?;
//!     requires(retries, "retries").is_in_range(1_u32, 10_u32)?;
//!     requires(ports, "ports").is_not_empty()?.each().is_greater_than(0_u16)?;
//!     Ok(())
//! }
//! ```
//!
//! A failing check returns a [`GuardError`] whose message reads e.g.
//! `Parameter 'ports' contains an element that is not greater than the bound.
//! The actual value is '0'. Specified 'bound' is '0'.`
//!
//! ## Pieces
//!
//! - [`types`]: runtime type descriptors ([`TypeInfo`], [`Describe`]) and the
//!   enumerable element-type resolver
//! - [`ops`]: the memoized generic operation invoker (default value,
//!   equality, three-way compare)
//! - [`message`]: failure message assembly
//! - [`check`] and [`pipeline`]: the check contract and the validation
//!   pipeline (single mode and each-mode)
//! - [`catalog`]: the named checks
//! - [`argument`]: the chaining front end
//!
//! ## Describing your own types
//!
//! Implement [`Describe`] by hand, or use [`describe_scalar!`] for `Display`
//! types. Capabilities can also be attached after the fact with
//! [`Operations::register`].

// Type-erased operation signatures over `dyn Any` spell out their lifetimes.
#![allow(clippy::type_complexity)]

pub mod argument;
pub mod catalog;
pub mod check;
pub mod error;
mod macros;
pub mod message;
pub mod ops;
pub mod pipeline;
pub mod prelude;
pub mod types;

pub use argument::{Argument, requires};
pub use check::{Check, TypeCheck};
pub use error::{ErrorKind, GuardError, OperationError};
pub use ops::{CompareOutcome, Operations};
pub use types::{Describe, Object, ObjectList, TypeInfo};
