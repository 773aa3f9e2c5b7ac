//! Prelude module for convenient imports.
//!
//! Provides a single `use precondition::prelude::*;` import that brings in the
//! front end, the check contract and the type model. The named checks stay
//! under [`catalog`](crate::catalog) since they double as `Argument` methods.
//!
//! # Examples
//!
//! ```rust,ignore
//! use precondition::prelude::*;
//!
//! let ids = requires(vec![3_u64, 5, 8], "ids").each().is_greater_than(0_u64)?;
//! ```

// ============================================================================
// FRONT END
// ============================================================================

pub use crate::argument::{Argument, requires};
pub use crate::error::{ErrorKind, GuardError, OperationError};

// ============================================================================
// CHECKS AND PIPELINE
// ============================================================================

pub use crate::check::{Check, TypeCheck, ValueContext};
pub use crate::pipeline::{Mode, Stage, Subject};

// ============================================================================
// TYPES AND OPERATIONS
// ============================================================================

pub use crate::ops::{Capabilities, CompareOutcome, OperationKind, Operations};
pub use crate::types::{Describe, Object, ObjectList, Shape, TypeInfo, element_type, is_enumerable};

pub use crate::describe_scalar;
