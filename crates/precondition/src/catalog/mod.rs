//! Named checks
//!
//! Every check here comes in two forms: a factory returning a
//! [`Check`](crate::check::Check) for use with
//! [`Argument::check`](crate::Argument::check) or the pipeline, and a
//! chaining method of the same name on [`Argument`](crate::Argument).
//!
//! | Check | Requires | Fails when |
//! |-------|----------|------------|
//! | `is_null` / `is_not_null` | nullable type | the value is not null / is null |
//! | `is_true` / `is_false` | `bool` | the flag has the other value |
//! | `is_equal_to` / `is_not_equal_to` | operand's type | natural equality says otherwise |
//! | `is_greater_than`, `is_greater_or_equal`, `is_less_than`, `is_less_or_equal` | operand's type | the ordering says otherwise |
//! | `is_in_range` / `is_not_in_range` | operand's type | outside / inside `[minimum, maximum]` |
//! | `is_default` / `is_not_default` | none | the value is not / is its type's default |
//! | `is_empty` / `is_not_empty` | enumerable | the value has elements / has none or is null |
//! | `contains` / `does_not_contain` | enumerable of the operand's type | no element / some element equals the item |
//! | `satisfies` | the predicate's type | the predicate returns false |
//!
//! All of them work in each-mode, where the requirement applies to the
//! element type.

pub mod boolean;
pub mod collection;
pub mod comparison;
pub mod custom;
pub mod default;
pub mod null;

pub use boolean::{is_false, is_true};
pub use collection::{contains, does_not_contain, is_empty, is_not_empty};
pub use comparison::{
    is_equal_to, is_greater_or_equal, is_greater_than, is_in_range, is_less_or_equal,
    is_less_than, is_not_equal_to, is_not_in_range,
};
pub use custom::satisfies;
pub use default::{is_default, is_not_default};
pub use null::{is_not_null, is_null};
