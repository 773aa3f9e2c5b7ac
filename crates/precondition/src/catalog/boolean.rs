//! Boolean checks

use crate::check::TypeCheck;
use crate::macros::catalog_check;

catalog_check! {
    /// Fails unless the value is `true`.
    is_true => "is not true";
    requires(TypeCheck::exactly::<bool>());
    rule(ctx) { Ok(*ctx.downcast::<bool>()?) }
}

catalog_check! {
    /// Fails unless the value is `false`.
    is_false => "is not false";
    requires(TypeCheck::exactly::<bool>());
    rule(ctx) { Ok(!*ctx.downcast::<bool>()?) }
}
