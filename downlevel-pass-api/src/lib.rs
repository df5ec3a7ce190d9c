//! Contracts shared by every downlevel pass.
//!
//! Checkers read a module and report the first forbidden construct; fixers
//! consume a module and return its rewrite along with the effects (imports
//! and module-level declarations) the rewrite depends on. Most fixers are
//! written as a [`Transformer`] and only override the node kinds they touch.

pub mod error;
mod pass;
pub mod transform;

pub use downlevel_pass_catalog::{CheckerMeta, FixerMeta, PassKind};
pub use error::{CheckViolation, FixResult, FixerError};
pub use pass::{Checker, Fixer, PassMeta, all_passes, find_pass};
pub use transform::{
    Transformer, walk_arg, walk_arguments, walk_body, walk_class_def, walk_expr,
    walk_function_def, walk_module, walk_stmt,
};
