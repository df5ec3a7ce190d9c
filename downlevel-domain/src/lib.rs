//! Built-in passes.
//!
//! This crate owns *what* gets checked and rewritten for an older target. It
//! does not decide *whether* a pass runs for a version pair, and does no I/O;
//! both belong to `downlevel-core`.

mod builtins;
pub mod checkers;
pub mod fixers;
mod registry;

pub use builtins::{BUILTIN_NAMES, is_builtin};
pub use registry::{
    ConfigError, builtin_checkers, builtin_fixers, select_checkers, select_fixers,
};
