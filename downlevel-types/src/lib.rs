//! Shared types for the downlevel workspace.
//!
//! # Design constraints
//! - `Version` is the only currency for windows; compare versions, never strings.
//! - Effects are sets so that merging is idempotent.
//! - Config types deserialize from `downlevel.toml` as well as from JSON.

pub mod config;
pub mod effects;
pub mod version;
pub mod window;

pub use config::{BuildConfig, Selector};
pub use effects::{EffectSet, ImportDecl};
pub use version::{Version, VersionParseError};
pub use window::{ProhibitionWindow, VersionWindow};
