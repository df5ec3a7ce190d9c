//! Embeddable core library for downlevel.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into build tooling or other host processes.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`ModuleSource`](ports::ModuleSource): load a JSON tree and its original source
//! - [`WritePort`](ports::WritePort): write rewritten files
//!
//! The [`adapters`] module provides default filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`transpile_module`](pipeline::transpile_module): run checkers and fixers on one tree
//! - [`transpile_loaded`](pipeline::transpile_loaded): the same, rendered to Python source

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export so embedders don't need downlevel-domain directly.
pub use downlevel_domain::ConfigError;
