//! Library half of the `downlevel` binary: configuration file handling,
//! pass explanations and output rendering.

pub mod config;
pub mod explain;
pub mod output;
