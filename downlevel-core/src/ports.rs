//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use downlevel_tree::Module;

/// A module tree together with what is known about its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModule {
    /// Dotted or file-stem name used in error context.
    pub name: String,
    pub tree: Module,
    /// Original Python source, when available. Supplies the header and the
    /// diff base.
    pub original: Option<String>,
}

/// Source of module trees.
pub trait ModuleSource {
    fn load_module(&self, path: &Utf8Path) -> anyhow::Result<LoadedModule>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
}
