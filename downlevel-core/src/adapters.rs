//! Default filesystem-backed port implementations.

use crate::ports::{LoadedModule, ModuleSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use downlevel_tree::Module;
use fs_err as fs;
use std::collections::BTreeMap;
use tracing::debug;

/// Loads `*.json` trees from disk.
///
/// A sibling file with the `.py` extension, when present, is read as the
/// original source.
#[derive(Debug, Clone, Default)]
pub struct FsModuleSource;

/// Name used for error context: the file stem.
fn module_name(path: &Utf8Path) -> String {
    path.file_stem().unwrap_or(path.as_str()).to_string()
}

impl ModuleSource for FsModuleSource {
    fn load_module(&self, path: &Utf8Path) -> anyhow::Result<LoadedModule> {
        let json = fs::read_to_string(path).with_context(|| format!("read tree {path}"))?;
        let tree: Module =
            serde_json::from_str(&json).with_context(|| format!("parse tree {path}"))?;

        let sibling = path.with_extension("py");
        let original = if sibling.as_path() != path && sibling.is_file() {
            debug!(path = sibling.as_str(), "reading original source");
            Some(
                fs::read_to_string(&sibling)
                    .with_context(|| format!("read original source {sibling}"))?,
            )
        } else {
            None
        };

        Ok(LoadedModule {
            name: module_name(path),
            tree,
            original,
        })
    }
}

/// In-memory module source for embedding and testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModuleSource {
    modules: BTreeMap<Utf8PathBuf, LoadedModule>,
}

impl InMemoryModuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, module: LoadedModule) {
        self.modules.insert(path.into(), module);
    }
}

impl ModuleSource for InMemoryModuleSource {
    fn load_module(&self, path: &Utf8Path) -> anyhow::Result<LoadedModule> {
        self.modules
            .get(path)
            .cloned()
            .with_context(|| format!("no module registered at {path}"))
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {path}"))?;
        }
        fs::write(path, contents).with_context(|| format!("write {path}"))
    }
}
