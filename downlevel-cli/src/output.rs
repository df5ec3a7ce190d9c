//! Output forms of `downlevel transpile`.

use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use downlevel_core::pipeline::RenderedModule;
use downlevel_tree::Module;
use downlevel_types::EffectSet;
use serde::Serialize;

/// Where a rendered module's source is written with `--in-place`, and the
/// path its diff is labelled with.
pub fn source_path(tree_path: &Utf8Path) -> Utf8PathBuf {
    tree_path.with_extension("py")
}

/// Unified diff of every module whose output differs from its original
/// source. A module without an original diffs against the empty file.
pub fn render_diff<'a, I>(modules: I) -> String
where
    I: IntoIterator<Item = (&'a Utf8Path, &'a RenderedModule)>,
{
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for (path, rendered) in modules {
        let old = rendered.original.as_deref().unwrap_or("");
        if old == rendered.source {
            continue;
        }

        out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
        let patch = diffy::create_patch(old, &rendered.source);
        out.push_str(&formatter.fmt_patch(&patch).to_string());
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

/// JSON record for `--emit json`.
#[derive(Debug, Serialize)]
pub struct EmittedModule<'a> {
    pub name: &'a str,
    pub path: &'a Utf8Path,
    pub checkers_run: &'a [&'static str],
    pub fixers_run: &'a [&'static str],
    pub effects: &'a EffectSet,
    pub source: &'a str,
    pub tree: &'a Module,
}

impl<'a> EmittedModule<'a> {
    pub fn new(path: &'a Utf8Path, rendered: &'a RenderedModule) -> Self {
        Self {
            name: &rendered.name,
            path,
            checkers_run: &rendered.outcome.checkers_run,
            fixers_run: &rendered.outcome.fixers_run,
            effects: &rendered.outcome.effects,
            source: &rendered.source,
            tree: &rendered.outcome.module,
        }
    }
}
