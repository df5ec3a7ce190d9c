//! Rebinding Python 3 builtin names to their lazy or unicode Python 2
//! counterparts.
//!
//! Both fixers only add module-level declarations; the tree is unchanged.
//! The declarations fall back to the current builtin, so the output still
//! runs on the newer dialect.

use downlevel_pass_api::{FixResult, Fixer};
use downlevel_pass_catalog::{self as catalog, FixerMeta};
use downlevel_tree::{Module, NodeRef, walk};
use downlevel_types::{BuildConfig, EffectSet, ImportDecl};
use std::collections::BTreeSet;

/// Which of `wanted` the module reads as bare names.
fn loaded_names(module: &Module, wanted: &[&'static str]) -> BTreeSet<&'static str> {
    walk(module)
        .filter_map(|node| match node {
            NodeRef::Expr(e) => wanted.iter().copied().find(|w| e.is_load_of(w)),
            _ => None,
        })
        .collect()
}

/// `range = getattr(__builtins__, 'xrange', range)` and friends.
#[derive(Debug)]
pub struct BuiltinRenameFixer {
    meta: &'static FixerMeta,
    old_name: &'static str,
    new_name: &'static str,
    effects: EffectSet,
}

impl BuiltinRenameFixer {
    fn new(meta: &'static FixerMeta, old_name: &'static str, new_name: &'static str) -> Self {
        Self {
            meta,
            old_name,
            new_name,
            effects: EffectSet::new(),
        }
    }

    pub fn xrange_to_range() -> Self {
        Self::new(&catalog::XRANGE_TO_RANGE, "xrange", "range")
    }

    pub fn unicode_to_str() -> Self {
        Self::new(&catalog::UNICODE_TO_STR, "unicode", "str")
    }

    pub fn unichr_to_chr() -> Self {
        Self::new(&catalog::UNICHR_TO_CHR, "unichr", "chr")
    }

    pub fn raw_input_to_input() -> Self {
        Self::new(&catalog::RAW_INPUT_TO_INPUT, "raw_input", "input")
    }
}

impl Fixer for BuiltinRenameFixer {
    fn meta(&self) -> &'static FixerMeta {
        self.meta
    }

    fn fix(&mut self, _config: &BuildConfig, module: Module) -> FixResult<Module> {
        if !loaded_names(&module, &[self.new_name]).is_empty() {
            let (old, new) = (self.old_name, self.new_name);
            self.effects
                .declare(format!("{new} = getattr(__builtins__, '{old}', {new})"));
        }
        Ok(module)
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }
}

const LAZY_BUILTINS: &[&str] = &["map", "zip", "filter"];

/// Rebinds `map`, `zip` and `filter` to `itertools.imap` and friends.
#[derive(Debug, Default)]
pub struct ItertoolsBuiltinsFixer {
    effects: EffectSet,
}

impl Fixer for ItertoolsBuiltinsFixer {
    fn meta(&self) -> &'static FixerMeta {
        &catalog::ITERTOOLS_BUILTINS
    }

    fn fix(&mut self, _config: &BuildConfig, module: Module) -> FixResult<Module> {
        for name in loaded_names(&module, LAZY_BUILTINS) {
            self.effects.require_import(ImportDecl::module("itertools"));
            self.effects
                .declare(format!("{name} = getattr(itertools, 'i{name}', {name})"));
        }
        Ok(module)
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }
}
