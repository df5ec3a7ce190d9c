use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An import the rewritten module must carry.
///
/// `member = None` renders as `import module`, otherwise as
/// `from module import member`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImportDecl {
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
}

impl ImportDecl {
    pub fn module(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            member: None,
        }
    }

    pub fn member(module: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            member: Some(member.into()),
        }
    }

    pub fn is_future(&self) -> bool {
        self.module == "__future__"
    }
}

impl fmt::Display for ImportDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "from {} import {}", self.module, member),
            None => write!(f, "import {}", self.module),
        }
    }
}

/// Side effects a fixer requires of the final output.
///
/// Both collections are sets: registering the same import or declaration twice,
/// from one fixer or from several, keeps a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSet {
    #[serde(default)]
    pub required_imports: BTreeSet<ImportDecl>,
    #[serde(default)]
    pub module_declarations: BTreeSet<String>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_import(&mut self, decl: ImportDecl) {
        self.required_imports.insert(decl);
    }

    pub fn declare(&mut self, declaration: impl Into<String>) {
        self.module_declarations.insert(declaration.into());
    }

    /// Set union with `other`.
    pub fn merge(&mut self, other: &EffectSet) {
        self.required_imports
            .extend(other.required_imports.iter().cloned());
        self.module_declarations
            .extend(other.module_declarations.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.required_imports.is_empty() && self.module_declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.required_imports.len() + self.module_declarations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_decl_display() {
        assert_eq!(ImportDecl::module("itertools").to_string(), "import itertools");
        assert_eq!(
            ImportDecl::member("__future__", "division").to_string(),
            "from __future__ import division"
        );
    }

    #[test]
    fn duplicate_effects_collapse() {
        let mut effects = EffectSet::new();
        effects.require_import(ImportDecl::module("itertools"));
        effects.require_import(ImportDecl::module("itertools"));
        effects.declare("map = getattr(itertools, 'imap', map)");
        effects.declare("map = getattr(itertools, 'imap', map)");
        assert_eq!(effects.required_imports.len(), 1);
        assert_eq!(effects.module_declarations.len(), 1);
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn merge_is_set_union() {
        let mut a = EffectSet::new();
        a.require_import(ImportDecl::module("itertools"));
        let mut b = EffectSet::new();
        b.require_import(ImportDecl::module("itertools"));
        b.require_import(ImportDecl::member("__future__", "print_function"));

        a.merge(&b);
        assert_eq!(a.required_imports.len(), 2);
        assert!(!a.is_empty());
    }
}
