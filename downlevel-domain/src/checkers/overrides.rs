//! Names that fixer output refers to must keep their standard meaning.

use super::{AliasBinding, bound_name};
use crate::builtins::is_builtin;
use downlevel_pass_api::{CheckViolation, Checker};
use downlevel_pass_catalog::{CheckerMeta, NO_OVERRIDDEN_BUILTINS, NO_OVERRIDDEN_STDLIB_IMPORTS};
use downlevel_tree::{Module, walk};
use downlevel_types::BuildConfig;

/// Modules referenced by fixer declarations.
const RESERVED_MODULE_NAMES: &[&str] = &["itertools", "six", "builtins"];

#[derive(Debug, Default)]
pub struct NoOverriddenStdlibImportsChecker;

impl Checker for NoOverriddenStdlibImportsChecker {
    fn meta(&self) -> &'static CheckerMeta {
        &NO_OVERRIDDEN_STDLIB_IMPORTS
    }

    fn check(&self, _config: &BuildConfig, module: &Module) -> Result<(), CheckViolation> {
        for node in walk(module) {
            if let Some(name) = bound_name(node, AliasBinding::AsNameOnly)
                && RESERVED_MODULE_NAMES.contains(&name)
            {
                return Err(CheckViolation::new(
                    self.meta().key,
                    format!("prohibited override of import '{name}'"),
                )
                .at_ref(node));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NoOverriddenBuiltinsChecker;

impl Checker for NoOverriddenBuiltinsChecker {
    fn meta(&self) -> &'static CheckerMeta {
        &NO_OVERRIDDEN_BUILTINS
    }

    fn check(&self, _config: &BuildConfig, module: &Module) -> Result<(), CheckViolation> {
        for node in walk(module) {
            if let Some(name) = bound_name(node, AliasBinding::Effective)
                && is_builtin(name)
            {
                return Err(CheckViolation::new(
                    self.meta().key,
                    format!("prohibited override of builtin '{name}'"),
                )
                .at_ref(node));
            }
        }
        Ok(())
    }
}
