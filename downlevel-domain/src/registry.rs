//! Built-in pass instances and name-based selection.
//!
//! Instances come out in registry order, the order of the catalog tables.
//! Every call builds fresh instances: a fixer carries the effects of one run.

use crate::checkers::*;
use crate::fixers::*;
use downlevel_pass_api::{Checker, Fixer};
use downlevel_pass_catalog::{self as catalog, CHECKERS, FIXERS, PassKind};
use downlevel_types::{Selector, VersionParseError};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown {kind} '{name}'; known {kind}s: {known}")]
    UnknownPass {
        kind: PassKind,
        name: String,
        known: String,
    },

    #[error("invalid version: {0}")]
    InvalidVersion(#[from] VersionParseError),
}

pub fn builtin_checkers() -> Vec<Box<dyn Checker>> {
    vec![
        Box::new(NoStarImportsChecker),
        Box::new(NoOverriddenStdlibImportsChecker),
        Box::new(NoOverriddenBuiltinsChecker),
        Box::new(NoOpenWithEncodingChecker),
        Box::new(NoAsyncAwaitChecker),
    ]
}

pub fn builtin_fixers() -> Vec<Box<dyn Fixer>> {
    vec![
        Box::new(FutureImportFixer::annotations()),
        Box::new(FutureImportFixer::generator_stop()),
        Box::new(FutureImportFixer::unicode_literals()),
        Box::new(FutureImportFixer::print_function()),
        Box::new(FutureImportFixer::with_statement()),
        Box::new(FutureImportFixer::absolute_import()),
        Box::new(FutureImportFixer::division()),
        Box::new(FutureImportFixer::generators()),
        Box::new(FutureImportFixer::nested_scopes()),
        Box::new(BuiltinRenameFixer::xrange_to_range()),
        Box::new(BuiltinRenameFixer::unicode_to_str()),
        Box::new(BuiltinRenameFixer::unichr_to_chr()),
        Box::new(BuiltinRenameFixer::raw_input_to_input()),
        Box::new(RemoveFunctionDefAnnotationsFixer::default()),
        Box::new(NamedTupleClassToAssignFixer::default()),
        Box::new(RemoveAnnAssignFixer::default()),
        Box::new(ShortToLongFormSuperFixer::default()),
        Box::new(InlineKwOnlyArgsFixer::default()),
        Box::new(FStringToStrFormatFixer::default()),
        Box::new(NewStyleClassesFixer::default()),
        Box::new(ItertoolsBuiltinsFixer::default()),
        Box::new(UnpackingGeneralizationsFixer::default()),
    ]
}

/// Resolves selector names to catalog keys. `None` selects every pass.
fn resolve<'a>(
    selector: &Selector,
    kind: PassKind,
    find: impl Fn(&str) -> Option<&'a str>,
    known: impl Iterator<Item = &'a str>,
) -> Result<Option<BTreeSet<&'a str>>, ConfigError> {
    if selector.is_all() {
        return Ok(None);
    }
    let known: Vec<&str> = known.collect();
    selector
        .names()
        .iter()
        .map(|name| {
            find(name).ok_or_else(|| ConfigError::UnknownPass {
                kind,
                name: name.clone(),
                known: known.join(", "),
            })
        })
        .collect::<Result<BTreeSet<_>, _>>()
        .map(Some)
}

pub fn select_checkers(selector: &Selector) -> Result<Vec<Box<dyn Checker>>, ConfigError> {
    let wanted = resolve(
        selector,
        PassKind::Checker,
        |name| catalog::find_checker(name).map(|m| m.key),
        CHECKERS.iter().map(|m| m.key),
    )?;
    let selected: Vec<_> = builtin_checkers()
        .into_iter()
        .filter(|c| wanted.as_ref().is_none_or(|w| w.contains(c.meta().key)))
        .collect();
    debug!(count = selected.len(), "selected checkers");
    Ok(selected)
}

pub fn select_fixers(selector: &Selector) -> Result<Vec<Box<dyn Fixer>>, ConfigError> {
    let wanted = resolve(
        selector,
        PassKind::Fixer,
        |name| catalog::find_fixer(name).map(|m| m.key),
        FIXERS.iter().map(|m| m.key),
    )?;
    let selected: Vec<_> = builtin_fixers()
        .into_iter()
        .filter(|f| wanted.as_ref().is_none_or(|w| w.contains(f.meta().key)))
        .collect();
    debug!(count = selected.len(), "selected fixers");
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instances_follow_catalog_order() {
        let checker_keys: Vec<_> = builtin_checkers().iter().map(|c| c.meta().key).collect();
        let catalog_checkers: Vec<_> = CHECKERS.iter().map(|m| m.key).collect();
        assert_eq!(checker_keys, catalog_checkers);

        let fixer_keys: Vec<_> = builtin_fixers().iter().map(|f| f.meta().key).collect();
        let catalog_fixers: Vec<_> = FIXERS.iter().map(|m| m.key).collect();
        assert_eq!(fixer_keys, catalog_fixers);
    }

    #[test]
    fn blank_selector_selects_everything() {
        let blank = Selector::parse(" , ");
        assert_eq!(select_checkers(&blank).unwrap().len(), CHECKERS.len());
        assert_eq!(select_fixers(&blank).unwrap().len(), FIXERS.len());
    }

    #[test]
    fn one_name_selects_one_instance() {
        let fixers = select_fixers(&Selector::parse("UnpackingGeneralizationsFixer")).unwrap();
        assert_eq!(fixers.len(), 1);
        assert_eq!(fixers[0].meta().key, "unpacking_generalizations");
    }

    #[test]
    fn selection_keeps_registry_order_and_collapses_duplicates() {
        let selector = Selector::parse("new_style_classes, DivisionFuture, new-style-classes");
        let keys: Vec<_> = select_fixers(&selector)
            .unwrap()
            .iter()
            .map(|f| f.meta().key)
            .collect();
        assert_eq!(keys, ["division_future", "new_style_classes"]);
    }

    #[test]
    fn unknown_name_is_a_config_error() {
        let err = match select_checkers(&Selector::parse("no_such_thing")) {
            Err(err) => err,
            Ok(_) => panic!("expected unknown pass error"),
        };
        let ConfigError::UnknownPass { kind, name, known } = &err else {
            panic!("unexpected {err:?}");
        };
        assert_eq!(*kind, PassKind::Checker);
        assert_eq!(name, "no_such_thing");
        assert!(known.contains("no_async_await"));
        assert!(err.to_string().starts_with("unknown checker 'no_such_thing'"));
    }
}
