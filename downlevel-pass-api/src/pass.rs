use crate::error::{CheckViolation, FixResult};
use downlevel_pass_catalog::{CHECKERS, CheckerMeta, FIXERS, FixerMeta, PassKind};
use downlevel_tree::Module;
use downlevel_types::{BuildConfig, EffectSet};
use serde::Serialize;

/// Read-only validation of a module against the target version.
pub trait Checker {
    fn meta(&self) -> &'static CheckerMeta;

    /// Returns the first violation found, if any.
    fn check(&self, config: &BuildConfig, module: &Module) -> Result<(), CheckViolation>;
}

/// A tree rewrite that makes a newer construct runnable on an older target.
///
/// A fixer instance serves exactly one run: it accumulates the imports and
/// declarations its rewrites depend on, and the pipeline reads them through
/// [`Fixer::effects`] once `fix` has returned.
pub trait Fixer {
    fn meta(&self) -> &'static FixerMeta;

    /// Rewrites `module`. A non-empty module must not come back empty.
    fn fix(&mut self, config: &BuildConfig, module: Module) -> FixResult<Module>;

    fn effects(&self) -> &EffectSet;
}

/// Metadata of any registered pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PassMeta {
    Checker(&'static CheckerMeta),
    Fixer(&'static FixerMeta),
}

impl PassMeta {
    pub fn kind(&self) -> PassKind {
        match self {
            PassMeta::Checker(_) => PassKind::Checker,
            PassMeta::Fixer(_) => PassKind::Fixer,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            PassMeta::Checker(m) => m.key,
            PassMeta::Fixer(m) => m.key,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PassMeta::Checker(m) => m.title,
            PassMeta::Fixer(m) => m.title,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PassMeta::Checker(m) => m.description,
            PassMeta::Fixer(m) => m.description,
        }
    }

    /// Human-readable version window, e.g. `applies to targets 2.0..=3.4`.
    pub fn window_summary(&self) -> String {
        match self {
            PassMeta::Checker(m) => match m.window.prohibited_until {
                Some(until) => format!("prohibited for targets up to {until}"),
                None => "prohibited for every target".to_string(),
            },
            PassMeta::Fixer(m) => {
                let w = &m.window;
                let mut s = format!(
                    "applies to targets {}..={}, sources from {}",
                    w.apply_since, w.apply_until, w.works_since
                );
                if let Some(until) = w.works_until {
                    s.push_str(&format!(" up to {until}"));
                }
                s
            }
        }
    }
}

/// Every registered pass, checkers first, each group in registry order.
pub fn all_passes() -> impl Iterator<Item = PassMeta> {
    CHECKERS
        .iter()
        .map(PassMeta::Checker)
        .chain(FIXERS.iter().map(PassMeta::Fixer))
}

/// Looks a pass up by any accepted spelling of its name.
pub fn find_pass(name: &str) -> Option<PassMeta> {
    downlevel_pass_catalog::find_checker(name)
        .map(PassMeta::Checker)
        .or_else(|| downlevel_pass_catalog::find_fixer(name).map(PassMeta::Fixer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_passes_lists_checkers_then_fixers() {
        let kinds: Vec<PassKind> = all_passes().map(|p| p.kind()).collect();
        assert_eq!(kinds.len(), CHECKERS.len() + FIXERS.len());
        assert!(kinds[..CHECKERS.len()].iter().all(|k| *k == PassKind::Checker));
        assert!(kinds[CHECKERS.len()..].iter().all(|k| *k == PassKind::Fixer));
    }

    #[test]
    fn window_summaries() {
        let p = find_pass("XrangeToRangeFixer").unwrap();
        assert_eq!(
            p.window_summary(),
            "applies to targets 1.0..=2.7, sources from 1.0 up to 3.7"
        );
        let c = find_pass("no-star-imports").unwrap();
        assert_eq!(c.window_summary(), "prohibited for every target");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(find_pass("no_async_await").unwrap()).unwrap();
        assert_eq!(json["kind"], "checker");
        assert_eq!(json["key"], "no_async_await");
        assert_eq!(json["window"]["prohibited_until"], "3.4");
    }
}
