//! Core transpile pipeline, extracted from the CLI.
//!
//! Checkers run first, in registry order, and the first violation aborts the
//! run. Fixers then run in registry order, each consuming the previous tree
//! and contributing its effects. Every step is gated by the pass's version
//! window. Nothing is written: callers render or persist the outcome through
//! the port traits.

use crate::ports::{LoadedModule, ModuleSource};
use crate::settings::Settings;
use camino::Utf8Path;
use downlevel_domain::{ConfigError, select_checkers, select_fixers};
use downlevel_pass_api::{CheckViolation, Checker, Fixer, FixerError};
use downlevel_render::{ModuleHeader, parse_module_header, render_module};
use downlevel_tree::Module;
use downlevel_types::{BuildConfig, EffectSet};
use tracing::{debug, error, info, warn};

/// Error type for pipeline results.
///
/// Exit code 2 = the input cannot be downleveled, 1 = configuration or tool
/// error.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("check failed: {0}")]
    Violation(#[from] CheckViolation),

    #[error("{0}")]
    Fixer(#[from] FixerError),

    #[error("{0:#}")]
    Io(#[from] anyhow::Error),
}

impl PipelineError {
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Violation(_) => 2,
            PipelineError::Fixer(err) if !err.is_contract_violation() => 2,
            PipelineError::Fixer(_) | PipelineError::Config(_) | PipelineError::Io(_) => 1,
        }
    }
}

/// Result of one successful run over a module.
#[derive(Debug, Clone, PartialEq)]
pub struct TranspileOutcome {
    pub module: Module,
    /// Union of every applied fixer's effects.
    pub effects: EffectSet,
    pub checkers_run: Vec<&'static str>,
    pub fixers_run: Vec<&'static str>,
}

/// Runs the selected checkers and fixers over `module`.
pub fn transpile_module(
    settings: &Settings,
    module: Module,
) -> Result<TranspileOutcome, PipelineError> {
    let config = &settings.build;
    let checkers = select_checkers(&config.checkers)?;
    let fixers = select_fixers(&config.fixers)?;
    run_passes(config, &checkers, fixers, module)
}

/// Runs the given pass instances over `module`, gated by their windows.
///
/// Pass instances must be fresh: a fixer's effects describe exactly one run.
pub fn run_passes(
    config: &BuildConfig,
    checkers: &[Box<dyn Checker>],
    mut fixers: Vec<Box<dyn Fixer>>,
    module: Module,
) -> Result<TranspileOutcome, PipelineError> {
    let source = config.source_version;
    let target = config.target_version;

    let mut checkers_run = Vec::new();
    for checker in checkers {
        let meta = checker.meta();
        if !meta.window.is_prohibited(target) {
            debug!(checker = meta.key, %target, "skipping checker, construct allowed on target");
            continue;
        }
        if let Err(violation) = checker.check(config, &module) {
            warn!(checker = meta.key, "{}", violation.message);
            return Err(violation.into());
        }
        checkers_run.push(meta.key);
    }

    let mut module = module;
    let mut effects = EffectSet::new();
    let mut fixers_run = Vec::new();
    for fixer in &mut fixers {
        let meta = fixer.meta();
        if !meta.window.is_applicable(source, target) {
            debug!(fixer = meta.key, %source, %target, "skipping fixer, outside window");
            continue;
        }
        let was_empty = module.body.is_empty();
        module = match fixer.fix(config, module) {
            Ok(fixed) => fixed,
            Err(err) if err.is_contract_violation() => {
                let err = err.with_fixer(meta.key);
                error!(fixer = meta.key, "{err}");
                return Err(err.into());
            }
            Err(err) => {
                warn!(fixer = meta.key, "{err}");
                return Err(err.into());
            }
        };
        if !was_empty && module.body.is_empty() {
            let err = FixerError::contract("fixer returned an empty module").with_fixer(meta.key);
            error!(fixer = meta.key, "{err}");
            return Err(err.into());
        }
        debug!(
            fixer = meta.key,
            effects = fixer.effects().len(),
            "applied fixer"
        );
        effects.merge(fixer.effects());
        fixers_run.push(meta.key);
    }

    Ok(TranspileOutcome {
        module,
        effects,
        checkers_run,
        fixers_run,
    })
}

/// [`transpile_module`] with `name` attached to any unsupported-shape error.
pub fn transpile_named(
    settings: &Settings,
    name: &str,
    module: Module,
) -> Result<TranspileOutcome, PipelineError> {
    info!(module = name, "transpiling");
    transpile_module(settings, module).map_err(|err| match err {
        PipelineError::Fixer(err) => PipelineError::Fixer(err.with_module(name)),
        other => other,
    })
}

/// A rewritten module, rendered to Python source.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedModule {
    pub name: String,
    pub header: ModuleHeader,
    pub source: String,
    /// The original source the tree came from, when known.
    pub original: Option<String>,
    pub outcome: TranspileOutcome,
}

/// Transpiles a loaded module and renders it under its original header.
pub fn transpile_loaded(
    settings: &Settings,
    loaded: LoadedModule,
) -> Result<RenderedModule, PipelineError> {
    let LoadedModule {
        name,
        tree,
        original,
    } = loaded;
    let outcome = transpile_named(settings, &name, tree)?;
    let header = original
        .as_deref()
        .map(parse_module_header)
        .unwrap_or_default();
    let source = render_module(&outcome.module, &outcome.effects, &header);
    info!(
        module = name.as_str(),
        fixers = outcome.fixers_run.len(),
        effects = outcome.effects.len(),
        "transpiled"
    );
    Ok(RenderedModule {
        name,
        header,
        source,
        original,
        outcome,
    })
}

/// Loads `path` through `source` and transpiles it.
pub fn transpile_path(
    settings: &Settings,
    source: &dyn ModuleSource,
    path: &Utf8Path,
) -> Result<RenderedModule, PipelineError> {
    let loaded = source.load_module(path)?;
    transpile_loaded(settings, loaded)
}
