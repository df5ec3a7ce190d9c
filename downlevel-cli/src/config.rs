//! Configuration file loading for downlevel.
//!
//! Discovers and loads `downlevel.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use downlevel_core::ConfigError;
use downlevel_types::{BuildConfig, Selector, Version};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "downlevel.toml";

/// Top-level configuration from downlevel.toml.
///
/// Versions stay textual here so that a bad value surfaces as a
/// [`ConfigError`] alongside bad CLI values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownlevelConfig {
    /// Version the input was written for.
    pub source_version: Option<String>,

    /// Oldest interpreter the output must run on.
    pub target_version: Option<String>,

    /// Checker selection; empty selects every checker.
    pub checkers: Selector,

    /// Fixer selection; empty selects every fixer.
    pub fixers: Selector,
}

/// Discover the downlevel.toml config file.
///
/// Returns `None` if `dir` has no config file.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a downlevel.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<DownlevelConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<DownlevelConfig> {
    let config: DownlevelConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the explicit config file, or discover one in `dir`, or return the
/// default.
pub fn load_or_default(
    explicit: Option<&Utf8Path>,
    dir: &Utf8Path,
) -> anyhow::Result<DownlevelConfig> {
    match explicit.map(Utf8Path::to_path_buf).or_else(|| discover_config(dir)) {
        Some(path) => load_config(&path),
        None => Ok(DownlevelConfig::default()),
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: DownlevelConfig,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    pub fn new(config: DownlevelConfig) -> Self {
        Self { config }
    }

    /// Merge with transpile command CLI arguments.
    ///
    /// Every CLI value that is present replaces the file value; a CLI
    /// selector replaces the file selector rather than extending it.
    pub fn merge_transpile_args(
        self,
        cli_source: Option<&str>,
        cli_target: Option<&str>,
        cli_checkers: Option<&str>,
        cli_fixers: Option<&str>,
    ) -> Result<BuildConfig, ConfigError> {
        let defaults = BuildConfig::default();
        let source = parse_version(
            cli_source.or(self.config.source_version.as_deref()),
            defaults.source_version,
        )?;
        let target = parse_version(
            cli_target.or(self.config.target_version.as_deref()),
            defaults.target_version,
        )?;
        let checkers = cli_checkers.map_or(self.config.checkers, Selector::parse);
        let fixers = cli_fixers.map_or(self.config.fixers, Selector::parse);

        Ok(BuildConfig::new(source, target)
            .with_checkers(checkers)
            .with_fixers(fixers))
    }
}

fn parse_version(value: Option<&str>, default: Version) -> Result<Version, ConfigError> {
    match value {
        Some(text) => Ok(text.trim().parse()?),
        None => Ok(default),
    }
}
