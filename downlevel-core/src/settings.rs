//! Clap-free settings for the transpile pipeline.

use downlevel_domain::{ConfigError, select_checkers, select_fixers};
use downlevel_types::{BuildConfig, Selector, Version};

/// Settings for one pipeline run. Every module processed with the same
/// settings sees the same versions and pass selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub build: BuildConfig,
}

impl Settings {
    pub fn new(build: BuildConfig) -> Self {
        Self { build }
    }

    /// Settings from textual versions and comma-separated selectors.
    pub fn parse(
        source_version: &str,
        target_version: &str,
        checkers: &str,
        fixers: &str,
    ) -> Result<Self, ConfigError> {
        let source: Version = source_version.parse()?;
        let target: Version = target_version.parse()?;
        Ok(Self::new(
            BuildConfig::new(source, target)
                .with_checkers(Selector::parse(checkers))
                .with_fixers(Selector::parse(fixers)),
        ))
    }

    /// Resolves both selectors once so that an unknown pass name is
    /// reported before any module is loaded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        select_checkers(&self.build.checkers)?;
        select_fixers(&self.build.fixers)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_versions_and_selectors() {
        let settings = Settings::parse("3.6", "2.7", "", "new_style_classes").unwrap();
        assert_eq!(settings.build.source_version, Version::new(3, 6));
        assert_eq!(settings.build.target_version, Version::new(2, 7));
        assert!(settings.build.checkers.is_all());
        assert_eq!(settings.build.fixers.names(), ["new_style_classes"]);
    }

    #[test]
    fn validate_rejects_unknown_pass_names() {
        assert!(Settings::default().validate().is_ok());
        let settings = Settings::parse("3.6", "2.7", "no_star_imports", "nope").unwrap();
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPass { .. }));
        assert!(err.to_string().contains("'nope'"));
    }

    #[test]
    fn bad_version_is_a_config_error() {
        let err = Settings::parse("3.x", "2.7", "", "").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVersion(_)));
    }
}
