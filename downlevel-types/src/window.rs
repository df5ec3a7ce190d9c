//! Version windows deciding whether a pass runs for a `(source, target)` pair.
//!
//! All bounds are inclusive: a version equal to a limit is inside the window.

use crate::version::Version;
use serde::{Deserialize, Serialize};

/// Applicability window of a fixer.
///
/// - `apply_since..=apply_until` bounds the *target* versions for which the
///   rewrite is mandatory.
/// - `works_since..=works_until` bounds the *source* versions the fixer's
///   assumptions hold for. An unset `works_until` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionWindow {
    pub apply_since: Version,
    pub apply_until: Version,
    pub works_since: Version,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub works_until: Option<Version>,
}

impl VersionWindow {
    /// A window with `works_since = apply_since` and no `works_until`.
    pub const fn new(apply_since: Version, apply_until: Version) -> Self {
        Self {
            apply_since,
            apply_until,
            works_since: apply_since,
            works_until: None,
        }
    }

    pub const fn works_since(self, version: Version) -> Self {
        Self {
            works_since: version,
            ..self
        }
    }

    pub const fn works_until(self, version: Version) -> Self {
        Self {
            works_until: Some(version),
            ..self
        }
    }

    /// `apply_since <= apply_until`.
    pub const fn is_well_formed(&self) -> bool {
        self.apply_since.const_le(self.apply_until)
    }

    /// The target dialect needs this rewrite.
    pub fn is_required(&self, target: Version) -> bool {
        self.apply_since <= target && target <= self.apply_until
    }

    /// Source code written for `source` satisfies what the rewrite assumes.
    pub fn is_safe_on_source(&self, source: Version) -> bool {
        self.works_since <= source && self.works_until.is_none_or(|until| source <= until)
    }

    pub fn is_applicable(&self, source: Version, target: Version) -> bool {
        self.is_safe_on_source(source) && self.is_required(target)
    }
}

/// Prohibition window of a checker.
///
/// `prohibited_until = None` means the construct is forbidden for every target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProhibitionWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prohibited_until: Option<Version>,
}

impl ProhibitionWindow {
    pub const fn always() -> Self {
        Self {
            prohibited_until: None,
        }
    }

    pub const fn until(version: Version) -> Self {
        Self {
            prohibited_until: Some(version),
        }
    }

    pub fn is_prohibited(&self, target: Version) -> bool {
        self.prohibited_until.is_none_or(|until| until >= target)
    }
}
