use crate::version::Version;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_VERSION: Version = Version::new(3, 6);
pub const DEFAULT_TARGET_VERSION: Version = Version::new(2, 7);

/// Pass name filter.
///
/// Accepts either a comma-separated string (`"a, b"`) or a list of names.
/// Blank entries are ignored; a selector without any names selects every pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectorRepr", into = "Vec<String>")]
pub struct Selector {
    names: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SelectorRepr {
    Csv(String),
    List(Vec<String>),
}

impl From<SelectorRepr> for Selector {
    fn from(repr: SelectorRepr) -> Self {
        match repr {
            SelectorRepr::Csv(s) => Selector::parse(&s),
            SelectorRepr::List(names) => Selector::from_names(names),
        }
    }
}

impl From<Selector> for Vec<String> {
    fn from(s: Selector) -> Self {
        s.names
    }
}

impl Selector {
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list.
    pub fn parse(csv: &str) -> Self {
        Self::from_names(csv.split(','))
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    pub fn is_all(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Appends names from `other`, skipping ones already present.
    pub fn extend(&mut self, other: &Selector) {
        for name in &other.names {
            if !self.names.contains(name) {
                self.names.push(name.clone());
            }
        }
    }
}

/// Per-run build configuration handed to every pass. Read-only to the passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub source_version: Version,
    pub target_version: Version,
    pub checkers: Selector,
    pub fixers: Selector,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_version: DEFAULT_SOURCE_VERSION,
            target_version: DEFAULT_TARGET_VERSION,
            checkers: Selector::all(),
            fixers: Selector::all(),
        }
    }
}

impl BuildConfig {
    pub fn new(source_version: Version, target_version: Version) -> Self {
        Self {
            source_version,
            target_version,
            ..Self::default()
        }
    }

    pub fn with_checkers(mut self, checkers: Selector) -> Self {
        self.checkers = checkers;
        self
    }

    pub fn with_fixers(mut self, fixers: Selector) -> Self {
        self.fixers = fixers;
        self
    }
}
