use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dialect version such as `2.7` or `3.10`.
///
/// Components compare numerically, left to right. Missing components count as
/// zero, so `3` and `3.0` are the same version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u16,
    minor: u16,
    patch: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("empty version string")]
    Empty,

    #[error("invalid version component '{component}' in '{input}'")]
    InvalidComponent { input: String, component: String },

    #[error("too many components in '{0}' (at most major.minor.patch)")]
    TooManyComponents(String),
}

impl Version {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self {
            major,
            minor,
            patch: 0,
        }
    }

    pub const fn with_patch(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn major(self) -> u16 {
        self.major
    }

    pub fn minor(self) -> u16 {
        self.minor
    }

    pub fn patch(self) -> u16 {
        self.patch
    }

    /// Const-friendly `<=`, used to validate windows declared in `const` tables.
    pub const fn const_le(self, other: Version) -> bool {
        if self.major != other.major {
            return self.major < other.major;
        }
        if self.minor != other.minor {
            return self.minor < other.minor;
        }
        self.patch <= other.patch
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
        }
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut parts = [0u16; 3];
        for (i, component) in input.split('.').enumerate() {
            if i >= parts.len() {
                return Err(VersionParseError::TooManyComponents(input.to_string()));
            }
            let valid = !component.is_empty() && component.bytes().all(|b| b.is_ascii_digit());
            parts[i] = match component.parse::<u16>() {
                Ok(n) if valid => n,
                _ => {
                    return Err(VersionParseError::InvalidComponent {
                        input: input.to_string(),
                        component: component.to_string(),
                    });
                }
            };
        }

        Ok(Self::with_patch(parts[0], parts[1], parts[2]))
    }
}

impl TryFrom<String> for Version {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}
