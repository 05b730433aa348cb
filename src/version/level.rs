use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::version::compare::Version;

/// How large a gap between the installed and the published version must be
/// before an update is forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateLevel {
    /// Only a newer major version forces an update
    Major,
    /// A newer major or minor version forces an update; patch releases never do
    #[default]
    Minor,
    /// Any newer version forces an update
    Patch,
}

impl UpdateLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateLevel::Major => "major",
            UpdateLevel::Minor => "minor",
            UpdateLevel::Patch => "patch",
        }
    }

    /// Returns true if `remote` is far enough ahead of `local` to force an update.
    ///
    /// Components below the level are ignored: under `Minor`, `1.0.0 -> 1.0.5`
    /// is not forced and `1.0.9 -> 1.1.0` is.
    pub fn requires_update(&self, local: &Version, remote: &Version) -> bool {
        match self {
            UpdateLevel::Major => remote.major > local.major,
            UpdateLevel::Minor => {
                if remote.major != local.major {
                    return remote.major > local.major;
                }
                remote.minor > local.minor
            }
            UpdateLevel::Patch => remote > local,
        }
    }
}

impl fmt::Display for UpdateLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown update level: {0} (expected major, minor or patch)")]
pub struct ParseLevelError(String);

impl FromStr for UpdateLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(UpdateLevel::Major),
            "minor" => Ok(UpdateLevel::Minor),
            "patch" => Ok(UpdateLevel::Patch),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
