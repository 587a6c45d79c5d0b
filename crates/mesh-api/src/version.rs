//! Control plane schema versions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Schema version of a [`ControlPlaneSpec`](crate::ControlPlaneSpec).
///
/// Versions select which defaulting rules the conversion engine applies. The
/// set is closed; adding a version must not change the output of existing
/// ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Version {
    V1_0,
    V1_1,
    V2_0,
}

impl Version {
    /// Every supported version, oldest first
    pub const ALL: [Version; 3] = [Version::V1_0, Version::V1_1, Version::V2_0];

    pub fn latest() -> Self {
        Version::V2_0
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V1_0 => "v1.0",
            Version::V1_1 => "v1.1",
            Version::V2_0 => "v2.0",
        }
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.strip_prefix('v').unwrap_or(trimmed) {
            "1.0" => Ok(Version::V1_0),
            "1.1" => Ok(Version::V1_1),
            "2.0" => Ok(Version::V2_0),
            _ => Err(Error::UnsupportedVersion {
                version: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Version {
    type Error = Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.as_str().to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
