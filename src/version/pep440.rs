//! Release version type
//!
//! Vendor releases are labelled with dotted numeric versions ("5.19.4"),
//! occasionally with a pre-release tag. Ordering follows PEP 440:
//!
//! - segments compare numerically, so "5.19.04" equals "5.19.4"
//! - shorter versions are padded with zeros, so "5.19" equals "5.19.0"
//! - pre-releases order below their release ("5.19.4rc1" < "5.19.4")

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use pep508_rs::pep440_rs;

use crate::error::SyncError;

/// A parsed, totally ordered release version
#[derive(Debug, Clone)]
pub struct Version(pep440_rs::Version);

/// Parse a version token from a page label or a directory name
pub fn parse_version(token: &str) -> Result<Version, SyncError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(SyncError::VersionFormat {
            input: token.to_string(),
            reason: "empty version".to_string(),
        });
    }

    pep440_rs::Version::from_str(trimmed)
        .map(Version)
        .map_err(|e| SyncError::VersionFormat {
            input: token.to_string(),
            reason: e.to_string(),
        })
}

impl FromStr for Version {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Normalized form; this is what directories are named after
        write!(f, "{}", self.0)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}
