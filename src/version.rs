//! Version-string parsing and comparison.
//!
//! A declared version is `major.minor` with an optional third component
//! naming a release level (`alpha`, `beta`, `candidate`/`rc`, `final`).
//! Two components match every release level of that version; three
//! components match only that exact release level. Ordering against a
//! minimum or maximum-tested version never looks at the release level.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CompatError, Result};

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<major>\d+)\.(?P<minor>\d+)(?:\.(?P<level>[A-Za-z]+))?$")
        .expect("version regex is valid")
});

static RUNNING_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<major>\d+)\.(?P<minor>\d+)\.\d+$").expect("running version regex is valid")
});

/// Qualifier distinguishing pre-release stages from a final release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseLevel {
    Alpha,
    Beta,
    Candidate,
    Final,
}

impl ReleaseLevel {
    /// Parse a release-level token, case-insensitively. `rc` is accepted
    /// as the usual abbreviation of `candidate`.
    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "alpha" => Some(ReleaseLevel::Alpha),
            "beta" => Some(ReleaseLevel::Beta),
            "candidate" | "rc" => Some(ReleaseLevel::Candidate),
            "final" => Some(ReleaseLevel::Final),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            ReleaseLevel::Alpha => "alpha",
            ReleaseLevel::Beta => "beta",
            ReleaseLevel::Candidate => "candidate",
            ReleaseLevel::Final => "final",
        }
    }
}

impl fmt::Display for ReleaseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured version: `major.minor` plus optional release-level precision.
///
/// `release_level: None` means "unspecified": the declaration matches any
/// release level of that `major.minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionSpec {
    pub major: u32,
    pub minor: u32,
    pub release_level: Option<ReleaseLevel>,
}

impl VersionSpec {
    /// Construct a version without release-level precision.
    pub fn new(major: u32, minor: u32) -> Self {
        VersionSpec {
            major,
            minor,
            release_level: None,
        }
    }

    /// Construct a version pinned to a specific release level.
    pub fn with_level(major: u32, minor: u32, level: ReleaseLevel) -> Self {
        VersionSpec {
            major,
            minor,
            release_level: Some(level),
        }
    }

    /// Exact-match rule, used for incompatibility lists.
    ///
    /// `self` is the declared version; `running` is the observed one. Majors
    /// and minors must be equal, and if the declaration carries a release
    /// level it must equal the running one. A two-component declaration
    /// matches every release level of that version.
    pub fn matches(&self, running: &VersionSpec) -> bool {
        self.major == running.major
            && self.minor == running.minor
            && (self.release_level.is_none() || self.release_level == running.release_level)
    }

    /// Ordering rule, used for minimum and maximum-tested versions.
    ///
    /// Compares only `(major, minor)` lexicographically; the release level
    /// is never part of the ordering.
    pub fn precedes(&self, other: &VersionSpec) -> bool {
        (self.major, self.minor) < (other.major, other.minor)
    }

    /// Parse a running interpreter's version string.
    ///
    /// Accepts the declared-version syntax of [`FromStr`], and additionally a
    /// trailing numeric micro component (`"3.10.0"`), which runtimes commonly
    /// report. The micro is not part of the data model and leaves the release
    /// level unspecified. Declared versions stay strict: `"3.10.0"` in a
    /// declaration is still malformed.
    pub fn parse_running(s: &str) -> Result<Self> {
        if let Some(caps) = RUNNING_VERSION_REGEX.captures(s.trim()) {
            let bad = || CompatError::BadVersionFormat {
                input: s.to_string(),
            };
            let major = caps["major"].parse::<u32>().map_err(|_| bad())?;
            let minor = caps["minor"].parse::<u32>().map_err(|_| bad())?;
            return Ok(VersionSpec::new(major, minor));
        }
        s.parse()
    }
}

impl FromStr for VersionSpec {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || CompatError::BadVersionFormat {
            input: s.to_string(),
        };

        let caps = VERSION_REGEX.captures(s.trim()).ok_or_else(bad)?;
        let major = caps["major"].parse::<u32>().map_err(|_| bad())?;
        let minor = caps["minor"].parse::<u32>().map_err(|_| bad())?;
        let release_level = match caps.name("level") {
            Some(token) => Some(ReleaseLevel::from_token(token.as_str()).ok_or_else(bad)?),
            None => None,
        };

        Ok(VersionSpec {
            major,
            minor,
            release_level,
        })
    }
}

impl TryFrom<String> for VersionSpec {
    type Error = CompatError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<VersionSpec> for String {
    fn from(v: VersionSpec) -> String {
        v.to_string()
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.release_level {
            Some(level) => write!(f, "{}.{}.{}", self.major, self.minor, level),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}
