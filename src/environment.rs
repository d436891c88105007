//! Running-environment identity: interpreter version and OS group.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CompatError, Result};
use crate::version::VersionSpec;

/// Coarse operating-system families used for compatibility declarations,
/// independent of specific distributions or versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsGroup {
    Linux,
    MacOS,
    Windows,
}

impl OsGroup {
    /// Map the compile-time target OS to a group. Targets outside the three
    /// families (BSDs, illumos, ...) have no group; their support status is
    /// reported as unknown.
    pub fn current() -> Option<OsGroup> {
        match std::env::consts::OS {
            "linux" => Some(OsGroup::Linux),
            "macos" => Some(OsGroup::MacOS),
            "windows" => Some(OsGroup::Windows),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            OsGroup::Linux => "Linux",
            OsGroup::MacOS => "MacOS",
            OsGroup::Windows => "Windows",
        }
    }
}

impl fmt::Display for OsGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsGroup {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Linux" => Ok(OsGroup::Linux),
            // platform probes commonly report macOS as Darwin
            "MacOS" | "Darwin" => Ok(OsGroup::MacOS),
            "Windows" => Ok(OsGroup::Windows),
            other => Err(CompatError::UnknownOsGroup {
                name: other.to_string(),
            }),
        }
    }
}

/// The identity of the environment one evaluation runs against: the
/// interpreter version declared by the caller and the host OS group.
///
/// The version string comes from the caller because only the embedding
/// application knows which runtime it cares about. The OS group is detected
/// from the build target; [`RuntimeEnvironment::with_os`] overrides it, which
/// tests use to exercise every support level.
#[derive(Debug, Clone)]
pub struct RuntimeEnvironment {
    pub version: VersionSpec,
    pub os: Option<OsGroup>,
}

impl RuntimeEnvironment {
    /// Parse the running interpreter's version string and detect the host OS.
    ///
    /// Running versions are parsed with [`VersionSpec::parse_running`], so a
    /// numeric micro component (`"3.10.0"`) is accepted and ignored.
    pub fn new(version: &str) -> Result<Self> {
        Ok(RuntimeEnvironment {
            version: VersionSpec::parse_running(version)?,
            os: OsGroup::current(),
        })
    }

    /// Replace the detected OS group.
    pub fn with_os(mut self, os: Option<OsGroup>) -> Self {
        self.os = os;
        self
    }

    /// Display name of the running OS: the group name when known, otherwise
    /// the raw target OS string.
    pub fn os_name(&self) -> String {
        match self.os {
            Some(os) => os.to_string(),
            None => std::env::consts::OS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_os_maps_known_targets() {
        // Whatever the test host is, the mapping must agree with consts::OS.
        let current = OsGroup::current();
        match std::env::consts::OS {
            "linux" => assert_eq!(current, Some(OsGroup::Linux)),
            "macos" => assert_eq!(current, Some(OsGroup::MacOS)),
            "windows" => assert_eq!(current, Some(OsGroup::Windows)),
            _ => assert_eq!(current, None),
        }
    }

    #[test]
    fn os_group_parses_names() {
        assert_eq!("Linux".parse::<OsGroup>().unwrap(), OsGroup::Linux);
        assert_eq!("Darwin".parse::<OsGroup>().unwrap(), OsGroup::MacOS);
        assert_eq!("MacOS".parse::<OsGroup>().unwrap(), OsGroup::MacOS);
        assert_eq!("Windows".parse::<OsGroup>().unwrap(), OsGroup::Windows);
        assert!("foo".parse::<OsGroup>().is_err());
    }

    #[test]
    fn environment_parses_version_and_detects_os() {
        let env = RuntimeEnvironment::new("3.10.final").unwrap();
        assert_eq!((env.version.major, env.version.minor), (3, 10));
        assert_eq!(env.os, OsGroup::current());
    }

    #[test]
    fn environment_accepts_numeric_micro_version() {
        let env = RuntimeEnvironment::new("3.10.0").unwrap();
        assert_eq!((env.version.major, env.version.minor), (3, 10));
        assert_eq!(env.version.release_level, None);
    }

    #[test]
    fn environment_rejects_bad_version() {
        assert!(RuntimeEnvironment::new("3.x").is_err());
    }

    #[test]
    fn with_os_overrides_detection() {
        let env = RuntimeEnvironment::new("3.10")
            .unwrap()
            .with_os(Some(OsGroup::Windows));
        assert_eq!(env.os, Some(OsGroup::Windows));
        assert_eq!(env.os_name(), "Windows");
    }
}
