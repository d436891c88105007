//! Compatibility declarations and their validation.
//!
//! A [`CompatibilityConfig`] is the contract a package declares: which
//! interpreter versions it requires, has tested, or refuses to run on, which
//! OS families it supports, and whether to remind users about updates. One
//! declaration evaluates exactly one running environment and is then
//! discarded; nothing is shared between calls.
//!
//! Declarations can be built programmatically or deserialized from embedded
//! data. Unknown fields are rejected so a typo in a declaration fails loudly
//! instead of silently disabling a check.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::environment::OsGroup;
use crate::error::{CompatError, Result};
use crate::messages::Language;
use crate::version::VersionSpec;

/// A release date, either already structured or as an ISO `YYYY-MM-DD`
/// string. Both forms convert into the argument of
/// [`CompatibilityConfig::new`].
#[derive(Debug, Clone)]
pub enum ReleaseDate {
    Date(NaiveDate),
    Iso(String),
}

impl From<NaiveDate> for ReleaseDate {
    fn from(date: NaiveDate) -> Self {
        ReleaseDate::Date(date)
    }
}

impl From<&str> for ReleaseDate {
    fn from(s: &str) -> Self {
        ReleaseDate::Iso(s.to_string())
    }
}

impl From<String> for ReleaseDate {
    fn from(s: String) -> Self {
        ReleaseDate::Iso(s)
    }
}

impl ReleaseDate {
    fn resolve(self) -> Result<NaiveDate> {
        match self {
            ReleaseDate::Date(date) => Ok(date),
            ReleaseDate::Iso(s) => {
                NaiveDate::from_str(s.trim()).map_err(|_| CompatError::BadDate { input: s })
            }
        }
    }
}

/// Delay-then-probabilistic-reminder policy for prompting users to check for
/// package updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NagPolicy {
    /// Whole days after the release date before reminders may start.
    #[serde(alias = "nag_days_after_release")]
    pub days_after_release: u32,
    /// Chance in percent that a given call emits the reminder. `100` means
    /// always once the threshold has passed, `0` means never.
    #[serde(alias = "nag_in_hundred")]
    pub probability_percent: u8,
}

impl NagPolicy {
    fn validate(&self) -> Result<()> {
        if self.probability_percent > 100 {
            return Err(CompatError::InvalidNagPolicy {
                message: format!(
                    "probability_percent must be between 0 and 100, got {}",
                    self.probability_percent
                ),
            });
        }
        Ok(())
    }
}

/// Declared OS support levels. The three sets must be pairwise disjoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OsSupport {
    #[serde(default)]
    pub full: HashSet<OsGroup>,
    #[serde(default)]
    pub partial: HashSet<OsGroup>,
    #[serde(default)]
    pub incompatible: HashSet<OsGroup>,
}

impl OsSupport {
    /// Build a declaration from OS names (`"Linux"`, `"MacOS"`/`"Darwin"`,
    /// `"Windows"`); any other name fails with
    /// [`CompatError::UnknownOsGroup`](crate::error::CompatError).
    pub fn parse(full: &[&str], partial: &[&str], incompatible: &[&str]) -> Result<Self> {
        let parse_set = |names: &[&str]| -> Result<HashSet<OsGroup>> {
            names.iter().map(|name| name.parse()).collect()
        };
        Ok(OsSupport {
            full: parse_set(full)?,
            partial: parse_set(partial)?,
            incompatible: parse_set(incompatible)?,
        })
    }

    fn validate(&self) -> Result<()> {
        if let Some(os) = self.full.intersection(&self.incompatible).next() {
            return Err(CompatError::ParameterContradiction {
                message: format!(
                    "{} cannot have full support AND be incompatible",
                    os
                ),
            });
        }
        if let Some(os) = self.full.intersection(&self.partial).next() {
            return Err(CompatError::ParameterContradiction {
                message: format!(
                    "{} cannot be fully AND only partially supported",
                    os
                ),
            });
        }
        if let Some(os) = self.partial.intersection(&self.incompatible).next() {
            return Err(CompatError::ParameterContradiction {
                message: format!(
                    "{} cannot be partially supported AND incompatible",
                    os
                ),
            });
        }
        Ok(())
    }
}

/// The compatibility contract a package declares for one evaluation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompatibilityConfig {
    /// Package name, used only in messages.
    pub package_name: String,
    /// Package version, free text, never parsed.
    pub package_version: String,
    /// Release date of this package version.
    pub release_date: NaiveDate,
    /// Minimum interpreter version; compared ignoring release level.
    #[serde(default)]
    pub min_version: Option<VersionSpec>,
    /// Highest interpreter version the package was tested against; compared
    /// ignoring release level.
    #[serde(default)]
    pub max_tested_version: Option<VersionSpec>,
    /// Interpreter versions the package refuses to run on. Two components
    /// block every release level of that version, three components block
    /// only that exact release level.
    #[serde(default)]
    pub incompatible_versions: HashSet<VersionSpec>,
    /// Update-reminder policy; absent means never remind.
    #[serde(default)]
    pub nag_policy: Option<NagPolicy>,
    /// Declared OS support levels; absent skips the OS check entirely.
    #[serde(default, alias = "system_support")]
    pub os_support: Option<OsSupport>,
    /// Message language for all advisories and incompatibility errors.
    #[serde(default, alias = "language_messages")]
    pub language: Language,
}

impl CompatibilityConfig {
    /// Start a declaration from the three required fields. The release date
    /// is accepted as a [`NaiveDate`] or an ISO `YYYY-MM-DD` string; any
    /// other string form fails with [`CompatError::BadDate`].
    pub fn new(
        package_name: &str,
        package_version: &str,
        release_date: impl Into<ReleaseDate>,
    ) -> Result<Self> {
        Ok(CompatibilityConfig {
            package_name: package_name.trim().to_string(),
            package_version: package_version.trim().to_string(),
            release_date: release_date.into().resolve()?,
            min_version: None,
            max_tested_version: None,
            incompatible_versions: HashSet::new(),
            nag_policy: None,
            os_support: None,
            language: Language::default(),
        })
    }

    /// Declare the minimum interpreter version, e.g. `"3.8"`.
    pub fn min_version(mut self, version: &str) -> Result<Self> {
        self.min_version = Some(version.parse()?);
        Ok(self)
    }

    /// Declare the highest tested interpreter version, e.g. `"3.12"`.
    pub fn max_tested_version(mut self, version: &str) -> Result<Self> {
        self.max_tested_version = Some(version.parse()?);
        Ok(self)
    }

    /// Add one version to the incompatibility list.
    pub fn incompatible_version(mut self, version: &str) -> Result<Self> {
        self.incompatible_versions.insert(version.parse()?);
        Ok(self)
    }

    /// Declare the update-reminder policy.
    pub fn nag_policy(mut self, days_after_release: u32, probability_percent: u8) -> Self {
        self.nag_policy = Some(NagPolicy {
            days_after_release,
            probability_percent,
        });
        self
    }

    /// Declare OS support levels.
    pub fn os_support(mut self, os_support: OsSupport) -> Self {
        self.os_support = Some(os_support);
        self
    }

    /// Select the message language.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Select the message language by code, `"en"` or `"de"`; anything else
    /// fails with [`CompatError::UnsupportedLanguage`].
    pub fn language_messages(mut self, language: &str) -> Result<Self> {
        self.language = language.parse()?;
        Ok(self)
    }

    /// Pre-check gate: reject incomplete or contradictory declarations.
    ///
    /// Runs before any checkpoint so a caller never sees partial output from
    /// a broken declaration.
    pub fn validate(&self) -> Result<()> {
        if self.package_name.trim().is_empty() {
            return Err(CompatError::MissingParameter {
                name: "package_name",
            });
        }
        if self.package_version.trim().is_empty() {
            return Err(CompatError::MissingParameter {
                name: "package_version",
            });
        }
        if let Some(nag) = &self.nag_policy {
            nag.validate()?;
        }
        if let Some(os_support) = &self.os_support {
            os_support.validate()?;
        }
        Ok(())
    }
}
