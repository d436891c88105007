//! Localized messages for check outcomes.
//!
//! Every advisory and fatal incompatibility is worded in the language the
//! declaring package selected. The catalog is scoped to a single evaluation
//! (no global state); adding a language means adding a translation for every
//! message, with the same placeholders in the same order.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CompatError;
use crate::version::VersionSpec;

/// Supported message languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl FromStr for Language {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            other => Err(CompatError::UnsupportedLanguage {
                requested: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::En => "en",
            Language::De => "de",
        })
    }
}

/// Message catalog for one evaluation, fixed to a single language.
#[derive(Debug, Clone, Copy)]
pub struct MessageCatalog {
    language: Language,
}

impl MessageCatalog {
    pub fn new(language: Language) -> Self {
        MessageCatalog { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Info line naming the package, its version, and its release date.
    pub fn version_info(&self, package: &str, version: &str, release_date: NaiveDate) -> String {
        match self.language {
            Language::En => format!(
                "You are using {} in version {} ({})",
                package, version, release_date
            ),
            Language::De => format!(
                "Sie nutzen {} in Version {} ({})",
                package, version, release_date
            ),
        }
    }

    /// Fatal: the running interpreter is on the incompatibility list.
    pub fn incompatible_interpreter(&self, package: &str) -> String {
        match self.language {
            Language::En => format!(
                "Your version of the interpreter is not compatible with this \
                 specific version of {}. Please check if there are any updates \
                 that solve this.",
                package
            ),
            Language::De => format!(
                "Ihre Version des Interpreters ist nicht kompatibel mit dieser \
                 Version von {}. Bitte prüfen Sie, ob ein Update dieses Problem \
                 löst.",
                package
            ),
        }
    }

    /// Fatal: the running interpreter is older than the declared minimum.
    pub fn interpreter_too_old(
        &self,
        package: &str,
        minimum: &VersionSpec,
        running: &VersionSpec,
    ) -> String {
        match self.language {
            Language::En => format!(
                "You need at least version {}.{} of the interpreter to run {}, \
                 but you are using {}.",
                minimum.major, minimum.minor, package, running
            ),
            Language::De => format!(
                "Sie benötigen mindestens Version {}.{} des Interpreters, um {} \
                 auszuführen, nutzen aber {}.",
                minimum.major, minimum.minor, package, running
            ),
        }
    }

    /// Warning: the running interpreter is newer than anything tested.
    pub fn untested_interpreter(&self, package: &str) -> String {
        match self.language {
            Language::En => format!(
                "Your version of the interpreter is newer than the versions \
                 this installation of {} is tested for. Please check for \
                 updates.",
                package
            ),
            Language::De => format!(
                "Ihre Version des Interpreters ist neuer als alle Versionen, \
                 gegen die diese Version von {} getestet wurde. Prüfen Sie, ob \
                 es ein Update gibt.",
                package
            ),
        }
    }

    /// Confirmation: the running OS is fully supported.
    pub fn full_os_support(&self, package: &str, os: &str) -> String {
        match self.language {
            Language::En => format!("{} fully supports {}.", package, os),
            Language::De => format!("{} unterstützt {} vollständig.", package, os),
        }
    }

    /// Warning: the running OS has only partial support.
    pub fn partial_os_support(&self, package: &str, os: &str) -> String {
        match self.language {
            Language::En => format!("{} has only partial support for {}.", package, os),
            Language::De => format!("{} unterstützt {} nur teilweise.", package, os),
        }
    }

    /// Advisory: the running OS appears in no declared support set.
    pub fn unknown_os_support(&self, package: &str, os: &str) -> String {
        match self.language {
            Language::En => format!("{}: support for {} is unknown.", package, os),
            Language::De => format!(
                "{}: ob {} unterstützt wird, ist unbekannt.",
                package, os
            ),
        }
    }

    /// Fatal: the running OS is declared incompatible.
    pub fn incompatible_os(&self, package: &str, os: &str) -> String {
        match self.language {
            Language::En => format!("{} is incompatible with {}.", os, package),
            Language::De => format!("{} ist inkompatibel mit {}.", os, package),
        }
    }

    /// Reminder to check for package updates.
    pub fn check_for_updates(&self, package: &str, days_since_release: i64) -> String {
        match self.language {
            Language::En => format!(
                "Your version of {} was released {} days ago. There could be \
                 updates and security fixes.",
                package, days_since_release
            ),
            Language::De => format!(
                "Ihre Version von {} wurde vor {} Tagen veröffentlicht. Updates \
                 und Security-Fixes könnten bereit stehen.",
                package, days_since_release
            ),
        }
    }
}
