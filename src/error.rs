//! Error types for compatibility checks.
//!
//! This module defines [`CompatError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! Three families of errors exist:
//!
//! - Configuration errors (`BadDate`, `BadVersionFormat`, `MissingParameter`,
//!   `InvalidNagPolicy`, `UnsupportedLanguage`) surface while the declaration
//!   is parsed and validated, before any check runs.
//! - `ParameterContradiction` is raised by the pre-check gate when the
//!   declared OS-support sets overlap.
//! - Fatal incompatibilities (`IncompatibleInterpreter`, `InterpreterTooOld`,
//!   `IncompatibleOs`) are raised at the checkpoint that detects them. Their
//!   display text is localized to the configured message language.

use thiserror::Error;

/// Core error type for compatibility checks.
#[derive(Debug, Error)]
pub enum CompatError {
    /// A version string did not match `major.minor[.release_level]`.
    #[error("Cannot parse version string '{input}'")]
    BadVersionFormat { input: String },

    /// A release date string was not a valid ISO `YYYY-MM-DD` date.
    #[error("Cannot parse release date '{input}': expected YYYY-MM-DD")]
    BadDate { input: String },

    /// A required parameter was missing or empty after trimming.
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: &'static str },

    /// The nag policy holds an out-of-range value.
    #[error("Invalid nag policy: {message}")]
    InvalidNagPolicy { message: String },

    /// The requested message language has no catalog.
    #[error("Unsupported message language '{requested}': use 'en' or 'de'")]
    UnsupportedLanguage { requested: String },

    /// An OS name is none of the three supported groups.
    #[error("Invalid system '{name}': use Linux, MacOS, or Windows")]
    UnknownOsGroup { name: String },

    /// Two or more declared parameters contradict each other.
    #[error("Contradictory configuration: {message}")]
    ParameterContradiction { message: String },

    /// The running interpreter version is on the incompatibility list.
    #[error("{message}")]
    IncompatibleInterpreter { package: String, message: String },

    /// The running interpreter version is below the declared minimum.
    #[error("{message}")]
    InterpreterTooOld { package: String, message: String },

    /// The running operating system is declared incompatible.
    #[error("{message}")]
    IncompatibleOs { package: String, message: String },
}

impl CompatError {
    /// Whether this error is a fatal incompatibility of the running
    /// environment, as opposed to a broken declaration.
    pub fn is_incompatibility(&self) -> bool {
        matches!(
            self,
            CompatError::IncompatibleInterpreter { .. }
                | CompatError::InterpreterTooOld { .. }
                | CompatError::IncompatibleOs { .. }
        )
    }
}

/// Result type alias for compatibility checks.
pub type Result<T> = std::result::Result<T, CompatError>;
