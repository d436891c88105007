//! Compatibility - runtime compatibility checks for library authors.
//!
//! A package declares which interpreter version range, release channels, and
//! operating-system families it supports; the checker evaluates the running
//! environment against that declaration once, at an explicit call site. Hard
//! incompatibilities come back as errors, everything else is logged through
//! `tracing` as localized advisories (English or German) and returned for
//! inspection.
//!
//! # Modules
//!
//! - [`checker`] - Policy evaluation, advisories, and the update-nag draw
//! - [`config`] - Compatibility declarations and their validation
//! - [`environment`] - Running interpreter version and OS-group detection
//! - [`error`] - Error types and result alias
//! - [`messages`] - Localized message catalog
//! - [`version`] - Version-string parsing and comparison rules
//!
//! # Example
//!
//! ```
//! use compatibility::{CompatibilityChecker, CompatibilityConfig, RuntimeEnvironment};
//!
//! # fn main() -> compatibility::Result<()> {
//! let config = CompatibilityConfig::new("demo", "2.0.1", "2026-05-01")?
//!     .min_version("3.8")?
//!     .max_tested_version("3.12")?
//!     .incompatible_version("3.9.alpha")?;
//!
//! let checker = CompatibilityChecker::new(config)?;
//! let report = checker.check(&RuntimeEnvironment::new("3.10.final")?)?;
//! assert!(!report.advisories.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! Call the checker from application code after the logging subscriber is
//! installed, never from static initializers; the crate itself configures no
//! logging.

pub mod checker;
pub mod config;
pub mod environment;
pub mod error;
pub mod messages;
pub mod version;

pub use checker::{
    Advisory, AdvisoryKind, CompatReport, CompatibilityChecker, DefaultRandom, RandomSource,
    Severity,
};
pub use config::{CompatibilityConfig, NagPolicy, OsSupport, ReleaseDate};
pub use environment::{OsGroup, RuntimeEnvironment};
pub use error::{CompatError, Result};
pub use messages::{Language, MessageCatalog};
pub use version::{ReleaseLevel, VersionSpec};
