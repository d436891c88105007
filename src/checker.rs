//! The compatibility checker: policy evaluation and outcome emission.
//!
//! A [`CompatibilityChecker`] validates one declaration up front, then
//! evaluates one running environment against it. Checkpoints run in a fixed
//! order: interpreter version policy, the version-info line, OS support
//! policy, update-nag policy. Version fatals therefore surface before OS
//! fatals. Advisories never abort evaluation; they are logged through
//! `tracing` and collected into a [`CompatReport`] so hosts and tests can
//! observe outcomes without a log subscriber.
//!
//! # Usage contract
//!
//! Run the check explicitly from application code, after logging is
//! configured — never from static initializers. The crate itself installs no
//! `tracing` subscriber.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::config::CompatibilityConfig;
use crate::environment::RuntimeEnvironment;
use crate::error::{CompatError, Result};
use crate::messages::MessageCatalog;

/// Uniform source for the update-reminder draw.
///
/// Injected so tests can substitute a deterministic source and assert both
/// branches of the probabilistic reminder.
pub trait RandomSource {
    /// One uniform integer in `[0, 100)`.
    fn roll_percent(&mut self) -> u8;
}

/// Default random source, backed by `fastrand`.
#[derive(Debug, Default)]
pub struct DefaultRandom;

impl RandomSource for DefaultRandom {
    fn roll_percent(&mut self) -> u8 {
        fastrand::u8(0..100)
    }
}

/// What kind of advisory was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryKind {
    /// Package name, version, and release date confirmation.
    VersionInfo,
    /// Running interpreter is newer than anything tested.
    UntestedInterpreter,
    /// Running OS is fully supported.
    FullOsSupport,
    /// Running OS has only partial support.
    PartialOsSupport,
    /// Running OS appears in no declared support set.
    UnknownOsSupport,
    /// Reminder to check for package updates.
    UpdateReminder,
}

/// Log level an advisory was emitted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warning,
}

/// One non-fatal outcome: logged when emitted, kept for inspection.
#[derive(Debug, Clone)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub severity: Severity,
    pub message: String,
}

/// Every advisory one evaluation emitted, in emission order.
#[derive(Debug, Clone, Default)]
pub struct CompatReport {
    pub advisories: Vec<Advisory>,
}

impl CompatReport {
    /// Whether an advisory of the given kind was emitted.
    pub fn has(&self, kind: AdvisoryKind) -> bool {
        self.advisories.iter().any(|a| a.kind == kind)
    }

    fn record(&mut self, kind: AdvisoryKind, severity: Severity, message: String) {
        match severity {
            Severity::Debug => debug!("{}", message),
            Severity::Info => info!("{}", message),
            Severity::Warning => warn!("{}", message),
        }
        self.advisories.push(Advisory {
            kind,
            severity,
            message,
        });
    }
}

/// Evaluates one validated compatibility declaration against a running
/// environment.
#[derive(Debug)]
pub struct CompatibilityChecker {
    config: CompatibilityConfig,
    catalog: MessageCatalog,
}

impl CompatibilityChecker {
    /// Validate the declaration and build a checker for it.
    ///
    /// This is the pre-check gate: a contradictory or incomplete declaration
    /// is rejected here, before any advisory can be emitted.
    pub fn new(config: CompatibilityConfig) -> Result<Self> {
        config.validate()?;
        let catalog = MessageCatalog::new(config.language);
        Ok(CompatibilityChecker { config, catalog })
    }

    /// The declaration this checker evaluates.
    pub fn config(&self) -> &CompatibilityConfig {
        &self.config
    }

    /// Evaluate the running environment against the declaration.
    ///
    /// Returns the advisories that were logged, or the first fatal
    /// incompatibility encountered.
    pub fn check(&self, env: &RuntimeEnvironment) -> Result<CompatReport> {
        self.check_with(env, &mut DefaultRandom, Utc::now().date_naive())
    }

    /// [`check`](Self::check) with an explicit random source and current
    /// date, for deterministic evaluation in tests.
    pub fn check_with(
        &self,
        env: &RuntimeEnvironment,
        random: &mut dyn RandomSource,
        today: NaiveDate,
    ) -> Result<CompatReport> {
        let mut report = CompatReport::default();
        self.check_interpreter_version(env, &mut report)?;
        self.log_version_info(&mut report);
        self.check_os_support(env, &mut report)?;
        self.check_version_age(today, random, &mut report);
        Ok(report)
    }

    /// Version policy: incompatibility list first, then the minimum version,
    /// then the non-fatal newer-than-tested warning.
    fn check_interpreter_version(
        &self,
        env: &RuntimeEnvironment,
        report: &mut CompatReport,
    ) -> Result<()> {
        let config = &self.config;
        let running = &env.version;

        if config
            .incompatible_versions
            .iter()
            .any(|blocked| blocked.matches(running))
        {
            return Err(CompatError::IncompatibleInterpreter {
                package: config.package_name.clone(),
                message: self.catalog.incompatible_interpreter(&config.package_name),
            });
        }

        if let Some(minimum) = &config.min_version {
            if running.precedes(minimum) {
                return Err(CompatError::InterpreterTooOld {
                    package: config.package_name.clone(),
                    message: self
                        .catalog
                        .interpreter_too_old(&config.package_name, minimum, running),
                });
            }
        }

        if let Some(max_tested) = &config.max_tested_version {
            if max_tested.precedes(running) {
                report.record(
                    AdvisoryKind::UntestedInterpreter,
                    Severity::Warning,
                    self.catalog.untested_interpreter(&config.package_name),
                );
            }
        }

        Ok(())
    }

    /// Info line with package name, version, and release date. Skipped when
    /// this crate checks itself, so every embedding package does not log
    /// about the helper.
    fn log_version_info(&self, report: &mut CompatReport) {
        if self.config.package_name == env!("CARGO_PKG_NAME") {
            return;
        }
        report.record(
            AdvisoryKind::VersionInfo,
            Severity::Info,
            self.catalog.version_info(
                &self.config.package_name,
                &self.config.package_version,
                self.config.release_date,
            ),
        );
    }

    /// OS policy: fatal for incompatible, warning for partial, debug-level
    /// confirmation for full, a distinct advisory when the running OS is in
    /// no declared set. Skipped silently when nothing was declared.
    fn check_os_support(&self, env: &RuntimeEnvironment, report: &mut CompatReport) -> Result<()> {
        let Some(os_support) = &self.config.os_support else {
            return Ok(());
        };
        let package = &self.config.package_name;
        let os_name = env.os_name();

        match env.os {
            Some(os) if os_support.incompatible.contains(&os) => {
                Err(CompatError::IncompatibleOs {
                    package: package.clone(),
                    message: self.catalog.incompatible_os(package, &os_name),
                })
            }
            Some(os) if os_support.partial.contains(&os) => {
                report.record(
                    AdvisoryKind::PartialOsSupport,
                    Severity::Warning,
                    self.catalog.partial_os_support(package, &os_name),
                );
                Ok(())
            }
            Some(os) if os_support.full.contains(&os) => {
                report.record(
                    AdvisoryKind::FullOsSupport,
                    Severity::Debug,
                    self.catalog.full_os_support(package, &os_name),
                );
                Ok(())
            }
            // declared sets do not mention the running OS, or the host is
            // outside the three groups entirely
            _ => {
                report.record(
                    AdvisoryKind::UnknownOsSupport,
                    Severity::Info,
                    self.catalog.unknown_os_support(package, &os_name),
                );
                Ok(())
            }
        }
    }

    /// Nag policy: once the configured number of days since release has
    /// passed, remind with the configured probability.
    fn check_version_age(
        &self,
        today: NaiveDate,
        random: &mut dyn RandomSource,
        report: &mut CompatReport,
    ) {
        let Some(nag) = &self.config.nag_policy else {
            return;
        };
        if nag.probability_percent == 0 {
            return;
        }

        let days_since_release = (today - self.config.release_date).num_days();
        if days_since_release < i64::from(nag.days_after_release) {
            return;
        }
        if nag.probability_percent == 100 || random.roll_percent() < nag.probability_percent {
            report.record(
                AdvisoryKind::UpdateReminder,
                Severity::Info,
                self.catalog
                    .check_for_updates(&self.config.package_name, days_since_release),
            );
        }
    }
}
