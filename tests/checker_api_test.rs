//! Integration tests for the checker public API: the full evaluation
//! pipeline from declaration to report.

use chrono::NaiveDate;
use compatibility::{
    AdvisoryKind, CompatError, CompatReport, CompatibilityChecker, CompatibilityConfig, Language,
    OsGroup, OsSupport, RandomSource, RuntimeEnvironment, Severity,
};

/// Random source returning a fixed value in [0, 100).
struct FixedRandom(u8);

impl RandomSource for FixedRandom {
    fn roll_percent(&mut self) -> u8 {
        self.0
    }
}

fn config() -> CompatibilityConfig {
    CompatibilityConfig::new("test", "1", "2021-01-01").unwrap()
}

fn env(version: &str) -> RuntimeEnvironment {
    RuntimeEnvironment::new(version).unwrap().with_os(None)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()
}

fn run(checker: &CompatibilityChecker, env: &RuntimeEnvironment) -> compatibility::Result<CompatReport> {
    checker.check_with(env, &mut FixedRandom(0), today())
}

#[test]
fn plain_declaration_passes_and_logs_version_info() {
    let checker = CompatibilityChecker::new(config()).unwrap();
    let report = run(&checker, &env("3.10")).unwrap();
    assert!(report.has(AdvisoryKind::VersionInfo));
    let advisory = &report.advisories[0];
    assert_eq!(advisory.severity, Severity::Info);
    assert!(advisory.message.contains("test"));
    assert!(advisory.message.contains("2021-01-01"));
}

#[test]
fn two_component_block_matches_any_release_level() {
    let config = config().incompatible_version("3.5").unwrap();
    let checker = CompatibilityChecker::new(config).unwrap();
    let err = run(&checker, &env("3.5.alpha")).unwrap_err();
    assert!(matches!(err, CompatError::IncompatibleInterpreter { .. }));
}

#[test]
fn three_component_block_requires_exact_release_level() {
    let config = config().incompatible_version("3.5.beta").unwrap();
    let checker = CompatibilityChecker::new(config).unwrap();
    assert!(run(&checker, &env("3.5.alpha")).is_ok());
    assert!(run(&checker, &env("3.5.beta")).is_err());
}

#[test]
fn too_old_interpreter_fails_fatally() {
    let config = config().min_version("3.8").unwrap();
    let checker = CompatibilityChecker::new(config).unwrap();
    let err = run(&checker, &env("3.7.final")).unwrap_err();
    assert!(matches!(err, CompatError::InterpreterTooOld { .. }));
    assert!(err.is_incompatibility());
}

#[test]
fn minimum_version_admits_any_release_level_of_itself() {
    let config = config().min_version("3.8").unwrap();
    let checker = CompatibilityChecker::new(config).unwrap();
    assert!(run(&checker, &env("3.8.alpha")).is_ok());
}

#[test]
fn newer_than_tested_is_a_warning_not_an_error() {
    let config = config().max_tested_version("3.9").unwrap();
    let checker = CompatibilityChecker::new(config).unwrap();
    let report = run(&checker, &env("3.10")).unwrap();
    assert!(report.has(AdvisoryKind::UntestedInterpreter));
}

#[test]
fn running_version_with_numeric_micro_gets_untested_warning() {
    // Runtimes report "3.10.0"-style strings; the micro must not break
    // parsing, and the newer-than-tested outcome must stay non-fatal.
    let config = config().max_tested_version("3.9").unwrap();
    let checker = CompatibilityChecker::new(config).unwrap();
    let report = run(&checker, &env("3.10.0")).unwrap();
    assert!(report.has(AdvisoryKind::UntestedInterpreter));
}

#[test]
fn os_support_matrix() {
    let support = OsSupport::parse(&["Linux"], &["Windows"], &["MacOS"]).unwrap();
    let checker = CompatibilityChecker::new(config().os_support(support)).unwrap();
    let base = env("3.10");

    // incompatible OS: fatal
    let err = run(&checker, &base.clone().with_os(Some(OsGroup::MacOS))).unwrap_err();
    assert!(matches!(err, CompatError::IncompatibleOs { .. }));
    assert!(err.to_string().contains("incompatible"));

    // partial: warning only
    let report = run(&checker, &base.clone().with_os(Some(OsGroup::Windows))).unwrap();
    assert!(report.has(AdvisoryKind::PartialOsSupport));
    assert!(!report.has(AdvisoryKind::FullOsSupport));

    // full: informational only
    let report = run(&checker, &base.clone().with_os(Some(OsGroup::Linux))).unwrap();
    let advisory = report
        .advisories
        .iter()
        .find(|a| a.kind == AdvisoryKind::FullOsSupport)
        .unwrap();
    assert_eq!(advisory.severity, Severity::Debug);
    assert!(advisory.message.contains("fully supports Linux"));

    // OS outside every declared set: distinct unknown advisory
    let report = run(&checker, &base.with_os(None)).unwrap();
    assert!(report.has(AdvisoryKind::UnknownOsSupport));
}

#[test]
fn undeclared_os_yields_unknown_advisory() {
    let support = OsSupport {
        full: [OsGroup::Windows].into(),
        ..OsSupport::default()
    };
    let checker = CompatibilityChecker::new(config().os_support(support)).unwrap();
    let report = run(&checker, &env("3.10").with_os(Some(OsGroup::Linux))).unwrap();
    let advisory = report
        .advisories
        .iter()
        .find(|a| a.kind == AdvisoryKind::UnknownOsSupport)
        .unwrap();
    assert!(advisory.message.contains("support for Linux is unknown"));
}

#[test]
fn contradictory_os_declaration_fails_before_any_advisory() {
    let contradiction = OsSupport {
        full: [OsGroup::Linux].into(),
        incompatible: [OsGroup::Linux].into(),
        ..OsSupport::default()
    };
    let err = CompatibilityChecker::new(config().os_support(contradiction)).unwrap_err();
    assert!(matches!(err, CompatError::ParameterContradiction { .. }));
}

#[test]
fn nag_at_full_probability_always_reminds_past_threshold() {
    let config = config().nag_policy(3, 100);
    let checker = CompatibilityChecker::new(config).unwrap();
    // even the highest draw cannot suppress it
    let report = checker
        .check_with(&env("3.10"), &mut FixedRandom(99), today())
        .unwrap();
    assert!(report.has(AdvisoryKind::UpdateReminder));
}

#[test]
fn nag_at_zero_probability_never_reminds() {
    let config = config().nag_policy(0, 0);
    let checker = CompatibilityChecker::new(config).unwrap();
    let report = checker
        .check_with(&env("3.10"), &mut FixedRandom(0), today())
        .unwrap();
    assert!(!report.has(AdvisoryKind::UpdateReminder));
}

#[test]
fn absent_nag_policy_skips_the_check() {
    let checker = CompatibilityChecker::new(config()).unwrap();
    let report = run(&checker, &env("3.10")).unwrap();
    assert!(!report.has(AdvisoryKind::UpdateReminder));
}

#[test]
fn malformed_release_date_fails_before_any_check() {
    let err = CompatibilityConfig::new("test", "1", "2021/01/01").unwrap_err();
    assert!(matches!(err, CompatError::BadDate { .. }));
}

#[test]
fn german_catalog_is_selected_per_call() {
    let config = config()
        .nag_policy(3, 100)
        .language_messages("de")
        .unwrap();
    assert_eq!(config.language, Language::De);
    let checker = CompatibilityChecker::new(config).unwrap();
    let report = run(&checker, &env("3.10")).unwrap();
    let reminder = report
        .advisories
        .iter()
        .find(|a| a.kind == AdvisoryKind::UpdateReminder)
        .unwrap();
    assert!(reminder.message.contains("Tagen"));
}

#[test]
fn evaluation_is_idempotent_modulo_the_draw() {
    let support = OsSupport {
        partial: [OsGroup::Windows].into(),
        ..OsSupport::default()
    };
    let config = config()
        .min_version("3.0")
        .unwrap()
        .max_tested_version("3.9")
        .unwrap()
        .os_support(support)
        .nag_policy(3, 100);
    let checker = CompatibilityChecker::new(config).unwrap();
    let env = env("3.10").with_os(Some(OsGroup::Windows));

    let first = run(&checker, &env).unwrap();
    let second = run(&checker, &env).unwrap();

    let kinds = |r: &CompatReport| r.advisories.iter().map(|a| a.kind).collect::<Vec<_>>();
    assert_eq!(kinds(&first), kinds(&second));
    assert!(first.has(AdvisoryKind::UntestedInterpreter));
    assert!(first.has(AdvisoryKind::PartialOsSupport));
    assert!(first.has(AdvisoryKind::UpdateReminder));
}

#[test]
fn version_fatal_surfaces_before_os_fatal() {
    // Both families fail; the version family is evaluated first.
    let support = OsSupport {
        incompatible: [OsGroup::Linux].into(),
        ..OsSupport::default()
    };
    let config = config().min_version("9.0").unwrap().os_support(support);
    let checker = CompatibilityChecker::new(config).unwrap();
    let err = run(&checker, &env("3.10").with_os(Some(OsGroup::Linux))).unwrap_err();
    assert!(matches!(err, CompatError::InterpreterTooOld { .. }));
}

#[test]
fn declaration_deserialized_from_json_runs_end_to_end() {
    let config: CompatibilityConfig = serde_json::from_str(
        r#"{
            "package_name": "demo",
            "package_version": "2.0.1",
            "release_date": "2021-01-01",
            "min_version": "3.6",
            "max_tested_version": "3.9",
            "incompatible_versions": ["3.7.alpha"],
            "nag_policy": {"days_after_release": 3, "probability_percent": 100},
            "os_support": {"full": ["Linux"], "partial": ["Windows"], "incompatible": ["MacOS"]}
        }"#,
    )
    .unwrap();
    let checker = CompatibilityChecker::new(config).unwrap();
    let report = run(&checker, &env("3.8").with_os(Some(OsGroup::Linux))).unwrap();
    assert!(report.has(AdvisoryKind::VersionInfo));
    assert!(report.has(AdvisoryKind::FullOsSupport));
    assert!(report.has(AdvisoryKind::UpdateReminder));

    let err = run(&checker, &env("3.7.alpha").with_os(Some(OsGroup::Linux))).unwrap_err();
    assert!(matches!(err, CompatError::IncompatibleInterpreter { .. }));
}
