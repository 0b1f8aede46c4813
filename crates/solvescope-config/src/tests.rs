//! Tests for analyzer configuration.

use super::*;

#[test]
fn test_defaults() {
    let config = AnalyzerConfig::new();
    assert_eq!(config.tolerance.absolute, 1e-6);
    assert_eq!(config.tolerance.relative, 1e-9);
    assert_eq!(config.tightness.normalization_floor, 1.0);
    assert_eq!(config.tightness.binding_threshold, 0.5);
    assert_eq!(config.severity.tiers.len(), 3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [tolerance]
        absolute = 0.001
        relative = 0.0

        [tightness]
        normalization_floor = 0.5
        binding_threshold = 0.9
    "#;

    let config = AnalyzerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.tolerance.absolute, 0.001);
    assert_eq!(config.tolerance.relative, 0.0);
    assert_eq!(config.tightness.normalization_floor, 0.5);
    assert_eq!(config.tightness.binding_threshold, 0.9);
    // Unspecified sections keep their defaults.
    assert_eq!(config.severity, SeverityConfig::default());
}

#[test]
fn test_partial_section_keeps_field_defaults() {
    let config = AnalyzerConfig::from_toml_str("[tolerance]\nabsolute = 0.01\n").unwrap();
    assert_eq!(config.tolerance.relative, DEFAULT_RELATIVE_TOLERANCE);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        tolerance:
          absolute: 0.0001
        severity:
          tiers:
            - severity: critical
              threshold: 1.0
            - severity: high
              threshold: 0.1
            - severity: medium
              threshold: 0.01
            - severity: low
              threshold: 0.0
    "#;

    let config = AnalyzerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.tolerance.absolute, 0.0001);
    assert_eq!(config.severity.tiers.len(), 4);
    assert_eq!(config.severity.tiers[3].severity, Severity::Low);
}

#[test]
fn test_builder() {
    let config = AnalyzerConfig::new()
        .with_absolute_tolerance(1e-3)
        .with_relative_tolerance(1e-6)
        .with_binding_threshold(0.75)
        .with_normalization_floor(2.0);

    assert_eq!(config.tolerance.absolute, 1e-3);
    assert_eq!(config.tolerance.relative, 1e-6);
    assert_eq!(config.tightness.binding_threshold, 0.75);
    assert_eq!(config.tightness.normalization_floor, 2.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_rejects_negative_tolerance() {
    let config = AnalyzerConfig::new().with_absolute_tolerance(-1.0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_rejects_zero_floor() {
    let config = AnalyzerConfig::new().with_normalization_floor(0.0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_rejects_threshold_out_of_range() {
    assert!(AnalyzerConfig::new()
        .with_binding_threshold(0.0)
        .validate()
        .is_err());
    assert!(AnalyzerConfig::new()
        .with_binding_threshold(1.5)
        .validate()
        .is_err());
    assert!(AnalyzerConfig::new()
        .with_binding_threshold(1.0)
        .validate()
        .is_ok());
}

#[test]
fn test_rejects_unordered_tiers() {
    let config = AnalyzerConfig::new().with_severity_tiers(vec![
        SeverityTierConfig::new(Severity::High, 0.001),
        SeverityTierConfig::new(Severity::Critical, 0.01),
    ]);
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_inverted_severities() {
    let config = AnalyzerConfig::new().with_severity_tiers(vec![
        SeverityTierConfig::new(Severity::Medium, 0.01),
        SeverityTierConfig::new(Severity::Critical, 0.001),
    ]);
    assert!(config.validate().is_err());
}

#[test]
fn test_invalid_toml_is_rejected_on_load() {
    let err = AnalyzerConfig::from_toml_str("[tightness]\nbinding_threshold = 2.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        AnalyzerConfig::load("/nonexistent/solvescope.toml"),
        Err(ConfigError::Io(_))
    ));
}
