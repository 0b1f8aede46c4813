//! Configuration system for solvescope.
//!
//! Load analyzer configuration from TOML or YAML to control numerical
//! tolerances, tightness normalisation and severity tiers without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use solvescope_config::AnalyzerConfig;
//! use solvescope_core::Severity;
//!
//! let config = AnalyzerConfig::from_toml_str(r#"
//!     [tolerance]
//!     absolute = 1e-3
//!
//!     [tightness]
//!     binding_threshold = 0.8
//!
//!     [[severity.tiers]]
//!     severity = "critical"
//!     threshold = 0.05
//!
//!     [[severity.tiers]]
//!     severity = "high"
//!     threshold = 0.005
//! "#).unwrap();
//!
//! assert_eq!(config.tolerance.absolute, 1e-3);
//! assert_eq!(config.tightness.binding_threshold, 0.8);
//! assert_eq!(config.severity.tiers[0].severity, Severity::Critical);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use solvescope_config::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::load("solvescope.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use solvescope_core::Severity;
use thiserror::Error;

/// Default absolute violation tolerance.
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-6;

/// Default relative violation tolerance, applied to `|bound|`.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Default lower limit of the slack normalisation scale.
pub const DEFAULT_NORMALIZATION_FLOOR: f64 = 1.0;

/// Default tightness score at or above which a constraint is binding.
pub const DEFAULT_BINDING_THRESHOLD: f64 = 0.5;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main analyzer configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalyzerConfig {
    /// Numerical tolerance for violation detection.
    #[serde(default)]
    pub tolerance: ToleranceConfig,

    /// Tightness scoring configuration.
    #[serde(default)]
    pub tightness: TightnessConfig,

    /// Severity classification table.
    #[serde(default)]
    pub severity: SeverityConfig,
}

impl AnalyzerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the absolute violation tolerance.
    pub fn with_absolute_tolerance(mut self, absolute: f64) -> Self {
        self.tolerance.absolute = absolute;
        self
    }

    /// Sets the relative violation tolerance.
    pub fn with_relative_tolerance(mut self, relative: f64) -> Self {
        self.tolerance.relative = relative;
        self
    }

    /// Sets the binding threshold.
    pub fn with_binding_threshold(mut self, threshold: f64) -> Self {
        self.tightness.binding_threshold = threshold;
        self
    }

    /// Sets the normalisation floor.
    pub fn with_normalization_floor(mut self, floor: f64) -> Self {
        self.tightness.normalization_floor = floor;
        self
    }

    /// Replaces the severity tiers.
    pub fn with_severity_tiers(mut self, tiers: Vec<SeverityTierConfig>) -> Self {
        self.severity.tiers = tiers;
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// Severity thresholds must be strictly descending and severities strictly
    /// decreasing, so a larger violation never lands in a milder tier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tol = &self.tolerance;
        if !(tol.absolute.is_finite() && tol.absolute >= 0.0) {
            return Err(invalid(format!(
                "absolute tolerance must be finite and non-negative, got {}",
                tol.absolute
            )));
        }
        if !(tol.relative.is_finite() && tol.relative >= 0.0) {
            return Err(invalid(format!(
                "relative tolerance must be finite and non-negative, got {}",
                tol.relative
            )));
        }

        let tight = &self.tightness;
        if !(tight.normalization_floor.is_finite() && tight.normalization_floor > 0.0) {
            return Err(invalid(format!(
                "normalization floor must be finite and positive, got {}",
                tight.normalization_floor
            )));
        }
        if !(tight.binding_threshold > 0.0 && tight.binding_threshold <= 1.0) {
            return Err(invalid(format!(
                "binding threshold must be in (0, 1], got {}",
                tight.binding_threshold
            )));
        }

        for tier in &self.severity.tiers {
            if !(tier.threshold.is_finite() && tier.threshold >= 0.0) {
                return Err(invalid(format!(
                    "severity threshold for {} must be finite and non-negative, got {}",
                    tier.severity, tier.threshold
                )));
            }
        }
        for pair in self.severity.tiers.windows(2) {
            if pair[1].threshold >= pair[0].threshold {
                return Err(invalid(format!(
                    "severity thresholds must be strictly descending: {} ({}) then {} ({})",
                    pair[0].severity, pair[0].threshold, pair[1].severity, pair[1].threshold
                )));
            }
            if pair[1].severity >= pair[0].severity {
                return Err(invalid(format!(
                    "severity tiers must go from most to least severe: {} then {}",
                    pair[0].severity, pair[1].severity
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

/// Numerical tolerance for violation detection.
///
/// A crossing counts only when it exceeds `max(absolute, relative * |bound|)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ToleranceConfig {
    #[serde(default = "default_absolute")]
    pub absolute: f64,

    #[serde(default = "default_relative")]
    pub relative: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            absolute: DEFAULT_ABSOLUTE_TOLERANCE,
            relative: DEFAULT_RELATIVE_TOLERANCE,
        }
    }
}

/// Tightness scoring configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TightnessConfig {
    /// Lower limit of `|bound|` when normalising slack.
    #[serde(default = "default_floor")]
    pub normalization_floor: f64,

    /// Score at or above which a constraint counts as binding.
    #[serde(default = "default_threshold")]
    pub binding_threshold: f64,
}

impl Default for TightnessConfig {
    fn default() -> Self {
        Self {
            normalization_floor: DEFAULT_NORMALIZATION_FLOOR,
            binding_threshold: DEFAULT_BINDING_THRESHOLD,
        }
    }
}

/// Ordered severity table. Violations below every tier are LOW.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SeverityConfig {
    #[serde(default = "default_tiers")]
    pub tiers: Vec<SeverityTierConfig>,
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
        }
    }
}

/// One row of the severity table: fractions above `threshold` get `severity`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SeverityTierConfig {
    pub severity: Severity,
    pub threshold: f64,
}

impl SeverityTierConfig {
    pub fn new(severity: Severity, threshold: f64) -> Self {
        Self {
            severity,
            threshold,
        }
    }
}

fn default_absolute() -> f64 {
    DEFAULT_ABSOLUTE_TOLERANCE
}

fn default_relative() -> f64 {
    DEFAULT_RELATIVE_TOLERANCE
}

fn default_floor() -> f64 {
    DEFAULT_NORMALIZATION_FLOOR
}

fn default_threshold() -> f64 {
    DEFAULT_BINDING_THRESHOLD
}

fn default_tiers() -> Vec<SeverityTierConfig> {
    vec![
        SeverityTierConfig::new(Severity::Critical, 0.01),
        SeverityTierConfig::new(Severity::High, 0.001),
        SeverityTierConfig::new(Severity::Medium, 0.0001),
    ]
}

#[cfg(test)]
mod tests;
