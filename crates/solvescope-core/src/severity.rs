//! Severity tiers for constraint violations.

use std::fmt;

/// Discrete classification of how badly a bound is crossed.
///
/// Ordered from least to most severe, so `Severity::Critical > Severity::Low`.
///
/// # Example
///
/// ```
/// use solvescope_core::Severity;
///
/// assert!(Severity::Critical > Severity::High);
/// assert!(Severity::Medium > Severity::Low);
/// assert_eq!(Severity::High.to_string(), "HIGH");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All tiers, most severe first.
    pub const DESCENDING: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Returns the uppercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
