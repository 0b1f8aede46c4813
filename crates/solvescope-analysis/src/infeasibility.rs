//! Infeasibility detection and severity classification.
//!
//! A bound counts as crossed only when the excess is larger than
//! `max(absolute, relative * |bound|)`. Severity is looked up in an ordered
//! [`SeverityTable`] keyed by `magnitude / |bound|`, or by the raw magnitude
//! when the bound is zero.

use std::fmt;

use solvescope_config::{AnalyzerConfig, SeverityConfig, ToleranceConfig};
use solvescope_core::{
    AnalysisError, BoundSide, ConstraintEvaluator, ConstraintRef, EvaluatedConstraint,
    EvaluationFailure, ModelBackend, Result, Severity,
};
use tracing::debug;

/// Which bound a violation crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ViolationKind {
    /// Body above the upper bound.
    UpperBoundViolation,
    /// Body below the lower bound.
    LowerBoundViolation,
}

impl ViolationKind {
    /// Returns the side of the crossed bound.
    pub fn side(self) -> BoundSide {
        match self {
            Self::UpperBoundViolation => BoundSide::Upper,
            Self::LowerBoundViolation => BoundSide::Lower,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpperBoundViolation => "UPPER_BOUND_VIOLATION",
            Self::LowerBoundViolation => "LOWER_BOUND_VIOLATION",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bound crossed beyond numerical tolerance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violation {
    /// Constraint name.
    pub name: String,
    /// Which bound was crossed.
    pub kind: ViolationKind,
    /// Value of the crossed bound.
    pub bound: f64,
    /// Body value at the candidate point.
    pub body: f64,
    /// Amount by which the bound is exceeded; always positive.
    pub magnitude: f64,
    /// Severity tier.
    pub severity: Severity,
    /// Textual rendering of the constraint.
    pub expression: String,
}

impl Violation {
    /// `magnitude / |bound|`, or the raw magnitude when the bound is zero.
    pub fn relative_magnitude(&self) -> f64 {
        relative_fraction(self.magnitude, self.bound)
    }
}

/// Fraction of the bound a violation represents.
pub fn relative_fraction(magnitude: f64, bound: f64) -> f64 {
    if bound == 0.0 {
        magnitude
    } else {
        magnitude / bound.abs()
    }
}

/// Absolute plus relative numerical tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub absolute: f64,
    pub relative: f64,
}

impl Tolerance {
    pub fn new(absolute: f64, relative: f64) -> Self {
        Self { absolute, relative }
    }

    /// Purely absolute tolerance.
    pub fn absolute(absolute: f64) -> Self {
        Self::new(absolute, 0.0)
    }

    /// Smallest excess over `bound` that counts as a violation.
    pub fn threshold(&self, bound: f64) -> f64 {
        self.absolute.max(self.relative * bound.abs())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::from(&ToleranceConfig::default())
    }
}

impl From<&ToleranceConfig> for Tolerance {
    fn from(config: &ToleranceConfig) -> Self {
        Self::new(config.absolute, config.relative)
    }
}

/// One row of a [`SeverityTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityTier {
    /// Fractions strictly above this get `severity`.
    pub threshold: f64,
    pub severity: Severity,
}

/// Ordered (threshold, severity) table.
///
/// Tiers are tried from the highest threshold down; the first one exceeded
/// wins. Anything below every tier is [`Severity::Low`].
///
/// # Example
///
/// ```
/// use solvescope_analysis::SeverityTable;
/// use solvescope_core::Severity;
///
/// let table = SeverityTable::default();
/// assert_eq!(table.classify(0.3125), Severity::Critical);
/// assert_eq!(table.classify(0.005), Severity::High);
/// assert_eq!(table.classify(0.0005), Severity::Medium);
/// assert_eq!(table.classify(0.00001), Severity::Low);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeverityTable {
    tiers: Vec<SeverityTier>,
}

impl SeverityTable {
    /// Builds a table; tiers are sorted by threshold, highest first.
    pub fn new(mut tiers: Vec<SeverityTier>) -> Self {
        tiers.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
        Self { tiers }
    }

    /// Returns the tiers, highest threshold first.
    pub fn tiers(&self) -> &[SeverityTier] {
        &self.tiers
    }

    /// Classifies a relative magnitude.
    pub fn classify(&self, fraction: f64) -> Severity {
        self.tiers
            .iter()
            .find(|tier| fraction > tier.threshold)
            .map_or(Severity::Low, |tier| tier.severity)
    }
}

impl Default for SeverityTable {
    fn default() -> Self {
        Self::from(&SeverityConfig::default())
    }
}

impl From<&SeverityConfig> for SeverityTable {
    fn from(config: &SeverityConfig) -> Self {
        Self::new(
            config
                .tiers
                .iter()
                .map(|t| SeverityTier {
                    threshold: t.threshold,
                    severity: t.severity,
                })
                .collect(),
        )
    }
}

/// Violations of a model plus the constraints that could not be checked.
#[derive(Debug, Clone, Default)]
pub struct Scan {
    /// Violations in declaration order.
    pub violations: Vec<Violation>,
    /// Constraints that failed evaluation.
    pub failures: Vec<EvaluationFailure>,
}

impl Scan {
    /// Returns true if no violation was found.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Detects violated constraints and classifies them.
#[derive(Debug, Clone, Default)]
pub struct InfeasibilityDetector {
    tolerance: Tolerance,
    severity: SeverityTable,
}

impl InfeasibilityDetector {
    /// Creates a detector with default tolerance and severity table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detector from configuration.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            tolerance: Tolerance::from(&config.tolerance),
            severity: SeverityTable::from(&config.severity),
        }
    }

    /// Replaces the tolerance.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replaces the severity table.
    pub fn with_severity_table(mut self, severity: SeverityTable) -> Self {
        self.severity = severity;
        self
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn severity_table(&self) -> &SeverityTable {
        &self.severity
    }

    /// Checks one evaluated constraint.
    ///
    /// Returns `Ok(None)` when the constraint holds within tolerance.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::NonFiniteBody`] if the body is NaN or infinite, or its
    /// excess over a bound overflows.
    pub fn check(&self, evaluated: &EvaluatedConstraint) -> Result<Option<Violation>> {
        let body = evaluated.body();
        if !body.is_finite() {
            return Err(AnalysisError::NonFiniteBody {
                constraint: evaluated.name().to_string(),
                value: body,
            });
        }

        let mut crossed = None;
        for (kind, bound) in [
            (ViolationKind::UpperBoundViolation, evaluated.upper()),
            (ViolationKind::LowerBoundViolation, evaluated.lower()),
        ] {
            let Some(bound) = bound else { continue };
            let excess = match kind {
                ViolationKind::UpperBoundViolation => body - bound,
                ViolationKind::LowerBoundViolation => bound - body,
            };
            if !excess.is_finite() {
                return Err(AnalysisError::NonFiniteBody {
                    constraint: evaluated.name().to_string(),
                    value: excess,
                });
            }
            if crossed.is_none() && excess > self.tolerance.threshold(bound) {
                crossed = Some((kind, bound, excess));
            }
        }

        let Some((kind, bound, magnitude)) = crossed else {
            return Ok(None);
        };
        let severity = self.severity.classify(relative_fraction(magnitude, bound));

        debug!(
            constraint = evaluated.name(),
            kind = kind.as_str(),
            magnitude,
            severity = severity.as_str(),
            "Constraint violated"
        );

        Ok(Some(Violation {
            name: evaluated.name().to_string(),
            kind,
            bound,
            body,
            magnitude,
            severity,
            expression: evaluated.describe(),
        }))
    }

    /// Evaluates and checks a single constraint of a model.
    pub fn check_ref<B: ModelBackend + ?Sized>(
        &self,
        backend: &B,
        constraint: &ConstraintRef,
    ) -> Result<Option<Violation>> {
        let evaluated = ConstraintEvaluator::new(backend).evaluate(constraint)?;
        self.check(&evaluated)
    }

    /// Checks already evaluated constraints, keeping their order.
    pub fn scan_evaluated(&self, evaluated: &[EvaluatedConstraint]) -> Vec<Violation> {
        evaluated
            .iter()
            .filter_map(|ec| self.check(ec).ok().flatten())
            .collect()
    }

    /// Evaluates and checks every constraint of a model.
    ///
    /// An empty result is the normal, feasible case.
    pub fn scan<B: ModelBackend + ?Sized>(&self, backend: &B) -> Scan {
        let pass = ConstraintEvaluator::new(backend).evaluate_all();
        Scan {
            violations: self.scan_evaluated(&pass.evaluated),
            failures: pass.failures,
        }
    }
}
