//! Tightness scoring.
//!
//! Raw slack is the signed distance to the nearest finite bound. It is
//! divided by `max(|bound|, floor)` so constraints in different units compare,
//! and mapped to a score with `exp(-|normalized|)`: 1.0 exactly on the bound,
//! decaying towards 0 as the constraint loosens.

use std::cmp::Ordering;

use solvescope_config::TightnessConfig;
use solvescope_core::{
    AnalysisError, BoundSide, ConstraintEvaluator, EvaluatedConstraint, EvaluationFailure,
    ModelBackend, Result,
};
use tracing::debug;

/// Tightness of one constraint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TightnessResult {
    /// Constraint name.
    pub name: String,
    /// Side of the nearest bound.
    pub side: BoundSide,
    /// Value of the nearest bound.
    pub bound: f64,
    /// Signed distance to the nearest bound; negative when crossed.
    pub raw_slack: f64,
    /// Raw slack divided by the normalisation scale.
    pub normalized_slack: f64,
    /// `exp(-|normalized_slack|)`, in (0, 1].
    pub score: f64,
    /// Dual value, if the backend exposed one.
    pub dual: Option<f64>,
}

impl TightnessResult {
    /// Returns true if the score meets the threshold.
    pub fn is_binding(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}

/// Orders results by score descending, then name ascending.
pub fn compare_tightness(a: &TightnessResult, b: &TightnessResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.name.cmp(&b.name))
}

/// Scored constraints of a model plus the ones that could not be scored.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    /// Results at or above the threshold, tightest first.
    pub results: Vec<TightnessResult>,
    /// Constraints without a finite bound.
    pub unbounded: Vec<String>,
    /// Constraints that failed evaluation.
    pub failures: Vec<EvaluationFailure>,
}

/// Computes and ranks tightness scores.
///
/// # Example
///
/// ```
/// use solvescope_analysis::TightnessAnalyzer;
/// use solvescope_core::{Bounds, EvaluatedConstraint};
///
/// let analyzer = TightnessAnalyzer::new();
/// let c1 = EvaluatedConstraint::new("c1", 5.8, Bounds::at_least(5.0));
/// let result = analyzer.score(&c1).unwrap();
/// assert!((result.normalized_slack - 0.16).abs() < 1e-9);
/// assert!((result.score - (-0.16f64).exp()).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TightnessAnalyzer {
    normalization_floor: f64,
}

impl Default for TightnessAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TightnessAnalyzer {
    /// Creates an analyzer with the default normalisation floor.
    pub fn new() -> Self {
        Self::from_config(&TightnessConfig::default())
    }

    /// Creates an analyzer from configuration.
    pub fn from_config(config: &TightnessConfig) -> Self {
        Self::with_floor(config.normalization_floor)
    }

    /// Creates an analyzer with a custom normalisation floor.
    ///
    /// Non-positive or non-finite floors fall back to 1.0.
    pub fn with_floor(floor: f64) -> Self {
        let normalization_floor = if floor.is_finite() && floor > 0.0 {
            floor
        } else {
            1.0
        };
        Self {
            normalization_floor,
        }
    }

    /// Returns the normalisation floor.
    pub fn normalization_floor(&self) -> f64 {
        self.normalization_floor
    }

    /// Scale used to normalise slack against `bound`.
    pub fn normalization_scale(&self, bound: f64) -> f64 {
        bound.abs().max(self.normalization_floor)
    }

    /// Scores a single constraint.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::Unbounded`] if no bound is finite.
    /// - [`AnalysisError::NonFiniteBody`] if the body is NaN or infinite, or
    ///   its distance to the bound overflows.
    pub fn score(&self, evaluated: &EvaluatedConstraint) -> Result<TightnessResult> {
        if !evaluated.body().is_finite() {
            return Err(AnalysisError::NonFiniteBody {
                constraint: evaluated.name().to_string(),
                value: evaluated.body(),
            });
        }
        let active = evaluated
            .nearest_bound()
            .ok_or_else(|| AnalysisError::Unbounded {
                constraint: evaluated.name().to_string(),
            })?;
        if !active.slack.is_finite() {
            return Err(AnalysisError::NonFiniteBody {
                constraint: evaluated.name().to_string(),
                value: active.slack,
            });
        }

        let normalized_slack = active.slack / self.normalization_scale(active.value);
        // exp underflows to 0.0 past ~745; scores stay strictly positive.
        let score = (-normalized_slack.abs()).exp().max(f64::MIN_POSITIVE);

        debug!(
            constraint = evaluated.name(),
            raw_slack = active.slack,
            normalized_slack,
            score,
            "Constraint scored"
        );

        Ok(TightnessResult {
            name: evaluated.name().to_string(),
            side: active.side,
            bound: active.value,
            raw_slack: active.slack,
            normalized_slack,
            score,
            dual: evaluated.dual(),
        })
    }

    /// Scores every constraint that has a finite bound, tightest first.
    pub fn score_all(&self, evaluated: &[EvaluatedConstraint]) -> Vec<TightnessResult> {
        let mut results: Vec<_> = evaluated
            .iter()
            .filter_map(|ec| self.score(ec).ok())
            .collect();
        results.sort_by(compare_tightness);
        results
    }

    /// Returns results with `score >= threshold`, tightest first.
    pub fn rank_evaluated(
        &self,
        evaluated: &[EvaluatedConstraint],
        threshold: f64,
    ) -> Vec<TightnessResult> {
        self.score_all(evaluated)
            .into_iter()
            .filter(|r| r.is_binding(threshold))
            .collect()
    }

    /// Evaluates and ranks every constraint of a model.
    ///
    /// Constraints that fail evaluation are recorded in the ranking instead of
    /// aborting it.
    pub fn rank<B: ModelBackend + ?Sized>(&self, backend: &B, threshold: f64) -> Ranking {
        let pass = ConstraintEvaluator::new(backend).evaluate_all();
        let unbounded = pass
            .evaluated
            .iter()
            .filter(|ec| ec.is_unbounded())
            .map(|ec| ec.name().to_string())
            .collect();
        Ranking {
            results: self.rank_evaluated(&pass.evaluated, threshold),
            unbounded,
            failures: pass.failures,
        }
    }
}
