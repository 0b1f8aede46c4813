//! Aggregate statistics over one analysis pass.

use solvescope_core::EvaluationPass;

use crate::infeasibility::Violation;
use crate::tightness::TightnessResult;

/// Counts and slack statistics for a model.
///
/// Slack statistics cover only constraints that evaluated and have a finite
/// bound; failed evaluations are counted separately.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintStatistics {
    /// Constraints in the model.
    pub total_constraints: usize,
    /// Constraints that evaluated successfully.
    pub evaluated_constraints: usize,
    /// Constraints that could not be evaluated.
    pub failed_evaluations: usize,
    /// Evaluated constraints without any finite bound.
    pub unbounded_constraints: usize,
    /// Scored constraints at or above `binding_threshold`.
    pub binding_constraints: usize,
    /// Constraints violated beyond tolerance.
    pub violated_constraints: usize,
    /// Threshold used for `binding_constraints`.
    pub binding_threshold: f64,
    /// Mean raw slack of scored constraints.
    pub mean_slack: Option<f64>,
    /// Largest raw slack of scored constraints.
    pub max_slack: Option<f64>,
    /// Mean tightness score of scored constraints.
    pub mean_score: Option<f64>,
}

impl ConstraintStatistics {
    /// Computes statistics from a pass and the results derived from it.
    pub fn compute(
        pass: &EvaluationPass,
        tightness: &[TightnessResult],
        violations: &[Violation],
        binding_threshold: f64,
    ) -> Self {
        let scored = tightness.len();
        let (mean_slack, max_slack, mean_score) = if scored == 0 {
            (None, None, None)
        } else {
            let n = scored as f64;
            let slack_sum: f64 = tightness.iter().map(|r| r.raw_slack).sum();
            let score_sum: f64 = tightness.iter().map(|r| r.score).sum();
            let max = tightness
                .iter()
                .map(|r| r.raw_slack)
                .fold(f64::NEG_INFINITY, f64::max);
            (Some(slack_sum / n), Some(max), Some(score_sum / n))
        };

        Self {
            total_constraints: pass.total(),
            evaluated_constraints: pass.evaluated.len(),
            failed_evaluations: pass.failures.len(),
            unbounded_constraints: pass.evaluated.iter().filter(|e| e.is_unbounded()).count(),
            binding_constraints: tightness
                .iter()
                .filter(|r| r.is_binding(binding_threshold))
                .count(),
            violated_constraints: violations.len(),
            binding_threshold,
            mean_slack,
            max_slack,
            mean_score,
        }
    }
}
