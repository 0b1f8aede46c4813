//! The unified diagnostics report.
//!
//! The structured fields are the contract. The [`Display`](fmt::Display)
//! rendering is a plain-text convenience.

use std::fmt;

use solvescope_core::{EvaluationFailure, Severity};

use crate::infeasibility::Violation;
use crate::statistics::ConstraintStatistics;
use crate::tightness::TightnessResult;

/// Feasibility verdict with the violations behind it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeasibilityDiagnosis {
    /// True iff no constraint is violated beyond tolerance.
    pub is_feasible: bool,
    /// Violations, most severe first.
    pub violations: Vec<Violation>,
    /// Constraints that could not be checked.
    pub failures: Vec<EvaluationFailure>,
}

/// Result of analysing every constraint of a model once.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticsReport {
    /// True iff no constraint is violated beyond tolerance.
    pub is_feasible: bool,
    /// Violations, most severe first, then in declaration order.
    pub violations: Vec<Violation>,
    /// Every scored constraint, tightest first.
    pub tightness: Vec<TightnessResult>,
    /// Threshold separating tight from loose constraints.
    pub binding_threshold: f64,
    /// Aggregate statistics.
    pub statistics: ConstraintStatistics,
    /// Constraints that could not be evaluated.
    pub failures: Vec<EvaluationFailure>,
}

impl DiagnosticsReport {
    /// Constraints with `score >= binding_threshold`, tightest first.
    pub fn tight_constraints(&self) -> &[TightnessResult] {
        &self.tightness[..self.split()]
    }

    /// Constraints below the binding threshold, tightest first.
    pub fn loose_constraints(&self) -> &[TightnessResult] {
        &self.tightness[self.split()..]
    }

    /// The `n` tightest constraints.
    pub fn limiting_constraints(&self, n: usize) -> &[TightnessResult] {
        &self.tightness[..n.min(self.tightness.len())]
    }

    /// Violations grouped by tier, most severe first. Empty tiers are omitted.
    pub fn violations_by_severity(&self) -> Vec<(Severity, Vec<&Violation>)> {
        Severity::DESCENDING
            .iter()
            .filter_map(|&severity| {
                let group: Vec<_> = self
                    .violations
                    .iter()
                    .filter(|v| v.severity == severity)
                    .collect();
                (!group.is_empty()).then_some((severity, group))
            })
            .collect()
    }

    /// The feasibility part of the report.
    pub fn feasibility(&self) -> FeasibilityDiagnosis {
        FeasibilityDiagnosis {
            is_feasible: self.is_feasible,
            violations: self.violations.clone(),
            failures: self.failures.clone(),
        }
    }

    fn split(&self) -> usize {
        let threshold = self.binding_threshold;
        self.tightness.partition_point(|r| r.is_binding(threshold))
    }
}

fn fmt_dual(dual: Option<f64>) -> String {
    dual.map_or_else(|| "n/a".to_string(), |d| format!("{:.6}", d))
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.6}", v))
}

fn write_tightness(f: &mut fmt::Formatter<'_>, results: &[TightnessResult]) -> fmt::Result {
    for r in results {
        writeln!(
            f,
            "  {:<24} score {:.4}  slack {:>12.6}  ({} bound {})  dual {}",
            r.name,
            r.score,
            r.raw_slack,
            r.side.as_str(),
            r.bound,
            fmt_dual(r.dual)
        )?;
    }
    Ok(())
}

impl fmt::Display for DiagnosticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Constraint Diagnostics ===")?;
        if self.is_feasible {
            writeln!(f, "Feasibility: FEASIBLE")?;
        } else {
            writeln!(
                f,
                "Feasibility: INFEASIBLE ({} violated)",
                self.violations.len()
            )?;
        }

        if !self.violations.is_empty() {
            writeln!(f)?;
            writeln!(f, "Violations:")?;
            for v in &self.violations {
                writeln!(
                    f,
                    "  [{}] {} {} by {:.6} (body {}, bound {}): {}",
                    v.severity, v.name, v.kind, v.magnitude, v.body, v.bound, v.expression
                )?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Tight constraints (score >= {:.2}):",
            self.binding_threshold
        )?;
        let tight = self.tight_constraints();
        if tight.is_empty() {
            writeln!(f, "  none")?;
        }
        write_tightness(f, tight)?;

        let loose = self.loose_constraints();
        if !loose.is_empty() {
            writeln!(f)?;
            writeln!(f, "Loose constraints:")?;
            write_tightness(f, loose)?;
        }

        let s = &self.statistics;
        writeln!(f)?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  constraints:        {}", s.total_constraints)?;
        writeln!(f, "  evaluated:          {}", s.evaluated_constraints)?;
        writeln!(f, "  unbounded:          {}", s.unbounded_constraints)?;
        writeln!(f, "  binding:            {}", s.binding_constraints)?;
        writeln!(f, "  violated:           {}", s.violated_constraints)?;
        writeln!(f, "  mean slack:         {}", fmt_opt(s.mean_slack))?;
        writeln!(f, "  max slack:          {}", fmt_opt(s.max_slack))?;

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "{} constraints could not be evaluated:",
                self.failures.len()
            )?;
            for failure in &self.failures {
                writeln!(f, "  {}: {}", failure.constraint, failure.error)?;
            }
        }
        Ok(())
    }
}
