//! Whole-model diagnostics.
//!
//! [`SolverDiagnostics`] evaluates every constraint once per call and feeds
//! the shared snapshots to both the tightness analyzer and the infeasibility
//! detector. No state survives between calls, so repeated calls on an
//! unchanged model return identical reports.

use std::time::Instant;

use solvescope_config::{AnalyzerConfig, ConfigError};
use solvescope_core::{
    ConstraintEvaluator, ConstraintRef, EvaluatedConstraint, EvaluationPass, ModelBackend, Result,
};
use tracing::info;

use crate::infeasibility::{InfeasibilityDetector, Violation};
use crate::report::{DiagnosticsReport, FeasibilityDiagnosis};
use crate::statistics::ConstraintStatistics;
use crate::tightness::{TightnessAnalyzer, TightnessResult};

/// Everything known about one constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintAnalysis {
    pub evaluated: EvaluatedConstraint,
    /// `None` when the constraint has no finite bound.
    pub tightness: Option<TightnessResult>,
    /// `None` when the constraint holds within tolerance.
    pub violation: Option<Violation>,
}

impl ConstraintAnalysis {
    pub fn name(&self) -> &str {
        self.evaluated.name()
    }

    pub fn is_violated(&self) -> bool {
        self.violation.is_some()
    }
}

/// Diagnostics over one solved model.
///
/// # Example
///
/// ```
/// use solvescope_analysis::SolverDiagnostics;
/// use solvescope_linear::{LinearConstraint, LinearModel};
///
/// let mut model = LinearModel::new("lp");
/// model.add_variable("x");
/// model.set_value("x", 5.0).unwrap();
/// model.add_constraint(LinearConstraint::new("floor").term("x", 1.0).at_least(5.0)).unwrap();
///
/// let diagnostics = SolverDiagnostics::new(&model);
/// assert!(diagnostics.diagnose_feasibility().is_feasible);
/// assert_eq!(diagnostics.constraint_statistics().binding_constraints, 1);
/// ```
#[derive(Debug)]
pub struct SolverDiagnostics<'a, B: ModelBackend + ?Sized> {
    backend: &'a B,
    analyzer: TightnessAnalyzer,
    detector: InfeasibilityDetector,
    binding_threshold: f64,
}

impl<'a, B: ModelBackend + ?Sized> SolverDiagnostics<'a, B> {
    /// Creates diagnostics with the default configuration.
    pub fn new(backend: &'a B) -> Self {
        Self::from_valid_config(backend, &AnalyzerConfig::default())
    }

    /// Creates diagnostics from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration fails
    /// [`AnalyzerConfig::validate`].
    pub fn with_config(
        backend: &'a B,
        config: &AnalyzerConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(backend, config))
    }

    fn from_valid_config(backend: &'a B, config: &AnalyzerConfig) -> Self {
        Self {
            backend,
            analyzer: TightnessAnalyzer::from_config(&config.tightness),
            detector: InfeasibilityDetector::from_config(config),
            binding_threshold: config.tightness.binding_threshold,
        }
    }

    /// Replaces the tightness analyzer.
    pub fn with_analyzer(mut self, analyzer: TightnessAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Replaces the infeasibility detector.
    pub fn with_detector(mut self, detector: InfeasibilityDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Overrides the default binding threshold.
    pub fn with_binding_threshold(mut self, threshold: f64) -> Self {
        self.binding_threshold = threshold;
        self
    }

    pub fn binding_threshold(&self) -> f64 {
        self.binding_threshold
    }

    pub fn analyzer(&self) -> &TightnessAnalyzer {
        &self.analyzer
    }

    pub fn detector(&self) -> &InfeasibilityDetector {
        &self.detector
    }

    fn evaluate_all(&self) -> EvaluationPass {
        ConstraintEvaluator::new(self.backend).evaluate_all()
    }

    /// Runs the full analysis and assembles the report.
    pub fn analyze(&self) -> DiagnosticsReport {
        let start = Instant::now();
        info!(
            event = "analysis_start",
            constraint_count = self.backend.constraint_count() as u64,
        );

        let pass = self.evaluate_all();
        let tightness = self.analyzer.score_all(&pass.evaluated);
        let mut violations = self.detector.scan_evaluated(&pass.evaluated);
        // Stable: equal severities keep declaration order.
        violations.sort_by(|a, b| b.severity.cmp(&a.severity));
        let statistics = ConstraintStatistics::compute(
            &pass,
            &tightness,
            &violations,
            self.binding_threshold,
        );

        let report = DiagnosticsReport {
            is_feasible: violations.is_empty(),
            violations,
            tightness,
            binding_threshold: self.binding_threshold,
            statistics,
            failures: pass.failures,
        };

        info!(
            event = "analysis_end",
            constraint_count = report.statistics.total_constraints as u64,
            binding_count = report.statistics.binding_constraints as u64,
            violation_count = report.statistics.violated_constraints as u64,
            failure_count = report.statistics.failed_evaluations as u64,
            feasible = report.is_feasible,
            duration_ms = start.elapsed().as_millis() as u64,
        );
        report
    }

    /// Scored constraints with `score >= threshold`, tightest first.
    pub fn tight_constraints(&self, threshold: f64) -> Vec<TightnessResult> {
        self.analyzer
            .rank_evaluated(&self.evaluate_all().evaluated, threshold)
    }

    /// The `n` tightest scored constraints.
    pub fn limiting_constraints(&self, n: usize) -> Vec<TightnessResult> {
        let mut results = self.analyzer.score_all(&self.evaluate_all().evaluated);
        results.truncate(n);
        results
    }

    /// Feasibility verdict: feasible iff no violation is found.
    pub fn diagnose_feasibility(&self) -> FeasibilityDiagnosis {
        let scan = self.detector.scan(self.backend);
        let mut violations = scan.violations;
        violations.sort_by(|a, b| b.severity.cmp(&a.severity));
        FeasibilityDiagnosis {
            is_feasible: violations.is_empty(),
            violations,
            failures: scan.failures,
        }
    }

    /// Aggregate statistics at the configured binding threshold.
    pub fn constraint_statistics(&self) -> ConstraintStatistics {
        let pass = self.evaluate_all();
        let tightness = self.analyzer.score_all(&pass.evaluated);
        let violations = self.detector.scan_evaluated(&pass.evaluated);
        ConstraintStatistics::compute(&pass, &tightness, &violations, self.binding_threshold)
    }

    /// Analyses a single constraint.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors for the constraint.
    pub fn analyze_constraint(&self, constraint: &ConstraintRef) -> Result<ConstraintAnalysis> {
        let evaluated = ConstraintEvaluator::new(self.backend).evaluate(constraint)?;
        Ok(self.analysis_of(evaluated))
    }

    /// Analyses every constraint that evaluates, in declaration order.
    pub fn analyze_all_constraints(&self) -> Vec<ConstraintAnalysis> {
        self.evaluate_all()
            .evaluated
            .into_iter()
            .map(|ec| self.analysis_of(ec))
            .collect()
    }

    fn analysis_of(&self, evaluated: EvaluatedConstraint) -> ConstraintAnalysis {
        // Body is finite here, so neither call can fail for that reason.
        let tightness = self.analyzer.score(&evaluated).ok();
        let violation = self.detector.check(&evaluated).ok().flatten();
        ConstraintAnalysis {
            evaluated,
            tightness,
            violation,
        }
    }
}
