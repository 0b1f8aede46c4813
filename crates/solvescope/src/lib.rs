//! solvescope - post-solve constraint analysis in Rust
//!
//! Point it at a solved model and get back which constraints are tight and,
//! if the point is infeasible, which constraints are violated and how badly.
//!
//! # Example
//!
//! ```rust
//! use solvescope::prelude::*;
//!
//! let mut model = LinearModel::new("plant");
//! model.add_variable("x");
//! model.add_variable("y");
//! model.set_value("x", 5.8).unwrap();
//! model.set_value("y", 14.87).unwrap();
//! model.add_constraint(LinearConstraint::new("c1").term("x", 1.0).at_least(5.0)).unwrap();
//! model.add_constraint(LinearConstraint::new("c2").term("y", 1.0).at_most(15.0)).unwrap();
//!
//! let report = solvescope::analyze(&model);
//! assert!(report.is_feasible);
//! assert_eq!(report.tight_constraints()[0].name, "c2");
//! ```

// Core types
pub use solvescope_core::{
    ActiveBound, AnalysisError, BoundSide, Bounds, ConstraintEvaluator, ConstraintRef,
    EvaluatedConstraint, EvaluationFailure, EvaluationPass, ModelBackend, ModelId, Severity,
};

// Analysis
pub use solvescope_analysis::{
    ConstraintAnalysis, ConstraintStatistics, DiagnosticsReport, FeasibilityDiagnosis,
    InfeasibilityDetector, Ranking, Scan, SeverityTable, SeverityTier, SolverDiagnostics,
    TightnessAnalyzer, TightnessResult, Tolerance, Violation, ViolationKind,
};

// Configuration
pub use solvescope_config::{AnalyzerConfig, ConfigError};

// Linear backend
pub use solvescope_linear::{LinearConstraint, LinearModel, ModelError};

#[cfg(feature = "console")]
pub use solvescope_console as console;

/// Analyses a model with the default configuration.
pub fn analyze<B: ModelBackend + ?Sized>(backend: &B) -> DiagnosticsReport {
    SolverDiagnostics::new(backend).analyze()
}

/// Analyses a model with the given configuration.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if the configuration fails validation.
pub fn analyze_with_config<B: ModelBackend + ?Sized>(
    backend: &B,
    config: &AnalyzerConfig,
) -> Result<DiagnosticsReport, ConfigError> {
    Ok(SolverDiagnostics::with_config(backend, config)?.analyze())
}

pub mod prelude {
    pub use super::{
        AnalyzerConfig, Bounds, DiagnosticsReport, EvaluatedConstraint, LinearConstraint,
        LinearModel, ModelBackend, Severity, SolverDiagnostics, TightnessResult, Violation,
    };
}
