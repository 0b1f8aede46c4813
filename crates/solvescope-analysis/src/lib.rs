//! Post-solve constraint analysis for solvescope.
//!
//! Works on [`EvaluatedConstraint`](solvescope_core::EvaluatedConstraint)
//! snapshots taken from any [`ModelBackend`](solvescope_core::ModelBackend):
//!
//! - [`tightness`] - normalised slack, tightness scores and ranking
//! - [`infeasibility`] - violation detection and severity classification
//! - [`statistics`] - aggregate counts and slack statistics
//! - [`diagnostics`] - orchestration over a whole model
//! - [`report`] - the unified report and its text rendering
//!
//! # Example
//!
//! ```
//! use solvescope_analysis::SolverDiagnostics;
//! use solvescope_linear::{LinearConstraint, LinearModel};
//!
//! let mut model = LinearModel::new("plant");
//! model.add_variable("x");
//! model.set_value("x", 10.5).unwrap();
//! model
//!     .add_constraint(LinearConstraint::new("capacity_1").term("x", 1.0).at_most(8.0))
//!     .unwrap();
//!
//! let report = SolverDiagnostics::new(&model).analyze();
//! assert!(!report.is_feasible);
//! assert_eq!(report.violations[0].name, "capacity_1");
//! ```

pub mod diagnostics;
pub mod infeasibility;
pub mod report;
pub mod statistics;
pub mod tightness;

#[cfg(test)]
mod diagnostics_tests;

pub use diagnostics::{ConstraintAnalysis, SolverDiagnostics};
pub use infeasibility::{
    InfeasibilityDetector, Scan, SeverityTable, SeverityTier, Tolerance, Violation, ViolationKind,
};
pub use report::{DiagnosticsReport, FeasibilityDiagnosis};
pub use statistics::ConstraintStatistics;
pub use tightness::{Ranking, TightnessAnalyzer, TightnessResult};
