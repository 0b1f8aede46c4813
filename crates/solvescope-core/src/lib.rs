//! solvescope Core - value types and evaluation for post-solve analysis
//!
//! This crate provides the fundamental abstractions for solvescope:
//! - Constraint references and bounds owned by an external solved model
//! - The [`ModelBackend`] capability trait any modeling toolkit can implement
//! - [`EvaluatedConstraint`], the read-only snapshot every analysis works on
//! - [`ConstraintEvaluator`], the read-through query layer over a backend
//! - Severity tiers shared by the detector and the configuration layer

pub mod backend;
pub mod bounds;
pub mod constraint;
pub mod error;
pub mod evaluated;
pub mod evaluator;
pub mod severity;

#[cfg(test)]
pub(crate) mod test_utils;

pub use backend::ModelBackend;
pub use bounds::Bounds;
pub use constraint::{BoundSide, ConstraintRef, ModelId};
pub use error::{AnalysisError, Result};
pub use evaluated::{ActiveBound, EvaluatedConstraint};
pub use evaluator::{ConstraintEvaluator, EvaluationFailure, EvaluationPass};
pub use severity::Severity;
