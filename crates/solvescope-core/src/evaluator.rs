//! Constraint evaluation over a [`ModelBackend`].
//!
//! The evaluator is a pure read-through: it asks the backend for bounds,
//! body value and dual, validates the body, and wraps the result in an
//! [`EvaluatedConstraint`]. Nothing is cached between calls.

use tracing::{debug, warn};

use crate::backend::ModelBackend;
use crate::constraint::{BoundSide, ConstraintRef};
use crate::error::{AnalysisError, Result};
use crate::evaluated::EvaluatedConstraint;

/// A constraint that could not be evaluated during a batch pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationFailure {
    /// Name of the constraint.
    pub constraint: String,
    /// Why evaluation failed.
    pub error: AnalysisError,
}

/// Result of evaluating every constraint of a model once.
///
/// Successful evaluations keep declaration order.
#[derive(Debug, Clone, Default)]
pub struct EvaluationPass {
    /// Successfully evaluated constraints, in declaration order.
    pub evaluated: Vec<EvaluatedConstraint>,
    /// Constraints that failed, in declaration order.
    pub failures: Vec<EvaluationFailure>,
}

impl EvaluationPass {
    /// Total number of constraints visited.
    pub fn total(&self) -> usize {
        self.evaluated.len() + self.failures.len()
    }

    /// Returns true if every constraint evaluated.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Evaluates constraints of one model.
///
/// # Example
///
/// ```ignore
/// let evaluator = ConstraintEvaluator::new(&model);
/// let ec = evaluator.evaluate(&model.constraints()[0])?;
/// println!("{} = {}", ec.name(), ec.body());
/// ```
#[derive(Debug)]
pub struct ConstraintEvaluator<'a, B: ModelBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: ModelBackend + ?Sized> ConstraintEvaluator<'a, B> {
    /// Creates an evaluator bound to the given model.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Returns the backend this evaluator reads from.
    pub fn backend(&self) -> &'a B {
        self.backend
    }

    /// Evaluates a single constraint.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InvalidReference`] if the reference belongs to
    ///   another model or is stale.
    /// - [`AnalysisError::Evaluation`] if the backend has no body value.
    /// - [`AnalysisError::NonFiniteBody`] if the body is NaN or infinite, or
    ///   its slack to a finite bound overflows.
    pub fn evaluate(&self, constraint: &ConstraintRef) -> Result<EvaluatedConstraint> {
        self.backend.check_owner(constraint)?;
        let bounds = self.backend.bounds(constraint)?;
        let body = self.backend.body_value(constraint)?;
        if !body.is_finite() {
            return Err(AnalysisError::NonFiniteBody {
                constraint: constraint.name().to_string(),
                value: body,
            });
        }
        let dual = self.backend.dual(constraint)?;

        let evaluated = EvaluatedConstraint::new(constraint.name(), body, bounds);
        for side in [BoundSide::Lower, BoundSide::Upper] {
            if let Some(slack) = evaluated.slack_to(side).filter(|s| !s.is_finite()) {
                return Err(AnalysisError::NonFiniteBody {
                    constraint: constraint.name().to_string(),
                    value: slack,
                });
            }
        }

        Ok(evaluated
            .with_dual(dual)
            .with_expression(self.backend.expression(constraint)))
    }

    /// Evaluates every constraint of the model exactly once.
    ///
    /// Failures are recorded, never propagated.
    pub fn evaluate_all(&self) -> EvaluationPass {
        let mut pass = EvaluationPass::default();
        for constraint in self.backend.constraints() {
            match self.evaluate(&constraint) {
                Ok(evaluated) => {
                    debug!(
                        constraint = constraint.name(),
                        body = evaluated.body(),
                        "Constraint evaluated"
                    );
                    pass.evaluated.push(evaluated);
                }
                Err(error) => {
                    warn!(constraint = constraint.name(), %error, "Constraint evaluation failed");
                    pass.failures.push(EvaluationFailure {
                        constraint: constraint.name().to_string(),
                        error,
                    });
                }
            }
        }
        pass
    }
}
