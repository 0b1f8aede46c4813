//! Capability interface over an external solved model.
//!
//! Any modeling toolkit can be analysed by implementing [`ModelBackend`].
//! The analysis layer only reads through it and never mutates the model.

use crate::bounds::Bounds;
use crate::constraint::{ConstraintRef, ModelId};
use crate::error::{AnalysisError, Result};

/// Read-only query interface over a solved model.
///
/// Implementations must enumerate constraints in a stable declaration order
/// and reject references they did not issue with
/// [`AnalysisError::InvalidReference`].
pub trait ModelBackend {
    /// Identity of the model. References issued by this backend carry it.
    fn model_id(&self) -> ModelId;

    /// All constraint references, in declaration order.
    fn constraints(&self) -> Vec<ConstraintRef>;

    /// Static bounds of the constraint.
    fn bounds(&self, constraint: &ConstraintRef) -> Result<Bounds>;

    /// Numeric value of the constraint body at the current assignment.
    ///
    /// Returns [`AnalysisError::Evaluation`] when the value is not available.
    fn body_value(&self, constraint: &ConstraintRef) -> Result<f64>;

    /// Dual value, if the solve produced one for this constraint.
    fn dual(&self, constraint: &ConstraintRef) -> Result<Option<f64>> {
        self.check_owner(constraint)?;
        Ok(None)
    }

    /// Human-readable rendering of the constraint expression.
    fn expression(&self, _constraint: &ConstraintRef) -> Option<String> {
        None
    }

    /// Number of constraints in the model.
    fn constraint_count(&self) -> usize {
        self.constraints().len()
    }

    /// Rejects references issued by another model.
    fn check_owner(&self, constraint: &ConstraintRef) -> Result<()> {
        if constraint.model() == self.model_id() {
            Ok(())
        } else {
            Err(AnalysisError::invalid_reference(
                constraint.name(),
                format!(
                    "issued by {} but analysed against {}",
                    constraint.model(),
                    self.model_id()
                ),
            ))
        }
    }
}

impl<B: ModelBackend + ?Sized> ModelBackend for &B {
    fn model_id(&self) -> ModelId {
        (**self).model_id()
    }

    fn constraints(&self) -> Vec<ConstraintRef> {
        (**self).constraints()
    }

    fn bounds(&self, constraint: &ConstraintRef) -> Result<Bounds> {
        (**self).bounds(constraint)
    }

    fn body_value(&self, constraint: &ConstraintRef) -> Result<f64> {
        (**self).body_value(constraint)
    }

    fn dual(&self, constraint: &ConstraintRef) -> Result<Option<f64>> {
        (**self).dual(constraint)
    }

    fn expression(&self, constraint: &ConstraintRef) -> Option<String> {
        (**self).expression(constraint)
    }

    fn constraint_count(&self) -> usize {
        (**self).constraint_count()
    }
}
