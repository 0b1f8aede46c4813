//! The linear model backend.

use indexmap::IndexMap;
use solvescope_core::{AnalysisError, Bounds, ConstraintRef, ModelBackend, ModelId, Result};
use tracing::debug;

use crate::constraint::LinearConstraint;
use crate::error::ModelError;

/// A solved linear model: variable assignments plus constraint rows.
///
/// Constraints keep insertion order. Removing a constraint shifts later rows,
/// so references issued before the removal are detected as stale.
#[derive(Debug, Clone)]
pub struct LinearModel {
    id: ModelId,
    name: String,
    variables: IndexMap<String, Option<f64>>,
    constraints: IndexMap<String, LinearConstraint>,
}

impl LinearModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ModelId::next(),
            name: name.into(),
            variables: IndexMap::new(),
            constraints: IndexMap::new(),
        }
    }

    /// Returns the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a variable without a value. Existing values are kept.
    pub fn add_variable(&mut self, name: impl Into<String>) -> &mut Self {
        self.variables.entry(name.into()).or_insert(None);
        self
    }

    /// Assigns a solved value to a declared variable.
    pub fn set_value(&mut self, name: &str, value: f64) -> std::result::Result<(), ModelError> {
        let slot = self
            .variables
            .get_mut(name)
            .ok_or_else(|| ModelError::UnknownVariable(name.to_string()))?;
        *slot = Some(value);
        Ok(())
    }

    /// Clears the value of a declared variable.
    pub fn clear_value(&mut self, name: &str) -> std::result::Result<(), ModelError> {
        let slot = self
            .variables
            .get_mut(name)
            .ok_or_else(|| ModelError::UnknownVariable(name.to_string()))?;
        *slot = None;
        Ok(())
    }

    /// Returns the assigned value of a variable.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied().flatten()
    }

    /// Adds a constraint and returns its reference.
    pub fn add_constraint(
        &mut self,
        constraint: LinearConstraint,
    ) -> std::result::Result<ConstraintRef, ModelError> {
        let name = constraint.name().to_string();
        if self.constraints.contains_key(&name) {
            return Err(ModelError::DuplicateConstraint(name));
        }
        debug!(
            model = %self.name,
            constraint = %name,
            bounds = %constraint.bounds(),
            "Added constraint"
        );
        let (index, _) = self.constraints.insert_full(name.clone(), constraint);
        Ok(ConstraintRef::new(self.id, index, name))
    }

    /// Removes a constraint. References to later rows become stale.
    pub fn remove_constraint(
        &mut self,
        name: &str,
    ) -> std::result::Result<LinearConstraint, ModelError> {
        self.constraints
            .shift_remove(name)
            .ok_or_else(|| ModelError::UnknownConstraint(name.to_string()))
    }

    /// Sets or clears the dual of a constraint.
    pub fn set_dual(
        &mut self,
        name: &str,
        dual: Option<f64>,
    ) -> std::result::Result<(), ModelError> {
        self.constraints
            .get_mut(name)
            .ok_or_else(|| ModelError::UnknownConstraint(name.to_string()))?
            .set_dual(dual);
        Ok(())
    }

    /// Returns a fresh reference to a constraint by name.
    pub fn constraint_ref(&self, name: &str) -> Option<ConstraintRef> {
        self.constraints
            .get_index_of(name)
            .map(|index| ConstraintRef::new(self.id, index, name))
    }

    /// Returns the constraint row by name.
    pub fn constraint(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints.get(name)
    }

    fn resolve(&self, constraint: &ConstraintRef) -> Result<&LinearConstraint> {
        self.check_owner(constraint)?;
        match self.constraints.get_index(constraint.index()) {
            Some((name, row)) if name == constraint.name() => Ok(row),
            _ => Err(AnalysisError::invalid_reference(
                constraint.name(),
                format!("no constraint at position {} in '{}'", constraint.index(), self.name),
            )),
        }
    }
}

impl ModelBackend for LinearModel {
    fn model_id(&self) -> ModelId {
        self.id
    }

    fn constraints(&self) -> Vec<ConstraintRef> {
        self.constraints
            .keys()
            .enumerate()
            .map(|(index, name)| ConstraintRef::new(self.id, index, name.clone()))
            .collect()
    }

    fn bounds(&self, constraint: &ConstraintRef) -> Result<Bounds> {
        Ok(self.resolve(constraint)?.bounds())
    }

    fn body_value(&self, constraint: &ConstraintRef) -> Result<f64> {
        let row = self.resolve(constraint)?;
        let mut total = row.constant_term();
        for (var, coef) in row.terms() {
            let value = match self.variables.get(var) {
                Some(Some(value)) => *value,
                Some(None) => {
                    return Err(AnalysisError::evaluation(
                        constraint.name(),
                        format!("variable '{}' has no value", var),
                    ))
                }
                None => {
                    return Err(AnalysisError::evaluation(
                        constraint.name(),
                        format!("variable '{}' is not declared", var),
                    ))
                }
            };
            total += coef * value;
        }
        Ok(total)
    }

    fn dual(&self, constraint: &ConstraintRef) -> Result<Option<f64>> {
        Ok(self.resolve(constraint)?.dual())
    }

    fn expression(&self, constraint: &ConstraintRef) -> Option<String> {
        self.resolve(constraint).ok().map(LinearConstraint::expression)
    }

    fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
