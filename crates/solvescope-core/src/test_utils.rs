//! Test utilities for solvescope-core
//!
//! A minimal map-backed model used by the crate's test modules.

use crate::backend::ModelBackend;
use crate::bounds::Bounds;
use crate::constraint::{ConstraintRef, ModelId};
use crate::error::{AnalysisError, Result};

/// One row of a [`MapModel`].
#[derive(Clone, Debug)]
pub struct Row {
    pub name: String,
    pub body: Option<f64>,
    pub bounds: Bounds,
    pub dual: Option<f64>,
}

impl Row {
    pub fn new(name: &str, body: Option<f64>, bounds: Bounds) -> Self {
        Self {
            name: name.to_string(),
            body,
            bounds,
            dual: None,
        }
    }

    pub fn with_dual(mut self, dual: f64) -> Self {
        self.dual = Some(dual);
        self
    }
}

/// A model whose body values are given directly.
#[derive(Debug)]
pub struct MapModel {
    id: ModelId,
    rows: Vec<Row>,
}

impl MapModel {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            id: ModelId::next(),
            rows,
        }
    }

    fn row(&self, constraint: &ConstraintRef) -> Result<&Row> {
        self.check_owner(constraint)?;
        self.rows
            .get(constraint.index())
            .filter(|r| r.name == constraint.name())
            .ok_or_else(|| AnalysisError::invalid_reference(constraint.name(), "stale reference"))
    }
}

impl ModelBackend for MapModel {
    fn model_id(&self) -> ModelId {
        self.id
    }

    fn constraints(&self) -> Vec<ConstraintRef> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, r)| ConstraintRef::new(self.id, i, r.name.clone()))
            .collect()
    }

    fn bounds(&self, constraint: &ConstraintRef) -> Result<Bounds> {
        Ok(self.row(constraint)?.bounds)
    }

    fn body_value(&self, constraint: &ConstraintRef) -> Result<f64> {
        self.row(constraint)?
            .body
            .ok_or_else(|| AnalysisError::evaluation(constraint.name(), "no value assigned"))
    }

    fn dual(&self, constraint: &ConstraintRef) -> Result<Option<f64>> {
        Ok(self.row(constraint)?.dual)
    }
}
