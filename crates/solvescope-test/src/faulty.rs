//! A backend with injectable faults.
//!
//! # Example
//!
//! ```
//! use solvescope_core::{Bounds, ConstraintEvaluator, ModelBackend};
//! use solvescope_test::faulty::{FaultyBackend, FaultyRow};
//!
//! let backend = FaultyBackend::new(vec![
//!     FaultyRow::value("ok", 1.0, Bounds::at_most(2.0)),
//!     FaultyRow::missing("broken", Bounds::at_most(2.0)),
//! ]);
//! let pass = ConstraintEvaluator::new(&backend).evaluate_all();
//! assert_eq!(pass.evaluated.len(), 1);
//! assert_eq!(pass.failures.len(), 1);
//! ```

use solvescope_core::{AnalysisError, Bounds, ConstraintRef, ModelBackend, ModelId, Result};

/// One constraint row with an optional fault.
#[derive(Clone, Debug, PartialEq)]
pub struct FaultyRow {
    pub name: String,
    pub body: Option<f64>,
    pub bounds: Bounds,
    pub dual: Option<f64>,
    /// Enumerate this row with a reference issued by another model.
    pub foreign: bool,
}

impl FaultyRow {
    /// A row with a body value.
    pub fn value(name: &str, body: f64, bounds: Bounds) -> Self {
        Self {
            name: name.to_string(),
            body: Some(body),
            bounds,
            dual: None,
            foreign: false,
        }
    }

    /// A row whose body cannot be evaluated.
    pub fn missing(name: &str, bounds: Bounds) -> Self {
        Self {
            body: None,
            ..Self::value(name, 0.0, bounds)
        }
    }

    /// A row enumerated with a foreign reference.
    pub fn foreign(name: &str, body: f64, bounds: Bounds) -> Self {
        Self {
            foreign: true,
            ..Self::value(name, body, bounds)
        }
    }

    /// Attaches a dual value.
    pub fn with_dual(mut self, dual: f64) -> Self {
        self.dual = Some(dual);
        self
    }
}

/// Backend whose rows are given directly, faults included.
#[derive(Clone, Debug)]
pub struct FaultyBackend {
    id: ModelId,
    foreign_id: ModelId,
    rows: Vec<FaultyRow>,
}

impl FaultyBackend {
    pub fn new(rows: Vec<FaultyRow>) -> Self {
        Self {
            id: ModelId::next(),
            foreign_id: ModelId::next(),
            rows,
        }
    }

    fn row(&self, constraint: &ConstraintRef) -> Result<&FaultyRow> {
        self.check_owner(constraint)?;
        self.rows
            .get(constraint.index())
            .filter(|r| r.name == constraint.name())
            .ok_or_else(|| AnalysisError::invalid_reference(constraint.name(), "stale reference"))
    }
}

impl ModelBackend for FaultyBackend {
    fn model_id(&self) -> ModelId {
        self.id
    }

    fn constraints(&self) -> Vec<ConstraintRef> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let owner = if r.foreign { self.foreign_id } else { self.id };
                ConstraintRef::new(owner, i, r.name.clone())
            })
            .collect()
    }

    fn bounds(&self, constraint: &ConstraintRef) -> Result<Bounds> {
        Ok(self.row(constraint)?.bounds)
    }

    fn body_value(&self, constraint: &ConstraintRef) -> Result<f64> {
        self.row(constraint)?
            .body
            .ok_or_else(|| AnalysisError::evaluation(constraint.name(), "no value available"))
    }

    fn dual(&self, constraint: &ConstraintRef) -> Result<Option<f64>> {
        Ok(self.row(constraint)?.dual)
    }
}
