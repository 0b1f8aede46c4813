//! Constraint identification types.
//!
//! Constraints are owned by the external solved model. The analysis layer
//! only ever holds references to them.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one model instance.
///
/// References carry the id of the model that issued them, so a reference
/// handed to a different model can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelId(u64);

impl ModelId {
    /// Allocates a process-unique model id.
    pub fn next() -> Self {
        Self(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model#{}", self.0)
    }
}

/// Reference to a named constraint in a solved model.
///
/// # Example
///
/// ```
/// use solvescope_core::{ConstraintRef, ModelId};
///
/// let model = ModelId::next();
/// let cr = ConstraintRef::new(model, 0, "capacity_1");
/// assert_eq!(cr.name(), "capacity_1");
/// assert_eq!(cr.model(), model);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintRef {
    model: ModelId,
    index: usize,
    name: String,
}

impl ConstraintRef {
    /// Creates a new constraint reference.
    pub fn new(model: ModelId, index: usize, name: impl Into<String>) -> Self {
        Self {
            model,
            index,
            name: name.into(),
        }
    }

    /// Returns the id of the model that issued this reference.
    pub fn model(&self) -> ModelId {
        self.model
    }

    /// Returns the declaration index within the model.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the constraint name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ConstraintRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Which side of a constraint a bound sits on.
///
/// # Example
///
/// ```
/// use solvescope_core::BoundSide;
///
/// assert_ne!(BoundSide::Lower, BoundSide::Upper);
/// assert_eq!(BoundSide::Upper.as_str(), "upper");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BoundSide {
    /// `body >= lower`.
    Lower,
    /// `body <= upper`.
    Upper,
}

impl BoundSide {
    /// Returns a lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ids_are_unique() {
        let a = ModelId::next();
        let b = ModelId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_constraint_ref_display() {
        let cr = ConstraintRef::new(ModelId::next(), 3, "demand");
        assert_eq!(cr.to_string(), "demand");
        assert_eq!(cr.index(), 3);
    }

    #[test]
    fn test_refs_from_different_models_differ() {
        let a = ConstraintRef::new(ModelId::next(), 0, "c");
        let b = ConstraintRef::new(ModelId::next(), 0, "c");
        assert_ne!(a, b);
    }
}
