//! Error types for solvescope

use thiserror::Error;

/// Main error type for constraint analysis operations.
///
/// Single-constraint operations return these directly. Batch operations
/// record them per constraint and keep going.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AnalysisError {
    /// The reference does not belong to the model under analysis, or no
    /// longer resolves to the constraint it was issued for.
    #[error("Invalid constraint reference '{constraint}': {reason}")]
    InvalidReference { constraint: String, reason: String },

    /// The backend could not produce a body value.
    #[error("Cannot evaluate constraint '{constraint}': {reason}")]
    Evaluation { constraint: String, reason: String },

    /// The backend produced a NaN or infinite body value, or a body whose
    /// distance to a bound overflows.
    #[error("Constraint '{constraint}' evaluated to non-finite value {value}")]
    NonFiniteBody { constraint: String, value: f64 },

    /// Tightness is undefined for a constraint without any finite bound.
    #[error("Constraint '{constraint}' has no finite bound")]
    Unbounded { constraint: String },
}

impl AnalysisError {
    /// Creates an invalid reference error.
    pub fn invalid_reference(constraint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            constraint: constraint.into(),
            reason: reason.into(),
        }
    }

    /// Creates an evaluation error.
    pub fn evaluation(constraint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Evaluation {
            constraint: constraint.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the constraint the error is about.
    pub fn constraint(&self) -> &str {
        match self {
            Self::InvalidReference { constraint, .. }
            | Self::Evaluation { constraint, .. }
            | Self::NonFiniteBody { constraint, .. }
            | Self::Unbounded { constraint } => constraint,
        }
    }

    /// Returns true if the constraint could not be turned into a finite body value.
    ///
    /// Non-finite bodies count as evaluation failures.
    pub fn is_evaluation_failure(&self) -> bool {
        matches!(self, Self::Evaluation { .. } | Self::NonFiniteBody { .. })
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
