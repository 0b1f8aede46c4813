//! Errors raised while building a linear model.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("constraint '{0}' already exists")]
    DuplicateConstraint(String),

    #[error("unknown constraint '{0}'")]
    UnknownConstraint(String),

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),
}
