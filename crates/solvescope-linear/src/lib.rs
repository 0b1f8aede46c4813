//! In-memory linear model backend.
//!
//! [`LinearModel`] holds named variables with their solved values and
//! linear constraints `constant + Σ coef·var` with optional bounds and duals.
//! It implements [`ModelBackend`](solvescope_core::ModelBackend), so the
//! analysis layer can run directly on it.
//!
//! # Example
//!
//! ```
//! use solvescope_core::{ConstraintEvaluator, ModelBackend};
//! use solvescope_linear::{LinearConstraint, LinearModel};
//!
//! let mut model = LinearModel::new("production");
//! model.add_variable("x");
//! model.add_variable("y");
//! model.set_value("x", 3.0).unwrap();
//! model.set_value("y", 2.8).unwrap();
//! let c1 = model
//!     .add_constraint(LinearConstraint::new("c1").term("x", 1.0).term("y", 1.0).at_least(5.0))
//!     .unwrap();
//!
//! let ec = ConstraintEvaluator::new(&model).evaluate(&c1).unwrap();
//! assert!((ec.body() - 5.8).abs() < 1e-12);
//! assert_eq!(ec.expression(), Some("x + y >= 5"));
//! ```

mod constraint;
mod error;
mod model;


pub use constraint::LinearConstraint;
pub use error::ModelError;
pub use model::LinearModel;
