//! Solved linear models with known answers.
//!
//! # Example
//!
//! ```
//! use solvescope_core::ModelBackend;
//! use solvescope_test::scenarios::two_constraint_model;
//!
//! let model = two_constraint_model();
//! assert_eq!(model.constraint_count(), 2);
//! ```

use solvescope_linear::{LinearConstraint, LinearModel};

fn with_values(name: &str, values: &[(&str, f64)]) -> LinearModel {
    let mut model = LinearModel::new(name);
    for (var, value) in values {
        model.add_variable(*var);
        model
            .set_value(var, *value)
            .expect("variable was just declared");
    }
    model
}

fn add(model: &mut LinearModel, constraint: LinearConstraint) {
    model
        .add_constraint(constraint)
        .expect("fixture constraint names are unique");
}

/// `c1: x >= 5` at `x = 5.8` and `c2: y <= 15` at `y = 14.87`.
///
/// `c2` carries a dual of 0.4; `c1` has none.
pub fn two_constraint_model() -> LinearModel {
    let mut model = with_values("two_constraints", &[("x", 5.8), ("y", 14.87)]);
    add(&mut model, LinearConstraint::new("c1").term("x", 1.0).at_least(5.0));
    add(
        &mut model,
        LinearConstraint::new("c2")
            .term("y", 1.0)
            .at_most(15.0)
            .with_dual(0.4),
    );
    model
}

/// `capacity_1: x + y <= 8` at `x + y = 10.5`, plus a satisfied `demand: x >= 2`.
pub fn capacity_model() -> LinearModel {
    let mut model = with_values("capacity", &[("x", 6.0), ("y", 4.5)]);
    add(
        &mut model,
        LinearConstraint::new("capacity_1")
            .term("x", 1.0)
            .term("y", 1.0)
            .at_most(8.0),
    );
    add(&mut model, LinearConstraint::new("demand").term("x", 1.0).at_least(2.0));
    model
}

/// `zero_cap: z <= 0` at `z = 0.0005`.
pub fn zero_bound_model() -> LinearModel {
    let mut model = with_values("zero_bound", &[("z", 0.0005)]);
    add(&mut model, LinearConstraint::new("zero_cap").term("z", 1.0).at_most(0.0));
    model
}

/// One constraint of every shape:
///
/// - `balance: x - y == 0` (binding, dual 0.0)
/// - `budget: 2*x + y <= 100` (loose)
/// - `free_row: x + y` (no bounds)
/// - `window: 0 <= y <= 4` (violated upper by 1)
/// - `pending: w >= 1` (`w` unassigned)
pub fn mixed_model() -> LinearModel {
    let mut model = with_values("mixed", &[("x", 5.0), ("y", 5.0)]);
    model.add_variable("w");
    add(
        &mut model,
        LinearConstraint::new("balance")
            .term("x", 1.0)
            .term("y", -1.0)
            .equal_to(0.0)
            .with_dual(0.0),
    );
    add(
        &mut model,
        LinearConstraint::new("budget")
            .term("x", 2.0)
            .term("y", 1.0)
            .at_most(100.0),
    );
    add(
        &mut model,
        LinearConstraint::new("free_row").term("x", 1.0).term("y", 1.0),
    );
    add(
        &mut model,
        LinearConstraint::new("window").term("y", 1.0).between(0.0, 4.0),
    );
    add(&mut model, LinearConstraint::new("pending").term("w", 1.0).at_least(1.0));
    model
}
