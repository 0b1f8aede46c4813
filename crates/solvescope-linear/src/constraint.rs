//! Linear constraint rows.

use std::fmt::Write;

use solvescope_core::Bounds;

/// A linear constraint `constant + Σ coef·var` with optional bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    name: String,
    terms: Vec<(String, f64)>,
    constant: f64,
    bounds: Bounds,
    dual: Option<f64>,
}

impl LinearConstraint {
    /// Creates an unbounded constraint with an empty body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terms: Vec::new(),
            constant: 0.0,
            bounds: Bounds::unbounded(),
            dual: None,
        }
    }

    /// Adds `coefficient * variable` to the body.
    pub fn term(mut self, variable: impl Into<String>, coefficient: f64) -> Self {
        self.terms.push((variable.into(), coefficient));
        self
    }

    /// Adds a constant to the body.
    pub fn constant(mut self, constant: f64) -> Self {
        self.constant += constant;
        self
    }

    /// Replaces the bounds.
    pub fn bounded(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// `body >= lower`.
    pub fn at_least(self, lower: f64) -> Self {
        self.bounded(Bounds::at_least(lower))
    }

    /// `body <= upper`.
    pub fn at_most(self, upper: f64) -> Self {
        self.bounded(Bounds::at_most(upper))
    }

    /// `lower <= body <= upper`.
    pub fn between(self, lower: f64, upper: f64) -> Self {
        self.bounded(Bounds::between(lower, upper))
    }

    /// `body == value`.
    pub fn equal_to(self, value: f64) -> Self {
        self.bounded(Bounds::equal_to(value))
    }

    /// Attaches a dual value.
    pub fn with_dual(mut self, dual: f64) -> Self {
        self.dual = Some(dual);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[(String, f64)] {
        &self.terms
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn dual(&self) -> Option<f64> {
        self.dual
    }

    pub(crate) fn set_dual(&mut self, dual: Option<f64>) {
        self.dual = dual;
    }

    pub(crate) fn constant_term(&self) -> f64 {
        self.constant
    }

    /// Renders the body, e.g. `2*x - y + 1`.
    pub fn body_text(&self) -> String {
        let mut out = String::new();
        for (var, coef) in &self.terms {
            let magnitude = coef.abs();
            if out.is_empty() {
                if *coef < 0.0 {
                    out.push('-');
                }
            } else if *coef < 0.0 {
                out.push_str(" - ");
            } else {
                out.push_str(" + ");
            }
            if magnitude == 1.0 {
                out.push_str(var);
            } else {
                let _ = write!(out, "{}*{}", magnitude, var);
            }
        }
        if self.constant != 0.0 || out.is_empty() {
            if out.is_empty() {
                let _ = write!(out, "{}", self.constant);
            } else if self.constant < 0.0 {
                let _ = write!(out, " - {}", -self.constant);
            } else {
                let _ = write!(out, " + {}", self.constant);
            }
        }
        out
    }

    /// Renders the full constraint, e.g. `x + y >= 5`.
    pub fn expression(&self) -> String {
        let body = self.body_text();
        match (self.bounds.lower(), self.bounds.upper()) {
            (Some(l), Some(u)) if l == u => format!("{} == {}", body, l),
            (Some(l), Some(u)) => format!("{} <= {} <= {}", l, body, u),
            (Some(l), None) => format!("{} >= {}", body, l),
            (None, Some(u)) => format!("{} <= {}", body, u),
            (None, None) => format!("{} (free)", body),
        }
    }
}
