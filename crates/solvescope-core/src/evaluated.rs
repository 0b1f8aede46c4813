//! Evaluated constraint snapshots.
//!
//! An [`EvaluatedConstraint`] is produced fresh by each evaluation pass and
//! never changes afterwards. Slack helpers here are the raw, unnormalised
//! distances every higher layer builds on.

use crate::bounds::Bounds;
use crate::constraint::BoundSide;

/// Body value, bounds and dual of one constraint at the candidate point.
///
/// The body is always finite: the evaluator rejects NaN and infinities
/// before constructing one.
///
/// # Example
///
/// ```
/// use solvescope_core::{BoundSide, Bounds, EvaluatedConstraint};
///
/// let ec = EvaluatedConstraint::new("c1", 5.8, Bounds::at_least(5.0));
/// let active = ec.nearest_bound().unwrap();
/// assert_eq!(active.side, BoundSide::Lower);
/// assert!((active.slack - 0.8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluatedConstraint {
    name: String,
    body: f64,
    bounds: Bounds,
    dual: Option<f64>,
    expression: Option<String>,
}

/// The bound a constraint is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveBound {
    /// Which side the bound is on.
    pub side: BoundSide,
    /// The bound value.
    pub value: f64,
    /// Signed slack: positive on the feasible side, zero on the bound,
    /// negative when the bound is crossed.
    pub slack: f64,
}

impl EvaluatedConstraint {
    /// Creates a new evaluated constraint with no dual and no expression text.
    pub fn new(name: impl Into<String>, body: f64, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            body,
            bounds,
            dual: None,
            expression: None,
        }
    }

    /// Attaches a dual value.
    pub fn with_dual(mut self, dual: Option<f64>) -> Self {
        self.dual = dual;
        self
    }

    /// Attaches a textual rendering of the constraint.
    pub fn with_expression(mut self, expression: Option<String>) -> Self {
        self.expression = expression;
        self
    }

    /// Returns the constraint name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the body value.
    pub fn body(&self) -> f64 {
        self.body
    }

    /// Returns the bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the lower bound, if finite.
    pub fn lower(&self) -> Option<f64> {
        self.bounds.lower()
    }

    /// Returns the upper bound, if finite.
    pub fn upper(&self) -> Option<f64> {
        self.bounds.upper()
    }

    /// Returns the dual value, if the backend exposed one.
    pub fn dual(&self) -> Option<f64> {
        self.dual
    }

    /// Returns the backend's textual rendering, if any.
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// Returns the backend's rendering, or one built from the body and bounds.
    pub fn describe(&self) -> String {
        match &self.expression {
            Some(expr) => expr.clone(),
            None => format!("{} = {} {}", self.name, self.body, self.bounds),
        }
    }

    /// Returns true if the constraint has no finite bound.
    pub fn is_unbounded(&self) -> bool {
        self.bounds.is_unbounded()
    }

    /// Returns true if this is an equality constraint.
    pub fn is_equality(&self) -> bool {
        self.bounds.is_equality()
    }

    /// Signed slack against one side, if that side is finite.
    pub fn slack_to(&self, side: BoundSide) -> Option<f64> {
        let bound = self.bounds.get(side)?;
        Some(match side {
            BoundSide::Lower => self.body - bound,
            BoundSide::Upper => bound - self.body,
        })
    }

    /// Returns the finite bound closest to the body value.
    ///
    /// With both sides finite the one at smaller absolute distance wins; on a
    /// tie the crossed side wins, then the lower side.
    pub fn nearest_bound(&self) -> Option<ActiveBound> {
        let lower = self.active(BoundSide::Lower);
        let upper = self.active(BoundSide::Upper);
        match (lower, upper) {
            (Some(l), Some(u)) => {
                let (dl, du) = (l.slack.abs(), u.slack.abs());
                if du < dl || (du == dl && u.slack < l.slack) {
                    Some(u)
                } else {
                    Some(l)
                }
            }
            (l, u) => l.or(u),
        }
    }

    /// Signed slack to the nearest finite bound.
    pub fn slack(&self) -> Option<f64> {
        self.nearest_bound().map(|b| b.slack)
    }

    fn active(&self, side: BoundSide) -> Option<ActiveBound> {
        let value = self.bounds.get(side)?;
        let slack = self.slack_to(side)?;
        Some(ActiveBound { side, value, slack })
    }
}
