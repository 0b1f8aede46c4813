//! Algebraic bounds of a constraint.

use std::fmt;

use crate::constraint::BoundSide;

/// Lower and upper bounds of a constraint body.
///
/// A missing side is `None`, never an infinite sentinel. Non-finite values
/// passed to the constructors are normalised to `None`.
///
/// # Example
///
/// ```
/// use solvescope_core::Bounds;
///
/// let b = Bounds::between(0.0, 10.0);
/// assert_eq!(b.lower(), Some(0.0));
/// assert!(!b.is_unbounded());
///
/// let free = Bounds::new(Some(f64::NEG_INFINITY), None);
/// assert!(free.is_unbounded());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    lower: Option<f64>,
    upper: Option<f64>,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl Bounds {
    /// Creates bounds from optional sides.
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self {
            lower: finite(lower),
            upper: finite(upper),
        }
    }

    /// `body >= lower`.
    pub fn at_least(lower: f64) -> Self {
        Self::new(Some(lower), None)
    }

    /// `body <= upper`.
    pub fn at_most(upper: f64) -> Self {
        Self::new(None, Some(upper))
    }

    /// `lower <= body <= upper`.
    pub fn between(lower: f64, upper: f64) -> Self {
        Self::new(Some(lower), Some(upper))
    }

    /// `body == value`.
    pub fn equal_to(value: f64) -> Self {
        Self::new(Some(value), Some(value))
    }

    /// No finite bound on either side.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Returns the lower bound, if finite.
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    /// Returns the upper bound, if finite.
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// Returns the bound on the given side.
    pub fn get(&self, side: BoundSide) -> Option<f64> {
        match side {
            BoundSide::Lower => self.lower,
            BoundSide::Upper => self.upper,
        }
    }

    /// Returns true if neither side is finite.
    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// Returns true if both sides are finite and equal.
    pub fn is_equality(&self) -> bool {
        matches!((self.lower, self.upper), (Some(l), Some(u)) if l == u)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower, self.upper) {
            (Some(l), Some(u)) if l == u => write!(f, "== {}", l),
            (Some(l), Some(u)) => write!(f, "[{}, {}]", l, u),
            (Some(l), None) => write!(f, ">= {}", l),
            (None, Some(u)) => write!(f, "<= {}", u),
            (None, None) => f.write_str("unbounded"),
        }
    }
}
