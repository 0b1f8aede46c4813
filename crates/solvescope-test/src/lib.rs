//! Shared test fixtures for solvescope crates.
//!
//! This crate provides solved models and fault-injecting backends for
//! testing. It does NOT depend on `solvescope-analysis` to avoid circular
//! dependencies.
//!
//! - [`scenarios`] - small linear models with known tightness and violations
//! - [`faulty`] - a backend that injects foreign references and bad values
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! solvescope-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use solvescope_test::scenarios::{capacity_model, two_constraint_model};
//! use solvescope_test::faulty::{FaultyBackend, FaultyRow};
//! ```

pub mod faulty;
pub mod scenarios;

pub use faulty::{FaultyBackend, FaultyRow};
pub use scenarios::{capacity_model, mixed_model, two_constraint_model, zero_bound_model};
