//! Tests for console rendering.

use super::*;
use solvescope_analysis::SolverDiagnostics;
use solvescope_test::{mixed_model, two_constraint_model};

#[test]
fn test_render_feasible_report() {
    let model = two_constraint_model();
    let report = SolverDiagnostics::new(&model).analyze();
    let text = render_report(&report);
    assert!(text.contains("FEASIBLE"));
    assert!(text.contains("c1"));
    assert!(text.contains("c2"));
    assert!(!text.contains("INFEASIBLE"));
}

#[test]
fn test_render_infeasible_report() {
    let model = mixed_model();
    let report = SolverDiagnostics::new(&model).analyze();
    let text = render_report(&report);
    assert!(text.contains("INFEASIBLE"));
    assert!(text.contains("CRITICAL"));
    assert!(text.contains("window"));
    assert!(text.contains("Loose constraints"));
    assert!(text.contains("could not be evaluated"));
    assert!(text.contains("pending"));
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration_ms(12), "12ms");
    assert_eq!(format_duration_ms(1500), "1.50s");
    assert_eq!(format_duration_ms(61_000), "1m 1s");
}

#[test]
fn test_init_is_idempotent() {
    init();
    init();
}

#[test]
fn test_default_filter_shows_evaluation_warnings() {
    let filter = default_filter().to_string();
    assert!(filter.contains("solvescope_core=warn"), "{}", filter);
}

#[cfg(feature = "json")]
#[test]
fn test_render_json() {
    let model = mixed_model();
    let report = SolverDiagnostics::new(&model).analyze();
    let json = render_json(&report).unwrap();
    assert!(json.contains("\"is_feasible\": false"));
    assert!(json.contains("UPPER_BOUND_VIOLATION"));
}
