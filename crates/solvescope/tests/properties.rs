//! End-to-end checks of the analysis guarantees.

use solvescope::prelude::*;
use solvescope::{InfeasibilityDetector, TightnessAnalyzer, Tolerance};
use solvescope_test::{capacity_model, mixed_model, two_constraint_model, zero_bound_model};

fn models() -> Vec<LinearModel> {
    vec![
        two_constraint_model(),
        capacity_model(),
        zero_bound_model(),
        mixed_model(),
    ]
}

#[test]
fn test_on_bound_scores_one() {
    let mut model = LinearModel::new("on_bound");
    model.add_variable("x");
    model.set_value("x", 4.0).unwrap();
    for (name, c) in [
        ("ge", LinearConstraint::new("ge").term("x", 1.0).at_least(4.0)),
        ("le", LinearConstraint::new("le").term("x", 2.0).at_most(8.0)),
        ("eq", LinearConstraint::new("eq").term("x", -1.0).equal_to(-4.0)),
    ] {
        let r = model.add_constraint(c).unwrap();
        assert_eq!(r.name(), name);
    }
    let report = solvescope::analyze(&model);
    assert_eq!(report.tightness.len(), 3);
    for result in &report.tightness {
        assert!((result.score - 1.0).abs() < 1e-12, "{}", result.name);
    }
}

#[test]
fn test_unbounded_never_ranked() {
    let model = mixed_model();
    for threshold in [0.0, 0.25, 0.5, 1.0] {
        let ranking = TightnessAnalyzer::new().rank(&model, threshold);
        assert!(ranking.results.iter().all(|r| r.name != "free_row"));
        assert_eq!(ranking.unbounded, vec!["free_row".to_string()]);
    }
}

#[test]
fn test_scan_empty_iff_feasible() {
    for model in models() {
        let diagnostics = SolverDiagnostics::new(&model);
        let scan = InfeasibilityDetector::new().scan(&model);
        assert_eq!(
            scan.violations.is_empty(),
            diagnostics.diagnose_feasibility().is_feasible
        );
    }
}

#[test]
fn test_binding_count_round_trip() {
    for model in models() {
        let threshold = AnalyzerConfig::default().tightness.binding_threshold;
        let stats = SolverDiagnostics::new(&model).constraint_statistics();
        let ranked = TightnessAnalyzer::new().rank(&model, threshold);
        assert_eq!(stats.binding_constraints, ranked.results.len());
    }
}

#[test]
fn test_scenario_ranking() {
    let model = two_constraint_model();
    let ranked = SolverDiagnostics::new(&model).tight_constraints(0.5);
    let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["c2", "c1"]);
    assert!((ranked[0].score - (-0.13f64 / 15.0).exp()).abs() < 1e-9);
    assert!((ranked[1].score - (-0.16f64).exp()).abs() < 1e-9);
}

#[test]
fn test_capacity_scenario() {
    let report = solvescope::analyze(&capacity_model());
    let violation = &report.violations[0];
    assert_eq!(violation.name, "capacity_1");
    assert!((violation.magnitude - 2.5).abs() < 1e-9);
    assert_eq!(violation.severity, Severity::Critical);
}

#[test]
fn test_zero_bound_scenario() {
    let config = AnalyzerConfig::new()
        .with_absolute_tolerance(0.001)
        .with_relative_tolerance(0.0);
    let report = solvescope::analyze_with_config(&zero_bound_model(), &config).unwrap();
    assert!(report.is_feasible);

    let scan = InfeasibilityDetector::new()
        .with_tolerance(Tolerance::absolute(0.001))
        .scan(&zero_bound_model());
    assert!(scan.violations.is_empty());
}

#[test]
fn test_severity_monotonic_across_models() {
    let mut previous = Severity::Low;
    for excess in [0.0005, 0.005, 0.05, 0.5, 5.0] {
        let mut model = LinearModel::new("sweep");
        model.add_variable("x");
        model.set_value("x", 50.0 + excess).unwrap();
        model
            .add_constraint(LinearConstraint::new("cap").term("x", 1.0).at_most(50.0))
            .unwrap();
        let report = solvescope::analyze(&model);
        let severity = report.violations[0].severity;
        assert!(severity >= previous);
        previous = severity;
    }
    assert_eq!(previous, Severity::Critical);
}

#[test]
fn test_stale_reference_does_not_abort_batch() {
    let mut model = capacity_model();
    let demand = model.constraint_ref("demand").unwrap();
    model.remove_constraint("capacity_1").unwrap();

    let diagnostics = SolverDiagnostics::new(&model);
    assert!(diagnostics.analyze_constraint(&demand).is_err());
    let report = diagnostics.analyze();
    assert!(report.is_feasible);
    assert_eq!(report.statistics.total_constraints, 1);
}
