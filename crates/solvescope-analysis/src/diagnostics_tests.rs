//! Tests for whole-model diagnostics and the report.

use super::diagnostics::*;
use super::tightness::TightnessAnalyzer;
use solvescope_config::{AnalyzerConfig, ConfigError};
use solvescope_core::{AnalysisError, ConstraintRef, ModelBackend, ModelId, Severity};
use solvescope_linear::LinearModel;
use solvescope_test::{capacity_model, mixed_model, two_constraint_model, zero_bound_model};

#[test]
fn test_feasible_report() {
    let model = two_constraint_model();
    let report = SolverDiagnostics::new(&model).analyze();

    assert!(report.is_feasible);
    assert!(report.violations.is_empty());
    let names: Vec<_> = report.tightness.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["c2", "c1"]);
    assert_eq!(report.tight_constraints().len(), 2);
    assert!(report.loose_constraints().is_empty());
    assert_eq!(report.statistics.binding_constraints, 2);
    assert!(report.failures.is_empty());
}

#[test]
fn test_infeasible_report() {
    let model = capacity_model();
    let report = SolverDiagnostics::new(&model).analyze();

    assert!(!report.is_feasible);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].name, "capacity_1");
    assert_eq!(report.violations[0].severity, Severity::Critical);
    assert_eq!(report.statistics.violated_constraints, 1);
}

#[test]
fn test_mixed_model_statistics() {
    let model = mixed_model();
    let stats = SolverDiagnostics::new(&model).constraint_statistics();

    assert_eq!(stats.total_constraints, 5);
    assert_eq!(stats.evaluated_constraints, 4);
    assert_eq!(stats.failed_evaluations, 1);
    assert_eq!(stats.unbounded_constraints, 1);
    // balance (on bound) and window (crossed by 1 of 4).
    assert_eq!(stats.binding_constraints, 2);
    assert_eq!(stats.violated_constraints, 1);
    // Slacks of balance, budget and window: 0, 85, -1.
    assert!((stats.mean_slack.unwrap() - 28.0).abs() < 1e-9);
    assert!((stats.max_slack.unwrap() - 85.0).abs() < 1e-9);
    assert_eq!(stats.binding_threshold, 0.5);
}

#[test]
fn test_mixed_model_report_sections() {
    let model = mixed_model();
    let report = SolverDiagnostics::new(&model).analyze();

    let tight: Vec<_> = report
        .tight_constraints()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(tight, vec!["balance", "window"]);
    let loose: Vec<_> = report
        .loose_constraints()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(loose, vec!["budget"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].constraint, "pending");
    assert!(report.failures[0].error.is_evaluation_failure());
    // Zero dual is kept, not treated as missing.
    assert_eq!(report.tightness[0].dual, Some(0.0));
}

#[test]
fn test_empty_model() {
    let model = LinearModel::new("empty");
    let diagnostics = SolverDiagnostics::new(&model);
    let report = diagnostics.analyze();

    assert!(report.is_feasible);
    assert!(report.tightness.is_empty());
    assert_eq!(report.statistics.total_constraints, 0);
    assert_eq!(report.statistics.mean_slack, None);
    assert_eq!(report.statistics.max_slack, None);
    assert!(diagnostics.analyze_all_constraints().is_empty());
}

#[test]
fn test_analyze_is_idempotent() {
    let model = mixed_model();
    let diagnostics = SolverDiagnostics::new(&model);
    assert_eq!(diagnostics.analyze(), diagnostics.analyze());
}

#[test]
fn test_feasibility_matches_scan() {
    for model in [
        two_constraint_model(),
        capacity_model(),
        zero_bound_model(),
        mixed_model(),
    ] {
        let diagnostics = SolverDiagnostics::new(&model);
        let scan = diagnostics.detector().scan(&model);
        let diagnosis = diagnostics.diagnose_feasibility();
        assert_eq!(scan.violations.is_empty(), diagnosis.is_feasible);
        assert_eq!(diagnosis, diagnostics.analyze().feasibility());
    }
}

#[test]
fn test_binding_count_matches_rank() {
    for model in [two_constraint_model(), capacity_model(), mixed_model()] {
        let diagnostics = SolverDiagnostics::new(&model);
        let stats = diagnostics.constraint_statistics();
        let ranked = TightnessAnalyzer::new().rank(&model, stats.binding_threshold);
        assert_eq!(stats.binding_constraints, ranked.results.len());
        assert_eq!(
            stats.binding_constraints,
            diagnostics.tight_constraints(stats.binding_threshold).len()
        );
    }
}

#[test]
fn test_binding_threshold_override() {
    let model = two_constraint_model();
    let diagnostics = SolverDiagnostics::new(&model).with_binding_threshold(0.9);
    assert_eq!(diagnostics.constraint_statistics().binding_constraints, 1);
    let report = diagnostics.analyze();
    assert_eq!(report.tight_constraints().len(), 1);
    assert_eq!(report.loose_constraints()[0].name, "c1");
}

#[test]
fn test_config_tolerance_applies() {
    let model = zero_bound_model();
    assert!(!SolverDiagnostics::new(&model).analyze().is_feasible);

    let config = AnalyzerConfig::new().with_absolute_tolerance(0.001);
    let report = SolverDiagnostics::with_config(&model, &config)
        .unwrap()
        .analyze();
    assert!(report.is_feasible);
}

#[test]
fn test_with_config_rejects_invalid_builder_values() {
    let model = two_constraint_model();

    let config = AnalyzerConfig::new().with_normalization_floor(0.0);
    assert!(matches!(
        SolverDiagnostics::with_config(&model, &config),
        Err(ConfigError::Invalid(_))
    ));

    let config = AnalyzerConfig::new().with_binding_threshold(f64::NAN);
    assert!(matches!(
        SolverDiagnostics::with_config(&model, &config),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_limiting_constraints() {
    let model = mixed_model();
    let diagnostics = SolverDiagnostics::new(&model);
    let limiting = diagnostics.limiting_constraints(1);
    assert_eq!(limiting.len(), 1);
    assert_eq!(limiting[0].name, "balance");
    assert_eq!(diagnostics.limiting_constraints(10).len(), 3);

    let report = diagnostics.analyze();
    assert_eq!(report.limiting_constraints(2).len(), 2);
    assert_eq!(report.limiting_constraints(99).len(), 3);
}

#[test]
fn test_analyze_constraint() {
    let model = mixed_model();
    let diagnostics = SolverDiagnostics::new(&model);

    let window = model.constraint_ref("window").unwrap();
    let analysis = diagnostics.analyze_constraint(&window).unwrap();
    assert_eq!(analysis.name(), "window");
    assert!(analysis.is_violated());
    assert!(analysis.tightness.is_some());

    let free = model.constraint_ref("free_row").unwrap();
    let analysis = diagnostics.analyze_constraint(&free).unwrap();
    assert!(analysis.tightness.is_none());
    assert!(!analysis.is_violated());

    let pending = model.constraint_ref("pending").unwrap();
    assert!(matches!(
        diagnostics.analyze_constraint(&pending),
        Err(AnalysisError::Evaluation { .. })
    ));
}

#[test]
fn test_analyze_constraint_rejects_foreign_reference() {
    let model = mixed_model();
    let foreign = ConstraintRef::new(ModelId::next(), 0, "balance");
    assert!(matches!(
        SolverDiagnostics::new(&model).analyze_constraint(&foreign),
        Err(AnalysisError::InvalidReference { .. })
    ));
}

#[test]
fn test_analyze_all_constraints_in_order() {
    let model = mixed_model();
    let analyses = SolverDiagnostics::new(&model).analyze_all_constraints();
    let names: Vec<_> = analyses.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["balance", "budget", "free_row", "window"]);
    assert_eq!(analyses.len() + 1, model.constraint_count());
}

#[test]
fn test_violations_sorted_by_severity() {
    let mut model = LinearModel::new("sorting");
    model.add_variable("x");
    model.set_value("x", 100.02).unwrap();
    for (name, bound) in [("mild", 100.0), ("severe", 50.0), ("mild_too", 100.005)] {
        model
            .add_constraint(
                solvescope_linear::LinearConstraint::new(name)
                    .term("x", 1.0)
                    .at_most(bound),
            )
            .unwrap();
    }
    let report = SolverDiagnostics::new(&model).analyze();
    let order: Vec<_> = report
        .violations
        .iter()
        .map(|v| (v.name.as_str(), v.severity))
        .collect();
    assert_eq!(
        order,
        vec![
            ("severe", Severity::Critical),
            ("mild", Severity::Medium),
            ("mild_too", Severity::Medium),
        ]
    );

    let groups = report.violations_by_severity();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, Severity::Critical);
    assert_eq!(groups[1].1.len(), 2);
}

#[test]
fn test_report_rendering() {
    let model = mixed_model();
    let text = SolverDiagnostics::new(&model).analyze().to_string();

    assert!(text.contains("INFEASIBLE"));
    assert!(text.contains("[CRITICAL] window UPPER_BOUND_VIOLATION"));
    assert!(text.contains("Tight constraints"));
    assert!(text.contains("Loose constraints"));
    assert!(text.contains("1 constraints could not be evaluated"));
    assert!(text.contains("dual n/a"));
}

#[test]
fn test_feasible_rendering() {
    let model = two_constraint_model();
    let text = SolverDiagnostics::new(&model).analyze().to_string();
    assert!(text.contains("Feasibility: FEASIBLE"));
    assert!(!text.contains("Violations:"));
}

#[test]
fn test_overflowing_slack_stays_out_of_statistics() {
    let mut model = LinearModel::new("extreme");
    model.add_variable("x");
    model.set_value("x", 1e308).unwrap();
    model
        .add_constraint(
            solvescope_linear::LinearConstraint::new("huge")
                .term("x", 1.0)
                .at_least(-1e308),
        )
        .unwrap();

    let stats = SolverDiagnostics::new(&model).constraint_statistics();
    assert_eq!(stats.failed_evaluations, 1);
    assert_eq!(stats.mean_slack, None);
    assert_eq!(stats.max_slack, None);
}
