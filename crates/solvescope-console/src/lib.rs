//! Colorful console output for constraint analysis.
//!
//! Provides a custom `tracing` layer that formats analysis events with
//! colors, and a colored rendering of [`DiagnosticsReport`].
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (analysis start/end)
//! - **DEBUG**: Per-constraint evaluation, scoring and violations
//! - **WARN**: Constraints that could not be evaluated

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use solvescope_analysis::{DiagnosticsReport, TightnessResult, Violation};
use solvescope_core::Severity;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const RULE: &str = "══════════════════════════════════════════════════════════";

/// Initializes console output for analysis events.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default `solvescope_analysis=info` filter.
/// Evaluation warnings from `solvescope_core` are always shown.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = default_filter();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(AnalysisConsoleLayer)
            .try_init();
    });
}

fn default_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(
            "solvescope_analysis=info"
                .parse()
                .unwrap_or_else(|_| LevelFilter::INFO.into()),
        )
        .from_env_lossy()
        .add_directive(
            "solvescope_core=warn"
                .parse()
                .unwrap_or_else(|_| LevelFilter::WARN.into()),
        )
}

/// A tracing layer that formats analysis events with colors.
pub struct AnalysisConsoleLayer;

impl<S: Subscriber> Layer<S> for AnalysisConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        if !metadata.target().starts_with("solvescope") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    constraint: Option<String>,
    error: Option<String>,
    constraint_count: Option<u64>,
    binding_count: Option<u64>,
    violation_count: Option<u64>,
    failure_count: Option<u64>,
    duration_ms: Option<u64>,
    feasible: Option<bool>,
    score: Option<f64>,
    magnitude: Option<f64>,
    severity: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "message" => self.message = Some(s),
            "constraint" => self.constraint = Some(s),
            "error" => self.error = Some(s),
            "severity" => self.severity = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "constraint_count" => self.constraint_count = Some(value),
            "binding_count" => self.binding_count = Some(value),
            "violation_count" => self.violation_count = Some(value),
            "failure_count" => self.failure_count = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "score" => self.score = Some(value),
            "magnitude" => self.magnitude = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "feasible" {
            self.feasible = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            "constraint" => self.constraint = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            "severity" => self.severity = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("analysis_start") => return format_analysis_start(v),
        Some("analysis_end") => return format_analysis_end(v),
        _ => {}
    }

    match v.message.as_deref() {
        Some("Constraint evaluation failed") => format_failure(v),
        Some("Constraint violated") => format_violated(v),
        Some("Constraint scored") => format_scored(v),
        _ => String::new(),
    }
}

fn format_analysis_start(v: &EventVisitor) -> String {
    let constraints = v.constraint_count.unwrap_or(0);
    format!(
        "{} Analysing {} constraints",
        "▶".bright_green().bold(),
        constraints.to_formatted_string(&Locale::en).bright_yellow()
    )
}

fn format_analysis_end(v: &EventVisitor) -> String {
    let status = if v.feasible.unwrap_or(false) {
        "FEASIBLE".bright_green().bold().to_string()
    } else {
        "INFEASIBLE".bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} Analysis complete │ {} │ {} constraints │ {} binding │ {} violated │ {}",
        "■".bright_cyan().bold(),
        status,
        v.constraint_count
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        v.binding_count
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
        v.violation_count
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_red(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );

    let failures = v.failure_count.unwrap_or(0);
    if failures > 0 {
        output.push_str(&format!(
            " │ {} not evaluated",
            failures.to_formatted_string(&Locale::en).bright_magenta()
        ));
    }
    output
}

fn format_failure(v: &EventVisitor) -> String {
    format!(
        "{} {} │ {}",
        "✗".bright_red(),
        v.constraint.as_deref().unwrap_or("?").white().bold(),
        v.error.as_deref().unwrap_or("evaluation failed").bright_black()
    )
}

fn format_violated(v: &EventVisitor) -> String {
    format!(
        "{} {} violated by {:.6} │ {}",
        "!".bright_red(),
        v.constraint.as_deref().unwrap_or("?").white(),
        v.magnitude.unwrap_or(0.0),
        v.severity.as_deref().unwrap_or("?")
    )
}

fn format_scored(v: &EventVisitor) -> String {
    format!(
        "{} {} score {:.4}",
        "·".bright_black(),
        v.constraint.as_deref().unwrap_or("?").bright_black(),
        v.score.unwrap_or(0.0)
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_severity(severity: Severity) -> String {
    let label = format!("{:<8}", severity.as_str());
    match severity {
        Severity::Critical => label.bright_red().bold().to_string(),
        Severity::High => label.red().to_string(),
        Severity::Medium => label.yellow().to_string(),
        Severity::Low => label.bright_black().to_string(),
    }
}

fn format_score(score: f64) -> String {
    let text = format!("{:.4}", score);
    if score >= 0.99 {
        text.bright_red().bold().to_string()
    } else if score >= 0.5 {
        text.bright_yellow().to_string()
    } else {
        text.bright_green().to_string()
    }
}

fn push_violation(out: &mut String, v: &Violation) {
    let _ = writeln!(
        out,
        "  {} {:<24} {} by {:.6}  {}",
        format_severity(v.severity),
        v.name.white().bold(),
        v.kind,
        v.magnitude,
        v.expression.bright_black()
    );
}

fn push_tightness(out: &mut String, r: &TightnessResult) {
    let dual = r
        .dual
        .map_or_else(|| "n/a".to_string(), |d| format!("{:.6}", d));
    let _ = writeln!(
        out,
        "  {:<24} score {}  slack {:>12.6}  dual {}",
        r.name.white(),
        format_score(r.score),
        r.raw_slack,
        dual.bright_black()
    );
}

/// Renders a report with colors.
pub fn render_report(report: &DiagnosticsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE.bright_cyan());
    if report.is_feasible {
        let _ = writeln!(out, "  {}", "FEASIBLE".bright_green().bold());
    } else {
        let _ = writeln!(
            out,
            "  {} │ {} violated",
            "INFEASIBLE".bright_red().bold(),
            report.violations.len().to_formatted_string(&Locale::en)
        );
    }
    let _ = writeln!(out, "{}", RULE.bright_cyan());

    for (severity, group) in report.violations_by_severity() {
        let _ = writeln!(
            out,
            "{} {}",
            format_severity(severity),
            format!("({})", group.len()).bright_black()
        );
        for v in group {
            push_violation(&mut out, v);
        }
    }

    let _ = writeln!(
        out,
        "\n{} {}",
        "Tight constraints".white().bold(),
        format!("(score >= {:.2})", report.binding_threshold).bright_black()
    );
    for r in report.tight_constraints() {
        push_tightness(&mut out, r);
    }

    let loose = report.loose_constraints();
    if !loose.is_empty() {
        let _ = writeln!(out, "\n{}", "Loose constraints".white().bold());
        for r in loose {
            push_tightness(&mut out, r);
        }
    }

    let s = &report.statistics;
    let _ = writeln!(
        out,
        "\n{} {} constraints │ {} binding │ {} violated │ {} unbounded",
        "Σ".bright_cyan(),
        s.total_constraints.to_formatted_string(&Locale::en),
        s.binding_constraints.to_formatted_string(&Locale::en),
        s.violated_constraints.to_formatted_string(&Locale::en),
        s.unbounded_constraints.to_formatted_string(&Locale::en),
    );
    if let (Some(mean), Some(max)) = (s.mean_slack, s.max_slack) {
        let _ = writeln!(out, "  mean slack {:.6} │ max slack {:.6}", mean, max);
    }

    if !report.failures.is_empty() {
        let _ = writeln!(
            out,
            "\n{} {} constraints could not be evaluated",
            "✗".bright_red(),
            report.failures.len().to_formatted_string(&Locale::en)
        );
        for failure in &report.failures {
            let _ = writeln!(
                out,
                "  {}: {}",
                failure.constraint.white(),
                failure.error.to_string().bright_black()
            );
        }
    }
    out
}

/// Prints a colored report to stdout.
pub fn print_report(report: &DiagnosticsReport) {
    let mut stdout = io::stdout().lock();
    let _ = write!(stdout, "{}", render_report(report));
    let _ = stdout.flush();
}

/// Serialises a report as pretty-printed JSON.
#[cfg(feature = "json")]
pub fn render_json(report: &DiagnosticsReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests;
