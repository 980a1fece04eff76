//! Narrative summary and text report rendering.
//!
//! The summary runs a fixed sequence of independent checks, each adding at
//! most one message: overall status, schedule drift beyond 10%, overspend
//! beyond 10%, and stability below 60. Checks never suppress each other.

use super::{HealthStatus, ProjectHealth};

/// Build the list of summary messages for an assessment.
pub fn summarize(health: &ProjectHealth) -> Vec<String> {
    let mut messages = Vec::new();

    messages.push(
        match health.status {
            HealthStatus::Healthy => "Project health is good",
            HealthStatus::Warning => "Project health needs attention",
            HealthStatus::Critical => "Project health is critical",
        }
        .to_string(),
    );

    if health.time.progress_delta.abs() > 0.1 {
        messages.push(health.time.describe());
    }
    if health.cost.cost_delta > 0.1 {
        messages.push(health.cost.describe());
    }
    if health.stability.score < 60.0 {
        messages.push(format!(
            "Plan churn is high: {} unstable event(s) recorded",
            health.stability.total_unstable_events
        ));
    }

    messages
}

/// Join the summary messages into one narrative sentence block.
pub fn narrative(health: &ProjectHealth) -> String {
    let mut text = summarize(health).join(". ");
    text.push('.');
    text
}

/// Render a full assessment as a text report.
pub fn render_report(project: &str, health: &ProjectHealth) -> String {
    let mut output = String::new();
    output.push_str(&format!("\nProject Health Report: {project}\n"));
    output.push_str(&"=".repeat(72));
    output.push_str("\n\n");

    output.push_str(&format!(
        "Overall: {:>5.1}  [{}]\n\n",
        health.score, health.status
    ));

    output.push_str(&format!("{:<12} {:>8}  {}\n", "Indicator", "Score", "Detail"));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    output.push_str(&format!(
        "{:<12} {:>8.1}  {}\n",
        "Time",
        health.time.score,
        health.time.describe()
    ));
    output.push_str(&format!(
        "{:<12} {:>8.1}  {}\n",
        "Cost",
        health.cost.score,
        health.cost.describe()
    ));
    output.push_str(&format!(
        "{:<12} {:>8.1}  {} unstable event(s)\n",
        "Stability", health.stability.score, health.stability.total_unstable_events
    ));

    output.push('\n');
    output.push_str("Signals:\n");
    output.push_str(&format!(
        "  Friction {:>6.1}  {}\n",
        health.friction.level,
        health.friction.describe()
    ));
    output.push_str(&format!(
        "  Tension  {:>6.1}  (friction {:.1} + instability {:.1})\n",
        health.tension.level,
        health.tension.friction_component,
        health.tension.instability_component
    ));
    output.push_str(&format!(
        "  Inertia  {:>6.1}  ({:.0}% tasks, {:.0}% budget)\n",
        health.inertia.level,
        health.inertia.task_ratio * 100.0,
        health.inertia.cost_ratio * 100.0
    ));

    let sources = health.stability.instability_sources();
    if !sources.is_empty() {
        output.push('\n');
        output.push_str("Instability sources:\n");
        for source in &sources {
            output.push_str(&format!("  - {source}\n"));
        }
    }

    output.push('\n');
    output.push_str(&narrative(health));
    output.push('\n');

    output
}
