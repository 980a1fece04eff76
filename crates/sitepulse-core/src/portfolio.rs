//! Portfolio-level rollup of per-project assessments.
//!
//! Pure aggregation over already-evaluated projects. Nothing is cached;
//! callers re-evaluate and re-summarize whenever snapshots change.

use serde::{Deserialize, Serialize};

use crate::health::{HealthStatus, ProjectHealth};

/// Aggregate view over a set of evaluated projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Number of projects evaluated
    pub project_count: usize,
    /// Mean overall score (0 when the portfolio is empty)
    pub average_score: f64,
    /// Projects classified healthy
    pub healthy_count: usize,
    /// Projects classified warning
    pub warning_count: usize,
    /// Projects classified critical
    pub critical_count: usize,
    /// Lowest-scoring project, if any
    pub worst_project: Option<String>,
}

/// Roll a set of assessments up into one portfolio summary.
///
/// Ties for the worst project resolve to the first one listed, so the
/// result is stable for a given input order.
pub fn summarize_portfolio(projects: &[(String, ProjectHealth)]) -> PortfolioSummary {
    let mut healthy_count = 0;
    let mut warning_count = 0;
    let mut critical_count = 0;
    let mut score_sum = 0.0;
    let mut worst: Option<(&str, f64)> = None;

    for (name, health) in projects {
        score_sum += health.score;
        match health.status {
            HealthStatus::Healthy => healthy_count += 1,
            HealthStatus::Warning => warning_count += 1,
            HealthStatus::Critical => critical_count += 1,
        }

        match worst {
            Some((_, lowest)) if health.score >= lowest => {}
            _ => worst = Some((name, health.score)),
        }
    }

    let project_count = projects.len();
    let average_score = if project_count > 0 {
        score_sum / project_count as f64
    } else {
        0.0
    };

    PortfolioSummary {
        project_count,
        average_score,
        healthy_count,
        warning_count,
        critical_count,
        worst_project: worst.map(|(name, _)| name.to_string()),
    }
}

/// Render a portfolio as a text table with a summary footer.
pub fn render_portfolio(
    projects: &[(String, ProjectHealth)],
    summary: &PortfolioSummary,
) -> String {
    let mut output = String::new();
    output.push_str("\nPortfolio Health\n");
    output.push_str(&"=".repeat(72));
    output.push_str("\n\n");

    if projects.is_empty() {
        output.push_str("No projects evaluated.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<24} {:>7} {:>10} {:>7} {:>7} {:>7}\n",
        "Project", "Score", "Status", "Time", "Cost", "Stab"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for (name, health) in projects {
        output.push_str(&format!(
            "{:<24} {:>7.1} {:>10} {:>7.1} {:>7.1} {:>7.1}\n",
            truncate(name, 24),
            health.score,
            health.status.label(),
            health.time.score,
            health.cost.score,
            health.stability.score
        ));
    }

    output.push_str(&"-".repeat(72));
    output.push_str("\n\n");
    output.push_str(&format!(
        "{} project(s), average score {:.1}: {} healthy, {} warning, {} critical\n",
        summary.project_count,
        summary.average_score,
        summary.healthy_count,
        summary.warning_count,
        summary.critical_count
    ));
    if let Some(worst) = &summary.worst_project {
        output.push_str(&format!("Lowest score: {worst}\n"));
    }

    output
}

// Counts chars, not bytes: project keys are arbitrary JSON map keys and a
// byte slice could land inside a multibyte character.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
