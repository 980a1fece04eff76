//! Stability calculator.
//!
//! Penalizes plan churn: scope changes, reopened tasks, date shifts, and
//! responsible reassignments all count as unstable events, weighted by how
//! disruptive each kind tends to be.

use serde::{Deserialize, Serialize};

/// Churn level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityState {
    Stable,
    Moderate,
    Unstable,
}

impl StabilityState {
    /// Classify a stability score (stable >= 80, moderate >= 50).
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Stable
        } else if score >= 50.0 {
            Self::Moderate
        } else {
            Self::Unstable
        }
    }
}

/// Plan stability sub-indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityHealth {
    /// Plan stability score (0-100)
    pub score: f64,
    /// General scope/plan changes observed
    pub changes_count: u32,
    /// Tasks reopened after completion
    pub reopened_count: u32,
    /// Planned-date shifts observed
    pub date_changes_count: u32,
    /// Responsible reassignments observed
    pub responsible_changes_count: u32,
    /// Weighted event count, rounded to the nearest whole event
    pub total_unstable_events: f64,
}

impl StabilityHealth {
    /// Churn level for this result.
    pub fn stability_state(&self) -> StabilityState {
        StabilityState::from_score(self.score)
    }

    /// Name the churn drivers worth surfacing.
    ///
    /// Only notable counts produce a message: any reopening, more than 3
    /// date shifts, more than 5 general changes. Quiet projects return an
    /// empty list.
    pub fn instability_sources(&self) -> Vec<String> {
        let mut sources = Vec::new();

        if self.reopened_count > 0 {
            sources.push(format!(
                "{} task(s) reopened after completion",
                self.reopened_count
            ));
        }
        if self.date_changes_count > 3 {
            sources.push(format!(
                "Planned dates shifted {} times",
                self.date_changes_count
            ));
        }
        if self.changes_count > 5 {
            sources.push(format!("High change volume ({} changes)", self.changes_count));
        }

        sources
    }
}

/// Calculate the stability sub-indicator.
///
/// Reopenings weigh double (they signal rework); responsible reassignments
/// weigh half (least disruptive). The penalty per weighted event is the
/// configurable `stability_factor`.
pub fn calculate_stability_health(
    changes_count: u32,
    tasks_reopened: u32,
    date_changes_count: u32,
    responsible_changes_count: u32,
    stability_factor: f64,
) -> StabilityHealth {
    let total_unstable_events = changes_count as f64
        + tasks_reopened as f64 * 2.0
        + date_changes_count as f64
        + responsible_changes_count as f64 * 0.5;

    let penalty = total_unstable_events * stability_factor;
    let score = (100.0 - penalty).clamp(0.0, 100.0);

    StabilityHealth {
        score,
        changes_count,
        reopened_count: tasks_reopened,
        date_changes_count,
        responsible_changes_count,
        total_unstable_events: total_unstable_events.round(),
    }
}
