//! Raw project metrics snapshot.
//!
//! `ProjectMetrics` is the single input record for the health engine. It is
//! assembled by an external data-access layer (see [`crate::source`]) and
//! treated as immutable here: calculators read it, nothing mutates it, and
//! every evaluation starts from a fresh snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Immutable metrics snapshot for one project.
///
/// Monetary fields are currency-agnostic; counts are lifetime totals as
/// recorded by the project-management system. Count fields default to zero
/// when absent from a serialized snapshot, so older payloads that omit
/// newer counters still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    /// Planned project start
    pub start_date: DateTime<Utc>,
    /// Planned project end (may be in the past for overrun projects)
    pub end_date: DateTime<Utc>,
    /// Approved monetary ceiling
    #[serde(default)]
    pub budget_total: f64,
    /// Amount actually disbursed/confirmed
    #[serde(default)]
    pub cost_executed: f64,
    /// Total task count
    #[serde(default)]
    pub tasks_total: u32,
    /// Completed tasks (expected `<= tasks_total`)
    #[serde(default)]
    pub tasks_completed: u32,
    /// Tasks currently being worked
    #[serde(default)]
    pub tasks_in_progress: u32,
    /// Tasks explicitly paused
    #[serde(default)]
    pub tasks_paused: u32,
    /// Tasks blocked on something external
    #[serde(default)]
    pub tasks_blocked: u32,
    /// Tasks reopened after completion (rework signal)
    #[serde(default)]
    pub tasks_reopened: u32,
    /// General change events over the project lifetime
    #[serde(default)]
    pub changes_count: u32,
    /// Schedule date changes over the project lifetime
    #[serde(default)]
    pub date_changes_count: u32,
    /// Responsible-person reassignments over the project lifetime
    #[serde(default)]
    pub responsible_changes_count: u32,
    /// Cross-task dependencies not yet satisfied
    #[serde(default)]
    pub unresolved_dependencies: u32,
}

impl ProjectMetrics {
    /// Check the snapshot invariants the calculators assume.
    ///
    /// The engine itself never validates (degenerate inputs still resolve
    /// to defined scores); callers that ingest snapshots from untrusted
    /// payloads should call this first.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the project window is inverted,
    /// a monetary field is negative, or `tasks_completed > tasks_total`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end_date <= self.start_date {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.budget_total < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "budget_total".to_string(),
                message: format!("must be non-negative, got {}", self.budget_total),
            });
        }
        if self.cost_executed < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "cost_executed".to_string(),
                message: format!("must be non-negative, got {}", self.cost_executed),
            });
        }
        if self.tasks_completed > self.tasks_total {
            return Err(ValidationError::InvalidValue {
                field: "tasks_completed".to_string(),
                message: format!(
                    "{} completed exceeds {} total",
                    self.tasks_completed, self.tasks_total
                ),
            });
        }
        Ok(())
    }

    /// Tasks neither completed nor in any special state.
    pub fn tasks_open(&self) -> u32 {
        self.tasks_total.saturating_sub(
            self.tasks_completed + self.tasks_in_progress + self.tasks_paused + self.tasks_blocked,
        )
    }
}
