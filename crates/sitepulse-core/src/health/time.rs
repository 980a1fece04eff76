//! Time-health calculator.
//!
//! Compares actual task-completion progress against the fraction of the
//! planned window already elapsed. A project halfway through its window
//! with half its tasks done is perfectly on plan.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Schedule position relative to the plan, with a 5% tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleState {
    Ahead,
    OnTrack,
    Behind,
}

impl ScheduleState {
    /// Classify a progress delta (actual minus expected).
    pub fn from_delta(progress_delta: f64) -> Self {
        if progress_delta > 0.05 {
            Self::Ahead
        } else if progress_delta < -0.05 {
            Self::Behind
        } else {
            Self::OnTrack
        }
    }
}

/// Schedule adherence sub-indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeHealth {
    /// Schedule adherence score (0-100)
    pub score: f64,
    /// Completed task fraction (1.0 when no tasks exist)
    pub actual_progress: f64,
    /// Elapsed fraction of the planned window (0-1)
    pub expected_progress: f64,
    /// actual - expected, positive = ahead of schedule
    pub progress_delta: f64,
    /// Progress delta expressed in plan days
    pub days_delta: i64,
}

impl TimeHealth {
    /// Schedule position for this result.
    pub fn schedule_state(&self) -> ScheduleState {
        ScheduleState::from_delta(self.progress_delta)
    }

    /// Human-readable schedule summary.
    pub fn describe(&self) -> String {
        match self.schedule_state() {
            ScheduleState::Ahead => {
                format!("Ahead of schedule by about {} day(s)", self.days_delta.abs())
            }
            ScheduleState::Behind => {
                format!("Behind schedule by about {} day(s)", self.days_delta.abs())
            }
            ScheduleState::OnTrack => "On track".to_string(),
        }
    }
}

/// Calculate the time sub-indicator for a planned window.
///
/// Ahead and behind are penalized symmetrically: the score depends only on
/// the magnitude of the progress delta. Degenerate windows count as one day;
/// a project with no tasks reads as complete.
pub fn calculate_time_health(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    tasks_completed: u32,
    tasks_total: u32,
    now: DateTime<Utc>,
) -> TimeHealth {
    let total_days = ceil_days(end_date - start_date).max(1);
    let days_elapsed = ceil_days(now - start_date).max(0);

    let expected_progress = if days_elapsed <= 0 {
        0.0
    } else if days_elapsed >= total_days {
        1.0
    } else {
        days_elapsed as f64 / total_days as f64
    };

    let actual_progress = if tasks_total == 0 {
        // No tasks on record reads as nothing left to do.
        1.0
    } else {
        tasks_completed as f64 / tasks_total as f64
    };

    let progress_delta = actual_progress - expected_progress;
    let days_delta = (progress_delta * total_days as f64).round() as i64;
    let score = (100.0 - progress_delta.abs() * 100.0).clamp(0.0, 100.0);

    TimeHealth {
        score,
        actual_progress,
        expected_progress,
        progress_delta,
        days_delta,
    }
}

/// Whole days spanned by a duration, rounded up.
fn ceil_days(duration: Duration) -> i64 {
    (duration.num_seconds() as f64 / 86_400.0).ceil() as i64
}
