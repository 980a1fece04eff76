//! Cost-health calculator.
//!
//! Compares the executed-cost ratio against the task-progress ratio. The
//! penalty is asymmetric: spending ahead of progress hurts the score,
//! spending behind it never does.

use serde::{Deserialize, Serialize};

/// Budget position relative to progress, with a 5% tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    UnderBudget,
    OnBudget,
    OverBudget,
}

impl BudgetState {
    /// Classify a cost delta (cost ratio minus progress ratio).
    pub fn from_delta(cost_delta: f64) -> Self {
        if cost_delta > 0.05 {
            Self::OverBudget
        } else if cost_delta < -0.05 {
            Self::UnderBudget
        } else {
            Self::OnBudget
        }
    }
}

/// Budget discipline sub-indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostHealth {
    /// Budget discipline score (0-100)
    pub score: f64,
    /// cost_executed / budget_total (0 when no budget)
    pub cost_ratio: f64,
    /// tasks_completed / tasks_total (1.0 when no tasks)
    pub progress_ratio: f64,
    /// cost_ratio - progress_ratio, positive = spending faster than progressing
    pub cost_delta: f64,
}

impl CostHealth {
    /// Budget position for this result.
    pub fn budget_state(&self) -> BudgetState {
        BudgetState::from_delta(self.cost_delta)
    }

    /// Human-readable budget summary.
    pub fn describe(&self) -> String {
        match self.budget_state() {
            BudgetState::OverBudget => format!(
                "Spend is {:.0}% ahead of progress",
                self.cost_delta * 100.0
            ),
            BudgetState::UnderBudget => format!(
                "Spend is {:.0}% behind progress",
                self.cost_delta.abs() * 100.0
            ),
            BudgetState::OnBudget => "Spend tracks progress".to_string(),
        }
    }
}

/// Linear extrapolation of the final cost from the current spend rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProjection {
    /// Extrapolated total cost at completion
    pub projected_total: f64,
    /// Budget left against the projection
    pub remaining: f64,
    /// Whether the projection exceeds the approved budget
    pub will_exceed: bool,
}

/// Calculate the cost sub-indicator.
///
/// A project with no approved budget is vacuously healthy: there is no
/// ceiling to overrun, so the result is pinned to a full score with zeroed
/// ratios.
pub fn calculate_cost_health(
    budget_total: f64,
    cost_executed: f64,
    tasks_completed: u32,
    tasks_total: u32,
) -> CostHealth {
    if budget_total == 0.0 {
        return CostHealth {
            score: 100.0,
            cost_ratio: 0.0,
            progress_ratio: 0.0,
            cost_delta: 0.0,
        };
    }

    let cost_ratio = cost_executed / budget_total;
    let progress_ratio = if tasks_total > 0 {
        tasks_completed as f64 / tasks_total as f64
    } else {
        1.0
    };

    let cost_delta = cost_ratio - progress_ratio;
    let penalty = cost_delta.max(0.0);
    let score = (100.0 - penalty * 100.0).clamp(0.0, 100.0);

    CostHealth {
        score,
        cost_ratio,
        progress_ratio,
        cost_delta,
    }
}

/// Project the remaining budget by extrapolating spend linearly over progress.
///
/// With no completed work there is nothing to extrapolate from: the
/// projection falls back to the spend so far and never flags an overrun.
pub fn project_budget_remaining(
    budget_total: f64,
    cost_executed: f64,
    progress_ratio: f64,
) -> BudgetProjection {
    if progress_ratio == 0.0 {
        return BudgetProjection {
            projected_total: cost_executed,
            remaining: budget_total - cost_executed,
            will_exceed: false,
        };
    }

    let projected_total = cost_executed / progress_ratio;
    BudgetProjection {
        projected_total,
        remaining: budget_total - projected_total,
        will_exceed: projected_total > budget_total,
    }
}
