//! Secondary diagnostic signals: friction, tension, inertia.
//!
//! These overlays enrich dashboards with why-is-it-stuck context. They are
//! informational only and never feed back into the overall health score.

use serde::{Deserialize, Serialize};

use crate::config::TensionWeights;

/// Obstruction level from blocked and paused work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrictionSignal {
    /// Obstruction level (0-100)
    pub level: f64,
    /// Blocked tasks feeding the level
    pub blocked_tasks: u32,
    /// Paused tasks feeding the level
    pub paused_tasks: u32,
    /// Unsatisfied cross-task dependencies
    pub unresolved_dependencies: u32,
}

impl FrictionSignal {
    /// Human-readable obstruction summary.
    pub fn describe(&self) -> String {
        if self.level == 0.0 {
            return "No obstructions".to_string();
        }
        format!(
            "{} blocked, {} paused, {} unresolved dependency(ies)",
            self.blocked_tasks, self.paused_tasks, self.unresolved_dependencies
        )
    }
}

/// Stress signal blending friction with plan instability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionSignal {
    /// Stress level (0-100)
    pub level: f64,
    /// Weighted friction contribution
    pub friction_component: f64,
    /// Weighted instability contribution (from 100 minus stability score)
    pub instability_component: f64,
}

/// Accumulated progress and spend; high inertia resists redirection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InertiaSignal {
    /// Accumulation level (0-100)
    pub level: f64,
    /// Completed task fraction (0 when no tasks)
    pub task_ratio: f64,
    /// Executed cost fraction (0 when no budget)
    pub cost_ratio: f64,
}

/// Calculate friction from blocked/paused work and open dependencies.
///
/// Blocked tasks weigh 10, unresolved dependencies 8, paused tasks 5.
pub fn calculate_friction(
    tasks_blocked: u32,
    tasks_paused: u32,
    unresolved_dependencies: u32,
) -> FrictionSignal {
    let level = (tasks_blocked as f64 * 10.0
        + tasks_paused as f64 * 5.0
        + unresolved_dependencies as f64 * 8.0)
        .clamp(0.0, 100.0);

    FrictionSignal {
        level,
        blocked_tasks: tasks_blocked,
        paused_tasks: tasks_paused,
        unresolved_dependencies,
    }
}

/// Calculate tension as the weighted blend of friction and instability.
pub fn calculate_tension(
    friction_level: f64,
    stability_score: f64,
    weights: &TensionWeights,
) -> TensionSignal {
    let friction_component = friction_level * weights.friction;
    let instability_component = (100.0 - stability_score) * weights.instability;
    let level = (friction_component + instability_component).clamp(0.0, 100.0);

    TensionSignal {
        level,
        friction_component,
        instability_component,
    }
}

/// Calculate inertia as the scaled average of task and cost accumulation.
///
/// Unlike the primary calculators, both ratios fall back to 0 when their
/// denominator is 0: an empty project has nothing accumulated.
pub fn calculate_inertia(
    tasks_completed: u32,
    tasks_total: u32,
    cost_executed: f64,
    budget_total: f64,
) -> InertiaSignal {
    let task_ratio = if tasks_total > 0 {
        tasks_completed as f64 / tasks_total as f64
    } else {
        0.0
    };
    let cost_ratio = if budget_total > 0.0 {
        cost_executed / budget_total
    } else {
        0.0
    };

    let level = ((task_ratio + cost_ratio) / 2.0 * 100.0).clamp(0.0, 100.0);

    InertiaSignal {
        level,
        task_ratio,
        cost_ratio,
    }
}
