//! Project health assessment.
//!
//! A pipeline of stateless calculators over one immutable
//! [`ProjectMetrics`](crate::metrics::ProjectMetrics) snapshot: three
//! primary sub-indicators (time, cost, stability) feed the weighted overall
//! score, three secondary signals (friction, tension, inertia) ride along
//! as diagnostics. Everything is pure arithmetic with guarded divisions;
//! evaluation cannot fail.

pub mod cost;
pub mod signals;
pub mod stability;
pub mod status;
pub mod summary;
pub mod time;

pub use cost::{
    calculate_cost_health, project_budget_remaining, BudgetProjection, BudgetState, CostHealth,
};
pub use signals::{
    calculate_friction, calculate_inertia, calculate_tension, FrictionSignal, InertiaSignal,
    TensionSignal,
};
pub use stability::{calculate_stability_health, StabilityHealth, StabilityState};
pub use status::HealthStatus;
pub use summary::{narrative, render_report, summarize};
pub use time::{calculate_time_health, ScheduleState, TimeHealth};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::HealthConfig;
use crate::error::Result;
use crate::metrics::ProjectMetrics;
use crate::source::MetricsSource;

/// Full health assessment for one project snapshot.
///
/// Fully derived with no identity of its own: recomputed fresh on every
/// evaluation, never cached. Consumers must not assume field stability
/// across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHealth {
    /// Overall health score (0-100)
    pub score: f64,
    /// Overall status badge
    pub status: HealthStatus,
    /// Schedule adherence sub-indicator
    pub time: TimeHealth,
    /// Budget discipline sub-indicator
    pub cost: CostHealth,
    /// Plan stability sub-indicator
    pub stability: StabilityHealth,
    /// Obstruction signal (diagnostic only)
    pub friction: FrictionSignal,
    /// Stress signal (diagnostic only)
    pub tension: TensionSignal,
    /// Accumulation signal (diagnostic only)
    pub inertia: InertiaSignal,
    /// When this assessment was computed
    pub calculated_at: DateTime<Utc>,
}

/// Health scoring engine.
///
/// Holds the tuning configuration and nothing else: no clock, no cache,
/// no mutable state. Safe to share across threads and call concurrently.
#[derive(Debug, Clone)]
pub struct HealthEngine {
    config: HealthConfig,
}

impl HealthEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self {
            config: HealthConfig::default(),
        }
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: HealthConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine evaluates with.
    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Evaluate a snapshot against the current wall clock.
    pub fn evaluate(&self, metrics: &ProjectMetrics) -> ProjectHealth {
        self.evaluate_at(metrics, Utc::now())
    }

    /// Evaluate a snapshot at an explicit instant.
    ///
    /// Deterministic: identical inputs (including `now`) produce an
    /// identical assessment, `calculated_at` included.
    pub fn evaluate_at(&self, metrics: &ProjectMetrics, now: DateTime<Utc>) -> ProjectHealth {
        let time = calculate_time_health(
            metrics.start_date,
            metrics.end_date,
            metrics.tasks_completed,
            metrics.tasks_total,
            now,
        );
        let cost = calculate_cost_health(
            metrics.budget_total,
            metrics.cost_executed,
            metrics.tasks_completed,
            metrics.tasks_total,
        );
        let stability = calculate_stability_health(
            metrics.changes_count,
            metrics.tasks_reopened,
            metrics.date_changes_count,
            metrics.responsible_changes_count,
            self.config.stability_factor,
        );

        let friction = calculate_friction(
            metrics.tasks_blocked,
            metrics.tasks_paused,
            metrics.unresolved_dependencies,
        );
        let tension =
            calculate_tension(friction.level, stability.score, &self.config.tension_weights);
        let inertia = calculate_inertia(
            metrics.tasks_completed,
            metrics.tasks_total,
            metrics.cost_executed,
            metrics.budget_total,
        );

        let weights = &self.config.weights;
        let score = (time.score * weights.time
            + cost.score * weights.cost
            + stability.score * weights.stability)
            .clamp(0.0, 100.0);
        let status = HealthStatus::from_score(score, &self.config.thresholds);

        ProjectHealth {
            score,
            status,
            time,
            cost,
            stability,
            friction,
            tension,
            inertia,
            calculated_at: now,
        }
    }

    /// Fetch, validate, and evaluate one project from a source.
    ///
    /// # Errors
    /// Returns an error if the source has no snapshot for `project` or the
    /// snapshot fails validation.
    pub fn evaluate_project(
        &self,
        source: &dyn MetricsSource,
        project: &str,
        now: DateTime<Utc>,
    ) -> Result<ProjectHealth> {
        let metrics = source.fetch(project)?;
        metrics.validate()?;
        Ok(self.evaluate_at(&metrics, now))
    }
}

impl Default for HealthEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HealthWeights, StatusThresholds};
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    /// On-plan baseline: all three primary indicators at 100.
    fn baseline() -> ProjectMetrics {
        let now = fixed_now();
        ProjectMetrics {
            start_date: now - Duration::days(50),
            end_date: now + Duration::days(50),
            budget_total: 1000.0,
            cost_executed: 500.0,
            tasks_total: 10,
            tasks_completed: 5,
            tasks_in_progress: 3,
            tasks_paused: 0,
            tasks_blocked: 0,
            tasks_reopened: 0,
            changes_count: 0,
            date_changes_count: 0,
            responsible_changes_count: 0,
            unresolved_dependencies: 0,
        }
    }

    #[test]
    fn test_perfect_project_scores_full() {
        let health = HealthEngine::new().evaluate_at(&baseline(), fixed_now());
        assert_eq!(health.time.score, 100.0);
        assert_eq!(health.cost.score, 100.0);
        assert_eq!(health.stability.score, 100.0);
        assert_eq!(health.score, 100.0);
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.calculated_at, fixed_now());
    }

    #[test]
    fn test_weighted_aggregation() {
        // time 100, cost 60, stability 92 under default weights 0.4/0.4/0.2.
        let mut metrics = baseline();
        metrics.cost_executed = 900.0;
        metrics.changes_count = 2;
        metrics.tasks_reopened = 1;

        let health = HealthEngine::new().evaluate_at(&metrics, fixed_now());
        assert_eq!(health.time.score, 100.0);
        assert!((health.cost.score - 60.0).abs() < 1e-9);
        assert!((health.stability.score - 92.0).abs() < 1e-9);
        assert!((health.score - 82.4).abs() < 1e-9);
        assert_eq!(health.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_custom_weights_shift_the_blend() {
        let mut metrics = baseline();
        metrics.cost_executed = 900.0;

        let config = HealthConfig {
            weights: HealthWeights::budget_focused(),
            ..HealthConfig::default()
        };
        let budget_led = HealthEngine::with_config(config).evaluate_at(&metrics, fixed_now());
        let balanced = HealthEngine::new().evaluate_at(&metrics, fixed_now());
        assert!(budget_led.score < balanced.score);
    }

    #[test]
    fn test_custom_thresholds_change_status() {
        let mut metrics = baseline();
        metrics.cost_executed = 900.0;
        metrics.changes_count = 2;
        metrics.tasks_reopened = 1;

        let strict = HealthConfig {
            thresholds: StatusThresholds {
                healthy: 90.0,
                warning: 70.0,
            },
            ..HealthConfig::default()
        };
        let health = HealthEngine::with_config(strict).evaluate_at(&metrics, fixed_now());
        assert!((health.score - 82.4).abs() < 1e-9);
        assert_eq!(health.status, HealthStatus::Warning);
    }

    #[test]
    fn test_signals_do_not_move_the_score() {
        let mut noisy = baseline();
        noisy.tasks_blocked = 5;
        noisy.tasks_paused = 4;
        noisy.unresolved_dependencies = 3;

        let quiet_health = HealthEngine::new().evaluate_at(&baseline(), fixed_now());
        let noisy_health = HealthEngine::new().evaluate_at(&noisy, fixed_now());
        assert!(noisy_health.friction.level > quiet_health.friction.level);
        assert_eq!(noisy_health.score, quiet_health.score);
        assert_eq!(noisy_health.status, quiet_health.status);
    }

    #[test]
    fn test_tension_links_friction_and_stability() {
        let mut metrics = baseline();
        metrics.tasks_blocked = 2;
        metrics.changes_count = 10;

        let health = HealthEngine::new().evaluate_at(&metrics, fixed_now());
        // friction 20 * 0.6 + (100 - 80) * 0.4 = 20.
        assert!((health.friction.level - 20.0).abs() < 1e-9);
        assert!((health.stability.score - 80.0).abs() < 1e-9);
        assert!((health.tension.level - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let metrics = baseline();
        let engine = HealthEngine::new();
        let first = engine.evaluate_at(&metrics, fixed_now());
        let second = engine.evaluate_at(&metrics, fixed_now());
        assert_eq!(first, second);
    }
}
