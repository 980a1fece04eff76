//! Overall health classification.

use serde::{Deserialize, Serialize};

use crate::config::StatusThresholds;

/// Overall status badge derived from the composite score.
///
/// Serialized lowercase to match the status badges consumed downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Classify a composite score against the configured cut points.
    pub fn from_score(score: f64, thresholds: &StatusThresholds) -> Self {
        if score >= thresholds.healthy {
            Self::Healthy
        } else if score >= thresholds.warning {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    /// Lowercase badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
