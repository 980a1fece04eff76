//! # SitePulse Core Library
//!
//! This library provides the project health scoring engine for SitePulse.
//! It implements a CLI-first philosophy where every evaluation is available
//! via a standalone CLI binary, with any dashboard being a thin presentation
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Health Engine**: a pipeline of pure, stateless calculators over one
//!   immutable metrics snapshot; three primary sub-indicators feed the
//!   weighted overall score, three secondary signals ride along as
//!   diagnostics
//! - **Configuration**: TOML-based tuning (weights, stability factor,
//!   tension blend, status cut points), injected explicitly -- no globals
//! - **Sources**: pluggable snapshot providers (JSON file, in-memory); the
//!   only fallible layer
//! - **Portfolio**: pure rollup of many assessments for fleet views
//!
//! ## Key Components
//!
//! - [`HealthEngine`]: evaluates a [`ProjectMetrics`] snapshot into a
//!   [`ProjectHealth`] assessment
//! - [`HealthConfig`]: engine tuning, persisted as TOML
//! - [`MetricsSource`]: trait for snapshot providers

pub mod config;
pub mod error;
pub mod health;
pub mod metrics;
pub mod portfolio;
pub mod source;

pub use config::{HealthConfig, HealthWeights, StatusThresholds, TensionWeights};
pub use error::{ConfigError, CoreError, Result, SourceError, ValidationError};
pub use health::{
    BudgetProjection, BudgetState, CostHealth, FrictionSignal, HealthEngine, HealthStatus,
    InertiaSignal, ProjectHealth, ScheduleState, StabilityHealth, StabilityState, TensionSignal,
    TimeHealth,
};
pub use metrics::ProjectMetrics;
pub use portfolio::{summarize_portfolio, PortfolioSummary};
pub use source::{JsonFileSource, MetricsSource, StaticSource, DEFAULT_PROJECT_KEY};
