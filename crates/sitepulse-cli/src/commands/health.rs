use chrono::{DateTime, Utc};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use sitepulse_core::health::{project_budget_remaining, render_report};
use sitepulse_core::portfolio::render_portfolio;
use sitepulse_core::{
    summarize_portfolio, CoreError, HealthConfig, HealthEngine, JsonFileSource, MetricsSource,
    ProjectHealth, DEFAULT_PROJECT_KEY,
};

#[derive(Subcommand)]
pub enum HealthAction {
    /// Evaluate a snapshot and print the assessment as JSON
    Compute {
        /// Metrics snapshot file (JSON)
        #[arg(long)]
        metrics: PathBuf,
        /// Project key inside the snapshot file
        #[arg(long, default_value = DEFAULT_PROJECT_KEY)]
        project: String,
        /// Config file to evaluate with (defaults to the user config)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Evaluate at this instant (RFC 3339) instead of the wall clock
        #[arg(long)]
        now: Option<String>,
        /// Skip snapshot validation
        #[arg(long)]
        skip_validation: bool,
    },
    /// Evaluate a snapshot and print a text report
    Report {
        /// Metrics snapshot file (JSON)
        #[arg(long)]
        metrics: PathBuf,
        /// Project key inside the snapshot file
        #[arg(long, default_value = DEFAULT_PROJECT_KEY)]
        project: String,
        /// Config file to evaluate with (defaults to the user config)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Evaluate at this instant (RFC 3339) instead of the wall clock
        #[arg(long)]
        now: Option<String>,
        /// Skip snapshot validation
        #[arg(long)]
        skip_validation: bool,
    },
    /// Evaluate every project in a snapshot file
    Portfolio {
        /// Metrics snapshot file (JSON)
        #[arg(long)]
        metrics: PathBuf,
        /// Config file to evaluate with (defaults to the user config)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Evaluate at this instant (RFC 3339) instead of the wall clock
        #[arg(long)]
        now: Option<String>,
        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate snapshots without evaluating them
    Validate {
        /// Metrics snapshot file (JSON)
        #[arg(long)]
        metrics: PathBuf,
        /// Project key to validate (defaults to every project in the file)
        #[arg(long)]
        project: Option<String>,
    },
}

pub fn run(action: HealthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        HealthAction::Compute {
            metrics,
            project,
            config,
            now,
            skip_validation,
        } => {
            let engine = build_engine(config.as_deref())?;
            let source = JsonFileSource::open(&metrics)?;
            let at = resolve_now(now.as_deref())?;

            let health = evaluate_one(&engine, &source, &project, at, skip_validation)?;
            tracing::info!("Evaluated '{}': {} ({:.1})", project, health.status, health.score);
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        HealthAction::Report {
            metrics,
            project,
            config,
            now,
            skip_validation,
        } => {
            let engine = build_engine(config.as_deref())?;
            let source = JsonFileSource::open(&metrics)?;
            let snapshot = source.fetch(&project)?;
            if !skip_validation {
                snapshot.validate()?;
            }

            let health = engine.evaluate_at(&snapshot, resolve_now(now.as_deref())?);
            print!("{}", render_report(&project, &health));

            let projection = project_budget_remaining(
                snapshot.budget_total,
                snapshot.cost_executed,
                health.cost.progress_ratio,
            );
            if projection.will_exceed {
                println!(
                    "Budget projection: final cost {:.0} against budget {:.0} ({:.0} over)",
                    projection.projected_total,
                    snapshot.budget_total,
                    projection.projected_total - snapshot.budget_total
                );
            }
        }
        HealthAction::Portfolio {
            metrics,
            config,
            now,
            json,
        } => {
            let engine = build_engine(config.as_deref())?;
            let source = JsonFileSource::open(&metrics)?;
            let at = resolve_now(now.as_deref())?;

            let mut evaluated = Vec::new();
            for key in source.projects() {
                let snapshot = source.fetch(&key)?;
                evaluated.push((key, engine.evaluate_at(&snapshot, at)));
            }
            tracing::info!("Evaluated {} project(s) from {}", evaluated.len(), metrics.display());

            let summary = summarize_portfolio(&evaluated);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render_portfolio(&evaluated, &summary));
            }
        }
        HealthAction::Validate { metrics, project } => {
            let source = JsonFileSource::open(&metrics)?;
            let keys = match project {
                Some(key) => vec![key],
                None => source.projects(),
            };

            let mut failed = false;
            for key in keys {
                let snapshot = source.fetch(&key)?;
                match snapshot.validate() {
                    Ok(()) => println!("{key}: ok"),
                    Err(e) => {
                        failed = true;
                        eprintln!("{key}: {e}");
                    }
                }
            }
            if failed {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn build_engine(config_path: Option<&Path>) -> Result<HealthEngine, CoreError> {
    let config = match config_path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            HealthConfig::load_from(path)?
        }
        None => HealthConfig::load_or_default(),
    };
    config.validate()?;
    Ok(HealthEngine::with_config(config))
}

fn evaluate_one(
    engine: &HealthEngine,
    source: &JsonFileSource,
    project: &str,
    now: DateTime<Utc>,
    skip_validation: bool,
) -> Result<ProjectHealth, Box<dyn std::error::Error>> {
    if skip_validation {
        let snapshot = source.fetch(project)?;
        Ok(engine.evaluate_at(&snapshot, now))
    } else {
        Ok(engine.evaluate_project(source, project, now)?)
    }
}

fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match now {
        Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}
