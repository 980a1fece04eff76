use clap::Subcommand;
use sitepulse_core::{HealthConfig, HealthWeights};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "weights.time", "stability_factor")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Apply a named indicator-weight preset
    Preset {
        /// Preset name: balanced, schedule, budget, or stability
        name: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = HealthConfig::load_or_default();
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = HealthConfig::load_or_default();
            config.set(&key, &value)?;
            println!("ok");
        }
        ConfigAction::Preset { name } => {
            let weights = match name.as_str() {
                "balanced" => HealthWeights::balanced(),
                "schedule" => HealthWeights::schedule_focused(),
                "budget" => HealthWeights::budget_focused(),
                "stability" => HealthWeights::stability_focused(),
                other => {
                    eprintln!(
                        "unknown preset: {other} (expected balanced, schedule, budget, stability)"
                    );
                    std::process::exit(1);
                }
            };
            let mut config = HealthConfig::load_or_default();
            config.weights = weights;
            config.save()?;
            println!(
                "weights set to {name}: time {:.2}, cost {:.2}, stability {:.2}",
                config.weights.time, config.weights.cost, config.weights.stability
            );
        }
        ConfigAction::List => {
            let config = HealthConfig::load_or_default();
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = HealthConfig::default();
            config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
