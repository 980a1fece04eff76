//! TOML-based engine configuration.
//!
//! All tunables of the health engine live here: the weights of the three
//! primary indicators, the stability penalty factor, the tension blend
//! weights, and the status cut points. Nothing in the engine reads global
//! state -- a [`HealthConfig`] is passed in explicitly, so two tenants can
//! score the same snapshot with different tunings in the same process.
//!
//! Configuration is stored at `~/.config/sitepulse/config.toml`. Set
//! `SITEPULSE_ENV=dev` to use a separate development directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Returns `~/.config/sitepulse[-dev]/` based on SITEPULSE_ENV.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SITEPULSE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("sitepulse-dev")
    } else {
        base_dir.join("sitepulse")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Weights for the three primary health indicators.
///
/// Treated as relative weights; [`HealthWeights::normalize`] rescales them
/// to sum to 1.0 for tenants that tune them freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthWeights {
    /// Weight of the time indicator (schedule adherence)
    pub time: f64,
    /// Weight of the cost indicator (spend vs progress)
    pub cost: f64,
    /// Weight of the stability indicator (change churn)
    pub stability: f64,
}

impl HealthWeights {
    /// Default balanced weighting: schedule and budget dominate.
    pub fn balanced() -> Self {
        Self {
            time: 0.4,
            cost: 0.4,
            stability: 0.2,
        }
    }

    /// Emphasize schedule adherence (deadline-driven tenants).
    pub fn schedule_focused() -> Self {
        Self {
            time: 0.6,
            cost: 0.25,
            stability: 0.15,
        }
    }

    /// Emphasize budget discipline (fixed-price contracts).
    pub fn budget_focused() -> Self {
        Self {
            time: 0.25,
            cost: 0.6,
            stability: 0.15,
        }
    }

    /// Emphasize plan stability (rework-sensitive work).
    pub fn stability_focused() -> Self {
        Self {
            time: 0.3,
            cost: 0.3,
            stability: 0.4,
        }
    }

    /// Normalize weights to sum to 1.0.
    pub fn normalize(&mut self) {
        let sum = self.time + self.cost + self.stability;
        if sum > 0.0 {
            self.time /= sum;
            self.cost /= sum;
            self.stability /= sum;
        }
    }

    /// Validate that all weights are non-negative and at least one is positive.
    ///
    /// # Errors
    /// Returns a [`ConfigError::InvalidValue`] naming the offending weight.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("weights.time", self.time),
            ("weights.cost", self.cost),
            ("weights.stability", self.stability),
        ];

        for (name, weight) in weights {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ConfigError::InvalidValue {
                    key: name.to_string(),
                    message: format!("must be in [0.0, 1.0], got {weight}"),
                });
            }
        }

        if self.time + self.cost + self.stability <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "weights".to_string(),
                message: "at least one weight must be positive".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Blend weights for the tension signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensionWeights {
    /// Contribution of the friction level
    pub friction: f64,
    /// Contribution of instability (100 - stability score)
    pub instability: f64,
}

impl Default for TensionWeights {
    fn default() -> Self {
        Self {
            friction: 0.6,
            instability: 0.4,
        }
    }
}

/// Cut points mapping the overall score to a status badge.
///
/// Must stay consistent with the status badges rendered by the dashboard:
/// `healthy` at or above the first cut, `warning` at or above the second,
/// `critical` below both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusThresholds {
    /// Minimum score for `healthy`
    pub healthy: f64,
    /// Minimum score for `warning`
    pub warning: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            healthy: 80.0,
            warning: 60.0,
        }
    }
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/sitepulse/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Primary indicator weights
    #[serde(default)]
    pub weights: HealthWeights,
    /// Penalty per weighted unstable event
    #[serde(default = "default_stability_factor")]
    pub stability_factor: f64,
    /// Tension blend weights
    #[serde(default)]
    pub tension_weights: TensionWeights,
    /// Status cut points
    #[serde(default)]
    pub thresholds: StatusThresholds,
}

fn default_stability_factor() -> f64 {
    2.0
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            weights: HealthWeights::default(),
            stability_factor: default_stability_factor(),
            tension_weights: TensionWeights::default(),
            thresholds: StatusThresholds::default(),
        }
    }
}

impl HealthConfig {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from an explicit path (per-tenant profiles, tests).
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from the default location, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Validate the full configuration.
    ///
    /// # Errors
    /// Returns a [`ConfigError::InvalidValue`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        if self.stability_factor < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "stability_factor".to_string(),
                message: format!("must be non-negative, got {}", self.stability_factor),
            });
        }
        if self.tension_weights.friction < 0.0 || self.tension_weights.instability < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "tension_weights".to_string(),
                message: "weights must be non-negative".to_string(),
            });
        }
        if self.thresholds.warning > self.thresholds.healthy {
            return Err(ConfigError::InvalidValue {
                key: "thresholds".to_string(),
                message: format!(
                    "warning cut ({}) must not exceed healthy cut ({})",
                    self.thresholds.warning, self.thresholds.healthy
                ),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        self.save()?;
        Ok(())
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(String::new()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Number(_) => {
                        let n: f64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| ConfigError::InvalidValue {
                                key: key.to_string(),
                                message: format!("'{value}' is not a finite number"),
                            })?
                    }
                    serde_json::Value::Object(_) => {
                        return Err(ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: "cannot assign to a config section".to_string(),
                        })
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }
}
