//! Top-level Flora configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{defaults, EngineConfig, InterpretationConfig, ObservabilityConfig};
use crate::errors::ConfigError;
use crate::model::DurationClass;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`FLORA_*`)
/// 2. Project config (`flora.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FloraConfig {
    pub engine: EngineConfig,
    pub interpretation: InterpretationConfig,
    pub observability: ObservabilityConfig,
}

impl FloraConfig {
    /// Load configuration from `root/flora.toml` (if present) and the
    /// process environment, then validate.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(root, |key| std::env::var(key).ok())
    }

    /// Same as [`FloraConfig::load`] but reads overrides through `lookup`
    /// instead of the process environment.
    pub fn load_with_env<F>(root: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_config_path = root.join(defaults::PROJECT_CONFIG_FILENAME);
        let mut config = if project_config_path.exists() {
            tracing::debug!(path = %project_config_path.display(), "loading project config");
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(lookup);
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "rejecting invalid configuration");
            return Err(e);
        }
        Ok(config)
    }

    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;

        let i = &self.interpretation;
        let ratios = [
            ("interpretation.sharp_decline_ratio", i.sharp_decline_ratio),
            ("interpretation.deficiency_ratio", i.deficiency_ratio),
            ("interpretation.overgrowth_ratio", i.overgrowth_ratio),
            ("interpretation.marked_increase_ratio", i.marked_increase_ratio),
        ];
        for (field, value) in ratios {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be a positive ratio".to_string(),
                });
            }
        }
        for (field, value) in &ratios[..2] {
            if *value >= 1.0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "decline thresholds must be below 1.0".to_string(),
                });
            }
        }
        for (field, value) in &ratios[2..] {
            if *value <= 1.0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "increase thresholds must be above 1.0".to_string(),
                });
            }
        }
        if i.sharp_decline_ratio > i.deficiency_ratio {
            return Err(ConfigError::ValidationFailed {
                field: "interpretation.sharp_decline_ratio".to_string(),
                message: "must not exceed deficiency_ratio".to_string(),
            });
        }
        if i.overgrowth_ratio > i.marked_increase_ratio {
            return Err(ConfigError::ValidationFailed {
                field: "interpretation.overgrowth_ratio".to_string(),
                message: "must not exceed marked_increase_ratio".to_string(),
            });
        }

        let level = self.observability.log_level.to_ascii_lowercase();
        if !defaults::LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: format!("unknown level '{}'", self.observability.log_level),
            });
        }
        Ok(())
    }

    /// Apply environment overrides.
    /// Pattern: `FLORA_ANTIBIOTIC_MAX_DAYS`, `FLORA_PROBIOTIC_FULL_EFFECT_DAYS`,
    /// `FLORA_<THRESHOLD>_RATIO`, `FLORA_LOG_LEVEL`.
    /// Unparseable values are ignored.
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read_f64 = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());

        for class in DurationClass::ALL {
            let upper = class.as_str().to_ascii_uppercase();
            let target = self.engine.class_mut(class);
            if let Some(v) = read_f64(&format!("FLORA_{upper}_FULL_EFFECT_DAYS")) {
                target.full_effect_days = v;
            }
            if let Some(v) = read_f64(&format!("FLORA_{upper}_MAX_DAYS")) {
                target.max_days = v;
            }
        }

        let i = &mut self.interpretation;
        let ratios = [
            ("FLORA_SHARP_DECLINE_RATIO", &mut i.sharp_decline_ratio),
            ("FLORA_DEFICIENCY_RATIO", &mut i.deficiency_ratio),
            ("FLORA_OVERGROWTH_RATIO", &mut i.overgrowth_ratio),
            ("FLORA_MARKED_INCREASE_RATIO", &mut i.marked_increase_ratio),
        ];
        for (key, target) in ratios {
            if let Some(v) = read_f64(key) {
                *target = v;
            }
        }
        if let Some(level) = lookup("FLORA_LOG_LEVEL") {
            self.observability.log_level = level;
        }
    }
}
