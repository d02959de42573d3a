use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;
use crate::model::DurationClass;

/// Scaling parameters for one class of duration-scaled factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationClassConfig {
    /// Exposure (days) at which the tabulated effect applies in full.
    pub full_effect_days: f64,
    /// Upper bound for supplied durations. Larger values are clamped.
    pub max_days: f64,
}

impl DurationClassConfig {
    pub fn new(full_effect_days: f64, max_days: f64) -> Self {
        Self {
            full_effect_days,
            max_days,
        }
    }

    /// Compiled defaults for a class.
    pub fn default_for(class: DurationClass) -> Self {
        match class {
            DurationClass::Antibiotic => Self::new(
                defaults::DEFAULT_ANTIBIOTIC_FULL_EFFECT_DAYS,
                defaults::DEFAULT_ANTIBIOTIC_MAX_DAYS,
            ),
            DurationClass::Probiotic => Self::new(
                defaults::DEFAULT_PROBIOTIC_FULL_EFFECT_DAYS,
                defaults::DEFAULT_PROBIOTIC_MAX_DAYS,
            ),
        }
    }
}

/// Effect engine configuration.
///
/// Partial TOML tables are accepted: any field left out of
/// `[engine.antibiotic]` or `[engine.probiotic]` keeps that class's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEngineConfig")]
pub struct EngineConfig {
    pub antibiotic: DurationClassConfig,
    pub probiotic: DurationClassConfig,
}

impl EngineConfig {
    /// Scaling parameters for the given duration class.
    pub fn class(&self, class: DurationClass) -> &DurationClassConfig {
        match class {
            DurationClass::Antibiotic => &self.antibiotic,
            DurationClass::Probiotic => &self.probiotic,
        }
    }

    /// Every class needs positive full-effect days and non-negative max days.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for class in DurationClass::ALL {
            let c = self.class(class);
            if !(c.full_effect_days.is_finite() && c.full_effect_days > 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("engine.{class}.full_effect_days"),
                    message: "must be a positive number of days".to_string(),
                });
            }
            if !(c.max_days.is_finite() && c.max_days >= 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("engine.{class}.max_days"),
                    message: "must be a non-negative number of days".to_string(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn class_mut(&mut self, class: DurationClass) -> &mut DurationClassConfig {
        match class {
            DurationClass::Antibiotic => &mut self.antibiotic,
            DurationClass::Probiotic => &mut self.probiotic,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            antibiotic: DurationClassConfig::default_for(DurationClass::Antibiotic),
            probiotic: DurationClassConfig::default_for(DurationClass::Probiotic),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawClassConfig {
    full_effect_days: Option<f64>,
    max_days: Option<f64>,
}

impl RawClassConfig {
    fn resolve(self, class: DurationClass) -> DurationClassConfig {
        let fallback = DurationClassConfig::default_for(class);
        DurationClassConfig {
            full_effect_days: self.full_effect_days.unwrap_or(fallback.full_effect_days),
            max_days: self.max_days.unwrap_or(fallback.max_days),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEngineConfig {
    antibiotic: RawClassConfig,
    probiotic: RawClassConfig,
}

impl From<RawEngineConfig> for EngineConfig {
    fn from(raw: RawEngineConfig) -> Self {
        Self {
            antibiotic: raw.antibiotic.resolve(DurationClass::Antibiotic),
            probiotic: raw.probiotic.resolve(DurationClass::Probiotic),
        }
    }
}
