use serde::{Deserialize, Serialize};

use super::defaults;

/// Ratio thresholds (simulated / baseline) for the interpretation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpretationConfig {
    /// At or below this ratio a taxon is reported as in sharp decline.
    pub sharp_decline_ratio: f64,
    /// Below this ratio a taxon is reported as deficient (dysbiosis risk).
    pub deficiency_ratio: f64,
    /// Above this ratio a taxon is reported as overgrown (infection risk).
    pub overgrowth_ratio: f64,
    /// At or above this ratio a taxon is reported as markedly increased.
    pub marked_increase_ratio: f64,
}

impl Default for InterpretationConfig {
    fn default() -> Self {
        Self {
            sharp_decline_ratio: defaults::DEFAULT_SHARP_DECLINE_RATIO,
            deficiency_ratio: defaults::DEFAULT_DEFICIENCY_RATIO,
            overgrowth_ratio: defaults::DEFAULT_OVERGROWTH_RATIO,
            marked_increase_ratio: defaults::DEFAULT_MARKED_INCREASE_RATIO,
        }
    }
}
