// Single source of truth for all default values.

// --- Engine ---
pub const DEFAULT_ANTIBIOTIC_FULL_EFFECT_DAYS: f64 = 14.0;
pub const DEFAULT_ANTIBIOTIC_MAX_DAYS: f64 = 21.0;
pub const DEFAULT_PROBIOTIC_FULL_EFFECT_DAYS: f64 = 14.0;
pub const DEFAULT_PROBIOTIC_MAX_DAYS: f64 = 30.0;

// --- Interpretation ---
pub const DEFAULT_SHARP_DECLINE_RATIO: f64 = 0.2;
pub const DEFAULT_DEFICIENCY_RATIO: f64 = 0.4;
pub const DEFAULT_OVERGROWTH_RATIO: f64 = 4.0;
pub const DEFAULT_MARKED_INCREASE_RATIO: f64 = 5.0;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// --- Files ---
pub const PROJECT_CONFIG_FILENAME: &str = "flora.toml";
