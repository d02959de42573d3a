/// Flora version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Multiplier meaning "no effect".
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Lower bound of every simulated concentration.
pub const MIN_CONCENTRATION: f64 = 0.0;
