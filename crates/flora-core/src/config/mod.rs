//! Configuration system for Flora.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod defaults;
pub mod engine_config;
pub mod flora_config;
pub mod interpretation_config;
pub mod observability_config;

pub use engine_config::{DurationClassConfig, EngineConfig};
pub use flora_config::FloraConfig;
pub use interpretation_config::InterpretationConfig;
pub use observability_config::ObservabilityConfig;
