//! Immutable reference tables.

pub mod baseline;
pub mod effects;

pub use baseline::{BaselineEntry, BaselineTable};
pub use effects::{EffectTable, FactorEffects};
