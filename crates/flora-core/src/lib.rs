//! # flora-core
//!
//! Foundation crate for the Flora microbiota simulator.
//! Defines the reference tables, request/result types, traits, errors,
//! config, and tracing setup. Every other crate in the workspace depends on this.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod reference;
pub mod tables;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::FloraConfig;
pub use errors::{FloraError, FloraResult};
pub use model::{
    DurationClass, Factor, FactorGroup, FactorKind, SimulationRequest, SimulationResult, Taxon,
    TaxonOutcome,
};
pub use reference::ReferenceData;
pub use tables::{BaselineTable, EffectTable, FactorEffects};
