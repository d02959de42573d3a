//! # flora-effects
//!
//! Multiplicative effect composition over immutable reference tables.
//! Binary factors apply their tabulated multiplier in full; duration-scaled
//! factors (antibiotics, probiotics) are interpolated by exposure days.
//! A ratio-based rule table turns the simulated table into observations.

pub mod engine;
pub mod formula;
pub mod interpretation;
pub mod scaling;

pub use engine::EffectEngine;
pub use formula::{FactorContribution, MultiplierBreakdown};
pub use interpretation::{Interpretation, Observation, ObservationKind, RuleSet};
