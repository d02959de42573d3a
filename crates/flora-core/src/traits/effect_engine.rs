use crate::errors::FloraResult;
use crate::model::{SimulationRequest, SimulationResult};

/// Effect composition over fixed reference tables.
pub trait IEffectEngine: Send + Sync {
    /// Combined multiplier of every selected factor on one taxon.
    fn compute_multiplier(&self, taxon: &str, request: &SimulationRequest) -> FloraResult<f64>;

    /// Apply the request to every baseline taxon.
    fn simulate(&self, request: &SimulationRequest) -> FloraResult<SimulationResult>;
}
