use std::sync::Arc;

use flora_core::catalog;
use flora_core::config::{EngineConfig, FloraConfig};
use flora_core::errors::FloraResult;
use flora_core::model::{SimulationRequest, SimulationResult};
use flora_core::reference::ReferenceData;
use flora_core::traits::IEffectEngine;
use tracing::debug;

use crate::formula::{self, MultiplierBreakdown};

/// Effect engine over one immutable set of reference tables.
///
/// Holds no mutable state; a single instance can serve any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct EffectEngine {
    reference: Arc<ReferenceData>,
    config: EngineConfig,
}

impl EffectEngine {
    /// Create an engine, rejecting an invalid config.
    pub fn new(reference: Arc<ReferenceData>, config: EngineConfig) -> FloraResult<Self> {
        config.validate()?;
        Ok(Self { reference, config })
    }

    /// Engine with default scaling.
    pub fn with_defaults(reference: Arc<ReferenceData>) -> Self {
        Self {
            reference,
            config: EngineConfig::default(),
        }
    }

    /// Engine over the built-in catalog with default scaling.
    pub fn standard() -> FloraResult<Self> {
        Ok(Self::with_defaults(Arc::new(catalog::standard()?)))
    }

    /// Engine configured from a full [`FloraConfig`].
    pub fn from_config(reference: Arc<ReferenceData>, config: &FloraConfig) -> FloraResult<Self> {
        Self::new(reference, config.engine.clone())
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Per-factor breakdown of one taxon's multiplier.
    pub fn explain(&self, taxon: &str, request: &SimulationRequest) -> FloraResult<MultiplierBreakdown> {
        Ok(formula::compute_breakdown(
            self.reference.baseline(),
            self.reference.effects(),
            &self.config,
            taxon,
            request,
        )?)
    }

    /// Simulate independent requests. One failing request does not affect
    /// the others.
    pub fn simulate_batch(&self, requests: &[SimulationRequest]) -> Vec<FloraResult<SimulationResult>> {
        requests.iter().map(|r| self.simulate(r)).collect()
    }
}

impl IEffectEngine for EffectEngine {
    fn compute_multiplier(&self, taxon: &str, request: &SimulationRequest) -> FloraResult<f64> {
        Ok(formula::compute_multiplier(
            self.reference.baseline(),
            self.reference.effects(),
            &self.config,
            taxon,
            request,
        )?)
    }

    fn simulate(&self, request: &SimulationRequest) -> FloraResult<SimulationResult> {
        let result = formula::simulate(
            self.reference.baseline(),
            self.reference.effects(),
            &self.config,
            request,
        );
        match &result {
            Ok(r) => debug!(
                factors = request.selected().len(),
                taxa = r.len(),
                "simulation complete"
            ),
            Err(e) => debug!(error = %e, "simulation aborted"),
        }
        Ok(result?)
    }
}
