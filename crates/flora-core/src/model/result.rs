use serde::{Deserialize, Serialize};

use super::taxon::Taxon;

/// Simulated state of one taxon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonOutcome {
    pub taxon: Taxon,
    /// Unmodified reference concentration (CFU/g).
    pub baseline: f64,
    /// Product of every selected factor's applied effect on this taxon.
    pub multiplier: f64,
    /// `max(0, baseline * multiplier)`.
    pub simulated: f64,
}

impl TaxonOutcome {
    /// simulated / baseline. Baselines are always positive.
    pub fn ratio(&self) -> f64 {
        self.simulated / self.baseline
    }
}

/// Full simulated table, one outcome per baseline taxon in baseline order.
/// Recomputed in full for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    outcomes: Vec<TaxonOutcome>,
}

impl SimulationResult {
    pub fn new(outcomes: Vec<TaxonOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn get(&self, taxon: &str) -> Option<&TaxonOutcome> {
        self.outcomes.iter().find(|o| o.taxon.as_str() == taxon)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaxonOutcome> {
        self.outcomes.iter()
    }

    pub fn outcomes(&self) -> &[TaxonOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl<'a> IntoIterator for &'a SimulationResult {
    type Item = &'a TaxonOutcome;
    type IntoIter = std::slice::Iter<'a, TaxonOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
