use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::factor::DurationClass;

/// One simulation run's input: the selected factors and their exposure
/// durations in days. Immutable once built.
///
/// Durations are raw user input. The engine clamps them into the
/// configured range of each duration class.
///
/// Deserialization goes through the builder, so a repeated name in
/// `selected` is applied once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSimulationRequest")]
pub struct SimulationRequest {
    selected: Vec<String>,
    factor_durations: BTreeMap<String, f64>,
    class_durations: BTreeMap<DurationClass, f64>,
}

impl SimulationRequest {
    pub fn builder() -> SimulationRequestBuilder {
        SimulationRequestBuilder::default()
    }

    /// A request that selects nothing. Simulating it reproduces the baseline.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Selected factor names, in selection order, without duplicates.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_neutral(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, factor: &str) -> bool {
        self.selected.iter().any(|s| s == factor)
    }

    /// Raw duration for a factor: its own value, else its class value.
    pub fn duration_for(&self, factor: &str, class: DurationClass) -> Option<f64> {
        self.factor_durations
            .get(factor)
            .or_else(|| self.class_durations.get(&class))
            .copied()
    }

    /// Copy of this request with the selection replaced by `order`.
    /// Durations are kept.
    pub fn reordered<I, S>(&self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = SimulationRequestBuilder {
            selected: Vec::new(),
            factor_durations: self.factor_durations.clone(),
            class_durations: self.class_durations.clone(),
        };
        for name in order {
            builder = builder.select(name);
        }
        builder.build()
    }
}

/// Builder for [`SimulationRequest`].
#[derive(Debug, Clone, Default)]
pub struct SimulationRequestBuilder {
    selected: Vec<String>,
    factor_durations: BTreeMap<String, f64>,
    class_durations: BTreeMap<DurationClass, f64>,
}

impl SimulationRequestBuilder {
    /// Select a factor. Selecting the same factor twice has no extra effect.
    pub fn select(mut self, factor: impl Into<String>) -> Self {
        let factor = factor.into();
        if !self.selected.contains(&factor) {
            self.selected.push(factor);
        }
        self
    }

    pub fn select_all<I, S>(mut self, factors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for factor in factors {
            self = self.select(factor);
        }
        self
    }

    /// Duration for one factor. Takes precedence over its class duration.
    pub fn duration(mut self, factor: impl Into<String>, days: f64) -> Self {
        self.factor_durations.insert(factor.into(), days);
        self
    }

    /// Duration shared by every selected factor of a class, e.g. the
    /// single "antibiotic course length" slider.
    pub fn class_duration(mut self, class: DurationClass, days: f64) -> Self {
        self.class_durations.insert(class, days);
        self
    }

    pub fn build(self) -> SimulationRequest {
        SimulationRequest {
            selected: self.selected,
            factor_durations: self.factor_durations,
            class_durations: self.class_durations,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSimulationRequest {
    selected: Vec<String>,
    factor_durations: BTreeMap<String, f64>,
    class_durations: BTreeMap<DurationClass, f64>,
}

impl From<RawSimulationRequest> for SimulationRequest {
    fn from(raw: RawSimulationRequest) -> Self {
        SimulationRequestBuilder {
            selected: Vec::new(),
            factor_durations: raw.factor_durations,
            class_durations: raw.class_durations,
        }
        .select_all(raw.selected)
        .build()
    }
}
