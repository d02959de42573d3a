//! Multiplicative effect composition.
//!
//! ```text
//! multiplier(taxon) = Π applied(f, taxon)   for f in selected
//!
//! applied(f, taxon) = v                          binary
//!                   = 1 + (v - 1) × scale(f)     duration-scaled
//!
//! v        = effects[f][taxon], 1.0 when absent
//! scale(f) = clamp(days(f) / full_effect_days, 0, 1)
//!
//! simulated(taxon) = max(0, baseline(taxon) × multiplier(taxon))
//! ```
//!
//! Factors only ever multiply, so the selection order does not matter.

use flora_core::config::EngineConfig;
use flora_core::constants::{MIN_CONCENTRATION, NEUTRAL_MULTIPLIER};
use flora_core::errors::ConfigurationError;
use flora_core::model::{FactorKind, SimulationRequest, SimulationResult, Taxon, TaxonOutcome};
use flora_core::tables::{BaselineTable, EffectTable, FactorEffects};
use serde::Serialize;

use crate::scaling;

/// A selected factor with its duration already resolved and clamped.
#[derive(Debug, Clone)]
pub struct ResolvedFactor<'a> {
    pub effects: &'a FactorEffects,
    /// Clamped duration, `None` for binary factors.
    pub days: Option<f64>,
    /// 1.0 for binary factors.
    pub scale: f64,
}

impl ResolvedFactor<'_> {
    /// This factor's applied multiplier on `taxon`.
    pub fn applied(&self, taxon: &str) -> f64 {
        let tabulated = self.effects.multiplier(taxon);
        match self.effects.factor.kind {
            FactorKind::Binary => tabulated,
            FactorKind::DurationScaled(_) => scaling::interpolate(tabulated, self.scale),
        }
    }
}

/// Look up every selected factor and resolve its duration.
///
/// Fails on the first factor missing from the table, or on a
/// duration-scaled factor with no duration for it or its class.
pub fn resolve_selection<'a>(
    effects: &'a EffectTable,
    config: &EngineConfig,
    request: &SimulationRequest,
) -> Result<Vec<ResolvedFactor<'a>>, ConfigurationError> {
    request
        .selected()
        .iter()
        .map(|name| {
            let entry = effects
                .get(name)
                .ok_or_else(|| ConfigurationError::UnknownFactor { name: name.clone() })?;
            match entry.factor.kind {
                FactorKind::Binary => Ok(ResolvedFactor {
                    effects: entry,
                    days: None,
                    scale: 1.0,
                }),
                FactorKind::DurationScaled(class) => {
                    let raw = request.duration_for(name, class).ok_or_else(|| {
                        ConfigurationError::MissingDuration {
                            factor: name.clone(),
                        }
                    })?;
                    let class_config = config.class(class);
                    let days = scaling::clamp_duration(raw, class_config);
                    if days != raw {
                        tracing::warn!(
                            factor = %name,
                            requested = raw,
                            clamped = days,
                            max_days = class_config.max_days,
                            "duration outside configured range, clamped"
                        );
                    }
                    Ok(ResolvedFactor {
                        effects: entry,
                        days: Some(days),
                        scale: scaling::duration_scale(days, class_config),
                    })
                }
            }
        })
        .collect()
}

/// Product of the applied multipliers of `resolved` on one taxon.
pub fn compose(taxon: &str, resolved: &[ResolvedFactor<'_>]) -> f64 {
    resolved
        .iter()
        .fold(NEUTRAL_MULTIPLIER, |acc, f| acc * f.applied(taxon))
}

/// Fails with `UnknownTaxon` when `taxon` is not in the baseline.
fn ensure_taxon(baseline: &BaselineTable, taxon: &str) -> Result<(), ConfigurationError> {
    if baseline.contains(taxon) {
        Ok(())
    } else {
        Err(ConfigurationError::UnknownTaxon {
            name: taxon.to_string(),
        })
    }
}

/// Combined multiplier of every selected factor on `taxon`.
///
/// A baseline taxon that no selected factor touches gets 1.0.
pub fn compute_multiplier(
    baseline: &BaselineTable,
    effects: &EffectTable,
    config: &EngineConfig,
    taxon: &str,
    request: &SimulationRequest,
) -> Result<f64, ConfigurationError> {
    ensure_taxon(baseline, taxon)?;
    let resolved = resolve_selection(effects, config, request)?;
    Ok(compose(taxon, &resolved))
}

/// Apply a request to every taxon of `baseline`, in baseline order.
///
/// The selection is resolved once up front; any configuration error aborts
/// the whole simulation.
pub fn simulate(
    baseline: &BaselineTable,
    effects: &EffectTable,
    config: &EngineConfig,
    request: &SimulationRequest,
) -> Result<SimulationResult, ConfigurationError> {
    let resolved = resolve_selection(effects, config, request)?;
    let outcomes = baseline
        .iter()
        .map(|entry| {
            let multiplier = compose(entry.taxon.as_str(), &resolved);
            TaxonOutcome {
                taxon: entry.taxon.clone(),
                baseline: entry.value,
                multiplier,
                simulated: (entry.value * multiplier).max(MIN_CONCENTRATION),
            }
        })
        .collect();
    Ok(SimulationResult::new(outcomes))
}

/// One factor's share of a taxon's multiplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub factor: String,
    pub kind: FactorKind,
    /// Value in the effect table (1.0 when the factor does not list the taxon).
    pub tabulated: f64,
    /// Clamped duration for duration-scaled factors.
    pub days: Option<f64>,
    /// Fraction of the tabulated effect applied.
    pub scale: f64,
    pub applied: f64,
}

/// Per-factor breakdown of one taxon's multiplier, for debugging and audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiplierBreakdown {
    pub taxon: Taxon,
    pub contributions: Vec<FactorContribution>,
    /// Product of every contribution's `applied`.
    pub multiplier: f64,
}

/// Compute a taxon's multiplier with a full breakdown of each factor.
pub fn compute_breakdown(
    baseline: &BaselineTable,
    effects: &EffectTable,
    config: &EngineConfig,
    taxon: &str,
    request: &SimulationRequest,
) -> Result<MultiplierBreakdown, ConfigurationError> {
    ensure_taxon(baseline, taxon)?;
    let resolved = resolve_selection(effects, config, request)?;
    let contributions: Vec<FactorContribution> = resolved
        .iter()
        .map(|f| FactorContribution {
            factor: f.effects.factor.name.clone(),
            kind: f.effects.factor.kind,
            tabulated: f.effects.multiplier(taxon),
            days: f.days,
            scale: f.scale,
            applied: f.applied(taxon),
        })
        .collect();

    Ok(MultiplierBreakdown {
        taxon: Taxon::from(taxon),
        multiplier: compose(taxon, &resolved),
        contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flora_core::model::{DurationClass, Factor, FactorGroup};

    fn tables() -> (BaselineTable, EffectTable) {
        let baseline = BaselineTable::new([("X", 100.0), ("Y", 10.0)]).unwrap();
        let effects = EffectTable::new([
            FactorEffects {
                factor: Factor::binary("A", FactorGroup::Lifestyle),
                multipliers: [(Taxon::from("X"), 2.0)].into_iter().collect(),
            },
            FactorEffects {
                factor: Factor::duration_scaled("AB", FactorGroup::Antibiotic, DurationClass::Antibiotic),
                multipliers: [(Taxon::from("X"), 0.5), (Taxon::from("Y"), 3.0)]
                    .into_iter()
                    .collect(),
            },
        ])
        .unwrap();
        (baseline, effects)
    }

    #[test]
    fn unknown_factor_is_rejected() {
        let (baseline, effects) = tables();
        let req = SimulationRequest::builder().select("Nope").build();
        let err = compute_multiplier(&baseline, &effects, &EngineConfig::default(), "X", &req)
            .unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownFactor { name: "Nope".into() });
    }

    #[test]
    fn missing_duration_is_rejected() {
        let (baseline, effects) = tables();
        let req = SimulationRequest::builder().select("AB").build();
        let err = simulate(&baseline, &effects, &EngineConfig::default(), &req).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingDuration { factor: "AB".into() });
    }

    #[test]
    fn breakdown_product_equals_multiplier() {
        let (baseline, effects) = tables();
        let req = SimulationRequest::builder()
            .select_all(["A", "AB"])
            .duration("AB", 7.0)
            .build();
        let bd = compute_breakdown(&baseline, &effects, &EngineConfig::default(), "X", &req)
            .unwrap();
        assert_eq!(bd.contributions.len(), 2);
        let product: f64 = bd.contributions.iter().map(|c| c.applied).product();
        assert!((product - bd.multiplier).abs() < 1e-12);
        assert_eq!(bd.contributions[0].days, None);
        assert_eq!(bd.contributions[1].days, Some(7.0));
        assert_eq!(bd.contributions[1].scale, 0.5);
        assert_eq!(bd.contributions[1].applied, 0.75);
    }

    #[test]
    fn untouched_taxon_has_neutral_multiplier() {
        let (baseline, effects) = tables();
        let req = SimulationRequest::builder().select("A").build();
        let m = compute_multiplier(&baseline, &effects, &EngineConfig::default(), "Y", &req)
            .unwrap();
        assert_eq!(m, 1.0);
    }

    #[test]
    fn taxon_outside_baseline_is_rejected() {
        let (baseline, effects) = tables();
        let config = EngineConfig::default();
        let neutral = SimulationRequest::neutral();
        let expected = ConfigurationError::UnknownTaxon {
            name: "Helicobacter".into(),
        };

        let err = compute_multiplier(&baseline, &effects, &config, "Helicobacter", &neutral)
            .unwrap_err();
        assert_eq!(err, expected);
        let err = compute_breakdown(&baseline, &effects, &config, "Helicobacter", &neutral)
            .unwrap_err();
        assert_eq!(err, expected);
    }
}
