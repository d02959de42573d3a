use std::sync::Arc;

use flora_core::catalog::{self, BIFIDOBACTERIUM, CANDIDA, LACTOBACILLUS};
use flora_core::config::{DurationClassConfig, EngineConfig, FloraConfig};
use flora_core::errors::{ConfigurationError, FloraError};
use flora_core::model::{DurationClass, Factor, FactorGroup, SimulationRequest, Taxon};
use flora_core::tables::{BaselineTable, EffectTable, FactorEffects};
use flora_core::traits::IEffectEngine;
use flora_core::ReferenceData;
use flora_effects::EffectEngine;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// `{"Lactobacillus": 1e8}` with a duration-scaled antibiotic "AB" at 0.1×.
fn single_antibiotic_engine() -> EffectEngine {
    let baseline = BaselineTable::new([("Lactobacillus", 1e8)]).unwrap();
    let effects = EffectTable::new([FactorEffects {
        factor: Factor::duration_scaled("AB", FactorGroup::Antibiotic, DurationClass::Antibiotic),
        multipliers: [(Taxon::from("Lactobacillus"), 0.1)].into_iter().collect(),
    }])
    .unwrap();
    EffectEngine::with_defaults(Arc::new(ReferenceData::new(baseline, effects).unwrap()))
}

fn ab_request(days: f64) -> SimulationRequest {
    SimulationRequest::builder()
        .select("AB")
        .duration("AB", days)
        .build()
}

// ── Concrete scenarios ───────────────────────────────────────────────────

#[test]
fn antibiotic_half_course_gives_half_effect() {
    let engine = single_antibiotic_engine();
    let result = engine.simulate(&ab_request(7.0)).unwrap();
    let lacto = result.get("Lactobacillus").unwrap();
    assert!(approx_eq(lacto.multiplier, 0.55), "multiplier {}", lacto.multiplier);
    assert!(approx_eq(lacto.simulated, 5.5e7), "simulated {}", lacto.simulated);
    assert_eq!(lacto.baseline, 1e8);
}

#[test]
fn antibiotic_full_course_gives_full_effect() {
    let engine = single_antibiotic_engine();
    let result = engine.simulate(&ab_request(14.0)).unwrap();
    let lacto = result.get("Lactobacillus").unwrap();
    assert_eq!(lacto.multiplier, 0.1);
    assert!(approx_eq(lacto.simulated, 1e7));
}

#[test]
fn antibiotic_zero_days_has_no_effect() {
    let engine = single_antibiotic_engine();
    let result = engine.simulate(&ab_request(0.0)).unwrap();
    let lacto = result.get("Lactobacillus").unwrap();
    assert_eq!(lacto.multiplier, 1.0);
    assert_eq!(lacto.simulated, 1e8);
}

#[test]
fn opposing_binary_factors_cancel() {
    let baseline = BaselineTable::new([("X", 100.0)]).unwrap();
    let effects = EffectTable::new([
        FactorEffects {
            factor: Factor::binary("A", FactorGroup::Lifestyle),
            multipliers: [(Taxon::from("X"), 2.0)].into_iter().collect(),
        },
        FactorEffects {
            factor: Factor::binary("B", FactorGroup::OtherDrug),
            multipliers: [(Taxon::from("X"), 0.5)].into_iter().collect(),
        },
    ])
    .unwrap();
    let engine =
        EffectEngine::with_defaults(Arc::new(ReferenceData::new(baseline, effects).unwrap()));
    let req = SimulationRequest::builder().select_all(["A", "B"]).build();

    assert_eq!(engine.compute_multiplier("X", &req).unwrap(), 1.0);
    assert_eq!(engine.simulate(&req).unwrap().get("X").unwrap().simulated, 100.0);
}

// ── Clamping ─────────────────────────────────────────────────────────────

#[test]
fn duration_beyond_max_equals_max() {
    let engine = single_antibiotic_engine();
    let at_max = engine.simulate(&ab_request(21.0)).unwrap();
    let beyond = engine.simulate(&ab_request(30.0)).unwrap();
    assert_eq!(at_max, beyond);
}

#[test]
fn negative_duration_is_treated_as_zero() {
    let engine = single_antibiotic_engine();
    let negative = engine.simulate(&ab_request(-5.0)).unwrap();
    let zero = engine.simulate(&ab_request(0.0)).unwrap();
    assert_eq!(negative, zero);
}

#[test]
fn custom_full_effect_days_change_scaling() {
    let engine = single_antibiotic_engine();
    let config = EngineConfig {
        antibiotic: DurationClassConfig::new(7.0, 21.0),
        ..EngineConfig::default()
    };
    let engine = EffectEngine::new(Arc::new(engine.reference().clone()), config).unwrap();
    let m = engine.compute_multiplier("Lactobacillus", &ab_request(7.0)).unwrap();
    assert_eq!(m, 0.1);
}

#[test]
fn invalid_engine_config_is_rejected() {
    let reference = Arc::new(catalog::standard().unwrap());
    let config = EngineConfig {
        probiotic: DurationClassConfig::new(0.0, 30.0),
        ..EngineConfig::default()
    };
    let err = EffectEngine::new(reference, config).unwrap_err();
    assert!(matches!(err, FloraError::Config(_)));
}

// ── Configuration errors ─────────────────────────────────────────────────

#[test]
fn unknown_factor_aborts_simulation() {
    let engine = EffectEngine::standard().unwrap();
    let req = SimulationRequest::builder()
        .select("Stress")
        .select("Homeopathy")
        .build();
    let err = engine.simulate(&req).unwrap_err();
    assert!(matches!(
        err,
        FloraError::Configuration(ConfigurationError::UnknownFactor { ref name }) if name == "Homeopathy"
    ));
}

#[test]
fn unknown_taxon_is_a_configuration_error() {
    let engine = EffectEngine::standard().unwrap();
    let err = engine
        .compute_multiplier("Helicobacter", &SimulationRequest::neutral())
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn duration_scaled_factor_without_duration_is_rejected() {
    let engine = EffectEngine::standard().unwrap();
    let req = SimulationRequest::builder().select("Vancomycin").build();
    let err = engine.simulate(&req).unwrap_err();
    assert!(matches!(
        err,
        FloraError::Configuration(ConfigurationError::MissingDuration { .. })
    ));
}

// ── Built-in catalog ─────────────────────────────────────────────────────

#[test]
fn neutral_request_on_catalog_reproduces_baseline() {
    let engine = EffectEngine::standard().unwrap();
    let result = engine.simulate(&SimulationRequest::neutral()).unwrap();
    assert_eq!(result.len(), engine.reference().baseline().len());
    for (outcome, entry) in result.iter().zip(engine.reference().baseline().iter()) {
        assert_eq!(outcome.taxon, entry.taxon);
        assert_eq!(outcome.multiplier, 1.0);
        assert_eq!(outcome.simulated, entry.value);
    }
}

#[test]
fn class_duration_applies_to_every_antibiotic() {
    let engine = EffectEngine::standard().unwrap();
    let req = SimulationRequest::builder()
        .select_all(["Amoxicillin/clavulanate", "Clarithromycin"])
        .class_duration(DurationClass::Antibiotic, 14.0)
        .build();
    let m = engine.compute_multiplier(BIFIDOBACTERIUM, &req).unwrap();
    // 0.2 × 0.5 at full effect.
    assert!(approx_eq(m, 0.1), "multiplier {m}");
}

#[test]
fn mixed_selection_matches_hand_computation() {
    let engine = EffectEngine::standard().unwrap();
    let req = SimulationRequest::builder()
        .select("Poor diet")
        .select("Amoxicillin/clavulanate")
        .select("Glucocorticoids")
        .select("Lactobacillus probiotic")
        .class_duration(DurationClass::Antibiotic, 7.0)
        .duration("Lactobacillus probiotic", 28.0)
        .build();

    // Candida: amox 5.0 at half scale → 3.0; glucocorticoids 3.0;
    // probiotic 0.8 at full scale (28 days clamps to 14-day full effect).
    let candida = engine.compute_multiplier(CANDIDA, &req).unwrap();
    assert!(approx_eq(candida, 3.0 * 3.0 * 0.8), "candida {candida}");

    // Lactobacillus: poor diet 0.7, glucocorticoids 0.7, probiotic 2.0.
    let lacto = engine.compute_multiplier(LACTOBACILLUS, &req).unwrap();
    assert!(approx_eq(lacto, 0.7 * 0.7 * 2.0), "lacto {lacto}");
}

#[test]
fn explain_lists_each_selected_factor() {
    let engine = EffectEngine::standard().unwrap();
    let req = SimulationRequest::builder()
        .select_all(["Stress", "Ceftriaxone"])
        .duration("Ceftriaxone", 14.0)
        .build();
    let bd = engine.explain(CANDIDA, &req).unwrap();
    let names: Vec<&str> = bd.contributions.iter().map(|c| c.factor.as_str()).collect();
    assert_eq!(names, ["Stress", "Ceftriaxone"]);
    assert!(bd.contributions.iter().all(|c| c.applied == 1.0));
    assert_eq!(bd.multiplier, 1.0);
}

#[test]
fn batch_isolates_failures() {
    let engine = EffectEngine::standard().unwrap();
    let requests = vec![
        SimulationRequest::neutral(),
        SimulationRequest::builder().select("Unknown").build(),
        SimulationRequest::builder().select("Metformin").build(),
    ];
    let results = engine.simulate_batch(&requests);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}

#[test]
fn engine_from_config_uses_engine_section() {
    let config = FloraConfig::from_toml("[engine.antibiotic]\nmax_days = 7\n").unwrap();
    let engine =
        EffectEngine::from_config(Arc::new(catalog::standard().unwrap()), &config).unwrap();
    assert_eq!(engine.config().antibiotic.max_days, 7.0);

    // 14 requested days clamp to 7 → half effect.
    let req = SimulationRequest::builder()
        .select("Azithromycin")
        .duration("Azithromycin", 14.0)
        .build();
    let m = engine.compute_multiplier(LACTOBACILLUS, &req).unwrap();
    assert!(approx_eq(m, 0.75), "multiplier {m}");
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = Arc::new(EffectEngine::standard().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let req = SimulationRequest::builder()
                    .select("Doxycycline")
                    .duration("Doxycycline", f64::from(i) * 3.0)
                    .build();
                engine.simulate(&req).unwrap()
            })
        })
        .collect();
    for handle in handles {
        let result = handle.join().unwrap();
        assert!(result.iter().all(|o| o.simulated >= 0.0));
    }
}

#[test]
fn result_and_breakdown_serialize_to_json() {
    let engine = EffectEngine::standard().unwrap();
    let req = SimulationRequest::builder()
        .select("Fluconazole")
        .build();
    let result = engine.simulate(&req).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    let outcomes = json["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 8);
    assert_eq!(outcomes[7]["taxon"], CANDIDA);
    assert_eq!(outcomes[7]["multiplier"], 0.2);

    let bd = engine.explain(CANDIDA, &req).unwrap();
    let json = serde_json::to_value(&bd).unwrap();
    assert_eq!(json["contributions"][0]["factor"], "Fluconazole");
    assert_eq!(json["contributions"][0]["days"], serde_json::Value::Null);
}

#[test]
fn deserialized_duplicate_selection_applies_once() {
    let engine = EffectEngine::standard().unwrap();
    let req: SimulationRequest =
        serde_json::from_str(r#"{"selected":["Fluconazole","Fluconazole"]}"#).unwrap();
    assert_eq!(req.selected(), ["Fluconazole"]);
    assert_eq!(engine.compute_multiplier(CANDIDA, &req).unwrap(), 0.2);
}
