use std::sync::Arc;

use flora_core::catalog::{self, LACTOBACILLUS};
use flora_core::model::{DurationClass, Factor, FactorGroup, SimulationRequest, Taxon};
use flora_core::tables::{BaselineTable, EffectTable, FactorEffects};
use flora_core::traits::IEffectEngine;
use flora_core::ReferenceData;
use flora_effects::EffectEngine;
use proptest::prelude::*;

fn catalog_factor_names() -> Vec<String> {
    catalog::standard()
        .unwrap()
        .factor_names()
        .map(str::to_string)
        .collect()
}

/// A selection and a shuffled copy of it.
fn arb_selection_pair() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    let names = catalog_factor_names();
    let len = names.len();
    prop::sample::subsequence(names, 0..=len)
        .prop_flat_map(|sel| (Just(sel.clone()), Just(sel).prop_shuffle()))
}

fn with_class_durations(names: &[String], antibiotic: f64, probiotic: f64) -> SimulationRequest {
    SimulationRequest::builder()
        .select_all(names.iter().cloned())
        .class_duration(DurationClass::Antibiotic, antibiotic)
        .class_duration(DurationClass::Probiotic, probiotic)
        .build()
}

/// One taxon at 1e8 and one duration-scaled antibiotic with `tabulated`.
fn single_factor_engine(tabulated: f64) -> EffectEngine {
    let baseline = BaselineTable::new([("T", 1e8)]).unwrap();
    let effects = EffectTable::new([FactorEffects {
        factor: Factor::new("AB", FactorGroup::Antibiotic),
        multipliers: [(Taxon::from("T"), tabulated)].into_iter().collect(),
    }])
    .unwrap();
    EffectEngine::with_defaults(Arc::new(ReferenceData::new(baseline, effects).unwrap()))
}

fn course(days: f64) -> SimulationRequest {
    SimulationRequest::builder().select("AB").duration("AB", days).build()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
}

// ── Order independence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn selection_order_does_not_matter(
        (selection, shuffled) in arb_selection_pair(),
        antibiotic_days in 0.0f64..30.0,
        probiotic_days in 0.0f64..40.0,
    ) {
        let engine = EffectEngine::standard().unwrap();
        let req = with_class_durations(&selection, antibiotic_days, probiotic_days);
        let permuted = req.reordered(shuffled);

        let a = engine.simulate(&req).unwrap();
        let b = engine.simulate(&permuted).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert_eq!(&x.taxon, &y.taxon);
            prop_assert!(
                close(x.simulated, y.simulated),
                "{}: {} vs {}", x.taxon, x.simulated, y.simulated
            );
        }
    }
}

// ── Neutrality ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn neutral_request_reproduces_baseline(
        antibiotic_days in 0.0f64..30.0,
        probiotic_days in 0.0f64..40.0,
    ) {
        // Class durations alone select nothing.
        let engine = EffectEngine::standard().unwrap();
        let req = with_class_durations(&[], antibiotic_days, probiotic_days);
        let result = engine.simulate(&req).unwrap();
        for outcome in result.iter() {
            prop_assert_eq!(outcome.multiplier, 1.0);
            prop_assert_eq!(outcome.simulated, outcome.baseline);
        }
    }
}

// ── Duration monotonicity ────────────────────────────────────────────────

proptest! {
    #[test]
    fn longer_courses_never_weaken_a_decline(
        tabulated in 0.01f64..1.0,
        d1 in 0.0f64..30.0,
        d2 in 0.0f64..30.0,
    ) {
        let engine = single_factor_engine(tabulated);
        let (short, long) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        let m_short = engine.compute_multiplier("T", &course(short)).unwrap();
        let m_long = engine.compute_multiplier("T", &course(long)).unwrap();
        prop_assert!(m_long <= m_short + 1e-12, "{m_long} > {m_short}");
    }

    #[test]
    fn longer_courses_never_weaken_an_increase(
        tabulated in 1.0f64..10.0,
        d1 in 0.0f64..30.0,
        d2 in 0.0f64..30.0,
    ) {
        let engine = single_factor_engine(tabulated);
        let (short, long) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        let m_short = engine.compute_multiplier("T", &course(short)).unwrap();
        let m_long = engine.compute_multiplier("T", &course(long)).unwrap();
        prop_assert!(m_long + 1e-12 >= m_short, "{m_long} < {m_short}");
    }
}

// ── Clamping ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn durations_past_max_equal_max(
        tabulated in 0.01f64..10.0,
        extra in 0.0f64..1000.0,
    ) {
        let engine = single_factor_engine(tabulated);
        let max_days = engine.config().antibiotic.max_days;
        let at_max = engine.compute_multiplier("T", &course(max_days)).unwrap();
        let beyond = engine.compute_multiplier("T", &course(max_days + extra)).unwrap();
        prop_assert_eq!(at_max, beyond);
    }

    #[test]
    fn negative_durations_equal_zero(
        tabulated in 0.01f64..10.0,
        days in -1000.0f64..0.0,
    ) {
        let engine = single_factor_engine(tabulated);
        prop_assert_eq!(
            engine.compute_multiplier("T", &course(days)).unwrap(),
            engine.compute_multiplier("T", &course(0.0)).unwrap()
        );
    }
}

// ── Non-negativity ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn simulated_values_are_never_negative(
        (selection, _) in arb_selection_pair(),
        antibiotic_days in -10.0f64..50.0,
        probiotic_days in -10.0f64..50.0,
    ) {
        let engine = EffectEngine::standard().unwrap();
        let req = with_class_durations(&selection, antibiotic_days, probiotic_days);
        let result = engine.simulate(&req).unwrap();
        for outcome in result.iter() {
            prop_assert!(outcome.simulated >= 0.0);
            prop_assert!(outcome.multiplier >= 0.0);
        }
    }

    #[test]
    fn full_course_reaches_tabulated_value(
        tabulated in 0.01f64..10.0,
        days in 14.0f64..21.0,
    ) {
        let engine = single_factor_engine(tabulated);
        let result = engine.simulate(&course(days)).unwrap();
        prop_assert_eq!(result.get("T").unwrap().multiplier, tabulated);
    }
}

// ── Catalog sanity ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn untouched_taxa_keep_baseline(days in 0.0f64..21.0) {
        // Vancomycin only lists Clostridium.
        let engine = EffectEngine::standard().unwrap();
        let req = SimulationRequest::builder()
            .select("Vancomycin")
            .duration("Vancomycin", days)
            .build();
        let m = engine.compute_multiplier(LACTOBACILLUS, &req).unwrap();
        prop_assert_eq!(m, 1.0);
    }
}
