//! Ratio-based interpretation of a simulated table.
//!
//! Each taxon's `simulated / baseline` ratio is checked against an ordered
//! rule list; the first rule that matches is reported for that taxon.

use std::fmt;

use flora_core::config::InterpretationConfig;
use flora_core::model::{SimulationResult, Taxon, TaxonOutcome};
use serde::{Deserialize, Serialize};

/// What an observation says about a taxon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    SharpDecline,
    Deficiency,
    MarkedIncrease,
    Overgrowth,
}

impl ObservationKind {
    pub fn is_decline(self) -> bool {
        matches!(self, Self::SharpDecline | Self::Deficiency)
    }
}

/// Comparison of a ratio against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioPredicate {
    AtMost(f64),
    Below(f64),
    AtLeast(f64),
    Above(f64),
}

impl RatioPredicate {
    pub fn matches(self, ratio: f64) -> bool {
        match self {
            Self::AtMost(t) => ratio <= t,
            Self::Below(t) => ratio < t,
            Self::AtLeast(t) => ratio >= t,
            Self::Above(t) => ratio > t,
        }
    }
}

impl fmt::Display for RatioPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtMost(t) => write!(f, "<= {t}x"),
            Self::Below(t) => write!(f, "< {t}x"),
            Self::AtLeast(t) => write!(f, ">= {t}x"),
            Self::Above(t) => write!(f, "> {t}x"),
        }
    }
}

/// One `(predicate, message)` pair. `{taxon}` in the message is replaced
/// by the taxon name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationRule {
    pub kind: ObservationKind,
    pub predicate: RatioPredicate,
    pub message: String,
}

impl InterpretationRule {
    pub fn new(kind: ObservationKind, predicate: RatioPredicate, message: impl Into<String>) -> Self {
        Self {
            kind,
            predicate,
            message: message.into(),
        }
    }
}

/// A rule match for one taxon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub taxon: Taxon,
    pub kind: ObservationKind,
    pub ratio: f64,
    pub message: String,
}

/// Observations for a whole simulated table, in baseline order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub observations: Vec<Observation>,
}

impl Interpretation {
    /// No rule matched any taxon.
    pub fn is_clear(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn of_kind(&self, kind: ObservationKind) -> impl Iterator<Item = &Observation> {
        self.observations.iter().filter(move |o| o.kind == kind)
    }

    pub fn for_taxon(&self, taxon: &str) -> Option<&Observation> {
        self.observations.iter().find(|o| o.taxon.as_str() == taxon)
    }
}

/// Ordered interpretation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<InterpretationRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<InterpretationRule>) -> Self {
        Self { rules }
    }

    /// Default rules built from configured thresholds. Stronger findings
    /// come first so they shadow the milder ones.
    pub fn from_config(config: &InterpretationConfig) -> Self {
        Self::new(vec![
            InterpretationRule::new(
                ObservationKind::SharpDecline,
                RatioPredicate::AtMost(config.sharp_decline_ratio),
                "sharp decline of {taxon}",
            ),
            InterpretationRule::new(
                ObservationKind::Deficiency,
                RatioPredicate::Below(config.deficiency_ratio),
                "deficiency of {taxon}: risk of dysbiosis",
            ),
            InterpretationRule::new(
                ObservationKind::MarkedIncrease,
                RatioPredicate::AtLeast(config.marked_increase_ratio),
                "marked increase of {taxon}",
            ),
            InterpretationRule::new(
                ObservationKind::Overgrowth,
                RatioPredicate::Above(config.overgrowth_ratio),
                "excess of {taxon}: risk of infection/inflammation",
            ),
        ])
    }

    pub fn rules(&self) -> &[InterpretationRule] {
        &self.rules
    }

    /// First matching rule for one outcome.
    pub fn evaluate(&self, outcome: &TaxonOutcome) -> Option<Observation> {
        let ratio = outcome.ratio();
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(ratio))
            .map(|rule| Observation {
                taxon: outcome.taxon.clone(),
                kind: rule.kind,
                ratio,
                message: rule.message.replace("{taxon}", outcome.taxon.as_str()),
            })
    }

    /// Evaluate every outcome of a result.
    pub fn interpret(&self, result: &SimulationResult) -> Interpretation {
        Interpretation {
            observations: result.iter().filter_map(|o| self.evaluate(o)).collect(),
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_config(&InterpretationConfig::default())
    }
}
