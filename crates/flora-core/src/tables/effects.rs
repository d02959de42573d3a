use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::errors::TableError;
use crate::model::{Factor, FactorGroup, Taxon};

/// One factor and its per-taxon multipliers. Taxa missing from
/// `multipliers` are unaffected by the factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorEffects {
    pub factor: Factor,
    pub multipliers: BTreeMap<Taxon, f64>,
}

impl FactorEffects {
    /// Tabulated multiplier for `taxon`, 1.0 when the factor does not touch it.
    pub fn multiplier(&self, taxon: &str) -> f64 {
        self.multipliers.get(taxon).copied().unwrap_or(1.0)
    }
}

/// Factor → (taxon → multiplier). Every multiplier positive and finite,
/// factor names unique. Read-only after construction; iteration follows
/// insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "Vec<FactorEffects>")]
pub struct EffectTable {
    factors: Vec<FactorEffects>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl EffectTable {
    pub fn new<I>(factors: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = FactorEffects>,
    {
        let mut table = Self {
            factors: Vec::new(),
            index: HashMap::new(),
        };
        for effects in factors {
            let name = effects.factor.name.clone();
            if name.trim().is_empty() {
                return Err(TableError::EmptyName {
                    context: "effect table".to_string(),
                });
            }
            if table.index.contains_key(&name) {
                return Err(TableError::DuplicateFactor { factor: name });
            }
            for (taxon, &value) in &effects.multipliers {
                if !(value.is_finite() && value > 0.0) {
                    return Err(TableError::NonPositiveMultiplier {
                        factor: name,
                        taxon: taxon.to_string(),
                        value,
                    });
                }
            }
            table.index.insert(name, table.factors.len());
            table.factors.push(effects);
        }
        Ok(table)
    }

    pub fn get(&self, factor: &str) -> Option<&FactorEffects> {
        self.index.get(factor).map(|&i| &self.factors[i])
    }

    pub fn contains(&self, factor: &str) -> bool {
        self.index.contains_key(factor)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FactorEffects> {
        self.factors.iter()
    }

    pub fn factors(&self) -> impl Iterator<Item = &Factor> {
        self.factors.iter().map(|e| &e.factor)
    }

    /// Factors of one presentation group, in table order.
    pub fn in_group(&self, group: FactorGroup) -> impl Iterator<Item = &Factor> {
        self.factors().filter(move |f| f.group == group)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl From<EffectTable> for Vec<FactorEffects> {
    fn from(table: EffectTable) -> Self {
        table.factors
    }
}
