//! Validated reference data: a baseline table plus an effect table whose
//! every referenced taxon exists in the baseline.
//!
//! Tables are data, not code. Different dashboards are different
//! reference documents fed to the same engine:
//!
//! ```toml
//! [[taxa]]
//! name = "Lactobacillus spp."
//! baseline = 1e8
//!
//! [[factors]]
//! name = "Azithromycin"
//! group = "antibiotic"
//! effects = { "Lactobacillus spp." = 0.5 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigurationError, FloraResult, TableError};
use crate::model::{DurationClass, Factor, FactorGroup, FactorKind, Taxon};
use crate::tables::{BaselineTable, EffectTable, FactorEffects};

/// Baseline and effect tables, validated against each other.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    baseline: BaselineTable,
    effects: EffectTable,
}

impl ReferenceData {
    pub fn new(baseline: BaselineTable, effects: EffectTable) -> Result<Self, TableError> {
        for entry in effects.iter() {
            if let Some(taxon) = entry.multipliers.keys().find(|t| !baseline.contains(t.as_str())) {
                return Err(TableError::UnknownEffectTaxon {
                    factor: entry.factor.name.clone(),
                    taxon: taxon.to_string(),
                });
            }
        }
        Ok(Self { baseline, effects })
    }

    pub fn baseline(&self) -> &BaselineTable {
        &self.baseline
    }

    pub fn effects(&self) -> &EffectTable {
        &self.effects
    }

    /// Look up a factor, failing with a configuration error when absent.
    pub fn factor(&self, name: &str) -> Result<&FactorEffects, ConfigurationError> {
        self.effects
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownFactor {
                name: name.to_string(),
            })
    }

    /// Baseline value of a taxon, failing with a configuration error when absent.
    pub fn baseline_of(&self, taxon: &str) -> Result<f64, ConfigurationError> {
        self.baseline
            .get(taxon)
            .ok_or_else(|| ConfigurationError::UnknownTaxon {
                name: taxon.to_string(),
            })
    }

    pub fn taxa(&self) -> impl Iterator<Item = &Taxon> {
        self.baseline.taxa()
    }

    /// Names of every selectable factor. These are exactly the keys a
    /// presentation layer may put into a request.
    pub fn factor_names(&self) -> impl Iterator<Item = &str> {
        self.effects.factors().map(|f| f.name.as_str())
    }

    pub fn factors_in_group(&self, group: FactorGroup) -> impl Iterator<Item = &Factor> {
        self.effects.in_group(group)
    }

    /// Parse a TOML reference document.
    pub fn from_toml(source: &str) -> FloraResult<Self> {
        let doc: ReferenceDocument = toml::from_str(source).map_err(|e| TableError::Parse {
            format: "toml".to_string(),
            message: e.to_string(),
        })?;
        Ok(doc.into_reference()?)
    }

    /// Parse a JSON reference document (same shape as the TOML one).
    pub fn from_json(source: &str) -> FloraResult<Self> {
        let doc: ReferenceDocument =
            serde_json::from_str(source).map_err(|e| TableError::Parse {
                format: "json".to_string(),
                message: e.to_string(),
            })?;
        Ok(doc.into_reference()?)
    }

    /// Load a reference document from disk. `.json` files are read as
    /// JSON, anything else as TOML.
    pub fn from_file(path: &Path) -> FloraResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TableError::Parse {
            format: "file".to_string(),
            message: format!("{}: {e}", path.display()),
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }
    }

    /// Serializable document form of these tables.
    pub fn to_document(&self) -> ReferenceDocument {
        ReferenceDocument {
            taxa: self
                .baseline
                .iter()
                .map(|e| TaxonRecord {
                    name: e.taxon.to_string(),
                    baseline: e.value,
                })
                .collect(),
            factors: self
                .effects
                .iter()
                .map(|e| FactorRecord {
                    name: e.factor.name.clone(),
                    group: e.factor.group,
                    kind: Some(KindTag::from(e.factor.kind)),
                    class: e.factor.kind.duration_class(),
                    effects: e
                        .multipliers
                        .iter()
                        .map(|(t, v)| (t.to_string(), *v))
                        .collect(),
                })
                .collect(),
        }
    }
}

/// On-disk shape of reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDocument {
    #[serde(default)]
    pub taxa: Vec<TaxonRecord>,
    #[serde(default)]
    pub factors: Vec<FactorRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonRecord {
    pub name: String,
    pub baseline: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRecord {
    pub name: String,
    pub group: FactorGroup,
    /// Overrides the group's default kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<KindTag>,
    /// Duration class for `duration_scaled` factors. Defaults from the group,
    /// then to antibiotic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<DurationClass>,
    #[serde(default)]
    pub effects: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindTag {
    Binary,
    DurationScaled,
}

impl From<FactorKind> for KindTag {
    fn from(kind: FactorKind) -> Self {
        match kind {
            FactorKind::Binary => Self::Binary,
            FactorKind::DurationScaled(_) => Self::DurationScaled,
        }
    }
}

impl FactorRecord {
    fn resolve_kind(&self) -> FactorKind {
        let group_default = self.group.default_kind();
        match self.kind {
            None => match (group_default, self.class) {
                (FactorKind::DurationScaled(_), Some(class)) => FactorKind::DurationScaled(class),
                (kind, _) => kind,
            },
            Some(KindTag::Binary) => FactorKind::Binary,
            Some(KindTag::DurationScaled) => FactorKind::DurationScaled(
                self.class
                    .or_else(|| group_default.duration_class())
                    .unwrap_or(DurationClass::Antibiotic),
            ),
        }
    }
}

impl ReferenceDocument {
    pub fn into_reference(self) -> Result<ReferenceData, TableError> {
        let baseline = BaselineTable::new(self.taxa.into_iter().map(|t| (t.name, t.baseline)))?;
        let effects = EffectTable::new(self.factors.into_iter().map(|record| {
            let kind = record.resolve_kind();
            FactorEffects {
                factor: Factor {
                    name: record.name,
                    group: record.group,
                    kind,
                },
                multipliers: record
                    .effects
                    .into_iter()
                    .map(|(t, v)| (Taxon::from(t), v))
                    .collect(),
            }
        }))?;
        ReferenceData::new(baseline, effects)
    }
}
