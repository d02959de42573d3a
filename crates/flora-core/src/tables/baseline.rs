use std::collections::HashMap;

use serde::Serialize;

use crate::errors::TableError;
use crate::model::Taxon;

/// Reference concentration of one taxon (CFU/g).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineEntry {
    pub taxon: Taxon,
    pub value: f64,
}

/// Taxon → reference concentration. Non-empty, every value positive and
/// finite, taxa unique. Read-only after construction; iteration follows
/// insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "Vec<BaselineEntry>")]
pub struct BaselineTable {
    entries: Vec<BaselineEntry>,
    #[serde(skip)]
    index: HashMap<Taxon, usize>,
}

impl BaselineTable {
    pub fn new<I, T>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (T, f64)>,
        T: Into<Taxon>,
    {
        let mut table = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for (taxon, value) in entries {
            let taxon = taxon.into();
            if taxon.as_str().trim().is_empty() {
                return Err(TableError::EmptyName {
                    context: "baseline table".to_string(),
                });
            }
            if !(value.is_finite() && value > 0.0) {
                return Err(TableError::NonPositiveBaseline {
                    taxon: taxon.to_string(),
                    value,
                });
            }
            if table.index.contains_key(&taxon) {
                return Err(TableError::DuplicateTaxon {
                    taxon: taxon.to_string(),
                });
            }
            table.index.insert(taxon.clone(), table.entries.len());
            table.entries.push(BaselineEntry { taxon, value });
        }
        if table.entries.is_empty() {
            return Err(TableError::EmptyBaseline);
        }
        Ok(table)
    }

    pub fn get(&self, taxon: &str) -> Option<f64> {
        self.index.get(taxon).map(|&i| self.entries[i].value)
    }

    pub fn contains(&self, taxon: &str) -> bool {
        self.index.contains_key(taxon)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BaselineEntry> {
        self.entries.iter()
    }

    pub fn taxa(&self) -> impl Iterator<Item = &Taxon> {
        self.entries.iter().map(|e| &e.taxon)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BaselineTable> for Vec<BaselineEntry> {
    fn from(table: BaselineTable) -> Self {
        table.entries
    }
}
