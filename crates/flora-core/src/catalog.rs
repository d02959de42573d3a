//! Built-in reference dataset: eight gut taxa and the lifestyle factors,
//! antibiotics, probiotics and other drugs offered by the dashboard.
//!
//! Values are teaching approximations, not clinical data.

use crate::errors::TableError;
use crate::model::{Factor, FactorGroup, Taxon};
use crate::reference::ReferenceData;
use crate::tables::{BaselineTable, EffectTable, FactorEffects};

pub const LACTOBACILLUS: &str = "Lactobacillus spp.";
pub const BIFIDOBACTERIUM: &str = "Bifidobacterium spp.";
pub const FIRMICUTES: &str = "Firmicutes (total)";
pub const BACTEROIDES: &str = "Bacteroides spp.";
pub const CLOSTRIDIUM: &str = "Clostridium spp.";
pub const E_COLI: &str = "Escherichia coli (commensal)";
pub const PROTEOBACTERIA: &str = "Proteobacteria (other)";
pub const CANDIDA: &str = "Candida spp.";

/// Reference concentrations, CFU/g.
const BASELINE: [(&str, f64); 8] = [
    (LACTOBACILLUS, 1e8),
    (BIFIDOBACTERIUM, 5e9),
    (FIRMICUTES, 1e10),
    (BACTEROIDES, 5e9),
    (CLOSTRIDIUM, 1e6),
    (E_COLI, 1e7),
    (PROTEOBACTERIA, 1e6),
    (CANDIDA, 1e4),
];

type Row = (&'static str, FactorGroup, &'static [(&'static str, f64)]);

const FACTORS: &[Row] = &[
    // Lifestyle
    (
        "Poor diet",
        FactorGroup::Lifestyle,
        &[
            (LACTOBACILLUS, 0.7),
            (BIFIDOBACTERIUM, 0.6),
            (FIRMICUTES, 1.3),
            (BACTEROIDES, 1.4),
        ],
    ),
    (
        "Healthy diet",
        FactorGroup::Lifestyle,
        &[(LACTOBACILLUS, 1.3), (BIFIDOBACTERIUM, 1.4)],
    ),
    (
        "Stress",
        FactorGroup::Lifestyle,
        &[(PROTEOBACTERIA, 1.4), (LACTOBACILLUS, 0.8)],
    ),
    ("Sleep deprivation", FactorGroup::Lifestyle, &[(CLOSTRIDIUM, 1.2)]),
    ("Intense exercise", FactorGroup::Lifestyle, &[(LACTOBACILLUS, 1.1)]),
    // Antibiotics
    (
        "Amoxicillin/clavulanate",
        FactorGroup::Antibiotic,
        &[(BIFIDOBACTERIUM, 0.2), (CANDIDA, 5.0)],
    ),
    (
        "Ceftriaxone",
        FactorGroup::Antibiotic,
        &[(BACTEROIDES, 0.4), (PROTEOBACTERIA, 2.0)],
    ),
    ("Azithromycin", FactorGroup::Antibiotic, &[(LACTOBACILLUS, 0.5)]),
    (
        "Ciprofloxacin",
        FactorGroup::Antibiotic,
        &[(FIRMICUTES, 0.5), (PROTEOBACTERIA, 3.0)],
    ),
    ("Doxycycline", FactorGroup::Antibiotic, &[(LACTOBACILLUS, 0.6)]),
    ("Clarithromycin", FactorGroup::Antibiotic, &[(BIFIDOBACTERIUM, 0.5)]),
    ("Vancomycin", FactorGroup::Antibiotic, &[(CLOSTRIDIUM, 3.0)]),
    ("Metronidazole", FactorGroup::Antibiotic, &[(BACTEROIDES, 0.3)]),
    ("Levofloxacin", FactorGroup::Antibiotic, &[(PROTEOBACTERIA, 2.5)]),
    (
        "Carbapenems",
        FactorGroup::Antibiotic,
        &[(PROTEOBACTERIA, 4.0), (CANDIDA, 6.0)],
    ),
    // Probiotics
    (
        "Lactobacillus probiotic",
        FactorGroup::Probiotic,
        &[(LACTOBACILLUS, 2.0), (CANDIDA, 0.8)],
    ),
    (
        "Bifidobacterium probiotic",
        FactorGroup::Probiotic,
        &[(BIFIDOBACTERIUM, 1.8), (PROTEOBACTERIA, 0.9)],
    ),
    // Other drugs
    (
        "Proton pump inhibitors",
        FactorGroup::OtherDrug,
        &[(PROTEOBACTERIA, 1.5), (CANDIDA, 2.5)],
    ),
    ("NSAIDs", FactorGroup::OtherDrug, &[(PROTEOBACTERIA, 1.3)]),
    (
        "Glucocorticoids",
        FactorGroup::OtherDrug,
        &[(CANDIDA, 3.0), (LACTOBACILLUS, 0.7)],
    ),
    ("SSRIs", FactorGroup::OtherDrug, &[(LACTOBACILLUS, 0.8)]),
    ("Antihistamines", FactorGroup::OtherDrug, &[(BIFIDOBACTERIUM, 0.8)]),
    ("Fluconazole", FactorGroup::OtherDrug, &[(CANDIDA, 0.2)]),
    ("Metformin", FactorGroup::OtherDrug, &[(BACTEROIDES, 1.3)]),
    ("Antipsychotics", FactorGroup::OtherDrug, &[(PROTEOBACTERIA, 2.0)]),
];

/// The built-in dataset, validated like any loaded document.
pub fn standard() -> Result<ReferenceData, TableError> {
    let baseline = BaselineTable::new(BASELINE)?;
    let effects = EffectTable::new(FACTORS.iter().map(|(name, group, pairs)| FactorEffects {
        factor: Factor::new(*name, *group),
        multipliers: pairs.iter().map(|&(t, v)| (Taxon::from(t), v)).collect(),
    }))?;
    ReferenceData::new(baseline, effects)
}
