use std::fmt;

use serde::{Deserialize, Serialize};

/// Class of a duration-scaled factor. Full-effect and maximum days are
/// configured per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationClass {
    Antibiotic,
    Probiotic,
}

impl DurationClass {
    pub const ALL: [DurationClass; 2] = [Self::Antibiotic, Self::Probiotic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Antibiotic => "antibiotic",
            Self::Probiotic => "probiotic",
        }
    }
}

impl fmt::Display for DurationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a factor's tabulated effect combines into the multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    /// Full tabulated effect whenever selected.
    Binary,
    /// Effect interpolated linearly from neutral (0 days) to the full
    /// tabulated value (full-effect days of its class).
    DurationScaled(DurationClass),
}

impl FactorKind {
    pub fn duration_class(self) -> Option<DurationClass> {
        match self {
            Self::Binary => None,
            Self::DurationScaled(class) => Some(class),
        }
    }

    pub fn is_duration_scaled(self) -> bool {
        matches!(self, Self::DurationScaled(_))
    }
}

/// Presentation grouping. One selection checklist per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorGroup {
    Lifestyle,
    Antibiotic,
    Probiotic,
    OtherDrug,
}

impl FactorGroup {
    pub const ALL: [FactorGroup; 4] = [
        Self::Lifestyle,
        Self::Antibiotic,
        Self::Probiotic,
        Self::OtherDrug,
    ];

    /// Kind used when a data file does not state one explicitly.
    pub fn default_kind(self) -> FactorKind {
        match self {
            Self::Lifestyle | Self::OtherDrug => FactorKind::Binary,
            Self::Antibiotic => FactorKind::DurationScaled(DurationClass::Antibiotic),
            Self::Probiotic => FactorKind::DurationScaled(DurationClass::Probiotic),
        }
    }
}

/// A selectable condition or intervention. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub group: FactorGroup,
    pub kind: FactorKind,
}

impl Factor {
    /// A factor with its group's default kind.
    pub fn new(name: impl Into<String>, group: FactorGroup) -> Self {
        Self {
            name: name.into(),
            group,
            kind: group.default_kind(),
        }
    }

    pub fn binary(name: impl Into<String>, group: FactorGroup) -> Self {
        Self {
            name: name.into(),
            group,
            kind: FactorKind::Binary,
        }
    }

    pub fn duration_scaled(name: impl Into<String>, group: FactorGroup, class: DurationClass) -> Self {
        Self {
            name: name.into(),
            group,
            kind: FactorKind::DurationScaled(class),
        }
    }
}
