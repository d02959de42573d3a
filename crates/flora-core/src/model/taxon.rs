use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named bacterial or fungal group tracked by the simulation,
/// e.g. "Lactobacillus spp.". Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxon(String);

impl Taxon {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Taxon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Taxon {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Taxon {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Taxon {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Taxon {
    fn from(name: String) -> Self {
        Self(name)
    }
}
