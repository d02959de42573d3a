pub mod factor;
pub mod request;
pub mod result;
pub mod taxon;

pub use factor::{DurationClass, Factor, FactorGroup, FactorKind};
pub use request::{SimulationRequest, SimulationRequestBuilder};
pub use result::{SimulationResult, TaxonOutcome};
pub use taxon::Taxon;
