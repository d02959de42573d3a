/// Invalid reference data (baseline or effect tables).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("baseline table has no taxa")]
    EmptyBaseline,

    #[error("empty name in {context}")]
    EmptyName { context: String },

    #[error("baseline for {taxon} must be positive and finite, got {value}")]
    NonPositiveBaseline { taxon: String, value: f64 },

    #[error("multiplier of {factor} on {taxon} must be positive and finite, got {value}")]
    NonPositiveMultiplier {
        factor: String,
        taxon: String,
        value: f64,
    },

    #[error("taxon listed twice: {taxon}")]
    DuplicateTaxon { taxon: String },

    #[error("factor listed twice: {factor}")]
    DuplicateFactor { factor: String },

    #[error("factor {factor} affects {taxon}, which is not in the baseline")]
    UnknownEffectTaxon { factor: String, taxon: String },

    #[error("failed to parse {format} reference data: {message}")]
    Parse { format: String, message: String },
}
