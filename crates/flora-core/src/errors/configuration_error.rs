/// A request referenced something absent from the reference tables.
///
/// These are programming or data errors, never user input errors: the
/// presentation layer builds its selection lists from the same tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown factor: {name}")]
    UnknownFactor { name: String },

    #[error("unknown taxon: {name}")]
    UnknownTaxon { name: String },

    #[error("no duration supplied for duration-scaled factor {factor}")]
    MissingDuration { factor: String },
}
