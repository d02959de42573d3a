//! Error handling for Flora.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod configuration_error;
pub mod table_error;

pub use config_error::ConfigError;
pub use configuration_error::ConfigurationError;
pub use table_error::TableError;

/// Top-level error for every fallible Flora operation.
#[derive(Debug, thiserror::Error)]
pub enum FloraError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("reference table error: {0}")]
    Table(#[from] TableError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl FloraError {
    /// True when the error comes from a request that names something the
    /// reference tables do not contain. Always a caller bug.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type FloraResult<T> = Result<T, FloraError>;
