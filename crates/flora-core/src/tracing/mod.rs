//! Observability for Flora.
//! `tracing` crate with `EnvFilter`, per-module log levels.

pub mod setup;

pub use setup::{build_filter, init_tracing, init_tracing_from_config, LOG_ENV};
