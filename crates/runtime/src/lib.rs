//! Runtime orchestration for running many arena battles.
//!
//! The engine resolves one battle synchronously. This crate fans a series of
//! battles for one pairing out over blocking worker tasks and folds their
//! results into a [`SeriesSummary`].
//!
//! Modules are organized by responsibility:
//! - [`config`] runtime configuration and environment overrides
//! - [`error`] unified error type surfaced by the runtime API
//! - [`series`] the series runner and its summary
//! - `workers` keeps the blocking battle loop internal to the crate
pub mod config;
pub mod error;
pub mod series;

mod workers;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use series::{SeriesRunner, SeriesSummary};
