//! # tradegen: Synthetic Trade Data for QA
//!
//! Front end tying the scenario catalog, generator and report sinks together.
//!
//! - [`config`]: TOML run configuration with environment overrides
//! - [`pipeline`]: Select, validate, generate, derive and write in one run
//! - [`error`]: Application error wrapping every layer's failures

pub mod config;
pub mod error;
pub mod pipeline;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{AppConfig, ConfigError, RunConfig, TickerConfig};
    pub use crate::error::AppError;
    pub use crate::pipeline::{run, PipelineStep, RunSummary};
}
