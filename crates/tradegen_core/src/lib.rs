//! # tradegen_core: Scenario-Driven Synthetic Trade Generation
//!
//! Produces fake equity trade records for QA test data according to a named
//! scenario, then derives the trade value and review flag for each record.
//!
//! ## Pipeline
//!
//! ```text
//! ScenarioCatalog -> validate -> TradeGenerator -> derive -> (presentation)
//! ```
//!
//! - [`catalog`]: Immutable table of named scenarios
//! - [`validation`]: Structural checks on quantity ranges and status weights
//! - [`generator`]: Weighted/normal sampling of [`TradeRecord`]s
//! - [`derive`]: Trade value and compliance flag computation
//! - [`market`]: Ticker symbols and base prices fed to the price sampler
//!
//! ## Usage Examples
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tradegen_core::prelude::*;
//!
//! let catalog = ScenarioCatalog::builtin();
//! let scenario = catalog.select("standard day").unwrap();
//!
//! let generator = TradeGenerator::default();
//! let report = generator
//!     .generate(50, &scenario.quantity_range, &scenario.status_distribution)
//!     .unwrap();
//! assert_eq!(report.records.len() + report.skipped_count(), 50);
//!
//! let derived = derive(report.records, Decimal::from(3_000_000));
//! assert!(derived.iter().all(|r| r.record.status != "FAILED" || r.flagged));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod derive;
pub mod error;
pub mod generator;
pub mod market;
pub mod record;
pub mod scenario;
pub mod validation;

pub use catalog::ScenarioCatalog;
pub use derive::{derive, derive_with_rule, DerivationSummary, DerivedTradeRecord, FlagRule};
pub use error::{CatalogError, RecordGenerationError, ValidationError};
pub use generator::{generate, GenerationReport, SkippedRecord, StatusSampler, TradeGenerator};
pub use market::{PriceTable, SymbolTable};
pub use record::{Side, TradeRecord};
pub use scenario::{QuantityRange, Scenario, StatusDistribution, StatusWeight};
pub use validation::validate;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::ScenarioCatalog;
    pub use crate::derive::{derive, DerivedTradeRecord, FlagRule};
    pub use crate::error::{CatalogError, RecordGenerationError, ValidationError};
    pub use crate::generator::{GenerationReport, TradeGenerator};
    pub use crate::market::{PriceTable, SymbolTable};
    pub use crate::record::{Side, TradeRecord};
    pub use crate::scenario::{QuantityRange, Scenario, StatusDistribution};
    pub use crate::validation::validate;
}
