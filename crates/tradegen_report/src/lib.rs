//! # tradegen_report: Trade Report Sinks
//!
//! Renders derived trade records into a reviewable artefact. Every sink
//! shares the fixed column schema in [`schema`] and the highlight rules in
//! [`rules`].
//!
//! - [`XlsxSink`]: Single worksheet with styled header, currency formats and
//!   conditional highlighting of flagged rows
//! - [`CsvSink`]: Plain header plus rows, highlights reported as warnings
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use rust_decimal::Decimal;
//! use tradegen_core::prelude::*;
//! use tradegen_report::{ReportSink, TradeReport, XlsxSink};
//!
//! let catalog = ScenarioCatalog::builtin();
//! let scenario = catalog.select("standard day").unwrap();
//! let threshold = Decimal::from(3_000_000);
//!
//! let generated = TradeGenerator::default()
//!     .generate(100, &scenario.quantity_range, &scenario.status_distribution)
//!     .unwrap();
//! let rows = derive(generated.records, threshold);
//!
//! let report = TradeReport::new(&scenario.name, &rows, 100, threshold);
//! let written = XlsxSink::new("synthetic_trades.xlsx").write(&report).unwrap();
//! println!("{} rows -> {}", written.rows, written.path.display());
//! ```

#![deny(missing_docs)]

mod csv_sink;
pub mod error;
pub mod rules;
pub mod schema;
mod xlsx;

pub use csv_sink::CsvSink;
pub use error::PresentationError;
pub use rules::{default_rules, HighlightPredicate, HighlightRule, HighlightStyle};
pub use schema::{CellValue, Column};
pub use xlsx::{sanitise_sheet_name, XlsxSink, MAX_SHEET_NAME_LEN};

use rust_decimal::Decimal;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tradegen_core::DerivedTradeRecord;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportFormat {
    /// Office Open XML spreadsheet
    #[default]
    Xlsx,
    /// Comma-separated values
    Csv,
}

impl ReportFormat {
    /// Get file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ReportFormat::Xlsx),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(format!("unknown report format '{}' (expected xlsx or csv)", other)),
        }
    }
}

/// Everything a sink needs to render one run.
#[derive(Debug, Clone)]
pub struct TradeReport<'a> {
    /// Worksheet name, usually the scenario name
    pub sheet_name: String,
    /// Derived rows in generation order
    pub records: &'a [DerivedTradeRecord],
    /// Number of records originally requested
    pub requested_count: usize,
    /// Large-trade threshold the rows were flagged against
    pub large_trade_threshold: Decimal,
    /// Highlight rules to apply
    pub rules: Vec<HighlightRule>,
}

impl<'a> TradeReport<'a> {
    /// Create a report with the default highlight rules
    pub fn new(
        sheet_name: impl Into<String>,
        records: &'a [DerivedTradeRecord],
        requested_count: usize,
        large_trade_threshold: Decimal,
    ) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            records,
            requested_count,
            large_trade_threshold,
            rules: default_rules(large_trade_threshold),
        }
    }

    /// Replace the highlight rules
    pub fn with_rules(mut self, rules: Vec<HighlightRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Number of data rows covered by highlight ranges.
    ///
    /// Sized by the requested count; never smaller than the rows written.
    pub fn highlight_rows(&self) -> usize {
        self.requested_count.max(self.records.len())
    }

    /// Rows matched by at least one rule
    pub fn highlighted_count(&self) -> usize {
        self.records
            .iter()
            .filter(|row| self.rules.iter().any(|rule| rule.matches(row)))
            .count()
    }
}

/// Record of a written report
#[derive(Debug, Clone)]
pub struct WrittenReport {
    /// File path
    pub path: PathBuf,
    /// Format written
    pub format: ReportFormat,
    /// Data rows written (excluding the header)
    pub rows: usize,
    /// Size in bytes
    pub size: u64,
    /// Written timestamp (RFC 3339)
    pub written_at: String,
    /// Non-fatal problems, e.g. highlights that could not be applied
    pub warnings: Vec<String>,
}

/// Report output destination
pub trait ReportSink: Send + Sync {
    /// Write the report, returning what was written
    fn write(&self, report: &TradeReport<'_>) -> Result<WrittenReport, PresentationError>;

    /// Format this sink produces
    fn format(&self) -> ReportFormat;

    /// Destination path
    fn path(&self) -> &Path;
}

/// Create the sink for `format` writing to `path`
pub fn sink_for(format: ReportFormat, path: impl Into<PathBuf>) -> Box<dyn ReportSink> {
    match format {
        ReportFormat::Xlsx => Box::new(XlsxSink::new(path)),
        ReportFormat::Csv => Box::new(CsvSink::new(path)),
    }
}

/// Create the parent directory of `path` if missing.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), PresentationError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::PresentationError;
    pub use crate::rules::{default_rules, HighlightRule};
    pub use crate::{sink_for, CsvSink, ReportFormat, ReportSink, TradeReport, WrittenReport, XlsxSink};
}
