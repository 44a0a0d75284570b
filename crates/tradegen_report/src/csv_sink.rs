//! CSV sink.

use crate::error::PresentationError;
use crate::schema::{headers, Column};
use crate::{ensure_parent_dir, ReportFormat, ReportSink, TradeReport, WrittenReport};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Writes a header row plus one row per record.
///
/// CSV has no styling, so highlight rules are not applied; each run with
/// rules reports one warning instead.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for CsvSink {
    fn write(&self, report: &TradeReport<'_>) -> Result<WrittenReport, PresentationError> {
        ensure_parent_dir(&self.path)?;

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(headers())?;
        for row in report.records {
            writer.write_record(Column::ALL.iter().map(|column| column.cell(row).render()))?;
        }
        writer.flush()?;

        let mut warnings = Vec::new();
        if !report.rules.is_empty() {
            let names: Vec<&str> = report.rules.iter().map(|r| r.name.as_str()).collect();
            warn!(rules = ?names, "CSV output cannot carry row highlights");
            warnings.push(format!(
                "Highlights not applied in CSV output: {}",
                names.join(", ")
            ));
        }

        let size = std::fs::metadata(&self.path)?.len();
        info!(
            path = %self.path.display(),
            rows = report.records.len(),
            size,
            "CSV report written"
        );

        Ok(WrittenReport {
            path: self.path.clone(),
            format: ReportFormat::Csv,
            rows: report.records.len(),
            size,
            written_at: chrono::Utc::now().to_rfc3339(),
            warnings,
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
