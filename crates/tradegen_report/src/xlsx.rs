//! Spreadsheet sink.

use crate::error::PresentationError;
use crate::rules::HighlightRule;
use crate::schema::{CellValue, Column};
use crate::{ensure_parent_dir, ReportFormat, ReportSink, TradeReport, WrittenReport};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{
    Color, ConditionalFormatFormula, Format, FormatAlign, Workbook, Worksheet, XlsxError,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Longest worksheet name a workbook accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

const HEADER_FILL: u32 = 0x0A3E7D;
const CURRENCY_FORMAT: &str = "$#,##0.00";

/// Make `name` usable as a worksheet name.
///
/// Forbidden characters become `_`, leading/trailing apostrophes are dropped
/// and the result is cut to [`MAX_SHEET_NAME_LEN`] characters.
pub fn sanitise_sheet_name(name: &str) -> Result<String, PresentationError> {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let sanitised: String = replaced
        .trim_matches('\'')
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect();

    if sanitised.trim().is_empty() {
        return Err(PresentationError::sheet_name(name));
    }
    Ok(sanitised)
}

/// Writes a single-worksheet `.xlsx` workbook.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_header(&self, sheet: &mut Worksheet) -> Result<(), XlsxError> {
        let header = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        for column in Column::ALL {
            sheet.write_string_with_format(0, column.index(), column.header(), &header)?;
        }
        Ok(())
    }

    fn write_rows(&self, sheet: &mut Worksheet, report: &TradeReport<'_>) -> Result<(), XlsxError> {
        let currency = Format::new().set_num_format(CURRENCY_FORMAT);
        let mut widths: Vec<usize> = Column::ALL.iter().map(|c| c.header().len()).collect();

        for (i, row) in report.records.iter().enumerate() {
            let sheet_row = i as u32 + 1;
            for column in Column::ALL {
                let col = column.index();
                let value = column.cell(row);
                let rendered = value.render();
                widths[col as usize] = widths[col as usize].max(rendered.len());

                match value {
                    CellValue::Decimal(amount) => match amount.to_f64() {
                        Some(number) if column.is_currency() => {
                            sheet.write_number_with_format(sheet_row, col, number, &currency)?;
                        }
                        Some(number) => {
                            sheet.write_number(sheet_row, col, number)?;
                        }
                        None => {
                            sheet.write_string(sheet_row, col, rendered)?;
                        }
                    },
                    CellValue::Integer(n) => {
                        sheet.write_number(sheet_row, col, n as f64)?;
                    }
                    CellValue::Bool(b) => {
                        sheet.write_boolean(sheet_row, col, b)?;
                    }
                    CellValue::Text(text) => {
                        sheet.write_string(sheet_row, col, text)?;
                    }
                }
            }
        }

        for column in Column::ALL {
            let width = widths[column.index() as usize] + 2;
            sheet.set_column_width(column.index(), width as f64)?;
        }
        Ok(())
    }

    /// Install one conditional format per rule; failures become warnings.
    fn apply_highlights(&self, sheet: &mut Worksheet, report: &TradeReport<'_>) -> Vec<String> {
        let rows = report.highlight_rows();
        if rows == 0 {
            return Vec::new();
        }

        let first = Column::ALL[0].index();
        let last = Column::ALL[Column::ALL.len() - 1].index();
        let last_row = rows as u32;

        let mut warnings = Vec::new();
        for rule in &report.rules {
            if let Err(e) = add_highlight(sheet, rule, last_row, first, last) {
                let message = format!("Could not apply highlight '{}': {}", rule.name, e);
                warn!(rule = %rule.name, error = %e, "Highlight not applied");
                warnings.push(message);
            } else {
                debug!(rule = %rule.name, rows, "Highlight applied");
            }
        }
        warnings
    }
}

fn add_highlight(
    sheet: &mut Worksheet,
    rule: &HighlightRule,
    last_row: u32,
    first_col: u16,
    last_col: u16,
) -> Result<(), XlsxError> {
    let mut style = Format::new().set_background_color(Color::RGB(rule.style.fill));
    if let Some(font) = rule.style.font {
        style = style.set_font_color(Color::RGB(font));
    }

    let formula = format!("={}", rule.predicate.formula(2));
    let conditional = ConditionalFormatFormula::new()
        .set_rule(formula.as_str())
        .set_format(&style);

    sheet.add_conditional_format(1, first_col, last_row, last_col, &conditional)?;
    Ok(())
}

impl ReportSink for XlsxSink {
    fn write(&self, report: &TradeReport<'_>) -> Result<WrittenReport, PresentationError> {
        let sheet_name = sanitise_sheet_name(&report.sheet_name)?;
        ensure_parent_dir(&self.path)?;

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&sheet_name)?;

        self.write_header(sheet)?;
        self.write_rows(sheet, report)?;
        let warnings = self.apply_highlights(sheet, report);

        workbook.save(&self.path)?;
        let size = std::fs::metadata(&self.path)?.len();

        info!(
            path = %self.path.display(),
            sheet = %sheet_name,
            rows = report.records.len(),
            highlighted = report.highlighted_count(),
            size,
            "Spreadsheet report written"
        );

        Ok(WrittenReport {
            path: self.path.clone(),
            format: ReportFormat::Xlsx,
            rows: report.records.len(),
            size,
            written_at: chrono::Utc::now().to_rfc3339(),
            warnings,
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Xlsx
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitise_keeps_plain_names() {
        assert_eq!(sanitise_sheet_name("standard day").unwrap(), "standard day");
    }

    #[test]
    fn test_sanitise_replaces_forbidden_chars() {
        assert_eq!(sanitise_sheet_name("a/b:c[d]").unwrap(), "a_b_c_d_");
        assert_eq!(sanitise_sheet_name("'quoted'").unwrap(), "quoted");
    }

    #[test]
    fn test_sanitise_truncates() {
        let long = "x".repeat(40);
        assert_eq!(sanitise_sheet_name(&long).unwrap().len(), MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn test_sanitise_rejects_empty() {
        assert!(matches!(
            sanitise_sheet_name("  "),
            Err(PresentationError::InvalidSheetName(_))
        ));
        assert!(sanitise_sheet_name("''").is_err());
    }
}
