//! Presentation error types.

use thiserror::Error;

/// Errors raised while writing a report
#[derive(Debug, Error)]
pub enum PresentationError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet writer error
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Sheet name is empty after sanitising
    #[error("Invalid sheet name: {0:?}")]
    InvalidSheetName(String),
}

impl PresentationError {
    /// Create an invalid sheet name error
    pub fn sheet_name(name: impl Into<String>) -> Self {
        Self::InvalidSheetName(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PresentationError::sheet_name("[]");
        assert_eq!(err.to_string(), "Invalid sheet name: \"[]\"");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PresentationError = io.into();
        assert!(matches!(err, PresentationError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
