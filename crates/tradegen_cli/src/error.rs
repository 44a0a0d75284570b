//! Error types for the trade generator front end.

use thiserror::Error;
use tradegen_core::{CatalogError, ValidationError};
use tradegen_report::PresentationError;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Unknown or duplicate scenario
    #[error("Scenario error: {0}")]
    Catalog(#[from] CatalogError),

    /// Scenario parameters rejected before generation
    #[error("Scenario validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Report could not be written
    #[error("Report output error: {0}")]
    Presentation(#[from] PresentationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for pipeline operations
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: AppError = ValidationError::range("min must be less than max").into();
        assert!(err.to_string().starts_with("Scenario validation failed"));
        assert!(err.to_string().contains("min must be less than max"));
    }

    #[test]
    fn test_catalog_error_conversion() {
        let err: AppError = CatalogError::DuplicateScenario("dup".to_string()).into();
        assert!(matches!(err, AppError::Catalog(_)));
    }
}
