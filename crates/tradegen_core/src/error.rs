//! Error types for scenario validation, record generation and catalog lookup.
//!
//! - `ValidationError`: Raised before generation; the run aborts without output
//! - `RecordGenerationError`: Per-record failure; the record is skipped
//! - `CatalogError`: Scenario lookup and catalog construction failures

use thiserror::Error;

/// Structural problems with a scenario's parameters.
///
/// # Examples
/// ```
/// use tradegen_core::ValidationError;
///
/// let err = ValidationError::InvalidRange("min 10 must be below max 10".to_string());
/// assert_eq!(err.to_string(), "Invalid quantity range: min 10 must be below max 10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Quantity range is negative, empty or inverted
    #[error("Invalid quantity range: {0}")]
    InvalidRange(String),

    /// Status distribution is empty, has bad labels or unusable weights
    #[error("Invalid status distribution: {0}")]
    InvalidDistribution(String),
}

impl ValidationError {
    /// Create a range error
    pub fn range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Create a distribution error
    pub fn distribution(msg: impl Into<String>) -> Self {
        Self::InvalidDistribution(msg.into())
    }
}

/// Failure while constructing a single trade record.
///
/// These never abort a run: the generator skips the record, logs a warning
/// and reports it in [`GenerationReport::skipped`](crate::GenerationReport::skipped).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordGenerationError {
    /// The symbol table has nothing to draw from
    #[error("Symbol table is empty")]
    EmptySymbolTable,

    /// Drawn ticker has no registered base price
    #[error("No base price registered for ticker {0}")]
    MissingBasePrice(String),

    /// Normal price model could not be built for the ticker
    #[error("Invalid price model for {ticker}: mean {mean}, std dev {std_dev}")]
    InvalidPriceModel {
        /// Ticker symbol
        ticker: String,
        /// Base price used as the mean
        mean: f64,
        /// Standard deviation
        std_dev: f64,
    },

    /// Sampled price cannot be represented as a decimal
    #[error("Sampled price {value} for {ticker} is not representable")]
    UnrepresentablePrice {
        /// Ticker symbol
        ticker: String,
        /// Raw sample
        value: f64,
    },

    /// Quantity draw fell below zero
    #[error("Drawn quantity {0} is negative")]
    NegativeQuantity(i64),

    /// `price * quantity` does not fit in a decimal
    #[error("Trade value of {quantity} x {price} for {ticker} overflows")]
    TradeValueOverflow {
        /// Ticker symbol
        ticker: String,
        /// Sampled price, as text
        price: String,
        /// Drawn quantity
        quantity: u64,
    },
}

/// Scenario catalog errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No scenario with the requested name
    #[error("Unknown scenario '{name}'. Available: {available}")]
    UnknownScenario {
        /// Requested name
        name: String,
        /// Comma-separated list of known names
        available: String,
    },

    /// Two scenarios share a name
    #[error("Duplicate scenario name '{0}'")]
    DuplicateScenario(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::distribution("weights sum to zero");
        assert_eq!(
            err.to_string(),
            "Invalid status distribution: weights sum to zero"
        );
    }

    #[test]
    fn test_record_error_display() {
        let err = RecordGenerationError::MissingBasePrice("ZZZZ".to_string());
        assert!(err.to_string().contains("ZZZZ"));
    }

    #[test]
    fn test_unknown_scenario_lists_available() {
        let err = CatalogError::UnknownScenario {
            name: "missing".to_string(),
            available: "a, b".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing"));
        assert!(msg.contains("a, b"));
    }
}
