//! Scenario parameter validation.
//!
//! Runs before any generation so a bad scenario fails fast with no partial
//! output. Pure predicate: no side effects beyond a debug log line.

use crate::error::ValidationError;
use crate::scenario::{QuantityRange, StatusDistribution};
use std::collections::HashSet;

/// Check a quantity range and status distribution for structural sanity.
///
/// # Errors
///
/// - [`ValidationError::InvalidRange`] when `min < 0`, `max <= 0` or `min >= max`
/// - [`ValidationError::InvalidDistribution`] when the distribution is empty,
///   has an empty or duplicate label, a negative or non-finite weight, or
///   weights summing to zero
///
/// # Examples
/// ```
/// use tradegen_core::{validate, QuantityRange, StatusDistribution, ValidationError};
///
/// let statuses = StatusDistribution::from_pairs([("EXECUTED", 1.0)]);
/// assert!(validate(&QuantityRange::new(10, 5001), &statuses).is_ok());
///
/// let err = validate(&QuantityRange::new(10, 10), &statuses).unwrap_err();
/// assert!(matches!(err, ValidationError::InvalidRange(_)));
/// ```
pub fn validate(
    quantity_range: &QuantityRange,
    status_distribution: &StatusDistribution,
) -> Result<(), ValidationError> {
    validate_range(quantity_range)?;
    validate_distribution(status_distribution)?;

    tracing::debug!(
        range = %quantity_range,
        statuses = %status_distribution,
        "Scenario parameters validated"
    );
    Ok(())
}

fn validate_range(range: &QuantityRange) -> Result<(), ValidationError> {
    let QuantityRange { min, max } = *range;

    if min < 0 {
        return Err(ValidationError::range(format!(
            "min {} must be non-negative",
            min
        )));
    }
    if max <= 0 {
        return Err(ValidationError::range(format!(
            "max {} must be positive",
            max
        )));
    }
    if min >= max {
        return Err(ValidationError::range(format!(
            "min {} must be below max {}",
            min, max
        )));
    }
    Ok(())
}

fn validate_distribution(distribution: &StatusDistribution) -> Result<(), ValidationError> {
    if distribution.is_empty() {
        return Err(ValidationError::distribution(
            "must contain at least one status",
        ));
    }

    let mut seen = HashSet::with_capacity(distribution.len());
    for status in distribution.iter() {
        if status.label.trim().is_empty() {
            return Err(ValidationError::distribution(
                "status labels must be non-empty",
            ));
        }
        if !seen.insert(status.label.as_str()) {
            return Err(ValidationError::distribution(format!(
                "duplicate status label '{}'",
                status.label
            )));
        }
        if !status.weight.is_finite() {
            return Err(ValidationError::distribution(format!(
                "weight for '{}' is not a finite number",
                status.label
            )));
        }
        if status.weight < 0.0 {
            return Err(ValidationError::distribution(format!(
                "weight for '{}' is negative ({})",
                status.label, status.weight
            )));
        }
    }

    let total = distribution.total_weight();
    if total == 0.0 {
        return Err(ValidationError::distribution("weights sum to zero"));
    }
    if !total.is_finite() {
        return Err(ValidationError::distribution("weights overflow when summed"));
    }
    Ok(())
}
