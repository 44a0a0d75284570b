//! Scenario parameter types.
//!
//! A [`Scenario`] bundles a quantity range with a weighted status
//! distribution. Scenarios are plain data; [`validate`](crate::validate)
//! decides whether they are usable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open quantity range `[min, max)`.
///
/// Serialised as a two-element array, e.g. `quantity_range = [10, 5001]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct QuantityRange {
    /// Inclusive lower bound
    pub min: i64,
    /// Exclusive upper bound
    pub max: i64,
}

impl QuantityRange {
    /// Create a new range without validating it.
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Whether `quantity` falls inside `[min, max)`.
    pub fn contains(&self, quantity: i64) -> bool {
        quantity >= self.min && quantity < self.max
    }
}

impl From<(i64, i64)> for QuantityRange {
    fn from((min, max): (i64, i64)) -> Self {
        Self::new(min, max)
    }
}

impl From<QuantityRange> for (i64, i64) {
    fn from(range: QuantityRange) -> Self {
        (range.min, range.max)
    }
}

impl fmt::Display for QuantityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}

/// A single status label and its relative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusWeight {
    /// Status label, e.g. `EXECUTED`
    pub label: String,
    /// Relative weight (need not sum to 1 across the distribution)
    pub weight: f64,
}

impl StatusWeight {
    /// Create a new label/weight pair
    pub fn new(label: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }
}

/// Ordered mapping of status label to weight.
///
/// Definition order is preserved; it only affects display, never the
/// probabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusDistribution(Vec<StatusWeight>);

impl StatusDistribution {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from `(label, weight)` pairs, keeping their order
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(label, weight)| StatusWeight::new(label, weight))
                .collect(),
        )
    }

    /// Append a label/weight pair
    pub fn with_status(mut self, label: impl Into<String>, weight: f64) -> Self {
        self.0.push(StatusWeight::new(label, weight));
        self
    }

    /// Iterate over entries in definition order
    pub fn iter(&self) -> impl Iterator<Item = &StatusWeight> {
        self.0.iter()
    }

    /// Labels in definition order
    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|s| s.label.as_str()).collect()
    }

    /// Weights in definition order
    pub fn weights(&self) -> Vec<f64> {
        self.0.iter().map(|s| s.weight).collect()
    }

    /// Whether a label is part of the distribution
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|s| s.label == label)
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f64 {
        self.0.iter().map(|s| s.weight).sum()
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the distribution has no labels
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StatusDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, status) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", status.label, status.weight)?;
        }
        write!(f, "}}")
    }
}

/// Named bundle of generation parameters for a QA test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique scenario name; also used as the report sheet name
    pub name: String,
    /// Quantity range `[min, max)`
    pub quantity_range: QuantityRange,
    /// Weighted status labels
    #[serde(rename = "statuses")]
    pub status_distribution: StatusDistribution,
}

impl Scenario {
    /// Create a new scenario
    pub fn new(
        name: impl Into<String>,
        quantity_range: QuantityRange,
        status_distribution: StatusDistribution,
    ) -> Self {
        Self {
            name: name.into(),
            quantity_range,
            status_distribution,
        }
    }

    /// Validate this scenario's parameters
    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        crate::validate(&self.quantity_range, &self.status_distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_range_is_half_open() {
        let range = QuantityRange::new(10, 20);
        assert!(range.contains(10));
        assert!(range.contains(19));
        assert!(!range.contains(20));
        assert!(!range.contains(9));
    }

    #[test]
    fn test_distribution_preserves_order() {
        let dist = StatusDistribution::from_pairs([("PENDING", 4.0), ("EXECUTED", 94.0)]);
        assert_eq!(dist.labels(), vec!["PENDING", "EXECUTED"]);
        assert_eq!(dist.weights(), vec![4.0, 94.0]);
        assert_eq!(dist.total_weight(), 98.0);
    }

    #[test]
    fn test_distribution_display() {
        let dist = StatusDistribution::new()
            .with_status("EXECUTED", 94.0)
            .with_status("FAILED", 2.0);
        assert_eq!(dist.to_string(), "{EXECUTED: 94, FAILED: 2}");
    }

    #[test]
    fn test_scenario_deserialises_from_toml() {
        let scenario: Scenario = toml::from_str(
            r#"
            name = "weekend"
            quantity_range = [1, 100]
            statuses = [
                { label = "EXECUTED", weight = 9.0 },
                { label = "FAILED", weight = 1.0 },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(scenario.name, "weekend");
        assert_eq!(scenario.quantity_range, QuantityRange::new(1, 100));
        assert_eq!(scenario.status_distribution.labels(), vec!["EXECUTED", "FAILED"]);
    }
}
