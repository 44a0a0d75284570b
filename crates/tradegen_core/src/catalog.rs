//! Scenario catalog.
//!
//! An explicit, immutable table of named scenarios. Callers build one
//! (usually [`ScenarioCatalog::builtin`] plus configured extras) and pass it
//! into the pipeline; nothing is global.

use crate::error::CatalogError;
use crate::scenario::{QuantityRange, Scenario, StatusDistribution};

/// Name of the default built-in scenario
pub const DEFAULT_SCENARIO: &str = "standard day";

/// Immutable, ordered collection of uniquely named scenarios.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// The three built-in QA scenarios.
    ///
    /// | Name | Quantity | Statuses |
    /// |------|----------|----------|
    /// | `standard day` | [10, 5001) | EXECUTED 94, PENDING 4, FAILED 2 |
    /// | `high_volume_failures` | [100, 10001) | EXECUTED 60, PENDING 10, FAILED 30 |
    /// | `institutional_trades` | [50000, 200001) | EXECUTED 98, PENDING 2, FAILED 0 |
    pub fn builtin() -> Self {
        Self {
            scenarios: vec![
                Scenario::new(
                    DEFAULT_SCENARIO,
                    QuantityRange::new(10, 5001),
                    StatusDistribution::from_pairs([
                        ("EXECUTED", 94.0),
                        ("PENDING", 4.0),
                        ("FAILED", 2.0),
                    ]),
                ),
                Scenario::new(
                    "high_volume_failures",
                    QuantityRange::new(100, 10001),
                    StatusDistribution::from_pairs([
                        ("EXECUTED", 60.0),
                        ("PENDING", 10.0),
                        ("FAILED", 30.0),
                    ]),
                ),
                Scenario::new(
                    "institutional_trades",
                    QuantityRange::new(50_000, 200_001),
                    StatusDistribution::from_pairs([
                        ("EXECUTED", 98.0),
                        ("PENDING", 2.0),
                        ("FAILED", 0.0),
                    ]),
                ),
            ],
        }
    }

    /// Build a catalog from scenarios, rejecting duplicate names.
    pub fn from_scenarios(scenarios: Vec<Scenario>) -> Result<Self, CatalogError> {
        for (i, scenario) in scenarios.iter().enumerate() {
            if scenarios[..i].iter().any(|s| s.name == scenario.name) {
                return Err(CatalogError::DuplicateScenario(scenario.name.clone()));
            }
        }
        Ok(Self { scenarios })
    }

    /// Return a new catalog with `scenario` added, replacing any entry of the
    /// same name in place.
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        match self.scenarios.iter_mut().find(|s| s.name == scenario.name) {
            Some(existing) => *existing = scenario,
            None => self.scenarios.push(scenario),
        }
        self
    }

    /// Look up a scenario by name
    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Look up a scenario by name, failing with the list of known names
    pub fn select(&self, name: &str) -> Result<&Scenario, CatalogError> {
        self.get(name).ok_or_else(|| CatalogError::UnknownScenario {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }

    /// Scenario names in catalog order
    pub fn names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }

    /// Iterate scenarios in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    /// Number of scenarios
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
