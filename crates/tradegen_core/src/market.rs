//! Ticker symbols and base prices used by the price sampler.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Standard deviation of the normal price sampler, in currency units.
pub const PRICE_STD_DEV: f64 = 1.5;

/// Ordered set of ticker symbols drawn uniformly by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable(Vec<String>);

impl SymbolTable {
    /// Create from any list of symbols
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(symbols.into_iter().map(Into::into).collect())
    }

    /// Symbols as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no symbols
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a symbol is present
    pub fn contains(&self, symbol: &str) -> bool {
        self.0.iter().any(|s| s == symbol)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new(DEFAULT_UNIVERSE.iter().map(|(symbol, _)| *symbol))
    }
}

/// Base price per ticker; the mean of the normal price sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable(BTreeMap<String, f64>);

impl PriceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Register or replace a base price
    pub fn with_price(mut self, symbol: impl Into<String>, base_price: f64) -> Self {
        self.0.insert(symbol.into(), base_price);
        self
    }

    /// Base price for a ticker
    pub fn base_price(&self, symbol: &str) -> Option<f64> {
        self.0.get(symbol).copied()
    }

    /// Number of registered tickers
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no prices are registered
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        DEFAULT_UNIVERSE
            .iter()
            .fold(Self::new(), |table, (symbol, price)| {
                table.with_price(*symbol, *price)
            })
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(s, p)| (s.into(), p)).collect())
    }
}

const DEFAULT_UNIVERSE: [(&str, f64); 10] = [
    ("AAPL", 247.66),
    ("GOOGL", 245.45),
    ("MSFT", 513.57),
    ("AMZN", 216.39),
    ("TSLA", 429.24),
    ("META", 708.65),
    ("NFLX", 1215.35),
    ("NVDA", 180.03),
    ("INTC", 35.63),
    ("AMD", 218.09),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_cover_each_other() {
        let symbols = SymbolTable::default();
        let prices = PriceTable::default();

        assert_eq!(symbols.len(), 10);
        assert_eq!(prices.len(), 10);
        for symbol in symbols.as_slice() {
            assert!(prices.base_price(symbol).is_some(), "{} has no price", symbol);
        }
    }

    #[test]
    fn test_default_symbol_order() {
        let symbols = SymbolTable::default();
        assert_eq!(symbols.as_slice()[0], "AAPL");
        assert_eq!(symbols.as_slice()[9], "AMD");
    }

    #[test]
    fn test_price_table_from_iter() {
        let prices: PriceTable = vec![("XYZ", 10.0)].into_iter().collect();
        assert_eq!(prices.base_price("XYZ"), Some(10.0));
        assert_eq!(prices.base_price("ABC"), None);
    }
}
