//! Scenario-driven trade record generator.
//!
//! Each record is drawn independently:
//!
//! | Field | Draw |
//! |-------|------|
//! | ticker | uniform over the [`SymbolTable`] |
//! | price | `Normal(base_price, 1.5)` rounded to 2 dp |
//! | quantity | uniform integer in `[min, max)` |
//! | status | weighted categorical over the scenario's labels |
//! | side | uniform BUY / SELL |
//! | ids | random UUID v4 built from the generator's RNG |
//! | source_ip | uniform IPv4 address |
//!
//! A record that fails to build is skipped with a warning and listed in
//! [`GenerationReport::skipped`]; the run carries on.

use crate::error::{RecordGenerationError, ValidationError};
use crate::market::{PriceTable, SymbolTable, PRICE_STD_DEV};
use crate::record::{Side, TradeRecord};
use crate::scenario::{QuantityRange, StatusDistribution};
use crate::validation::validate;
use rand::distributions::WeightedIndex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::net::Ipv4Addr;
use tracing::{info, warn};
use uuid::Uuid;

/// Weighted categorical sampler over a status distribution.
///
/// Weights are relative; a zero-weight label is never drawn.
#[derive(Debug, Clone)]
pub struct StatusSampler {
    labels: Vec<String>,
    index: WeightedIndex<f64>,
}

impl StatusSampler {
    /// Build a sampler, rejecting distributions the weighted index cannot use.
    pub fn new(distribution: &StatusDistribution) -> Result<Self, ValidationError> {
        let index = WeightedIndex::new(distribution.weights())
            .map_err(|e| ValidationError::distribution(e.to_string()))?;
        let labels = distribution.iter().map(|s| s.label.clone()).collect();
        Ok(Self { labels, index })
    }

    /// Draw one label
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.labels[self.index.sample(rng)]
    }
}

/// A record the generator could not build.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Zero-based iteration index
    pub index: usize,
    /// Why it was skipped
    pub error: RecordGenerationError,
}

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Records in generation order
    pub records: Vec<TradeRecord>,
    /// Number of records requested
    pub requested: usize,
    /// Records skipped because of per-record errors
    pub skipped: Vec<SkippedRecord>,
}

impl GenerationReport {
    /// Number of records produced
    pub fn generated_count(&self) -> usize {
        self.records.len()
    }

    /// Number of records skipped
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// True when every requested record was produced
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.records.len() == self.requested
    }

    fn assemble(requested: usize, outcomes: Vec<Result<TradeRecord, RecordGenerationError>>) -> Self {
        let mut records = Vec::with_capacity(requested);
        let mut skipped = Vec::new();

        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(record) => records.push(record),
                Err(error) => {
                    warn!(index, %error, "Skipping record due to generation error");
                    skipped.push(SkippedRecord { index, error });
                }
            }
        }

        info!(
            requested,
            generated = records.len(),
            skipped = skipped.len(),
            "Trade records generated"
        );

        Self {
            records,
            requested,
            skipped,
        }
    }
}

/// Synthetic trade generator over a fixed ticker universe.
///
/// # Examples
/// ```
/// use tradegen_core::{QuantityRange, StatusDistribution, TradeGenerator};
///
/// let generator = TradeGenerator::default();
/// let statuses = StatusDistribution::from_pairs([("EXECUTED", 9.0), ("FAILED", 1.0)]);
/// let report = generator
///     .generate_seeded(10, &QuantityRange::new(1, 100), &statuses, 42)
///     .unwrap();
///
/// assert_eq!(report.records.len(), 10);
/// assert!(report.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct TradeGenerator {
    symbols: SymbolTable,
    prices: PriceTable,
    price_std_dev: f64,
}

impl TradeGenerator {
    /// Create a generator over the given tables
    pub fn new(symbols: SymbolTable, prices: PriceTable) -> Self {
        Self {
            symbols,
            prices,
            price_std_dev: PRICE_STD_DEV,
        }
    }

    /// Override the price sampler's standard deviation
    pub fn with_price_std_dev(mut self, std_dev: f64) -> Self {
        self.price_std_dev = std_dev;
        self
    }

    /// Generate `count` records using the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] before drawing anything when the range or
    /// distribution is invalid.
    pub fn generate(
        &self,
        count: usize,
        quantity_range: &QuantityRange,
        status_distribution: &StatusDistribution,
    ) -> Result<GenerationReport, ValidationError> {
        self.generate_with_rng(count, quantity_range, status_distribution, &mut rand::thread_rng())
    }

    /// Generate `count` records reproducibly from a seed.
    pub fn generate_seeded(
        &self,
        count: usize,
        quantity_range: &QuantityRange,
        status_distribution: &StatusDistribution,
        seed: u64,
    ) -> Result<GenerationReport, ValidationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_with_rng(count, quantity_range, status_distribution, &mut rng)
    }

    /// Generate `count` records from a caller-supplied RNG.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        count: usize,
        quantity_range: &QuantityRange,
        status_distribution: &StatusDistribution,
        rng: &mut R,
    ) -> Result<GenerationReport, ValidationError> {
        validate(quantity_range, status_distribution)?;
        let sampler = StatusSampler::new(status_distribution)?;

        let outcomes = (0..count)
            .map(|_| self.generate_record(quantity_range, &sampler, &mut *rng))
            .collect();

        Ok(GenerationReport::assemble(count, outcomes))
    }

    /// Generate `count` records across the rayon pool.
    ///
    /// Record `i` draws from its own RNG seeded by `(seed, i)`, so output is
    /// reproducible and independent of thread scheduling. Order matches the
    /// iteration index.
    pub fn generate_parallel(
        &self,
        count: usize,
        quantity_range: &QuantityRange,
        status_distribution: &StatusDistribution,
        seed: u64,
    ) -> Result<GenerationReport, ValidationError> {
        validate(quantity_range, status_distribution)?;
        let sampler = StatusSampler::new(status_distribution)?;

        let outcomes = (0..count)
            .into_par_iter()
            .map(|index| {
                let mut rng = StdRng::seed_from_u64(record_seed(seed, index));
                self.generate_record(quantity_range, &sampler, &mut rng)
            })
            .collect();

        Ok(GenerationReport::assemble(count, outcomes))
    }

    fn generate_record<R: Rng + ?Sized>(
        &self,
        quantity_range: &QuantityRange,
        sampler: &StatusSampler,
        rng: &mut R,
    ) -> Result<TradeRecord, RecordGenerationError> {
        let ticker = self
            .symbols
            .as_slice()
            .choose(rng)
            .ok_or(RecordGenerationError::EmptySymbolTable)?;
        let price = self.sample_price(ticker, rng)?;

        let drawn = rng.gen_range(quantity_range.min..quantity_range.max);
        let quantity =
            u64::try_from(drawn).map_err(|_| RecordGenerationError::NegativeQuantity(drawn))?;

        let status = sampler.sample(rng).to_string();
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };

        let record = TradeRecord {
            trade_id: random_uuid(rng),
            account_id: random_uuid(rng),
            ticker: ticker.clone(),
            side,
            quantity,
            price,
            status,
            source_ip: Ipv4Addr::from(rng.gen::<u32>()),
        };

        match record.checked_trade_value() {
            Some(_) => Ok(record),
            None => Err(RecordGenerationError::TradeValueOverflow {
                ticker: record.ticker,
                price: record.price.to_string(),
                quantity: record.quantity,
            }),
        }
    }

    fn sample_price<R: Rng + ?Sized>(
        &self,
        ticker: &str,
        rng: &mut R,
    ) -> Result<Decimal, RecordGenerationError> {
        let mean = self
            .prices
            .base_price(ticker)
            .ok_or_else(|| RecordGenerationError::MissingBasePrice(ticker.to_string()))?;

        let invalid_model = || RecordGenerationError::InvalidPriceModel {
            ticker: ticker.to_string(),
            mean,
            std_dev: self.price_std_dev,
        };
        if !(self.price_std_dev >= 0.0 && self.price_std_dev.is_finite()) {
            return Err(invalid_model());
        }
        let normal = Normal::new(mean, self.price_std_dev).map_err(|_| invalid_model())?;

        // Negative samples are kept as-is.
        let value = normal.sample(rng);
        Decimal::from_f64(value)
            .map(|price| price.round_dp(2))
            .ok_or_else(|| RecordGenerationError::UnrepresentablePrice {
                ticker: ticker.to_string(),
                value,
            })
    }
}

impl Default for TradeGenerator {
    fn default() -> Self {
        Self::new(SymbolTable::default(), PriceTable::default())
    }
}

/// Generate `count` trade records for a scenario.
///
/// Convenience wrapper over [`TradeGenerator::generate`] for one-off runs.
pub fn generate(
    count: usize,
    quantity_range: &QuantityRange,
    status_distribution: &StatusDistribution,
    symbol_table: &SymbolTable,
    price_table: &PriceTable,
) -> Result<GenerationReport, ValidationError> {
    TradeGenerator::new(symbol_table.clone(), price_table.clone()).generate(
        count,
        quantity_range,
        status_distribution,
    )
}

fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

fn record_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
