//! Derived fields and review flagging.
//!
//! `trade_value = price * quantity` (exact decimal product) and
//! `flagged = status == "FAILED" || trade_value > threshold`.
//! One output per input, same order; records never influence each other.

use crate::record::TradeRecord;
use rust_decimal::Decimal;
use serde::Serialize;

/// Status label that always triggers review
pub const FAILED_STATUS: &str = "FAILED";

/// Compliance rule deciding which trades need manual review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRule {
    /// Status that is always flagged
    pub failed_status: String,
    /// Trade values strictly above this are flagged
    pub large_trade_threshold: Decimal,
}

impl FlagRule {
    /// Standard rule: FAILED status or trade value above `threshold`
    pub fn new(large_trade_threshold: Decimal) -> Self {
        Self {
            failed_status: FAILED_STATUS.to_string(),
            large_trade_threshold,
        }
    }

    /// Whether a trade with this status and value is flagged
    pub fn is_flagged(&self, status: &str, trade_value: Decimal) -> bool {
        status == self.failed_status || trade_value > self.large_trade_threshold
    }
}

/// Trade record plus its derived value and review flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedTradeRecord {
    /// The generated record, unchanged
    #[serde(flatten)]
    pub record: TradeRecord,
    /// `price * quantity`
    pub trade_value: Decimal,
    /// Marked for manual review
    pub flagged: bool,
}

impl DerivedTradeRecord {
    /// Derive fields for a single record
    pub fn from_record(record: TradeRecord, rule: &FlagRule) -> Self {
        let trade_value = record.trade_value();
        let flagged = rule.is_flagged(&record.status, trade_value);
        Self {
            record,
            trade_value,
            flagged,
        }
    }
}

/// Derive trade value and review flag for every record.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use tradegen_core::{derive, TradeGenerator, QuantityRange, StatusDistribution};
///
/// let statuses = StatusDistribution::from_pairs([("FAILED", 1.0)]);
/// let report = TradeGenerator::default()
///     .generate_seeded(5, &QuantityRange::new(1, 10), &statuses, 1)
///     .unwrap();
///
/// let derived = derive(report.records, Decimal::from(1_000_000_000));
/// assert_eq!(derived.len(), 5);
/// assert!(derived.iter().all(|r| r.flagged));
/// ```
pub fn derive(records: Vec<TradeRecord>, large_trade_threshold: Decimal) -> Vec<DerivedTradeRecord> {
    derive_with_rule(records, &FlagRule::new(large_trade_threshold))
}

/// Derive fields using an explicit [`FlagRule`]
pub fn derive_with_rule(records: Vec<TradeRecord>, rule: &FlagRule) -> Vec<DerivedTradeRecord> {
    records
        .into_iter()
        .map(|record| DerivedTradeRecord::from_record(record, rule))
        .collect()
}

/// Counts over a derived record set, for run summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivationSummary {
    /// Total records
    pub total: usize,
    /// Records flagged for review
    pub flagged: usize,
    /// Records with the failed status
    pub failed: usize,
    /// Records above the large-trade threshold
    pub large: usize,
}

impl DerivationSummary {
    /// Summarise a derived record set against the rule that produced it
    pub fn from_records(records: &[DerivedTradeRecord], rule: &FlagRule) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            acc.flagged += usize::from(r.flagged);
            acc.failed += usize::from(r.record.status == rule.failed_status);
            acc.large += usize::from(r.trade_value > rule.large_trade_threshold);
            acc
        })
    }
}
