//! Row highlight rules.
//!
//! A rule pairs a predicate with a fill style. Predicates can be checked
//! against a record in-process or rendered as a spreadsheet formula relative
//! to the first data row.

use crate::schema::Column;
use rust_decimal::Decimal;
use tradegen_core::derive::FAILED_STATUS;
use tradegen_core::DerivedTradeRecord;

/// Red fill for failed trades
pub const FAILED_FILL: u32 = 0xFFC7CE;
/// Dark red font for failed trades
pub const FAILED_FONT: u32 = 0x9C0006;
/// Yellow fill for large trades
pub const LARGE_TRADE_FILL: u32 = 0xFFEB9C;

/// Condition selecting rows to highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightPredicate {
    /// Status column equals the label
    StatusEquals(String),
    /// Trade Value column strictly above the threshold
    TradeValueAbove(Decimal),
}

impl HighlightPredicate {
    /// Evaluate against a record
    pub fn matches(&self, row: &DerivedTradeRecord) -> bool {
        match self {
            HighlightPredicate::StatusEquals(label) => row.record.status == *label,
            HighlightPredicate::TradeValueAbove(threshold) => row.trade_value > *threshold,
        }
    }

    /// Spreadsheet formula anchored at `row` (1-based), e.g. `$H2="FAILED"`.
    pub fn formula(&self, row: u32) -> String {
        match self {
            HighlightPredicate::StatusEquals(label) => format!(
                "${}{}=\"{}\"",
                Column::Status.letter(),
                row,
                label.replace('"', "\"\"")
            ),
            HighlightPredicate::TradeValueAbove(threshold) => format!(
                "${}{}>{}",
                Column::TradeValue.letter(),
                row,
                threshold.normalize()
            ),
        }
    }
}

/// Fill and font colours as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightStyle {
    /// Background fill
    pub fill: u32,
    /// Font colour, if changed
    pub font: Option<u32>,
}

/// A named predicate plus style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRule {
    /// Short label used in logs
    pub name: String,
    /// Which rows
    pub predicate: HighlightPredicate,
    /// How they look
    pub style: HighlightStyle,
}

impl HighlightRule {
    /// Rows whose status is FAILED: red fill, dark red font
    pub fn failed_trades() -> Self {
        Self {
            name: "failed_trade".to_string(),
            predicate: HighlightPredicate::StatusEquals(FAILED_STATUS.to_string()),
            style: HighlightStyle {
                fill: FAILED_FILL,
                font: Some(FAILED_FONT),
            },
        }
    }

    /// Rows whose trade value exceeds `threshold`: yellow fill
    pub fn large_trades(threshold: Decimal) -> Self {
        Self {
            name: "large_trade".to_string(),
            predicate: HighlightPredicate::TradeValueAbove(threshold),
            style: HighlightStyle {
                fill: LARGE_TRADE_FILL,
                font: None,
            },
        }
    }

    /// Evaluate against a record
    pub fn matches(&self, row: &DerivedTradeRecord) -> bool {
        self.predicate.matches(row)
    }
}

/// The two standard review highlights.
pub fn default_rules(large_trade_threshold: Decimal) -> Vec<HighlightRule> {
    vec![
        HighlightRule::failed_trades(),
        HighlightRule::large_trades(large_trade_threshold),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use tradegen_core::{Side, TradeRecord};
    use uuid::Uuid;

    fn row(status: &str, trade_value: i64) -> DerivedTradeRecord {
        DerivedTradeRecord {
            record: TradeRecord {
                trade_id: Uuid::nil(),
                account_id: Uuid::nil(),
                ticker: "AMD".to_string(),
                side: Side::Buy,
                quantity: 1,
                price: Decimal::from(trade_value),
                status: status.to_string(),
                source_ip: Ipv4Addr::LOCALHOST,
            },
            trade_value: Decimal::from(trade_value),
            flagged: false,
        }
    }

    #[test]
    fn test_default_rule_formulas() {
        let rules = default_rules(Decimal::from(3_000_000));
        assert_eq!(rules[0].predicate.formula(2), "$H2=\"FAILED\"");
        assert_eq!(rules[1].predicate.formula(2), "$G2>3000000");
    }

    #[test]
    fn test_threshold_formula_drops_trailing_zeros() {
        let rule = HighlightRule::large_trades(Decimal::new(5000000, 1));
        assert_eq!(rule.predicate.formula(2), "$G2>500000");
    }

    #[test]
    fn test_status_formula_escapes_quotes() {
        let predicate = HighlightPredicate::StatusEquals("A\"B".to_string());
        assert_eq!(predicate.formula(3), "$H3=\"A\"\"B\"");
    }

    #[test]
    fn test_rules_match_records() {
        let rules = default_rules(Decimal::from(1_000));
        assert!(rules[0].matches(&row("FAILED", 1)));
        assert!(!rules[0].matches(&row("EXECUTED", 1)));
        assert!(rules[1].matches(&row("EXECUTED", 1_001)));
        assert!(!rules[1].matches(&row("EXECUTED", 1_000)));
    }

    #[test]
    fn test_default_styles() {
        let failed = HighlightRule::failed_trades();
        assert_eq!(failed.style.fill, 0xFFC7CE);
        assert_eq!(failed.style.font, Some(0x9C0006));
        assert_eq!(HighlightRule::large_trades(Decimal::ONE).style.font, None);
    }
}
