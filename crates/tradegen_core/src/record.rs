//! Synthetic trade record types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use uuid::Uuid;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy
    Buy,
    /// Sell
    Sell,
}

impl Side {
    /// Wire/report label
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthetic trade as produced by the generator.
///
/// Identity and market fields are fixed at construction; derived fields live
/// on [`DerivedTradeRecord`](crate::DerivedTradeRecord).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Unique per run
    pub trade_id: Uuid,
    /// Random account identifier
    pub account_id: Uuid,
    /// Ticker symbol from the symbol table
    pub ticker: String,
    /// Buy or sell
    pub side: Side,
    /// Drawn from the scenario's `[min, max)` range
    pub quantity: u64,
    /// Normal sample around the ticker's base price, two decimal places.
    /// May be negative for thinly priced tickers.
    pub price: Decimal,
    /// One of the scenario's status labels
    pub status: String,
    /// Cosmetic source address
    pub source_ip: Ipv4Addr,
}

impl TradeRecord {
    /// `price * quantity` with no rounding, or `None` on overflow
    pub fn checked_trade_value(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// `price * quantity` with no rounding.
    ///
    /// Saturates at the decimal bounds; records from the generator never
    /// reach them.
    pub fn trade_value(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}
