//! Fixed report column schema.
//!
//! Every sink renders exactly these columns in exactly this order, so the
//! spreadsheet letters used by highlight formulas are stable.

use rust_decimal::Decimal;
use tradegen_core::DerivedTradeRecord;

/// Report column, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Trade identifier
    TradeId,
    /// Account identifier
    AccountId,
    /// Ticker symbol
    Ticker,
    /// BUY / SELL
    TradeType,
    /// Price per share
    TradePrice,
    /// Share count
    Quantity,
    /// Price times quantity
    TradeValue,
    /// Status label
    Status,
    /// Source IPv4 address
    SourceIp,
    /// Review flag
    FlaggedForReview,
}

/// Cell content for one column of one record.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Plain text
    Text(String),
    /// Exact decimal amount
    Decimal(Decimal),
    /// Whole number
    Integer(u64),
    /// True/false
    Bool(bool),
}

impl CellValue {
    /// Text rendering used for CSV output and column width sizing
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Decimal(d) => d.to_string(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

impl Column {
    /// All columns in output order
    pub const ALL: [Column; 10] = [
        Column::TradeId,
        Column::AccountId,
        Column::Ticker,
        Column::TradeType,
        Column::TradePrice,
        Column::Quantity,
        Column::TradeValue,
        Column::Status,
        Column::SourceIp,
        Column::FlaggedForReview,
    ];

    /// Header text
    pub fn header(&self) -> &'static str {
        match self {
            Column::TradeId => "Trade ID",
            Column::AccountId => "Account ID",
            Column::Ticker => "Ticker",
            Column::TradeType => "Trade Type",
            Column::TradePrice => "Trade Price",
            Column::Quantity => "Quantity",
            Column::TradeValue => "Trade Value",
            Column::Status => "Status",
            Column::SourceIp => "Source IP",
            Column::FlaggedForReview => "Flagged for Review",
        }
    }

    /// Zero-based position in the output
    pub fn index(&self) -> u16 {
        *self as u16
    }

    /// Spreadsheet column letter (`A` for the first column)
    pub fn letter(&self) -> char {
        char::from(b'A' + self.index() as u8)
    }

    /// Whether cells are formatted as currency
    pub fn is_currency(&self) -> bool {
        matches!(self, Column::TradePrice | Column::TradeValue)
    }

    /// Extract this column's value from a record
    pub fn cell(&self, row: &DerivedTradeRecord) -> CellValue {
        let record = &row.record;
        match self {
            Column::TradeId => CellValue::Text(record.trade_id.to_string()),
            Column::AccountId => CellValue::Text(record.account_id.to_string()),
            Column::Ticker => CellValue::Text(record.ticker.clone()),
            Column::TradeType => CellValue::Text(record.side.to_string()),
            Column::TradePrice => CellValue::Decimal(record.price),
            Column::Quantity => CellValue::Integer(record.quantity),
            Column::TradeValue => CellValue::Decimal(row.trade_value),
            Column::Status => CellValue::Text(record.status.clone()),
            Column::SourceIp => CellValue::Text(record.source_ip.to_string()),
            Column::FlaggedForReview => CellValue::Bool(row.flagged),
        }
    }
}

/// Header row in output order
pub fn headers() -> Vec<&'static str> {
    Column::ALL.iter().map(Column::header).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order_and_letters() {
        assert_eq!(
            headers(),
            vec![
                "Trade ID",
                "Account ID",
                "Ticker",
                "Trade Type",
                "Trade Price",
                "Quantity",
                "Trade Value",
                "Status",
                "Source IP",
                "Flagged for Review",
            ]
        );
        assert_eq!(Column::TradeId.letter(), 'A');
        assert_eq!(Column::TradeValue.letter(), 'G');
        assert_eq!(Column::Status.letter(), 'H');
        assert_eq!(Column::FlaggedForReview.letter(), 'J');
    }

    #[test]
    fn test_index_matches_position() {
        for (i, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.index() as usize, i);
        }
    }

    #[test]
    fn test_currency_columns() {
        let currency: Vec<_> = Column::ALL.iter().filter(|c| c.is_currency()).collect();
        assert_eq!(currency, vec![&Column::TradePrice, &Column::TradeValue]);
    }

    #[test]
    fn test_cell_render() {
        assert_eq!(CellValue::Bool(true).render(), "TRUE");
        assert_eq!(CellValue::Integer(42).render(), "42");
        assert_eq!(CellValue::Decimal(Decimal::new(24766, 2)).render(), "247.66");
    }
}
