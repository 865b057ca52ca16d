use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One point of the equity curve: total equity and cumulative net invested
/// capital at the end of a calendar day on which something happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub date: NaiveDate,
    /// Cash plus holdings, valued at the last trade price seen that day
    /// (live prices for the final as-of point).
    pub value: Decimal,
    /// Running sum of deposits and withdrawals.
    pub invested: Decimal,
}
