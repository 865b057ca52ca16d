use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio concentration bucket, by Herfindahl-Hirschman Index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcentrationLevel {
    Low,
    Moderate,
    High,
}

/// HHI concentration of the open holdings: sum of squared allocation
/// weights x 10 000. Below 1500 reads as diversified, above 2500 as
/// highly concentrated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationRisk {
    pub hhi: Decimal,
    pub level: ConcentrationLevel,
}

/// Trading activity for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMetric {
    /// `YYYY-MM`.
    pub month: String,
    pub buys: Decimal,
    pub sells: Decimal,
    pub trades: u32,
    pub fees: Decimal,
}

/// Number of trades per ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerFrequency {
    pub ticker: String,
    pub count: u32,
}
