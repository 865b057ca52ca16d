//! Recurring account fees tracked outside the transaction ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of a recurring account fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeType {
    /// Custody / account maintenance ("droits de garde").
    #[serde(rename = "CUS")]
    Custody,
    /// Platform subscription.
    #[serde(rename = "SUB")]
    Subscription,
}

impl FeeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeType::Custody => "CUS",
            FeeType::Subscription => "SUB",
        }
    }
}

impl FromStr for FeeType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CUS" => Ok(FeeType::Custody),
            "SUB" => Ok(FeeType::Subscription),
            _ => Err(format!("Unknown fee type: {}", s)),
        }
    }
}

/// A recurring fee charged to the account, not tied to any trade.
/// Amounts are positive; a fee record always reduces the cash balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecord {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub fee_type: FeeType,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
