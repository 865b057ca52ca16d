use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::history::PerformancePoint;
use crate::portfolio::holdings::Holding;
use crate::transactions::Transaction;

/// The aggregate result of one portfolio computation.
///
/// Core accounting identity: `cash_balance` equals the running sum of every
/// transaction's total plus every fee record's negated amount, and
/// `total_unrealized_pl == total_value - total_cost`, exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_realized_pl: Decimal,
    pub total_unrealized_pl: Decimal,
    pub total_dividends: Decimal,
    /// Net deposited capital: deposits plus (negative) withdrawals.
    pub total_deposits: Decimal,
    /// Commissions on buys and sells, explicit or inferred.
    pub total_trading_fees: Decimal,
    /// Account maintenance fees, from classified transactions and CUS
    /// fee records.
    pub total_custody_fees: Decimal,
    /// Subscription fees, from classified transactions and SUB fee records.
    pub total_subscription_fees: Decimal,
    /// Taxes paid: TPCVM on sells plus standalone tax events.
    pub net_tax_impact: Decimal,
    pub cash_balance: Decimal,
    /// Open holdings, ordered descending by allocation.
    pub holdings: Vec<Holding>,
    pub history: Vec<PerformancePoint>,
    /// The input transactions with inferred fees/tax/realized P&L filled
    /// in. Explicit values are never overridden.
    pub enriched_transactions: Vec<Transaction>,
}
