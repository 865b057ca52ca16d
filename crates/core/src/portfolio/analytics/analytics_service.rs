//! Concentration and activity metrics computed from the aggregator's
//! outputs. Stateless, like everything else in this crate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use crate::constants::QUANTITY_THRESHOLD;
use crate::fees::standard_fees;
use crate::portfolio::analytics::{
    ConcentrationLevel, ConcentrationRisk, MonthlyMetric, TickerFrequency,
};
use crate::portfolio::holdings::Holding;
use crate::transactions::Transaction;

const HHI_SCALE: Decimal = dec!(10000);
const HHI_MODERATE: Decimal = dec!(1500);
const HHI_HIGH: Decimal = dec!(2500);

/// Herfindahl-Hirschman concentration over the open holdings.
pub fn concentration_risk(holdings: &[Holding]) -> ConcentrationRisk {
    let active: Vec<&Holding> = holdings
        .iter()
        .filter(|h| h.quantity > QUANTITY_THRESHOLD && h.market_value > Decimal::ZERO)
        .collect();
    let total_value: Decimal = active.iter().map(|h| h.market_value).sum();

    if total_value == Decimal::ZERO {
        return ConcentrationRisk {
            hhi: Decimal::ZERO,
            level: ConcentrationLevel::Low,
        };
    }

    let sum_squared_weights: Decimal = active
        .iter()
        .map(|h| {
            let weight = h.market_value / total_value;
            weight * weight
        })
        .sum();

    let hhi = (sum_squared_weights * HHI_SCALE).round();
    let level = if hhi > HHI_HIGH {
        ConcentrationLevel::High
    } else if hhi > HHI_MODERATE {
        ConcentrationLevel::Moderate
    } else {
        ConcentrationLevel::Low
    };

    ConcentrationRisk { hhi, level }
}

/// Buy/sell volumes, trade counts, and fees per calendar month.
/// Uses each trade's enriched fee where present, the standard tariff
/// otherwise.
pub fn monthly_metrics(transactions: &[Transaction]) -> Vec<MonthlyMetric> {
    let mut by_month: BTreeMap<String, MonthlyMetric> = BTreeMap::new();

    for tx in transactions.iter().filter(|t| t.operation.is_trade()) {
        let month = tx.date.format("%Y-%m").to_string();
        let metric = by_month
            .entry(month.clone())
            .or_insert_with(|| MonthlyMetric {
                month,
                buys: Decimal::ZERO,
                sells: Decimal::ZERO,
                trades: 0,
                fees: Decimal::ZERO,
            });

        let gross = tx.gross_amount();
        metric.trades += 1;
        metric.fees += tx.fees.unwrap_or_else(|| standard_fees(gross));
        if tx.operation == crate::transactions::OperationKind::Buy {
            metric.buys += gross;
        } else {
            metric.sells += gross;
        }
    }

    by_month.into_values().collect()
}

/// Trade count per ticker, busiest first. Ties order alphabetically.
pub fn ticker_frequency(transactions: &[Transaction]) -> Vec<TickerFrequency> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.operation.is_trade()) {
        *counts.entry(tx.ticker.clone()).or_insert(0) += 1;
    }

    let mut frequencies: Vec<TickerFrequency> = counts
        .into_iter()
        .map(|(ticker, count)| TickerFrequency { ticker, count })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies
}
