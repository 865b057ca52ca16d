use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::assets::sector_for_ticker;
use crate::constants::{DISPLAY_DECIMAL_PRECISION, QUANTITY_THRESHOLD};
use crate::fees::break_even_price;

/// Running per-ticker ledger state.
///
/// Lives only for the duration of one portfolio computation; it is created
/// at zero on a ticker's first trade and discarded once the summary is
/// built. Must be fed trades strictly in date order — the weighted average
/// cannot be rewound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingState {
    pub quantity: Decimal,
    /// Fee-inclusive average unit cost, used for P&L.
    pub cost_basis: Decimal,
    /// Gross average unit price, fees excluded. Capital-gains tax is levied
    /// on the gain over this figure, not over the net cost basis.
    pub average_price: Decimal,
    pub last_price: Decimal,
    pub company: String,
    pub transaction_count: u32,
    // Cumulative VWAP accumulators. Never reset, even across round-trips.
    pub total_buy_cost: Decimal,
    pub total_buy_qty: Decimal,
    pub total_sell_proceeds: Decimal,
    pub total_sell_qty: Decimal,
}

impl HoldingState {
    pub fn new(company: impl Into<String>) -> Self {
        HoldingState {
            company: company.into(),
            ..Default::default()
        }
    }

    /// Whether the position is still open, beyond float drift.
    pub fn is_open(&self) -> bool {
        self.quantity > QUANTITY_THRESHOLD
    }
}

/// What one trade did to the ledger: realized P&L (sells only) and the
/// fee/tax amounts actually charged, explicit or inferred.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TradeOutcome {
    pub realized_pl: Decimal,
    pub fees: Decimal,
    pub tax: Decimal,
}

/// Point-in-time display snapshot of one holding, derived from a
/// `HoldingState` plus a current price. Built fresh on every portfolio
/// recalculation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub company: String,
    pub sector: String,
    pub quantity: Decimal,
    /// Fee-inclusive average unit cost.
    pub average_cost: Decimal,
    /// Gross average unit price, fees excluded.
    pub average_price: Decimal,
    pub current_price: Decimal,
    pub market_value: Decimal,
    pub unrealized_pl: Decimal,
    pub unrealized_pl_percent: Decimal,
    /// Share of total portfolio value, in percent. Zero until all holdings
    /// are known; filled in by the aggregator.
    pub allocation: Decimal,
    pub transaction_count: u32,
    pub break_even_price: Decimal,
    pub buy_vwap: Decimal,
    pub buy_volume: Decimal,
    pub sell_vwap: Decimal,
    pub sell_volume: Decimal,
}

impl Holding {
    /// Builds the display snapshot for an open position at a given price.
    pub fn from_state(ticker: &str, state: &HoldingState, current_price: Decimal) -> Self {
        let round2 = |v: Decimal| {
            v.round_dp_with_strategy(
                DISPLAY_DECIMAL_PRECISION,
                RoundingStrategy::MidpointAwayFromZero,
            )
        };

        let market_value = round2(state.quantity * current_price);
        let total_cost = round2(state.quantity * state.cost_basis);
        let unrealized_pl = round2(market_value - total_cost);
        let unrealized_pl_percent = if total_cost > Decimal::ZERO {
            unrealized_pl / total_cost * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        Holding {
            ticker: ticker.to_string(),
            company: state.company.clone(),
            sector: sector_for_ticker(ticker).to_string(),
            quantity: state.quantity,
            average_cost: state.cost_basis,
            average_price: state.average_price,
            current_price,
            market_value,
            unrealized_pl,
            unrealized_pl_percent,
            allocation: Decimal::ZERO,
            transaction_count: state.transaction_count,
            break_even_price: break_even_price(state.cost_basis),
            buy_vwap: if state.total_buy_qty > Decimal::ZERO {
                round2(state.total_buy_cost / state.total_buy_qty)
            } else {
                Decimal::ZERO
            },
            buy_volume: state.total_buy_qty,
            sell_vwap: if state.total_sell_qty > Decimal::ZERO {
                round2(state.total_sell_proceeds / state.total_sell_qty)
            } else {
                Decimal::ZERO
            },
            sell_volume: state.total_sell_qty,
        }
    }

    /// Cost of the position at its fee-inclusive average.
    pub fn total_cost(&self) -> Decimal {
        (self.quantity * self.average_cost).round_dp_with_strategy(
            DISPLAY_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        )
    }
}
