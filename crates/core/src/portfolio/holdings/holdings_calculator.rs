//! The trade state machine: applies one buy or sell to a holding ledger.
//!
//! Fee and tax amounts are often absent from brokerage exports. When they
//! are, this module infers them from the residual between the net cash
//! total and the gross amount, compared against the standard tariff within
//! a tolerance band. Explicit values always win; inference only fills gaps.

use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DISPLAY_DECIMAL_PRECISION, STATE_DECIMAL_PRECISION};
use crate::errors::{CalculatorError, Result};
use crate::fees::{
    standard_fees, tax_on_gain, FEE_INFERENCE_TOLERANCE, FEE_RESIDUAL_EPSILON, HIGH_FEE_RATIO,
};
use crate::portfolio::holdings::{HoldingState, TradeOutcome};
use crate::transactions::{OperationKind, Transaction};

fn round_state(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(STATE_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Applies one trade to the ledger, in place, and reports what it did.
///
/// Trades MUST arrive in chronological order per ticker: the weighted
/// average blends irreversibly, there is no reorder or undo.
pub fn apply_trade(state: &mut HoldingState, tx: &Transaction) -> Result<TradeOutcome> {
    let outcome = match tx.operation {
        OperationKind::Buy => apply_buy(state, tx),
        OperationKind::Sell => apply_sell(state, tx),
        other => {
            return Err(CalculatorError::UnsupportedOperation(other.as_str().to_string()).into())
        }
    };

    state.last_price = tx.price;
    state.transaction_count += 1;

    Ok(outcome)
}

/// Buy: infer missing fees, then blend (or reset) the weighted averages.
fn apply_buy(state: &mut HoldingState, tx: &Transaction) -> TradeOutcome {
    let qty = tx.quantity.abs();
    let gross = tx.gross_amount();

    let fees = match tx.fees {
        Some(explicit) => explicit,
        None => {
            // Buy: Total = -(gross + fees), so the residual over gross is
            // the fee paid. Trust the standard formula when the residual is
            // within tolerance of it (or negligible); otherwise trust the
            // data.
            let diff = tx.total.abs() - gross;
            let std_fees = standard_fees(gross);
            if (diff - std_fees).abs() < FEE_INFERENCE_TOLERANCE || diff.abs() < FEE_RESIDUAL_EPSILON
            {
                std_fees
            } else {
                diff.max(Decimal::ZERO)
            }
        }
    };
    let tax = tx.tax.unwrap_or(Decimal::ZERO);

    warn_on_high_fee(&tx.ticker, fees, gross);

    let new_qty = state.quantity + qty;
    if new_qty > Decimal::ZERO && qty > Decimal::ZERO {
        let added_cost = gross + fees;
        if state.quantity <= Decimal::ZERO {
            // Flat or short: no stale economics to blend with.
            state.cost_basis = round_state(added_cost / qty);
            state.average_price = round_state(gross / qty);
        } else {
            let current_total_cost = state.quantity * state.cost_basis;
            let current_total_price = state.quantity * state.average_price;
            state.cost_basis = round_state((current_total_cost + added_cost) / new_qty);
            state.average_price = round_state((current_total_price + gross) / new_qty);
        }
    }
    state.quantity = new_qty;
    state.total_buy_cost = round_state(state.total_buy_cost + gross);
    state.total_buy_qty = round_state(state.total_buy_qty + qty);

    TradeOutcome {
        realized_pl: Decimal::ZERO,
        fees,
        tax,
    }
}

/// Sell: infer whichever of fees/tax is missing, then realize P&L against
/// the fee-inclusive cost basis. The remaining position's unit economics
/// are untouched by a sell.
fn apply_sell(state: &mut HoldingState, tx: &Transaction) -> TradeOutcome {
    let qty = tx.quantity.abs();
    let gross = tx.gross_amount();

    let mut fees = tx.fees.unwrap_or(Decimal::ZERO);
    let mut tax = tx.tax.unwrap_or(Decimal::ZERO);

    if tx.fees.is_none() || tx.tax.is_none() {
        // Sell: Total = gross - fees - tax. The shortfall below gross is
        // split between fees and tax. The estimated tax uses the *gross*
        // average price, consistent with how TPCVM is actually levied.
        let diff = gross - tx.total;
        let std_fees = standard_fees(gross);
        let gain = (tx.price - state.average_price) * qty;
        let est_tax = tax_on_gain(gain);

        match (tx.fees, tx.tax) {
            (None, None) => {
                if (diff - (std_fees + est_tax)).abs() < FEE_INFERENCE_TOLERANCE
                    || diff.abs() < FEE_RESIDUAL_EPSILON
                {
                    fees = std_fees;
                    tax = est_tax;
                } else if diff > std_fees {
                    fees = std_fees;
                    tax = (diff - std_fees).max(Decimal::ZERO);
                } else {
                    fees = diff.max(Decimal::ZERO);
                    tax = Decimal::ZERO;
                }
            }
            (None, Some(explicit_tax)) => {
                let remaining = diff - explicit_tax;
                fees = if (remaining - std_fees).abs() < FEE_INFERENCE_TOLERANCE
                    || remaining < Decimal::ZERO
                {
                    std_fees
                } else {
                    remaining.max(Decimal::ZERO)
                };
            }
            (Some(explicit_fees), None) => {
                let remaining = diff - explicit_fees;
                tax = if remaining > FEE_RESIDUAL_EPSILON {
                    remaining
                } else {
                    Decimal::ZERO
                };
            }
            (Some(_), Some(_)) => {}
        }
    }

    warn_on_high_fee(&tx.ticker, fees, gross);

    // Total is the post-fee/tax cash received, so realized P&L already
    // nets out this sale's own costs.
    let cost_of_sold = qty * state.cost_basis;
    let realized_pl = round_money(tx.total - cost_of_sold);

    state.quantity = round_state(state.quantity - qty);
    state.total_sell_proceeds = round_state(state.total_sell_proceeds + gross);
    state.total_sell_qty = round_state(state.total_sell_qty + qty);

    TradeOutcome {
        realized_pl,
        fees,
        tax,
    }
}

/// Sanity signal, not a rejection: the computed value is still used.
fn warn_on_high_fee(ticker: &str, fees: Decimal, gross: Decimal) {
    if fees > gross * HIGH_FEE_RATIO {
        warn!(
            "High fee detected on {}: {} MAD against {} MAD gross",
            ticker, fees, gross
        );
    }
}
