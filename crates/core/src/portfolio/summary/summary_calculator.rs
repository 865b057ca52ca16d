//! The portfolio aggregator.
//!
//! A pure, synchronous function of (transactions, prices, fee records):
//! one chronological pass drives the holding state machine for trades and
//! classifies cash events, then the history builder replays independently.
//! Malformed rows never reach this layer (the normalizer filters them) and
//! any structurally valid input produces a well-formed summary, including
//! the empty portfolio.

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::{BTreeMap, HashMap};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::fees::{FeeRecord, FeeType};
use crate::portfolio::history::build_performance_history;
use crate::portfolio::holdings::{apply_trade, Holding, HoldingState};
use crate::portfolio::summary::PortfolioSummary;
use crate::transactions::{OperationKind, Transaction};
use crate::utils::time_utils::market_date_today;

/// How a non-trade ledger entry lands in the portfolio totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CashEvent {
    Custody,
    Subscription,
    Tax,
    Dividend,
    NetDeposit,
    Other,
}

/// Computes the portfolio summary as of today in the market timezone.
pub fn calculate_portfolio(
    transactions: &[Transaction],
    current_prices: &HashMap<String, Decimal>,
    fee_records: &[FeeRecord],
) -> PortfolioSummary {
    calculate_portfolio_as_of(transactions, current_prices, fee_records, market_date_today())
}

/// Computes the portfolio summary with an explicit as-of date.
///
/// Transactions must already be sorted ascending by date (the normalizer's
/// output contract): the holding state machine is order-sensitive.
pub fn calculate_portfolio_as_of(
    transactions: &[Transaction],
    current_prices: &HashMap<String, Decimal>,
    fee_records: &[FeeRecord],
    as_of: NaiveDate,
) -> PortfolioSummary {
    let mut states: BTreeMap<String, HoldingState> = BTreeMap::new();

    let mut cash_balance = Decimal::ZERO;
    let mut total_realized_pl = Decimal::ZERO;
    let mut total_dividends = Decimal::ZERO;
    let mut total_deposits = Decimal::ZERO;
    let mut total_trading_fees = Decimal::ZERO;
    let mut total_custody_fees = Decimal::ZERO;
    let mut total_subscription_fees = Decimal::ZERO;
    let mut net_tax_impact = Decimal::ZERO;
    let mut enriched_transactions: Vec<Transaction> = Vec::with_capacity(transactions.len());

    for tx in transactions {
        // Every ledger entry moves cash by its net total, whatever it is.
        cash_balance += tx.total;

        if tx.operation.is_trade() {
            let state = states
                .entry(tx.ticker.clone())
                .or_insert_with(|| HoldingState::new(&tx.company));

            match apply_trade(state, tx) {
                Ok(outcome) => {
                    total_realized_pl += outcome.realized_pl;
                    total_trading_fees += outcome.fees;
                    net_tax_impact += outcome.tax;

                    // Enrich: inference fills gaps, explicit values win.
                    enriched_transactions.push(Transaction {
                        fees: Some(tx.fees.unwrap_or(outcome.fees)),
                        tax: Some(tx.tax.unwrap_or(outcome.tax)),
                        realized_pl: tx.realized_pl.or(Some(outcome.realized_pl)),
                        ..tx.clone()
                    });
                }
                Err(e) => {
                    warn!("Skipping unprocessable trade on {}: {}", tx.ticker, e);
                    enriched_transactions.push(tx.clone());
                }
            }
        } else {
            match classify_cash_event(tx) {
                CashEvent::Custody => total_custody_fees += tx.total.abs(),
                CashEvent::Subscription => total_subscription_fees += tx.total.abs(),
                CashEvent::Tax => net_tax_impact += tx.total.abs(),
                CashEvent::Dividend => total_dividends += tx.total,
                CashEvent::NetDeposit => total_deposits += tx.total,
                CashEvent::Other => {}
            }
            enriched_transactions.push(tx.clone());
        }
    }

    // Recurring fees tracked outside the ledger reduce cash directly.
    for fee in fee_records {
        cash_balance -= fee.amount;
        match fee.fee_type {
            FeeType::Custody => total_custody_fees += fee.amount,
            FeeType::Subscription => total_subscription_fees += fee.amount,
        }
    }

    let history = build_performance_history(transactions, current_prices, as_of);

    let mut holdings: Vec<Holding> = Vec::new();
    let mut total_value = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;

    for (ticker, state) in &states {
        if !state.is_open() {
            continue;
        }
        let current_price = match current_prices.get(ticker) {
            Some(price) => *price,
            None => {
                debug!(
                    "No live price for {}; valuing at last trade price {}",
                    ticker, state.last_price
                );
                state.last_price
            }
        };
        let holding = Holding::from_state(ticker, state, current_price);
        total_value += holding.market_value;
        total_cost += holding.total_cost();
        holdings.push(holding);
    }

    for holding in &mut holdings {
        holding.allocation = if total_value > Decimal::ZERO {
            holding.market_value / total_value * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    // Stable sort: equal allocations keep ticker order.
    holdings.sort_by(|a, b| b.allocation.cmp(&a.allocation));

    let round = |v: Decimal| {
        v.round_dp_with_strategy(
            DISPLAY_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        )
    };

    PortfolioSummary {
        total_value: round(total_value),
        total_cost: round(total_cost),
        total_realized_pl: round(total_realized_pl),
        total_unrealized_pl: round(total_value - total_cost),
        total_dividends: round(total_dividends),
        total_deposits: round(total_deposits),
        total_trading_fees: round(total_trading_fees),
        total_custody_fees: round(total_custody_fees),
        total_subscription_fees: round(total_subscription_fees),
        net_tax_impact: round(net_tax_impact),
        cash_balance: round(cash_balance),
        holdings,
        history,
        enriched_transactions,
    }
}

/// Classifies a non-trade entry. Subscription wins over the custody check;
/// custody requires a fee operation whose ticker/company points at the
/// bank ("bank", "cus"); plain fee events with no such hint only move cash.
fn classify_cash_event(tx: &Transaction) -> CashEvent {
    let ticker = tx.ticker.to_lowercase();
    let company = tx.company.to_lowercase();

    if tx.operation == OperationKind::Subscription || ticker.contains("sub") {
        return CashEvent::Subscription;
    }

    match tx.operation {
        OperationKind::BankFee
            if ticker == "cus" || ticker.contains("bank") || company.contains("bank") =>
        {
            CashEvent::Custody
        }
        OperationKind::Tax => CashEvent::Tax,
        OperationKind::Dividend => CashEvent::Dividend,
        OperationKind::Deposit | OperationKind::Withdrawal => CashEvent::NetDeposit,
        _ => CashEvent::Other,
    }
}
