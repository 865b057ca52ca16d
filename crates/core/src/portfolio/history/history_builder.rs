//! Day-by-day equity replay.
//!
//! A deliberately simplified simulation, independent of the holding state
//! machine: it is fee-agnostic and values positions at the last trade price
//! seen per ticker, which is what a dashboard equity curve wants. Only the
//! final as-of point uses live prices.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::constants::HISTORY_QUANTITY_EPSILON;
use crate::portfolio::history::PerformancePoint;
use crate::transactions::{OperationKind, Transaction};

#[derive(Debug, Clone, Copy, Default)]
struct SimPosition {
    quantity: Decimal,
    last_price: Decimal,
}

/// Replays the transaction stream and produces one equity point per
/// calendar day with activity, plus a final point dated `as_of` valued at
/// `current_prices` (falling back to last trade prices). If the last
/// bucket already falls on `as_of`, the live-priced point replaces it.
///
/// An empty transaction list produces an empty history.
pub fn build_performance_history(
    transactions: &[Transaction],
    current_prices: &HashMap<String, Decimal>,
    as_of: NaiveDate,
) -> Vec<PerformancePoint> {
    if transactions.is_empty() {
        return Vec::new();
    }

    let mut by_date: BTreeMap<NaiveDate, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        by_date.entry(tx.date).or_default().push(tx);
    }

    let mut cash = Decimal::ZERO;
    let mut invested = Decimal::ZERO;
    let mut positions: BTreeMap<String, SimPosition> = BTreeMap::new();
    let mut history = Vec::with_capacity(by_date.len() + 1);

    for (date, daily) in &by_date {
        for tx in daily {
            cash += tx.total;
            match tx.operation {
                OperationKind::Deposit | OperationKind::Withdrawal => {
                    invested += tx.total;
                }
                OperationKind::Buy => {
                    let position = positions.entry(tx.ticker.clone()).or_default();
                    position.quantity += tx.quantity.abs();
                    position.last_price = tx.price;
                }
                OperationKind::Sell => {
                    if let Some(position) = positions.get_mut(&tx.ticker) {
                        position.quantity -= tx.quantity.abs();
                        position.last_price = tx.price;
                    }
                }
                // Dividends, fees, taxes and the rest move cash only.
                _ => {}
            }
        }

        history.push(PerformancePoint {
            date: *date,
            value: cash + holdings_value(&positions, None),
            invested,
        });
    }

    let live_point = PerformancePoint {
        date: as_of,
        value: cash + holdings_value(&positions, Some(current_prices)),
        invested,
    };
    match history.last_mut() {
        Some(last) if last.date == as_of => *last = live_point,
        _ => history.push(live_point),
    }

    history
}

/// Values the simulated book. With a price map, live prices win and the
/// last trade price is the fallback.
fn holdings_value(
    positions: &BTreeMap<String, SimPosition>,
    current_prices: Option<&HashMap<String, Decimal>>,
) -> Decimal {
    positions
        .iter()
        .filter(|(_, p)| p.quantity.abs() > HISTORY_QUANTITY_EPSILON)
        .map(|(ticker, p)| {
            let price = current_prices
                .and_then(|prices| prices.get(ticker).copied())
                .unwrap_or(p.last_price);
            p.quantity * price
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::{OperationKind, Transaction};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(
        d: NaiveDate,
        operation: OperationKind,
        ticker: &str,
        quantity: Decimal,
        price: Decimal,
        total: Decimal,
    ) -> Transaction {
        Transaction {
            date: d,
            company: ticker.to_string(),
            isin: None,
            operation,
            ticker: ticker.to_string(),
            quantity,
            price,
            total,
            fees: None,
            tax: None,
            realized_pl: None,
        }
    }

    #[test]
    fn empty_stream_yields_empty_history() {
        let history = build_performance_history(&[], &HashMap::new(), date(2023, 6, 1));
        assert!(history.is_empty());
    }

    #[test]
    fn deposits_move_cash_and_invested_capital() {
        let txs = vec![tx(
            date(2023, 1, 1),
            OperationKind::Deposit,
            "",
            dec!(0),
            dec!(0),
            dec!(5000),
        )];
        let history = build_performance_history(&txs, &HashMap::new(), date(2023, 6, 1));

        assert_eq!(history.len(), 2); // activity day + as-of point
        assert_eq!(history[0].value, dec!(5000));
        assert_eq!(history[0].invested, dec!(5000));
        assert_eq!(history[1].date, date(2023, 6, 1));
        assert_eq!(history[1].invested, dec!(5000));
    }

    #[test]
    fn buys_are_valued_at_last_trade_price() {
        let txs = vec![
            tx(
                date(2023, 1, 1),
                OperationKind::Deposit,
                "",
                dec!(0),
                dec!(0),
                dec!(2000),
            ),
            tx(
                date(2023, 1, 2),
                OperationKind::Buy,
                "IAM",
                dec!(10),
                dec!(100),
                dec!(-1010),
            ),
        ];
        let history = build_performance_history(&txs, &HashMap::new(), date(2023, 6, 1));

        // Day 2: cash 2000 - 1010 = 990, holdings 10 x 100
        assert_eq!(history[1].value, dec!(1990));
        // The replay is fee-agnostic: the 10 MAD of fees shows up as drag
        assert_eq!(history[1].invested, dec!(2000));
    }

    #[test]
    fn dividends_and_fees_touch_cash_only() {
        let txs = vec![
            tx(
                date(2023, 1, 1),
                OperationKind::Dividend,
                "IAM",
                dec!(0),
                dec!(0),
                dec!(120),
            ),
            tx(
                date(2023, 1, 2),
                OperationKind::BankFee,
                "bank",
                dec!(0),
                dec!(0),
                dec!(-25),
            ),
        ];
        let history = build_performance_history(&txs, &HashMap::new(), date(2023, 6, 1));

        assert_eq!(history[0].value, dec!(120));
        assert_eq!(history[1].value, dec!(95));
        assert_eq!(history[1].invested, dec!(0));
    }

    #[test]
    fn as_of_point_uses_live_prices_with_last_trade_fallback() {
        let txs = vec![
            tx(
                date(2023, 1, 2),
                OperationKind::Buy,
                "IAM",
                dec!(10),
                dec!(100),
                dec!(-1000),
            ),
            tx(
                date(2023, 1, 2),
                OperationKind::Buy,
                "ATW",
                dec!(2),
                dec!(400),
                dec!(-800),
            ),
        ];
        let mut prices = HashMap::new();
        prices.insert("IAM".to_string(), dec!(130));

        let history = build_performance_history(&txs, &prices, date(2023, 6, 1));

        let last = history.last().unwrap();
        // IAM at live 130, ATW falls back to its last trade price 400
        assert_eq!(last.value, dec!(-1800) + dec!(1300) + dec!(800));
    }

    #[test]
    fn same_day_as_of_overwrites_the_bucket_with_live_prices() {
        let today = date(2023, 1, 2);
        let txs = vec![tx(
            today,
            OperationKind::Buy,
            "IAM",
            dec!(10),
            dec!(100),
            dec!(-1000),
        )];
        let mut prices = HashMap::new();
        prices.insert("IAM".to_string(), dec!(110));

        let history = build_performance_history(&txs, &prices, today);

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].value, dec!(-1000) + dec!(1100));
    }

    #[test]
    fn positions_sold_to_zero_drop_out_of_the_valuation() {
        let txs = vec![
            tx(
                date(2023, 1, 1),
                OperationKind::Buy,
                "IAM",
                dec!(10),
                dec!(100),
                dec!(-1000),
            ),
            tx(
                date(2023, 2, 1),
                OperationKind::Sell,
                "IAM",
                dec!(10),
                dec!(120),
                dec!(1200),
            ),
        ];
        let history = build_performance_history(&txs, &HashMap::new(), date(2023, 6, 1));

        // After the full exit, only cash remains
        assert_eq!(history[1].value, dec!(200));
        assert_eq!(history.last().unwrap().value, dec!(200));
    }
}
