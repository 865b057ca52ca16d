//! Property tests for the accounting identities the aggregator must
//! preserve for any structurally valid input.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::collections::HashMap;

use madfolio_core::calculate_portfolio_as_of;
use madfolio_core::fees::{FeeRecord, FeeType};
use madfolio_core::transactions::{OperationKind, Transaction};

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn operation_strategy() -> impl Strategy<Value = OperationKind> {
    prop_oneof![
        Just(OperationKind::Buy),
        Just(OperationKind::Buy),
        Just(OperationKind::Sell),
        Just(OperationKind::Deposit),
        Just(OperationKind::Withdrawal),
        Just(OperationKind::Dividend),
        Just(OperationKind::BankFee),
        Just(OperationKind::Tax),
    ]
}

fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (
        0i64..365,
        operation_strategy(),
        prop_oneof![Just("AAA"), Just("BBB"), Just("CCC")],
        1i64..=500,
        100i64..=100_000,
        0i64..=5_000,
        proptest::option::of(0i64..=3_000),
    )
        .prop_map(
            |(day, operation, ticker, qty, price_cents, noise_cents, explicit_fee_cents)| {
                let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + Duration::days(day);
                let quantity = Decimal::from(qty);
                let price = Decimal::new(price_cents, 2);
                let gross = quantity * price;
                let noise = Decimal::new(noise_cents, 2);

                let (quantity, price, total) = match operation {
                    OperationKind::Buy => (quantity, price, -(gross + noise)),
                    OperationKind::Sell => (quantity, price, gross - noise),
                    OperationKind::Deposit | OperationKind::Dividend => {
                        (Decimal::ZERO, Decimal::ZERO, noise * dec!(10))
                    }
                    _ => (Decimal::ZERO, Decimal::ZERO, -noise),
                };

                let fees = explicit_fee_cents
                    .filter(|_| operation.is_trade())
                    .map(|cents| Decimal::new(cents, 2));

                Transaction {
                    date,
                    company: ticker.to_string(),
                    isin: None,
                    operation,
                    ticker: ticker.to_string(),
                    quantity,
                    price,
                    total,
                    fees,
                    tax: None,
                    realized_pl: None,
                }
            },
        )
}

fn fee_records_strategy() -> impl Strategy<Value = Vec<FeeRecord>> {
    proptest::collection::vec(1i64..=10_000, 0..4).prop_map(|amounts| {
        amounts
            .iter()
            .enumerate()
            .map(|(i, cents)| FeeRecord {
                date: NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
                fee_type: if i % 2 == 0 {
                    FeeType::Custody
                } else {
                    FeeType::Subscription
                },
                amount: Decimal::new(*cents, 2),
                description: None,
            })
            .collect()
    })
}

fn price_map() -> HashMap<String, Decimal> {
    HashMap::from([
        ("AAA".to_string(), dec!(105.50)),
        ("BBB".to_string(), dec!(12.80)),
    ])
}

proptest! {
    #[test]
    fn cash_balance_tracks_every_flow_exactly(
        mut txs in proptest::collection::vec(transaction_strategy(), 0..40),
        fee_records in fee_records_strategy(),
    ) {
        txs.sort_by_key(|t| t.date);
        let summary = calculate_portfolio_as_of(&txs, &price_map(), &fee_records, as_of());

        let expected = txs.iter().map(|t| t.total).sum::<Decimal>()
            - fee_records.iter().map(|f| f.amount).sum::<Decimal>();
        prop_assert_eq!(summary.cash_balance, round_money(expected));
    }

    #[test]
    fn unrealized_pl_and_market_values_are_consistent(
        mut txs in proptest::collection::vec(transaction_strategy(), 0..40),
    ) {
        txs.sort_by_key(|t| t.date);
        let summary = calculate_portfolio_as_of(&txs, &price_map(), &[], as_of());

        prop_assert_eq!(
            summary.total_unrealized_pl,
            summary.total_value - summary.total_cost
        );
        for holding in &summary.holdings {
            prop_assert_eq!(
                holding.market_value,
                round_money(holding.quantity * holding.current_price)
            );
        }
    }

    #[test]
    fn allocations_sum_to_one_hundred(
        mut txs in proptest::collection::vec(transaction_strategy(), 1..40),
    ) {
        txs.sort_by_key(|t| t.date);
        let summary = calculate_portfolio_as_of(&txs, &price_map(), &[], as_of());

        if !summary.holdings.is_empty() {
            let allocation_sum: Decimal = summary.holdings.iter().map(|h| h.allocation).sum();
            prop_assert!((allocation_sum - dec!(100)).abs() < dec!(0.0001));
        }
    }

    #[test]
    fn recomputation_is_bit_identical(
        mut txs in proptest::collection::vec(transaction_strategy(), 0..30),
        fee_records in fee_records_strategy(),
    ) {
        txs.sort_by_key(|t| t.date);
        let first = calculate_portfolio_as_of(&txs, &price_map(), &fee_records, as_of());
        let second = calculate_portfolio_as_of(&txs, &price_map(), &fee_records, as_of());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn enrichment_fills_gaps_but_never_overrides(
        mut txs in proptest::collection::vec(transaction_strategy(), 0..40),
    ) {
        txs.sort_by_key(|t| t.date);
        let summary = calculate_portfolio_as_of(&txs, &price_map(), &[], as_of());

        prop_assert_eq!(summary.enriched_transactions.len(), txs.len());
        for (original, enriched) in txs.iter().zip(&summary.enriched_transactions) {
            if let Some(explicit) = original.fees {
                prop_assert_eq!(enriched.fees, Some(explicit));
            } else if original.operation.is_trade() {
                prop_assert!(enriched.fees.is_some());
            }
        }
    }
}
