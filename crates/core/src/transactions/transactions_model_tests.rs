#[cfg(test)]
mod tests {
    use crate::transactions::{OperationKind, Transaction};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn trade_labels_match_exactly() {
        assert_eq!(OperationKind::from_label("Achat"), OperationKind::Buy);
        assert_eq!(OperationKind::from_label("buy"), OperationKind::Buy);
        assert_eq!(OperationKind::from_label("VENTE"), OperationKind::Sell);
        assert_eq!(OperationKind::from_label("sell"), OperationKind::Sell);
    }

    #[test]
    fn cash_labels_match_by_fragment() {
        assert_eq!(OperationKind::from_label("Depot"), OperationKind::Deposit);
        assert_eq!(
            OperationKind::from_label("Retrait especes"),
            OperationKind::Withdrawal
        );
        assert_eq!(
            OperationKind::from_label("Dividende IAM"),
            OperationKind::Dividend
        );
        assert_eq!(
            OperationKind::from_label("Frais de tenue de compte"),
            OperationKind::BankFee
        );
        assert_eq!(OperationKind::from_label("TPCVM"), OperationKind::Tax);
        assert_eq!(OperationKind::from_label("Taxe"), OperationKind::Tax);
    }

    #[test]
    fn subscription_takes_priority_over_fee() {
        assert_eq!(
            OperationKind::from_label("Frais de souscription SUB"),
            OperationKind::Subscription
        );
        assert_eq!(
            OperationKind::from_label("Abonnement mensuel"),
            OperationKind::Subscription
        );
    }

    #[test]
    fn unmapped_labels_are_unknown() {
        assert_eq!(
            OperationKind::from_label("Transfert titres"),
            OperationKind::Unknown
        );
        assert_eq!(OperationKind::from_label(""), OperationKind::Unknown);
    }

    #[test]
    fn gross_amount_ignores_quantity_sign() {
        let tx = Transaction {
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            company: "Test".to_string(),
            isin: None,
            operation: OperationKind::Sell,
            ticker: "TEST".to_string(),
            quantity: dec!(-5),
            price: dec!(100),
            total: dec!(500),
            fees: None,
            tax: None,
            realized_pl: None,
        };
        assert_eq!(tx.gross_amount(), dec!(500));
    }
}
