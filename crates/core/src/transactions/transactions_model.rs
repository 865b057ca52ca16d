//! Transaction domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operation kind of a ledger entry.
///
/// Brokerage exports label operations with a free-text French/English mix
/// ("Achat", "buy", "Dividende", "TPCVM", ...). The normalizer maps those
/// labels onto this closed set once, at the boundary; everything downstream
/// branches on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Buy,
    Sell,
    Deposit,
    Withdrawal,
    Dividend,
    BankFee,
    Tax,
    Subscription,
    Unknown,
}

impl OperationKind {
    /// Maps a raw operation label onto a kind.
    ///
    /// Trade labels match exactly ("achat"/"buy", "vente"/"sell"); cash
    /// event labels match by fragment, the way the historical exports mix
    /// wording. Subscription takes priority over the generic fee check.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.split_whitespace().collect::<Vec<_>>().join(" ");
        let normalized = normalized.to_lowercase();

        match normalized.as_str() {
            "achat" | "buy" => return OperationKind::Buy,
            "vente" | "sell" => return OperationKind::Sell,
            _ => {}
        }

        if normalized.contains("sub") || normalized.contains("abonnement") {
            OperationKind::Subscription
        } else if normalized.contains("taxe") || normalized.contains("tpcvm") || normalized == "tax"
        {
            OperationKind::Tax
        } else if normalized.contains("frais") || normalized.contains("fee") {
            OperationKind::BankFee
        } else if normalized.contains("dividende") || normalized.contains("dividend") {
            OperationKind::Dividend
        } else if normalized.contains("depot") || normalized.contains("deposit") {
            OperationKind::Deposit
        } else if normalized.contains("retrait") || normalized.contains("withdraw") {
            OperationKind::Withdrawal
        } else {
            OperationKind::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Buy => "BUY",
            OperationKind::Sell => "SELL",
            OperationKind::Deposit => "DEPOSIT",
            OperationKind::Withdrawal => "WITHDRAWAL",
            OperationKind::Dividend => "DIVIDEND",
            OperationKind::BankFee => "BANK_FEE",
            OperationKind::Tax => "TAX",
            OperationKind::Subscription => "SUBSCRIPTION",
            OperationKind::Unknown => "UNKNOWN",
        }
    }

    /// Whether this kind drives the holding state machine.
    pub fn is_trade(&self) -> bool {
        matches!(self, OperationKind::Buy | OperationKind::Sell)
    }
}

/// One ledger entry, as produced by the normalizer.
///
/// `quantity` and `price` are unsigned magnitudes; the cash direction is
/// carried by the sign of `total` (negative = cash out). The aggregator
/// never mutates a transaction: enrichment emits a new record with the
/// inferred fields filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: NaiveDate,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
    pub operation: OperationKind,
    pub ticker: String,
    pub quantity: Decimal,
    pub price: Decimal,
    /// Net cash moved, fees and tax included. Signed.
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realized_pl: Option<Decimal>,
}

impl Transaction {
    /// Gross trade amount: quantity x price, fees and tax excluded.
    pub fn gross_amount(&self) -> Decimal {
        self.quantity.abs() * self.price
    }
}

/// A non-fatal problem encountered on one line of a CSV import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseIssue {
    /// 1-based line number in the source file.
    pub line: usize,
    pub message: String,
}

impl ParseIssue {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Result of normalizing a CSV export: the good rows, sorted ascending by
/// date, plus the per-line problems that were skipped over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransactions {
    pub transactions: Vec<Transaction>,
    /// Lines dropped because a required value failed to parse.
    pub errors: Vec<ParseIssue>,
    /// Lines dropped for structural reasons (column count mismatch).
    pub warnings: Vec<ParseIssue>,
}
