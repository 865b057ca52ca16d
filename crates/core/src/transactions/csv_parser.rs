//! CSV normalizer for brokerage transaction exports.
//!
//! Three historical schema variants are auto-detected from the header row;
//! the delimiter is auto-detected among comma, semicolon, and tab. Bad rows
//! are skipped and reported, never fatal: an import with some bad rows
//! still succeeds for the good ones.

use csv::ReaderBuilder;
use log::warn;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::transactions::amount_parser::parse_amount;
use crate::transactions::transactions_model::{
    OperationKind, ParseIssue, ParsedTransactions, Transaction,
};
use crate::utils::time_utils::parse_flexible_date;

/// Header layouts seen across export generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaVariant {
    /// `Date,Company,ISIN,Operation,Ticker,Qty,Price,Total[,Fees,Tax]`
    Legacy,
    /// `Date,Category,Description,Ticker,Qty,Unit_Price,Amount`
    CashLedger,
    /// `Date,Type,Ticker,Qty,Price,Net Amount,Fees,Tax,Realized P&L`
    Comprehensive,
}

/// Normalizes a raw CSV export into a date-sorted transaction list.
///
/// Per-line problems are collected into `errors` (unparseable date) and
/// `warnings` (column count mismatch); the affected lines are skipped.
pub fn parse_transactions_csv(content: &str) -> ParsedTransactions {
    let mut result = ParsedTransactions::default();

    let content = content.trim_start_matches('\u{feff}').trim();
    let delimiter = detect_delimiter(content.lines().next().unwrap_or_default());

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut headers: Vec<String> = Vec::new();
    let mut header_index: HashMap<String, usize> = HashMap::new();
    let mut variant: Option<SchemaVariant> = None;
    let mut data_rows = 0usize;

    for (idx, record) in reader.records().enumerate() {
        let line = idx + 1;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                result
                    .errors
                    .push(ParseIssue::new(line, format!("Unreadable row: {}", e)));
                continue;
            }
        };

        if idx == 0 {
            headers = record.iter().map(|h| h.trim().to_string()).collect();
            for (i, h) in headers.iter().enumerate() {
                header_index.insert(h.clone(), i);
            }
            variant = detect_schema(&headers);
            if variant.is_none() {
                result.errors.push(ParseIssue::new(
                    line,
                    "Unrecognized CSV schema: header matches no known export format",
                ));
                return result;
            }
            continue;
        }

        let Some(schema) = variant else { continue };

        let mut values: Vec<String> = record.iter().map(|v| v.to_string()).collect();
        if values.iter().all(|v| v.trim().is_empty()) {
            continue;
        }
        data_rows += 1;

        // If a row splits into more fields than the header, the last column
        // (typically a thousands-separated amount like "-1,010.00 MAD")
        // embedded the delimiter. Rejoin everything belonging to the final
        // column so alignment is preserved.
        if values.len() > headers.len() {
            let tail = values
                .split_off(headers.len() - 1)
                .join(&(delimiter as char).to_string());
            values.push(tail);
        }

        if values.len() != headers.len() {
            result
                .warnings
                .push(ParseIssue::new(line, "Column count mismatch"));
            continue;
        }

        let field = |name: &str| -> String {
            header_index
                .get(name)
                .and_then(|&i| values.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let raw_date = field("Date");
        let date = match parse_flexible_date(&raw_date) {
            Some(d) => d,
            None => {
                result.errors.push(ParseIssue::new(
                    line,
                    format!("Invalid date format \"{}\"", raw_date),
                ));
                continue;
            }
        };

        let amount = |name: &str| parse_amount(&field(name));
        let required = |name: &str| amount(name).unwrap_or(Decimal::ZERO);

        let transaction = match schema {
            SchemaVariant::Comprehensive => {
                let operation = match field("Type").to_uppercase().as_str() {
                    "BUY" => OperationKind::Buy,
                    "SELL" => OperationKind::Sell,
                    other => OperationKind::from_label(other),
                };

                // Older statements report buy/fee/tax amounts unsigned;
                // cash direction is implied by the operation.
                let mut total = required("Net Amount");
                let outflow = matches!(
                    operation,
                    OperationKind::Buy | OperationKind::BankFee | OperationKind::Tax
                );
                if outflow && total > Decimal::ZERO {
                    total = -total;
                }

                let ticker = field("Ticker");
                Transaction {
                    date,
                    company: ticker.clone(),
                    isin: None,
                    operation,
                    ticker,
                    quantity: required("Qty"),
                    price: required("Price"),
                    total,
                    fees: amount("Fees"),
                    tax: amount("Tax"),
                    realized_pl: amount("Realized P&L"),
                }
            }
            SchemaVariant::Legacy => {
                let isin = field("ISIN");
                Transaction {
                    date,
                    company: field("Company"),
                    isin: (!isin.is_empty()).then_some(isin),
                    operation: OperationKind::from_label(&field("Operation")),
                    ticker: field("Ticker"),
                    quantity: required("Qty"),
                    price: required("Price"),
                    total: required("Total"),
                    fees: amount("Fees"),
                    tax: amount("Tax"),
                    realized_pl: None,
                }
            }
            SchemaVariant::CashLedger => {
                let operation = if field("Category").to_lowercase().contains("deposit") {
                    OperationKind::Deposit
                } else {
                    OperationKind::Unknown
                };
                Transaction {
                    date,
                    company: field("Description"),
                    isin: None,
                    operation,
                    ticker: field("Ticker"),
                    quantity: required("Qty"),
                    price: required("Unit_Price"),
                    total: required("Amount"),
                    fees: None,
                    tax: None,
                    realized_pl: None,
                }
            }
        };

        result.transactions.push(transaction);
    }

    if headers.is_empty() || data_rows == 0 {
        result
            .errors
            .push(ParseIssue::new(1, "CSV file is empty or has no data rows"));
        return result;
    }

    if !result.warnings.is_empty() {
        warn!(
            "CSV import skipped {} structurally inconsistent line(s)",
            result.warnings.len()
        );
    }

    // Stable sort: same-day rows keep their file order.
    result.transactions.sort_by_key(|t| t.date);
    result
}

/// Picks the delimiter from the header line. Tab wins over semicolon wins
/// over comma, since a tab- or semicolon-delimited header may legitimately
/// contain commas inside column names.
fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains('\t') {
        b'\t'
    } else if header_line.contains(';') {
        b';'
    } else {
        b','
    }
}

fn detect_schema(headers: &[String]) -> Option<SchemaVariant> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    if has("Net Amount") && has("Realized P&L") {
        Some(SchemaVariant::Comprehensive)
    } else if has("Operation") && !has("Net Amount") {
        Some(SchemaVariant::Legacy)
    } else if has("Category") && has("Amount") {
        Some(SchemaVariant::CashLedger)
    } else {
        None
    }
}
