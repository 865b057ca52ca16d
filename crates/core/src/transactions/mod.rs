//! Transaction domain models and the CSV normalizer.

mod amount_parser;
mod csv_parser;
mod transactions_errors;
mod transactions_model;

#[cfg(test)]
mod transactions_model_tests;

pub use amount_parser::parse_amount;
pub use csv_parser::parse_transactions_csv;
pub use transactions_errors::TransactionError;
pub use transactions_model::{OperationKind, ParseIssue, ParsedTransactions, Transaction};
