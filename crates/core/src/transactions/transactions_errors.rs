use thiserror::Error;

/// Errors specific to transaction handling.
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Invalid transaction data: {0}")]
    InvalidData(String),

    #[error("Unrecognized CSV schema: {0}")]
    UnsupportedSchema(String),
}
