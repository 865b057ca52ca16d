//! Madfolio Core - the portfolio accounting engine.
//!
//! This crate reconstructs holdings, cost basis, realized/unrealized P&L,
//! fee and tax drag, and cash flow for Casablanca Stock Exchange brokerage
//! accounts from imported transaction history. It is a pure computation
//! layer: persistence, price feeds, and presentation are implemented by
//! the surrounding application and talk to this crate through plain data.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod fees;
pub mod portfolio;
pub mod transactions;
pub mod utils;

// Re-export the portfolio read models and calculators
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
