//! Per-ticker weighted-average-cost ledger.

mod holdings_calculator;
mod holdings_model;


pub use holdings_calculator::apply_trade;
pub use holdings_model::{Holding, HoldingState, TradeOutcome};
