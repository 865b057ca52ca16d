//! Portfolio computation: holdings ledger, performance history, summary.

pub mod analytics;
pub mod history;
pub mod holdings;
pub mod summary;

pub use analytics::*;
pub use history::*;
pub use holdings::*;
pub use summary::*;
