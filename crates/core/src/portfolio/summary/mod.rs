//! Portfolio aggregation: the summary read model and its calculator.

mod summary_calculator;
mod summary_model;


pub use summary_calculator::{calculate_portfolio, calculate_portfolio_as_of};
pub use summary_model::PortfolioSummary;
