//! Chronological performance-history reconstruction.

mod history_builder;
mod history_model;

pub use history_builder::build_performance_history;
pub use history_model::PerformancePoint;
