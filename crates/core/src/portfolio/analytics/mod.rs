//! Post-aggregation analytics over the summary's outputs.

mod analytics_model;
mod analytics_service;

pub use analytics_model::{
    ConcentrationLevel, ConcentrationRisk, MonthlyMetric, TickerFrequency,
};
pub use analytics_service::{concentration_risk, monthly_metrics, ticker_frequency};
