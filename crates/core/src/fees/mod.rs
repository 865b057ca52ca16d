//! Fee and tax rules for the Moroccan market.

mod fee_rules;
mod fees_constants;
mod fees_model;

pub use fee_rules::{break_even_price, standard_fees, tax_on_gain};
pub use fees_constants::*;
pub use fees_model::{FeeRecord, FeeType};
