//! Standard brokerage tariff for Casablanca Stock Exchange equity orders.
//!
//! Rates follow the usual retail "grille tarifaire":
//! brokerage 0.60% HT (min 7.50 MAD), settlement/custody flows 0.20% HT
//! (min 2.50 MAD), bourse (SBVC) commission 0.10% HT, 10% VAT on all
//! commissions, and 15% TPCVM on net capital gains.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Brokerage commission rate, before VAT.
pub const BROKERAGE_RATE_HT: Decimal = dec!(0.006);

/// Minimum brokerage commission per order, before VAT.
pub const BROKERAGE_MIN_HT: Decimal = dec!(7.50);

/// Settlement/delivery rate, before VAT.
pub const SETTLEMENT_RATE_HT: Decimal = dec!(0.002);

/// Minimum settlement fee per order, before VAT.
pub const SETTLEMENT_MIN_HT: Decimal = dec!(2.50);

/// Flat bourse (SBVC) commission rate, before VAT.
pub const SBVC_RATE_HT: Decimal = dec!(0.001);

/// VAT applied on all commissions.
pub const VAT_RATE: Decimal = dec!(0.10);

/// TPCVM, the capital-gains tax rate on Moroccan equities.
pub const TPCVM_RATE: Decimal = dec!(0.15);

/// Blended all-in fee rate, used only for break-even estimation:
/// (0.60% + 0.20% + 0.10%) x 1.10 VAT.
pub const ESTIMATED_TOTAL_FEE_RATE: Decimal = dec!(0.0099);

/// Tolerance (in MAD) when comparing an observed fee residual against the
/// standard formula. Absorbs rounding differences and minor broker
/// variations in historical exports.
pub const FEE_INFERENCE_TOLERANCE: Decimal = dec!(5);

/// Residuals below this are treated as zero during inference.
pub const FEE_RESIDUAL_EPSILON: Decimal = dec!(0.01);

/// Inferred fees above this share of the gross amount trigger a warning.
pub const HIGH_FEE_RATIO: Decimal = dec!(0.05);
