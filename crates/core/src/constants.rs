use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Reporting currency for all monetary values.
pub const PORTFOLIO_CURRENCY: &str = "MAD";

/// Decimal precision for running holding state (cost basis, VWAP accumulators).
pub const STATE_DECIMAL_PRECISION: u32 = 4;

/// Decimal precision for monetary aggregates in the summary.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Positions with a quantity at or below this threshold are treated as closed.
/// Absorbs float drift left behind by fractional round-trips.
pub const QUANTITY_THRESHOLD: Decimal = dec!(0.001);

/// Residual quantity below which the history replay values a ticker at zero.
pub const HISTORY_QUANTITY_EPSILON: Decimal = dec!(0.0001);
