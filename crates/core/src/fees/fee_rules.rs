//! Pure fee/tax rule functions over the standard tariff.

use rust_decimal::Decimal;

use crate::fees::fees_constants::{
    BROKERAGE_MIN_HT, BROKERAGE_RATE_HT, ESTIMATED_TOTAL_FEE_RATE, SBVC_RATE_HT,
    SETTLEMENT_MIN_HT, SETTLEMENT_RATE_HT, TPCVM_RATE, VAT_RATE,
};

/// Standard transaction fees for an order of the given gross amount.
/// Brokerage and settlement apply their per-order minimums; the SBVC
/// commission is purely proportional. The result is VAT-inclusive.
pub fn standard_fees(gross_amount: Decimal) -> Decimal {
    let brokerage = (gross_amount * BROKERAGE_RATE_HT).max(BROKERAGE_MIN_HT);
    let settlement = (gross_amount * SETTLEMENT_RATE_HT).max(SETTLEMENT_MIN_HT);
    let sbvc = gross_amount * SBVC_RATE_HT;

    let total_ht = brokerage + settlement + sbvc;
    total_ht * (Decimal::ONE + VAT_RATE)
}

/// TPCVM due on a realized gain. Losses owe nothing.
pub fn tax_on_gain(gain: Decimal) -> Decimal {
    if gain <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    gain * TPCVM_RATE
}

/// Price at which a sale nets zero P&L after estimated exit fees:
/// the price where `price x (1 - blended_rate) = cost_basis`.
/// A blended rate at or above 100% would make the formula meaningless;
/// the cost basis is returned unchanged in that case.
pub fn break_even_price(cost_basis: Decimal) -> Decimal {
    let denominator = Decimal::ONE - ESTIMATED_TOTAL_FEE_RATE;
    if denominator <= Decimal::ZERO {
        return cost_basis;
    }
    cost_basis / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn standard_fees_on_round_lot() {
        // 1000 gross: brokerage min 7.50, settlement min 2.50, SBVC 1.00
        // => 11.00 HT => 12.10 TTC
        assert_eq!(standard_fees(dec!(1000)), dec!(12.100));
    }

    #[test]
    fn standard_fees_above_minimums() {
        // 100000 gross: 600 + 200 + 100 = 900 HT => 990 TTC (0.99%)
        assert_eq!(standard_fees(dec!(100000)), dec!(990.000));
    }

    #[test]
    fn standard_fees_minimums_apply_on_tiny_orders() {
        // Near-zero gross still owes the per-order minimums
        assert_eq!(standard_fees(Decimal::ZERO), dec!(11.000));
    }

    #[test]
    fn tax_only_on_positive_gains() {
        assert_eq!(tax_on_gain(dec!(100)), dec!(15.00));
        assert_eq!(tax_on_gain(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(tax_on_gain(dec!(-50)), Decimal::ZERO);
    }

    #[test]
    fn break_even_exceeds_cost_basis() {
        let cost = dec!(101.00);
        let be = break_even_price(cost);
        assert!(be > cost);
        // selling at break-even and paying the blended rate nets the cost back
        let netted = be * (Decimal::ONE - ESTIMATED_TOTAL_FEE_RATE);
        assert!((netted - cost).abs() < dec!(0.0001));
    }
}
