use rust_decimal::Decimal;

use crate::constants::EURO_PRECISION;

/// Rounds a monetary amount to whole euros (half to even).
///
/// Appraisal figures are stated in full euros; all result fields and cost
/// line items pass through here exactly once.
pub fn round_euro(value: Decimal) -> Decimal {
    value.round_dp(EURO_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_euro_half_to_even() {
        assert_eq!(round_euro(dec!(174470.9448)), dec!(174471));
        assert_eq!(round_euro(dec!(12.5)), dec!(12));
        assert_eq!(round_euro(dec!(13.5)), dec!(14));
        assert_eq!(round_euro(dec!(-0.5)), dec!(0));
    }
}
