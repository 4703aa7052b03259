//! Shared helpers for calculation modules.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Standard financial rounding: values at exactly 0.005 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    round_half_up_dp(value, 2)
}

/// Rounds a decimal value to `dp` decimal places using half-up rounding.
pub fn round_half_up_dp(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Raises a decimal base to a non-negative integer power by binary
/// exponentiation. Intermediate products stay within `Decimal`'s 28-digit
/// precision for the loan-sized magnitudes used here.
pub fn decimal_powu(
    base: Decimal,
    mut exp: u32,
) -> Decimal {
    let mut result = Decimal::ONE;
    let mut base = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result *= base;
        }
        exp >>= 1;
        if exp > 0 {
            base *= base;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn round_half_up_dp_respects_places() {
        assert_eq!(round_half_up_dp(dec!(12.345), 1), dec!(12.3));
        assert_eq!(round_half_up_dp(dec!(12.35), 1), dec!(12.4));
        assert_eq!(round_half_up_dp(dec!(12.5), 0), dec!(13));
    }

    #[test]
    fn decimal_powu_zero_exponent_is_one() {
        assert_eq!(decimal_powu(dec!(1.005), 0), Decimal::ONE);
    }

    #[test]
    fn decimal_powu_small_powers() {
        assert_eq!(decimal_powu(dec!(2), 10), dec!(1024));
        assert_eq!(decimal_powu(dec!(1.1), 2), dec!(1.21));
    }

    #[test]
    fn decimal_powu_matches_repeated_multiplication() {
        let base = dec!(1.00541666666666666666666667);
        let mut expected = Decimal::ONE;
        for _ in 0..24 {
            expected *= base;
        }

        let result = decimal_powu(base, 24);

        let error = (result - expected).abs();
        assert!(error < dec!(0.0000000000000001), "error {error}");
    }
}
