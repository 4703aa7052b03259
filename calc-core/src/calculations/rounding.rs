//! Rounding mode comparison.
//!
//! Six rounding modes over decimal values at a chosen number of places. The
//! interesting divergences: standard half-up takes 2.5 to 3 while banker's
//! rounding takes it to 2 (and 3.5 to 4), and floor differs from truncation
//! for negative values.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimal places beyond this are rejected as input error.
const MAX_PLACES: u32 = 12;

/// Errors for rounding operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundingError {
    /// Requested precision is beyond the supported range.
    #[error("decimal places must be at most {MAX_PLACES}, got {0}")]
    TooManyPlaces(u32),
}

/// Supported rounding modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Midpoints round away from zero.
    HalfUp,
    /// Midpoints round toward zero.
    HalfDown,
    /// Midpoints round to the nearest even digit (banker's rounding).
    HalfEven,
    /// Always toward positive infinity.
    Ceiling,
    /// Always toward negative infinity.
    Floor,
    /// Always toward zero.
    Truncate,
}

impl RoundingMode {
    pub const ALL: [RoundingMode; 6] = [
        Self::HalfUp,
        Self::HalfDown,
        Self::HalfEven,
        Self::Ceiling,
        Self::Floor,
        Self::Truncate,
    ];

    fn strategy(&self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfDown => RoundingStrategy::MidpointTowardZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
            Self::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Self::Floor => RoundingStrategy::ToNegativeInfinity,
            Self::Truncate => RoundingStrategy::ToZero,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HalfUp => "half-up",
            Self::HalfDown => "half-down",
            Self::HalfEven => "half-even",
            Self::Ceiling => "ceiling",
            Self::Floor => "floor",
            Self::Truncate => "truncate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "half-up" => Some(Self::HalfUp),
            "half-down" => Some(Self::HalfDown),
            "half-even" => Some(Self::HalfEven),
            "ceiling" => Some(Self::Ceiling),
            "floor" => Some(Self::Floor),
            "truncate" => Some(Self::Truncate),
            _ => None,
        }
    }
}

/// A value rounded under every mode at once, for side-by-side display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingComparison {
    pub value: Decimal,
    pub places: u32,
    pub half_up: Decimal,
    pub half_down: Decimal,
    pub half_even: Decimal,
    pub ceiling: Decimal,
    pub floor: Decimal,
    pub truncate: Decimal,
}

/// Rounds `value` to `places` decimal places under `mode`.
///
/// # Errors
///
/// Returns [`RoundingError::TooManyPlaces`] beyond the supported precision.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::rounding::{RoundingMode, round_with};
///
/// assert_eq!(round_with(dec!(2.5), 0, RoundingMode::HalfUp).unwrap(), dec!(3));
/// assert_eq!(round_with(dec!(2.5), 0, RoundingMode::HalfEven).unwrap(), dec!(2));
/// ```
pub fn round_with(
    value: Decimal,
    places: u32,
    mode: RoundingMode,
) -> Result<Decimal, RoundingError> {
    if places > MAX_PLACES {
        return Err(RoundingError::TooManyPlaces(places));
    }
    Ok(value.round_dp_with_strategy(places, mode.strategy()))
}

impl RoundingComparison {
    /// Rounds `value` under every mode.
    ///
    /// # Errors
    ///
    /// Returns [`RoundingError::TooManyPlaces`] beyond the supported
    /// precision.
    pub fn build(
        value: Decimal,
        places: u32,
    ) -> Result<Self, RoundingError> {
        Ok(Self {
            value,
            places,
            half_up: round_with(value, places, RoundingMode::HalfUp)?,
            half_down: round_with(value, places, RoundingMode::HalfDown)?,
            half_even: round_with(value, places, RoundingMode::HalfEven)?,
            ceiling: round_with(value, places, RoundingMode::Ceiling)?,
            floor: round_with(value, places, RoundingMode::Floor)?,
            truncate: round_with(value, places, RoundingMode::Truncate)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn round0(
        value: Decimal,
        mode: RoundingMode,
    ) -> Decimal {
        round_with(value, 0, mode).unwrap()
    }

    #[test]
    fn standard_round_of_two_point_five_is_three() {
        assert_eq!(round0(dec!(2.5), RoundingMode::HalfUp), dec!(3));
    }

    #[test]
    fn bankers_round_of_two_point_five_is_two() {
        assert_eq!(round0(dec!(2.5), RoundingMode::HalfEven), dec!(2));
    }

    #[test]
    fn bankers_round_of_three_point_five_is_four() {
        assert_eq!(round0(dec!(3.5), RoundingMode::HalfEven), dec!(4));
    }

    #[test]
    fn floor_and_truncate_diverge_for_negative_values() {
        assert_eq!(round0(dec!(-3.7), RoundingMode::Floor), dec!(-4));
        assert_eq!(round0(dec!(-3.7), RoundingMode::Truncate), dec!(-3));
    }

    #[test]
    fn floor_and_truncate_agree_for_positive_values() {
        assert_eq!(round0(dec!(3.7), RoundingMode::Floor), dec!(3));
        assert_eq!(round0(dec!(3.7), RoundingMode::Truncate), dec!(3));
    }

    #[test]
    fn half_down_takes_midpoint_toward_zero() {
        assert_eq!(round0(dec!(2.5), RoundingMode::HalfDown), dec!(2));
        assert_eq!(round0(dec!(-2.5), RoundingMode::HalfDown), dec!(-2));
    }

    #[test]
    fn ceiling_rounds_negative_toward_zero() {
        assert_eq!(round0(dec!(-3.7), RoundingMode::Ceiling), dec!(-3));
        assert_eq!(round0(dec!(3.2), RoundingMode::Ceiling), dec!(4));
    }

    #[test]
    fn places_are_respected() {
        assert_eq!(
            round_with(dec!(1.2345), 2, RoundingMode::HalfUp).unwrap(),
            dec!(1.23)
        );
        assert_eq!(
            round_with(dec!(1.235), 2, RoundingMode::HalfUp).unwrap(),
            dec!(1.24)
        );
    }

    #[test]
    fn too_many_places_is_rejected() {
        assert_eq!(
            round_with(dec!(1.5), 13, RoundingMode::HalfUp),
            Err(RoundingError::TooManyPlaces(13))
        );
    }

    #[test]
    fn comparison_collects_all_modes() {
        let comparison = RoundingComparison::build(dec!(2.5), 0).unwrap();

        assert_eq!(comparison.half_up, dec!(3));
        assert_eq!(comparison.half_even, dec!(2));
        assert_eq!(comparison.ceiling, dec!(3));
        assert_eq!(comparison.floor, dec!(2));
        assert_eq!(comparison.truncate, dec!(2));
    }
}
