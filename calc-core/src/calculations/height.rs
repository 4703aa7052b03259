//! Adult height prediction from parental heights.
//!
//! Implements the Tanner mid-parental target: the mean of the parents'
//! heights plus 6.5 cm for boys or minus 6.5 cm for girls, with an expected
//! range of ±8.5 cm around the target.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up_dp;
use crate::models::{Length, LengthUnit, Sex};

/// Errors for height prediction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeightPredictionError {
    /// A parent's height must be positive.
    #[error("parent height must be positive, got {0} cm")]
    NonPositiveHeight(Decimal),
}

/// Predicted adult height, all values in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightPrediction {
    pub target: Length,
    pub lower: Length,
    pub upper: Length,
}

/// Sex adjustment applied to the mid-parental mean, in centimeters.
fn sex_adjustment_cm(sex: Sex) -> Decimal {
    let half_gap = Decimal::new(65, 1);
    match sex {
        Sex::Male => half_gap,
        Sex::Female => -half_gap,
    }
}

/// Tanner mid-parental height prediction.
///
/// # Errors
///
/// Returns [`HeightPredictionError`] when a parent height is non-positive.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::height::predict_adult_height;
/// use calc_core::models::{Length, LengthUnit, Sex};
///
/// let prediction = predict_adult_height(
///     Sex::Male,
///     Length::new(dec!(165), LengthUnit::Centimeters),
///     Length::new(dec!(180), LengthUnit::Centimeters),
/// )
/// .unwrap();
///
/// assert_eq!(prediction.target.value, dec!(179.0));
/// ```
pub fn predict_adult_height(
    sex: Sex,
    mother: Length,
    father: Length,
) -> Result<HeightPrediction, HeightPredictionError> {
    let mother_cm = mother.in_centimeters();
    let father_cm = father.in_centimeters();
    if mother_cm <= Decimal::ZERO {
        return Err(HeightPredictionError::NonPositiveHeight(mother_cm));
    }
    if father_cm <= Decimal::ZERO {
        return Err(HeightPredictionError::NonPositiveHeight(father_cm));
    }

    let mid_parental = (mother_cm + father_cm) / Decimal::TWO;
    let target = round_half_up_dp(mid_parental + sex_adjustment_cm(sex), 1);
    let range = Decimal::new(85, 1);

    let cm = |value| Length::new(value, LengthUnit::Centimeters);
    Ok(HeightPrediction {
        target: cm(target),
        lower: cm(target - range),
        upper: cm(target + range),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn cm(value: Decimal) -> Length {
        Length::new(value, LengthUnit::Centimeters)
    }

    #[test]
    fn boy_target_adds_half_the_sex_gap() {
        let prediction =
            predict_adult_height(Sex::Male, cm(dec!(165)), cm(dec!(180))).unwrap();

        // (165 + 180) / 2 + 6.5
        assert_eq!(prediction.target.value, dec!(179.0));
        assert_eq!(prediction.lower.value, dec!(170.5));
        assert_eq!(prediction.upper.value, dec!(187.5));
    }

    #[test]
    fn girl_target_subtracts_half_the_sex_gap() {
        let prediction =
            predict_adult_height(Sex::Female, cm(dec!(165)), cm(dec!(180))).unwrap();

        assert_eq!(prediction.target.value, dec!(166.0));
    }

    #[test]
    fn imperial_inputs_are_converted() {
        let prediction = predict_adult_height(
            Sex::Male,
            Length::new(dec!(65), LengthUnit::Inches),
            Length::new(dec!(71), LengthUnit::Inches),
        )
        .unwrap();

        // Mid-parental 68 in = 172.72 cm, + 6.5.
        assert_eq!(prediction.target.value, dec!(179.2));
    }

    #[test]
    fn non_positive_parent_height_is_rejected() {
        let result = predict_adult_height(Sex::Male, cm(dec!(0)), cm(dec!(180)));

        assert_eq!(
            result,
            Err(HeightPredictionError::NonPositiveHeight(dec!(0)))
        );
    }
}
