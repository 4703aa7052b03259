//! Ideal body weight estimates.
//!
//! Four published regression formulas, each a base weight at 5 feet plus a
//! per-inch increment above that:
//!
//! | Formula | Male | Female |
//! |----------|---------------------|---------------------|
//! | Robinson | 52 kg + 1.9 kg/in | 49 kg + 1.7 kg/in |
//! | Miller | 56.2 kg + 1.41 kg/in | 53.1 kg + 1.36 kg/in |
//! | Devine | 50 kg + 2.3 kg/in | 45.5 kg + 2.3 kg/in |
//! | Hamwi | 48 kg + 2.7 kg/in | 45.5 kg + 2.2 kg/in |
//!
//! Heights at or below 5 feet use the base weight alone; the regressions
//! were not fitted below that point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up_dp;
use crate::models::{Length, LengthUnit, Sex, Weight, WeightUnit};

/// Errors for ideal weight estimates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdealWeightError {
    /// Height must be positive.
    #[error("height must be positive, got {0} cm")]
    NonPositiveHeight(Decimal),
}

/// Per-formula estimates plus their mean, all in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealWeightResult {
    pub robinson: Weight,
    pub miller: Weight,
    pub devine: Weight,
    pub hamwi: Weight,
    pub average: Weight,
}

/// `(base kg, kg per inch over 5 ft)` for each formula and sex.
fn coefficients(sex: Sex) -> [(Decimal, Decimal); 4] {
    match sex {
        Sex::Male => [
            (Decimal::from(52), Decimal::new(19, 1)),
            (Decimal::new(562, 1), Decimal::new(141, 2)),
            (Decimal::from(50), Decimal::new(23, 1)),
            (Decimal::from(48), Decimal::new(27, 1)),
        ],
        Sex::Female => [
            (Decimal::from(49), Decimal::new(17, 1)),
            (Decimal::new(531, 1), Decimal::new(136, 2)),
            (Decimal::new(455, 1), Decimal::new(23, 1)),
            (Decimal::new(455, 1), Decimal::new(22, 1)),
        ],
    }
}

/// Evaluates all four formulas for a height.
///
/// # Errors
///
/// Returns [`IdealWeightError`] when the height is non-positive.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::ideal_weight::ideal_weight;
/// use calc_core::models::{Length, LengthUnit, Sex};
///
/// let result = ideal_weight(Sex::Male, Length::new(dec!(70), LengthUnit::Inches)).unwrap();
///
/// assert_eq!(result.robinson.value, dec!(71.0));
/// assert_eq!(result.devine.value, dec!(73.0));
/// ```
pub fn ideal_weight(
    sex: Sex,
    height: Length,
) -> Result<IdealWeightResult, IdealWeightError> {
    let height_cm = height.in_centimeters();
    if height_cm <= Decimal::ZERO {
        return Err(IdealWeightError::NonPositiveHeight(height_cm));
    }

    let inches_over = (height.to(LengthUnit::Inches).value - Decimal::from(60)).max(Decimal::ZERO);
    let [robinson, miller, devine, hamwi] =
        coefficients(sex).map(|(base, per_inch)| round_half_up_dp(base + per_inch * inches_over, 1));
    let average = round_half_up_dp(
        (robinson + miller + devine + hamwi) / Decimal::from(4),
        1,
    );

    let kg = |value| Weight::new(value, WeightUnit::Kilograms);
    Ok(IdealWeightResult {
        robinson: kg(robinson),
        miller: kg(miller),
        devine: kg(devine),
        hamwi: kg(hamwi),
        average: kg(average),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn male_five_foot_ten_reference_values() {
        let result =
            ideal_weight(Sex::Male, Length::new(dec!(70), LengthUnit::Inches)).unwrap();

        assert_eq!(result.robinson.value, dec!(71.0));
        assert_eq!(result.miller.value, dec!(70.3));
        assert_eq!(result.devine.value, dec!(73.0));
        assert_eq!(result.hamwi.value, dec!(75.0));
        assert_eq!(result.average.value, dec!(72.3));
    }

    #[test]
    fn female_five_foot_four_reference_values() {
        let result =
            ideal_weight(Sex::Female, Length::new(dec!(64), LengthUnit::Inches)).unwrap();

        // 4 inches over 5 ft.
        assert_eq!(result.robinson.value, dec!(55.8));
        assert_eq!(result.miller.value, dec!(58.5));
        assert_eq!(result.devine.value, dec!(54.7));
        assert_eq!(result.hamwi.value, dec!(54.3));
    }

    #[test]
    fn height_below_five_feet_uses_base_weight() {
        let result =
            ideal_weight(Sex::Male, Length::new(dec!(58), LengthUnit::Inches)).unwrap();

        assert_eq!(result.robinson.value, dec!(52.0));
        assert_eq!(result.devine.value, dec!(50.0));
    }

    #[test]
    fn metric_height_is_converted() {
        // 177.8 cm is exactly 70 inches.
        let metric =
            ideal_weight(Sex::Male, Length::new(dec!(177.8), LengthUnit::Centimeters)).unwrap();
        let imperial =
            ideal_weight(Sex::Male, Length::new(dec!(70), LengthUnit::Inches)).unwrap();

        assert_eq!(metric, imperial);
    }

    #[test]
    fn non_positive_height_is_rejected() {
        let result = ideal_weight(Sex::Male, Length::new(dec!(0), LengthUnit::Inches));

        assert_eq!(result, Err(IdealWeightError::NonPositiveHeight(dec!(0))));
    }
}
