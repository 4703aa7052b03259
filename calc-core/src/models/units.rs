//! Unit-tagged lengths and weights.
//!
//! Conversion goes through a base unit (centimeters, kilograms) using exact
//! decimal factors, so converting a value out and back differs from the
//! original only by the precision limit of [`Decimal`] division.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Centimeters,
    Meters,
    Inches,
    Feet,
}

impl LengthUnit {
    /// Exact centimeters per one of this unit.
    fn centimeters_per_unit(&self) -> Decimal {
        match self {
            Self::Centimeters => Decimal::ONE,
            Self::Meters => Decimal::ONE_HUNDRED,
            Self::Inches => Decimal::new(254, 2),
            Self::Feet => Decimal::new(3048, 2),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Centimeters => "cm",
            Self::Meters => "m",
            Self::Inches => "in",
            Self::Feet => "ft",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cm" => Some(Self::Centimeters),
            "m" => Some(Self::Meters),
            "in" => Some(Self::Inches),
            "ft" => Some(Self::Feet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightUnit {
    Kilograms,
    Pounds,
}

impl WeightUnit {
    /// Exact kilograms per one of this unit.
    fn kilograms_per_unit(&self) -> Decimal {
        match self {
            Self::Kilograms => Decimal::ONE,
            // International avoirdupois pound, exact by definition.
            Self::Pounds => Decimal::new(45_359_237, 8),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Pounds => "lb",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "kg" => Some(Self::Kilograms),
            "lb" | "lbs" => Some(Self::Pounds),
            _ => None,
        }
    }
}

/// A length tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Length {
    pub value: Decimal,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: Decimal, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn in_centimeters(&self) -> Decimal {
        self.value * self.unit.centimeters_per_unit()
    }

    pub fn to(&self, unit: LengthUnit) -> Length {
        Length {
            value: self.in_centimeters() / unit.centimeters_per_unit(),
            unit,
        }
    }
}

/// A weight tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weight {
    pub value: Decimal,
    pub unit: WeightUnit,
}

impl Weight {
    pub fn new(value: Decimal, unit: WeightUnit) -> Self {
        Self { value, unit }
    }

    pub fn in_kilograms(&self) -> Decimal {
        self.value * self.unit.kilograms_per_unit()
    }

    pub fn to(&self, unit: WeightUnit) -> Weight {
        Weight {
            value: self.in_kilograms() / unit.kilograms_per_unit(),
            unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn inches_to_centimeters_is_exact() {
        let length = Length::new(dec!(70), LengthUnit::Inches);

        assert_eq!(length.to(LengthUnit::Centimeters).value, dec!(177.80));
    }

    #[test]
    fn feet_to_inches() {
        let length = Length::new(dec!(6), LengthUnit::Feet);

        assert_eq!(length.to(LengthUnit::Inches).value, dec!(72));
    }

    #[test]
    fn meters_to_centimeters() {
        let length = Length::new(dec!(1.75), LengthUnit::Meters);

        assert_eq!(length.to(LengthUnit::Centimeters).value, dec!(175.00));
    }

    #[test]
    fn pounds_to_kilograms_is_exact() {
        let weight = Weight::new(dec!(150), WeightUnit::Pounds);

        assert_eq!(weight.to(WeightUnit::Kilograms).value, dec!(68.0388555));
    }

    #[test]
    fn length_round_trip_is_idempotent_within_tolerance() {
        let original = Length::new(dec!(177.8), LengthUnit::Centimeters);

        let round_trip = original.to(LengthUnit::Inches).to(LengthUnit::Centimeters);

        let error = (round_trip.value - original.value).abs();
        assert!(error < dec!(0.0000001), "round-trip error {error}");
    }

    #[test]
    fn weight_round_trip_is_idempotent_within_tolerance() {
        let original = Weight::new(dec!(82.5), WeightUnit::Kilograms);

        let round_trip = original.to(WeightUnit::Pounds).to(WeightUnit::Kilograms);

        let error = (round_trip.value - original.value).abs();
        assert!(error < dec!(0.0000001), "round-trip error {error}");
    }

    #[test]
    fn unit_parse_round_trips() {
        for unit in [
            LengthUnit::Centimeters,
            LengthUnit::Meters,
            LengthUnit::Inches,
            LengthUnit::Feet,
        ] {
            assert_eq!(LengthUnit::parse(unit.as_str()), Some(unit));
        }
        for unit in [WeightUnit::Kilograms, WeightUnit::Pounds] {
            assert_eq!(WeightUnit::parse(unit.as_str()), Some(unit));
        }
    }
}
