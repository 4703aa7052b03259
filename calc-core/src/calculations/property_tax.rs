//! Property tax estimation.
//!
//! Assessed value is market value scaled by the assessment ratio, minus any
//! homestead-style exemption (floored at zero). The annual rate is either
//! supplied directly or looked up from the state effective-rate table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;
use crate::models::{RateTables, RateTablesError};

/// Errors for property tax estimates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyTaxError {
    /// The market value must be positive.
    #[error("market value must be positive, got {0}")]
    NonPositiveValue(Decimal),

    /// The annual rate cannot be negative.
    #[error("annual rate cannot be negative, got {0}")]
    NegativeRate(Decimal),

    /// The assessment ratio must be within (0, 100].
    #[error("assessment ratio must be in (0, 100], got {0}")]
    RatioOutOfRange(Decimal),

    /// The exemption cannot be negative.
    #[error("exemption cannot be negative, got {0}")]
    NegativeExemption(Decimal),

    /// The state code was not found in the rate tables.
    #[error(transparent)]
    Tables(#[from] RateTablesError),
}

/// Where the annual rate comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyTaxRate {
    /// Annual rate as a percentage of assessed value, e.g. 1.1 for 1.1%.
    AnnualPercent(Decimal),
    /// Use the average effective rate for a state.
    StateAverage(String),
}

/// Input values for a property tax estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTaxInput {
    pub market_value: Decimal,
    pub rate: PropertyTaxRate,
    /// Portion of market value subject to tax, as a percentage. 100 taxes
    /// the full market value.
    pub assessment_ratio_percent: Decimal,
    /// Flat amount subtracted from the assessed value.
    pub exemption: Decimal,
}

/// Result of a property tax estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTaxResult {
    pub assessed_value: Decimal,
    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,
    /// Annual tax as a percentage of market value.
    pub effective_rate_percent: Decimal,
}

/// Property tax estimator over an injected table set.
#[derive(Debug, Clone)]
pub struct PropertyTaxCalculator<'a> {
    tables: &'a RateTables,
}

impl<'a> PropertyTaxCalculator<'a> {
    pub fn new(tables: &'a RateTables) -> Self {
        Self { tables }
    }

    /// # Errors
    ///
    /// Returns [`PropertyTaxError`] for out-of-range inputs or an unknown
    /// state code.
    pub fn calculate(
        &self,
        input: &PropertyTaxInput,
    ) -> Result<PropertyTaxResult, PropertyTaxError> {
        if input.market_value <= Decimal::ZERO {
            return Err(PropertyTaxError::NonPositiveValue(input.market_value));
        }
        if input.assessment_ratio_percent <= Decimal::ZERO
            || input.assessment_ratio_percent > Decimal::ONE_HUNDRED
        {
            return Err(PropertyTaxError::RatioOutOfRange(
                input.assessment_ratio_percent,
            ));
        }
        if input.exemption < Decimal::ZERO {
            return Err(PropertyTaxError::NegativeExemption(input.exemption));
        }

        let annual_rate = match &input.rate {
            PropertyTaxRate::AnnualPercent(percent) => {
                if *percent < Decimal::ZERO {
                    return Err(PropertyTaxError::NegativeRate(*percent));
                }
                *percent / Decimal::ONE_HUNDRED
            }
            PropertyTaxRate::StateAverage(code) => {
                self.tables.state_rates(code)?.property_tax_rate
            }
        };

        let assessed = (round_half_up(
            input.market_value * input.assessment_ratio_percent / Decimal::ONE_HUNDRED,
        ) - input.exemption)
            .max(Decimal::ZERO);
        let annual_tax = round_half_up(assessed * annual_rate);
        let monthly_tax = round_half_up(annual_tax / Decimal::from(12));
        let effective_rate_percent =
            round_half_up(annual_tax / input.market_value * Decimal::ONE_HUNDRED);

        Ok(PropertyTaxResult {
            assessed_value: assessed,
            annual_tax,
            monthly_tax,
            effective_rate_percent,
        })
    }
}
