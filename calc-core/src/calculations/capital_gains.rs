//! Capital gains tax estimation.
//!
//! The holding period picks the bracket table: more than 365 days between
//! purchase and sale uses the preferential long-term schedule, anything else
//! the short-term ordinary-income schedule. The marginal rate is selected
//! from the filing-status schedule by annual income (boundary-inclusive), a
//! flat state rate comes from the state table, and the net investment income
//! surcharge applies to the portion of the gain above the per-status MAGI
//! threshold. All tables come from an injected [`RateTables`]; the evaluator
//! holds no rate constants of its own.
//!
//! # Example
//!
//! ```
//! # use std::collections::HashMap;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use calc_core::calculations::{CapitalGainsCalculator, CapitalGainsInput};
//! use calc_core::models::{
//!     FilingStatus, HoldingTerm, NiitConfig, RateBracket, RateSchedule, RateTables, StateRates,
//! };
//!
//! # fn schedule(rate: rust_decimal::Decimal) -> RateSchedule {
//! #     RateSchedule::new(vec![RateBracket { upper: None, rate }]).unwrap()
//! # }
//! # fn per_status(rate: rust_decimal::Decimal) -> HashMap<FilingStatus, RateSchedule> {
//! #     FilingStatus::ALL.into_iter().map(|s| (s, schedule(rate))).collect()
//! # }
//! # let niit = NiitConfig::new(
//! #     dec!(0.038),
//! #     FilingStatus::ALL.into_iter().map(|s| (s, dec!(200000))).collect(),
//! # ).unwrap();
//! # let mut states = HashMap::new();
//! # states.insert("TX".to_string(), StateRates {
//! #     capital_gains_rate: dec!(0),
//! #     property_tax_rate: dec!(0.0168),
//! # });
//! let tables = RateTables::new(per_status(dec!(0.22)), per_status(dec!(0.15)), states, niit)
//!     .unwrap();
//!
//! let input = CapitalGainsInput {
//!     purchase_price: dec!(10000.00),
//!     sale_price: dec!(25000.00),
//!     annual_income: dec!(85000.00),
//!     filing_status: FilingStatus::Single,
//!     state: "TX".to_string(),
//!     purchase_date: NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
//!     sale_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
//! };
//!
//! let result = CapitalGainsCalculator::new(&tables).calculate(&input).unwrap();
//!
//! assert_eq!(result.term, HoldingTerm::LongTerm);
//! assert_eq!(result.federal_tax, dec!(2250.00));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;
use crate::models::{FilingStatus, HoldingTerm, RateTables, RateTablesError};

/// Days of holding beyond which the long-term schedule applies.
const LONG_TERM_HOLDING_DAYS: i64 = 365;

/// Errors for capital gains calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapitalGainsError {
    /// A price was negative.
    #[error("price cannot be negative, got {0}")]
    NegativePrice(Decimal),

    /// Annual income was negative.
    #[error("annual income cannot be negative, got {0}")]
    NegativeIncome(Decimal),

    /// The sale date preceded the purchase date.
    #[error("sale date {sale} is before purchase date {purchase}")]
    SaleBeforePurchase { purchase: NaiveDate, sale: NaiveDate },

    /// The state code was not found in the rate tables.
    #[error(transparent)]
    Tables(#[from] RateTablesError),
}

/// Input values for a capital gains estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsInput {
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    /// Taxable income excluding this gain; selects the federal bracket.
    pub annual_income: Decimal,
    pub filing_status: FilingStatus,
    /// Two-letter state code for the flat state rate.
    pub state: String,
    pub purchase_date: NaiveDate,
    pub sale_date: NaiveDate,
}

/// Result of a capital gains estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsResult {
    /// Sale price minus purchase price; negative for a loss.
    pub gain: Decimal,
    pub holding_days: i64,
    pub term: HoldingTerm,
    pub federal_rate: Decimal,
    pub federal_tax: Decimal,
    pub state_rate: Decimal,
    pub state_tax: Decimal,
    /// Net investment income surcharge, zero below the MAGI threshold.
    pub niit: Decimal,
    pub total_tax: Decimal,
    /// Gain remaining after all taxes.
    pub net_gain: Decimal,
}

/// Capital gains evaluator over an injected table set.
#[derive(Debug, Clone)]
pub struct CapitalGainsCalculator<'a> {
    tables: &'a RateTables,
}

impl<'a> CapitalGainsCalculator<'a> {
    pub fn new(tables: &'a RateTables) -> Self {
        Self { tables }
    }

    /// Runs the full estimate.
    ///
    /// A non-positive gain produces a zero-tax result; losses are reported
    /// as-is with no offset modeling.
    ///
    /// # Errors
    ///
    /// Returns [`CapitalGainsError`] for negative prices or income, reversed
    /// dates, or an unknown state code.
    pub fn calculate(
        &self,
        input: &CapitalGainsInput,
    ) -> Result<CapitalGainsResult, CapitalGainsError> {
        if input.purchase_price < Decimal::ZERO {
            return Err(CapitalGainsError::NegativePrice(input.purchase_price));
        }
        if input.sale_price < Decimal::ZERO {
            return Err(CapitalGainsError::NegativePrice(input.sale_price));
        }
        if input.annual_income < Decimal::ZERO {
            return Err(CapitalGainsError::NegativeIncome(input.annual_income));
        }
        if input.sale_date < input.purchase_date {
            return Err(CapitalGainsError::SaleBeforePurchase {
                purchase: input.purchase_date,
                sale: input.sale_date,
            });
        }

        let holding_days = (input.sale_date - input.purchase_date).num_days();
        let term = if holding_days > LONG_TERM_HOLDING_DAYS {
            HoldingTerm::LongTerm
        } else {
            HoldingTerm::ShortTerm
        };

        let gain = input.sale_price - input.purchase_price;
        if gain <= Decimal::ZERO {
            return Ok(CapitalGainsResult {
                gain,
                holding_days,
                term,
                federal_rate: Decimal::ZERO,
                federal_tax: Decimal::ZERO,
                state_rate: Decimal::ZERO,
                state_tax: Decimal::ZERO,
                niit: Decimal::ZERO,
                total_tax: Decimal::ZERO,
                net_gain: gain,
            });
        }

        let federal_rate = self
            .tables
            .schedule(term, input.filing_status)
            .rate_for(input.annual_income);
        let federal_tax = round_half_up(gain * federal_rate);

        let state_rate = self.tables.state_rates(&input.state)?.capital_gains_rate;
        let state_tax = round_half_up(gain * state_rate);

        let niit = self.niit_surcharge(gain, input.annual_income, input.filing_status);

        let total_tax = federal_tax + state_tax + niit;
        Ok(CapitalGainsResult {
            gain,
            holding_days,
            term,
            federal_rate,
            federal_tax,
            state_rate,
            state_tax,
            niit,
            total_tax,
            net_gain: gain - total_tax,
        })
    }

    /// 3.8% of the smaller of the gain or the MAGI excess over the threshold.
    fn niit_surcharge(
        &self,
        gain: Decimal,
        annual_income: Decimal,
        status: FilingStatus,
    ) -> Decimal {
        let niit = self.tables.niit();
        let magi = annual_income + gain;
        let threshold = niit.threshold_for(status);
        if magi <= threshold {
            return Decimal::ZERO;
        }
        let subject = gain.min(magi - threshold);
        round_half_up(subject * niit.rate())
    }
}
