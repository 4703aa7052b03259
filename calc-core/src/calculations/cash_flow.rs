//! Discounted cash flow metrics.
//!
//! Net present value discounts a yearly cash flow series at a given rate.
//! Internal rate of return finds the discount rate with zero NPV by
//! bisection over a fixed interval with a bounded iteration count; there is
//! no general closed form.
//!
//! Discounting runs in `f64` internally: the exponential terms overflow
//! fixed-point decimals at extreme rates, and the outputs here are a rate
//! and a rounded currency amount, not ledger entries. Results are rounded
//! back into [`Decimal`] at the API boundary.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{round_half_up, round_half_up_dp};

/// Bisection never runs longer than this.
const MAX_IRR_ITERATIONS: u32 = 128;

/// Errors for cash flow metrics.
#[derive(Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashFlowError {
    /// At least two cash flows are required.
    #[error("at least 2 cash flows are required, got {0}")]
    TooFewCashFlows(usize),

    /// Discount rates at or below −100% are undefined.
    #[error("discount rate must be above -100%, got {0}")]
    RateTooLow(Decimal),

    /// The series never changes sign, so no IRR exists.
    #[error("cash flows never change sign; no rate of return exists")]
    NoSignChange,

    /// The discounted total exceeded the representable currency range.
    #[error("discounted value is out of range at this rate")]
    ResultOutOfRange,
}

/// Net present value of `cash_flows` at `annual_rate_percent`, rounded to
/// cents.
///
/// Entry 0 occurs today and is undiscounted; entry t is divided by
/// `(1 + r)^t`.
///
/// # Errors
///
/// Returns [`CashFlowError`] for a series shorter than 2, a rate at or
/// below −100%, or a discounted total too large to represent.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::cash_flow::npv;
///
/// let flows = vec![dec!(-1000), dec!(500), dec!(500), dec!(500)];
///
/// assert_eq!(npv(dec!(10), &flows).unwrap(), dec!(243.43));
/// ```
pub fn npv(
    annual_rate_percent: Decimal,
    cash_flows: &[Decimal],
) -> Result<Decimal, CashFlowError> {
    if cash_flows.len() < 2 {
        return Err(CashFlowError::TooFewCashFlows(cash_flows.len()));
    }
    let rate = annual_rate_percent / Decimal::ONE_HUNDRED;
    if rate <= Decimal::NEGATIVE_ONE {
        return Err(CashFlowError::RateTooLow(annual_rate_percent));
    }

    let total = npv_at(rate.to_f64().unwrap_or(0.0), cash_flows);
    Decimal::try_from(total)
        .map(round_half_up)
        .map_err(|_| CashFlowError::ResultOutOfRange)
}

fn npv_at(
    rate: f64,
    cash_flows: &[Decimal],
) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, flow)| flow.to_f64().unwrap_or(0.0) / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Internal rate of return as an annual percentage, to four decimal places.
///
/// Bisects NPV over rates in [−99.99%, 1000%]. The series must contain at
/// least one sign change for a root to exist in that interval.
///
/// # Errors
///
/// Returns [`CashFlowError`] for a series shorter than 2 or one without a
/// root in the search interval.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::cash_flow::irr;
///
/// let flows = vec![dec!(-1000), dec!(600), dec!(600)];
/// let rate = irr(&flows).unwrap();
///
/// assert!((rate - dec!(13.0662)).abs() < dec!(0.001));
/// ```
pub fn irr(cash_flows: &[Decimal]) -> Result<Decimal, CashFlowError> {
    if cash_flows.len() < 2 {
        return Err(CashFlowError::TooFewCashFlows(cash_flows.len()));
    }
    let has_positive = cash_flows.iter().any(|f| *f > Decimal::ZERO);
    let has_negative = cash_flows.iter().any(|f| *f < Decimal::ZERO);
    if !has_positive || !has_negative {
        return Err(CashFlowError::NoSignChange);
    }

    let mut low = -0.9999_f64;
    let mut high = 10.0_f64;
    let f_low = npv_at(low, cash_flows);
    let f_high = npv_at(high, cash_flows);
    if (f_low > 0.0) == (f_high > 0.0) {
        return Err(CashFlowError::NoSignChange);
    }

    for _ in 0..MAX_IRR_ITERATIONS {
        let mid = (low + high) / 2.0;
        let f_mid = npv_at(mid, cash_flows);
        if f_mid.abs() < 1e-7 {
            low = mid;
            high = mid;
            break;
        }
        if (f_mid > 0.0) == (f_low > 0.0) {
            low = mid;
        } else {
            high = mid;
        }
    }

    let rate = (low + high) / 2.0;
    Decimal::try_from(rate * 100.0)
        .map(|r| round_half_up_dp(r, 4))
        .map_err(|_| CashFlowError::ResultOutOfRange)
}
