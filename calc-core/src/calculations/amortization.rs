//! Loan amortization schedule generation.
//!
//! Given a principal, annual rate, term, and payment frequency, this module
//! computes the fixed periodic payment via the standard annuity formula and
//! expands it into a period-by-period schedule. An optional extra payment is
//! applied to principal each period; a parallel baseline schedule (no extra
//! payments) is computed so the result can report interest and time saved.
//!
//! # Schedule rules
//!
//! | Step | Rule |
//! |------|------|
//! | Payment | `P·r·(1+r)^n / ((1+r)^n − 1)`, or `P/n` when r = 0 |
//! | Interest | balance × periodic rate, rounded to cents half-up |
//! | Principal | payment − interest, clamped to the remaining balance |
//! | Extra | clamped so the balance never goes negative |
//! | Termination | balance ≤ 0.01 or the nominal term is exhausted |
//!
//! The closing period absorbs any sub-cent residual, so the final balance is
//! exactly zero and principal portions sum to the original principal.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use calc_core::calculations::{LoanInputs, PaymentFrequency, amortization};
//!
//! let inputs = LoanInputs {
//!     principal: dec!(300000.00),
//!     annual_rate_percent: dec!(6.5),
//!     term_periods: 360,
//!     frequency: PaymentFrequency::Monthly,
//!     extra_payment: dec!(0.00),
//!     start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//! };
//!
//! let result = amortization::build_schedule(&inputs).unwrap();
//!
//! assert_eq!(result.payment, dec!(1896.20));
//! assert!(result.totals.total_interest > dec!(380000));
//! ```

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{decimal_powu, round_half_up};

/// Errors that can occur while building an amortization schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmortizationError {
    /// The loan principal must be positive.
    #[error("principal must be positive, got {0}")]
    NonPositivePrincipal(Decimal),

    /// The loan term must be at least one period.
    #[error("term must be at least one period")]
    NonPositiveTerm,

    /// The annual rate cannot be negative.
    #[error("annual rate cannot be negative, got {0}")]
    NegativeRate(Decimal),

    /// The extra payment cannot be negative.
    #[error("extra payment cannot be negative, got {0}")]
    NegativeExtraPayment(Decimal),

    /// A payment date fell outside the representable calendar range.
    #[error("payment date overflowed the calendar range")]
    DateOverflow,
}

/// How often payments are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Monthly,
    Biweekly,
    Weekly,
}

impl PaymentFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Biweekly => 26,
            Self::Weekly => 52,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Biweekly => "biweekly",
            Self::Weekly => "weekly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(Self::Monthly),
            "biweekly" => Some(Self::Biweekly),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }

    /// The date `periods` payment intervals after `start`.
    fn advance(
        &self,
        start: NaiveDate,
        periods: u32,
    ) -> Option<NaiveDate> {
        match self {
            Self::Monthly => start.checked_add_months(Months::new(periods)),
            Self::Biweekly => start.checked_add_days(Days::new(u64::from(periods) * 14)),
            Self::Weekly => start.checked_add_days(Days::new(u64::from(periods) * 7)),
        }
    }
}

/// Input values for an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInputs {
    /// Amount borrowed.
    pub principal: Decimal,

    /// Annual interest rate as a percentage, e.g. 6.5 for 6.5%.
    pub annual_rate_percent: Decimal,

    /// Number of scheduled payments over the life of the loan.
    pub term_periods: u32,

    /// Payment cadence; determines the periodic rate and payment dates.
    pub frequency: PaymentFrequency,

    /// Additional principal paid every period. Zero disables the baseline
    /// comparison.
    pub extra_payment: Decimal,

    /// Date of the first payment, one interval after loan origination.
    pub start_date: NaiveDate,
}

/// One row of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    /// 1-based period index.
    pub index: u32,
    pub date: NaiveDate,
    /// Total paid this period (interest + principal + extra).
    pub payment: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    pub extra: Decimal,
    /// Balance remaining after this payment.
    pub balance: Decimal,
}

/// Aggregate figures for a completed schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub total_paid: Decimal,
    pub total_interest: Decimal,
    pub periods: u32,
    pub payoff_date: NaiveDate,
}

/// Savings from extra payments versus the baseline schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub interest_saved: Decimal,
    pub periods_saved: u32,
}

/// A fully expanded amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// The fixed periodic payment from the annuity formula.
    pub payment: Decimal,
    pub periods: Vec<PaymentPeriod>,
    pub totals: ScheduleTotals,
    /// Present when the inputs carried an extra payment.
    pub comparison: Option<ComparisonSummary>,
}

/// Balances at or below this are treated as paid off.
fn balance_epsilon() -> Decimal {
    Decimal::new(1, 2)
}

/// The fixed payment for a loan via the standard annuity formula.
///
/// Degenerates to `principal / term` when the rate is zero.
pub fn periodic_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_periods: u32,
    periods_per_year: u32,
) -> Decimal {
    if annual_rate_percent.is_zero() {
        return round_half_up(principal / Decimal::from(term_periods));
    }

    let r = periodic_rate(annual_rate_percent, periods_per_year);
    let growth = decimal_powu(Decimal::ONE + r, term_periods);
    round_half_up(principal * r * growth / (growth - Decimal::ONE))
}

fn periodic_rate(
    annual_rate_percent: Decimal,
    periods_per_year: u32,
) -> Decimal {
    annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(periods_per_year)
}

/// Builds the full schedule, plus a baseline comparison when an extra
/// payment is present.
///
/// # Errors
///
/// Returns [`AmortizationError`] when an input is out of range or a payment
/// date cannot be represented.
pub fn build_schedule(inputs: &LoanInputs) -> Result<AmortizationResult, AmortizationError> {
    validate(inputs)?;

    let payment = periodic_payment(
        inputs.principal,
        inputs.annual_rate_percent,
        inputs.term_periods,
        inputs.frequency.periods_per_year(),
    );
    debug!(%payment, "computed periodic payment");

    let (periods, totals) = run_schedule(inputs, payment, inputs.extra_payment)?;

    let comparison = if inputs.extra_payment > Decimal::ZERO {
        let (_, baseline) = run_schedule(inputs, payment, Decimal::ZERO)?;
        Some(ComparisonSummary {
            interest_saved: baseline.total_interest - totals.total_interest,
            periods_saved: baseline.periods - totals.periods,
        })
    } else {
        None
    };

    Ok(AmortizationResult {
        payment,
        periods,
        totals,
        comparison,
    })
}

fn validate(inputs: &LoanInputs) -> Result<(), AmortizationError> {
    if inputs.principal <= Decimal::ZERO {
        return Err(AmortizationError::NonPositivePrincipal(inputs.principal));
    }
    if inputs.term_periods == 0 {
        return Err(AmortizationError::NonPositiveTerm);
    }
    if inputs.annual_rate_percent < Decimal::ZERO {
        return Err(AmortizationError::NegativeRate(inputs.annual_rate_percent));
    }
    if inputs.extra_payment < Decimal::ZERO {
        return Err(AmortizationError::NegativeExtraPayment(
            inputs.extra_payment,
        ));
    }
    Ok(())
}

fn run_schedule(
    inputs: &LoanInputs,
    payment: Decimal,
    extra_payment: Decimal,
) -> Result<(Vec<PaymentPeriod>, ScheduleTotals), AmortizationError> {
    let rate = periodic_rate(
        inputs.annual_rate_percent,
        inputs.frequency.periods_per_year(),
    );
    let epsilon = balance_epsilon();

    let mut balance = inputs.principal;
    let mut periods = Vec::new();
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for index in 1..=inputs.term_periods {
        let interest = round_half_up(balance * rate);
        let mut principal = (payment - interest).clamp(Decimal::ZERO, balance);
        let extra = extra_payment.min(balance - principal);
        let mut remaining = balance - principal - extra;

        // Closing period: absorb any residual so the balance lands on zero.
        if remaining <= epsilon || index == inputs.term_periods {
            principal += remaining;
            remaining = Decimal::ZERO;
        }

        let paid = interest + principal + extra;
        total_paid += paid;
        total_interest += interest;
        balance = remaining;

        periods.push(PaymentPeriod {
            index,
            date: inputs
                .frequency
                .advance(inputs.start_date, index)
                .ok_or(AmortizationError::DateOverflow)?,
            payment: paid,
            principal,
            interest,
            extra,
            balance,
        });

        if balance.is_zero() {
            break;
        }
    }

    let last = periods
        .last()
        .expect("term validated positive, at least one period exists");
    let totals = ScheduleTotals {
        total_paid,
        total_interest,
        periods: last.index,
        payoff_date: last.date,
    };
    Ok((periods, totals))
}
