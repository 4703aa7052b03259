//! Pregnancy due date arithmetic.
//!
//! Every anchor reduces to a "day zero" equivalent to the first day of the
//! last menstrual period, and the due date is 280 days after it:
//!
//! | Anchor | Due date |
//! |--------|----------|
//! | LMP | lmp + 280 days + (cycle length − 28) |
//! | Conception | conception + 266 days |
//! | Ultrasound | scan date + (280 − gestational age at scan) |

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Days from LMP to the estimated due date for a 28-day cycle.
pub const FULL_TERM_DAYS: u32 = 280;

/// Days from conception to the estimated due date.
const CONCEPTION_TO_DUE_DAYS: u32 = 266;

/// Reference cycle length the 280-day offset assumes.
const REFERENCE_CYCLE_DAYS: u32 = 28;

/// Errors for due date calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DueDateError {
    /// Cycle length must be between 20 and 45 days.
    #[error("cycle length must be between 20 and 45 days, got {0}")]
    CycleLengthOutOfRange(u32),

    /// Days past the week mark must be 0-6.
    #[error("gestational days must be 0-6, got {0}")]
    GestationalDaysOutOfRange(u32),

    /// Gestational age at the scan cannot exceed full term.
    #[error("gestational age of {0} days exceeds full term")]
    GestationalAgeTooLarge(u32),

    /// A date fell outside the representable calendar range.
    #[error("date overflowed the calendar range")]
    DateOverflow,
}

/// How the pregnancy is dated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DueDateMethod {
    /// First day of the last menstrual period, adjusted for cycle length.
    LastMenstrualPeriod {
        lmp: NaiveDate,
        cycle_length_days: u32,
    },
    /// Known or estimated conception date.
    Conception { date: NaiveDate },
    /// Ultrasound scan with the gestational age it reported.
    Ultrasound {
        scan_date: NaiveDate,
        gestational_weeks: u32,
        gestational_days: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    /// Trimester boundaries by completed gestational weeks: 0-13, 14-27, 28+.
    fn from_weeks(weeks: i64) -> Self {
        match weeks {
            ..=13 => Self::First,
            14..=27 => Self::Second,
            _ => Self::Third,
        }
    }
}

/// Gestational progress as of a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PregnancyProgress {
    pub due_date: NaiveDate,
    /// Gestational age in days; negative before the dating anchor.
    pub gestational_days: i64,
    pub gestational_weeks: i64,
    /// Days past the completed week, 0-6.
    pub week_days: i64,
    pub trimester: Trimester,
    pub days_until_due: i64,
}

/// The estimated due date for a dating anchor.
///
/// # Errors
///
/// Returns [`DueDateError`] for out-of-range cycle lengths or gestational
/// ages, or dates outside the calendar range.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use calc_core::calculations::pregnancy::{DueDateMethod, due_date};
///
/// let method = DueDateMethod::LastMenstrualPeriod {
///     lmp: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     cycle_length_days: 28,
/// };
///
/// assert_eq!(
///     due_date(&method).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 12, 6).unwrap()
/// );
/// ```
pub fn due_date(method: &DueDateMethod) -> Result<NaiveDate, DueDateError> {
    match *method {
        DueDateMethod::LastMenstrualPeriod {
            lmp,
            cycle_length_days,
        } => {
            if !(20..=45).contains(&cycle_length_days) {
                return Err(DueDateError::CycleLengthOutOfRange(cycle_length_days));
            }
            // Ovulation shifts with cycle length relative to the 28-day
            // reference, so the offset shifts with it.
            let base = lmp
                .checked_add_days(Days::new(u64::from(FULL_TERM_DAYS)))
                .ok_or(DueDateError::DateOverflow)?;
            shift_days(
                base,
                i64::from(cycle_length_days) - i64::from(REFERENCE_CYCLE_DAYS),
            )
        }
        DueDateMethod::Conception { date } => date
            .checked_add_days(Days::new(u64::from(CONCEPTION_TO_DUE_DAYS)))
            .ok_or(DueDateError::DateOverflow),
        DueDateMethod::Ultrasound {
            scan_date,
            gestational_weeks,
            gestational_days,
        } => {
            if gestational_days > 6 {
                return Err(DueDateError::GestationalDaysOutOfRange(gestational_days));
            }
            let age = gestational_weeks * 7 + gestational_days;
            if age > FULL_TERM_DAYS {
                return Err(DueDateError::GestationalAgeTooLarge(age));
            }
            scan_date
                .checked_add_days(Days::new(u64::from(FULL_TERM_DAYS - age)))
                .ok_or(DueDateError::DateOverflow)
        }
    }
}

/// Gestational progress as of `as_of`.
///
/// # Errors
///
/// Same as [`due_date`].
pub fn progress(
    method: &DueDateMethod,
    as_of: NaiveDate,
) -> Result<PregnancyProgress, DueDateError> {
    let due = due_date(method)?;
    // LMP-equivalent day zero, regardless of the anchor used.
    let day_zero = due
        .checked_sub_days(Days::new(u64::from(FULL_TERM_DAYS)))
        .ok_or(DueDateError::DateOverflow)?;

    let gestational_days = (as_of - day_zero).num_days();
    if gestational_days < 0 {
        warn!(%as_of, %day_zero, "reference date precedes the dating anchor");
    }
    let gestational_weeks = gestational_days.div_euclid(7);
    Ok(PregnancyProgress {
        due_date: due,
        gestational_days,
        gestational_weeks,
        week_days: gestational_days.rem_euclid(7),
        trimester: Trimester::from_weeks(gestational_weeks),
        days_until_due: (due - as_of).num_days(),
    })
}

fn shift_days(
    date: NaiveDate,
    offset: i64,
) -> Result<NaiveDate, DueDateError> {
    let shifted = if offset >= 0 {
        date.checked_add_days(Days::new(offset as u64))
    } else {
        date.checked_sub_days(Days::new(offset.unsigned_abs()))
    };
    shifted.ok_or(DueDateError::DateOverflow)
}
