//! Ordered bracket schedules shared by every bracket-style calculator.
//!
//! A [`RateSchedule`] is an ascending list of `(upper bound, rate)` brackets
//! where the final bracket is unbounded. Rate selection walks the list once
//! and is inclusive on the upper bound: an amount exactly at a bracket
//! threshold resolves to that bracket's rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`RateSchedule`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateScheduleError {
    /// The schedule has no brackets at all.
    #[error("rate schedule has no brackets")]
    Empty,

    /// A rate fell outside the valid [0, 1] range.
    #[error("rate {0} is outside [0, 1]")]
    RateOutOfRange(Decimal),

    /// Bracket upper bounds were not strictly increasing.
    #[error("bracket upper bounds must be strictly increasing (found {0} after {1})")]
    UnsortedBrackets(Decimal, Decimal),

    /// An unbounded bracket appeared somewhere other than the last position.
    #[error("only the final bracket may be unbounded")]
    UnboundedNotLast,

    /// The final bracket has an upper bound, leaving large amounts unmatched.
    #[error("the final bracket must be unbounded")]
    MissingUnboundedTop,
}

/// One bracket of a [`RateSchedule`].
///
/// `upper` is the inclusive upper bound of the bracket; `None` marks the
/// unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBracket {
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

/// An ordered list of `(upper bound, rate)` brackets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSchedule {
    brackets: Vec<RateBracket>,
}

impl RateSchedule {
    /// Builds a schedule after validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`RateScheduleError`] if the list is empty, a rate is outside
    /// [0, 1], upper bounds are not strictly increasing, or the unbounded
    /// bracket is missing or misplaced.
    pub fn new(brackets: Vec<RateBracket>) -> Result<Self, RateScheduleError> {
        if brackets.is_empty() {
            return Err(RateScheduleError::Empty);
        }

        let mut previous: Option<Decimal> = None;
        for (i, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(RateScheduleError::RateOutOfRange(bracket.rate));
            }
            match bracket.upper {
                Some(upper) => {
                    if let Some(prev) = previous {
                        if upper <= prev {
                            return Err(RateScheduleError::UnsortedBrackets(upper, prev));
                        }
                    }
                    previous = Some(upper);
                }
                None => {
                    if i != brackets.len() - 1 {
                        return Err(RateScheduleError::UnboundedNotLast);
                    }
                }
            }
        }

        if brackets.last().is_some_and(|b| b.upper.is_some()) {
            return Err(RateScheduleError::MissingUnboundedTop);
        }

        Ok(Self { brackets })
    }

    /// Selects the rate for `amount`.
    ///
    /// Upper bounds are inclusive: an amount exactly at a threshold gets that
    /// bracket's rate. Negative amounts fall into the first bracket.
    pub fn rate_for(&self, amount: Decimal) -> Decimal {
        self.brackets
            .iter()
            .find(|b| b.upper.is_none_or(|upper| amount <= upper))
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn brackets(&self) -> &[RateBracket] {
        &self.brackets
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn three_bracket_schedule() -> RateSchedule {
        RateSchedule::new(vec![
            RateBracket {
                upper: Some(dec!(48350)),
                rate: dec!(0),
            },
            RateBracket {
                upper: Some(dec!(533400)),
                rate: dec!(0.15),
            },
            RateBracket {
                upper: None,
                rate: dec!(0.20),
            },
        ])
        .unwrap()
    }

    #[test]
    fn rate_for_selects_matching_bracket() {
        let schedule = three_bracket_schedule();

        assert_eq!(schedule.rate_for(dec!(10000)), dec!(0));
        assert_eq!(schedule.rate_for(dec!(100000)), dec!(0.15));
        assert_eq!(schedule.rate_for(dec!(1000000)), dec!(0.20));
    }

    #[test]
    fn rate_for_is_inclusive_at_upper_bound() {
        let schedule = three_bracket_schedule();

        assert_eq!(schedule.rate_for(dec!(48350)), dec!(0));
        assert_eq!(schedule.rate_for(dec!(48350.01)), dec!(0.15));
        assert_eq!(schedule.rate_for(dec!(533400)), dec!(0.15));
    }

    #[test]
    fn rate_for_negative_amount_uses_first_bracket() {
        let schedule = three_bracket_schedule();

        assert_eq!(schedule.rate_for(dec!(-5)), dec!(0));
    }

    #[test]
    fn new_rejects_empty_schedule() {
        let result = RateSchedule::new(vec![]);

        assert_eq!(result, Err(RateScheduleError::Empty));
    }

    #[test]
    fn new_rejects_rate_above_one() {
        let result = RateSchedule::new(vec![RateBracket {
            upper: None,
            rate: dec!(1.5),
        }]);

        assert_eq!(result, Err(RateScheduleError::RateOutOfRange(dec!(1.5))));
    }

    #[test]
    fn new_rejects_unsorted_uppers() {
        let result = RateSchedule::new(vec![
            RateBracket {
                upper: Some(dec!(100)),
                rate: dec!(0.10),
            },
            RateBracket {
                upper: Some(dec!(50)),
                rate: dec!(0.20),
            },
            RateBracket {
                upper: None,
                rate: dec!(0.30),
            },
        ]);

        assert_eq!(
            result,
            Err(RateScheduleError::UnsortedBrackets(dec!(50), dec!(100)))
        );
    }

    #[test]
    fn new_rejects_unbounded_bracket_in_middle() {
        let result = RateSchedule::new(vec![
            RateBracket {
                upper: None,
                rate: dec!(0.10),
            },
            RateBracket {
                upper: Some(dec!(100)),
                rate: dec!(0.20),
            },
        ]);

        assert_eq!(result, Err(RateScheduleError::UnboundedNotLast));
    }

    #[test]
    fn new_rejects_bounded_final_bracket() {
        let result = RateSchedule::new(vec![RateBracket {
            upper: Some(dec!(100)),
            rate: dec!(0.10),
        }]);

        assert_eq!(result, Err(RateScheduleError::MissingUnboundedTop));
    }
}
