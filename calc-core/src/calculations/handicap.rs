//! Golf handicap index.
//!
//! Each round produces a differential `(score − course rating) × 113 /
//! slope`, rounded to one decimal. The index averages the best differentials
//! of the most recent rounds (at most 20), takes 96% of that mean, and
//! truncates to one decimal. How many differentials count depends on how
//! many rounds are available, per the published table.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::round_half_up_dp;
use crate::models::GolfRound;

/// Slope rating of a course of standard difficulty.
const STANDARD_SLOPE: i64 = 113;

/// Fewest rounds that produce an index.
pub const MIN_ROUNDS: usize = 5;

/// Only the most recent rounds up to this count are considered.
pub const MAX_ROUNDS: usize = 20;

/// Errors for handicap calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandicapError {
    /// Not enough rounds recorded yet.
    #[error("need at least {need} rounds, have {have}")]
    NotEnoughRounds { have: usize, need: usize },

    /// Slope ratings are defined on 55-155.
    #[error("slope rating must be between 55 and 155, got {0}")]
    SlopeOutOfRange(i32),

    /// Course rating must be positive.
    #[error("course rating must be positive, got {0}")]
    NonPositiveRating(Decimal),

    /// Score must be positive.
    #[error("score must be positive, got {0}")]
    NonPositiveScore(i32),
}

/// Handicap differential for one round, to one decimal place.
///
/// # Errors
///
/// Returns [`HandicapError`] for out-of-range ratings or scores.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::handicap::differential;
///
/// assert_eq!(differential(85, dec!(72.0), 130), Ok(dec!(11.3)));
/// ```
pub fn differential(
    score: i32,
    course_rating: Decimal,
    slope_rating: i32,
) -> Result<Decimal, HandicapError> {
    if score <= 0 {
        return Err(HandicapError::NonPositiveScore(score));
    }
    if course_rating <= Decimal::ZERO {
        return Err(HandicapError::NonPositiveRating(course_rating));
    }
    if !(55..=155).contains(&slope_rating) {
        return Err(HandicapError::SlopeOutOfRange(slope_rating));
    }

    let raw = (Decimal::from(score) - course_rating) * Decimal::from(STANDARD_SLOPE)
        / Decimal::from(slope_rating);
    Ok(round_half_up_dp(raw, 1))
}

/// How many of the lowest differentials count, by rounds available.
fn differentials_counted(rounds: usize) -> usize {
    match rounds {
        0..=6 => 1,
        7..=8 => 2,
        9..=10 => 3,
        11..=12 => 4,
        13..=14 => 5,
        15..=16 => 6,
        17 => 7,
        18 => 8,
        19 => 9,
        _ => 10,
    }
}

/// Handicap index over a round history.
///
/// Rounds beyond the most recent [`MAX_ROUNDS`] (by date played) are
/// ignored. The result is 96% of the mean of the counted differentials,
/// truncated to one decimal.
///
/// # Errors
///
/// Returns [`HandicapError`] with fewer than [`MIN_ROUNDS`] rounds, or when
/// any round has out-of-range values.
pub fn handicap_index(rounds: &[GolfRound]) -> Result<Decimal, HandicapError> {
    if rounds.len() < MIN_ROUNDS {
        return Err(HandicapError::NotEnoughRounds {
            have: rounds.len(),
            need: MIN_ROUNDS,
        });
    }

    let mut recent: Vec<&GolfRound> = rounds.iter().collect();
    recent.sort_by(|a, b| b.played_on.cmp(&a.played_on).then(b.id.cmp(&a.id)));
    if recent.len() > MAX_ROUNDS {
        warn!(
            total = recent.len(),
            "ignoring rounds beyond the {MAX_ROUNDS} most recent"
        );
        recent.truncate(MAX_ROUNDS);
    }

    let mut differentials = recent
        .iter()
        .map(|round| differential(round.score, round.course_rating, round.slope_rating))
        .collect::<Result<Vec<_>, _>>()?;
    differentials.sort_unstable();

    let counted = differentials_counted(differentials.len());
    let sum: Decimal = differentials.iter().take(counted).sum();
    let mean = sum / Decimal::from(counted as i64);
    let index = mean * Decimal::new(96, 2);
    Ok(index.round_dp_with_strategy(1, RoundingStrategy::ToZero))
}
