use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stored golf round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GolfRound {
    pub id: i64,
    pub played_on: NaiveDate,
    /// Adjusted gross score for the round.
    pub score: i32,
    /// Course rating from the tee box played, e.g. 72.3.
    pub course_rating: Decimal,
    /// Slope rating from the tee box played, 55-155.
    pub slope_rating: i32,
    pub created_at: DateTime<Utc>,
}

/// A round about to be stored (no id or timestamp yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGolfRound {
    pub played_on: NaiveDate,
    pub score: i32,
    pub course_rating: Decimal,
    pub slope_rating: i32,
}
