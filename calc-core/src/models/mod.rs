mod filing_status;
mod golf_round;
mod rate_schedule;
mod rate_tables;
mod sex;
mod units;

pub use filing_status::FilingStatus;
pub use golf_round::{GolfRound, NewGolfRound};
pub use rate_schedule::{RateBracket, RateSchedule, RateScheduleError};
pub use rate_tables::{HoldingTerm, NiitConfig, RateTables, RateTablesError, StateRates};
pub use sex::Sex;
pub use units::{Length, LengthUnit, Weight, WeightUnit};
