//! Injectable tax rate tables.
//!
//! Bracket and state tables are tied to a specific tax year and go stale, so
//! calculators never embed them. Callers load a [`RateTables`] value (from
//! CSV data or test fixtures) and pass it to each bracket-style calculator.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::filing_status::FilingStatus;
use super::rate_schedule::RateSchedule;

/// Whether an asset was held long enough for preferential rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldingTerm {
    ShortTerm,
    LongTerm,
}

impl HoldingTerm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortTerm => "short",
            Self::LongTerm => "long",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "short" => Some(Self::ShortTerm),
            "long" => Some(Self::LongTerm),
            _ => None,
        }
    }
}

/// Flat per-state rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRates {
    /// Top marginal rate applied to capital gains, as a decimal fraction.
    pub capital_gains_rate: Decimal,
    /// Average effective property tax rate, as a decimal fraction.
    pub property_tax_rate: Decimal,
}

/// Net investment income tax surcharge parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NiitConfig {
    rate: Decimal,
    thresholds: HashMap<FilingStatus, Decimal>,
}

impl NiitConfig {
    /// # Errors
    ///
    /// Returns [`RateTablesError::MissingFilingStatus`] if any filing status
    /// has no threshold entry.
    pub fn new(
        rate: Decimal,
        thresholds: HashMap<FilingStatus, Decimal>,
    ) -> Result<Self, RateTablesError> {
        for status in FilingStatus::ALL {
            if !thresholds.contains_key(&status) {
                return Err(RateTablesError::MissingFilingStatus(status));
            }
        }
        Ok(Self { rate, thresholds })
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Income threshold above which the surcharge applies.
    pub fn threshold_for(&self, status: FilingStatus) -> Decimal {
        // Construction guarantees every status has an entry.
        self.thresholds.get(&status).copied().unwrap_or(Decimal::MAX)
    }
}

/// Errors raised when assembling or querying [`RateTables`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTablesError {
    /// A bracket schedule is missing for a filing status.
    #[error("no {0:?} schedule for filing status {1:?}")]
    MissingSchedule(HoldingTerm, FilingStatus),

    /// A NIIT threshold is missing for a filing status.
    #[error("no NIIT threshold for filing status {0:?}")]
    MissingFilingStatus(FilingStatus),

    /// The requested state code has no entry in the state table.
    #[error("unknown state code '{0}'")]
    UnknownState(String),
}

/// The complete table set consumed by bracket-style calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTables {
    short_term: HashMap<FilingStatus, RateSchedule>,
    long_term: HashMap<FilingStatus, RateSchedule>,
    state_rates: HashMap<String, StateRates>,
    niit: NiitConfig,
}

impl RateTables {
    /// Assembles the table set, requiring a schedule for every filing status
    /// in both holding terms.
    ///
    /// # Errors
    ///
    /// Returns [`RateTablesError::MissingSchedule`] if a `(term, status)`
    /// combination has no schedule.
    pub fn new(
        short_term: HashMap<FilingStatus, RateSchedule>,
        long_term: HashMap<FilingStatus, RateSchedule>,
        state_rates: HashMap<String, StateRates>,
        niit: NiitConfig,
    ) -> Result<Self, RateTablesError> {
        for status in FilingStatus::ALL {
            if !short_term.contains_key(&status) {
                return Err(RateTablesError::MissingSchedule(
                    HoldingTerm::ShortTerm,
                    status,
                ));
            }
            if !long_term.contains_key(&status) {
                return Err(RateTablesError::MissingSchedule(
                    HoldingTerm::LongTerm,
                    status,
                ));
            }
        }

        Ok(Self {
            short_term,
            long_term,
            state_rates,
            niit,
        })
    }

    /// The bracket schedule for a holding term and filing status.
    pub fn schedule(
        &self,
        term: HoldingTerm,
        status: FilingStatus,
    ) -> &RateSchedule {
        let table = match term {
            HoldingTerm::ShortTerm => &self.short_term,
            HoldingTerm::LongTerm => &self.long_term,
        };
        // Construction guarantees every (term, status) pair has a schedule.
        table
            .get(&status)
            .expect("validated schedule missing for filing status")
    }

    /// # Errors
    ///
    /// Returns [`RateTablesError::UnknownState`] for codes not in the table.
    pub fn state_rates(&self, code: &str) -> Result<&StateRates, RateTablesError> {
        let normalized = code.trim().to_ascii_uppercase();
        self.state_rates
            .get(&normalized)
            .ok_or(RateTablesError::UnknownState(normalized))
    }

    pub fn state_count(&self) -> usize {
        self.state_rates.len()
    }

    pub fn niit(&self) -> &NiitConfig {
        &self.niit
    }
}
