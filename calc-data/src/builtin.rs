//! The built-in 2025 table set.
//!
//! Representative rates for the 2025 tax year, embedded so the calculators
//! work out of the box. These values go stale; deployments that care should
//! load their own CSVs through [`RateTableLoader`] instead.

use calc_core::models::{FilingStatus, NiitConfig, RateTables};
use rust_decimal::Decimal;

use crate::loader::{RateTableLoader, RateTableLoaderError};

const BRACKETS_CSV: &str = include_str!("../data/brackets.csv");
const STATE_RATES_CSV: &str = include_str!("../data/state_rates.csv");

/// Net investment income tax parameters for 2025: 3.8% above per-status
/// MAGI thresholds.
pub fn default_niit() -> NiitConfig {
    let thresholds = FilingStatus::ALL
        .into_iter()
        .map(|status| {
            let threshold = match status {
                FilingStatus::MarriedFilingJointly => Decimal::from(250_000),
                FilingStatus::MarriedFilingSeparately => Decimal::from(125_000),
                FilingStatus::Single | FilingStatus::HeadOfHousehold => Decimal::from(200_000),
            };
            (status, threshold)
        })
        .collect();
    // The embedded thresholds cover every status, so this cannot fail.
    NiitConfig::new(Decimal::new(38, 3), thresholds)
        .unwrap_or_else(|_| unreachable!("built-in NIIT thresholds cover every filing status"))
}

/// Loads the embedded 2025 bracket and state tables.
///
/// # Errors
///
/// Returns [`RateTableLoaderError`] if the embedded CSVs fail to parse,
/// which indicates a packaging defect rather than a runtime condition.
pub fn builtin_tables() -> Result<RateTables, RateTableLoaderError> {
    let brackets = RateTableLoader::parse_brackets(BRACKETS_CSV.as_bytes())?;
    let states = RateTableLoader::parse_state_rates(STATE_RATES_CSV.as_bytes())?;
    RateTableLoader::build(&brackets, &states, default_niit())
}

#[cfg(test)]
mod tests {
    use calc_core::models::HoldingTerm;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn builtin_tables_load() {
        let tables = builtin_tables().expect("embedded tables must parse");

        assert_eq!(tables.state_count(), 51);
    }

    #[test]
    fn builtin_niit_thresholds() {
        let niit = default_niit();

        assert_eq!(niit.rate(), dec!(0.038));
        assert_eq!(niit.threshold_for(FilingStatus::Single), dec!(200000));
        assert_eq!(
            niit.threshold_for(FilingStatus::MarriedFilingJointly),
            dec!(250000)
        );
        assert_eq!(
            niit.threshold_for(FilingStatus::MarriedFilingSeparately),
            dec!(125000)
        );
    }

    #[test]
    fn builtin_long_term_single_brackets() {
        let tables = builtin_tables().expect("embedded tables must parse");
        let schedule = tables.schedule(HoldingTerm::LongTerm, FilingStatus::Single);

        assert_eq!(schedule.rate_for(dec!(48350)), dec!(0));
        assert_eq!(schedule.rate_for(dec!(100000)), dec!(0.15));
        assert_eq!(schedule.rate_for(dec!(600000)), dec!(0.20));
    }
}
