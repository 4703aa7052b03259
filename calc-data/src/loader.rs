use std::collections::HashMap;
use std::io::Read;

use calc_core::models::{
    FilingStatus, HoldingTerm, NiitConfig, RateBracket, RateSchedule, RateScheduleError,
    RateTables, RateTablesError, StateRates,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when loading rate table data.
#[derive(Debug, Error)]
pub enum RateTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid holding term: {0}")]
    InvalidTerm(String),

    #[error("Invalid filing status: {0}")]
    InvalidFilingStatus(String),

    #[error("Invalid state code: {0}")]
    InvalidState(String),

    #[error("Invalid {term} schedule for filing status {status}: {source}")]
    Schedule {
        term: String,
        status: String,
        source: RateScheduleError,
    },

    #[error(transparent)]
    Tables(#[from] RateTablesError),
}

impl From<csv::Error> for RateTableLoaderError {
    fn from(err: csv::Error) -> Self {
        RateTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the bracket table CSV.
///
/// Columns:
/// - `term`: `short` or `long`
/// - `filing_status`: S, MFJ, MFS, HOH
/// - `upper_income`: inclusive upper bound (empty for the unbounded top)
/// - `rate`: the marginal rate as a decimal (e.g. 0.15 for 15%)
///
/// Brackets for each `(term, filing_status)` pair must appear in ascending
/// order, ending with the unbounded top bracket.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub term: String,
    pub filing_status: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_income: Option<Decimal>,
    pub rate: Decimal,
}

/// A single record from the state rate CSV.
///
/// Columns:
/// - `state`: two-letter postal code
/// - `capital_gains_rate`: flat rate applied to gains, as a decimal
/// - `property_tax_rate`: average effective rate, as a decimal
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StateRateRecord {
    pub state: String,
    pub capital_gains_rate: Decimal,
    pub property_tax_rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for rate table data from CSV files.
///
/// The bracket tables and state rates are tied to a tax year and go stale;
/// keeping them in CSV lets a deployment replace them without recompiling.
pub struct RateTableLoader;

impl RateTableLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, RateTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse state rate records from a CSV reader.
    pub fn parse_state_rates<R: Read>(
        reader: R
    ) -> Result<Vec<StateRateRecord>, RateTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: StateRateRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Assemble parsed records into a validated [`RateTables`].
    ///
    /// Bracket records are grouped by `(term, filing_status)` in file order
    /// and validated as schedules; every filing status must have a schedule
    /// for both terms. Duplicate state codes keep the last value and log a
    /// warning.
    pub fn build(
        brackets: &[BracketRecord],
        states: &[StateRateRecord],
        niit: NiitConfig,
    ) -> Result<RateTables, RateTableLoaderError> {
        let mut grouped: HashMap<(HoldingTerm, FilingStatus), Vec<RateBracket>> = HashMap::new();

        for record in brackets {
            let term = HoldingTerm::parse(&record.term)
                .ok_or_else(|| RateTableLoaderError::InvalidTerm(record.term.clone()))?;
            let status = FilingStatus::parse(&record.filing_status).ok_or_else(|| {
                RateTableLoaderError::InvalidFilingStatus(record.filing_status.clone())
            })?;
            grouped.entry((term, status)).or_default().push(RateBracket {
                upper: record.upper_income,
                rate: record.rate,
            });
        }

        let mut short_term = HashMap::new();
        let mut long_term = HashMap::new();
        for ((term, status), group) in grouped {
            let schedule =
                RateSchedule::new(group).map_err(|source| RateTableLoaderError::Schedule {
                    term: term.as_str().to_string(),
                    status: status.as_str().to_string(),
                    source,
                })?;
            match term {
                HoldingTerm::ShortTerm => short_term.insert(status, schedule),
                HoldingTerm::LongTerm => long_term.insert(status, schedule),
            };
        }

        let mut state_rates = HashMap::new();
        for record in states {
            let code = record.state.trim().to_ascii_uppercase();
            if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
                return Err(RateTableLoaderError::InvalidState(record.state.clone()));
            }
            let previous = state_rates.insert(
                code.clone(),
                StateRates {
                    capital_gains_rate: record.capital_gains_rate,
                    property_tax_rate: record.property_tax_rate,
                },
            );
            if previous.is_some() {
                warn!(state = %code, "duplicate state rate record, keeping the last");
            }
        }

        Ok(RateTables::new(short_term, long_term, state_rates, niit)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_BRACKETS: &str = "\
term,filing_status,upper_income,rate
short,S,11925,0.10
short,S,48475,0.12
short,S,,0.22
short,MFJ,23850,0.10
short,MFJ,,0.12
short,MFS,11925,0.10
short,MFS,,0.12
short,HOH,17000,0.10
short,HOH,,0.12
long,S,48350,0
long,S,533400,0.15
long,S,,0.20
long,MFJ,96700,0
long,MFJ,,0.15
long,MFS,48350,0
long,MFS,,0.15
long,HOH,64750,0
long,HOH,,0.15
";

    const TEST_STATES: &str = "\
state,capital_gains_rate,property_tax_rate
CA,0.133,0.0075
TX,0,0.0168
";

    fn test_niit() -> NiitConfig {
        NiitConfig::new(
            dec!(0.038),
            FilingStatus::ALL
                .into_iter()
                .map(|status| (status, dec!(200000)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn parse_brackets_reads_all_rows() {
        let records = RateTableLoader::parse_brackets(TEST_BRACKETS.as_bytes())
            .expect("Failed to parse CSV");

        assert_eq!(records.len(), 18);
        assert_eq!(
            records[0],
            BracketRecord {
                term: "short".to_string(),
                filing_status: "S".to_string(),
                upper_income: Some(dec!(11925)),
                rate: dec!(0.10),
            }
        );
    }

    #[test]
    fn parse_brackets_empty_upper_is_unbounded() {
        let csv = "term,filing_status,upper_income,rate\nlong,S,,0.20";

        let records =
            RateTableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].upper_income, None);
        assert_eq!(records[0].rate, dec!(0.20));
    }

    #[test]
    fn parse_brackets_missing_column_is_rejected() {
        let csv = "term,filing_status\nshort,S";

        let result = RateTableLoader::parse_brackets(csv.as_bytes());

        let err = result.expect_err("Should fail for missing column");
        assert!(matches!(err, RateTableLoaderError::CsvParse(_)));
    }

    #[test]
    fn parse_state_rates_reads_all_rows() {
        let records = RateTableLoader::parse_state_rates(TEST_STATES.as_bytes())
            .expect("Failed to parse CSV");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state, "CA");
        assert_eq!(records[0].capital_gains_rate, dec!(0.133));
        assert_eq!(records[1].property_tax_rate, dec!(0.0168));
    }

    #[test]
    fn build_produces_working_tables() {
        let brackets =
            RateTableLoader::parse_brackets(TEST_BRACKETS.as_bytes()).expect("parse brackets");
        let states =
            RateTableLoader::parse_state_rates(TEST_STATES.as_bytes()).expect("parse states");

        let tables = RateTableLoader::build(&brackets, &states, test_niit()).expect("build");

        let single_long = tables.schedule(HoldingTerm::LongTerm, FilingStatus::Single);
        assert_eq!(single_long.rate_for(dec!(48350)), dec!(0));
        assert_eq!(single_long.rate_for(dec!(100000)), dec!(0.15));
        assert_eq!(tables.state_rates("CA").unwrap().capital_gains_rate, dec!(0.133));
    }

    #[test]
    fn build_rejects_unknown_term() {
        let csv = "term,filing_status,upper_income,rate\nmedium,S,,0.10";
        let brackets = RateTableLoader::parse_brackets(csv.as_bytes()).expect("parse");

        let result = RateTableLoader::build(&brackets, &[], test_niit());

        assert!(
            matches!(result, Err(RateTableLoaderError::InvalidTerm(ref term)) if term == "medium")
        );
    }

    #[test]
    fn build_rejects_unknown_filing_status() {
        let csv = "term,filing_status,upper_income,rate\nshort,QSS,,0.10";
        let brackets = RateTableLoader::parse_brackets(csv.as_bytes()).expect("parse");

        let result = RateTableLoader::build(&brackets, &[], test_niit());

        assert!(matches!(
            result,
            Err(RateTableLoaderError::InvalidFilingStatus(ref status)) if status == "QSS"
        ));
    }

    #[test]
    fn build_rejects_missing_schedule() {
        // Only a short-term Single schedule: long-term tables are missing.
        let csv = "term,filing_status,upper_income,rate\nshort,S,,0.10";
        let brackets = RateTableLoader::parse_brackets(csv.as_bytes()).expect("parse");

        let result = RateTableLoader::build(&brackets, &[], test_niit());

        assert!(matches!(result, Err(RateTableLoaderError::Tables(_))));
    }

    #[test]
    fn build_rejects_unsorted_schedule() {
        let csv = "\
term,filing_status,upper_income,rate
short,S,48475,0.12
short,S,11925,0.10
short,S,,0.22
";
        let brackets = RateTableLoader::parse_brackets(csv.as_bytes()).expect("parse");

        let result = RateTableLoader::build(&brackets, &[], test_niit());

        assert!(matches!(
            result,
            Err(RateTableLoaderError::Schedule { .. })
        ));
    }

    #[test]
    fn build_rejects_bad_state_code() {
        let brackets =
            RateTableLoader::parse_brackets(TEST_BRACKETS.as_bytes()).expect("parse brackets");
        let states = vec![StateRateRecord {
            state: "CAL".to_string(),
            capital_gains_rate: dec!(0.1),
            property_tax_rate: dec!(0.01),
        }];

        let result = RateTableLoader::build(&brackets, &states, test_niit());

        assert!(
            matches!(result, Err(RateTableLoaderError::InvalidState(ref code)) if code == "CAL")
        );
    }
}
