//! Input parsing and output formatting shared by the command handlers.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use calc_core::calculations::common::round_half_up;
use calc_core::models::{Length, LengthUnit};

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes
/// commas (thousands separator) and a leading `$`.
fn normalize_decimal_input(s: &str) -> String {
    s.trim().trim_start_matches('$').replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and an
/// optional leading dollar sign.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    normalize_decimal_input(s).parse().map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

/// Parses a height in any of the common notations:
/// `5'10"`, `5'10`, `70in`, `178cm`, `1.78m`, `6ft`.
pub fn parse_height(s: &str) -> Result<Length> {
    let trimmed = s.trim();

    let feet_inches =
        Regex::new(r#"^(\d+)'\s*(\d+(?:\.\d+)?)"?$"#).expect("static regex must compile");
    if let Some(captures) = feet_inches.captures(trimmed) {
        let feet: Decimal = captures[1].parse()?;
        let inches: Decimal = captures[2].parse()?;
        return Ok(Length::new(
            feet * Decimal::from(12) + inches,
            LengthUnit::Inches,
        ));
    }

    let with_unit = Regex::new(r"^(\d+(?:\.\d+)?)\s*([a-zA-Z]+)$").expect("static regex must compile");
    if let Some(captures) = with_unit.captures(trimmed) {
        let value: Decimal = captures[1].parse()?;
        let unit = LengthUnit::parse(&captures[2])
            .ok_or_else(|| anyhow!("unknown length unit '{}'", &captures[2]))?;
        return Ok(Length::new(value, unit));
    }

    Err(anyhow!(
        "invalid height '{s}', expected forms like 5'10\", 70in, or 178cm"
    ))
}

/// Formats a decimal as a currency amount with thousands separators,
/// e.g. `1,896.20` or `-12.50`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let negative = rounded < Decimal::ZERO;
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::new();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let mut cents = frac_part.to_string();
    while cents.len() < 2 {
        cents.push('0');
    }

    format!("{}{grouped}.{cents}", if negative { "-" } else { "" })
}

/// Formats a rate fraction as a percentage, e.g. `0.133` → `13.30%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", format_currency(rate * Decimal::ONE_HUNDRED))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_accepts_separators_and_dollar_sign() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("$300,000").unwrap(), dec!(300000));
        assert_eq!(parse_decimal("  6.5  ").unwrap(), dec!(6.5));
    }

    #[test]
    fn parse_decimal_rejects_garbage() {
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("").is_err());
    }

    #[test]
    fn parse_date_accepts_iso() {
        assert_eq!(
            parse_date("2025-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("03/01/2025").is_err());
    }

    #[test]
    fn parse_height_feet_and_inches() {
        let height = parse_height("5'10\"").unwrap();

        assert_eq!(height.unit, LengthUnit::Inches);
        assert_eq!(height.value, dec!(70));
    }

    #[test]
    fn parse_height_without_inch_mark() {
        assert_eq!(parse_height("5'10").unwrap().value, dec!(70));
    }

    #[test]
    fn parse_height_with_unit_suffix() {
        let cm = parse_height("178cm").unwrap();
        assert_eq!(cm.unit, LengthUnit::Centimeters);
        assert_eq!(cm.value, dec!(178));

        let meters = parse_height("1.78 m").unwrap();
        assert_eq!(meters.unit, LengthUnit::Meters);
        assert_eq!(meters.value, dec!(1.78));
    }

    #[test]
    fn parse_height_rejects_unknown_unit() {
        assert!(parse_height("178furlongs").is_err());
        assert!(parse_height("tall").is_err());
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1896.2)), "1,896.20");
        assert_eq!(format_currency(dec!(300000)), "300,000.00");
        assert_eq!(format_currency(dec!(1234567.891)), "1,234,567.89");
    }

    #[test]
    fn currency_handles_small_and_negative_values() {
        assert_eq!(format_currency(dec!(0)), "0.00");
        assert_eq!(format_currency(dec!(12.5)), "12.50");
        assert_eq!(format_currency(dec!(-1234.5)), "-1,234.50");
    }

    #[test]
    fn percent_formats_from_fraction() {
        assert_eq!(format_percent(dec!(0.133)), "13.30%");
        assert_eq!(format_percent(dec!(0)), "0.00%");
    }
}
