//! Markup and margin pricing.
//!
//! Markup is profit relative to cost; margin is profit relative to revenue.
//! The two are often confused, so every entry point returns both.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;

/// Errors for pricing calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    /// Cost must be positive to express profit as a percentage of it.
    #[error("cost must be positive, got {0}")]
    NonPositiveCost(Decimal),

    /// Markup percentage cannot be negative.
    #[error("markup percentage cannot be negative, got {0}")]
    NegativeMarkup(Decimal),

    /// Margin must be below 100% for revenue to be finite.
    #[error("margin percentage must be in [0, 100), got {0}")]
    MarginOutOfRange(Decimal),

    /// Revenue must be positive to express profit as a percentage of it.
    #[error("revenue must be positive, got {0}")]
    NonPositiveRevenue(Decimal),
}

/// A fully derived price breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub cost: Decimal,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub markup_percent: Decimal,
    pub margin_percent: Decimal,
}

/// Derives the selling price from cost and a markup percentage.
///
/// # Errors
///
/// Returns [`MarkupError`] when cost is non-positive or markup is negative.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::markup::price_from_markup;
///
/// let pricing = price_from_markup(dec!(80.00), dec!(25)).unwrap();
///
/// assert_eq!(pricing.revenue, dec!(100.00));
/// assert_eq!(pricing.margin_percent, dec!(20.00));
/// ```
pub fn price_from_markup(
    cost: Decimal,
    markup_percent: Decimal,
) -> Result<PricingResult, MarkupError> {
    if cost <= Decimal::ZERO {
        return Err(MarkupError::NonPositiveCost(cost));
    }
    if markup_percent < Decimal::ZERO {
        return Err(MarkupError::NegativeMarkup(markup_percent));
    }

    let profit = round_half_up(cost * markup_percent / Decimal::ONE_HUNDRED);
    let revenue = cost + profit;
    Ok(breakdown(cost, revenue, profit))
}

/// Derives the selling price from cost and a target margin percentage.
///
/// # Errors
///
/// Returns [`MarkupError`] when cost is non-positive or margin is outside
/// [0, 100).
pub fn price_from_margin(
    cost: Decimal,
    margin_percent: Decimal,
) -> Result<PricingResult, MarkupError> {
    if cost <= Decimal::ZERO {
        return Err(MarkupError::NonPositiveCost(cost));
    }
    if margin_percent < Decimal::ZERO || margin_percent >= Decimal::ONE_HUNDRED {
        return Err(MarkupError::MarginOutOfRange(margin_percent));
    }

    // revenue = cost / (1 − margin)
    let margin = margin_percent / Decimal::ONE_HUNDRED;
    let revenue = round_half_up(cost / (Decimal::ONE - margin));
    let profit = revenue - cost;
    Ok(breakdown(cost, revenue, profit))
}

/// Derives markup and margin from an actual cost/revenue pair.
///
/// # Errors
///
/// Returns [`MarkupError`] when either amount is non-positive.
pub fn analyze_sale(
    cost: Decimal,
    revenue: Decimal,
) -> Result<PricingResult, MarkupError> {
    if cost <= Decimal::ZERO {
        return Err(MarkupError::NonPositiveCost(cost));
    }
    if revenue <= Decimal::ZERO {
        return Err(MarkupError::NonPositiveRevenue(revenue));
    }
    Ok(breakdown(cost, revenue, revenue - cost))
}

fn breakdown(
    cost: Decimal,
    revenue: Decimal,
    profit: Decimal,
) -> PricingResult {
    PricingResult {
        cost,
        revenue,
        profit,
        markup_percent: round_half_up(profit / cost * Decimal::ONE_HUNDRED),
        margin_percent: round_half_up(profit / revenue * Decimal::ONE_HUNDRED),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn markup_25_percent_on_80_cost() {
        let pricing = price_from_markup(dec!(80.00), dec!(25)).unwrap();

        assert_eq!(pricing.revenue, dec!(100.00));
        assert_eq!(pricing.profit, dec!(20.00));
        assert_eq!(pricing.markup_percent, dec!(25.00));
        assert_eq!(pricing.margin_percent, dec!(20.00));
    }

    #[test]
    fn zero_markup_sells_at_cost() {
        let pricing = price_from_markup(dec!(50.00), dec!(0)).unwrap();

        assert_eq!(pricing.revenue, dec!(50.00));
        assert_eq!(pricing.margin_percent, dec!(0.00));
    }

    #[test]
    fn margin_20_percent_matches_markup_25_percent() {
        let pricing = price_from_margin(dec!(80.00), dec!(20)).unwrap();

        assert_eq!(pricing.revenue, dec!(100.00));
        assert_eq!(pricing.markup_percent, dec!(25.00));
    }

    #[test]
    fn analyze_sale_derives_both_percentages() {
        let pricing = analyze_sale(dec!(60.00), dec!(90.00)).unwrap();

        assert_eq!(pricing.profit, dec!(30.00));
        assert_eq!(pricing.markup_percent, dec!(50.00));
        assert_eq!(pricing.margin_percent, dec!(33.33));
    }

    #[test]
    fn analyze_sale_below_cost_reports_negative_profit() {
        let pricing = analyze_sale(dec!(100.00), dec!(90.00)).unwrap();

        assert_eq!(pricing.profit, dec!(-10.00));
        assert_eq!(pricing.markup_percent, dec!(-10.00));
        assert_eq!(pricing.margin_percent, dec!(-11.11));
    }

    #[test]
    fn non_positive_cost_is_rejected() {
        assert_eq!(
            price_from_markup(dec!(0), dec!(25)),
            Err(MarkupError::NonPositiveCost(dec!(0)))
        );
    }

    #[test]
    fn negative_markup_is_rejected() {
        assert_eq!(
            price_from_markup(dec!(80), dec!(-5)),
            Err(MarkupError::NegativeMarkup(dec!(-5)))
        );
    }

    #[test]
    fn margin_of_100_percent_is_rejected() {
        assert_eq!(
            price_from_margin(dec!(80), dec!(100)),
            Err(MarkupError::MarginOutOfRange(dec!(100)))
        );
    }

    #[test]
    fn non_positive_revenue_is_rejected() {
        assert_eq!(
            analyze_sale(dec!(80), dec!(0)),
            Err(MarkupError::NonPositiveRevenue(dec!(0)))
        );
    }
}
