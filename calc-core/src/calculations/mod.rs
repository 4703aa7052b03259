pub mod amortization;
pub mod capital_gains;
pub mod cash_flow;
pub mod common;
pub mod factors;
pub mod handicap;
pub mod height;
pub mod ideal_weight;
pub mod markup;
pub mod pregnancy;
pub mod property_tax;
pub mod ratio;
pub mod rounding;
pub mod triangle;
pub mod zodiac;

pub use amortization::{
    AmortizationError, AmortizationResult, ComparisonSummary, LoanInputs, PaymentFrequency,
    PaymentPeriod, ScheduleTotals,
};
pub use capital_gains::{CapitalGainsCalculator, CapitalGainsError, CapitalGainsInput,
    CapitalGainsResult};
pub use cash_flow::{CashFlowError, irr, npv};
pub use factors::{FactorAnalysis, Factorization, FactorsError, SpecialCase, analyze, gcd, lcm};
pub use handicap::{HandicapError, differential, handicap_index};
pub use height::{HeightPrediction, HeightPredictionError, predict_adult_height};
pub use ideal_weight::{IdealWeightError, IdealWeightResult};
pub use markup::{MarkupError, PricingResult, analyze_sale, price_from_margin, price_from_markup};
pub use pregnancy::{DueDateError, DueDateMethod, PregnancyProgress, Trimester, due_date, progress};
pub use property_tax::{PropertyTaxCalculator, PropertyTaxError, PropertyTaxInput,
    PropertyTaxRate, PropertyTaxResult};
pub use ratio::{RatioError, SimplifiedRatio, simplify, solve_proportion};
pub use rounding::{RoundingComparison, RoundingError, RoundingMode, round_with};
pub use triangle::{RightTriangle, TriangleError, TriangleInput, solve_right_triangle};
pub use zodiac::{Element, ZodiacSign, sign_for};
