//! Ratio simplification and proportion solving.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up_dp;
use crate::calculations::factors::gcd;

/// Errors for ratio operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatioError {
    /// Ratio terms must be positive integers.
    #[error("ratio terms must be positive")]
    ZeroTerm,

    /// Solving `a : b = c : x` requires a non-zero antecedent.
    #[error("cannot solve a proportion with a zero antecedent")]
    ZeroAntecedent,
}

/// A ratio reduced to lowest terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedRatio {
    pub antecedent: u64,
    pub consequent: u64,
    /// The common factor divided out of both terms.
    pub factor: u64,
}

/// Reduces `a : b` to lowest terms.
///
/// # Errors
///
/// Returns [`RatioError::ZeroTerm`] when either term is zero.
///
/// # Example
///
/// ```
/// use calc_core::calculations::ratio::simplify;
///
/// let ratio = simplify(12, 18).unwrap();
///
/// assert_eq!((ratio.antecedent, ratio.consequent), (2, 3));
/// assert_eq!(ratio.factor, 6);
/// ```
pub fn simplify(
    a: u64,
    b: u64,
) -> Result<SimplifiedRatio, RatioError> {
    if a == 0 || b == 0 {
        return Err(RatioError::ZeroTerm);
    }
    let factor = gcd(a, b);
    Ok(SimplifiedRatio {
        antecedent: a / factor,
        consequent: b / factor,
        factor,
    })
}

/// Solves `a : b = c : x` for `x`, rounded to four decimal places.
///
/// # Errors
///
/// Returns [`RatioError::ZeroAntecedent`] when `a` is zero.
pub fn solve_proportion(
    a: Decimal,
    b: Decimal,
    c: Decimal,
) -> Result<Decimal, RatioError> {
    if a.is_zero() {
        return Err(RatioError::ZeroAntecedent);
    }
    Ok(round_half_up_dp(b * c / a, 4))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn simplify_reduces_to_lowest_terms() {
        let ratio = simplify(12, 18).unwrap();

        assert_eq!(ratio.antecedent, 2);
        assert_eq!(ratio.consequent, 3);
        assert_eq!(ratio.factor, 6);
    }

    #[test]
    fn simplify_leaves_coprime_terms_unchanged() {
        let ratio = simplify(8, 15).unwrap();

        assert_eq!(ratio.antecedent, 8);
        assert_eq!(ratio.consequent, 15);
        assert_eq!(ratio.factor, 1);
    }

    #[test]
    fn simplify_rejects_zero_term() {
        assert_eq!(simplify(0, 5), Err(RatioError::ZeroTerm));
        assert_eq!(simplify(5, 0), Err(RatioError::ZeroTerm));
    }

    #[test]
    fn proportion_solves_fourth_term() {
        // 3 : 4 = 9 : x  →  x = 12
        assert_eq!(solve_proportion(dec!(3), dec!(4), dec!(9)), Ok(dec!(12)));
    }

    #[test]
    fn proportion_handles_fractional_result() {
        // 7 : 2 = 5 : x  →  x = 10/7
        assert_eq!(
            solve_proportion(dec!(7), dec!(2), dec!(5)),
            Ok(dec!(1.4286))
        );
    }

    #[test]
    fn proportion_rejects_zero_antecedent() {
        assert_eq!(
            solve_proportion(dec!(0), dec!(4), dec!(9)),
            Err(RatioError::ZeroAntecedent)
        );
    }
}
