//! Greatest common factor and least common multiple.
//!
//! GCF comes from the Euclidean algorithm, LCM from `a / gcd(a, b) · b`
//! folded pairwise across the list, and prime factorizations from trial
//! division up to √n. Alongside the numeric answers the analysis carries a
//! human-readable step trace: the Euclid remainder steps for two inputs, or
//! a progressive-GCF trace for longer lists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for factor analysis.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactorsError {
    /// At least two values are required.
    #[error("at least 2 values are required, got {0}")]
    TooFewValues(usize),

    /// More than ten values are not supported.
    #[error("at most 10 values are supported, got {0}")]
    TooManyValues(usize),

    /// Zero is not a positive integer.
    #[error("all values must be positive integers")]
    ZeroValue,

    /// The least common multiple exceeded the integer range.
    #[error("least common multiple overflowed")]
    Overflow,
}

/// A value and its prime factorization as `(prime, exponent)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factorization {
    pub value: u64,
    pub factors: Vec<(u64, u32)>,
}

/// Relationships worth calling out in the rendered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialCase {
    /// The values share no common factor beyond 1.
    Coprime,
    /// One input divides every other input.
    Divides { divisor: u64 },
    /// Every input is the same number.
    AllEqual,
}

/// Full GCF/LCM analysis of a list of positive integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorAnalysis {
    pub values: Vec<u64>,
    pub gcf: u64,
    pub lcm: u64,
    pub factorizations: Vec<Factorization>,
    /// Display-only trace of how the GCF was reached.
    pub steps: Vec<String>,
    pub special_case: Option<SpecialCase>,
}

/// Greatest common divisor via the Euclidean algorithm.
///
/// `gcd(a, 0) = a` by definition.
pub fn gcd(
    a: u64,
    b: u64,
) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Least common multiple.
///
/// # Errors
///
/// Returns [`FactorsError::Overflow`] when the product exceeds `u64`.
pub fn lcm(
    a: u64,
    b: u64,
) -> Result<u64, FactorsError> {
    if a == 0 || b == 0 {
        return Err(FactorsError::ZeroValue);
    }
    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or(FactorsError::Overflow)
}

/// Prime factorization by trial division.
pub fn prime_factorization(mut n: u64) -> Vec<(u64, u32)> {
    let mut factors = Vec::new();
    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            let mut exponent = 0;
            while n % divisor == 0 {
                n /= divisor;
                exponent += 1;
            }
            factors.push((divisor, exponent));
        }
        divisor += if divisor == 2 { 1 } else { 2 };
    }
    if n > 1 {
        factors.push((n, 1));
    }
    factors
}

/// Analyzes 2-10 positive integers.
///
/// # Errors
///
/// Returns [`FactorsError`] for lists outside 2-10 entries, zero values, or
/// an LCM that overflows `u64`.
///
/// # Example
///
/// ```
/// use calc_core::calculations::factors::analyze;
///
/// let analysis = analyze(&[12, 18]).unwrap();
///
/// assert_eq!(analysis.gcf, 6);
/// assert_eq!(analysis.lcm, 36);
/// ```
pub fn analyze(values: &[u64]) -> Result<FactorAnalysis, FactorsError> {
    if values.len() < 2 {
        return Err(FactorsError::TooFewValues(values.len()));
    }
    if values.len() > 10 {
        return Err(FactorsError::TooManyValues(values.len()));
    }
    if values.contains(&0) {
        return Err(FactorsError::ZeroValue);
    }

    let (gcf, steps) = if values.len() == 2 {
        euclid_trace(values[0], values[1])
    } else {
        progressive_trace(values)
    };

    let mut running_lcm = values[0];
    for &value in &values[1..] {
        running_lcm = lcm(running_lcm, value)?;
    }

    let factorizations = values
        .iter()
        .map(|&value| Factorization {
            value,
            factors: prime_factorization(value),
        })
        .collect();

    Ok(FactorAnalysis {
        values: values.to_vec(),
        gcf,
        lcm: running_lcm,
        factorizations,
        steps,
        special_case: special_case(values, gcf),
    })
}

/// Euclid's remainder steps for a pair, e.g. `48 = 2 × 18 + 12`.
fn euclid_trace(
    a: u64,
    b: u64,
) -> (u64, Vec<String>) {
    let (mut high, mut low) = if a >= b { (a, b) } else { (b, a) };
    let mut steps = Vec::new();

    while low != 0 {
        let quotient = high / low;
        let remainder = high % low;
        steps.push(format!("{high} = {quotient} \u{d7} {low} + {remainder}"));
        high = low;
        low = remainder;
    }
    steps.push(format!("GCF = {high}"));
    (high, steps)
}

/// Progressive GCF across a longer list: `gcd(12, 18) = 6`, `gcd(6, 24) = 6`.
fn progressive_trace(values: &[u64]) -> (u64, Vec<String>) {
    let mut steps = Vec::new();
    let mut running = values[0];
    for &value in &values[1..] {
        let next = gcd(running, value);
        steps.push(format!("gcd({running}, {value}) = {next}"));
        running = next;
    }
    steps.push(format!("GCF = {running}"));
    (running, steps)
}

fn special_case(
    values: &[u64],
    gcf: u64,
) -> Option<SpecialCase> {
    let first = values[0];
    if values.iter().all(|&v| v == first) {
        return Some(SpecialCase::AllEqual);
    }
    if values.contains(&gcf) {
        return Some(SpecialCase::Divides { divisor: gcf });
    }
    if gcf == 1 {
        return Some(SpecialCase::Coprime);
    }
    None
}
