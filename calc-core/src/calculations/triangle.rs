//! Right-triangle solving.
//!
//! Given any two of the five values {leg a, leg b, hypotenuse c, angle A,
//! angle B}, at least one of them a side, the solver fills in the rest
//! using the Pythagorean theorem and the inverse trigonometric functions.
//! Angle A is opposite leg a, angle B opposite leg b, and the right angle
//! sits opposite the hypotenuse. Angles are in degrees.
//!
//! Sides use `f64`; the transcendental functions have no decimal
//! counterpart, and the 0.01 consistency tolerance absorbs the float noise.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance for the Pythagorean consistency check on three given sides.
pub const SIDE_TOLERANCE: f64 = 0.01;

/// Errors for right-triangle solving.
#[derive(Debug, Error, PartialEq)]
pub enum TriangleError {
    /// Fewer than two values were supplied.
    #[error("at least 2 known values are required")]
    InsufficientValues,

    /// Two angles alone fix the shape but not the size.
    #[error("at least one side is required; two angles only fix the shape")]
    AnglesOnly,

    /// A side must be a positive finite number.
    #[error("sides must be positive, got {0}")]
    NonPositiveSide(f64),

    /// An acute angle of a right triangle lies strictly between 0° and 90°.
    #[error("angles must be between 0 and 90 degrees exclusive, got {0}")]
    AngleOutOfRange(f64),

    /// Both angles were given but do not sum to 90°.
    #[error("angles must sum to 90 degrees, got {0}")]
    InconsistentAngles(f64),

    /// The hypotenuse must be the longest side.
    #[error("hypotenuse {hypotenuse} must exceed leg {leg}")]
    HypotenuseNotLongest { hypotenuse: f64, leg: f64 },

    /// Three given sides failed the Pythagorean check.
    #[error("sides violate a² + b² = c²: expected hypotenuse {expected}, got {actual}")]
    SidesViolatePythagoras { expected: f64, actual: f64 },
}

/// Known values; leave the rest `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleInput {
    pub leg_a: Option<f64>,
    pub leg_b: Option<f64>,
    pub hypotenuse: Option<f64>,
    pub angle_a_deg: Option<f64>,
    pub angle_b_deg: Option<f64>,
}

/// A fully solved right triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RightTriangle {
    pub leg_a: f64,
    pub leg_b: f64,
    pub hypotenuse: f64,
    pub angle_a_deg: f64,
    pub angle_b_deg: f64,
    pub area: f64,
    pub perimeter: f64,
    /// Altitude from the right angle to the hypotenuse.
    pub altitude: f64,
    pub inradius: f64,
    pub circumradius: f64,
}

/// Solves the triangle from any valid combination of known values.
///
/// # Errors
///
/// Returns [`TriangleError`] for insufficient or inconsistent inputs.
///
/// # Example
///
/// ```
/// use calc_core::calculations::triangle::{TriangleInput, solve_right_triangle};
///
/// let input = TriangleInput {
///     leg_a: Some(3.0),
///     leg_b: Some(4.0),
///     ..TriangleInput::default()
/// };
///
/// let triangle = solve_right_triangle(&input).unwrap();
///
/// assert!((triangle.hypotenuse - 5.0).abs() < 1e-9);
/// assert!((triangle.area - 6.0).abs() < 1e-9);
/// ```
pub fn solve_right_triangle(input: &TriangleInput) -> Result<RightTriangle, TriangleError> {
    for side in [input.leg_a, input.leg_b, input.hypotenuse].into_iter().flatten() {
        if !(side.is_finite() && side > 0.0) {
            return Err(TriangleError::NonPositiveSide(side));
        }
    }
    for angle in [input.angle_a_deg, input.angle_b_deg].into_iter().flatten() {
        if !(angle.is_finite() && angle > 0.0 && angle < 90.0) {
            return Err(TriangleError::AngleOutOfRange(angle));
        }
    }

    let known = [
        input.leg_a.is_some(),
        input.leg_b.is_some(),
        input.hypotenuse.is_some(),
        input.angle_a_deg.is_some(),
        input.angle_b_deg.is_some(),
    ]
    .iter()
    .filter(|&&k| k)
    .count();
    if known < 2 {
        return Err(TriangleError::InsufficientValues);
    }

    let sides_known = input.leg_a.is_some() as u8
        + input.leg_b.is_some() as u8
        + input.hypotenuse.is_some() as u8;
    if sides_known == 0 {
        return Err(TriangleError::AnglesOnly);
    }

    // Reconcile the two acute angles up front.
    let angle_a = match (input.angle_a_deg, input.angle_b_deg) {
        (Some(a), Some(b)) => {
            if (a + b - 90.0).abs() > SIDE_TOLERANCE {
                return Err(TriangleError::InconsistentAngles(a + b));
            }
            Some(a)
        }
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(90.0 - b),
        (None, None) => None,
    };

    let (a, b, c) = solve_sides(input, angle_a)?;
    let angle_a_deg = (a / c).asin().to_degrees();

    Ok(RightTriangle {
        leg_a: a,
        leg_b: b,
        hypotenuse: c,
        angle_a_deg,
        angle_b_deg: 90.0 - angle_a_deg,
        area: a * b / 2.0,
        perimeter: a + b + c,
        altitude: a * b / c,
        inradius: (a + b - c) / 2.0,
        circumradius: c / 2.0,
    })
}

fn solve_sides(
    input: &TriangleInput,
    angle_a: Option<f64>,
) -> Result<(f64, f64, f64), TriangleError> {
    match (input.leg_a, input.leg_b, input.hypotenuse) {
        // Three sides: validate rather than derive.
        (Some(a), Some(b), Some(c)) => {
            check_hypotenuse_longest(c, a)?;
            check_hypotenuse_longest(c, b)?;
            let expected = a.hypot(b);
            if (expected - c).abs() > SIDE_TOLERANCE {
                return Err(TriangleError::SidesViolatePythagoras {
                    expected,
                    actual: c,
                });
            }
            Ok((a, b, c))
        }
        (Some(a), Some(b), None) => Ok((a, b, a.hypot(b))),
        (Some(a), None, Some(c)) => {
            check_hypotenuse_longest(c, a)?;
            Ok((a, (c * c - a * a).sqrt(), c))
        }
        (None, Some(b), Some(c)) => {
            check_hypotenuse_longest(c, b)?;
            Ok(((c * c - b * b).sqrt(), b, c))
        }
        // One side plus an angle.
        (Some(a), None, None) => {
            let alpha = known_angle(angle_a)?.to_radians();
            Ok((a, a / alpha.tan(), a / alpha.sin()))
        }
        (None, Some(b), None) => {
            let alpha = known_angle(angle_a)?.to_radians();
            Ok((b * alpha.tan(), b, b / alpha.cos()))
        }
        (None, None, Some(c)) => {
            let alpha = known_angle(angle_a)?.to_radians();
            Ok((c * alpha.sin(), c * alpha.cos(), c))
        }
        (None, None, None) => Err(TriangleError::AnglesOnly),
    }
}

fn known_angle(angle_a: Option<f64>) -> Result<f64, TriangleError> {
    angle_a.ok_or(TriangleError::InsufficientValues)
}

fn check_hypotenuse_longest(
    hypotenuse: f64,
    leg: f64,
) -> Result<(), TriangleError> {
    if hypotenuse <= leg {
        return Err(TriangleError::HypotenuseNotLongest { hypotenuse, leg });
    }
    Ok(())
}
