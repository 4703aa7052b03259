use anyhow::{Result, anyhow};
use clap::Args;
use rust_decimal::Decimal;

use calc_core::calculations::{factors, ratio, rounding, triangle};
use calc_core::models::{Length, LengthUnit, Weight, WeightUnit};

use crate::format::parse_decimal;

/// Greatest common factor and least common multiple of 2-10 integers.
#[derive(Args, Debug)]
pub struct FactorsArgs {
    /// Positive integers to analyze
    #[arg(required = true, num_args = 2..=10)]
    values: Vec<u64>,
}

pub fn factors(args: &FactorsArgs) -> Result<()> {
    let analysis = factors::analyze(&args.values)?;

    println!("GCF: {}", analysis.gcf);
    println!("LCM: {}", analysis.lcm);
    println!();
    for step in &analysis.steps {
        println!("  {step}");
    }
    println!();
    for factorization in &analysis.factorizations {
        let rendered = factorization
            .factors
            .iter()
            .map(|(prime, exponent)| {
                if *exponent == 1 {
                    prime.to_string()
                } else {
                    format!("{prime}^{exponent}")
                }
            })
            .collect::<Vec<_>>()
            .join(" \u{d7} ");
        println!(
            "  {} = {}",
            factorization.value,
            if rendered.is_empty() { "1".to_string() } else { rendered }
        );
    }
    match &analysis.special_case {
        Some(factors::SpecialCase::Coprime) => println!("The values are coprime."),
        Some(factors::SpecialCase::Divides { divisor }) => {
            println!("{divisor} divides every other value.")
        }
        Some(factors::SpecialCase::AllEqual) => println!("All values are equal."),
        None => {}
    }

    Ok(())
}

/// Simplify a ratio, or solve the proportion a : b = c : x.
#[derive(Args, Debug)]
pub struct RatioArgs {
    /// Antecedent (the a in a : b)
    a: u64,

    /// Consequent (the b in a : b)
    b: u64,

    /// Solve a : b = OF : x instead of simplifying
    #[arg(long)]
    of: Option<String>,
}

pub fn ratio(args: &RatioArgs) -> Result<()> {
    match &args.of {
        Some(c) => {
            let x = ratio::solve_proportion(
                Decimal::from(args.a),
                Decimal::from(args.b),
                parse_decimal(c)?,
            )?;
            println!("{} : {} = {} : {x}", args.a, args.b, c);
        }
        None => {
            let simplified = ratio::simplify(args.a, args.b)?;
            println!(
                "{} : {} = {} : {} (divided by {})",
                args.a, args.b, simplified.antecedent, simplified.consequent, simplified.factor
            );
        }
    }

    Ok(())
}

/// Round a value under every rounding mode at once.
#[derive(Args, Debug)]
pub struct RoundArgs {
    /// The value to round
    value: String,

    /// Decimal places to keep
    #[arg(short, long, default_value_t = 0)]
    places: u32,
}

pub fn round(args: &RoundArgs) -> Result<()> {
    let value = parse_decimal(&args.value)?;
    let comparison = rounding::RoundingComparison::build(value, args.places)?;

    println!("{:>10}: {}", "half-up", comparison.half_up);
    println!("{:>10}: {}", "half-down", comparison.half_down);
    println!("{:>10}: {}", "half-even", comparison.half_even);
    println!("{:>10}: {}", "ceiling", comparison.ceiling);
    println!("{:>10}: {}", "floor", comparison.floor);
    println!("{:>10}: {}", "truncate", comparison.truncate);

    Ok(())
}

/// Convert between length units (cm, m, in, ft) or weight units (kg, lb).
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// The value to convert
    value: String,

    /// Source unit
    from: String,

    /// Target unit
    to: String,
}

pub fn convert(args: &ConvertArgs) -> Result<()> {
    let value = parse_decimal(&args.value)?;

    if let (Some(from), Some(to)) = (LengthUnit::parse(&args.from), LengthUnit::parse(&args.to)) {
        let converted = Length::new(value, from).to(to);
        println!(
            "{value} {} = {} {}",
            from.as_str(),
            converted.value.round_dp(6).normalize(),
            to.as_str()
        );
        return Ok(());
    }

    if let (Some(from), Some(to)) = (WeightUnit::parse(&args.from), WeightUnit::parse(&args.to)) {
        let converted = Weight::new(value, from).to(to);
        println!(
            "{value} {} = {} {}",
            from.as_str(),
            converted.value.round_dp(6).normalize(),
            to.as_str()
        );
        return Ok(());
    }

    Err(anyhow!(
        "cannot convert '{}' to '{}'; units must both be lengths (cm, m, in, ft) or both weights (kg, lb)",
        args.from,
        args.to
    ))
}

/// Solve a right triangle from any two known values.
#[derive(Args, Debug)]
pub struct TriangleArgs {
    /// Leg a (opposite angle A)
    #[arg(short = 'a', long)]
    leg_a: Option<f64>,

    /// Leg b (opposite angle B)
    #[arg(short = 'b', long)]
    leg_b: Option<f64>,

    /// Hypotenuse c
    #[arg(short = 'c', long)]
    hypotenuse: Option<f64>,

    /// Angle A in degrees
    #[arg(short = 'A', long)]
    angle_a: Option<f64>,

    /// Angle B in degrees
    #[arg(short = 'B', long)]
    angle_b: Option<f64>,
}

pub fn triangle(args: &TriangleArgs) -> Result<()> {
    let input = triangle::TriangleInput {
        leg_a: args.leg_a,
        leg_b: args.leg_b,
        hypotenuse: args.hypotenuse,
        angle_a_deg: args.angle_a,
        angle_b_deg: args.angle_b,
    };
    let solved = triangle::solve_right_triangle(&input)?;

    println!("Leg a:        {:.4}", solved.leg_a);
    println!("Leg b:        {:.4}", solved.leg_b);
    println!("Hypotenuse:   {:.4}", solved.hypotenuse);
    println!("Angle A:      {:.2}\u{b0}", solved.angle_a_deg);
    println!("Angle B:      {:.2}\u{b0}", solved.angle_b_deg);
    println!("Area:         {:.4}", solved.area);
    println!("Perimeter:    {:.4}", solved.perimeter);
    println!("Altitude:     {:.4}", solved.altitude);
    println!("Inradius:     {:.4}", solved.inradius);
    println!("Circumradius: {:.4}", solved.circumradius);

    Ok(())
}
