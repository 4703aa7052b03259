use anyhow::{Result, anyhow};
use chrono::Utc;
use clap::Args;

use calc_core::ShareParams;
use calc_core::calculations::pregnancy::{self, DueDateMethod, Trimester};
use calc_core::calculations::{height, ideal_weight, zodiac};
use calc_core::models::{LengthUnit, Sex, WeightUnit};

use crate::format::{parse_date, parse_height};

fn parse_sex(s: &str) -> Result<Sex> {
    Sex::parse(s).ok_or_else(|| anyhow!("unknown sex '{s}', expected male or female"))
}

/// Zodiac sign for a birth date.
#[derive(Args, Debug)]
pub struct ZodiacArgs {
    /// Birth date (YYYY-MM-DD)
    date: String,
}

pub fn zodiac(args: &ZodiacArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let sign = zodiac::sign_for(date);

    println!("{} {}", sign.symbol(), sign.as_str());
    println!("Element:    {}", sign.element().as_str());
    println!("Date range: {}", sign.date_range());

    Ok(())
}

/// Estimated due date from LMP, conception date, or an ultrasound.
#[derive(Args, Debug)]
pub struct DueDateArgs {
    /// First day of the last menstrual period (YYYY-MM-DD)
    #[arg(long)]
    lmp: Option<String>,

    /// Average cycle length in days, used with --lmp
    #[arg(long, default_value_t = 28)]
    cycle: u32,

    /// Conception date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "lmp")]
    conception: Option<String>,

    /// Ultrasound scan date (YYYY-MM-DD)
    #[arg(long, conflicts_with_all = ["lmp", "conception"], requires = "weeks")]
    scan: Option<String>,

    /// Gestational weeks reported at the scan
    #[arg(long)]
    weeks: Option<u32>,

    /// Gestational days past the week mark at the scan
    #[arg(long, default_value_t = 0)]
    days: u32,

    /// Report progress as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<String>,

    /// Print a shareable parameter string
    #[arg(long)]
    share: bool,
}

pub fn due_date(args: &DueDateArgs) -> Result<()> {
    let method = match (&args.lmp, &args.conception, &args.scan) {
        (Some(lmp), None, None) => DueDateMethod::LastMenstrualPeriod {
            lmp: parse_date(lmp)?,
            cycle_length_days: args.cycle,
        },
        (None, Some(conception), None) => DueDateMethod::Conception {
            date: parse_date(conception)?,
        },
        (None, None, Some(scan)) => DueDateMethod::Ultrasound {
            scan_date: parse_date(scan)?,
            gestational_weeks: args
                .weeks
                .ok_or_else(|| anyhow!("--scan requires --weeks"))?,
            gestational_days: args.days,
        },
        _ => return Err(anyhow!("provide exactly one of --lmp, --conception, or --scan")),
    };

    let as_of = match &args.as_of {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let progress = pregnancy::progress(&method, as_of)?;

    let trimester = match progress.trimester {
        Trimester::First => "first",
        Trimester::Second => "second",
        Trimester::Third => "third",
    };
    println!("Due date:        {}", progress.due_date);
    println!(
        "Gestational age: {} weeks, {} days (as of {as_of})",
        progress.gestational_weeks, progress.week_days
    );
    println!("Trimester:       {trimester}");
    if progress.days_until_due >= 0 {
        println!("Days until due:  {}", progress.days_until_due);
    } else {
        println!("Days past due:   {}", -progress.days_until_due);
    }

    if args.share {
        let mut params = ShareParams::new();
        match method {
            DueDateMethod::LastMenstrualPeriod {
                lmp,
                cycle_length_days,
            } => {
                params.push("lmp", lmp).push("cl", cycle_length_days);
            }
            DueDateMethod::Conception { date } => {
                params.push("conception", date);
            }
            DueDateMethod::Ultrasound {
                scan_date,
                gestational_weeks,
                gestational_days,
            } => {
                params
                    .push("scan", scan_date)
                    .push("weeks", gestational_weeks)
                    .push("days", gestational_days);
            }
        }
        println!("Share: due-date?{}", params.to_query_string());
    }

    Ok(())
}

/// Tanner mid-parental adult height prediction.
#[derive(Args, Debug)]
pub struct HeightArgs {
    /// Child's sex: male or female
    #[arg(short, long)]
    sex: String,

    /// Mother's height, e.g. 5'4", 64in, 163cm
    #[arg(short, long)]
    mother: String,

    /// Father's height, e.g. 5'10", 70in, 178cm
    #[arg(short, long)]
    father: String,
}

pub fn height(args: &HeightArgs) -> Result<()> {
    let prediction = height::predict_adult_height(
        parse_sex(&args.sex)?,
        parse_height(&args.mother)?,
        parse_height(&args.father)?,
    )?;

    let inches = |length: calc_core::models::Length| length.to(LengthUnit::Inches).value.round_dp(1);
    println!(
        "Predicted adult height: {} cm ({} in)",
        prediction.target.value,
        inches(prediction.target)
    );
    println!(
        "Expected range:         {} - {} cm",
        prediction.lower.value, prediction.upper.value
    );

    Ok(())
}

/// Ideal body weight under four published formulas.
#[derive(Args, Debug)]
pub struct IdealWeightArgs {
    /// Sex: male or female
    #[arg(short, long)]
    sex: String,

    /// Height, e.g. 5'10", 70in, 178cm
    #[arg(long)]
    height: String,
}

pub fn ideal_weight(args: &IdealWeightArgs) -> Result<()> {
    let result =
        ideal_weight::ideal_weight(parse_sex(&args.sex)?, parse_height(&args.height)?)?;

    let pounds =
        |weight: calc_core::models::Weight| weight.to(WeightUnit::Pounds).value.round_dp(1);
    println!(
        "Robinson: {} kg ({} lb)",
        result.robinson.value,
        pounds(result.robinson)
    );
    println!(
        "Miller:   {} kg ({} lb)",
        result.miller.value,
        pounds(result.miller)
    );
    println!(
        "Devine:   {} kg ({} lb)",
        result.devine.value,
        pounds(result.devine)
    );
    println!(
        "Hamwi:    {} kg ({} lb)",
        result.hamwi.value,
        pounds(result.hamwi)
    );
    println!(
        "Average:  {} kg ({} lb)",
        result.average.value,
        pounds(result.average)
    );

    Ok(())
}
