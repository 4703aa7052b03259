use anyhow::{Result, anyhow};
use chrono::Utc;
use clap::Args;

use calc_core::ShareParams;
use calc_core::calculations::amortization::{self, LoanInputs, PaymentFrequency};

use crate::format::{format_currency, parse_date, parse_decimal};

/// Schedule rows printed before truncating.
const MAX_SCHEDULE_ROWS: usize = 360;

/// Amortization schedule for a fixed-rate loan.
#[derive(Args, Debug)]
pub struct LoanArgs {
    /// Loan amount, e.g. 300000
    #[arg(short, long)]
    amount: String,

    /// Annual interest rate in percent, e.g. 6.5
    #[arg(short, long)]
    rate: String,

    /// Term in years
    #[arg(short = 'y', long)]
    years: u32,

    /// Payment frequency: monthly, biweekly, weekly
    #[arg(short, long, default_value = "monthly")]
    frequency: String,

    /// Extra payment applied to principal each period
    #[arg(short, long, default_value = "0")]
    extra: String,

    /// Date of the first payment (YYYY-MM-DD); defaults to today
    #[arg(long)]
    start_date: Option<String>,

    /// Print the full payment schedule
    #[arg(long)]
    schedule: bool,

    /// Print a shareable parameter string
    #[arg(long)]
    share: bool,
}

pub fn run(args: &LoanArgs) -> Result<()> {
    let frequency = PaymentFrequency::parse(&args.frequency)
        .ok_or_else(|| anyhow!("unknown frequency '{}'", args.frequency))?;
    let start_date = match &args.start_date {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let inputs = LoanInputs {
        principal: parse_decimal(&args.amount)?,
        annual_rate_percent: parse_decimal(&args.rate)?,
        term_periods: args.years * frequency.periods_per_year(),
        frequency,
        extra_payment: parse_decimal(&args.extra)?,
        start_date,
    };
    let result = amortization::build_schedule(&inputs)?;

    println!(
        "Payment:        {} ({})",
        format_currency(result.payment),
        frequency.as_str()
    );
    println!(
        "Periods:        {} (payoff {})",
        result.totals.periods, result.totals.payoff_date
    );
    println!("Total paid:     {}", format_currency(result.totals.total_paid));
    println!(
        "Total interest: {}",
        format_currency(result.totals.total_interest)
    );
    if let Some(comparison) = &result.comparison {
        println!(
            "Extra payments save {} in interest and {} periods.",
            format_currency(comparison.interest_saved),
            comparison.periods_saved
        );
    }

    if args.schedule {
        println!();
        println!(
            "{:>5}  {:>10}  {:>12}  {:>12}  {:>12}  {:>14}",
            "#", "date", "interest", "principal", "extra", "balance"
        );
        for period in result.periods.iter().take(MAX_SCHEDULE_ROWS) {
            println!(
                "{:>5}  {:>10}  {:>12}  {:>12}  {:>12}  {:>14}",
                period.index,
                period.date.to_string(),
                format_currency(period.interest),
                format_currency(period.principal),
                format_currency(period.extra),
                format_currency(period.balance)
            );
        }
        if result.periods.len() > MAX_SCHEDULE_ROWS {
            println!(
                "... {} further periods not shown",
                result.periods.len() - MAX_SCHEDULE_ROWS
            );
        }
    }

    if args.share {
        let mut params = ShareParams::new();
        params
            .push("amount", inputs.principal)
            .push("rate", inputs.annual_rate_percent)
            .push("years", args.years)
            .push("frequency", frequency.as_str())
            .push("extra", inputs.extra_payment)
            .push("start", inputs.start_date);
        println!("Share: loan?{}", params.to_query_string());
    }

    Ok(())
}
