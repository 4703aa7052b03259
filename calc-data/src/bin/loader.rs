use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use calc_core::models::{FilingStatus, HoldingTerm};
use clap::Parser;
use calc_data::{RateTableLoader, default_niit};

/// Validate a replacement rate table set before deploying it.
///
/// Parses the bracket and state CSVs, assembles them into the same table
/// structure the calculators consume, and reports what was loaded. A
/// non-zero exit means the files would be rejected at runtime.
#[derive(Parser, Debug)]
#[command(name = "rate-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the bracket table CSV (term,filing_status,upper_income,rate)
    #[arg(short, long)]
    brackets: PathBuf,

    /// Path to the state rate CSV (state,capital_gains_rate,property_tax_rate)
    #[arg(short, long)]
    states: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let brackets_file = File::open(&args.brackets)
        .with_context(|| format!("Failed to open: {}", args.brackets.display()))?;
    let bracket_records = RateTableLoader::parse_brackets(brackets_file)
        .with_context(|| format!("Failed to parse CSV: {}", args.brackets.display()))?;
    println!(
        "Parsed {} bracket records from {}",
        bracket_records.len(),
        args.brackets.display()
    );

    let states_file = File::open(&args.states)
        .with_context(|| format!("Failed to open: {}", args.states.display()))?;
    let state_records = RateTableLoader::parse_state_rates(states_file)
        .with_context(|| format!("Failed to parse CSV: {}", args.states.display()))?;
    println!(
        "Parsed {} state records from {}",
        state_records.len(),
        args.states.display()
    );

    let tables = RateTableLoader::build(&bracket_records, &state_records, default_niit())
        .context("Failed to assemble rate tables")?;

    for term in [HoldingTerm::ShortTerm, HoldingTerm::LongTerm] {
        for status in FilingStatus::ALL {
            let brackets = tables.schedule(term, status).brackets().len();
            println!(
                "{:>5} / {:<3} schedule: {} brackets",
                term.as_str(),
                status.as_str(),
                brackets
            );
        }
    }
    println!("{} states loaded.", tables.state_count());
    println!("Tables are valid.");

    Ok(())
}
