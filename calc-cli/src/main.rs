mod commands;
mod format;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{finance, golf, loan, lookup, numbers};

/// A catalog of single-purpose financial, health, and math calculators.
#[derive(Parser, Debug)]
#[command(name = "calcforge")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Amortization schedule for a fixed-rate loan
    Loan(loan::LoanArgs),
    /// GCF and LCM of a list of integers
    Factors(numbers::FactorsArgs),
    /// Simplify a ratio or solve a proportion
    Ratio(numbers::RatioArgs),
    /// Compare rounding modes for a value
    Round(numbers::RoundArgs),
    /// Convert between length or weight units
    Convert(numbers::ConvertArgs),
    /// Solve a right triangle
    Triangle(numbers::TriangleArgs),
    /// Capital gains tax estimate
    CapitalGains(finance::CapitalGainsArgs),
    /// Property tax estimate
    PropertyTax(finance::PropertyTaxArgs),
    /// Markup, margin, and price
    Markup(finance::MarkupArgs),
    /// Net present value of a cash flow series
    Npv(finance::NpvArgs),
    /// Internal rate of return of a cash flow series
    Irr(finance::IrrArgs),
    /// Zodiac sign for a birth date
    Zodiac(lookup::ZodiacArgs),
    /// Pregnancy due date and progress
    DueDate(lookup::DueDateArgs),
    /// Predicted adult height from parental heights
    Height(lookup::HeightArgs),
    /// Ideal body weight under four formulas
    IdealWeight(lookup::IdealWeightArgs),
    /// Golf round history and handicap index
    #[command(subcommand)]
    Golf(golf::GolfCommand),
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Loan(args) => loan::run(args),
        Commands::Factors(args) => numbers::factors(args),
        Commands::Ratio(args) => numbers::ratio(args),
        Commands::Round(args) => numbers::round(args),
        Commands::Convert(args) => numbers::convert(args),
        Commands::Triangle(args) => numbers::triangle(args),
        Commands::CapitalGains(args) => finance::capital_gains(args),
        Commands::PropertyTax(args) => finance::property_tax(args),
        Commands::Markup(args) => finance::markup(args),
        Commands::Npv(args) => finance::npv(args),
        Commands::Irr(args) => finance::irr(args),
        Commands::Zodiac(args) => lookup::zodiac(args),
        Commands::DueDate(args) => lookup::due_date(args),
        Commands::Height(args) => lookup::height(args),
        Commands::IdealWeight(args) => lookup::ideal_weight(args),
        Commands::Golf(command) => golf::run(command).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(error) = logging::init(cli.log_file.as_deref()) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }

    if let Err(error) = run(&cli).await {
        // User-correctable input problems, printed as a single line.
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
