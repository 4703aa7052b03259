use anyhow::{Context, Result, anyhow};
use clap::Args;
use rust_decimal::Decimal;

use calc_core::ShareParams;
use calc_core::calculations::{
    CapitalGainsCalculator, CapitalGainsInput, PropertyTaxCalculator, PropertyTaxInput,
    PropertyTaxRate, cash_flow, markup,
};
use calc_core::models::{FilingStatus, HoldingTerm, RateTables};

use crate::format::{format_currency, format_percent, parse_date, parse_decimal};

fn load_tables() -> Result<RateTables> {
    calc_data::builtin_tables().context("loading built-in rate tables")
}

fn parse_filing_status(s: &str) -> Result<FilingStatus> {
    FilingStatus::parse(&s.to_ascii_uppercase())
        .ok_or_else(|| anyhow!("unknown filing status '{s}', expected S, MFJ, MFS, or HOH"))
}

/// Federal, state, and NIIT tax on an asset sale.
#[derive(Args, Debug)]
pub struct CapitalGainsArgs {
    /// Purchase price of the asset
    #[arg(long)]
    purchase: String,

    /// Sale price of the asset
    #[arg(long)]
    sale: String,

    /// Annual taxable income excluding this gain
    #[arg(short, long)]
    income: String,

    /// Filing status: S, MFJ, MFS, HOH
    #[arg(long, default_value = "S")]
    status: String,

    /// Two-letter state code
    #[arg(long)]
    state: String,

    /// Purchase date (YYYY-MM-DD)
    #[arg(long)]
    purchase_date: String,

    /// Sale date (YYYY-MM-DD)
    #[arg(long)]
    sale_date: String,

    /// Print a shareable parameter string
    #[arg(long)]
    share: bool,
}

pub fn capital_gains(args: &CapitalGainsArgs) -> Result<()> {
    let tables = load_tables()?;
    let input = CapitalGainsInput {
        purchase_price: parse_decimal(&args.purchase)?,
        sale_price: parse_decimal(&args.sale)?,
        annual_income: parse_decimal(&args.income)?,
        filing_status: parse_filing_status(&args.status)?,
        state: args.state.clone(),
        purchase_date: parse_date(&args.purchase_date)?,
        sale_date: parse_date(&args.sale_date)?,
    };

    let result = CapitalGainsCalculator::new(&tables).calculate(&input)?;

    let term = match result.term {
        HoldingTerm::LongTerm => "long-term",
        HoldingTerm::ShortTerm => "short-term",
    };
    println!(
        "Gain:        {} ({} days held, {term})",
        format_currency(result.gain),
        result.holding_days
    );
    println!(
        "Federal tax: {} at {}",
        format_currency(result.federal_tax),
        format_percent(result.federal_rate)
    );
    println!(
        "State tax:   {} at {}",
        format_currency(result.state_tax),
        format_percent(result.state_rate)
    );
    if result.niit > Decimal::ZERO {
        println!("NIIT:        {}", format_currency(result.niit));
    }
    println!("Total tax:   {}", format_currency(result.total_tax));
    println!("Net gain:    {}", format_currency(result.net_gain));

    if args.share {
        let mut params = ShareParams::new();
        params
            .push("purchase", input.purchase_price)
            .push("sale", input.sale_price)
            .push("income", input.annual_income)
            .push("status", input.filing_status.as_str())
            .push("state", &input.state)
            .push("pd", input.purchase_date)
            .push("sd", input.sale_date);
        println!("Share: capital-gains?{}", params.to_query_string());
    }

    Ok(())
}

/// Annual and monthly property tax for a home.
#[derive(Args, Debug)]
pub struct PropertyTaxArgs {
    /// Market value of the property
    #[arg(short, long)]
    value: String,

    /// Annual tax rate in percent, e.g. 1.1
    #[arg(short, long, conflicts_with = "state")]
    rate: Option<String>,

    /// Use a state's average effective rate instead of --rate
    #[arg(short, long)]
    state: Option<String>,

    /// Portion of market value that is assessed, in percent
    #[arg(long, default_value = "100")]
    assessment_ratio: String,

    /// Exemption subtracted from the assessed value
    #[arg(short, long, default_value = "0")]
    exemption: String,
}

pub fn property_tax(args: &PropertyTaxArgs) -> Result<()> {
    let tables = load_tables()?;
    let rate = match (&args.rate, &args.state) {
        (Some(rate), None) => PropertyTaxRate::AnnualPercent(parse_decimal(rate)?),
        (None, Some(state)) => PropertyTaxRate::StateAverage(state.clone()),
        _ => return Err(anyhow!("provide exactly one of --rate or --state")),
    };
    let input = PropertyTaxInput {
        market_value: parse_decimal(&args.value)?,
        rate,
        assessment_ratio_percent: parse_decimal(&args.assessment_ratio)?,
        exemption: parse_decimal(&args.exemption)?,
    };

    let result = PropertyTaxCalculator::new(&tables).calculate(&input)?;

    println!("Assessed value: {}", format_currency(result.assessed_value));
    println!("Annual tax:     {}", format_currency(result.annual_tax));
    println!("Monthly tax:    {}", format_currency(result.monthly_tax));
    println!(
        "Effective rate: {}%",
        result.effective_rate_percent
    );

    Ok(())
}

/// Price, profit, markup, and margin from any two of the three.
#[derive(Args, Debug)]
pub struct MarkupArgs {
    /// Cost of goods
    #[arg(short, long)]
    cost: String,

    /// Markup percentage to apply
    #[arg(short, long)]
    markup: Option<String>,

    /// Target margin percentage
    #[arg(long, conflicts_with = "markup")]
    margin: Option<String>,

    /// Actual selling price, to derive both percentages
    #[arg(short, long, conflicts_with_all = ["markup", "margin"])]
    revenue: Option<String>,
}

pub fn markup(args: &MarkupArgs) -> Result<()> {
    let cost = parse_decimal(&args.cost)?;
    let pricing = match (&args.markup, &args.margin, &args.revenue) {
        (Some(markup), None, None) => markup::price_from_markup(cost, parse_decimal(markup)?)?,
        (None, Some(margin), None) => markup::price_from_margin(cost, parse_decimal(margin)?)?,
        (None, None, Some(revenue)) => markup::analyze_sale(cost, parse_decimal(revenue)?)?,
        _ => return Err(anyhow!("provide exactly one of --markup, --margin, or --revenue")),
    };

    println!("Cost:    {}", format_currency(pricing.cost));
    println!("Price:   {}", format_currency(pricing.revenue));
    println!("Profit:  {}", format_currency(pricing.profit));
    println!("Markup:  {}%", pricing.markup_percent);
    println!("Margin:  {}%", pricing.margin_percent);

    Ok(())
}

/// Net present value of a yearly cash flow series.
#[derive(Args, Debug)]
pub struct NpvArgs {
    /// Annual discount rate in percent
    #[arg(short, long)]
    rate: String,

    /// Cash flows: first at time zero, then one per year
    #[arg(required = true, num_args = 2..)]
    flows: Vec<String>,
}

pub fn npv(args: &NpvArgs) -> Result<()> {
    let flows = parse_flows(&args.flows)?;
    let value = cash_flow::npv(parse_decimal(&args.rate)?, &flows)?;

    println!("NPV: {}", format_currency(value));

    Ok(())
}

/// Internal rate of return of a yearly cash flow series.
#[derive(Args, Debug)]
pub struct IrrArgs {
    /// Cash flows: first at time zero, then one per year
    #[arg(required = true, num_args = 2..)]
    flows: Vec<String>,
}

pub fn irr(args: &IrrArgs) -> Result<()> {
    let flows = parse_flows(&args.flows)?;
    let rate = cash_flow::irr(&flows)?;

    println!("IRR: {rate}%");

    Ok(())
}

fn parse_flows(raw: &[String]) -> Result<Vec<Decimal>> {
    raw.iter()
        .map(|s| parse_decimal(s).map_err(Into::into))
        .collect()
}
