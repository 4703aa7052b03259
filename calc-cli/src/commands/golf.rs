use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};

use calc_core::calculations::handicap;
use calc_core::models::NewGolfRound;
use calc_core::store::{RoundStore, StoreConfig, StoreRegistry};
use calc_store_sqlite::SqliteStoreFactory;

use crate::format::{parse_date, parse_decimal};

/// Golf round history and handicap index.
#[derive(Subcommand, Debug)]
pub enum GolfCommand {
    /// Record a round
    Add(AddArgs),
    /// List stored rounds, most recent first
    List,
    /// Compute the handicap index from the stored rounds
    Handicap,
    /// Delete a round by id
    Remove {
        /// The id shown by `golf list`
        id: i64,
    },
    /// Delete all stored rounds
    Clear,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Date the round was played (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<String>,

    /// Adjusted gross score
    #[arg(long)]
    score: i32,

    /// Course rating from the tee box played, e.g. 72.3
    #[arg(long)]
    rating: String,

    /// Slope rating from the tee box played, 55-155
    #[arg(long)]
    slope: i32,
}

/// Connection string for the round store; the `CALC_FORGE_DB` environment
/// variable overrides the default file next to the working directory.
fn database_url() -> String {
    std::env::var("CALC_FORGE_DB").unwrap_or_else(|_| "sqlite:golf.db?mode=rwc".to_string())
}

async fn open_store() -> Result<Box<dyn RoundStore>> {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));

    let config = StoreConfig {
        backend: "sqlite".to_string(),
        connection_string: database_url(),
    };
    registry
        .create(&config)
        .await
        .context("opening the round store")
}

pub async fn run(command: &GolfCommand) -> Result<()> {
    let store = open_store().await?;
    match command {
        GolfCommand::Add(args) => add(store.as_ref(), args).await,
        GolfCommand::List => list(store.as_ref()).await,
        GolfCommand::Handicap => handicap(store.as_ref()).await,
        GolfCommand::Remove { id } => remove(store.as_ref(), *id).await,
        GolfCommand::Clear => clear(store.as_ref()).await,
    }
}

async fn add(
    store: &dyn RoundStore,
    args: &AddArgs,
) -> Result<()> {
    let course_rating = parse_decimal(&args.rating)?;
    // Reject bad values before they reach the store.
    handicap::differential(args.score, course_rating, args.slope)?;

    let played_on = match &args.date {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let round = store
        .add_round(NewGolfRound {
            played_on,
            score: args.score,
            course_rating,
            slope_rating: args.slope,
        })
        .await?;

    let count = store.round_count().await?;
    println!("Recorded round #{} ({count} rounds stored).", round.id);

    Ok(())
}

async fn list(store: &dyn RoundStore) -> Result<()> {
    let rounds = store.list_rounds().await?;
    if rounds.is_empty() {
        println!("No rounds stored yet.");
        return Ok(());
    }

    println!(
        "{:>4}  {:>10}  {:>5}  {:>6}  {:>5}  {:>6}",
        "id", "played", "score", "rating", "slope", "diff"
    );
    for round in &rounds {
        let differential =
            handicap::differential(round.score, round.course_rating, round.slope_rating)?;
        println!(
            "{:>4}  {:>10}  {:>5}  {:>6}  {:>5}  {:>6}",
            round.id,
            round.played_on.to_string(),
            round.score,
            round.course_rating,
            round.slope_rating,
            differential
        );
    }

    Ok(())
}

async fn handicap(store: &dyn RoundStore) -> Result<()> {
    let rounds = store.list_rounds().await?;
    let index = handicap::handicap_index(&rounds)?;

    println!("Handicap index: {index} (from {} rounds)", rounds.len());

    Ok(())
}

async fn remove(
    store: &dyn RoundStore,
    id: i64,
) -> Result<()> {
    store
        .delete_round(id)
        .await
        .with_context(|| format!("deleting round {id}"))?;
    println!("Deleted round #{id}.");

    Ok(())
}

async fn clear(store: &dyn RoundStore) -> Result<()> {
    store.clear_rounds().await?;
    println!("Cleared all stored rounds.");

    Ok(())
}
