//! # Insights CLI Binary
//!
//! Command-line interface for generating and inspecting week-over-week
//! insights against a local data directory.

use anyhow::Result;
use clap::{Parser, Subcommand};
use insights_engine::{InsightsConfig, InsightsGenerator, RunRequest};
use stats_store::{LocalBlobStore, StatsStore};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "insights-cli")]
#[command(about = "Generate and inspect NFL week-over-week insights")]
struct Cli {
    /// Data directory backing the local blob store
    #[arg(long, default_value = "./nfl_data")]
    data_dir: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the week-over-week generation; missing weeks derive from metadata
    Generate {
        #[arg(long)]
        season: Option<i32>,

        #[arg(long)]
        week_from: Option<u32>,

        #[arg(long)]
        week_to: Option<u32>,
    },

    /// Compare two arbitrary weeks of a season
    Compare {
        #[arg(long)]
        season: i32,

        #[arg(long)]
        week_from: u32,

        #[arg(long)]
        week_to: u32,
    },

    /// Compute comparisons for every week pair of a season
    CompareAll {
        #[arg(long)]
        season: i32,
    },

    /// Print the latest insights record
    ShowLatest,

    /// List weeks with stored snapshots for a season
    Weeks {
        #[arg(long)]
        season: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => InsightsConfig::load_from_file(path)?,
        None => InsightsConfig::default(),
    };
    config.store.data_dir = cli.data_dir.clone();

    let blobs = Arc::new(LocalBlobStore::new(&config.store.data_dir));
    let store = StatsStore::new(blobs);
    let generator = InsightsGenerator::new(store.clone(), &config);

    match cli.command {
        Command::Generate { season, week_from, week_to } => {
            let summary = generator.run(RunRequest { season, week_from, week_to }).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Compare { season, week_from, week_to } => {
            let summary = generator.compare(season, week_from, week_to).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::CompareAll { season } => {
            let summary = generator.compare_all(season).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::ShowLatest => match store.read_latest_insights().await? {
            Some(latest) => println!("{}", serde_json::to_string_pretty(&latest)?),
            None => println!("no insights generated yet"),
        },
        Command::Weeks { season } => {
            let weeks = store.available_weeks(season).await?;
            println!("{}", serde_json::to_string_pretty(&weeks)?);
        }
    }

    Ok(())
}
