//! # Insights Engine
//!
//! Derives week-over-week analytical insights from weekly NFL stat
//! snapshots: per-player volume and efficiency trends, team pace and usage
//! distribution metrics, and league-wide superlative leaderboards.
//!
//! The engine is a synchronous batch computation: the orchestrator loads up
//! to three weeks of snapshots from the [`stats_store`] persistence port,
//! fans out pure per-player and per-team calculations, ranks the results,
//! and writes a single output package back. No state survives across runs.

pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod player;
pub mod superlatives;
pub mod team;
pub mod trend;

pub use config::InsightsConfig;
pub use error::{InsightsError, Result};
pub use generator::InsightsGenerator;
pub use models::{
    InsightsOutput, PlayerInsight, RunRequest, RunSummary, Superlative, TeamInsight, TrendData,
    TrendDirection,
};
pub use player::PlayerInsightBuilder;
pub use superlatives::SuperlativesEngine;
pub use team::TeamInsightBuilder;
pub use trend::compute_trend;
