//! Data model for derived insights
//!
//! Everything here is created fresh per generation run, serialized to the
//! stats store, and discarded. Optional fields are skipped when serializing
//! so that a rerun over identical snapshots is byte-stable apart from
//! `generated_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of a three-week metric trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

/// A metric compared across one, two, or three weeks
///
/// `delta`/`delta_pct` are present only with a previous value, and the
/// regression fields (`slope`, `projected_next`, `trend_direction`,
/// `three_week_values`) only with at least three history points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendData {
    pub current_value: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_pct: Option<f64>,

    /// Chronological values feeding the regression, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub three_week_values: Vec<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_direction: Option<TrendDirection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slope: Option<f64>,

    /// Regression projection for next week, clamped to zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_next: Option<f64>,
}

impl TrendData {
    /// A trend with only the current value observed
    pub fn from_current(current_value: f64) -> Self {
        Self { current_value, ..Default::default() }
    }
}

/// Volume-related trends for a player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeTrends {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_share: Option<TrendData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch_share: Option<TrendData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carries: Option<TrendData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<TrendData>,
}

/// Efficiency-related trends for a player
///
/// Each ratio is gated on a positive denominator per week; weeks failing the
/// gate are excluded from the series rather than zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyTrends {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yards_per_carry: Option<TrendData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yards_per_target: Option<TrendData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catch_rate: Option<TrendData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yards_per_reception: Option<TrendData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fantasy_points_per_touch: Option<TrendData>,
}

/// Complete insight package for one player in one week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInsight {
    pub player_id: String,
    pub player_name: String,
    pub position: String,
    pub team: String,
    pub week: u32,
    pub season: i32,

    #[serde(default)]
    pub volume_trends: VolumeTrends,

    #[serde(default)]
    pub efficiency_trends: EfficiencyTrends,

    /// Week-over-week change in carries + receptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touches_delta: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fantasy_points_delta: Option<f64>,
}

/// Team-level stats aggregated from a week's player records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team: String,
    pub pass_attempts: u32,
    pub rush_attempts: u32,
    pub total_yards: f64,
    pub total_tds: u32,
}

impl TeamStats {
    /// Total offensive plays, approximated as pass + rush attempts
    pub fn plays(&self) -> u32 {
        self.pass_attempts + self.rush_attempts
    }
}

/// Complete insight package for one team in one week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamInsight {
    pub team: String,
    pub week: u32,
    pub season: i32,

    pub plays_per_game: TrendData,
    pub pass_rate: TrendData,

    /// Shannon entropy (bits) of RB touch distribution; higher = committee
    pub rb_committee_entropy: f64,

    /// Top receivers by target count, name -> share of WR targets
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub wr_target_distribution: BTreeMap<String, f64>,
}

/// A league-wide ranked award for extreme week-over-week change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Superlative {
    pub category: String,
    pub subcategory: String,
    pub award_name: String,
    pub player_id: String,
    pub player_name: String,
    pub position: String,
    pub team: String,
    pub value: f64,
    pub metric_name: String,
    pub week: u32,
    pub season: i32,

    /// 1 = most extreme, reset per award family
    pub rank: u32,
}

/// Extra metadata carried when an output compares two arbitrary weeks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonInfo {
    pub week_from: u32,
    pub week_to: u32,
    pub week_delta: u32,
}

/// Counts and provenance attached to every output package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputMetadata {
    pub total_players: usize,
    pub total_teams: usize,
    pub total_superlatives: usize,

    /// Weeks loaded to build the trend window, ascending
    pub weeks_analyzed: Vec<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonInfo>,
}

/// Complete output package for one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsOutput {
    pub season: i32,
    pub week: u32,
    pub generated_at: DateTime<Utc>,

    pub player_insights: Vec<PlayerInsight>,
    pub team_insights: Vec<TeamInsight>,
    pub superlatives: Vec<Superlative>,

    pub metadata: OutputMetadata,
}

/// Stand-alone superlatives record written next to the insights package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperlativesRecord {
    pub season: i32,
    pub week: u32,
    pub superlatives: Vec<Superlative>,
    pub timestamp: DateTime<Utc>,
}

/// Superlatives record for a two-week comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSuperlativesRecord {
    pub season: i32,
    pub week_from: u32,
    pub week_to: u32,
    pub week_delta: u32,
    pub superlatives: Vec<Superlative>,
    pub timestamp: DateTime<Utc>,
}

/// Invocation parameters; absent weeks are derived from ingest metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_from: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_to: Option<u32>,
}

/// Structured result of a successful run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub season: i32,
    pub week_from: u32,
    pub week_to: u32,
    pub total_players: usize,
    pub total_teams: usize,
    pub total_superlatives: usize,
    pub weeks_analyzed: Vec<u32>,
}

/// Outcome of one pair within a whole-season comparison sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub week_from: u32,
    pub week_to: u32,
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superlatives: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComparisonResult {
    pub fn success(week_from: u32, week_to: u32, insights: usize, superlatives: usize) -> Self {
        Self {
            week_from,
            week_to,
            status: "success".to_string(),
            insights: Some(insights),
            superlatives: Some(superlatives),
            error: None,
        }
    }

    pub fn failure(week_from: u32, week_to: u32, error: String) -> Self {
        Self {
            week_from,
            week_to,
            status: "error".to_string(),
            insights: None,
            superlatives: None,
            error: Some(error),
        }
    }
}

/// Summary of every comparison pair computed for a season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub season: i32,
    pub available_weeks: Vec<u32>,
    pub total_combinations: usize,
    pub results: Vec<ComparisonResult>,
    pub successful: usize,
    pub failed: usize,
}
