//! Stored data model for weekly stat snapshots
//!
//! These records are produced by the ingestion pipeline and consumed
//! read-only by the insights engine. Counting stats are optional: an absent
//! field means "not recorded", which gates downstream metric computation,
//! while the `*_or_zero` accessors zero-fill for plain summation.

use serde::{Deserialize, Deserializer, Serialize};

/// One player's stat line for a single season/week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default)]
    pub player_id: String,

    #[serde(default)]
    pub player_name: String,

    #[serde(default)]
    pub position: String,

    #[serde(default)]
    pub team: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,

    /// Rush attempts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carries: Option<u32>,

    /// Pass targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receptions: Option<u32>,

    /// Pass attempts (quarterbacks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing_yards: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rushing_yards: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiving_yards: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing_tds: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rushing_tds: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiving_tds: Option<u32>,

    /// Fraction of the team's pass targets this player received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_share: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fantasy_points_ppr: Option<f64>,
}

impl PlayerRecord {
    pub fn carries_or_zero(&self) -> u32 {
        self.carries.unwrap_or(0)
    }

    pub fn targets_or_zero(&self) -> u32 {
        self.targets.unwrap_or(0)
    }

    pub fn receptions_or_zero(&self) -> u32 {
        self.receptions.unwrap_or(0)
    }

    pub fn attempts_or_zero(&self) -> u32 {
        self.attempts.unwrap_or(0)
    }

    pub fn rushing_yards_or_zero(&self) -> f64 {
        self.rushing_yards.unwrap_or(0.0)
    }

    pub fn receiving_yards_or_zero(&self) -> f64 {
        self.receiving_yards.unwrap_or(0.0)
    }

    pub fn passing_yards_or_zero(&self) -> f64 {
        self.passing_yards.unwrap_or(0.0)
    }

    pub fn fantasy_points(&self) -> f64 {
        self.fantasy_points_ppr.unwrap_or(0.0)
    }

    /// Touches: carries + receptions
    pub fn touches(&self) -> u32 {
        self.carries_or_zero() + self.receptions_or_zero()
    }

    /// Opportunities: carries + targets
    pub fn opportunities(&self) -> u32 {
        self.carries_or_zero() + self.targets_or_zero()
    }
}

/// One season/week's full roster of player stat lines
///
/// Immutable once written by the ingestion pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklySnapshot {
    pub season: i32,
    pub week: u32,

    /// Player records in stored order. Older snapshots wrapped the list in a
    /// `data` object, so both shapes deserialize.
    #[serde(
        default,
        alias = "data",
        deserialize_with = "deserialize_players"
    )]
    pub players: Vec<PlayerRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Ingest metadata describing the most recently fetched season/week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsMetadata {
    pub current_season: i32,
    pub current_week: u32,

    #[serde(default)]
    pub weeks_available: Vec<u32>,
}

/// Accepts either a bare player list or the legacy `{ "players": [...] }` wrapper
fn deserialize_players<'de, D>(deserializer: D) -> std::result::Result<Vec<PlayerRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PlayerList {
        Flat(Vec<PlayerRecord>),
        Wrapped { players: Vec<PlayerRecord> },
    }

    Ok(match PlayerList::deserialize(deserializer)? {
        PlayerList::Flat(players) => players,
        PlayerList::Wrapped { players } => players,
    })
}
