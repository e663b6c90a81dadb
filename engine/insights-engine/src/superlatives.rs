//! Superlatives engine
//!
//! Ranks all player insights by specific metric deltas into league-wide
//! "award" leaderboards. Players lacking a metric are excluded from that
//! ranking rather than defaulted to zero, which would corrupt the order.
//! All sorts are stable, so ties keep encounter order.

use crate::models::{PlayerInsight, Superlative};
use std::cmp::Ordering;

/// Sort order for a leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Highest value first (gainers/improvers)
    Descending,
    /// Lowest value first (losers)
    Ascending,
}

/// Generates ranked superlative leaderboards from player insights
#[derive(Debug, Clone)]
pub struct SuperlativesEngine {
    top_n: usize,
}

impl Default for SuperlativesEngine {
    fn default() -> Self {
        Self { top_n: 3 }
    }
}

impl SuperlativesEngine {
    /// Create an engine with an explicit leaderboard size
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Generate every award family for a given week
    pub fn generate_all(
        &self,
        insights: &[PlayerInsight],
        season: i32,
        week: u32,
    ) -> Vec<Superlative> {
        let mut superlatives = Vec::new();

        // Volume awards
        superlatives.extend(self.award(
            insights,
            |i| i.volume_trends.target_share.as_ref().and_then(|t| t.delta),
            Direction::Descending,
            "volume",
            "target_share",
            "Target Share Gainer",
            "target_share_delta",
            season,
            week,
        ));
        // Losers cover genuine losses only, so the list may run short
        superlatives.extend(self.award(
            insights,
            |i| {
                i.volume_trends
                    .target_share
                    .as_ref()
                    .and_then(|t| t.delta)
                    .filter(|delta| *delta < 0.0)
            },
            Direction::Ascending,
            "volume",
            "target_share",
            "Target Share Loser",
            "target_share_delta",
            season,
            week,
        ));
        superlatives.extend(self.award(
            insights,
            |i| i.touches_delta.map(|d| d as f64),
            Direction::Descending,
            "volume",
            "touches",
            "Touches Gainer",
            "touches_delta",
            season,
            week,
        ));

        // Efficiency awards: improvers only
        superlatives.extend(self.award(
            insights,
            |i| {
                i.efficiency_trends
                    .yards_per_carry
                    .as_ref()
                    .and_then(|t| t.delta)
                    .filter(|delta| *delta > 0.0)
            },
            Direction::Descending,
            "efficiency",
            "yards_per_carry",
            "YPC Improver",
            "yards_per_carry_delta",
            season,
            week,
        ));
        superlatives.extend(self.award(
            insights,
            |i| {
                i.efficiency_trends
                    .catch_rate
                    .as_ref()
                    .and_then(|t| t.delta)
                    .filter(|delta| *delta > 0.0)
            },
            Direction::Descending,
            "efficiency",
            "catch_rate",
            "Catch Rate Improver",
            "catch_rate_delta",
            season,
            week,
        ));

        // Fantasy scoring awards
        superlatives.extend(self.award(
            insights,
            |i| i.fantasy_points_delta,
            Direction::Descending,
            "fantasy_performance",
            "fantasy_points_ppr",
            "Fantasy Points Gainer",
            "fantasy_points_delta",
            season,
            week,
        ));

        superlatives
    }

    /// Build one ranked award family
    #[allow(clippy::too_many_arguments)]
    fn award<F>(
        &self,
        insights: &[PlayerInsight],
        metric: F,
        direction: Direction,
        category: &str,
        subcategory: &str,
        award_label: &str,
        metric_name: &str,
        season: i32,
        week: u32,
    ) -> Vec<Superlative>
    where
        F: Fn(&PlayerInsight) -> Option<f64>,
    {
        let mut ranked: Vec<(&PlayerInsight, f64)> =
            insights.iter().filter_map(|i| metric(i).map(|v| (i, v))).collect();

        // Stable sort: ties keep encounter order on both paths
        ranked.sort_by(|a, b| {
            let ordering = a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);
            match direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });
        ranked.truncate(self.top_n);

        ranked
            .into_iter()
            .enumerate()
            .map(|(index, (insight, value))| {
                let rank = index as u32 + 1;
                Superlative {
                    category: category.to_string(),
                    subcategory: subcategory.to_string(),
                    award_name: format!("{award_label} (Rank {rank})"),
                    player_id: insight.player_id.clone(),
                    player_name: insight.player_name.clone(),
                    position: insight.position.clone(),
                    team: insight.team.clone(),
                    value,
                    metric_name: metric_name.to_string(),
                    week,
                    season,
                    rank,
                }
            })
            .collect()
    }
}
