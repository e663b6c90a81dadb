//! Team insight builder
//!
//! Aggregates team-level stats from player records, runs pace metrics
//! through the trend calculator, and computes distributional usage metrics:
//! Shannon entropy over running-back touches and the top-N receiver target
//! distribution.

use crate::models::{TeamInsight, TeamStats, TrendData};
use crate::trend::{compute_trend_with_threshold, DEFAULT_TREND_THRESHOLD};
use stats_store::PlayerRecord;
use std::collections::BTreeMap;

/// Builds [`TeamInsight`] records from per-team player subsets
#[derive(Debug, Clone)]
pub struct TeamInsightBuilder {
    threshold: f64,
    wr_distribution_size: usize,
}

impl Default for TeamInsightBuilder {
    fn default() -> Self {
        Self { threshold: DEFAULT_TREND_THRESHOLD, wr_distribution_size: 3 }
    }
}

/// Aggregate team-level stats from one week's player records
///
/// Pass attempts count quarterbacks only; rush attempts count every
/// position. Yardage and touchdowns sum the passing, rushing, and receiving
/// categories across the roster.
pub fn aggregate_team_stats(team: &str, players: &[&PlayerRecord]) -> TeamStats {
    let mut stats = TeamStats { team: team.to_string(), ..Default::default() };

    for player in players {
        if player.position == "QB" {
            stats.pass_attempts += player.attempts_or_zero();
        }
        stats.rush_attempts += player.carries_or_zero();

        stats.total_yards += player.passing_yards_or_zero()
            + player.rushing_yards_or_zero()
            + player.receiving_yards_or_zero();

        stats.total_tds += player.passing_tds.unwrap_or(0)
            + player.rushing_tds.unwrap_or(0)
            + player.receiving_tds.unwrap_or(0);
    }

    stats
}

impl TeamInsightBuilder {
    /// Create a builder with explicit tuning
    pub fn new(threshold: f64, wr_distribution_size: usize) -> Self {
        Self { threshold, wr_distribution_size }
    }

    /// Build the full insight package for one team
    ///
    /// `history` carries the team's aggregated stats per loaded week, oldest
    /// first; weeks where the team fielded no players are already skipped.
    pub fn build(
        &self,
        team: &str,
        current: &TeamStats,
        previous: Option<&TeamStats>,
        history: &[TeamStats],
        current_players: &[&PlayerRecord],
        season: i32,
        week: u32,
    ) -> TeamInsight {
        TeamInsight {
            team: team.to_string(),
            week,
            season,
            plays_per_game: self.plays_per_game_trend(current, previous, history),
            pass_rate: self.pass_rate_trend(current, previous, history),
            rb_committee_entropy: rb_committee_entropy(current_players),
            wr_target_distribution: self.wr_target_distribution(current_players),
        }
    }

    fn plays_per_game_trend(
        &self,
        current: &TeamStats,
        previous: Option<&TeamStats>,
        history: &[TeamStats],
    ) -> TrendData {
        // Weeks with zero recorded plays are skipped, not zero-filled
        let previous_plays =
            previous.map(|s| f64::from(s.plays())).filter(|plays| *plays > 0.0);
        let history_plays: Vec<f64> = history
            .iter()
            .map(|s| f64::from(s.plays()))
            .filter(|plays| *plays > 0.0)
            .collect();

        compute_trend_with_threshold(
            f64::from(current.plays()),
            previous_plays,
            &history_plays,
            self.threshold,
        )
    }

    fn pass_rate_trend(
        &self,
        current: &TeamStats,
        previous: Option<&TeamStats>,
        history: &[TeamStats],
    ) -> TrendData {
        // A team aggregate always exists, so a zero play total reads as a
        // 0.0 rate for the current week instead of being omitted
        let current_rate = pass_rate(current).unwrap_or(0.0);
        let previous_rate = previous.and_then(pass_rate);
        let history_rates: Vec<f64> = history.iter().filter_map(pass_rate).collect();

        compute_trend_with_threshold(current_rate, previous_rate, &history_rates, self.threshold)
    }

    fn wr_target_distribution(&self, players: &[&PlayerRecord]) -> BTreeMap<String, f64> {
        let mut receivers: Vec<&&PlayerRecord> = players
            .iter()
            .filter(|p| p.position == "WR" && p.targets_or_zero() > 0)
            .collect();

        let total_targets: u32 = receivers.iter().map(|p| p.targets_or_zero()).sum();
        if total_targets == 0 {
            return BTreeMap::new();
        }

        receivers.sort_by(|a, b| b.targets_or_zero().cmp(&a.targets_or_zero()));
        receivers
            .iter()
            .take(self.wr_distribution_size)
            .map(|p| {
                let share = f64::from(p.targets_or_zero()) / f64::from(total_targets);
                (p.player_name.clone(), round3(share))
            })
            .collect()
    }
}

/// Shannon entropy (base 2) of the running-back touch distribution
///
/// Backs with zero touches are excluded. Higher values mean touches are
/// spread across a committee; 0.0 means a single bellcow or no qualifying
/// backs at all.
pub fn rb_committee_entropy(players: &[&PlayerRecord]) -> f64 {
    let touches: Vec<f64> = players
        .iter()
        .filter(|p| p.position == "RB")
        .map(|p| f64::from(p.touches()))
        .filter(|t| *t > 0.0)
        .collect();

    let total: f64 = touches.iter().sum();
    if total == 0.0 {
        return 0.0;
    }

    let entropy: f64 = touches
        .iter()
        .map(|t| {
            let p = t / total;
            -p * p.log2()
        })
        .sum();

    round3(entropy)
}

fn pass_rate(stats: &TeamStats) -> Option<f64> {
    let total = stats.plays();
    (total > 0).then(|| f64::from(stats.pass_attempts) / f64::from(total))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, position: &str) -> PlayerRecord {
        PlayerRecord {
            player_id: format!("00-{name}"),
            player_name: name.to_string(),
            position: position.to_string(),
            team: "SEA".to_string(),
            ..Default::default()
        }
    }

    fn rb(name: &str, carries: u32, receptions: u32) -> PlayerRecord {
        PlayerRecord {
            carries: Some(carries),
            receptions: Some(receptions),
            ..player(name, "RB")
        }
    }

    fn wr(name: &str, targets: u32) -> PlayerRecord {
        PlayerRecord { targets: Some(targets), ..player(name, "WR") }
    }

    fn stats(pass_attempts: u32, rush_attempts: u32) -> TeamStats {
        TeamStats {
            team: "SEA".to_string(),
            pass_attempts,
            rush_attempts,
            ..Default::default()
        }
    }

    #[test]
    fn aggregation_counts_qb_attempts_only() {
        let qb = PlayerRecord {
            attempts: Some(30),
            passing_yards: Some(250.0),
            passing_tds: Some(2),
            carries: Some(3),
            rushing_yards: Some(12.0),
            ..player("Q. Back", "QB")
        };
        let flanker = PlayerRecord {
            attempts: Some(1), // trick play, not a QB attempt
            receiving_yards: Some(80.0),
            receiving_tds: Some(1),
            ..player("T. Receiver", "WR")
        };
        let back = PlayerRecord {
            carries: Some(18),
            rushing_yards: Some(90.0),
            ..player("A. Back", "RB")
        };

        let records = [&qb, &flanker, &back];
        let stats = aggregate_team_stats("SEA", &records);

        assert_eq!(stats.pass_attempts, 30);
        assert_eq!(stats.rush_attempts, 21);
        assert_eq!(stats.total_yards, 432.0);
        assert_eq!(stats.total_tds, 3);
        assert_eq!(stats.plays(), 51);
    }

    #[test]
    fn even_committee_has_one_bit_of_entropy() {
        let a = rb("A. Back", 8, 2);
        let b = rb("B. Back", 10, 0);
        let records = [&a, &b];

        assert_eq!(rb_committee_entropy(&records), 1.0);
    }

    #[test]
    fn bellcow_with_idle_backup_has_zero_entropy() {
        let bellcow = rb("A. Back", 22, 4);
        let backup = rb("B. Back", 0, 0);
        let records = [&bellcow, &backup];

        assert_eq!(rb_committee_entropy(&records), 0.0);
    }

    #[test]
    fn no_running_backs_means_zero_entropy() {
        let receiver = wr("T. Receiver", 9);
        let records = [&receiver];

        assert_eq!(rb_committee_entropy(&records), 0.0);
    }

    #[test]
    fn three_way_committee_entropy_rounded() {
        let a = rb("A. Back", 10, 0);
        let b = rb("B. Back", 5, 0);
        let c = rb("C. Back", 5, 0);
        let records = [&a, &b, &c];

        // 0.5 * 1 + 2 * (0.25 * 2) = 1.5 bits
        assert_eq!(rb_committee_entropy(&records), 1.5);
    }

    #[test]
    fn wr_distribution_takes_top_three_by_targets() {
        let builder = TeamInsightBuilder::default();
        let w1 = wr("Alpha", 10);
        let w2 = wr("Bravo", 6);
        let w3 = wr("Charlie", 3);
        let w4 = wr("Delta", 1);
        let idle = wr("Echo", 0);
        let records = [&w1, &w2, &w3, &w4, &idle];

        let distribution = builder.wr_target_distribution(&records);

        assert_eq!(distribution.len(), 3);
        assert_eq!(distribution.get("Alpha"), Some(&0.5));
        assert_eq!(distribution.get("Bravo"), Some(&0.3));
        assert_eq!(distribution.get("Charlie"), Some(&0.15));
        assert_eq!(distribution.get("Delta"), None);
    }

    #[test]
    fn no_targeted_receivers_means_empty_distribution() {
        let builder = TeamInsightBuilder::default();
        let back = rb("A. Back", 12, 3);
        let records = [&back];

        assert!(builder.wr_target_distribution(&records).is_empty());
    }

    #[test]
    fn pass_rate_zero_when_no_plays() {
        let builder = TeamInsightBuilder::default();
        let current = stats(0, 0);

        let insight = builder.build("SEA", &current, None, &[], &[], 2025, 6);

        assert_eq!(insight.pass_rate.current_value, 0.0);
        assert_eq!(insight.plays_per_game.current_value, 0.0);
    }

    #[test]
    fn pace_trends_run_through_the_calculator() {
        let builder = TeamInsightBuilder::default();
        let w4 = stats(30, 25);
        let w5 = stats(32, 28);
        let w6 = stats(38, 24);
        let history = vec![w4.clone(), w5.clone(), w6.clone()];

        let insight = builder.build("SEA", &w6, Some(&w5), &history, &[], 2025, 6);

        assert_eq!(insight.plays_per_game.current_value, 62.0);
        assert_eq!(insight.plays_per_game.delta, Some(2.0));
        assert_eq!(insight.plays_per_game.three_week_values, vec![55.0, 60.0, 62.0]);
        assert!(insight.plays_per_game.slope.is_some());

        let expected_rate = 38.0 / 62.0;
        assert!((insight.pass_rate.current_value - expected_rate).abs() < 1e-9);
        assert_eq!(insight.pass_rate.previous_value, Some(32.0 / 60.0));
    }

    #[test]
    fn zero_play_history_weeks_are_skipped() {
        let builder = TeamInsightBuilder::default();
        let bye = stats(0, 0);
        let w5 = stats(30, 30);
        let w6 = stats(31, 29);
        let history = vec![bye, w5.clone(), w6.clone()];

        let insight = builder.build("SEA", &w6, Some(&w5), &history, &[], 2025, 6);

        // Only two usable points, so no regression fields
        assert!(insight.plays_per_game.three_week_values.is_empty());
        assert_eq!(insight.plays_per_game.slope, None);
    }
}
