//! Player insight builder
//!
//! Applies the trend calculator across a fixed set of volume and efficiency
//! metrics for one player. Each metric extracts its value from a weekly
//! record through the same closure for current, previous, and history, so
//! the gating rules (field presence, positive denominators) apply uniformly
//! per week.

use crate::models::{EfficiencyTrends, PlayerInsight, TrendData, VolumeTrends};
use crate::trend::{compute_trend_with_threshold, DEFAULT_TREND_THRESHOLD};
use stats_store::PlayerRecord;

/// Builds [`PlayerInsight`] records for individual players
#[derive(Debug, Clone)]
pub struct PlayerInsightBuilder {
    threshold: f64,
}

impl Default for PlayerInsightBuilder {
    fn default() -> Self {
        Self { threshold: DEFAULT_TREND_THRESHOLD }
    }
}

impl PlayerInsightBuilder {
    /// Create a builder with an explicit trend direction threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Build the full insight package for one player
    ///
    /// `history` is the player's chronological record list across the loaded
    /// weeks; weeks where the player was absent are already skipped.
    pub fn build(
        &self,
        current: &PlayerRecord,
        previous: Option<&PlayerRecord>,
        history: &[&PlayerRecord],
        season: i32,
        week: u32,
    ) -> PlayerInsight {
        let mut insight = PlayerInsight {
            player_id: current.player_id.clone(),
            player_name: current.player_name.clone(),
            position: current.position.clone(),
            team: current.team.clone(),
            week,
            season,
            volume_trends: self.volume_trends(current, previous, history),
            efficiency_trends: self.efficiency_trends(current, previous, history),
            touches_delta: None,
            fantasy_points_delta: None,
        };

        if let Some(previous) = previous {
            insight.touches_delta = Some(current.touches() as i64 - previous.touches() as i64);
            insight.fantasy_points_delta =
                Some(current.fantasy_points() - previous.fantasy_points());
        }

        insight
    }

    fn volume_trends(
        &self,
        current: &PlayerRecord,
        previous: Option<&PlayerRecord>,
        history: &[&PlayerRecord],
    ) -> VolumeTrends {
        // Touch share needs team-level totals to become a true share; until
        // then it carries raw opportunities as a single-point trend.
        let opportunities = current.opportunities();

        VolumeTrends {
            target_share: self.metric_trend(current, previous, history, |r| r.target_share),
            touch_share: (opportunities > 0)
                .then(|| TrendData::from_current(f64::from(opportunities))),
            carries: self.metric_trend(current, previous, history, |r| r.carries.map(f64::from)),
            targets: self.metric_trend(current, previous, history, |r| r.targets.map(f64::from)),
        }
    }

    fn efficiency_trends(
        &self,
        current: &PlayerRecord,
        previous: Option<&PlayerRecord>,
        history: &[&PlayerRecord],
    ) -> EfficiencyTrends {
        EfficiencyTrends {
            yards_per_carry: self.metric_trend(current, previous, history, |r| {
                let carries = r.carries_or_zero();
                (carries > 0).then(|| r.rushing_yards_or_zero() / f64::from(carries))
            }),
            yards_per_target: self.metric_trend(current, previous, history, |r| {
                let targets = r.targets_or_zero();
                (targets > 0).then(|| r.receiving_yards_or_zero() / f64::from(targets))
            }),
            catch_rate: self.metric_trend(current, previous, history, |r| {
                let targets = r.targets_or_zero();
                (targets > 0).then(|| f64::from(r.receptions_or_zero()) / f64::from(targets))
            }),
            yards_per_reception: self.metric_trend(current, previous, history, |r| {
                let receptions = r.receptions_or_zero();
                (receptions > 0).then(|| r.receiving_yards_or_zero() / f64::from(receptions))
            }),
            fantasy_points_per_touch: self.metric_trend(current, previous, history, |r| {
                let touches = r.touches();
                (touches > 0).then(|| r.fantasy_points() / f64::from(touches))
            }),
        }
    }

    /// Run one metric through the trend calculator
    ///
    /// The metric is computed only when `value` yields it for the current
    /// week; previous and history weeks that fail the gate are excluded from
    /// their position in the series rather than zero-filled.
    fn metric_trend<F>(
        &self,
        current: &PlayerRecord,
        previous: Option<&PlayerRecord>,
        history: &[&PlayerRecord],
        value: F,
    ) -> Option<TrendData>
    where
        F: Fn(&PlayerRecord) -> Option<f64>,
    {
        let current_value = value(current)?;
        let previous_value = previous.and_then(&value);
        let history_values: Vec<f64> = history.iter().filter_map(|r| value(r)).collect();

        Some(compute_trend_with_threshold(
            current_value,
            previous_value,
            &history_values,
            self.threshold,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendDirection;

    fn rb(carries: u32, rushing_yards: f64, receptions: u32, fantasy_points: f64) -> PlayerRecord {
        PlayerRecord {
            player_id: "00-rb".to_string(),
            player_name: "A. Back".to_string(),
            position: "RB".to_string(),
            team: "SEA".to_string(),
            carries: Some(carries),
            rushing_yards: Some(rushing_yards),
            receptions: Some(receptions),
            fantasy_points_ppr: Some(fantasy_points),
            ..Default::default()
        }
    }

    fn wr(targets: u32, receptions: u32, receiving_yards: f64, target_share: f64) -> PlayerRecord {
        PlayerRecord {
            player_id: "00-wr".to_string(),
            player_name: "T. Receiver".to_string(),
            position: "WR".to_string(),
            team: "DET".to_string(),
            targets: Some(targets),
            receptions: Some(receptions),
            receiving_yards: Some(receiving_yards),
            target_share: Some(target_share),
            ..Default::default()
        }
    }

    #[test]
    fn carries_trend_and_touches_delta() {
        let builder = PlayerInsightBuilder::default();
        let current = rb(15, 70.0, 2, 14.0);
        let previous = rb(10, 40.0, 2, 9.0);

        let insight =
            builder.build(&current, Some(&previous), &[&previous, &current], 2025, 6);

        let carries = insight.volume_trends.carries.unwrap();
        assert_eq!(carries.current_value, 15.0);
        assert_eq!(carries.delta, Some(5.0));
        assert_eq!(carries.delta_pct, Some(50.0));

        assert_eq!(insight.touches_delta, Some(5));
        assert_eq!(insight.fantasy_points_delta, Some(5.0));
    }

    #[test]
    fn yards_per_carry_tracks_both_weeks() {
        let builder = PlayerInsightBuilder::default();
        let current = rb(15, 70.0, 0, 0.0);
        let previous = rb(10, 40.0, 0, 0.0);

        let insight =
            builder.build(&current, Some(&previous), &[&previous, &current], 2025, 6);

        let ypc = insight.efficiency_trends.yards_per_carry.unwrap();
        assert!((ypc.current_value - 70.0 / 15.0).abs() < 1e-9);
        assert_eq!(ypc.previous_value, Some(4.0));
        assert!((ypc.delta.unwrap() - (70.0 / 15.0 - 4.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_carries_gates_out_yards_per_carry() {
        let builder = PlayerInsightBuilder::default();
        let current = rb(0, 50.0, 0, 0.0);

        let insight = builder.build(&current, None, &[&current], 2025, 6);

        assert!(insight.efficiency_trends.yards_per_carry.is_none());
    }

    #[test]
    fn gated_history_weeks_are_skipped_not_zeroed() {
        let builder = PlayerInsightBuilder::default();
        let w3 = rb(0, 0.0, 0, 0.0); // no carries, excluded from the series
        let w4 = rb(10, 40.0, 0, 0.0);
        let w5 = rb(12, 60.0, 0, 0.0);
        let w6 = rb(15, 75.0, 0, 0.0);

        let insight =
            builder.build(&w6, Some(&w5), &[&w3, &w4, &w5, &w6], 2025, 6);

        let ypc = insight.efficiency_trends.yards_per_carry.unwrap();
        assert_eq!(ypc.three_week_values, vec![4.0, 5.0, 5.0]);
    }

    #[test]
    fn absent_target_share_omits_the_metric() {
        let builder = PlayerInsightBuilder::default();
        let current = rb(10, 40.0, 1, 8.0);

        let insight = builder.build(&current, None, &[&current], 2025, 6);

        assert!(insight.volume_trends.target_share.is_none());
        // targets field absent on RBs too
        assert!(insight.volume_trends.targets.is_none());
    }

    #[test]
    fn target_share_regression_over_three_weeks() {
        let builder = PlayerInsightBuilder::default();
        let w4 = wr(6, 4, 50.0, 0.10);
        let w5 = wr(8, 5, 70.0, 0.20);
        let w6 = wr(10, 7, 90.0, 0.30);

        let insight = builder.build(&w6, Some(&w5), &[&w4, &w5, &w6], 2025, 6);

        let share = insight.volume_trends.target_share.unwrap();
        assert_eq!(share.three_week_values, vec![0.10, 0.20, 0.30]);
        assert!((share.slope.unwrap() - 0.10).abs() < 1e-9);
        assert_eq!(share.trend_direction, Some(TrendDirection::Rising));
        assert!((share.delta.unwrap() - 0.10).abs() < 1e-9);
    }

    #[test]
    fn touch_share_is_a_single_point_trend() {
        let builder = PlayerInsightBuilder::default();
        let mut current = rb(12, 50.0, 3, 10.0);
        current.targets = Some(4);

        let insight = builder.build(&current, None, &[&current], 2025, 6);

        let touch_share = insight.volume_trends.touch_share.unwrap();
        assert_eq!(touch_share.current_value, 16.0);
        assert_eq!(touch_share.delta, None);
        assert_eq!(touch_share.slope, None);
    }

    #[test]
    fn no_previous_record_means_no_deltas() {
        let builder = PlayerInsightBuilder::default();
        let current = rb(10, 40.0, 2, 9.0);

        let insight = builder.build(&current, None, &[&current], 2025, 1);

        assert_eq!(insight.touches_delta, None);
        assert_eq!(insight.fantasy_points_delta, None);
    }
}
