//! Insights orchestrator
//!
//! Resolves which weeks to analyze, loads and indexes their snapshots, fans
//! out the player and team builders, ranks superlatives, and persists the
//! assembled output package. Fail-closed: the first error aborts the run
//! and nothing is written.

use crate::config::InsightsConfig;
use crate::error::{InsightsError, Result};
use crate::models::{
    ComparisonInfo, ComparisonResult, ComparisonSummary, ComparisonSuperlativesRecord,
    InsightsOutput, OutputMetadata, PlayerInsight, RunRequest, RunSummary, SuperlativesRecord,
    TeamInsight,
};
use crate::player::PlayerInsightBuilder;
use crate::superlatives::SuperlativesEngine;
use crate::team::{aggregate_team_stats, TeamInsightBuilder};
use chrono::Utc;
use stats_store::{PlayerRecord, StatsStore, WeeklySnapshot};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{error, info};

/// Orchestrates one insights generation run end to end
pub struct InsightsGenerator {
    store: StatsStore,
    players: PlayerInsightBuilder,
    teams: TeamInsightBuilder,
    superlatives: SuperlativesEngine,
}

impl InsightsGenerator {
    /// Create a generator over a stats store with the given tuning
    pub fn new(store: StatsStore, config: &InsightsConfig) -> Self {
        Self {
            store,
            players: PlayerInsightBuilder::new(config.trend_threshold),
            teams: TeamInsightBuilder::new(config.trend_threshold, config.wr_distribution_size),
            superlatives: SuperlativesEngine::new(config.leaderboard_size),
        }
    }

    /// Run the daily week-over-week generation
    ///
    /// Missing request fields are derived from ingest metadata. On success
    /// the output lands on the canonical insights and superlatives keys plus
    /// the latest convenience key.
    pub async fn run(&self, request: RunRequest) -> Result<RunSummary> {
        let (season, week_from, week_to) = self.resolve_weeks(&request).await?;
        info!("generating insights for S{season}: W{week_from} -> W{week_to}");

        if week_from >= week_to {
            return Err(InsightsError::computation(format!(
                "week_from {week_from} must precede week_to {week_to}"
            )));
        }

        // Fail fast before any computation if either week is missing
        if !self.store.week_exists(season, week_to).await? {
            return Err(InsightsError::MissingData { season, week: week_to });
        }
        if !self.store.week_exists(season, week_from).await? {
            return Err(InsightsError::MissingData { season, week: week_from });
        }

        let output = self.generate(season, week_from, week_to).await?;

        self.store.write_insights(&output, season, week_to).await?;
        let record = SuperlativesRecord {
            season,
            week: week_to,
            superlatives: output.superlatives.clone(),
            timestamp: output.generated_at,
        };
        self.store.write_superlatives(&record, season, week_to).await?;
        self.store.write_latest_insights(&output).await?;

        info!(
            "insights generation complete: {} players, {} teams, {} superlatives",
            output.metadata.total_players,
            output.metadata.total_teams,
            output.metadata.total_superlatives
        );

        Ok(summary_for(&output, week_from))
    }

    /// Compare two arbitrary weeks of a season
    ///
    /// `week_from` serves as the previous week and `week_to` as the current
    /// one; output lands under the comparison keys instead of the canonical
    /// weekly keys, and the latest record is left untouched.
    pub async fn compare(&self, season: i32, week_from: u32, week_to: u32) -> Result<RunSummary> {
        if week_from >= week_to {
            return Err(InsightsError::computation(format!(
                "week_from {week_from} must precede week_to {week_to}"
            )));
        }

        let output = self.generate_comparison(season, week_from, week_to).await?;

        self.store
            .write_comparison_insights(&output, season, week_from, week_to)
            .await?;
        let record = ComparisonSuperlativesRecord {
            season,
            week_from,
            week_to,
            week_delta: week_to - week_from,
            superlatives: output.superlatives.clone(),
            timestamp: output.generated_at,
        };
        self.store
            .write_comparison_superlatives(&record, season, week_from, week_to)
            .await?;

        Ok(summary_for(&output, week_from))
    }

    /// Compute comparisons for every ascending week pair of a season and
    /// write the season summary record
    ///
    /// Individual pairs stay fail-closed, but a failed pair does not stop
    /// the sweep; it is tallied in the summary instead.
    pub async fn compare_all(&self, season: i32) -> Result<ComparisonSummary> {
        let available_weeks = self.store.available_weeks(season).await?;
        info!("comparing all week pairs for S{season}: {available_weeks:?}");

        let mut results = Vec::new();
        for (index, &week_from) in available_weeks.iter().enumerate() {
            for &week_to in &available_weeks[index + 1..] {
                match self.compare(season, week_from, week_to).await {
                    Ok(summary) => results.push(ComparisonResult::success(
                        week_from,
                        week_to,
                        summary.total_players,
                        summary.total_superlatives,
                    )),
                    Err(e) => {
                        error!("comparison W{week_from} -> W{week_to} failed: {e}");
                        results.push(ComparisonResult::failure(week_from, week_to, e.to_string()));
                    }
                }
            }
        }

        let successful = results.iter().filter(|r| r.status == "success").count();
        let summary = ComparisonSummary {
            season,
            available_weeks,
            total_combinations: results.len(),
            failed: results.len() - successful,
            successful,
            results,
        };
        self.store.write_comparison_summary(&summary, season).await?;

        Ok(summary)
    }

    async fn resolve_weeks(&self, request: &RunRequest) -> Result<(i32, u32, u32)> {
        if let (Some(season), Some(week_from), Some(week_to)) =
            (request.season, request.week_from, request.week_to)
        {
            return Ok((season, week_from, week_to));
        }

        let metadata = self.store.read_metadata().await?.ok_or(InsightsError::MissingMetadata)?;
        let season = request.season.unwrap_or(metadata.current_season);
        let week_to = request.week_to.unwrap_or(metadata.current_week);
        let week_from = request.week_from.unwrap_or_else(|| week_to.saturating_sub(1));
        Ok((season, week_from, week_to))
    }

    async fn generate(&self, season: i32, week_from: u32, week_to: u32) -> Result<InsightsOutput> {
        let weeks_to_fetch = history_window(week_from, week_to);

        // Load every window week that exists; gaps simply shorten histories
        let mut weekly: BTreeMap<u32, WeeklySnapshot> = BTreeMap::new();
        for &week in &weeks_to_fetch {
            if let Some(snapshot) = self.store.read_snapshot(season, week).await? {
                weekly.insert(week, snapshot);
            }
        }

        let current = weekly
            .get(&week_to)
            .ok_or(InsightsError::MissingData { season, week: week_to })?;
        weekly
            .get(&week_from)
            .ok_or(InsightsError::MissingData { season, week: week_from })?;

        let week_indexes: BTreeMap<u32, HashMap<&str, &PlayerRecord>> = weekly
            .iter()
            .map(|(&week, snapshot)| (week, index_players(snapshot)))
            .collect();
        let previous_index = &week_indexes[&week_from];

        info!("processing {} players across weeks {weeks_to_fetch:?}", current.players.len());

        // Player fan-out in stored order; duplicate ids keep the first row
        let mut seen: HashSet<&str> = HashSet::new();
        let mut player_insights: Vec<PlayerInsight> = Vec::with_capacity(current.players.len());
        for player in &current.players {
            if player.player_id.is_empty() {
                return Err(InsightsError::computation(format!(
                    "player record without player_id in S{season}W{week_to}"
                )));
            }
            if !seen.insert(player.player_id.as_str()) {
                continue;
            }

            let history: Vec<&PlayerRecord> = weeks_to_fetch
                .iter()
                .filter_map(|week| {
                    week_indexes.get(week).and_then(|m| m.get(player.player_id.as_str()).copied())
                })
                .collect();
            let previous = previous_index.get(player.player_id.as_str()).copied();

            player_insights.push(self.players.build(player, previous, &history, season, week_to));
        }

        // Team fan-out over the sorted team set for reproducible output
        let teams: BTreeSet<&str> = current
            .players
            .iter()
            .map(|p| p.team.as_str())
            .filter(|team| !team.is_empty())
            .collect();

        info!("processing {} teams", teams.len());

        let previous_snapshot = &weekly[&week_from];
        let mut team_insights: Vec<TeamInsight> = Vec::with_capacity(teams.len());
        for team in teams {
            let current_players = team_subset(current, team);
            let previous_players = team_subset(previous_snapshot, team);

            let current_stats = aggregate_team_stats(team, &current_players);
            let previous_stats = (!previous_players.is_empty())
                .then(|| aggregate_team_stats(team, &previous_players));

            // Weeks where the team fielded nobody are skipped, not zeroed
            let history: Vec<_> = weeks_to_fetch
                .iter()
                .filter_map(|week| {
                    let members = team_subset(weekly.get(week)?, team);
                    (!members.is_empty()).then(|| aggregate_team_stats(team, &members))
                })
                .collect();

            team_insights.push(self.teams.build(
                team,
                &current_stats,
                previous_stats.as_ref(),
                &history,
                &current_players,
                season,
                week_to,
            ));
        }

        let superlatives = self.superlatives.generate_all(&player_insights, season, week_to);

        Ok(InsightsOutput {
            season,
            week: week_to,
            generated_at: Utc::now(),
            metadata: OutputMetadata {
                total_players: player_insights.len(),
                total_teams: team_insights.len(),
                total_superlatives: superlatives.len(),
                weeks_analyzed: weeks_to_fetch,
                comparison: None,
            },
            player_insights,
            team_insights,
            superlatives,
        })
    }

    async fn generate_comparison(
        &self,
        season: i32,
        week_from: u32,
        week_to: u32,
    ) -> Result<InsightsOutput> {
        let from = self
            .store
            .read_snapshot(season, week_from)
            .await?
            .ok_or(InsightsError::MissingData { season, week: week_from })?;
        let to = self
            .store
            .read_snapshot(season, week_to)
            .await?
            .ok_or(InsightsError::MissingData { season, week: week_to })?;

        let from_index = index_players(&from);

        let mut seen: HashSet<&str> = HashSet::new();
        let mut player_insights: Vec<PlayerInsight> = Vec::with_capacity(to.players.len());
        for player in &to.players {
            if player.player_id.is_empty() {
                return Err(InsightsError::computation(format!(
                    "player record without player_id in S{season}W{week_to}"
                )));
            }
            if !seen.insert(player.player_id.as_str()) {
                continue;
            }

            let previous = from_index.get(player.player_id.as_str()).copied();
            let history: Vec<&PlayerRecord> = match previous {
                Some(previous) => vec![previous, player],
                None => vec![player],
            };

            player_insights.push(self.players.build(player, previous, &history, season, week_to));
        }

        let teams: BTreeSet<&str> = to
            .players
            .iter()
            .map(|p| p.team.as_str())
            .filter(|team| !team.is_empty())
            .collect();

        let mut team_insights: Vec<TeamInsight> = Vec::with_capacity(teams.len());
        for team in teams {
            let to_players = team_subset(&to, team);
            let from_players = team_subset(&from, team);

            let to_stats = aggregate_team_stats(team, &to_players);
            let from_stats =
                (!from_players.is_empty()).then(|| aggregate_team_stats(team, &from_players));

            let history: Vec<_> = match &from_stats {
                Some(from_stats) => vec![from_stats.clone(), to_stats.clone()],
                None => vec![to_stats.clone()],
            };

            team_insights.push(self.teams.build(
                team,
                &to_stats,
                from_stats.as_ref(),
                &history,
                &to_players,
                season,
                week_to,
            ));
        }

        let superlatives = self.superlatives.generate_all(&player_insights, season, week_to);

        Ok(InsightsOutput {
            season,
            week: week_to,
            generated_at: Utc::now(),
            metadata: OutputMetadata {
                total_players: player_insights.len(),
                total_teams: team_insights.len(),
                total_superlatives: superlatives.len(),
                weeks_analyzed: vec![week_from, week_to],
                comparison: Some(ComparisonInfo {
                    week_from,
                    week_to,
                    week_delta: week_to - week_from,
                }),
            },
            player_insights,
            team_insights,
            superlatives,
        })
    }
}

/// Weeks to load for the trend window: one week before `week_from` when it
/// exists, deduplicated and sorted ascending
fn history_window(week_from: u32, week_to: u32) -> Vec<u32> {
    let mut weeks = if week_from >= 2 {
        vec![week_from - 1, week_from, week_to]
    } else {
        vec![week_from, week_to]
    };
    weeks.sort_unstable();
    weeks.dedup();
    weeks
}

fn index_players(snapshot: &WeeklySnapshot) -> HashMap<&str, &PlayerRecord> {
    snapshot.players.iter().map(|p| (p.player_id.as_str(), p)).collect()
}

fn team_subset<'a>(snapshot: &'a WeeklySnapshot, team: &str) -> Vec<&'a PlayerRecord> {
    snapshot.players.iter().filter(|p| p.team == team).collect()
}

fn summary_for(output: &InsightsOutput, week_from: u32) -> RunSummary {
    RunSummary {
        season: output.season,
        week_from,
        week_to: output.week,
        total_players: output.metadata.total_players,
        total_teams: output.metadata.total_teams,
        total_superlatives: output.metadata.total_superlatives,
        weeks_analyzed: output.metadata.weeks_analyzed.clone(),
    }
}
