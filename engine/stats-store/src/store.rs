//! Typed facade over the blob store
//!
//! `StatsStore` knows the canonical key layout and handles JSON
//! encoding/decoding, so callers work with typed snapshots and serializable
//! output records instead of raw keys and bytes.

use crate::backend::BlobStore;
use crate::error::Result;
use crate::keys;
use crate::models::{StatsMetadata, WeeklySnapshot};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Typed read/write operations on the week-partitioned stats layout
#[derive(Clone)]
pub struct StatsStore {
    blobs: Arc<dyn BlobStore>,
}

impl StatsStore {
    /// Create a store over any blob backend
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.blobs.get(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn put_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.blobs.put(key, bytes).await
    }

    // === READ OPERATIONS ===

    /// Read the weekly snapshot for one season/week
    pub async fn read_snapshot(&self, season: i32, week: u32) -> Result<Option<WeeklySnapshot>> {
        let snapshot: Option<WeeklySnapshot> = self.get_json(&keys::snapshot(season, week)).await?;
        if let Some(snapshot) = &snapshot {
            tracing::debug!(
                "read weekly stats for S{season}W{week}: {} players",
                snapshot.players.len()
            );
        }
        Ok(snapshot)
    }

    /// Read ingest metadata, if the fetcher has run at least once
    pub async fn read_metadata(&self) -> Result<Option<StatsMetadata>> {
        self.get_json(&keys::metadata()).await
    }

    /// Check whether a weekly snapshot exists without reading it
    pub async fn week_exists(&self, season: i32, week: u32) -> Result<bool> {
        self.blobs.exists(&keys::snapshot(season, week)).await
    }

    /// All weeks of a season with a stored snapshot, ascending
    pub async fn available_weeks(&self, season: i32) -> Result<Vec<u32>> {
        let stored = self.blobs.list(&keys::weekly_prefix(season)).await?;
        let mut weeks: Vec<u32> = stored
            .iter()
            .filter_map(|key| keys::week_from_snapshot_key(key, season))
            .collect();
        weeks.sort_unstable();
        weeks.dedup();
        Ok(weeks)
    }

    /// Read previously generated insights for one season/week
    pub async fn read_insights(&self, season: i32, week: u32) -> Result<Option<serde_json::Value>> {
        self.get_json(&keys::insights(season, week)).await
    }

    /// Read the latest-insights convenience record
    pub async fn read_latest_insights(&self) -> Result<Option<serde_json::Value>> {
        self.get_json(&keys::latest_insights()).await
    }

    /// Read a stored week comparison
    pub async fn read_comparison_insights(
        &self,
        season: i32,
        week_from: u32,
        week_to: u32,
    ) -> Result<Option<serde_json::Value>> {
        self.get_json(&keys::comparison_insights(season, week_from, week_to)).await
    }

    // === WRITE OPERATIONS ===

    /// Write the weekly snapshot for one season/week (ingestion side)
    pub async fn write_snapshot(&self, snapshot: &WeeklySnapshot) -> Result<()> {
        self.put_json(&keys::snapshot(snapshot.season, snapshot.week), snapshot).await
    }

    /// Write ingest metadata
    pub async fn write_metadata(&self, metadata: &StatsMetadata) -> Result<()> {
        self.put_json(&keys::metadata(), metadata).await
    }

    /// Write the canonical insights record for one season/week
    pub async fn write_insights<T: Serialize + Sync>(
        &self,
        output: &T,
        season: i32,
        week: u32,
    ) -> Result<()> {
        self.put_json(&keys::insights(season, week), output).await?;
        tracing::info!("wrote insights for S{season}W{week}");
        Ok(())
    }

    /// Write the superlatives record for one season/week
    pub async fn write_superlatives<T: Serialize + Sync>(
        &self,
        record: &T,
        season: i32,
        week: u32,
    ) -> Result<()> {
        self.put_json(&keys::superlatives(season, week), record).await?;
        tracing::info!("wrote superlatives for S{season}W{week}");
        Ok(())
    }

    /// Write the latest-insights convenience record
    pub async fn write_latest_insights<T: Serialize + Sync>(&self, output: &T) -> Result<()> {
        self.put_json(&keys::latest_insights(), output).await?;
        tracing::info!("wrote latest insights snapshot");
        Ok(())
    }

    /// Write a comparison insights record for an arbitrary week pair
    pub async fn write_comparison_insights<T: Serialize + Sync>(
        &self,
        output: &T,
        season: i32,
        week_from: u32,
        week_to: u32,
    ) -> Result<()> {
        self.put_json(&keys::comparison_insights(season, week_from, week_to), output).await?;
        tracing::info!("wrote comparison insights for S{season} W{week_from}->W{week_to}");
        Ok(())
    }

    /// Write a comparison superlatives record for an arbitrary week pair
    pub async fn write_comparison_superlatives<T: Serialize + Sync>(
        &self,
        record: &T,
        season: i32,
        week_from: u32,
        week_to: u32,
    ) -> Result<()> {
        self.put_json(&keys::comparison_superlatives(season, week_from, week_to), record).await
    }

    /// Write the season comparison summary
    pub async fn write_comparison_summary<T: Serialize + Sync>(
        &self,
        summary: &T,
        season: i32,
    ) -> Result<()> {
        self.put_json(&keys::comparison_summary(season), summary).await?;
        tracing::info!("wrote comparison summary for S{season}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBlobStore;
    use crate::models::PlayerRecord;

    fn snapshot(season: i32, week: u32, player_ids: &[&str]) -> WeeklySnapshot {
        WeeklySnapshot {
            season,
            week,
            players: player_ids
                .iter()
                .map(|id| PlayerRecord { player_id: id.to_string(), ..Default::default() })
                .collect(),
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn snapshot_round_trip() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let store = StatsStore::new(blobs);

        store.write_snapshot(&snapshot(2025, 6, &["a", "b"])).await.unwrap();

        let loaded = store.read_snapshot(2025, 6).await.unwrap().unwrap();
        assert_eq!(loaded.season, 2025);
        assert_eq!(loaded.week, 6);
        assert_eq!(loaded.players.len(), 2);

        assert!(store.week_exists(2025, 6).await.unwrap());
        assert!(!store.week_exists(2025, 7).await.unwrap());
        assert!(store.read_snapshot(2025, 7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn available_weeks_sorted_ascending() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let store = StatsStore::new(blobs);

        for week in [5, 1, 3] {
            store.write_snapshot(&snapshot(2025, week, &[])).await.unwrap();
        }
        store.write_snapshot(&snapshot(2024, 9, &[])).await.unwrap();

        assert_eq!(store.available_weeks(2025).await.unwrap(), vec![1, 3, 5]);
        assert_eq!(store.available_weeks(2024).await.unwrap(), vec![9]);
        assert!(store.available_weeks(2023).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn metadata_round_trip() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let store = StatsStore::new(blobs);

        assert!(store.read_metadata().await.unwrap().is_none());

        let metadata = StatsMetadata {
            current_season: 2025,
            current_week: 6,
            weeks_available: vec![1, 2, 3, 4, 5, 6],
        };
        store.write_metadata(&metadata).await.unwrap();

        let loaded = store.read_metadata().await.unwrap().unwrap();
        assert_eq!(loaded.current_season, 2025);
        assert_eq!(loaded.current_week, 6);
    }

    #[tokio::test]
    async fn insight_writes_land_on_canonical_keys() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let store = StatsStore::new(blobs.clone());

        let payload = serde_json::json!({ "season": 2025, "week": 6 });
        store.write_insights(&payload, 2025, 6).await.unwrap();
        store.write_superlatives(&payload, 2025, 6).await.unwrap();
        store.write_latest_insights(&payload).await.unwrap();
        store.write_comparison_insights(&payload, 2025, 3, 6).await.unwrap();

        let keys = blobs.keys().await;
        assert!(keys.contains(&"insights/season/2025/week/6/insights.json".to_string()));
        assert!(keys.contains(&"insights/season/2025/week/6/superlatives.json".to_string()));
        assert!(keys.contains(&"insights/latest.json".to_string()));
        assert!(keys.contains(&"insights/season/2025/comparisons/3-to-6/insights.json".to_string()));
    }
}
