//! Canonical key layout for the blob store
//!
//! All paths are relative keys inside the store, partitioned by season and
//! week. Raw stat snapshots live under `stats/`, derived insights under
//! `insights/`.

/// Weekly player stats snapshot for one season/week
pub fn snapshot(season: i32, week: u32) -> String {
    format!("stats/weekly/season/{season}/week/{week}/data.json")
}

/// Prefix covering every weekly snapshot of a season
pub fn weekly_prefix(season: i32) -> String {
    format!("stats/weekly/season/{season}/week/")
}

/// Ingest metadata (current season/week, available weeks)
pub fn metadata() -> String {
    "stats/metadata.json".to_string()
}

/// Derived insights for one season/week
pub fn insights(season: i32, week: u32) -> String {
    format!("insights/season/{season}/week/{week}/insights.json")
}

/// Superlatives record for one season/week
pub fn superlatives(season: i32, week: u32) -> String {
    format!("insights/season/{season}/week/{week}/superlatives.json")
}

/// Convenience key always holding the most recent successful run
pub fn latest_insights() -> String {
    "insights/latest.json".to_string()
}

/// Insights comparing two arbitrary weeks of a season
pub fn comparison_insights(season: i32, week_from: u32, week_to: u32) -> String {
    format!("insights/season/{season}/comparisons/{week_from}-to-{week_to}/insights.json")
}

/// Superlatives record for a two-week comparison
pub fn comparison_superlatives(season: i32, week_from: u32, week_to: u32) -> String {
    format!("insights/season/{season}/comparisons/{week_from}-to-{week_to}/superlatives.json")
}

/// Summary of which comparison pairs have been computed for a season
pub fn comparison_summary(season: i32) -> String {
    format!("insights/season/{season}/comparisons/summary.json")
}

/// Extract the week number from a weekly snapshot key, if it is one
pub fn week_from_snapshot_key(key: &str, season: i32) -> Option<u32> {
    let rest = key.strip_prefix(&weekly_prefix(season))?;
    let (week, tail) = rest.split_once('/')?;
    if tail != "data.json" {
        return None;
    }
    week.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_key_layout() {
        assert_eq!(snapshot(2025, 6), "stats/weekly/season/2025/week/6/data.json");
        assert_eq!(insights(2025, 6), "insights/season/2025/week/6/insights.json");
        assert_eq!(superlatives(2025, 6), "insights/season/2025/week/6/superlatives.json");
        assert_eq!(latest_insights(), "insights/latest.json");
    }

    #[test]
    fn comparison_key_layout() {
        assert_eq!(
            comparison_insights(2025, 3, 7),
            "insights/season/2025/comparisons/3-to-7/insights.json"
        );
        assert_eq!(
            comparison_superlatives(2025, 3, 7),
            "insights/season/2025/comparisons/3-to-7/superlatives.json"
        );
        assert_eq!(comparison_summary(2025), "insights/season/2025/comparisons/summary.json");
    }

    #[test]
    fn week_extraction_round_trips() {
        let key = snapshot(2025, 12);
        assert_eq!(week_from_snapshot_key(&key, 2025), Some(12));
        assert_eq!(week_from_snapshot_key(&key, 2024), None);
        assert_eq!(week_from_snapshot_key("stats/metadata.json", 2025), None);
    }
}
