// src/history.rs
//! Snapshot store for published rankings.
//!
//! Each run writes one compact JSON sidecar (`<stamp>_ranking.json`) next to
//! the archived page, and the next run reads the most recent one back as a
//! `title → rank` map to drive movement detection. Reading is best-effort: a
//! missing archive (first run) or an unreadable sidecar yields an empty map,
//! never an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate::CompositeRanking;

const SNAPSHOT_SUFFIX: &str = "_ranking.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankSnapshot {
    pub published_at: String,
    pub entries: Vec<SnapshotEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub title: String,
    pub rank: u32,
    pub score: f64,
}

impl RankSnapshot {
    pub fn from_ranking(ranking: &CompositeRanking, published_at: &str) -> Self {
        Self {
            published_at: published_at.to_string(),
            entries: ranking
                .entries
                .iter()
                .enumerate()
                .map(|(i, e)| SnapshotEntry {
                    title: e.title.clone(),
                    rank: i as u32 + 1,
                    score: e.score,
                })
                .collect(),
        }
    }

    pub fn rank_by_title(&self) -> HashMap<String, u32> {
        self.entries
            .iter()
            .map(|e| (e.title.clone(), e.rank))
            .collect()
    }
}

/// Persist the snapshot sidecar for this run.
pub fn write_snapshot(archive_dir: &Path, stamp: &str, snapshot: &RankSnapshot) -> Result<PathBuf> {
    fs::create_dir_all(archive_dir)
        .with_context(|| format!("creating archive dir {}", archive_dir.display()))?;
    let path = archive_dir.join(format!("{stamp}{SNAPSHOT_SUFFIX}"));
    let body = serde_json::to_vec_pretty(snapshot).context("serializing snapshot")?;
    fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// The previous run's `title → rank` map, or empty when there is none.
///
/// Newest snapshot wins by reverse lexicographic filename order; the stamp
/// prefix (`YYYYMMDD_HHMM`) makes that chronological.
pub fn latest_snapshot(archive_dir: &Path) -> HashMap<String, u32> {
    let Some(path) = latest_snapshot_path(archive_dir) else {
        return HashMap::new();
    };
    match fs::read_to_string(&path) {
        Ok(s) => match serde_json::from_str::<RankSnapshot>(&s) {
            Ok(snap) => snap.rank_by_title(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "snapshot unparsable; treating as first run");
                HashMap::new()
            }
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "snapshot unreadable; treating as first run");
            HashMap::new()
        }
    }
}

fn latest_snapshot_path(archive_dir: &Path) -> Option<PathBuf> {
    let mut names: Vec<String> = fs::read_dir(archive_dir)
        .ok()?
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|n| n.ends_with(SNAPSHOT_SUFFIX))
        .collect();
    names.sort();
    names.pop().map(|n| archive_dir.join(n))
}

/// Archived page filenames, newest first. Feeds the archive index page.
pub fn archived_pages(archive_dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(archive_dir) {
        Ok(rd) => rd
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|n| n.ends_with(".html"))
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names.reverse();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{CompositeEntry, CompositeRanking};
    use crate::source::types::SourceRecord;

    fn ranking(titles: &[&str]) -> CompositeRanking {
        CompositeRanking {
            entries: titles
                .iter()
                .enumerate()
                .map(|(i, t)| CompositeEntry {
                    title: t.to_string(),
                    score: 50.0 - i as f64,
                    display: SourceRecord {
                        title: t.to_string(),
                        rank: i as u32 + 1,
                        peak_position: "1".into(),
                        peak_weeks: "-".into(),
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn missing_archive_dir_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("nope");
        assert!(latest_snapshot(&absent).is_empty());
        assert!(archived_pages(&absent).is_empty());
    }

    #[test]
    fn snapshot_round_trips_via_latest() {
        let dir = tempfile::tempdir().unwrap();
        let snap = RankSnapshot::from_ranking(&ranking(&["A", "B"]), "2026-02-14 16:00");
        write_snapshot(dir.path(), "20260214_1600", &snap).unwrap();

        let got = latest_snapshot(dir.path());
        assert_eq!(got.get("A"), Some(&1));
        assert_eq!(got.get("B"), Some(&2));
    }

    #[test]
    fn newest_stamp_wins() {
        let dir = tempfile::tempdir().unwrap();
        let old = RankSnapshot::from_ranking(&ranking(&["Old"]), "old");
        let new = RankSnapshot::from_ranking(&ranking(&["New"]), "new");
        write_snapshot(dir.path(), "20260101_0900", &old).unwrap();
        write_snapshot(dir.path(), "20260214_1600", &new).unwrap();

        let got = latest_snapshot(dir.path());
        assert!(got.contains_key("New"));
        assert!(!got.contains_key("Old"));
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("20260214_1600_ranking.json"), "{not json").unwrap();
        assert!(latest_snapshot(dir.path()).is_empty());
    }

    #[test]
    fn archived_pages_are_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        for n in ["20260101_0900_index.html", "20260214_1600_index.html"] {
            fs::write(dir.path().join(n), "x").unwrap();
        }
        fs::write(dir.path().join("20260107_1200_ranking.json"), "{}").unwrap();
        assert_eq!(
            archived_pages(dir.path()),
            vec!["20260214_1600_index.html", "20260101_0900_index.html"]
        );
    }
}
