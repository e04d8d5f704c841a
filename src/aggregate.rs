// src/aggregate.rs
//! # Aggregation Engine
//! Pure, testable logic that folds weighted source tables into one composite
//! ranking. No I/O and no shared state; the score map lives and dies inside
//! each call.
//!
//! Policy: each appearance is worth `(cutoff + 1 − rank) × weight` points,
//! summed per title across sources. Ties keep first-insertion order, so the
//! output is deterministic for any fixed source order and identical across
//! source permutations (per-title sums do not depend on visit order).

use std::collections::HashMap;

use crate::source::types::{SourceRecord, SourceTable};

/// One source table paired with its static aggregation weight.
#[derive(Debug, Clone)]
pub struct WeightedSource {
    pub table: SourceTable,
    pub weight: f64,
}

/// One line of the published ranking: title, accumulated score, and the
/// first-seen source record used for peak/weeks display.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeEntry {
    pub title: String,
    pub score: f64,
    pub display: SourceRecord,
}

/// The published artifact: entries sorted by score descending, truncated to
/// the cutoff. Immutable once produced; rendered and archived verbatim.
#[derive(Debug, Clone, Default)]
pub struct CompositeRanking {
    pub entries: Vec<CompositeEntry>,
}

impl CompositeRanking {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Leading entries, at most `n`.
    pub fn top(&self, n: usize) -> &[CompositeEntry] {
        &self.entries[..self.entries.len().min(n)]
    }

    /// `(title, current rank)` pairs for the top `n`, 1-based.
    pub fn top_ranks(&self, n: usize) -> Vec<(String, u32)> {
        self.top(n)
            .iter()
            .enumerate()
            .map(|(i, e)| (e.title.clone(), i as u32 + 1))
            .collect()
    }
}

/// Fold every weighted source into one composite ranking.
///
/// The first occurrence of a title fixes its canonical display record; later
/// sources only add points. Empty input (or all-empty tables) yields an empty
/// ranking, not an error.
pub fn aggregate(sources: &[WeightedSource], cutoff: u32) -> CompositeRanking {
    // Insertion-ordered accumulation: entries keep first-seen order, the map
    // only finds them again.
    let mut entries: Vec<CompositeEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for ws in sources {
        for rec in &ws.table.records {
            let points = f64::from((cutoff + 1).saturating_sub(rec.rank)) * ws.weight;
            match index.get(&rec.title) {
                Some(&i) => entries[i].score += points,
                None => {
                    index.insert(rec.title.clone(), entries.len());
                    entries.push(CompositeEntry {
                        title: rec.title.clone(),
                        score: points,
                        display: rec.clone(),
                    });
                }
            }
        }
    }

    // Stable sort: equal scores stay in first-insertion order.
    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(cutoff as usize);

    CompositeRanking { entries }
}
