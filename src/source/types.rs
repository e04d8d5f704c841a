// src/source/types.rs
use anyhow::Result;
use thiserror::Error;

/// Identity of one external chart provider. Selects the column schema,
/// the fetch URL, and the aggregation weight for that source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    Youtube,
    Spotify,
    Itunes,
}

impl SourceId {
    pub const ALL: [SourceId; 3] = [SourceId::Youtube, SourceId::Spotify, SourceId::Itunes];

    pub fn label(&self) -> &'static str {
        match self {
            SourceId::Youtube => "YouTube",
            SourceId::Spotify => "Spotify",
            SourceId::Itunes => "iTunes",
        }
    }
}

/// One parsed chart row: title plus positional metadata.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceRecord {
    pub title: String,
    /// 1-based position within the source table; contiguous per table.
    pub rank: u32,
    /// Best-ever rank on that source, as displayed (may be non-numeric).
    pub peak_position: String,
    /// Consecutive periods at peak; `"-"` when not derivable from the raw cell.
    pub peak_weeks: String,
}

/// Ordered rows for exactly one source, bounded to the run cutoff.
/// Built fresh per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTable {
    pub source: SourceId,
    pub records: Vec<SourceRecord>,
}

impl SourceTable {
    pub fn empty(source: SourceId) -> Self {
        Self {
            source,
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Why a source produced no table this run. Kept as a typed outcome so the
/// pipeline can log the cause instead of silently swallowing it.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("no chart table found in page for {source_name}")]
    NoTable { source_name: &'static str },
}

/// Result of fetching one source: the table, or the reason it is missing.
/// A failed source degrades to an empty table at the aggregation boundary.
#[derive(Debug)]
pub struct SourceOutcome {
    pub source: SourceId,
    pub result: Result<SourceTable, SourceError>,
}

impl SourceOutcome {
    /// The table to aggregate: parsed rows on success, empty on failure.
    pub fn table_or_empty(self) -> SourceTable {
        match self.result {
            Ok(t) => t,
            Err(_) => SourceTable::empty(self.source),
        }
    }
}

#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch_table(&self) -> Result<SourceTable, SourceError>;
    fn source(&self) -> SourceId;
}
