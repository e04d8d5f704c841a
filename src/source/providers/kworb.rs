// src/source/providers/kworb.rs
//! Chart-table provider for the kworb.net ranking pages.
//!
//! All three sources are served as one big `<table>` whose first row is a
//! header. The peak column is rendered as two adjacent cells (`"1"` plus an
//! optional `"(x20)"`), which are re-joined here and split back into a clean
//! peak position and a weeks-at-peak count.

use async_trait::async_trait;

use crate::markup;
use crate::source::schema::{schema_for, ColumnSchema};
use crate::source::types::{SourceError, SourceId, SourceProvider, SourceRecord, SourceTable};

/// Placeholder weeks value when the raw cell carries no `(xN)` suffix.
pub const WEEKS_UNKNOWN: &str = "-";

pub struct KworbProvider {
    source: SourceId,
    cutoff: u32,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl KworbProvider {
    pub fn from_url(source: SourceId, url: &str, client: reqwest::Client, cutoff: u32) -> Self {
        Self {
            source,
            cutoff,
            mode: Mode::Http {
                url: url.to_string(),
                client,
            },
        }
    }

    /// Offline provider over a canned page body. Used by tests.
    pub fn from_fixture(source: SourceId, html: &str, cutoff: u32) -> Self {
        Self {
            source,
            cutoff,
            mode: Mode::Fixture(html.to_string()),
        }
    }
}

#[async_trait]
impl SourceProvider for KworbProvider {
    async fn fetch_table(&self) -> Result<SourceTable, SourceError> {
        match &self.mode {
            Mode::Fixture(html) => parse_table(self.source, html, self.cutoff),
            Mode::Http { url, client } => {
                let resp = client
                    .get(url)
                    .header(reqwest::header::USER_AGENT, "Mozilla/5.0")
                    .send()
                    .await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(SourceError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                let body = resp.text().await?;
                parse_table(self.source, &body, self.cutoff)
            }
        }
    }

    fn source(&self) -> SourceId {
        self.source
    }
}

/// Parse one chart page into an ordered table, capped at `cutoff` rows.
///
/// The header row is dropped; unusable rows (too few cells, empty title) are
/// skipped without aborting the table. Kept rows are re-ranked contiguously
/// from 1 so skips never leave gaps.
pub fn parse_table(source: SourceId, html: &str, cutoff: u32) -> Result<SourceTable, SourceError> {
    let rows = markup::table_rows(html);
    if rows.is_empty() {
        return Err(SourceError::NoTable {
            source_name: source.label(),
        });
    }

    let schema = schema_for(source);
    let mut records = Vec::new();
    for row in rows.iter().skip(1) {
        if records.len() as u32 >= cutoff {
            break;
        }
        let cells = markup::row_cells(row);
        if let Some(rec) = parse_row(&cells, &schema, records.len() as u32 + 1) {
            records.push(rec);
        }
    }

    Ok(SourceTable { source, records })
}

/// One row of cleaned cell texts → a record, or `None` when unusable.
fn parse_row(cells: &[String], schema: &ColumnSchema, rank: u32) -> Option<SourceRecord> {
    if cells.len() < schema.min_cells {
        return None;
    }
    let title = cells[schema.title].trim();
    if title.is_empty() {
        return None;
    }

    let raw = format!("{}{}", cells[schema.peak].trim(), cells[schema.weeks].trim());
    let (peak_position, peak_weeks) = split_peak_field(&raw);

    Some(SourceRecord {
        title: title.to_string(),
        rank,
        peak_position,
        peak_weeks,
    })
}

/// Split the rejoined peak field into position and weeks-at-peak.
///
/// `"1(x20)"` → `("1", "x20")`; `"1"` → `("1", "-")`. Anything before the
/// first `(` is the position; the remainder minus the closing `)` is the
/// weeks token.
pub fn split_peak_field(raw: &str) -> (String, String) {
    match raw.split_once('(') {
        Some((pos, rest)) => (
            pos.trim().to_string(),
            rest.replace(')', "").trim().to_string(),
        ),
        None => (raw.trim().to_string(), WEEKS_UNKNOWN.to_string()),
    }
}
