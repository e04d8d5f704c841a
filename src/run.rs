// src/run.rs
//! One batch pass: fetch → aggregate → movement → commentary → render →
//! archive. Each run is read-idempotent but appends a fresh timestamped page
//! and snapshot, so repeated runs accumulate distinct artifacts.

use anyhow::{Context, Result};
use chrono::{FixedOffset, Utc};
use std::fs;
use std::path::PathBuf;

use crate::aggregate::{aggregate, CompositeRanking, WeightedSource};
use crate::config::RunConfig;
use crate::delta::{self, Movement};
use crate::history::{self, RankSnapshot};
use crate::narrate::{DynNarrativeClient, NarrativeInput};
use crate::render;
use crate::source::{self, types::SourceProvider};

/// Everything a run produced, mainly for tests and logging.
pub struct RunArtifacts {
    pub ranking: CompositeRanking,
    pub movements: Vec<Movement>,
    pub index_path: PathBuf,
    pub archive_path: PathBuf,
    pub snapshot_path: PathBuf,
}

/// Entry point used by the binary: live providers, configured narrator.
pub async fn run(config: &RunConfig) -> Result<RunArtifacts> {
    let providers = source::default_providers(config);
    let narrator = crate::narrate::build_client(&config.narrative);
    run_with(config, &providers, narrator).await
}

/// The pipeline proper, with injectable providers and narrator.
pub async fn run_with(
    config: &RunConfig,
    providers: &[Box<dyn SourceProvider>],
    narrator: DynNarrativeClient,
) -> Result<RunArtifacts> {
    // 1) Fetch. Failures are already degraded to empty tables.
    let outcomes = source::fetch_all(providers).await;
    let weighted: Vec<WeightedSource> = outcomes
        .into_iter()
        .map(|o| {
            let weight = config.source_weight(o.source);
            WeightedSource {
                table: o.table_or_empty(),
                weight,
            }
        })
        .collect();

    // 2) Aggregate.
    let ranking = aggregate(&weighted, config.cutoff);
    tracing::info!(entries = ranking.len(), "composite ranking built");

    // 3) Movement against the previous snapshot.
    let previous = history::latest_snapshot(&config.archive_dir);
    let movements = delta::analyze(&ranking.top_ranks(delta::TOP_MOVERS), &previous);
    tracing::info!(
        previous_titles = previous.len(),
        insights = movements.len(),
        "movement analyzed"
    );

    // 4) Commentary, with canned fallback when the client has nothing.
    let input = NarrativeInput {
        top: ranking
            .top(5)
            .iter()
            .map(|e| (e.title.clone(), e.score))
            .collect(),
        bottom: ranking.entries.last().map(|e| e.title.clone()),
        movements: movements.clone(),
    };
    let commentary = match narrator.commentary(&input).await {
        Some(text) => text,
        None => fallback_commentary(),
    };

    // 5) Render and persist.
    let now = Utc::now().with_timezone(&jst());
    let published_at = now.format("%Y-%m-%d %H:%M").to_string();
    let stamp = now.format("%Y%m%d_%H%M").to_string();

    let tables: Vec<_> = weighted.into_iter().map(|w| w.table).collect();

    fs::create_dir_all(&config.site_dir)
        .with_context(|| format!("creating site dir {}", config.site_dir.display()))?;
    fs::create_dir_all(&config.archive_dir)
        .with_context(|| format!("creating archive dir {}", config.archive_dir.display()))?;

    let index_path = config.site_dir.join("index.html");
    fs::write(
        &index_path,
        render::index_page(&ranking, &commentary, &tables, &published_at, false),
    )
    .with_context(|| format!("writing {}", index_path.display()))?;

    let archive_path = config.archive_dir.join(format!("{stamp}_index.html"));
    fs::write(
        &archive_path,
        render::index_page(&ranking, &commentary, &tables, &published_at, true),
    )
    .with_context(|| format!("writing {}", archive_path.display()))?;

    let snapshot = RankSnapshot::from_ranking(&ranking, &published_at);
    let snapshot_path = history::write_snapshot(&config.archive_dir, &stamp, &snapshot)?;

    let archive_index = config.site_dir.join("archive.html");
    fs::write(
        &archive_index,
        render::archive_page(
            &history::archived_pages(&config.archive_dir),
            &config.archives_href(),
        ),
    )
    .with_context(|| format!("writing {}", archive_index.display()))?;

    tracing::info!(
        index = %index_path.display(),
        archive = %archive_path.display(),
        "run complete"
    );

    Ok(RunArtifacts {
        ranking,
        movements,
        index_path,
        archive_path,
        snapshot_path,
    })
}

/// JST (UTC+9); the site publishes on Japanese time.
fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset")
}

fn fallback_commentary() -> String {
    "<div class='talk'><strong>Noizzer:</strong> \
     \"This week's chart. Look for yourself, the numbers don't lie.\"<br>\
     <strong>Glint:</strong> \"Indeed. Some interesting moves this week.\"</div>"
        .to_string()
}
