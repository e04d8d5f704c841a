// src/source/mod.rs
pub mod providers;
pub mod schema;
pub mod types;

use crate::config::RunConfig;
use crate::source::providers::KworbProvider;
use crate::source::types::{SourceOutcome, SourceProvider};

/// Build the three live chart providers from the run configuration.
pub fn default_providers(config: &RunConfig) -> Vec<Box<dyn SourceProvider>> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.fetch_timeout_secs))
        .build()
        .unwrap_or_default();

    types::SourceId::ALL
        .iter()
        .map(|&id| {
            Box::new(KworbProvider::from_url(
                id,
                config.source_url(id),
                client.clone(),
                config.cutoff,
            )) as Box<dyn SourceProvider>
        })
        .collect()
}

/// Fetch every source once, in order, and collect the typed outcomes.
///
/// A failed source is logged and kept as a failure outcome; it degrades to an
/// empty table at the aggregation boundary, so a partial run still produces a
/// ranking from whatever succeeded.
pub async fn fetch_all(providers: &[Box<dyn SourceProvider>]) -> Vec<SourceOutcome> {
    let mut outcomes = Vec::with_capacity(providers.len());
    for p in providers {
        let source = p.source();
        let result = p.fetch_table().await;
        match &result {
            Ok(t) => {
                tracing::info!(source = source.label(), rows = t.records.len(), "source fetched");
            }
            Err(e) => {
                tracing::warn!(source = source.label(), error = %e, "source degraded to empty table");
            }
        }
        outcomes.push(SourceOutcome { source, result });
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::providers::KworbProvider;
    use crate::source::types::SourceId;

    const PAGE: &str = "\
        <table>\
        <tr><th>#</th><th>P</th><th>Title</th><th>S</th><th>Pk</th><th>W</th></tr>\
        <tr><td>1</td><td>=</td><td>Alpha</td><td>9</td><td>1</td><td>(x2)</td></tr>\
        </table>";

    #[tokio::test]
    async fn failed_source_keeps_its_outcome_and_empties_out() {
        let providers: Vec<Box<dyn SourceProvider>> = vec![
            Box::new(KworbProvider::from_fixture(SourceId::Youtube, PAGE, 50)),
            Box::new(KworbProvider::from_fixture(SourceId::Spotify, "<p>down</p>", 50)),
        ];
        let outcomes = fetch_all(&providers).await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());

        let tables: Vec<_> = outcomes.into_iter().map(|o| o.table_or_empty()).collect();
        assert_eq!(tables[0].records.len(), 1);
        assert!(tables[1].is_empty());
        assert_eq!(tables[1].source, SourceId::Spotify);
    }
}
