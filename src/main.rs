//! rankland — Binary Entrypoint
//! One batch pass: fetch the three chart sources, publish the composite
//! ranking, archive the result.
//!
//! See `README.md` for quickstart and `DESIGN.md` for architecture notes.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rankland::config::RunConfig;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rankland=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the vars come from the environment.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Config problems (including a missing narrative API key) are fatal here,
    // before any fetch or computation starts.
    let config = RunConfig::load()?;

    let artifacts = rankland::run::run(&config).await?;
    tracing::info!(
        entries = artifacts.ranking.len(),
        insights = artifacts.movements.len(),
        "published {}",
        artifacts.index_path.display()
    );
    Ok(())
}
