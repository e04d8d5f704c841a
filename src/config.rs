// src/config.rs
//! Run configuration: source URLs and weights, cutoff, output locations, and
//! the narrative-generation settings.
//!
//! Resolution order: built-in defaults → optional TOML file
//! (`$RANKLAND_CONFIG_PATH`, else `config/rankland.toml`) → environment for
//! the narrative API key. A missing file is fine; a file that exists but does
//! not parse is a startup error, as is an enabled narrative client without
//! its API key.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::source::types::SourceId;

const ENV_CONFIG_PATH: &str = "RANKLAND_CONFIG_PATH";
const ENV_GEMINI_KEY: &str = "GEMINI_API_KEY";
const DEFAULT_CONFIG_PATH: &str = "config/rankland.toml";

/// Entries kept per source table and in the final ranking.
pub const RANK_CUTOFF: u32 = 50;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub cutoff: u32,
    pub weight_youtube: f64,
    pub weight_spotify: f64,
    pub weight_itunes: f64,
    pub url_youtube: String,
    pub url_spotify: String,
    pub url_itunes: String,
    pub fetch_timeout_secs: u64,
    /// Directory receiving `index.html` and `archive.html`.
    pub site_dir: PathBuf,
    /// Directory receiving timestamped copies and ranking snapshots.
    pub archive_dir: PathBuf,
    pub narrative: NarrativeConfig,
}

#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    pub enabled: bool,
    pub model: String,
    /// Resolved from `GEMINI_API_KEY`; empty only when disabled.
    pub api_key: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cutoff: RANK_CUTOFF,
            weight_youtube: 1.0,
            weight_spotify: 0.8,
            weight_itunes: 0.5,
            url_youtube: "https://kworb.net/youtube/insights/jp.html".into(),
            url_spotify: "https://kworb.net/spotify/country/jp_daily.html".into(),
            url_itunes: "https://kworb.net/popjp/".into(),
            fetch_timeout_secs: 10,
            site_dir: PathBuf::from("."),
            archive_dir: PathBuf::from("archives"),
            narrative: NarrativeConfig {
                enabled: true,
                model: "gemini-2.5-flash".into(),
                api_key: String::new(),
            },
        }
    }
}

// Partial file shape; every field optional so the file can override just one
// knob.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    cutoff: Option<u32>,
    fetch_timeout_secs: Option<u64>,
    site_dir: Option<PathBuf>,
    archive_dir: Option<PathBuf>,
    #[serde(default)]
    weights: FileWeights,
    #[serde(default)]
    urls: FileUrls,
    #[serde(default)]
    narrative: FileNarrative,
}

#[derive(Debug, Default, Deserialize)]
struct FileWeights {
    youtube: Option<f64>,
    spotify: Option<f64>,
    itunes: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct FileUrls {
    youtube: Option<String>,
    spotify: Option<String>,
    itunes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileNarrative {
    enabled: Option<bool>,
    model: Option<String>,
}

impl RunConfig {
    /// Load configuration for a run. Fatal on malformed file or on an enabled
    /// narrative client with no API key; everything else falls back to
    /// defaults.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();

        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        if path.exists() {
            cfg.apply_file(&path)?;
        }

        if cfg.narrative.enabled {
            cfg.narrative.api_key = match std::env::var(ENV_GEMINI_KEY) {
                Ok(k) if !k.trim().is_empty() => k,
                _ => bail!("{ENV_GEMINI_KEY} is not set; set it or disable [narrative] in config"),
            };
        }

        Ok(cfg)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let file: FileConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config from {}", path.display()))?;

        if let Some(v) = file.cutoff {
            self.cutoff = v;
        }
        if let Some(v) = file.fetch_timeout_secs {
            self.fetch_timeout_secs = v;
        }
        if let Some(v) = file.site_dir {
            self.site_dir = v;
        }
        if let Some(v) = file.archive_dir {
            self.archive_dir = v;
        }
        if let Some(v) = file.weights.youtube {
            self.weight_youtube = v;
        }
        if let Some(v) = file.weights.spotify {
            self.weight_spotify = v;
        }
        if let Some(v) = file.weights.itunes {
            self.weight_itunes = v;
        }
        if let Some(v) = file.urls.youtube {
            self.url_youtube = v;
        }
        if let Some(v) = file.urls.spotify {
            self.url_spotify = v;
        }
        if let Some(v) = file.urls.itunes {
            self.url_itunes = v;
        }
        if let Some(v) = file.narrative.enabled {
            self.narrative.enabled = v;
        }
        if let Some(v) = file.narrative.model {
            self.narrative.model = v;
        }
        Ok(())
    }

    /// Link prefix from the site root to the archive directory, used for
    /// `href`s on the archive index. When `archive_dir` sits under
    /// `site_dir` the relative part is used; otherwise the configured path
    /// is emitted as-is.
    pub fn archives_href(&self) -> String {
        let path = self
            .archive_dir
            .strip_prefix(&self.site_dir)
            .unwrap_or(&self.archive_dir);
        path.to_string_lossy().replace('\\', "/")
    }

    pub fn source_url(&self, id: SourceId) -> &str {
        match id {
            SourceId::Youtube => &self.url_youtube,
            SourceId::Spotify => &self.url_spotify,
            SourceId::Itunes => &self.url_itunes,
        }
    }

    pub fn source_weight(&self, id: SourceId) -> f64 {
        match id {
            SourceId::Youtube => self.weight_youtube,
            SourceId::Spotify => self.weight_spotify,
            SourceId::Itunes => self.weight_itunes,
        }
    }
}
