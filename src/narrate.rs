// src/narrate.rs
//! Narrative commentary client: provider abstraction over the Gemini
//! `generateContent` endpoint, plus disabled and mock clients for runs and
//! tests without network access.
//!
//! The core only assembles the input (top five with scores, the lowest entry,
//! and the movement list) and embeds whatever text comes back; a failed or
//! disabled client yields `None` and the caller falls back to canned text.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::NarrativeConfig;
use crate::delta::Movement;

/// Everything the commentary prompt is built from.
#[derive(Debug, Clone)]
pub struct NarrativeInput {
    /// Leading `(title, score)` pairs, at most five.
    pub top: Vec<(String, f64)>,
    /// Title of the lowest-ranked entry, when the ranking is non-empty.
    pub bottom: Option<String>,
    pub movements: Vec<Movement>,
}

#[async_trait]
pub trait NarrativeClient: Send + Sync {
    /// Free-text commentary, or `None` when unavailable.
    async fn commentary(&self, input: &NarrativeInput) -> Option<String>;
    fn provider_name(&self) -> &'static str;
}

pub type DynNarrativeClient = Arc<dyn NarrativeClient>;

/// Factory: real Gemini client when enabled, otherwise a no-op client.
pub fn build_client(cfg: &NarrativeConfig) -> DynNarrativeClient {
    if cfg.enabled {
        Arc::new(GeminiClient::new(cfg.api_key.clone(), cfg.model.clone()))
    } else {
        Arc::new(DisabledClient)
    }
}

/// Prompt shared by every provider. Two-host banter: Noizzer (caustic) and
/// Glint (upbeat), reacting to the leaders and to any notable movement.
pub fn build_prompt(input: &NarrativeInput) -> String {
    let mut top_lines = String::new();
    for (i, (title, score)) in input.top.iter().take(5).enumerate() {
        top_lines.push_str(&format!("#{} {} (score {:.1})\n", i + 1, title, score));
    }
    let bottom_line = input
        .bottom
        .as_deref()
        .map(|t| format!("Bottom of the list: {t}\n"))
        .unwrap_or_default();

    let movement_lines = if input.movements.is_empty() {
        "none".to_string()
    } else {
        input
            .movements
            .iter()
            .map(|m| m.insight.describe(&m.title, m.current_rank))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are the two hosts of a music ranking site: Noizzer (caustic punk \
         fan, hard on chart hits) and Glint (polite, trend-savvy, keeps the \
         peace). Write a short back-and-forth (300-500 characters) about this \
         week's chart. Noizzer needles the top three; Glint answers with the \
         fans' side. If the movement list below is non-empty, have Noizzer \
         tease the climbers and Glint cheer them on; if it is empty, skip it. \
         Glint gets the last word. Mark speakers as \
         <div class='noizzers-talk'>...</div> and <div class='glints-talk'>...</div> \
         with <b>Name</b> labels and <br> breaks.\n\n\
         Chart:\n{top_lines}{bottom_line}\n\
         Movement:\n{movement_lines}\n"
    )
}

// ------------------------------------------------------------
// Gemini provider
// ------------------------------------------------------------

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            endpoint: "https://generativelanguage.googleapis.com/v1/models".to_string(),
        }
    }

    #[cfg(test)]
    fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    async fn generate(&self, prompt: String) -> anyhow::Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );
        let req = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let resp = self.http.post(&url).json(&req).send().await?;
        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("generateContent returned status {status}");
        }
        let body: GenerateResponse = resp.json().await?;
        let text = body
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() {
            anyhow::bail!("generateContent returned no text");
        }
        Ok(text)
    }
}

#[async_trait]
impl NarrativeClient for GeminiClient {
    async fn commentary(&self, input: &NarrativeInput) -> Option<String> {
        match self.generate(build_prompt(input)).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(provider = self.provider_name(), error = %e, "commentary unavailable");
                None
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

// ------------------------------------------------------------
// No-op and test clients
// ------------------------------------------------------------

pub struct DisabledClient;

#[async_trait]
impl NarrativeClient for DisabledClient {
    async fn commentary(&self, _input: &NarrativeInput) -> Option<String> {
        None
    }

    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic client for tests.
pub struct MockClient {
    pub fixed: String,
}

#[async_trait]
impl NarrativeClient for MockClient {
    async fn commentary(&self, _input: &NarrativeInput) -> Option<String> {
        Some(self.fixed.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
