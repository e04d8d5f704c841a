// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod config;
pub mod delta;
pub mod history;
pub mod markup;
pub mod narrate;
pub mod render;
pub mod run;
pub mod source;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{aggregate, CompositeRanking, WeightedSource};
pub use crate::config::RunConfig;
pub use crate::delta::{analyze, Movement, MovementInsight};
pub use crate::run::{run, run_with, RunArtifacts};
pub use crate::source::types::{SourceId, SourceRecord, SourceTable};
