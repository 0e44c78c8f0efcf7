//! # speciesism-runtime
//!
//! Runtime layer over `speciesism-core`: configuration loading, lexicon
//! overrides, and parallel batch scoring. Scoring semantics live entirely
//! in the core crate; the runtime only decides which lexicons to use and
//! how to schedule the per-text work.

pub mod config;
pub mod runner;

pub use config::{ConfigError, LexiconConfig, RuntimeConfig};
pub use runner::BatchRunner;

use speciesism_core::{LexiconError, ScoringError};
use thiserror::Error;

/// Errors from the runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("Scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}
