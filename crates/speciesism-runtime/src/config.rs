//! Configuration for speciesism-runtime.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use speciesism_core::Aggregation;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuntimeConfig {
    /// Score texts in parallel
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Batches smaller than this are scored sequentially
    #[serde(default = "default_min_parallel_batch")]
    pub min_parallel_batch: usize,

    /// Aggregation used when the caller does not choose one
    #[serde(default)]
    pub aggregation: Option<Aggregation>,

    /// Lexicon file overrides
    #[serde(default)]
    pub lexicons: LexiconConfig,
}

fn default_true() -> bool {
    true
}

fn default_min_parallel_batch() -> usize {
    64
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_batch: 64,
            aggregation: None,
            lexicons: LexiconConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a file, picking the format from the extension.
    ///
    /// Relative lexicon paths are resolved against the config file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let mut config = if path.extension().map(|e| e == "json").unwrap_or(false) {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };

        if let Some(base) = path.parent() {
            config.lexicons.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Whether a batch of `len` texts should be scored in parallel.
    pub fn use_parallel(&self, len: usize) -> bool {
        self.parallel && len >= self.min_parallel_batch.max(2)
    }
}

/// Paths to lexicon files replacing the built-in dictionaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LexiconConfig {
    #[serde(default)]
    pub speciesist: Option<PathBuf>,

    #[serde(default)]
    pub non_speciesist: Option<PathBuf>,
}

impl LexiconConfig {
    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.speciesist, &mut self.non_speciesist]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
