//! Batch runner: configured, optionally parallel scoring.
//!
//! The runner loads lexicon overrides once at construction, then scores
//! batches with rayon when the batch is large enough. Per-text scoring has no
//! shared mutable state, so parallel and sequential runs produce identical
//! results, including output order and the `maximum` tie-break.

use rayon::prelude::*;
use tracing::{debug, info};

use speciesism_core::{
    aggregate, check_preconditions, Aggregation, BatchResult, Lexicon, Scorer, SpeciesMentions,
    TextScore, NON_SPECIESIST_LEXICON, SPECIESIST_LEXICON,
};

use crate::config::RuntimeConfig;
use crate::RuntimeError;

/// Scores batches according to a [`RuntimeConfig`].
#[derive(Debug)]
pub struct BatchRunner {
    config: RuntimeConfig,
    speciesist: Option<Lexicon>,
    non_speciesist: Option<Lexicon>,
}

impl BatchRunner {
    /// Create a runner, loading any configured lexicon files.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let speciesist = match &config.lexicons.speciesist {
            Some(path) => {
                let lexicon = Lexicon::from_file(path)?;
                info!(path = %path.display(), terms = lexicon.term_count(), "loaded speciesist lexicon");
                Some(lexicon)
            }
            None => None,
        };

        let non_speciesist = match &config.lexicons.non_speciesist {
            Some(path) => {
                let lexicon = Lexicon::from_file(path)?;
                info!(path = %path.display(), terms = lexicon.term_count(), "loaded non-speciesist lexicon");
                Some(lexicon)
            }
            None => None,
        };

        Ok(Self {
            config,
            speciesist,
            non_speciesist,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Scorer over the configured lexicons, falling back to the built-ins.
    pub fn scorer(&self) -> Scorer<'_> {
        Scorer::with_lexicons(
            self.speciesist.as_ref().unwrap_or(&*SPECIESIST_LEXICON),
            self.non_speciesist
                .as_ref()
                .unwrap_or(&*NON_SPECIESIST_LEXICON),
        )
    }

    /// Score a batch.
    ///
    /// `aggregation` overrides the configured default when given.
    pub fn compute<S: AsRef<str> + Sync>(
        &self,
        data: &[S],
        references: Option<&[S]>,
        aggregation: Option<Aggregation>,
    ) -> Result<BatchResult, RuntimeError> {
        let aggregation = aggregation.or(self.config.aggregation);
        let references = references.unwrap_or(&[]);
        check_preconditions(data.len(), references.len(), aggregation)?;

        let scorer = self.scorer();
        let parallel = self.config.use_parallel(data.len() + references.len());
        debug!(
            texts = data.len(),
            references = references.len(),
            parallel,
            "running batch"
        );

        let (scores, reference_ratios) = if parallel {
            let scores: Vec<TextScore> = data
                .par_iter()
                .map(|t| scorer.score_text(t.as_ref()))
                .collect();
            let ratios: Vec<f64> = references
                .par_iter()
                .map(|t| scorer.reference_ratio(t.as_ref()))
                .collect();
            (scores, ratios)
        } else {
            let scores: Vec<TextScore> =
                data.iter().map(|t| scorer.score_text(t.as_ref())).collect();
            let ratios: Vec<f64> = references
                .iter()
                .map(|t| scorer.reference_ratio(t.as_ref()))
                .collect();
            (scores, ratios)
        };

        Ok(aggregate(scores, &reference_ratios, aggregation)?)
    }

    /// Detect species mentions in each text, in input order.
    pub fn detect<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<SpeciesMentions> {
        if self.config.use_parallel(texts.len()) {
            texts
                .par_iter()
                .map(|t| speciesism_core::detect_species(t.as_ref()))
                .collect()
        } else {
            texts
                .iter()
                .map(|t| speciesism_core::detect_species(t.as_ref()))
                .collect()
        }
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self {
            config: RuntimeConfig::default(),
            speciesist: None,
            non_speciesist: None,
        }
    }
}
