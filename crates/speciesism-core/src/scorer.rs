//! Scorer: per-text scoring and batch aggregation.
//!
//! For each text the scorer runs two lexicon passes (speciesist and
//! non-speciesist) and the species detector, then derives the speciesist
//! ratio `ss / (ss + ns)`. A text with no signal in either lexicon scores
//! [`NEUTRAL_SCORE`].
//!
//! Batch policy:
//! 1. No aggregation → every per-text result, in input order
//! 2. `average` → mean of per-text scores
//! 3. `maximum` → highest score, first index wins ties
//! 4. A non-empty reference batch adds a [`Comparison`] to any of the above
//!
//! `average` and `maximum` over an empty batch are rejected up front.

use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::lexicon::{Lexicon, NON_SPECIESIST_LEXICON, SPECIESIST_LEXICON};
use crate::species::detect_lowered;
use crate::types::{Aggregation, BatchResult, Comparison, TextScore};

/// Score assigned when neither lexicon matches anything.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Errors raised when a batch cannot be scored as requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Cannot compute '{aggregation}' aggregation over an empty batch")]
    EmptyBatch { aggregation: Aggregation },

    #[error("Cannot compare against references: data batch is empty")]
    EmptyData,
}

/// Round to 4 decimal places.
///
/// Rounds the exact decimal value of the double, sending exact ties to the
/// even digit: 0.15625 becomes 0.1562, not 0.1563.
pub fn round4(value: f64) -> f64 {
    // Formatting any f64 (including NaN and inf) yields a parseable string.
    format!("{:.4}", value).parse().unwrap_or(value)
}

/// Speciesist ratio of two raw scores, unrounded.
pub fn speciesist_ratio(speciesist_raw: f64, non_speciesist_raw: f64) -> f64 {
    let total = speciesist_raw + non_speciesist_raw;
    if total > 0.0 {
        speciesist_raw / total
    } else {
        NEUTRAL_SCORE
    }
}

/// Reject batch shapes that have no well-defined result.
///
/// Call before scoring so bad requests fail without doing any work.
pub fn check_preconditions(
    data_len: usize,
    references_len: usize,
    aggregation: Option<Aggregation>,
) -> Result<(), ScoringError> {
    if data_len == 0 {
        if let Some(aggregation) = aggregation {
            return Err(ScoringError::EmptyBatch { aggregation });
        }
        if references_len > 0 {
            return Err(ScoringError::EmptyData);
        }
    }
    Ok(())
}

/// Fold per-text scores and reference ratios into a batch result.
///
/// `reference_ratios` are the unrounded ratios of the reference texts; an
/// empty slice means no comparison.
pub fn aggregate(
    scores: Vec<TextScore>,
    reference_ratios: &[f64],
    aggregation: Option<Aggregation>,
) -> Result<BatchResult, ScoringError> {
    check_preconditions(scores.len(), reference_ratios.len(), aggregation)?;

    let comparison = if reference_ratios.is_empty() {
        None
    } else {
        Some(compare(&scores, reference_ratios))
    };

    let result = match aggregation {
        None => BatchResult::Scores { scores, comparison },
        Some(Aggregation::Average) => BatchResult::Average {
            speciesist_score: round4(mean_score(&scores)),
            num_texts: scores.len(),
            comparison,
        },
        Some(Aggregation::Maximum) => {
            let (max_index, speciesist_score) = first_maximum(&scores);
            BatchResult::Maximum {
                speciesist_score,
                max_index,
                comparison,
            }
        }
    };

    Ok(result)
}

fn mean_score(scores: &[TextScore]) -> f64 {
    scores.iter().map(|s| s.speciesist_score).sum::<f64>() / scores.len() as f64
}

// Strict `>` keeps the earliest index among ties.
fn first_maximum(scores: &[TextScore]) -> (usize, f64) {
    let mut best = (0, scores[0].speciesist_score);
    for (index, score) in scores.iter().enumerate().skip(1) {
        if score.speciesist_score > best.1 {
            best = (index, score.speciesist_score);
        }
    }
    best
}

fn compare(scores: &[TextScore], reference_ratios: &[f64]) -> Comparison {
    let data_mean = mean_score(scores);
    let references_mean = reference_ratios.iter().sum::<f64>() / reference_ratios.len() as f64;
    Comparison {
        data_mean: round4(data_mean),
        references_mean: round4(references_mean),
        difference: round4(data_mean - references_mean),
    }
}

/// Scores texts against a pair of lexicons.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    speciesist: &'a Lexicon,
    non_speciesist: &'a Lexicon,
}

impl Scorer<'static> {
    /// Scorer over the built-in lexicons.
    pub fn new() -> Self {
        Self {
            speciesist: &*SPECIESIST_LEXICON,
            non_speciesist: &*NON_SPECIESIST_LEXICON,
        }
    }
}

impl Default for Scorer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Scorer<'a> {
    /// Scorer over caller-supplied lexicons.
    pub fn with_lexicons(speciesist: &'a Lexicon, non_speciesist: &'a Lexicon) -> Self {
        Self {
            speciesist,
            non_speciesist,
        }
    }

    pub fn speciesist_lexicon(&self) -> &'a Lexicon {
        self.speciesist
    }

    pub fn non_speciesist_lexicon(&self) -> &'a Lexicon {
        self.non_speciesist
    }

    /// Score a single text.
    pub fn score_text(&self, text: &str) -> TextScore {
        let lowered = text.to_lowercase();
        let speciesist = self.speciesist.score_lowered(&lowered);
        let non_speciesist = self.non_speciesist.score_lowered(&lowered);
        let species = detect_lowered(&lowered);

        let mut categories = BTreeMap::new();
        for record in &speciesist.matches {
            *categories.entry(record.category.clone()).or_insert(0) += 1;
        }

        let speciesist_score = round4(speciesist_ratio(speciesist.raw, non_speciesist.raw));
        debug!(
            speciesist_raw = speciesist.raw,
            non_speciesist_raw = non_speciesist.raw,
            speciesist_score,
            "scored text"
        );

        TextScore {
            speciesist_score,
            speciesist_raw: round4(speciesist.raw),
            non_speciesist_raw: round4(non_speciesist.raw),
            speciesist_terms: speciesist.matches,
            non_speciesist_terms: non_speciesist.matches,
            companion_species: species.companion,
            farmed_species: species.farmed,
            categories,
        }
    }

    /// Unrounded speciesist ratio of a reference text.
    pub fn reference_ratio(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let ss = self.speciesist.score_lowered(&lowered).raw;
        let ns = self.non_speciesist.score_lowered(&lowered).raw;
        speciesist_ratio(ss, ns)
    }

    /// Score a batch, optionally against references, and aggregate.
    pub fn compute<S: AsRef<str>>(
        &self,
        data: &[S],
        references: Option<&[S]>,
        aggregation: Option<Aggregation>,
    ) -> Result<BatchResult, ScoringError> {
        let references = references.unwrap_or(&[]);
        check_preconditions(data.len(), references.len(), aggregation)?;

        debug!(
            texts = data.len(),
            references = references.len(),
            aggregation = aggregation.map(|a| a.as_str()),
            "computing batch"
        );

        let scores: Vec<TextScore> = data.iter().map(|t| self.score_text(t.as_ref())).collect();
        let reference_ratios: Vec<f64> = references
            .iter()
            .map(|t| self.reference_ratio(t.as_ref()))
            .collect();

        aggregate(scores, &reference_ratios, aggregation)
    }
}
