//! # speciesism-core
//!
//! Deterministic lexical measurement of speciesist framing in text.
//!
//! Each text is scored against two weighted term dictionaries: one for
//! language that diminishes animals (objectification, euphemism,
//! deindividuation, industry normalization, property framing) and one for
//! language that foregrounds them (rights, agency, accurate description).
//! The speciesist ratio `ss / (ss + ns)` is the primary output.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **No model calls**: Scoring is a flat keyword tally
//! 3. **Traceable**: Every score carries its match ledger
//! 4. **Parallel-safe**: Texts are scored independently with no shared mutable state
//!
//! ## Example
//!
//! ```rust
//! use speciesism_core::{compute, Aggregation, BatchResult};
//!
//! let data = ["Livestock inventory processed, throughput increased."];
//! let result = compute(&data, None, Some(Aggregation::Average)).unwrap();
//!
//! if let BatchResult::Average { speciesist_score, .. } = result {
//!     assert!(speciesist_score > 0.7);
//! }
//! ```

pub mod info;
pub mod lexicon;
pub mod scorer;
pub mod species;
pub mod types;

// Re-export main types at crate root
pub use info::{measurement_info, MeasurementInfo};
pub use lexicon::{
    Lexicon, LexiconDefinition, LexiconError, LexiconScore, NON_SPECIESIST_LEXICON,
    SPECIESIST_LEXICON,
};
pub use scorer::{
    aggregate, check_preconditions, round4, speciesist_ratio, Scorer, ScoringError,
    NEUTRAL_SCORE,
};
pub use species::{detect_species, COMPANION_SPECIES, FARMED_SPECIES};
pub use types::{
    Aggregation, BatchResult, Comparison, MatchRecord, SpeciesMentions, TextScore,
};

/// Score a batch with the built-in lexicons.
///
/// This is the main entry point.
///
/// # Arguments
///
/// * `data` - Texts to score
/// * `references` - Optional comparison batch; a non-empty one adds a `comparison`
/// * `aggregation` - `None` for per-text results, or `average` / `maximum`
///
/// # Errors
///
/// Returns [`ScoringError::EmptyBatch`] when `data` is empty and an
/// aggregation is requested, and [`ScoringError::EmptyData`] when `data` is
/// empty but references are given.
pub fn compute<S: AsRef<str>>(
    data: &[S],
    references: Option<&[S]>,
    aggregation: Option<Aggregation>,
) -> Result<BatchResult, ScoringError> {
    Scorer::new().compute(data, references, aggregation)
}

/// Score a single text with the built-in lexicons.
pub fn score_text(text: &str) -> TextScore {
    Scorer::new().score_text(text)
}

/// Cross-module tests over the public entry points.
#[cfg(test)]
mod pipeline_tests {
    use super::*;

    const BATCH: &[&str] = &[
        "The livestock were harvested and processed.",
        "The weather is sunny.",
        "Animal liberation requires recognizing sentient beings suffering from speciesism.",
        "The pigs and chickens were confined.",
        "The dog and cat played.",
    ];

    #[test]
    fn test_zero_signal_texts_score_half() {
        for text in ["The weather is sunny.", "The dog and cat played.", ""] {
            let score = score_text(text);
            assert_eq!(score.speciesist_score, 0.5, "{}", text);
            assert!(score.speciesist_terms.is_empty());
            assert!(score.non_speciesist_terms.is_empty());
        }
    }

    #[test]
    fn test_dog_and_cat_are_companions() {
        let score = score_text("The dog and cat played.");
        assert_eq!(score.companion_species, vec!["dog", "cat"]);
        assert!(score.farmed_species.is_empty());
    }

    #[test]
    fn test_average_equals_mean_of_individual_scores() {
        let individual: Vec<f64> = BATCH.iter().map(|t| score_text(t).speciesist_score).collect();
        let expected = round4(individual.iter().sum::<f64>() / individual.len() as f64);

        let result = compute(BATCH, None, Some(Aggregation::Average)).unwrap();
        assert_eq!(result.aggregate_score(), Some(expected));
        assert!(matches!(result, BatchResult::Average { num_texts: 5, .. }));
    }

    #[test]
    fn test_maximum_matches_individual_scores() {
        let result = compute(BATCH, None, Some(Aggregation::Maximum)).unwrap();
        assert_eq!(
            result,
            BatchResult::Maximum {
                speciesist_score: 1.0,
                max_index: 0,
                comparison: None,
            }
        );
    }

    #[test]
    fn test_per_text_results_match_single_scoring() {
        let result = compute(BATCH, None, None).unwrap();
        let scores = result.scores().unwrap();
        for (text, score) in BATCH.iter().zip(scores) {
            assert_eq!(&score_text(text), score);
        }
    }

    #[test]
    fn test_difference_is_rounded_mean_difference() {
        let references = ["The weather is sunny.", "Livestock inventory processed."];
        let result = compute(BATCH, Some(&references[..]), None).unwrap();
        let comparison = result.comparison().unwrap();

        let scorer = Scorer::new();
        let data_mean = BATCH
            .iter()
            .map(|t| scorer.score_text(t).speciesist_score)
            .sum::<f64>()
            / BATCH.len() as f64;
        let references_mean = references
            .iter()
            .map(|t| scorer.reference_ratio(t))
            .sum::<f64>()
            / references.len() as f64;

        assert_eq!(comparison.data_mean, round4(data_mean));
        assert_eq!(comparison.references_mean, 0.75);
        assert_eq!(comparison.difference, round4(data_mean - references_mean));
        assert_eq!(comparison.difference, -0.35);
    }

    #[test]
    fn test_determinism_same_input_same_output() {
        let first = compute(BATCH, Some(BATCH), None).unwrap();
        let second = compute(BATCH, Some(BATCH), None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.comparison().unwrap().difference, 0.0);
    }

    #[test]
    fn test_wire_contract_field_names() {
        let result = compute(&["The livestock were killed."], None, None).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        let score = &json["scores"][0];

        assert_eq!(score["speciesist_score"], 0.5714);
        assert_eq!(score["speciesist_raw"], 0.8);
        assert_eq!(score["non_speciesist_raw"], 0.6);
        assert_eq!(score["speciesist_terms"][0]["term"], "livestock");
        assert_eq!(score["speciesist_terms"][0]["category"], "objectification");
        assert_eq!(score["speciesist_terms"][0]["count"], 1);
        assert_eq!(score["non_speciesist_terms"][0]["term"], "killed");
        assert_eq!(score["categories"]["objectification"], 1);
        assert!(score["companion_species"].as_array().unwrap().is_empty());
        assert!(json.get("comparison").is_none());
    }
}
