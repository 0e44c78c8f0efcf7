//! Result types for speciesist framing measurement.
//!
//! Field names and nesting here are the wire contract: they serialize to the
//! same JSON shape every downstream consumer expects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One term that matched at least once in a text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRecord {
    /// The matched term, lower-cased
    pub term: String,

    /// Category the term was listed under
    pub category: String,

    /// Weight of the term in its category
    pub weight: f64,

    /// Number of non-overlapping occurrences (always >= 1)
    pub count: usize,
}

/// Companion and farmed species mentioned in a text, in list order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeciesMentions {
    pub companion: Vec<String>,
    pub farmed: Vec<String>,
}

impl SpeciesMentions {
    pub fn is_empty(&self) -> bool {
        self.companion.is_empty() && self.farmed.is_empty()
    }
}

/// Score and evidence for a single text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextScore {
    /// Speciesist ratio in [0, 1], rounded to 4 decimals; 0.5 with no signal
    pub speciesist_score: f64,

    /// Raw speciesist lexicon score, rounded to 4 decimals
    pub speciesist_raw: f64,

    /// Raw non-speciesist lexicon score, rounded to 4 decimals
    pub non_speciesist_raw: f64,

    pub speciesist_terms: Vec<MatchRecord>,

    pub non_speciesist_terms: Vec<MatchRecord>,

    pub companion_species: Vec<String>,

    pub farmed_species: Vec<String>,

    /// Number of speciesist match records per category.
    /// Non-speciesist matches are never tallied here.
    pub categories: BTreeMap<String, usize>,
}

/// Mean speciesist ratio of a data batch against a reference batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Comparison {
    pub data_mean: f64,
    pub references_mean: f64,
    /// `data_mean - references_mean` from the unrounded means, then rounded
    pub difference: f64,
}

/// How per-text scores are folded into the batch result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Mean of all per-text scores
    Average,
    /// Highest per-text score, first index wins ties
    Maximum,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Average => "average",
            Aggregation::Maximum => "maximum",
        }
    }

    /// Interpret an aggregation passed through as an untyped string.
    ///
    /// Unrecognized values select per-text output, matching how measurement
    /// hosts forward this argument.
    pub fn from_opaque(value: Option<&str>) -> Option<Self> {
        let value = value?;
        match value.parse() {
            Ok(aggregation) => Some(aggregation),
            Err(_) => {
                tracing::warn!(
                    aggregation = value,
                    "unrecognized aggregation, returning per-text scores"
                );
                None
            }
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "average" => Ok(Aggregation::Average),
            "maximum" => Ok(Aggregation::Maximum),
            other => Err(format!(
                "unknown aggregation '{}', expected 'average' or 'maximum'",
                other
            )),
        }
    }
}

/// Output of a batch computation.
///
/// Serialized untagged, so each variant is a flat JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BatchResult {
    /// Every per-text result, in input order.
    Scores {
        scores: Vec<TextScore>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        comparison: Option<Comparison>,
    },

    /// Mean score over the batch.
    Average {
        speciesist_score: f64,
        num_texts: usize,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        comparison: Option<Comparison>,
    },

    /// Highest score and the index of the first text that reached it.
    Maximum {
        speciesist_score: f64,
        max_index: usize,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        comparison: Option<Comparison>,
    },
}

impl BatchResult {
    /// The comparison record, if a reference batch was supplied.
    pub fn comparison(&self) -> Option<&Comparison> {
        match self {
            BatchResult::Scores { comparison, .. }
            | BatchResult::Average { comparison, .. }
            | BatchResult::Maximum { comparison, .. } => comparison.as_ref(),
        }
    }

    /// Per-text results, present only without aggregation.
    pub fn scores(&self) -> Option<&[TextScore]> {
        match self {
            BatchResult::Scores { scores, .. } => Some(scores),
            _ => None,
        }
    }

    /// The aggregated score, absent without aggregation.
    pub fn aggregate_score(&self) -> Option<f64> {
        match self {
            BatchResult::Scores { .. } => None,
            BatchResult::Average {
                speciesist_score, ..
            }
            | BatchResult::Maximum {
                speciesist_score, ..
            } => Some(*speciesist_score),
        }
    }
}
