//! Weighted, categorized term dictionaries and the lexicon matcher.
//!
//! A lexicon is an ordered list of categories, each holding an ordered list of
//! `(term, weight)` entries. Scoring is a flat keyword tally: every
//! `(category, term)` pair is matched independently against the lower-cased
//! text, and each pair that matches contributes `weight * count` to the raw
//! score and one [`MatchRecord`] to the ledger.
//!
//! A term listed under two categories is counted twice. That is additive
//! evidence, not a bug, so entries are never deduplicated across categories.
//!
//! Lexicons can also be loaded from YAML or JSON:
//!
//! ```yaml
//! name: speciesist
//! categories:
//!   - name: objectification
//!     terms:
//!       - { term: livestock, weight: 0.8 }
//!       - { term: head of cattle, weight: 0.7 }
//! ```

pub mod builtin;
mod matcher;

pub use builtin::{
    TermTable, NON_SPECIESIST_LEXICON, NON_SPECIESIST_TERMS, SPECIESIST_LEXICON,
    SPECIESIST_TERMS,
};
pub use matcher::TermMatcher;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::MatchRecord;

/// Errors that can occur when building or loading a lexicon.
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Failed to read lexicon file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Lexicon validation failed: {0}")]
    ValidationError(String),
}

/// Serializable form of a lexicon, as written in lexicon files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LexiconDefinition {
    /// Lexicon name (e.g., "speciesist")
    pub name: String,

    /// Categories in declaration order
    #[serde(default)]
    pub categories: Vec<CategoryDefinition>,
}

/// Serializable form of one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryDefinition {
    pub name: String,

    #[serde(default)]
    pub terms: Vec<TermDefinition>,
}

/// Serializable form of one weighted term.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TermDefinition {
    pub term: String,
    pub weight: f64,
}

/// A compiled term: its text, weight, and matching strategy.
#[derive(Debug, Clone)]
pub struct Term {
    text: String,
    weight: f64,
    matcher: TermMatcher,
}

impl Term {
    fn new(text: &str, weight: f64) -> Result<Self, LexiconError> {
        if text.trim().is_empty() {
            return Err(LexiconError::ValidationError(
                "term must not be empty".to_string(),
            ));
        }
        if text.trim() != text {
            return Err(LexiconError::ValidationError(format!(
                "term '{}' has leading or trailing whitespace",
                text
            )));
        }
        if !weight.is_finite() || weight <= 0.0 || weight > 1.0 {
            return Err(LexiconError::ValidationError(format!(
                "term '{}' has weight {} outside (0, 1]",
                text, weight
            )));
        }

        // Input text is lower-cased before matching, so terms must be too.
        let text = text.to_lowercase();
        let matcher = TermMatcher::for_term(&text)?;
        Ok(Self {
            text,
            weight,
            matcher,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A named group of terms.
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    terms: Vec<Term>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
}

/// Raw score and match ledger from one lexicon pass over one text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexiconScore {
    /// Sum of `weight * count` over every matched term
    pub raw: f64,

    /// One record per matched `(category, term)` pair, in lexicon order
    pub matches: Vec<MatchRecord>,
}

/// A compiled, immutable term dictionary.
#[derive(Debug, Clone)]
pub struct Lexicon {
    name: String,
    categories: Vec<Category>,
}

impl Lexicon {
    /// Build a lexicon from a definition, validating every entry.
    pub fn from_definition(definition: &LexiconDefinition) -> Result<Self, LexiconError> {
        if definition.name.trim().is_empty() {
            return Err(LexiconError::ValidationError(
                "lexicon name must not be empty".to_string(),
            ));
        }

        let mut categories = Vec::with_capacity(definition.categories.len());
        for category in &definition.categories {
            if category.name.trim().is_empty() {
                return Err(LexiconError::ValidationError(format!(
                    "lexicon '{}' has a category with an empty name",
                    definition.name
                )));
            }

            let terms = category
                .terms
                .iter()
                .map(|t| Term::new(&t.term, t.weight))
                .collect::<Result<Vec<_>, _>>()?;

            categories.push(Category {
                name: category.name.clone(),
                terms,
            });
        }

        Ok(Self {
            name: definition.name.clone(),
            categories,
        })
    }

    /// Build a lexicon from a static table.
    pub fn from_table(name: &str, table: TermTable) -> Result<Self, LexiconError> {
        let definition = LexiconDefinition {
            name: name.to_string(),
            categories: table
                .iter()
                .map(|(category, terms)| CategoryDefinition {
                    name: category.to_string(),
                    terms: terms
                        .iter()
                        .map(|(term, weight)| TermDefinition {
                            term: term.to_string(),
                            weight: *weight,
                        })
                        .collect(),
                })
                .collect(),
        };
        Self::from_definition(&definition)
    }

    /// Parse a lexicon from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, LexiconError> {
        let definition: LexiconDefinition = serde_yaml::from_str(yaml)?;
        Self::from_definition(&definition)
    }

    /// Parse a lexicon from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        let definition: LexiconDefinition = serde_json::from_str(json)?;
        Self::from_definition(&definition)
    }

    /// Load a lexicon from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load a lexicon from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a lexicon file, picking the format from the extension.
    ///
    /// `.json` is parsed as JSON; anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Total number of `(category, term)` entries.
    pub fn term_count(&self) -> usize {
        self.categories.iter().map(|c| c.terms.len()).sum()
    }

    /// Serializable view of this lexicon.
    pub fn to_definition(&self) -> LexiconDefinition {
        LexiconDefinition {
            name: self.name.clone(),
            categories: self
                .categories
                .iter()
                .map(|c| CategoryDefinition {
                    name: c.name.clone(),
                    terms: c
                        .terms
                        .iter()
                        .map(|t| TermDefinition {
                            term: t.text.clone(),
                            weight: t.weight,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Score `text` against this lexicon.
    ///
    /// Matching is case-insensitive. Returns a zero score and an empty ledger
    /// when nothing matches.
    pub fn score(&self, text: &str) -> LexiconScore {
        self.score_lowered(&text.to_lowercase())
    }

    /// Score text that has already been lower-cased.
    pub(crate) fn score_lowered(&self, lowered: &str) -> LexiconScore {
        let mut result = LexiconScore::default();

        for category in &self.categories {
            for term in &category.terms {
                let count = term.matcher.count(lowered);
                if count == 0 {
                    continue;
                }
                result.raw += term.weight * count as f64;
                result.matches.push(MatchRecord {
                    term: term.text.clone(),
                    category: category.name.clone(),
                    weight: term.weight,
                    count,
                });
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_LEXICON_YAML: &str = r#"
name: test
categories:
  - name: first
    terms:
      - { term: pest, weight: 0.5 }
      - { term: head of cattle, weight: 0.7 }
  - name: second
    terms:
      - { term: Pest, weight: 0.25 }
"#;

    #[test]
    fn test_livestock_scenario() {
        let score = SPECIESIST_LEXICON.score("The livestock were harvested and processed.");
        assert!(score.raw > 0.0);
        assert!(score.matches.iter().any(|m| m.term == "livestock"));
        // 0.8 + 0.9 + 0.8
        assert!((score.raw - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_match_returns_zero() {
        let s = SPECIESIST_LEXICON.score("The weather is sunny.");
        let n = NON_SPECIESIST_LEXICON.score("The weather is sunny.");
        assert_eq!(s.raw, 0.0);
        assert_eq!(n.raw, 0.0);
        assert!(s.matches.is_empty());
        assert!(n.matches.is_empty());
    }

    #[test]
    fn test_non_speciesist_matches() {
        let score =
            NON_SPECIESIST_LEXICON.score("The sentient beings were killed, their suffering documented.");
        assert!(score.raw > 0.0);
        let terms: Vec<&str> = score.matches.iter().map(|m| m.term.as_str()).collect();
        assert_eq!(terms, vec!["sentient being", "killed", "suffering"]);
    }

    #[test]
    fn test_word_boundary_player() {
        let score = SPECIESIST_LEXICON.score("The player scored.");
        assert!(!score.matches.iter().any(|m| m.term == "layer"));
        assert!(score.matches.is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let score = SPECIESIST_LEXICON.score("LIVESTOCK Livestock livestock");
        assert_eq!(score.matches.len(), 1);
        assert_eq!(score.matches[0].count, 3);
        assert!((score.raw - 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_phrase_and_word_score_independently() {
        // "spent hen" (phrase) and "spent" (word) are separate entries.
        let score = SPECIESIST_LEXICON.score("Each spent hen was removed.");
        let terms: Vec<&str> = score.matches.iter().map(|m| m.term.as_str()).collect();
        assert_eq!(terms, vec!["spent hen", "spent"]);
        assert!((score.raw - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_head_of_cattle_phrase_only() {
        let score = SPECIESIST_LEXICON.score("They sold 40 head of cattle.");
        assert_eq!(score.matches.len(), 1);
        assert_eq!(score.matches[0].term, "head of cattle");
        assert_eq!(score.matches[0].category, "objectification");
    }

    #[test]
    fn test_duplicate_terms_across_categories_are_not_collapsed() {
        let lexicon = Lexicon::from_yaml(TEST_LEXICON_YAML).unwrap();
        let score = lexicon.score("A pest is a pest.");
        assert_eq!(score.matches.len(), 2);
        assert_eq!(score.matches[0].category, "first");
        assert_eq!(score.matches[0].count, 2);
        assert_eq!(score.matches[1].category, "second");
        assert_eq!(score.matches[1].term, "pest");
        assert!((score.raw - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_definition_roundtrip_preserves_order() {
        let definition = SPECIESIST_LEXICON.to_definition();
        assert_eq!(definition.categories[0].terms[0].term, "livestock");
        assert_eq!(definition.categories[4].terms[7].term, "trophy");

        let json = serde_json::to_string(&definition).unwrap();
        let reloaded = Lexicon::from_json(&json).unwrap();
        assert_eq!(reloaded.to_definition(), definition);
    }

    #[test]
    fn test_rejects_out_of_range_weight() {
        let yaml = r#"
name: bad
categories:
  - name: c
    terms:
      - { term: x, weight: 1.5 }
"#;
        let err = Lexicon::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, LexiconError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_zero_weight_and_empty_term() {
        let zero = r#"
name: bad
categories:
  - name: c
    terms:
      - { term: x, weight: 0.0 }
"#;
        assert!(Lexicon::from_yaml(zero).is_err());

        let empty = r#"
name: bad
categories:
  - name: c
    terms:
      - { term: "  ", weight: 0.5 }
"#;
        assert!(Lexicon::from_yaml(empty).is_err());
    }

    #[test]
    fn test_rejects_empty_names() {
        assert!(Lexicon::from_yaml("name: \"\"\ncategories: []\n").is_err());
        let yaml = r#"
name: ok
categories:
  - name: ""
    terms: []
"#;
        assert!(Lexicon::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("lexicon.yaml");
        fs::write(&yaml_path, TEST_LEXICON_YAML).unwrap();
        let lexicon = Lexicon::from_file(&yaml_path).unwrap();
        assert_eq!(lexicon.name(), "test");
        assert_eq!(lexicon.term_count(), 3);

        let json_path = dir.path().join("lexicon.json");
        fs::write(&json_path, serde_json::to_string(&lexicon.to_definition()).unwrap()).unwrap();
        let reloaded = Lexicon::from_file(&json_path).unwrap();
        assert_eq!(reloaded.to_definition(), lexicon.to_definition());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Lexicon::from_file("/nonexistent/lexicon.yaml").unwrap_err();
        assert!(matches!(err, LexiconError::IoError(_)));
    }
}
