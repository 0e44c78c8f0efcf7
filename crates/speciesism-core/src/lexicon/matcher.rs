//! Term matching strategies.
//!
//! Single words are matched on word boundaries so that "layer" never fires
//! inside "player". Phrases containing whitespace are matched as literal
//! contiguous substrings. The strategy is chosen once, when the term is built.

use regex::Regex;

use super::LexiconError;

/// How a single term is located in lower-cased text.
#[derive(Debug, Clone)]
pub enum TermMatcher {
    /// Whole-word match, anchored on `\b` at both ends.
    Word(Regex),
    /// Literal substring match for multi-word phrases.
    Phrase(String),
}

impl TermMatcher {
    /// Choose the matching strategy for `term`.
    ///
    /// The term must already be lower-cased and trimmed.
    pub fn for_term(term: &str) -> Result<Self, LexiconError> {
        if term.split_whitespace().count() > 1 {
            return Ok(TermMatcher::Phrase(term.to_string()));
        }

        let pattern = format!(r"\b{}\b", regex::escape(term));
        Regex::new(&pattern)
            .map(TermMatcher::Word)
            .map_err(|e| LexiconError::ValidationError(format!("term '{}': {}", term, e)))
    }

    /// Count non-overlapping occurrences in `haystack`.
    pub fn count(&self, haystack: &str) -> usize {
        match self {
            TermMatcher::Word(re) => re.find_iter(haystack).count(),
            TermMatcher::Phrase(phrase) => haystack.matches(phrase.as_str()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_uses_word_boundaries() {
        let m = TermMatcher::for_term("layer").unwrap();
        assert!(matches!(m, TermMatcher::Word(_)));
        assert_eq!(m.count("the player scored"), 0);
        assert_eq!(m.count("a layer hen, another layer."), 2);
    }

    #[test]
    fn test_hyphenated_word_is_single_word() {
        let m = TermMatcher::for_term("grow-out").unwrap();
        assert!(matches!(m, TermMatcher::Word(_)));
        assert_eq!(m.count("the grow-out phase"), 1);
    }

    #[test]
    fn test_phrase_is_literal() {
        let m = TermMatcher::for_term("head of cattle").unwrap();
        assert!(matches!(m, TermMatcher::Phrase(_)));
        assert_eq!(m.count("500 head of cattle and 20 head of cattle"), 2);
        assert_eq!(m.count("head cattle"), 0);
    }

    #[test]
    fn test_phrase_has_no_boundary_requirement() {
        let m = TermMatcher::for_term("put down").unwrap();
        assert_eq!(m.count("input downstream"), 1);
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        let m = TermMatcher::for_term("a.b").unwrap();
        assert_eq!(m.count("axb"), 0);
        assert_eq!(m.count("a.b"), 1);
    }

    #[test]
    fn test_phrase_counts_non_overlapping() {
        let m = TermMatcher::for_term("aa aa").unwrap();
        assert_eq!(m.count("aa aa aa"), 1);
    }
}
