//! Species mention detection.
//!
//! Presence-only, whole-word lookup of companion and farmed species terms.
//! Output preserves the declared list order; nothing is counted or weighted.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::SpeciesMentions;

/// Species usually kept as companions.
pub static COMPANION_SPECIES: &[&str] = &[
    "dog", "dogs", "puppy", "puppies", "cat", "cats", "kitten", "kittens", "horse", "horses",
    "rabbit", "rabbits", "hamster", "hamsters", "parrot", "parrots", "guinea pig",
];

/// Species usually farmed for food or materials.
pub static FARMED_SPECIES: &[&str] = &[
    "cow", "cows", "cattle", "calf", "calves", "pig", "pigs", "hog", "sow", "piglet", "swine",
    "chicken", "chickens", "hen", "hens", "chick", "chicks", "poultry", "turkey", "turkeys",
    "sheep", "lamb", "lambs", "goat", "goats", "duck", "ducks", "goose", "geese", "fish",
    "salmon", "tuna", "cod", "trout", "tilapia",
];

fn word_pattern(term: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", regex::escape(term)))
        .expect("escaped species term is a valid pattern")
}

lazy_static! {
    static ref COMPANION_PATTERNS: Vec<(&'static str, Regex)> =
        COMPANION_SPECIES.iter().map(|s| (*s, word_pattern(s))).collect();

    static ref FARMED_PATTERNS: Vec<(&'static str, Regex)> =
        FARMED_SPECIES.iter().map(|s| (*s, word_pattern(s))).collect();
}

fn present(patterns: &[(&'static str, Regex)], lowered: &str) -> Vec<String> {
    patterns
        .iter()
        .filter(|(_, re)| re.is_match(lowered))
        .map(|(species, _)| species.to_string())
        .collect()
}

/// Detect which companion and farmed species a text mentions.
pub fn detect_species(text: &str) -> SpeciesMentions {
    detect_lowered(&text.to_lowercase())
}

pub(crate) fn detect_lowered(lowered: &str) -> SpeciesMentions {
    SpeciesMentions {
        companion: present(&COMPANION_PATTERNS, lowered),
        farmed: present(&FARMED_PATTERNS, lowered),
    }
}
