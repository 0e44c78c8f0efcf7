//! Built-in term dictionaries.
//!
//! These tables are the published lexicons and must not be edited casually:
//! scores produced by other implementations are only comparable while the
//! terms, weights, and declaration order stay identical.

use lazy_static::lazy_static;

use super::Lexicon;

/// A static dictionary table: `(category, [(term, weight)])` in declaration order.
pub type TermTable = &'static [(&'static str, &'static [(&'static str, f64)])];

/// Terms that commodify, euphemize, or deindividuate animals.
pub static SPECIESIST_TERMS: TermTable = &[
    (
        "objectification",
        &[
            ("livestock", 0.8),
            ("stock animal", 0.8),
            ("head of cattle", 0.7),
            ("meat animal", 0.9),
            ("food animal", 0.8),
            ("production animal", 0.9),
            ("breeding stock", 0.8),
            ("broiler", 0.7),
            ("feeder", 0.7),
            ("finisher", 0.7),
            ("carcass", 0.5),
            ("byproduct", 0.4),
        ],
    ),
    (
        "euphemism",
        &[
            ("harvested", 0.9),
            ("culled", 0.7),
            ("dispatched", 0.7),
            ("processed", 0.8),
            ("depopulated", 0.9),
            ("put down", 0.4),
            ("destroyed", 0.6),
            ("thinned", 0.8),
            ("spent hen", 0.9),
            ("spent", 0.6),
            ("humane slaughter", 0.8),
            ("humane harvest", 0.9),
            ("humanely raised", 0.6),
            ("humanely killed", 0.7),
        ],
    ),
    (
        "deindividuation",
        &[
            ("batch", 0.7),
            ("inventory", 0.9),
            ("throughput", 0.9),
            ("production cycle", 0.7),
            ("grow-out", 0.8),
            ("stocking density", 0.6),
        ],
    ),
    (
        "industry_normalization",
        &[
            ("animal husbandry", 0.5),
            ("feedlot", 0.5),
            ("rendering plant", 0.5),
            ("gestation crate", 0.5),
            ("battery cage", 0.5),
            ("farrowing crate", 0.5),
            ("veal crate", 0.5),
        ],
    ),
    (
        "property_framing",
        &[
            ("animal owner", 0.5),
            ("chattel", 0.9),
            ("beast of burden", 0.7),
            ("pest", 0.6),
            ("vermin", 0.8),
            ("nuisance animal", 0.7),
            ("game animal", 0.6),
            ("trophy", 0.8),
        ],
    ),
];

/// Terms that foreground animal agency, rights, or suffering.
pub static NON_SPECIESIST_TERMS: TermTable = &[
    (
        "rights_language",
        &[
            ("animal rights", 0.8),
            ("animal liberation", 0.9),
            ("sentient being", 0.9),
            ("nonhuman animal", 0.8),
            ("non-human animal", 0.8),
            ("fellow creature", 0.7),
            ("animal companion", 0.6),
            ("companion animal", 0.5),
            ("animal guardian", 0.7),
            ("sanctuary", 0.6),
        ],
    ),
    (
        "agency_language",
        &[
            ("someone", 0.7),
            ("individual", 0.5),
            ("personality", 0.4),
            ("suffered", 0.5),
            ("grieved", 0.6),
            ("mourned", 0.6),
        ],
    ),
    (
        "accurate_language",
        &[
            ("killed", 0.6),
            ("slaughtered", 0.5),
            ("confined", 0.5),
            ("imprisoned", 0.7),
            ("exploited", 0.7),
            ("mutilated", 0.8),
            ("suffering", 0.5),
            ("cruelty", 0.6),
            ("speciesism", 0.9),
            ("speciesist", 0.9),
            ("carnism", 0.9),
        ],
    ),
];

lazy_static! {
    /// The built-in speciesist lexicon, compiled once per process.
    pub static ref SPECIESIST_LEXICON: Lexicon = Lexicon::from_table("speciesist", SPECIESIST_TERMS)
        .expect("built-in speciesist lexicon must be valid");

    /// The built-in non-speciesist lexicon, compiled once per process.
    pub static ref NON_SPECIESIST_LEXICON: Lexicon =
        Lexicon::from_table("non_speciesist", NON_SPECIESIST_TERMS)
            .expect("built-in non-speciesist lexicon must be valid");
}
