//! # Legal Terminology Module
//!
//! ## Purpose
//! The fixed legal-terminology vocabulary used for the terminology dimension
//! of the composite score, kept as declarative data so it can be tested and
//! revised independently of the scoring algorithm.
//!
//! ## Input/Output Specification
//! - **Input**: Token sets from normalized text
//! - **Output**: The subset of tokens that are known legal terms
//!
//! The vocabulary is a closed set matched against already-lowercased tokens.
//! It is the domain knowledge encoded in the engine; changing it changes
//! every terminology score, so additions go through product review.

use std::collections::BTreeSet;

/// The fixed legal-terminology vocabulary.
pub const LEGAL_VOCABULARY: &[&str] = &[
    "jurisdiction",
    "precedent",
    "statute",
    "regulation",
    "constitution",
    "liability",
    "negligence",
    "contract",
    "tort",
    "damages",
    "injunction",
    "writ",
    "mandamus",
    "habeas",
    "corpus",
    "appeal",
    "affirm",
    "reverse",
    "remand",
    "motion",
    "pleading",
    "discovery",
    "evidence",
    "testimony",
    "witness",
    "exhibit",
    "objection",
    "sustain",
    "overrule",
    "verdict",
    "judgment",
    "sentence",
    "probation",
    "parole",
    "bail",
    "arraignment",
    "indictment",
    "information",
    "complaint",
    "petition",
    "brief",
    "opinion",
    "holding",
    "dicta",
    "ratio",
    "obiter",
    "stare",
    "decisis",
];

/// The vocabulary as a set, built per call; callers that filter repeatedly
/// should hold on to the result.
pub fn vocabulary_set() -> BTreeSet<&'static str> {
    LEGAL_VOCABULARY.iter().copied().collect()
}

/// Restrict a token set to known legal terms.
pub fn filter_legal_terms<'a>(
    tokens: &BTreeSet<&'a str>,
    vocabulary: &BTreeSet<&'static str>,
) -> BTreeSet<&'a str> {
    tokens
        .iter()
        .copied()
        .filter(|token| vocabulary.contains(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_has_no_duplicates() {
        let set = vocabulary_set();
        assert_eq!(set.len(), LEGAL_VOCABULARY.len());
    }

    #[test]
    fn vocabulary_is_lowercase_and_token_length() {
        for term in LEGAL_VOCABULARY {
            assert_eq!(*term, term.to_lowercase());
            // Every term must survive the tokenizer's length filter.
            assert!(term.chars().count() >= crate::text_processing::MIN_TOKEN_CHARS);
        }
    }

    #[test]
    fn core_doctrine_terms_are_present() {
        let set = vocabulary_set();
        for term in ["negligence", "damages", "contract", "stare", "decisis"] {
            assert!(set.contains(term), "missing vocabulary term: {}", term);
        }
    }

    #[test]
    fn filter_keeps_only_vocabulary_terms() {
        let vocabulary = vocabulary_set();
        let tokens: BTreeSet<&str> =
            ["negligence", "awarded", "damages", "dispute"].into_iter().collect();
        let filtered = filter_legal_terms(&tokens, &vocabulary);
        let expected: BTreeSet<&str> = ["negligence", "damages"].into_iter().collect();
        assert_eq!(filtered, expected);
    }
}
