//! # Citation Extraction Module
//!
//! ## Purpose
//! Recognizes legal citations (case reporters, statute sections, CFR
//! references) in normalized text via a fixed list of patterns.
//!
//! ## Input/Output Specification
//! - **Input**: Normalized text (see `text_processing`)
//! - **Output**: Distinct matched citation strings, first-occurrence order
//! - **Pattern Families**: US Reports, Federal Reporter, State reporter,
//!   general volume-reporter-page, statute `§` section, CFR `§` regulation
//!
//! ## Matching Against Normalized Text
//! Extraction runs after punctuation stripping, so the patterns are written
//! for that stream: reporter abbreviations have their periods replaced by
//! spaces (`u.s.` → `u s`, `c.f.r.` → `c f r`), gaps between atoms may be
//! multi-space, and a section-number decimal appears as a trailing
//! space-separated digit run. Only `§` survives stripping and may be matched
//! literally.

use crate::errors::{Result, SimilarityError};
use regex::Regex;
use std::collections::HashSet;

/// Citation pattern families, applied independently and unioned.
///
/// Declarative data rather than inline logic so the list can be tested and
/// revised without touching the extraction algorithm.
const CITATION_PATTERNS: &[&str] = &[
    // US Reports: "410 u s 113"
    r"\b\d+\s+u\s+s\s+\d+\b",
    // Federal Reporter with optional series: "987 f 3d 1250", "55 f 100"
    r"\b\d+\s+f\s+(?:\d+d\s+)?\d+\b",
    // State reporters: "100 s 200"
    r"\b\d+\s+s\s+\d+\b",
    // General volume-reporter-page catch-all: "123 wash 456"
    r"\b\d+\s+[a-z]+\s+\d+\b",
    // Statute sections: "c § 1983", decimal part as trailing digit run
    r"\b[a-z]+\s*§\s*\d+(?:\s+\d+)?\b",
    // CFR regulations: "29 c f r § 1910 147"
    r"\b\d+\s+c\s+f\s+r\s*§\s*\d+(?:\s+\d+)?\b",
];

/// Citation extractor with patterns compiled once at construction
pub struct CitationExtractor {
    patterns: Vec<Regex>,
}

impl CitationExtractor {
    /// Compile the fixed pattern list. A pattern that fails to compile is a
    /// construction-time error; extraction itself never fails.
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::with_capacity(CITATION_PATTERNS.len());
        for pattern in CITATION_PATTERNS {
            patterns.push(Regex::new(pattern).map_err(|e| {
                SimilarityError::InvalidPattern {
                    pattern: (*pattern).to_string(),
                    details: e.to_string(),
                }
            })?);
        }
        Ok(Self { patterns })
    }

    /// Extract distinct citation strings from normalized text.
    ///
    /// Every pattern family is applied independently; matches are ordered by
    /// position in the text and deduplicated by matched text. An empty result
    /// is valid and common.
    pub fn extract(&self, normalized: &str) -> Vec<String> {
        let mut matches: Vec<(usize, &str)> = Vec::new();
        for pattern in &self.patterns {
            for mat in pattern.find_iter(normalized) {
                matches.push((mat.start(), mat.as_str()));
            }
        }

        // Stable sort: position first, pattern order breaks ties.
        matches.sort_by_key(|(start, _)| *start);

        let mut seen = HashSet::new();
        let citations: Vec<String> = matches
            .into_iter()
            .filter(|(_, text)| seen.insert(*text))
            .map(|(_, text)| text.to_string())
            .collect();

        tracing::trace!(count = citations.len(), "extracted citations");
        citations
    }
}
