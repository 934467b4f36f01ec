//! # Similarity Scoring Module
//!
//! ## Purpose
//! Scores pairs of legal texts: cosine similarity over term-frequency
//! vectors, Jaccard similarity over token sets, citation-set and
//! terminology-set overlap, and the weighted composite blending all three
//! dimensions.
//!
//! ## Input/Output Specification
//! - **Input**: Raw text pairs, optional caller-supplied weight map
//! - **Output**: Similarity scores in `[0, 1]`
//! - **Contract**: scoring never fails — every method returns a number, and
//!   degenerate inputs map to the documented edge-case constants
//!
//! ## Edge-Case Policy
//! - Jaccard of two empty token sets is 1.0 (two "nothing" texts are
//!   identical); one empty set scores 0.0. The same policy applies to the
//!   citation and terminology component sets.
//! - Cosine over an empty frequency vector is 0.0, not 1.0 — the vector
//!   short-circuit differs from the set policy on purpose.
//! - A weight map whose values sum to zero (or less) scores 0.0 outright.

use crate::citations::CitationExtractor;
use crate::errors::Result;
use crate::terminology::{filter_legal_terms, vocabulary_set};
use crate::text_processing::{frequency_vector, token_set, TextNormalizer};
use crate::{
    default_weights, WeightMap, WEIGHT_CITATIONS, WEIGHT_SEMANTIC, WEIGHT_TERMINOLOGY,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Stateless similarity engine holding pre-compiled patterns and the fixed
/// vocabulary. Safe to share across threads.
pub struct SimilarityEngine {
    normalizer: TextNormalizer,
    extractor: CitationExtractor,
    vocabulary: BTreeSet<&'static str>,
}

/// Per-dimension scores alongside the blended composite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    /// Citation-set Jaccard similarity
    pub citations: f64,
    /// Legal-terminology-set Jaccard similarity
    pub terminology: f64,
    /// Cosine similarity over term-frequency vectors
    pub semantic: f64,
    /// Weighted composite under the default blend
    pub overall: f64,
}

impl SimilarityEngine {
    /// Build the engine, compiling all patterns. This is the only fallible
    /// step; every scoring call afterwards is total.
    pub fn new() -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new()?,
            extractor: CitationExtractor::new()?,
            vocabulary: vocabulary_set(),
        })
    }

    /// Cosine similarity between the term-frequency vectors of two texts.
    ///
    /// Tokens shorter than the minimum length are excluded; counts are not
    /// deduplicated. Either vector being empty scores 0.0.
    pub fn cosine_similarity(&self, text1: &str, text2: &str) -> f64 {
        let norm1 = self.normalizer.normalize(text1);
        let norm2 = self.normalizer.normalize(text2);
        cosine_of_vectors(&frequency_vector(&norm1), &frequency_vector(&norm2))
    }

    /// Jaccard similarity between the deduplicated token sets of two texts.
    pub fn jaccard_similarity(&self, text1: &str, text2: &str) -> f64 {
        let norm1 = self.normalizer.normalize(text1);
        let norm2 = self.normalizer.normalize(text2);
        jaccard_of_sets(&token_set(&norm1), &token_set(&norm2))
    }

    /// Weighted composite similarity under a caller-supplied weight map.
    ///
    /// The denominator is the sum of ALL supplied weight values, whether or
    /// not the key names a recognized dimension; only the recognized keys
    /// (`citations`, `terminology`, `semantic`) with positive values
    /// contribute to the numerator. An unrecognized key therefore dilutes
    /// the composite — observable behavior callers rely on, kept as-is.
    /// A non-positive total scores 0.0 without dividing.
    pub fn weighted_similarity(&self, text1: &str, text2: &str, weights: &WeightMap) -> f64 {
        let total_weight: f64 = weights.values().sum();
        if !(total_weight > 0.0) {
            return 0.0;
        }

        let norm1 = self.normalizer.normalize(text1);
        let norm2 = self.normalizer.normalize(text2);

        let mut weighted_sum = 0.0;
        if let Some(weight) = positive_weight(weights, WEIGHT_CITATIONS) {
            weighted_sum += weight * self.citation_component(&norm1, &norm2);
        }
        if let Some(weight) = positive_weight(weights, WEIGHT_TERMINOLOGY) {
            weighted_sum += weight * self.terminology_component(&norm1, &norm2);
        }
        if let Some(weight) = positive_weight(weights, WEIGHT_SEMANTIC) {
            weighted_sum +=
                weight * cosine_of_vectors(&frequency_vector(&norm1), &frequency_vector(&norm2));
        }

        clamp_unit(weighted_sum / total_weight)
    }

    /// Composite similarity under the fixed default blend
    /// (citations 0.3, terminology 0.4, semantic 0.3).
    ///
    /// This is the entry point case-matching callers score with; thresholds
    /// applied to the result are caller policy.
    pub fn overall_similarity(&self, text1: &str, text2: &str) -> f64 {
        self.weighted_similarity(text1, text2, &default_weights())
    }

    /// Per-dimension scores plus the default-blend composite.
    pub fn similarity_breakdown(&self, text1: &str, text2: &str) -> SimilarityBreakdown {
        let norm1 = self.normalizer.normalize(text1);
        let norm2 = self.normalizer.normalize(text2);

        let breakdown = SimilarityBreakdown {
            citations: self.citation_component(&norm1, &norm2),
            terminology: self.terminology_component(&norm1, &norm2),
            semantic: cosine_of_vectors(&frequency_vector(&norm1), &frequency_vector(&norm2)),
            overall: self.overall_similarity(text1, text2),
        };

        tracing::debug!(
            citations = breakdown.citations,
            terminology = breakdown.terminology,
            semantic = breakdown.semantic,
            overall = breakdown.overall,
            "similarity breakdown"
        );
        breakdown
    }

    /// Extract distinct citation strings from raw text (normalizes first).
    pub fn extract_citations(&self, text: &str) -> Vec<String> {
        self.extractor.extract(&self.normalizer.normalize(text))
    }

    /// Citation-set Jaccard over normalized text.
    fn citation_component(&self, norm1: &str, norm2: &str) -> f64 {
        let set1: BTreeSet<String> = self.extractor.extract(norm1).into_iter().collect();
        let set2: BTreeSet<String> = self.extractor.extract(norm2).into_iter().collect();
        jaccard_of_sets(&set1, &set2)
    }

    /// Terminology-set Jaccard: token sets restricted to the fixed
    /// vocabulary before comparing.
    fn terminology_component(&self, norm1: &str, norm2: &str) -> f64 {
        let terms1 = filter_legal_terms(&token_set(norm1), &self.vocabulary);
        let terms2 = filter_legal_terms(&token_set(norm2), &self.vocabulary);
        jaccard_of_sets(&terms1, &terms2)
    }
}

fn positive_weight(weights: &WeightMap, key: &str) -> Option<f64> {
    weights.get(key).copied().filter(|weight| *weight > 0.0)
}

fn clamp_unit(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Cosine of two term-frequency vectors. The ordered maps fix the summation
/// order, so equal inputs always produce bit-identical output.
fn cosine_of_vectors(vec1: &BTreeMap<&str, u32>, vec2: &BTreeMap<&str, u32>) -> f64 {
    if vec1.is_empty() || vec2.is_empty() {
        return 0.0;
    }

    let mut dot_product = 0.0f64;
    for (token, count1) in vec1 {
        if let Some(count2) = vec2.get(token) {
            dot_product += f64::from(*count1) * f64::from(*count2);
        }
    }

    let magnitude1 = magnitude(vec1);
    let magnitude2 = magnitude(vec2);
    // Second guard behind the empty check; a vector of counts cannot have
    // zero magnitude, but the division must never be reachable regardless.
    if magnitude1 == 0.0 || magnitude2 == 0.0 {
        return 0.0;
    }

    clamp_unit(dot_product / (magnitude1 * magnitude2))
}

fn magnitude(vector: &BTreeMap<&str, u32>) -> f64 {
    vector
        .values()
        .map(|count| f64::from(*count) * f64::from(*count))
        .sum::<f64>()
        .sqrt()
}

/// Jaccard over arbitrary ordered sets with the shared edge-case policy:
/// both empty scores 1.0, exactly one empty scores 0.0.
fn jaccard_of_sets<T: Ord>(set1: &BTreeSet<T>, set2: &BTreeSet<T>) -> f64 {
    if set1.is_empty() && set2.is_empty() {
        return 1.0;
    }
    if set1.is_empty() || set2.is_empty() {
        return 0.0;
    }

    let intersection = set1.intersection(set2).count();
    let union = set1.union(set2).count();
    if union == 0 {
        return 0.0;
    }

    clamp_unit(intersection as f64 / union as f64)
}
