//! # Case Matching Module
//!
//! ## Purpose
//! Ranks a pool of candidate case texts against a query text using the
//! similarity engine's composite score. This is the orchestration layer
//! sitting above the scoring core: it owns the thresholding policy and the
//! top-K selection, while each pairwise score stays a pure engine call.
//!
//! ## Input/Output Specification
//! - **Input**: Query text, candidate pool (id + text), matching thresholds
//! - **Output**: Ranked matches with score and tier classification
//! - **Ordering**: Descending score, ascending id on ties — deterministic
//!
//! ## Key Features
//! - Parallel pool scoring (the engine is stateless and `Sync`)
//! - Configurable similar/precedent thresholds
//! - Top-K truncation

use crate::config::MatchingConfig;
use crate::scoring::SimilarityEngine;
use crate::utils::Timer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate case text to score against the query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Caller-assigned candidate identifier
    pub id: String,
    /// Full candidate text
    pub text: String,
}

/// A ranked match from the candidate pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseMatch {
    /// Candidate identifier
    pub id: String,
    /// Composite similarity score (0.0 to 1.0)
    pub score: f64,
    /// Threshold tier the score falls into
    pub tier: MatchTier,
}

/// Threshold classification of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    /// Score at or above the precedent threshold
    Precedent,
    /// Score at or above the similar threshold
    Similar,
}

/// Case matcher combining the engine with threshold policy
pub struct CaseMatcher {
    engine: SimilarityEngine,
    config: MatchingConfig,
}

impl CaseMatcher {
    /// Create a matcher over an engine with the given threshold policy.
    pub fn new(engine: SimilarityEngine, config: MatchingConfig) -> Self {
        Self { engine, config }
    }

    /// Borrow the underlying engine for direct pairwise scoring.
    pub fn engine(&self) -> &SimilarityEngine {
        &self.engine
    }

    /// Score every candidate against the query and return the ranked matches
    /// that clear the similar threshold, truncated to the configured maximum.
    pub fn rank(&self, query: &str, candidates: &[MatchCandidate]) -> Vec<CaseMatch> {
        let timer = Timer::new("rank_candidates");

        let mut matches: Vec<CaseMatch> = candidates
            .par_iter()
            .filter_map(|candidate| {
                let score = self.engine.overall_similarity(query, &candidate.text);
                self.classify(score).map(|tier| CaseMatch {
                    id: candidate.id.clone(),
                    score,
                    tier,
                })
            })
            .collect();

        // Descending score; ascending id keeps equal scores deterministic.
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        matches.truncate(self.config.max_results);

        let elapsed = timer.stop();
        tracing::info!(
            candidates = candidates.len(),
            matches = matches.len(),
            elapsed_ms = elapsed,
            "ranked candidate pool"
        );
        matches
    }

    fn classify(&self, score: f64) -> Option<MatchTier> {
        if score >= self.config.precedent_threshold {
            Some(MatchTier::Precedent)
        } else if score >= self.config.similar_threshold {
            Some(MatchTier::Similar)
        } else {
            None
        }
    }
}
