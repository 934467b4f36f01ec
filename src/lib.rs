//! # Legal Text Similarity Engine
//!
//! ## Overview
//! This library scores the similarity of legal case texts by blending three
//! dimensions: citation overlap, legal-terminology overlap, and semantic
//! (cosine) similarity over term-frequency vectors. A case-matching layer on
//! top ranks candidate pools against a query text.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `text_processing`: Normalization, tokenization, and frequency vectors
//! - `citations`: Pattern-based legal citation extraction
//! - `terminology`: The fixed legal-terminology vocabulary
//! - `scoring`: Cosine, Jaccard, and weighted composite similarity
//! - `matching`: Candidate pool ranking with threshold tiers
//! - `config`: Configuration management and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Legal text pairs (plain strings), optional weight maps
//! - **Output**: Similarity scores in `[0, 1]`, ranked candidate matches
//! - **Guarantees**: Scoring is pure, deterministic, and never fails
//!
//! ## Usage
//! ```rust
//! use legal_text_similarity::SimilarityEngine;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = SimilarityEngine::new()?;
//!     let score = engine.overall_similarity(
//!         "The court found negligence and awarded damages",
//!         "Negligence was found and damages were awarded",
//!     );
//!     assert!(score > 0.0);
//!     Ok(())
//! }
//! ```

// Core modules
pub mod citations;
pub mod config;
pub mod errors;
pub mod matching;
pub mod scoring;
pub mod terminology;
pub mod text_processing;

// Utilities
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use errors::{Result, SimilarityError};
pub use matching::{CaseMatch, CaseMatcher, MatchCandidate, MatchTier};
pub use scoring::{SimilarityBreakdown, SimilarityEngine};

use std::collections::BTreeMap;

/// Weight map consumed by the composite scorer: dimension name to weight.
/// Every supplied value counts toward the averaging denominator, recognized
/// dimensions with positive weight alone contribute to the numerator.
pub type WeightMap = BTreeMap<String, f64>;

/// Weight key for the citation-overlap dimension
pub const WEIGHT_CITATIONS: &str = "citations";
/// Weight key for the legal-terminology dimension
pub const WEIGHT_TERMINOLOGY: &str = "terminology";
/// Weight key for the semantic (cosine) dimension
pub const WEIGHT_SEMANTIC: &str = "semantic";

/// The fixed default blend: citations 0.3, terminology 0.4, semantic 0.3.
/// Sums to 1.0, so the composite divides cleanly.
pub fn default_weights() -> WeightMap {
    let mut weights = WeightMap::new();
    weights.insert(WEIGHT_CITATIONS.to_string(), 0.3);
    weights.insert(WEIGHT_TERMINOLOGY.to_string(), 0.4);
    weights.insert(WEIGHT_SEMANTIC.to_string(), 0.3);
    weights
}
