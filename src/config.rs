//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the similarity engine and CLI: composite
//! weights, matching thresholds, and logging, with validation and type-safe
//! access.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration file (TOML), environment variables
//! - **Output**: Validated configuration structs with defaults and overrides
//! - **Validation**: Range checking, weight-sum verification
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Environment variables (highest priority)
//! 2. Configuration file
//! 3. Default values (lowest priority)
//!
//! ## Usage
//! ```rust,no_run
//! use legal_text_similarity::config::Config;
//!
//! let config = Config::from_file("config.toml")?;
//! println!("similar threshold: {}", config.matching.similar_threshold);
//! # Ok::<(), legal_text_similarity::SimilarityError>(())
//! ```

use crate::errors::{Result, SimilarityError};
use crate::{WeightMap, WEIGHT_CITATIONS, WEIGHT_SEMANTIC, WEIGHT_TERMINOLOGY};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure containing all settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Composite score weights
    pub weights: WeightsConfig,
    /// Matching thresholds and limits
    pub matching: MatchingConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Weights for the composite similarity blend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    /// Weight of citation-set overlap
    pub citations: f64,
    /// Weight of legal-terminology overlap
    pub terminology: f64,
    /// Weight of semantic (cosine) similarity
    pub semantic: f64,
}

/// Matching thresholds and result limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum composite score for a candidate to count as similar
    pub similar_threshold: f64,
    /// Minimum composite score for a candidate to count as precedent
    pub precedent_threshold: f64,
    /// Maximum number of ranked matches to return
    pub max_results: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            matching: MatchingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            citations: 0.3,
            terminology: 0.4,
            semantic: 0.3,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            similar_threshold: 0.6,
            precedent_threshold: 0.7,
            max_results: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            let mut config = Self::default();
            config.apply_env_overrides()?;
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| SimilarityError::Config {
            message: format!("Failed to read config file {:?}: {}", path, e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| SimilarityError::Config {
            message: format!("Failed to parse config file {:?}: {}", path, e),
        })?;

        // Apply environment variable overrides
        config.apply_env_overrides()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("LEGAL_SIM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(max_results) = std::env::var("LEGAL_SIM_MAX_RESULTS") {
            self.matching.max_results =
                max_results.parse().map_err(|_| SimilarityError::Config {
                    message: "Invalid number in LEGAL_SIM_MAX_RESULTS".to_string(),
                })?;
        }
        if let Ok(threshold) = std::env::var("LEGAL_SIM_SIMILAR_THRESHOLD") {
            self.matching.similar_threshold =
                threshold.parse().map_err(|_| SimilarityError::Config {
                    message: "Invalid number in LEGAL_SIM_SIMILAR_THRESHOLD".to_string(),
                })?;
        }
        if let Ok(threshold) = std::env::var("LEGAL_SIM_PRECEDENT_THRESHOLD") {
            self.matching.precedent_threshold =
                threshold.parse().map_err(|_| SimilarityError::Config {
                    message: "Invalid number in LEGAL_SIM_PRECEDENT_THRESHOLD".to_string(),
                })?;
        }

        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("weights.citations", self.weights.citations),
            ("weights.terminology", self.weights.terminology),
            ("weights.semantic", self.weights.semantic),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimilarityError::ValidationFailed {
                    field: field.to_string(),
                    reason: "Weight must be a finite, non-negative number".to_string(),
                });
            }
        }

        let total = self.weights.citations + self.weights.terminology + self.weights.semantic;
        if total <= 0.0 {
            return Err(SimilarityError::ValidationFailed {
                field: "weights".to_string(),
                reason: "Weights must sum to a positive value".to_string(),
            });
        }

        for (field, value) in [
            ("matching.similar_threshold", self.matching.similar_threshold),
            (
                "matching.precedent_threshold",
                self.matching.precedent_threshold,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimilarityError::ValidationFailed {
                    field: field.to_string(),
                    reason: "Threshold must lie within [0, 1]".to_string(),
                });
            }
        }

        if self.matching.similar_threshold > self.matching.precedent_threshold {
            return Err(SimilarityError::ValidationFailed {
                field: "matching.similar_threshold".to_string(),
                reason: "Similar threshold cannot exceed precedent threshold".to_string(),
            });
        }

        if self.matching.max_results == 0 {
            return Err(SimilarityError::ValidationFailed {
                field: "matching.max_results".to_string(),
                reason: "Maximum results must be greater than zero".to_string(),
            });
        }

        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(SimilarityError::ValidationFailed {
                field: "logging.level".to_string(),
                reason: format!("Invalid log level: {}", self.logging.level),
            });
        }

        Ok(())
    }

    /// Get configuration as TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SimilarityError::Config {
            message: format!("Failed to serialize config to TOML: {}", e),
        })
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl WeightsConfig {
    /// Convert to the weight map the scoring engine consumes.
    pub fn to_weight_map(&self) -> WeightMap {
        let mut weights = WeightMap::new();
        weights.insert(WEIGHT_CITATIONS.to_string(), self.citations);
        weights.insert(WEIGHT_TERMINOLOGY.to_string(), self.terminology);
        weights.insert(WEIGHT_SEMANTIC.to_string(), self.semantic);
        weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.weights.citations, 0.3);
        assert_eq!(config.weights.terminology, 0.4);
        assert_eq!(config.weights.semantic, 0.3);
        assert_eq!(config.matching.similar_threshold, 0.6);
        assert_eq!(config.matching.precedent_threshold, 0.7);
    }

    #[test]
    fn toml_round_trip() {
        let config = Config::default();
        let rendered = config.to_toml().expect("serialize");
        let parsed: Config = toml::from_str(&rendered).expect("parse");
        assert_eq!(parsed.weights.terminology, config.weights.terminology);
        assert_eq!(parsed.matching.max_results, config.matching.max_results);
        assert_eq!(parsed.logging.level, config.logging.level);
    }

    #[test]
    fn loads_partial_file_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[matching]\nmax_results = 3").expect("write");
        let config = Config::from_file(file.path()).expect("load");
        assert_eq!(config.matching.max_results, 3);
        // Unspecified tables fall back to defaults.
        assert_eq!(config.weights.terminology, 0.4);
    }

    #[test]
    fn rejects_negative_weight() {
        let config = Config {
            weights: WeightsConfig {
                citations: -0.1,
                ..WeightsConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_weight_sum() {
        let config = Config {
            weights: WeightsConfig {
                citations: 0.0,
                terminology: 0.0,
                semantic: 0.0,
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = Config {
            matching: MatchingConfig {
                similar_threshold: 0.9,
                precedent_threshold: 0.7,
                max_results: 10,
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let config = Config {
            matching: MatchingConfig {
                similar_threshold: 1.5,
                precedent_threshold: 1.6,
                max_results: 10,
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let config = Config {
            logging: LoggingConfig {
                level: "verbose".to_string(),
                json_format: false,
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn weight_map_carries_all_dimensions() {
        let map = WeightsConfig::default().to_weight_map();
        assert_eq!(map.get(WEIGHT_CITATIONS), Some(&0.3));
        assert_eq!(map.get(WEIGHT_TERMINOLOGY), Some(&0.4));
        assert_eq!(map.get(WEIGHT_SEMANTIC), Some(&0.3));
    }
}
