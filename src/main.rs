//! # Legal Similarity CLI Driver
//!
//! ## Purpose
//! Command-line entry point for the similarity engine: score one text file
//! against another, print the per-dimension breakdown, or rank a file
//! against a directory pool of candidate texts.
//!
//! ## Input/Output Specification
//! - **Input**: Text files, configuration file, environment variables
//! - **Output**: Similarity scores on stdout, human-readable or JSON
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Build the similarity engine (compiles all patterns)
//! 4. Score the pair, or rank the pool
//! 5. Print results

use clap::{Arg, ArgAction, Command};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use legal_text_similarity::{
    config::Config,
    errors::{Result, SimilarityError},
    matching::{CaseMatcher, MatchCandidate, MatchTier},
    scoring::SimilarityEngine,
    utils::TextUtils,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("error[{}]: {}", e.category(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = Command::new("legal-sim")
        .version("0.1.0")
        .author("Legal Search Team")
        .about("Legal text similarity scoring with citation and terminology analysis")
        .arg(
            Arg::new("text1")
                .value_name("FILE")
                .help("Query text file")
                .required(true),
        )
        .arg(
            Arg::new("text2")
                .value_name("FILE")
                .help("Second text file (omit when using --pool)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("breakdown")
                .long("breakdown")
                .help("Print per-dimension scores alongside the composite")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit JSON instead of human-readable output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pool")
                .long("pool")
                .value_name("DIR")
                .help("Rank FILE against every .txt file in DIR"),
        )
        .get_matches();

    // Load configuration
    let config_path = matches.get_one::<String>("config").unwrap();
    let config = Config::from_file(config_path)?;

    // Initialize logging
    init_logging(&config)?;
    info!("Legal similarity engine starting");

    let text1_path = matches.get_one::<String>("text1").unwrap();
    let query = read_text(text1_path)?;
    debug!(
        file = %text1_path,
        words = TextUtils::word_count(&query),
        preview = %TextUtils::extract_preview(&query, 12),
        "loaded query text"
    );

    let as_json = matches.get_flag("json");

    if let Some(pool_dir) = matches.get_one::<String>("pool") {
        let engine = SimilarityEngine::new()?;
        let matcher = CaseMatcher::new(engine, config.matching.clone());
        return rank_pool(&matcher, &query, pool_dir, as_json);
    }

    let text2_path = matches.get_one::<String>("text2").ok_or_else(|| {
        SimilarityError::Config {
            message: "A second text file is required unless --pool is given".to_string(),
        }
    })?;
    let other = read_text(text2_path)?;
    debug!(
        file = %text2_path,
        words = TextUtils::word_count(&other),
        preview = %TextUtils::extract_preview(&other, 12),
        "loaded comparison text"
    );

    let engine = SimilarityEngine::new()?;

    if matches.get_flag("breakdown") {
        let breakdown = engine.similarity_breakdown(&query, &other);
        if as_json {
            println!("{}", serde_json::to_string_pretty(&breakdown).map_err(json_error)?);
        } else {
            println!("citations:   {:.4}", breakdown.citations);
            println!("terminology: {:.4}", breakdown.terminology);
            println!("semantic:    {:.4}", breakdown.semantic);
            println!("overall:     {:.4}", breakdown.overall);
        }
    } else {
        let score =
            engine.weighted_similarity(&query, &other, &config.weights.to_weight_map());
        if as_json {
            println!("{}", serde_json::json!({ "score": score }));
        } else {
            println!("{:.4}", score);
        }
    }

    Ok(())
}

/// Initialize logging and tracing
fn init_logging(config: &Config) -> Result<()> {
    let level: tracing::Level =
        config.logging.level.parse().map_err(|_| SimilarityError::Config {
            message: format!("Invalid log level: {}", config.logging.level),
        })?;
    let filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .json()
                    .with_filter(filter),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .with_filter(filter),
            )
            .init();
    }

    Ok(())
}

fn read_text(path: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| SimilarityError::Config {
        message: format!("Failed to read text file '{}': {}", path, e),
    })
}

/// Rank the query against every `.txt` file in the pool directory.
fn rank_pool(matcher: &CaseMatcher, query: &str, pool_dir: &str, as_json: bool) -> Result<()> {
    let candidates = load_pool(pool_dir)?;
    info!(candidates = candidates.len(), dir = %pool_dir, "loaded candidate pool");

    let ranked = matcher.rank(query, &candidates);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&ranked).map_err(json_error)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("no candidates cleared the similarity threshold");
        return Ok(());
    }
    for (position, case_match) in ranked.iter().enumerate() {
        println!(
            "{:>3}. {:<32} {:.4}  {}",
            position + 1,
            TextUtils::truncate(&case_match.id, 32),
            case_match.score,
            tier_label(case_match.tier)
        );
    }

    Ok(())
}

fn load_pool(pool_dir: &str) -> Result<Vec<MatchCandidate>> {
    let dir = Path::new(pool_dir);
    let mut candidates = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
            continue;
        }
        let id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("candidate")
            .to_string();
        let text = std::fs::read_to_string(&path)?;
        candidates.push(MatchCandidate { id, text });
    }

    if candidates.is_empty() {
        return Err(SimilarityError::Config {
            message: format!("No .txt candidates found in '{}'", pool_dir),
        });
    }

    Ok(candidates)
}

fn tier_label(tier: MatchTier) -> &'static str {
    match tier {
        MatchTier::Precedent => "precedent",
        MatchTier::Similar => "similar",
    }
}

fn json_error(e: serde_json::Error) -> SimilarityError {
    SimilarityError::Internal {
        message: format!("JSON serialization failed: {}", e),
    }
}
