// src/config.rs
// Every tunable the scanner has: which search terms to sweep, what counts
// as a scam, how big the top list is, how the learner nudges weights.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_SEARCH_TERMS: &[&str] = &[
    "sol", "ai", "dog", "cat", "pepe", "inu", "pump", "moon", "gem", "new", "launch", "bonk",
    "wif", "meme",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Persistence
    pub database_url: String,
    pub csv_path: String,

    // Scan surface
    pub search_terms: Vec<String>,
    pub top_n: usize,
    pub cycle_interval_secs: u64,

    // Scam filter thresholds
    pub filter: FilterConfig,

    // Signal memory / learning
    pub memory_capacity: i64,
    pub maturation_secs: i64,
    pub learning: LearningConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Minimum pool liquidity required (in USD)
    pub min_liquidity_usd: f64,

    /// Maximum fully-diluted valuation accepted (in USD)
    pub max_fdv_usd: f64,

    /// Minimum 24h volume required (in USD)
    pub min_volume_24h_usd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Price gain (%) a matured signal must show to count as a win
    pub gain_threshold_pct: f64,

    /// Multipliers applied on a win
    pub prepump_boost: f64,
    pub smart_money_boost: f64,
    pub momentum_boost: f64,

    /// Multiplier applied to momentum on anything short of a win
    pub momentum_decay: f64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let search_terms = match env::var("SEARCH_TERMS") {
            Ok(raw) => raw
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            Err(_) => DEFAULT_SEARCH_TERMS.iter().map(|t| t.to_string()).collect(),
        };

        let config = Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:scanner.db".to_string()),

            csv_path: env::var("DASHBOARD_CSV").unwrap_or_else(|_| "dashboard.csv".to_string()),

            search_terms,

            top_n: env_parsed("TOP_N", 10),
            cycle_interval_secs: env_parsed("CYCLE_INTERVAL_SECS", 30),

            filter: FilterConfig {
                min_liquidity_usd: env_parsed("MIN_LIQUIDITY_USD", 8_000.0),
                max_fdv_usd: env_parsed("MAX_FDV_USD", 50_000_000.0),
                min_volume_24h_usd: env_parsed("MIN_VOLUME_24H_USD", 15_000.0),
            },

            memory_capacity: env_parsed("MEMORY_CAPACITY", 200),
            maturation_secs: env_parsed("MATURATION_SECS", 3_600),

            learning: LearningConfig {
                gain_threshold_pct: env_parsed("GAIN_THRESHOLD_PCT", 10.0),
                prepump_boost: env_parsed("PREPUMP_BOOST", 1.03),
                smart_money_boost: env_parsed("SMART_MONEY_BOOST", 1.04),
                momentum_boost: env_parsed("MOMENTUM_BOOST", 1.02),
                momentum_decay: env_parsed("MOMENTUM_DECAY", 0.97),
            },
        };

        Ok(config)
    }
}

/// Read an env var and parse it, falling back to the default when the
/// variable is unset or does not parse.
fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
