// Snapshot source: sweeps the DexScreener search endpoint for each
// configured term, keeps the Solana pairs, and answers best-match price
// lookups for the learner. A failed term never fails the sweep.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use log::{debug, warn};
use reqwest::Client;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

use crate::models::{PairSnapshot, SearchResponse};

const SEARCH_URL: &str = "https://api.dexscreener.com/latest/dex/search";

/// DexScreener allows roughly 300 requests per minute; stay under it.
const REQUESTS_PER_SECOND: u32 = 5;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(8);
const PRICE_TIMEOUT: Duration = Duration::from_secs(10);

/// What went wrong talking to DexScreener. All variants are demoted to
/// "no data" at the cycle boundary, but the logs keep them apart so a
/// malformed payload is distinguishable from a dead network.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("dexscreener returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub struct DexScreenerScanner {
    client: Client,
    limiter: DefaultDirectRateLimiter,
}

impl DexScreenerScanner {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("solscan-prepump/0.1")
            .build()
            .expect("Failed to create HTTP client");

        let quota = Quota::per_second(
            NonZeroU32::new(REQUESTS_PER_SECOND).expect("rate limit must be nonzero"),
        );

        Self {
            client,
            limiter: RateLimiter::direct(quota),
        }
    }

    /// Sweep every search term and collect the Solana pairs. Terms that
    /// error are logged and skipped; the result may contain the same pair
    /// more than once when terms overlap.
    pub async fn fetch_pairs(&self, terms: &[String]) -> Vec<PairSnapshot> {
        let mut pairs = Vec::new();

        for term in terms {
            match self.search(term, SEARCH_TIMEOUT).await {
                Ok(found) => {
                    debug!("term '{}' returned {} pairs", term, found.len());
                    pairs.extend(found.into_iter().filter(PairSnapshot::is_solana));
                }
                Err(e) => {
                    warn!("⚠️ search '{}' skipped: {}", term, e);
                }
            }
        }

        pairs
    }

    /// Best-match current price for a token symbol: the first pair the
    /// search returns. None when nothing matches or the price is unusable.
    pub async fn current_price(&self, symbol: &str) -> Result<Option<f64>, ScanError> {
        let pairs = self.search(symbol, PRICE_TIMEOUT).await?;
        let price = pairs.first().map(PairSnapshot::price_usd).unwrap_or(0.0);
        Ok(if price > 0.0 { Some(price) } else { None })
    }

    async fn search(&self, term: &str, timeout: Duration) -> Result<Vec<PairSnapshot>, ScanError> {
        self.limiter.until_ready().await;

        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", term)])
            .timeout(timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScanError::Status(response.status()));
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        Ok(parsed.pairs.unwrap_or_default())
    }
}

impl Default for DexScreenerScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse overlapping search results to one record per pair address,
/// first occurrence wins. Records without an address are dropped.
pub fn dedupe(pairs: Vec<PairSnapshot>) -> Vec<PairSnapshot> {
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::new();

    for pair in pairs {
        let addr = match pair.address() {
            Some(a) => a.to_string(),
            None => continue,
        };
        if seen.insert(addr) {
            result.push(pair);
        }
    }

    result
}
