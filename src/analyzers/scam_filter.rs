// Boolean gate in front of the scorer. Rejects pairs whose liquidity,
// valuation, or volume numbers look like a rug or wash trading. Missing
// fields read as zero and fail the minimum checks, so an incomplete
// record can never slip through.

use crate::config::FilterConfig;
use crate::models::PairSnapshot;

/// A 24h volume above this multiple of liquidity is treated as wash
/// trading.
const MAX_VOLUME_LIQUIDITY_RATIO: f64 = 50.0;

pub struct ScamFilter {
    min_liquidity_usd: f64,
    max_fdv_usd: f64,
    min_volume_24h_usd: f64,
}

impl ScamFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            min_liquidity_usd: config.min_liquidity_usd,
            max_fdv_usd: config.max_fdv_usd,
            min_volume_24h_usd: config.min_volume_24h_usd,
        }
    }

    pub fn passes(&self, pair: &PairSnapshot) -> bool {
        let liquidity = pair.liquidity_usd();
        let fdv = pair.fdv_usd();
        let volume = pair.volume_h24();

        if liquidity < self.min_liquidity_usd {
            return false;
        }
        if fdv > self.max_fdv_usd {
            return false;
        }
        if volume < self.min_volume_24h_usd {
            return false;
        }
        if volume > liquidity * MAX_VOLUME_LIQUIDITY_RATIO {
            return false;
        }

        true
    }
}
