// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// DexScreener search response. `pairs` is null when the term matches
/// nothing, so it deserializes as an Option.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub pairs: Option<Vec<PairSnapshot>>,
}

/// One pair record as returned by the DexScreener search endpoint.
///
/// Every field the API may omit is optional; numeric accessors below
/// default to 0.0 on absence so downstream filters reject incomplete
/// records instead of erroring on them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PairSnapshot {
    pub chain_id: Option<String>,
    pub pair_address: Option<String>,
    pub base_token: Option<BaseToken>,
    pub price_usd: Option<String>,
    pub fdv: Option<f64>,
    pub liquidity: Option<Liquidity>,
    pub volume: Option<Volume>,
    pub price_change: Option<PriceChange>,
    pub txns: Option<Txns>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BaseToken {
    pub address: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Liquidity {
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Volume {
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PriceChange {
    pub m5: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Txns {
    pub m5: Option<TxnCounts>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TxnCounts {
    pub buys: Option<f64>,
    pub sells: Option<f64>,
}

impl PairSnapshot {
    pub fn is_solana(&self) -> bool {
        self.chain_id
            .as_deref()
            .map(|c| c.eq_ignore_ascii_case("solana"))
            .unwrap_or(false)
    }

    /// Pair address, or None when missing or empty. Records without an
    /// address cannot be deduplicated and are dropped upstream.
    pub fn address(&self) -> Option<&str> {
        self.pair_address.as_deref().filter(|a| !a.is_empty())
    }

    pub fn symbol(&self) -> &str {
        self.base_token
            .as_ref()
            .and_then(|b| b.symbol.as_deref())
            .unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.base_token
            .as_ref()
            .and_then(|b| b.name.as_deref())
            .unwrap_or("")
    }

    /// Current price in USD. The API ships this as a string; unparsable
    /// or missing values read as 0.0.
    pub fn price_usd(&self) -> f64 {
        self.price_usd
            .as_deref()
            .and_then(|p| p.parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    pub fn fdv_usd(&self) -> f64 {
        self.fdv.unwrap_or(0.0)
    }

    pub fn liquidity_usd(&self) -> f64 {
        self.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0)
    }

    pub fn volume_h24(&self) -> f64 {
        self.volume.as_ref().and_then(|v| v.h24).unwrap_or(0.0)
    }

    pub fn change_m5(&self) -> f64 {
        self.price_change.as_ref().and_then(|c| c.m5).unwrap_or(0.0)
    }

    pub fn buys_m5(&self) -> f64 {
        self.txns
            .as_ref()
            .and_then(|t| t.m5.as_ref())
            .and_then(|m| m.buys)
            .unwrap_or(0.0)
    }

    pub fn sells_m5(&self) -> f64 {
        self.txns
            .as_ref()
            .and_then(|t| t.m5.as_ref())
            .and_then(|m| m.sells)
            .unwrap_or(0.0)
    }
}

/// Multipliers for the three scoring sub-signals. Read by the scorer
/// every cycle, replaced wholesale by the learner. No bounds are
/// enforced; the update scheme is deliberately unclamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub prepump: f64,
    pub momentum: f64,
    pub smart_money: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            prepump: 1.0,
            momentum: 1.0,
            smart_money: 1.0,
        }
    }
}

/// One past top-ranked signal, kept so the learner can compare the
/// recorded price against the market later. Never mutated after insert.
#[derive(Debug, Clone)]
pub struct SignalRecord {
    pub id: Option<i64>,
    pub token: String,
    pub price_usd: f64,
    pub recorded_at: DateTime<Utc>,
    pub score: f64,
}

/// A scored pair as emitted to the result sink.
#[derive(Debug, Clone)]
pub struct RankedPair {
    pub score: f64,
    pub snapshot: PairSnapshot,
}
