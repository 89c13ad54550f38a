// Filter, score, and order one cycle's deduped pairs.

use std::cmp::Ordering;

use crate::analyzers::scam_filter::ScamFilter;
use crate::analyzers::scoring::composite_score;
use crate::models::{PairSnapshot, RankedPair, WeightVector};

/// Score every pair that survives the scam filter and return them ordered
/// best-first. When fewer than `top_n` pairs qualify the whole list is
/// returned untruncated; an artificially short "top" list from a thin
/// candidate pool helps nobody.
pub fn rank(
    pairs: Vec<PairSnapshot>,
    filter: &ScamFilter,
    weights: &WeightVector,
    top_n: usize,
) -> Vec<RankedPair> {
    let mut scored: Vec<RankedPair> = pairs
        .into_iter()
        .filter(|p| filter.passes(p))
        .map(|p| RankedPair {
            score: composite_score(&p, weights),
            snapshot: p,
        })
        .collect();

    // stable sort keeps arrival order for equal scores
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    if scored.len() < top_n {
        return scored;
    }
    scored.truncate(top_n);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use crate::models::{Liquidity, PriceChange, Volume};
    use crate::scanners::dex_screener::dedupe;

    fn filter() -> ScamFilter {
        ScamFilter::new(&FilterConfig {
            min_liquidity_usd: 8_000.0,
            max_fdv_usd: 50_000_000.0,
            min_volume_24h_usd: 15_000.0,
        })
    }

    /// A pair that passes the filter; `change_5m` drives its score.
    fn clean_pair(address: &str, change_5m: f64) -> PairSnapshot {
        PairSnapshot {
            pair_address: Some(address.to_string()),
            fdv: Some(1_000_000.0),
            liquidity: Some(Liquidity { usd: Some(10_000.0) }),
            volume: Some(Volume { h24: Some(20_000.0) }),
            price_change: Some(PriceChange { m5: Some(change_5m) }),
            ..Default::default()
        }
    }

    #[test]
    fn small_pool_skips_truncation() {
        let pairs: Vec<_> = (0..7).map(|i| clean_pair(&format!("p{i}"), i as f64)).collect();
        let ranked = rank(pairs, &filter(), &WeightVector::default(), 10);
        assert_eq!(ranked.len(), 7);
    }

    #[test]
    fn large_pool_truncates_to_top_n_sorted() {
        let pairs: Vec<_> = (0..15).map(|i| clean_pair(&format!("p{i}"), i as f64)).collect();
        let ranked = rank(pairs, &filter(), &WeightVector::default(), 10);
        assert_eq!(ranked.len(), 10);
        for window in ranked.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
        // best candidate had the highest 5m change
        assert_eq!(ranked[0].snapshot.address(), Some("p14"));
    }

    #[test]
    fn ties_keep_arrival_order() {
        let pairs = vec![
            clean_pair("first", 2.0),
            clean_pair("second", 2.0),
            clean_pair("third", 2.0),
        ];
        let ranked = rank(pairs, &filter(), &WeightVector::default(), 10);
        let addrs: Vec<_> = ranked.iter().map(|r| r.snapshot.address().unwrap()).collect();
        assert_eq!(addrs, vec!["first", "second", "third"]);
    }

    #[test]
    fn filtered_pairs_never_rank() {
        let mut dirty = clean_pair("dirty", 4.0);
        dirty.liquidity = Some(Liquidity { usd: Some(500.0) });
        let ranked = rank(
            vec![dirty, clean_pair("clean", 1.0)],
            &filter(),
            &WeightVector::default(),
            10,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].snapshot.address(), Some("clean"));
    }

    #[test]
    fn overlapping_terms_score_first_occurrence_only() {
        // The same pair surfaced by two search terms with field values
        // fetched at different moments; only the first copy is ranked.
        let first = clean_pair("same", 2.0);
        let second = clean_pair("same", 4.9);

        let unique = dedupe(vec![first, second]);
        let ranked = rank(unique, &filter(), &WeightVector::default(), 10);

        assert_eq!(ranked.len(), 1);
        // score reflects the first copy's 2.0% change, not the later 4.9%
        assert!((ranked[0].snapshot.change_m5() - 2.0).abs() < 1e-9);
    }
}
