// The "AI" score: three heuristic sub-signals, each scaled by its
// learned weight and summed. Pure functions of the snapshot and the
// weight vector.

use crate::models::{PairSnapshot, WeightVector};

/// 24h volume spread evenly over the day gives 288 five-minute windows.
const WINDOWS_PER_DAY: f64 = 288.0;

/// Bucketed early-breakout score, 0 to 7 before weighting:
/// +2 for mid-band liquidity, +3 for a modest 5m climb, +2 when the
/// estimated 5m volume runs hot relative to the pool.
pub fn pre_pump_signal(pair: &PairSnapshot) -> f64 {
    let liquidity = pair.liquidity_usd();
    let change_5m = pair.change_m5();
    let volume_5m = pair.volume_h24() / WINDOWS_PER_DAY;

    let mut score = 0.0;

    if liquidity > 20_000.0 && liquidity < 200_000.0 {
        score += 2.0;
    }
    if change_5m > 1.0 && change_5m < 5.0 {
        score += 3.0;
    }
    if liquidity > 0.0 && volume_5m > liquidity * 0.05 {
        score += 2.0;
    }

    score
}

/// Bonus for a lopsided buy/sell count in the last five minutes,
/// suggesting informed accumulation.
pub fn smart_money_boost(pair: &PairSnapshot) -> f64 {
    let buys = pair.buys_m5();
    let sells = pair.sells_m5();

    if buys > 100.0 && buys > sells * 2.0 {
        3.0
    } else if buys > 50.0 {
        2.0
    } else {
        0.0
    }
}

/// Weighted composite: bucketed pre-pump points, the raw 5m change as
/// momentum (can be negative), and the smart-money bonus.
pub fn composite_score(pair: &PairSnapshot, weights: &WeightVector) -> f64 {
    let momentum = pair.change_m5();

    pre_pump_signal(pair) * weights.prepump
        + momentum * weights.momentum
        + smart_money_boost(pair) * weights.smart_money
}
