// Closes the loop between past signals and what the market actually did.
// Each cycle the learner walks the whole signal memory, re-prices every
// record old enough to have matured, and nudges the weight vector:
// a >= +10% move reinforces all three sub-signals, anything less decays
// momentum only, it being the noisiest of the three.
//
// The weight vector is treated as a value: the learner never mutates the
// live one, it returns a replacement for the cycle loop to swap in and
// persist. Weights are multiplicative and unbounded; there is no decay
// toward 1.0 and no clamp.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use log::{info, warn};

use crate::config::LearningConfig;
use crate::database::Database;
use crate::models::{SignalRecord, WeightVector};
use crate::scanners::dex_screener::DexScreenerScanner;
use crate::utils::percentage_change;

pub struct WeightLearner {
    maturation: Duration,
    gain_threshold_pct: f64,
    prepump_boost: f64,
    smart_money_boost: f64,
    momentum_boost: f64,
    momentum_decay: f64,
}

impl WeightLearner {
    pub fn new(learning: &LearningConfig, maturation_secs: i64) -> Self {
        Self {
            maturation: Duration::seconds(maturation_secs),
            gain_threshold_pct: learning.gain_threshold_pct,
            prepump_boost: learning.prepump_boost,
            smart_money_boost: learning.smart_money_boost,
            momentum_boost: learning.momentum_boost,
            momentum_decay: learning.momentum_decay,
        }
    }

    /// One learner pass over the signal memory. Returns the replacement
    /// weight vector when at least one record was evaluated, None when
    /// nothing matured or no price could be fetched.
    ///
    /// Matured records stay in memory un-marked, so a record that is not
    /// evicted before the next pass is evaluated again.
    pub async fn evaluate(
        &self,
        db: &Database,
        scanner: &DexScreenerScanner,
        weights: &WeightVector,
    ) -> Result<Option<WeightVector>> {
        let records = db.load_signals().await?;
        let now = Utc::now();

        let mut next = weights.clone();
        let mut evaluated = 0usize;

        for record in &records {
            if !self.is_matured(record, now) {
                continue;
            }

            let current = match scanner.current_price(&record.token).await {
                Ok(Some(price)) => price,
                Ok(None) => continue,
                Err(e) => {
                    warn!("⚠️ price lookup for '{}' skipped: {}", record.token, e);
                    continue;
                }
            };

            // a record stored with a zero price can never be compared
            if record.price_usd <= 0.0 {
                continue;
            }

            let change_pct = percentage_change(record.price_usd, current);
            self.apply_outcome(&mut next, change_pct);
            evaluated += 1;
        }

        if evaluated > 0 {
            info!("🧠 learner evaluated {} matured signals", evaluated);
            Ok(Some(next))
        } else {
            Ok(None)
        }
    }

    fn is_matured(&self, record: &SignalRecord, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(record.recorded_at) >= self.maturation
    }

    /// Apply one observed outcome to the weight vector.
    fn apply_outcome(&self, weights: &mut WeightVector, change_pct: f64) {
        if change_pct >= self.gain_threshold_pct {
            weights.prepump *= self.prepump_boost;
            weights.smart_money *= self.smart_money_boost;
            weights.momentum *= self.momentum_boost;
        } else {
            weights.momentum *= self.momentum_decay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner() -> WeightLearner {
        WeightLearner::new(
            &LearningConfig {
                gain_threshold_pct: 10.0,
                prepump_boost: 1.03,
                smart_money_boost: 1.04,
                momentum_boost: 1.02,
                momentum_decay: 0.97,
            },
            3_600,
        )
    }

    fn record_at(now: DateTime<Utc>, age_secs: i64) -> SignalRecord {
        SignalRecord {
            id: None,
            token: "DOG".to_string(),
            price_usd: 1.0,
            recorded_at: now - Duration::seconds(age_secs),
            score: 5.0,
        }
    }

    #[test]
    fn winning_outcome_reinforces_all_weights() {
        let l = learner();
        let mut w = WeightVector::default();
        l.apply_outcome(&mut w, 12.0);

        assert!(w.prepump > 1.0);
        assert!(w.smart_money > 1.0);
        assert!(w.momentum >= 1.0);
        assert!((w.prepump - 1.03).abs() < 1e-12);
        assert!((w.smart_money - 1.04).abs() < 1e-12);
        assert!((w.momentum - 1.02).abs() < 1e-12);
    }

    #[test]
    fn flat_outcome_decays_momentum_only() {
        let l = learner();
        let mut w = WeightVector::default();
        l.apply_outcome(&mut w, 0.0);

        assert_eq!(w.prepump, 1.0);
        assert_eq!(w.smart_money, 1.0);
        assert!((w.momentum - 0.97).abs() < 1e-12);
    }

    #[test]
    fn threshold_is_inclusive() {
        let l = learner();
        let mut w = WeightVector::default();
        l.apply_outcome(&mut w, 10.0);
        assert!(w.prepump > 1.0);
    }

    #[test]
    fn updates_compound_without_bounds() {
        let l = learner();
        let mut w = WeightVector::default();
        for _ in 0..100 {
            l.apply_outcome(&mut w, 15.0);
        }
        // 1.04^100 ≈ 50.5; nothing clamps the drift
        assert!(w.smart_money > 50.0);
    }

    #[test]
    fn maturation_window_gates_records() {
        let l = learner();
        let now = Utc::now();
        assert!(l.is_matured(&record_at(now, 2 * 3_600), now));
        assert!(l.is_matured(&record_at(now, 3_600), now));
        assert!(!l.is_matured(&record_at(now, 1_800), now));
    }
}
