// src/main.rs
use anyhow::Result;
use chrono::Utc;
use log::{error, info};
use std::time::Duration;
use tokio::time::sleep;

mod analyzers;
mod config;
mod dashboard;
mod database;
mod models;
mod scanners;
mod strategies;
mod utils;

use analyzers::scam_filter::ScamFilter;
use config::Config;
use database::Database;
use models::{SignalRecord, WeightVector};
use scanners::dex_screener::{dedupe, DexScreenerScanner};
use strategies::auto_learn::WeightLearner;
use strategies::ranking::rank;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    info!("🚀 Starting Solana pre-pump scanner");

    let config = Config::load()?;
    info!("✅ Configuration loaded ({} search terms)", config.search_terms.len());

    let db = Database::new(&config.database_url).await?;
    db.migrate().await?;

    // prior weights survive restarts; a fresh database means all 1.0
    let mut weights = db.load_weights().await?;
    info!("✅ Weights loaded: {:?}", weights);

    let scanner = DexScreenerScanner::new();
    let filter = ScamFilter::new(&config.filter);
    let learner = WeightLearner::new(&config.learning, config.maturation_secs);

    loop {
        run_cycle(&config, &db, &scanner, &filter, &learner, &mut weights).await;
        sleep(Duration::from_secs(config.cycle_interval_secs)).await;
    }
}

/// One full scan cycle: fetch → dedupe → filter/score/rank → emit →
/// record → learn. Every fallible step recovers locally; nothing here
/// may take the loop down.
async fn run_cycle(
    config: &Config,
    db: &Database,
    scanner: &DexScreenerScanner,
    filter: &ScamFilter,
    learner: &WeightLearner,
    weights: &mut WeightVector,
) {
    let raw = scanner.fetch_pairs(&config.search_terms).await;
    let pairs = dedupe(raw);
    info!("🔍 {} unique Solana pairs this cycle", pairs.len());

    let ranked = rank(pairs, filter, weights, config.top_n);

    dashboard::print_top(&ranked);
    if let Err(e) = dashboard::write_csv(&config.csv_path, &ranked) {
        error!("❌ Dashboard CSV write failed: {}", e);
    }

    for r in &ranked {
        let record = SignalRecord {
            id: None,
            token: r.snapshot.symbol().to_string(),
            price_usd: r.snapshot.price_usd(),
            recorded_at: Utc::now(),
            score: r.score,
        };
        if let Err(e) = db.append_signal(&record).await {
            error!("❌ Failed to record signal for {}: {}", record.token, e);
        }
    }
    if let Err(e) = db.truncate_signals(config.memory_capacity).await {
        error!("❌ Signal memory truncation failed: {}", e);
    }

    match learner.evaluate(db, scanner, weights).await {
        Ok(Some(next)) => {
            if let Err(e) = db.save_weights(&next).await {
                error!("❌ Failed to persist weights: {}", e);
            } else {
                info!("🧠 Weights evolved: {:?}", next);
            }
            *weights = next;
        }
        Ok(None) => {}
        Err(e) => error!("❌ Learner pass failed: {}", e),
    }
}
