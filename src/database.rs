// src/database.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

use crate::models::{SignalRecord, WeightVector};

/// Durable stores for the scanner: the learned weight vector and the
/// capacity-bounded signal memory. Both tables are load-at-start,
/// overwrite-on-change; a missing database file is the same as empty
/// state (weights all 1.0, no signals).
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        info!("Connecting to database: {}", database_url);
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // a single connection is all the sequential cycle loop needs
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Database { pool })
    }

    /// Create tables on first run.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS weights (
                name TEXT PRIMARY KEY,
                value REAL NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS signals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                token TEXT NOT NULL,
                price_usd REAL NOT NULL,
                recorded_at TEXT NOT NULL,
                score REAL NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        info!("✅ Database migrations completed");
        Ok(())
    }

    // WEIGHT VECTOR

    /// Load the weight vector, defaulting any missing key to 1.0 so the
    /// vector is always fully defined.
    pub async fn load_weights(&self) -> Result<WeightVector> {
        let rows = sqlx::query("SELECT name, value FROM weights")
            .fetch_all(&self.pool)
            .await?;

        let mut weights = WeightVector::default();
        for row in rows {
            let name: String = row.get("name");
            let value: f64 = row.get("value");
            match name.as_str() {
                "prepump" => weights.prepump = value,
                "momentum" => weights.momentum = value,
                "smart_money" => weights.smart_money = value,
                _ => {}
            }
        }

        Ok(weights)
    }

    pub async fn save_weights(&self, weights: &WeightVector) -> Result<()> {
        for (name, value) in [
            ("prepump", weights.prepump),
            ("momentum", weights.momentum),
            ("smart_money", weights.smart_money),
        ] {
            sqlx::query("INSERT OR REPLACE INTO weights (name, value) VALUES (?, ?)")
                .bind(name)
                .bind(value)
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }

    // SIGNAL MEMORY

    pub async fn append_signal(&self, record: &SignalRecord) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO signals (token, price_usd, recorded_at, score)
            VALUES (?, ?, ?, ?)
        "#,
        )
        .bind(&record.token)
        .bind(record.price_usd)
        .bind(record.recorded_at.to_rfc3339())
        .bind(record.score)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Drop everything but the newest `capacity` records.
    pub async fn truncate_signals(&self, capacity: i64) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM signals WHERE id NOT IN (
                SELECT id FROM signals ORDER BY id DESC LIMIT ?
            )
        "#,
        )
        .bind(capacity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Full signal memory in insertion order.
    pub async fn load_signals(&self) -> Result<Vec<SignalRecord>> {
        let rows = sqlx::query(
            "SELECT id, token, price_usd, recorded_at, score FROM signals ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let recorded_at: String = row.get("recorded_at");
            records.push(SignalRecord {
                id: Some(row.get("id")),
                token: row.get("token"),
                price_usd: row.get("price_usd"),
                recorded_at: DateTime::parse_from_rfc3339(&recorded_at)?.with_timezone(&Utc),
                score: row.get("score"),
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn record(token: &str) -> SignalRecord {
        SignalRecord {
            id: None,
            token: token.to_string(),
            price_usd: 0.5,
            recorded_at: Utc::now(),
            score: 7.25,
        }
    }

    #[tokio::test]
    async fn weights_default_when_table_empty() {
        let db = test_db().await;
        let weights = db.load_weights().await.unwrap();
        assert_eq!(weights, WeightVector::default());
    }

    #[tokio::test]
    async fn weights_round_trip() {
        let db = test_db().await;
        let saved = WeightVector {
            prepump: 1.0609,
            momentum: 0.9409,
            smart_money: 1.0816,
        };
        db.save_weights(&saved).await.unwrap();
        let loaded = db.load_weights().await.unwrap();
        assert_eq!(loaded, saved);

        // save-on-change overwrites in place
        let newer = WeightVector {
            momentum: 0.9127,
            ..saved.clone()
        };
        db.save_weights(&newer).await.unwrap();
        assert_eq!(db.load_weights().await.unwrap(), newer);
    }

    #[tokio::test]
    async fn signal_round_trip_preserves_fields() {
        let db = test_db().await;
        let rec = record("DOG");
        db.append_signal(&rec).await.unwrap();

        let loaded = db.load_signals().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].token, "DOG");
        assert_eq!(loaded[0].price_usd, 0.5);
        assert_eq!(loaded[0].score, 7.25);
        // rfc3339 round trip keeps the instant
        assert!((loaded[0].recorded_at - rec.recorded_at).num_seconds().abs() <= 1);
    }

    #[tokio::test]
    async fn capacity_keeps_newest_200_in_order() {
        let db = test_db().await;

        for i in 0..250 {
            db.append_signal(&record(&format!("tok-{i}"))).await.unwrap();
            db.truncate_signals(200).await.unwrap();
        }

        let records = db.load_signals().await.unwrap();
        assert_eq!(records.len(), 200);
        assert_eq!(records[0].token, "tok-50");
        assert_eq!(records[199].token, "tok-249");

        // still in insertion order
        for window in records.windows(2) {
            assert!(window[0].id.unwrap() < window[1].id.unwrap());
        }
    }
}
