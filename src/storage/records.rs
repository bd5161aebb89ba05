//! Append-only record sinks
//!
//! One date-stamped JSONL file per record kind, plus an atomically rewritten
//! latest-metrics map upserted by pool address. Write failures are surfaced
//! to the caller, which logs and moves on; the next cycle retries naturally.

use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::write_json_atomic;
use crate::errors::{BotError, BotResult};
use crate::types::{ClosedTrade, DarkPoolMetrics, DerivedMetrics, MemeSignal, TradingSignal};

pub struct RecordStore {
    base_dir: PathBuf,
    latest_metrics: HashMap<String, DerivedMetrics>,
}

impl RecordStore {
    /// Reopens an existing record directory. The latest-metrics map is
    /// seeded from `metrics/latest.json` so rows for pools not re-seen
    /// after a restart survive the next upsert.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let latest_metrics = match fs::read_to_string(base_dir.join("metrics/latest.json")) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring unreadable latest-metrics file: {e}");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            base_dir,
            latest_metrics,
        }
    }

    pub fn save_pool_metrics(&mut self, metrics: &DerivedMetrics) -> BotResult<()> {
        self.append_jsonl("metrics", "pool_metrics", metrics)?;
        // latest row per pool, keyed by address
        self.latest_metrics
            .insert(metrics.pool_address.clone(), metrics.clone());
        let latest_path = self.base_dir.join("metrics/latest.json");
        write_json_atomic(&latest_path, &self.latest_metrics).map_err(|e| BotError::Storage {
            context: format!("upserting {}", latest_path.display()),
            source: e,
        })
    }

    pub fn save_signal(&self, signal: &TradingSignal) -> BotResult<()> {
        self.append_jsonl("signals", "trading_signals", signal)
    }

    pub fn save_dark_metrics(&self, metrics: &DarkPoolMetrics) -> BotResult<()> {
        self.append_jsonl("dark_pools", "dark_pool_metrics", metrics)
    }

    pub fn save_meme_signal(&self, signal: &MemeSignal) -> BotResult<()> {
        self.append_jsonl("signals", "meme_signals", signal)
    }

    pub fn save_trade(&self, trade: &ClosedTrade) -> BotResult<()> {
        self.append_jsonl("trades", "closed_trades", trade)
    }

    fn append_jsonl<T: Serialize>(&self, subdir: &str, prefix: &str, record: &T) -> BotResult<()> {
        let dir = self.base_dir.join(subdir);
        let filename = dir.join(format!("{}_{}.jsonl", prefix, Utc::now().format("%Y-%m-%d")));

        let write = || -> anyhow::Result<()> {
            fs::create_dir_all(&dir)?;
            let mut file = OpenOptions::new().create(true).append(true).open(&filename)?;
            writeln!(file, "{}", serde_json::to_string(record)?)?;
            Ok(())
        };

        write().map_err(|e| BotError::Storage {
            context: format!("appending {}", filename.display()),
            source: e,
        })?;

        debug!(file = %filename.display(), "Appended record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::metrics;
    use crate::types::TrendDirection;

    fn temp_store() -> (RecordStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("lp-signal-bot-records-{}", uuid::Uuid::new_v4()));
        (RecordStore::new(&dir), dir)
    }

    #[test]
    fn appends_one_json_line_per_record() {
        let (store, dir) = temp_store();
        let m = metrics(70.0, 40.0, 25.0, 20.0, TrendDirection::Bullish);
        store
            .append_jsonl("metrics", "pool_metrics", &m)
            .unwrap();
        store
            .append_jsonl("metrics", "pool_metrics", &m)
            .unwrap();

        let filename = dir
            .join("metrics")
            .join(format!("pool_metrics_{}.jsonl", Utc::now().format("%Y-%m-%d")));
        let contents = fs::read_to_string(filename).unwrap();
        assert_eq!(contents.lines().count(), 2);
        let parsed: DerivedMetrics = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(parsed, m);
    }

    #[test]
    fn latest_metrics_upserts_by_address() {
        let (mut store, dir) = temp_store();
        let mut first = metrics(70.0, 40.0, 25.0, 20.0, TrendDirection::Bullish);
        store.save_pool_metrics(&first).unwrap();

        first.health_score = 55.0;
        store.save_pool_metrics(&first).unwrap();

        let mut other = metrics(80.0, 30.0, 20.0, 15.0, TrendDirection::Sideways);
        other.pool_address = "0xother".to_string();
        store.save_pool_metrics(&other).unwrap();

        let raw = fs::read_to_string(dir.join("metrics/latest.json")).unwrap();
        let latest: HashMap<String, DerivedMetrics> = serde_json::from_str(&raw).unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest["0xpool"].health_score, 55.0);
        assert_eq!(latest["0xother"].health_score, 80.0);
    }

    #[test]
    fn latest_metrics_survive_a_store_restart() {
        let (mut store, dir) = temp_store();
        let first = metrics(70.0, 40.0, 25.0, 20.0, TrendDirection::Bullish);
        store.save_pool_metrics(&first).unwrap();
        drop(store);

        // reopen over the same directory, upsert a different pool
        let mut reopened = RecordStore::new(&dir);
        let mut other = metrics(80.0, 30.0, 20.0, 15.0, TrendDirection::Sideways);
        other.pool_address = "0xother".to_string();
        reopened.save_pool_metrics(&other).unwrap();

        let raw = fs::read_to_string(dir.join("metrics/latest.json")).unwrap();
        let latest: HashMap<String, DerivedMetrics> = serde_json::from_str(&raw).unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest["0xpool"], first);
        assert_eq!(latest["0xother"].health_score, 80.0);
    }
}
