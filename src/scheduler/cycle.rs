//! One analysis cycle: scan, classify, gate, execute, monitor

use chrono::Utc;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::Orchestrator;
use crate::errors::BotResult;
use crate::metrics::{derive, derive_dark};
use crate::positions::{monitor_positions, open_position, OpenRequest};
use crate::risk::{admit_meme, admit_standard, GateVerdict};
use crate::signals::{classify_meme, classify_standard};
use crate::types::{
    ContractSafety, DerivedMetrics, FeatureVector, MemeSignalType, PoolSnapshot, PositionKind,
    SignalType, TradingSignal,
};

/// New pools younger than this have too little history to score.
const MIN_NEW_POOL_AGE_MINUTES: u32 = 30;

/// A buy is executed only when the scoring oracle agrees this strongly.
const MIN_ORACLE_CONFIDENCE: f64 = 0.7;

impl Orchestrator {
    pub async fn run_cycle(&mut self) -> BotResult<()> {
        let started = Instant::now();
        info!("🔄 Analysis cycle starting");

        self.scan_standard_pools().await;
        self.scan_dark_pools().await;

        let closed = monitor_positions(
            &mut self.state,
            &self.config.risk_management,
            self.collaborators.valuer.as_ref(),
            self.collaborators.executor.as_ref(),
            self.collaborators.notifier.as_ref(),
        )
        .await;
        for trade in &closed {
            if let Err(e) = self.records.save_trade(trade) {
                warn!("Failed to record closed trade: {e}");
            }
        }

        self.maybe_retrain().await;
        self.maybe_report();

        self.state.last_analysis = Some(Utc::now());
        self.state_repo.save(&self.state)?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            open_positions = self.state.active_positions.len(),
            "✅ Analysis cycle complete"
        );
        Ok(())
    }

    /// Top and trending pools per network, deduplicated by address. A failed
    /// network fetch is logged and skipped; the other networks still run.
    async fn scan_standard_pools(&mut self) {
        let mut seen = HashSet::new();
        let mut pools = Vec::new();

        for network in self.config.networks.clone() {
            match self.collaborators.market_data.list_pools(&network, 1).await {
                Ok(fetched) => pools.extend(fetched),
                Err(e) => warn!(network = %network, "Pool fetch failed: {e}"),
            }
            match self.collaborators.market_data.list_trending(&network).await {
                Ok(fetched) => pools.extend(fetched),
                Err(e) => warn!(network = %network, "Trending fetch failed: {e}"),
            }
        }
        pools.retain(|p| seen.insert(p.address.clone()));
        debug!("Scanning {} standard pools", pools.len());

        for pool in pools {
            let metrics = derive(&pool);
            if let Err(e) = self.records.save_pool_metrics(&metrics) {
                warn!("Failed to record metrics: {e}");
            }

            let signal = classify_standard(&metrics);
            if let Err(e) = self.records.save_signal(&signal) {
                warn!("Failed to record signal: {e}");
            }

            if signal.signal_type == SignalType::Buy {
                self.execute_buy(&pool, &metrics, &signal).await;
            }
        }
    }

    async fn execute_buy(&mut self, pool: &PoolSnapshot, metrics: &DerivedMetrics, signal: &TradingSignal) {
        match admit_standard(signal, metrics, &self.state, &self.config.risk_management) {
            GateVerdict::Admitted => {}
            GateVerdict::Rejected(reason) => {
                debug!(pool = %signal.pool_name, "Buy signal rejected: {reason}");
                return;
            }
        }

        let features = FeatureVector::from_metrics(
            metrics,
            pool.liquidity_usd,
            pool.volume_24h,
            pool.price_change_24h,
        );
        let prediction = match self.collaborators.scoring.predict(&features).await {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(pool = %signal.pool_name, "Scoring oracle failed, not trading: {e}");
                return;
            }
        };
        if prediction.action != crate::oracles::PredictedAction::Buy
            || prediction.confidence <= MIN_ORACLE_CONFIDENCE
        {
            debug!(
                pool = %signal.pool_name,
                action = ?prediction.action,
                confidence = prediction.confidence,
                "Scoring oracle did not confirm the buy"
            );
            return;
        }

        if !self.config.automation_enabled {
            info!(pool = %signal.pool_name, "Automation disabled, signal recorded only");
            return;
        }

        let request = OpenRequest {
            pool_address: pool.address.clone(),
            pool_name: pool.name.clone(),
            network: pool.network.clone(),
            kind: PositionKind::Standard,
            recommended_amount: self.config.risk_management.max_position_size,
            expected_apy: metrics.apy,
        };
        if let Err(e) = open_position(
            &mut self.state,
            request,
            &self.config.risk_management,
            self.collaborators.executor.as_ref(),
            self.collaborators.notifier.as_ref(),
        )
        .await
        {
            warn!(pool = %pool.name, "Position open failed: {e}");
        }
    }

    /// Fresh pools scored for meme dynamics. Safety and sentiment lookups
    /// that fail degrade to unknown instead of aborting the scan.
    async fn scan_dark_pools(&mut self) {
        for network in self.config.networks.clone() {
            let pools = match self
                .collaborators
                .market_data
                .list_new_pools(&network, MIN_NEW_POOL_AGE_MINUTES)
                .await
            {
                Ok(pools) => pools,
                Err(e) => {
                    warn!(network = %network, "New-pool fetch failed: {e}");
                    continue;
                }
            };
            debug!(network = %network, "Scanning {} new pools", pools.len());

            for pool in pools {
                let safety = self.lookup_safety(&pool).await;
                let sentiment = self.lookup_sentiment(&pool).await;

                let metrics = derive_dark(&pool, safety.as_ref(), sentiment);
                if let Err(e) = self.records.save_dark_metrics(&metrics) {
                    warn!("Failed to record dark-pool metrics: {e}");
                }

                let signal = classify_meme(&metrics);
                if let Err(e) = self.records.save_meme_signal(&signal) {
                    warn!("Failed to record meme signal: {e}");
                }

                if signal.signal_type != MemeSignalType::PumpIncoming {
                    continue;
                }
                match admit_meme(&signal, &self.state) {
                    GateVerdict::Admitted => {}
                    GateVerdict::Rejected(reason) => {
                        debug!(pool = %signal.pool_name, "Meme signal rejected: {reason}");
                        continue;
                    }
                }
                if !self.config.automation_enabled {
                    info!(pool = %signal.pool_name, "Automation disabled, meme signal recorded only");
                    continue;
                }

                let request = OpenRequest {
                    pool_address: pool.address.clone(),
                    pool_name: pool.name.clone(),
                    network: pool.network.clone(),
                    kind: PositionKind::Meme,
                    recommended_amount: self.config.risk_management.max_position_size,
                    expected_apy: 0.0,
                };
                if let Err(e) = open_position(
                    &mut self.state,
                    request,
                    &self.config.risk_management,
                    self.collaborators.executor.as_ref(),
                    self.collaborators.notifier.as_ref(),
                )
                .await
                {
                    warn!(pool = %pool.name, "Meme position open failed: {e}");
                }
            }
        }
    }

    async fn lookup_safety(&self, pool: &PoolSnapshot) -> Option<ContractSafety> {
        match self
            .collaborators
            .safety
            .analyze(&pool.address, &pool.network)
            .await
        {
            Ok(safety) => safety,
            Err(e) => {
                warn!(pool = %pool.name, "Safety lookup failed, treating as unknown: {e}");
                None
            }
        }
    }

    async fn lookup_sentiment(&self, pool: &PoolSnapshot) -> Option<f64> {
        match self.collaborators.sentiment.sentiment(&pool.token0).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                warn!(pool = %pool.name, "Sentiment lookup failed, treating as unknown: {e}");
                None
            }
        }
    }

    /// Retrains on the configured cadence. The timestamp only advances on
    /// success, so a failed run retries next cycle.
    async fn maybe_retrain(&mut self) {
        let now = Utc::now();
        let due = match self.state.last_ai_training {
            Some(last) => (now - last).num_seconds() >= self.config.ai_training_interval as i64,
            None => true,
        };
        if !due {
            return;
        }

        match self.collaborators.scoring.retrain().await {
            Ok(report) => {
                info!(
                    accuracy = report.accuracy,
                    samples = report.samples,
                    "🧠 Scoring oracle retrained"
                );
                self.state.last_ai_training = Some(now);
            }
            Err(e) => warn!("Retraining failed: {e}"),
        }
    }

    /// The daily counters roll exactly once per calendar-day crossing. A
    /// state that has never reported is anchored to today first, so a fresh
    /// install never resets the counters mid-day.
    fn maybe_report(&mut self) {
        let today = Utc::now().date_naive();
        self.reports.anchor(&mut self.state, today);
        if !self.reports.is_due(&self.state, today) {
            return;
        }
        if let Err(e) = self.reports.generate(&mut self.state, today) {
            warn!("Daily report failed: {e}");
        }
    }
}
