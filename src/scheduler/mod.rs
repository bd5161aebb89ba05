//! Cycle scheduling and orchestration
//!
//! The orchestrator owns all mutable state and drives the pipeline on a
//! fixed interval: fetch -> derive -> classify -> gate -> execute -> monitor,
//! plus the slower retraining and daily-report cadences. Collaborators are
//! injected, so the loop itself has no ambient dependencies.

pub mod cycle;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::config::Config;
use crate::errors::BotResult;
use crate::network::MarketDataProvider;
use crate::oracles::{
    ContractSafetyOracle, NotificationSink, PositionValuer, ScoringOracle, SentimentOracle,
    TradeExecutor,
};
use crate::report::ReportGenerator;
use crate::storage::{RecordStore, StateRepository};
use crate::types::OrchestratorState;

/// Everything the pipeline cannot compute for itself.
pub struct Collaborators {
    pub market_data: Arc<dyn MarketDataProvider>,
    pub safety: Arc<dyn ContractSafetyOracle>,
    pub sentiment: Arc<dyn SentimentOracle>,
    pub scoring: Arc<dyn ScoringOracle>,
    pub executor: Arc<dyn TradeExecutor>,
    pub valuer: Arc<dyn PositionValuer>,
    pub notifier: Arc<dyn NotificationSink>,
}

pub struct Orchestrator {
    config: Config,
    collaborators: Collaborators,
    records: RecordStore,
    state_repo: StateRepository,
    reports: ReportGenerator,
    state: OrchestratorState,
    cycles_completed: u64,
}

impl Orchestrator {
    /// Restores persisted state so a restart resumes where the last run
    /// stopped.
    pub fn new(
        config: Config,
        collaborators: Collaborators,
        records: RecordStore,
        state_repo: StateRepository,
        reports: ReportGenerator,
    ) -> BotResult<Self> {
        let state = state_repo.load()?;
        info!(
            open_positions = state.active_positions.len(),
            total_trades = state.total_trades,
            "Orchestrator ready"
        );
        Ok(Self {
            config,
            collaborators,
            records,
            state_repo,
            reports,
            state,
            cycles_completed: 0,
        })
    }

    /// Runs cycles until the shutdown signal fires, then persists state one
    /// last time. A failed cycle is logged and the loop continues.
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) -> BotResult<OrchestratorState> {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(self.config.analysis_interval));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_secs = self.config.analysis_interval,
            networks = ?self.config.networks,
            automation = self.config.automation_enabled,
            "🚀 Starting analysis loop"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received, stopping after current state flush");
                    break;
                }
                _ = ticker.tick() => {
                    match self.run_cycle().await {
                        Ok(()) => self.cycles_completed += 1,
                        Err(e) => error!("Analysis cycle failed: {e}"),
                    }
                }
            }
        }

        self.state_repo.save(&self.state)?;
        info!(
            cycles = self.cycles_completed,
            total_trades = self.state.total_trades,
            total_pnl = %self.state.total_pnl,
            open_positions = self.state.active_positions.len(),
            "👋 Session complete"
        );
        Ok(self.state)
    }
}
