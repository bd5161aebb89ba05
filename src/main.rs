//! LP Signal Bot - Main Entry Point
//!
//! Periodic liquidity-pool analysis with simulated signal-driven trading.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use lp_signal_bot::config::Config;
use lp_signal_bot::network::GeckoTerminalClient;
use lp_signal_bot::oracles::{
    HeuristicScoringOracle, LogNotifier, SimulatedExecutor, SimulatedValuer,
    UnavailableSafetyOracle, UnavailableSentimentOracle,
};
use lp_signal_bot::report::ReportGenerator;
use lp_signal_bot::scheduler::{Collaborators, Orchestrator};
use lp_signal_bot::storage::{RecordStore, StateRepository};
use lp_signal_bot::utils;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let _logging_guard = utils::setup_logging()?;
    utils::setup_output_directories()?;

    let config_path = Config::default_path();
    let config = Config::load(&config_path)?;

    info!("🌊 LP Signal Bot v0.3.0 - Pool Analysis & Signal Trading");
    info!("📋 Configuration:");
    info!("   Networks: {}", config.networks.join(", "));
    info!("   Analysis Interval: {}s", config.analysis_interval);
    info!("   Retraining Interval: {}s", config.ai_training_interval);
    info!("   Automation: {}", config.automation_enabled);
    info!("   Max Daily Trades: {}", config.risk_management.max_daily_trades);
    info!("   Max Position Size: ${}", config.risk_management.max_position_size);
    info!(
        "   Stop Loss / Take Profit: -{}% / +{}%",
        config.risk_management.stop_loss_threshold * rust_decimal_macros::dec!(100),
        config.risk_management.take_profit_threshold * rust_decimal_macros::dec!(100),
    );
    info!("   ⚠️  SIMULATION MODE - No real funds at risk");

    let collaborators = Collaborators {
        market_data: Arc::new(GeckoTerminalClient::new()?),
        safety: Arc::new(UnavailableSafetyOracle),
        sentiment: Arc::new(UnavailableSentimentOracle),
        scoring: Arc::new(HeuristicScoringOracle),
        executor: Arc::new(SimulatedExecutor::default()),
        valuer: Arc::new(SimulatedValuer),
        notifier: Arc::new(LogNotifier::new(config.notification_settings.clone())),
    };

    let orchestrator = Orchestrator::new(
        config,
        collaborators,
        RecordStore::new("output/data"),
        StateRepository::new("data/state.json"),
        ReportGenerator::new("output/reports"),
    )?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("\n📛 Received shutdown signal (Ctrl+C)...");
            let _ = shutdown_tx.send(());
        }
    });

    orchestrator.run(shutdown_rx).await?;

    Ok(())
}
