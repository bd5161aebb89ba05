//! Persisted orchestrator state

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Position;

/// Process-wide state, persisted atomically every cycle and reloaded at
/// startup. `trades_today`, `meme_trades_today` and `daily_pnl` are reset
/// only by the report generator, exactly once per calendar-day crossing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorState {
    pub trades_today: u32,
    pub meme_trades_today: u32,
    pub total_trades: u64,
    pub active_positions: Vec<Position>,
    pub daily_pnl: Decimal,
    pub total_pnl: Decimal,
    pub last_analysis: Option<DateTime<Utc>>,
    pub last_ai_training: Option<DateTime<Utc>>,
    pub last_report_date: Option<NaiveDate>,
}

impl Default for OrchestratorState {
    fn default() -> Self {
        Self {
            trades_today: 0,
            meme_trades_today: 0,
            total_trades: 0,
            active_positions: Vec::new(),
            daily_pnl: Decimal::ZERO,
            total_pnl: Decimal::ZERO,
            last_analysis: None,
            last_ai_training: None,
            last_report_date: None,
        }
    }
}

impl OrchestratorState {
    pub fn has_open_position(&self, pool_address: &str) -> bool {
        self.active_positions
            .iter()
            .any(|p| p.pool_address == pool_address)
    }
}
