//! Daily report generation
//!
//! Once per calendar day (UTC) the orchestrator snapshots the day's activity
//! to a dated report file and rolls the daily counters. This is the only
//! place the daily counters reset; lifetime totals are never touched.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;

use crate::errors::{BotError, BotResult};
use crate::storage::write_json_atomic;
use crate::types::{DailyReport, OrchestratorState};

pub struct ReportGenerator {
    reports_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    /// A report is due only when a recorded report date lies strictly before
    /// `today`. A fresh state has no date yet; see [`anchor`](Self::anchor).
    pub fn is_due(&self, state: &OrchestratorState, today: NaiveDate) -> bool {
        matches!(state.last_report_date, Some(date) if date < today)
    }

    /// Stamps `today` on a state that has never reported, without writing a
    /// report or touching the counters. Keeps a first cycle (or a deleted
    /// state file) from rolling the day mid-flight.
    pub fn anchor(&self, state: &mut OrchestratorState, today: NaiveDate) {
        if state.last_report_date.is_none() {
            state.last_report_date = Some(today);
        }
    }

    /// Write the report for `today` and reset the daily counters.
    pub fn generate(&self, state: &mut OrchestratorState, today: NaiveDate) -> BotResult<DailyReport> {
        let report = DailyReport {
            date: today,
            trades_executed: state.trades_today,
            meme_trades_executed: state.meme_trades_today,
            open_positions: state.active_positions.len(),
            daily_pnl: state.daily_pnl,
            total_pnl: state.total_pnl,
            total_trades: state.total_trades,
        };

        let path = self
            .reports_dir
            .join(format!("daily_report_{}.json", today.format("%Y-%m-%d")));
        write_json_atomic(&path, &report).map_err(|e| BotError::Storage {
            context: format!("writing report {}", path.display()),
            source: e,
        })?;

        state.trades_today = 0;
        state.meme_trades_today = 0;
        state.daily_pnl = Decimal::ZERO;
        state.last_report_date = Some(today);

        info!(
            "📊 Daily report written: {} trades ({} meme), daily PnL ${}, {} open positions",
            report.trades_executed,
            report.meme_trades_executed,
            report.daily_pnl,
            report.open_positions
        );
        Ok(report)
    }
}
