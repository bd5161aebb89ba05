//! Daily rollup report

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub trades_executed: u32,
    pub meme_trades_executed: u32,
    pub open_positions: usize,
    pub daily_pnl: Decimal,
    pub total_pnl: Decimal,
    pub total_trades: u64,
}
