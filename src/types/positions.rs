//! Position lifecycle types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionKind {
    Standard,
    Meme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    StopLoss,
    TakeProfit,
}

/// A simulated liquidity position. Created only when the risk gate admits a
/// buy/pump signal and execution succeeds; at most one open position exists
/// per pool address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub pool_address: String,
    pub pool_name: String,
    pub network: String,
    pub kind: PositionKind,
    pub amount: Decimal,
    pub entry_time: DateTime<Utc>,
    pub expected_apy: f64,
    pub status: PositionStatus,
}

/// Archived record of a closed position, appended to the trade sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub position: Position,
    pub close_reason: CloseReason,
    pub pnl: Decimal,
    pub pnl_percentage: Decimal,
    pub closed_at: DateTime<Utc>,
}

/// Receipt from the (simulated) trade executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReceipt {
    pub id: String,
    pub tx_hash: String,
    pub gas_used: u64,
    pub execution_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}
