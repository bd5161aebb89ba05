//! LP Signal Bot - liquidity pool analysis and signal-driven position manager
//!
//! Ingests pool snapshots across networks on a fixed cadence, derives
//! quality/risk metrics, classifies trading and meme signals through ordered
//! rule tables, gates them through risk admission control and manages the
//! resulting simulated positions end to end.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod metrics;
pub mod signals;
pub mod risk;
pub mod oracles;
pub mod positions;
pub mod scheduler;
pub mod report;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub mod testutil;

// Re-export commonly used items
pub use config::Config;
pub use errors::{BotError, BotResult};
pub use types::*;
