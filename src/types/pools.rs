//! Pool snapshot types and validated construction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BotError, BotResult};

/// One observation of a liquidity pool, immutable per cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub address: String,
    pub name: String,
    pub token0: String,
    pub token1: String,
    pub network: String,
    pub liquidity_usd: f64,
    pub volume_24h: f64,
    pub price_change_1h: f64,
    pub price_change_6h: f64,
    pub price_change_24h: f64,
    pub fee_tier: f64,
    pub age_hours: f64,
    /// Fully diluted valuation where the provider reports one. Zero for
    /// established pools that are not scored on market cap.
    pub market_cap: f64,
    pub observed_at: DateTime<Utc>,
}

impl PoolSnapshot {
    /// Rejects snapshots with malformed numeric fields instead of letting
    /// zeroed values understate risk downstream. Invalid records are dropped
    /// from the cycle, the cycle itself continues.
    pub fn validate(&self) -> BotResult<()> {
        if self.address.is_empty() {
            return Err(BotError::Validation {
                field: "address".to_string(),
                reason: "empty pool address".to_string(),
            });
        }

        let numeric_fields = [
            ("liquidity_usd", self.liquidity_usd),
            ("volume_24h", self.volume_24h),
            ("price_change_1h", self.price_change_1h),
            ("price_change_6h", self.price_change_6h),
            ("price_change_24h", self.price_change_24h),
            ("fee_tier", self.fee_tier),
            ("age_hours", self.age_hours),
            ("market_cap", self.market_cap),
        ];

        for (field, value) in numeric_fields {
            if !value.is_finite() {
                return Err(BotError::Validation {
                    field: field.to_string(),
                    reason: format!("non-finite value {value}"),
                });
            }
        }

        for (field, value) in [
            ("liquidity_usd", self.liquidity_usd),
            ("volume_24h", self.volume_24h),
            ("fee_tier", self.fee_tier),
            ("age_hours", self.age_hours),
            ("market_cap", self.market_cap),
        ] {
            if value < 0.0 {
                return Err(BotError::Validation {
                    field: field.to_string(),
                    reason: format!("negative value {value}"),
                });
            }
        }

        Ok(())
    }
}
