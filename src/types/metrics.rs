//! Derived metric types produced by the metrics engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directional read on a pool, derived from multi-timeframe price changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    StrongBullish,
    Bullish,
    Sideways,
    Bearish,
    StrongBearish,
    Uncertain,
}

impl TrendDirection {
    pub fn is_bullish(&self) -> bool {
        matches!(self, TrendDirection::StrongBullish | TrendDirection::Bullish)
    }
}

/// Metrics derived 1:1 from a [`PoolSnapshot`](crate::types::PoolSnapshot).
/// Recomputed every cycle and logged to the record sink, never treated as
/// authoritative state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub pool_address: String,
    pub pool_name: String,
    pub network: String,
    pub fees_24h: f64,
    /// Annualized fee yield, capped at 500.
    pub apy: f64,
    pub impermanent_loss: f64,
    pub volatility_score: f64,
    pub risk_score: f64,
    pub health_score: f64,
    pub trend_direction: TrendDirection,
    pub computed_at: DateTime<Utc>,
}

/// Contract-safety report from the safety oracle. Every field is optional:
/// a failed or missing lookup stays unknown rather than defaulting to a
/// safe-looking guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractSafety {
    pub is_honeypot: Option<bool>,
    pub transfer_tax_pct: Option<f64>,
    pub ownership_renounced: Option<bool>,
    pub liquidity_locked: Option<bool>,
    pub verified_contract: Option<bool>,
}

/// Extended metrics for newly created / meme pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DarkPoolMetrics {
    pub pool_address: String,
    pub pool_name: String,
    pub network: String,
    pub market_cap: f64,
    pub liquidity_usd: f64,
    pub volume_24h: f64,
    pub age_hours: f64,
    pub holder_count: Option<u64>,
    /// None when the safety oracle returned nothing.
    pub honeypot_risk: Option<f64>,
    pub rug_pull_risk: f64,
    pub whale_concentration: Option<f64>,
    /// None when no sentiment data was available.
    pub social_sentiment: Option<f64>,
    pub meme_score: f64,
    pub pump_potential: f64,
    pub dump_risk: f64,
    pub creator_verified: Option<bool>,
    pub contract_renounced: Option<bool>,
    pub liquidity_locked: Option<bool>,
    pub computed_at: DateTime<Utc>,
}

/// Feature vector handed to the scoring oracle for buy/sell confirmation.
/// Carries the raw columns plus the derived columns the model trains on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub liquidity_usd: f64,
    pub volume_24h: f64,
    pub apy: f64,
    pub price_change_24h: f64,
    pub risk_score: f64,
    pub health_score: f64,
    pub volatility_score: f64,
    pub volume_to_liquidity_ratio: f64,
    pub fee_efficiency: f64,
    pub risk_adjusted_apy: f64,
    pub momentum_score: f64,
    pub quality_score: f64,
}

impl FeatureVector {
    pub fn from_metrics(metrics: &DerivedMetrics, liquidity_usd: f64, volume_24h: f64, price_change_24h: f64) -> Self {
        let volume_to_liquidity_ratio = volume_24h / (liquidity_usd + 1.0);
        Self {
            liquidity_usd,
            volume_24h,
            apy: metrics.apy,
            price_change_24h,
            risk_score: metrics.risk_score,
            health_score: metrics.health_score,
            volatility_score: metrics.volatility_score,
            volume_to_liquidity_ratio,
            fee_efficiency: (volume_24h * 0.003) / (volume_24h + 1.0),
            risk_adjusted_apy: metrics.apy / (metrics.risk_score + 1.0),
            momentum_score: price_change_24h * volume_to_liquidity_ratio,
            quality_score: (metrics.health_score * metrics.apy) / (metrics.risk_score + 1.0),
        }
    }
}
