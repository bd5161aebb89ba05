//! Shared builders for unit tests

use chrono::{TimeZone, Utc};

use crate::types::{DarkPoolMetrics, DerivedMetrics, PoolSnapshot, TrendDirection};

pub fn snapshot(address: &str, liquidity_usd: f64, volume_24h: f64) -> PoolSnapshot {
    PoolSnapshot {
        address: address.to_string(),
        name: "WETH / USDC".to_string(),
        token0: "WETH".to_string(),
        token1: "USDC".to_string(),
        network: "eth".to_string(),
        liquidity_usd,
        volume_24h,
        price_change_1h: 0.5,
        price_change_6h: 1.0,
        price_change_24h: 3.0,
        fee_tier: 0.003,
        age_hours: 720.0,
        market_cap: 0.0,
        observed_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    }
}

pub fn new_pool_snapshot(
    address: &str,
    token_symbol: &str,
    liquidity_usd: f64,
    volume_24h: f64,
    age_hours: f64,
) -> PoolSnapshot {
    PoolSnapshot {
        address: address.to_string(),
        name: format!("{token_symbol} / WETH"),
        token0: token_symbol.to_string(),
        token1: "WETH".to_string(),
        network: "eth".to_string(),
        liquidity_usd,
        volume_24h,
        price_change_1h: 10.0,
        price_change_6h: 25.0,
        price_change_24h: 80.0,
        fee_tier: 0.003,
        age_hours,
        market_cap: liquidity_usd * 4.0,
        observed_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    }
}

pub fn metrics(health: f64, risk: f64, apy: f64, volatility: f64, trend: TrendDirection) -> DerivedMetrics {
    DerivedMetrics {
        pool_address: "0xpool".to_string(),
        pool_name: "WETH / USDC".to_string(),
        network: "eth".to_string(),
        fees_24h: 1_500.0,
        apy,
        impermanent_loss: 0.5,
        volatility_score: volatility,
        risk_score: risk,
        health_score: health,
        trend_direction: trend,
        computed_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    }
}

pub fn dark_metrics(
    meme_score: f64,
    rug_pull_risk: f64,
    pump_potential: f64,
    dump_risk: f64,
) -> DarkPoolMetrics {
    DarkPoolMetrics {
        pool_address: "0xmeme".to_string(),
        pool_name: "PEPE2 / WETH".to_string(),
        network: "eth".to_string(),
        market_cap: 250_000.0,
        liquidity_usd: 60_000.0,
        volume_24h: 120_000.0,
        age_hours: 18.0,
        holder_count: None,
        honeypot_risk: Some(0.0),
        rug_pull_risk,
        whale_concentration: None,
        social_sentiment: Some(0.5),
        meme_score,
        pump_potential,
        dump_risk,
        creator_verified: Some(false),
        contract_renounced: Some(false),
        liquidity_locked: Some(false),
        computed_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    }
}
