//! Standard pool metric derivation

use crate::types::{DerivedMetrics, PoolSnapshot, TrendDirection};

/// Annual fee yield discounted for MEV and slippage.
const MARKET_EFFICIENCY: f64 = 0.7;
const APY_CAP: f64 = 500.0;

/// Derives the full metric set for one snapshot. Pure and idempotent.
pub fn derive(snapshot: &PoolSnapshot) -> DerivedMetrics {
    let fees_24h = snapshot.volume_24h * snapshot.fee_tier;
    let apy = calculate_apy(snapshot.volume_24h, snapshot.liquidity_usd, snapshot.fee_tier);
    let impermanent_loss = calculate_impermanent_loss(snapshot.price_change_24h);
    let volatility_score = calculate_volatility(
        snapshot.price_change_1h,
        snapshot.price_change_6h,
        snapshot.price_change_24h,
    );
    let risk_score = calculate_risk(snapshot.liquidity_usd, snapshot.volume_24h, volatility_score);
    let health_score = calculate_health(
        snapshot.liquidity_usd,
        snapshot.volume_24h,
        apy,
        risk_score,
        volatility_score,
    );
    let trend_direction = analyze_trend(
        snapshot.price_change_1h,
        snapshot.price_change_6h,
        snapshot.price_change_24h,
        snapshot.volume_24h,
    );

    DerivedMetrics {
        pool_address: snapshot.address.clone(),
        pool_name: snapshot.name.clone(),
        network: snapshot.network.clone(),
        fees_24h,
        apy,
        impermanent_loss,
        volatility_score,
        risk_score,
        health_score,
        trend_direction,
        computed_at: snapshot.observed_at,
    }
}

pub fn calculate_apy(volume_24h: f64, liquidity_usd: f64, fee_tier: f64) -> f64 {
    if liquidity_usd <= 0.0 {
        return 0.0;
    }
    let daily_yield = (volume_24h * fee_tier) / liquidity_usd;
    (daily_yield * 365.0 * MARKET_EFFICIENCY * 100.0).min(APY_CAP)
}

/// Standard IL formula from the price divergence ratio. Changes under 0.1%
/// are treated as no divergence.
pub fn calculate_impermanent_loss(price_change_24h: f64) -> f64 {
    if price_change_24h.abs() < 0.1 {
        return 0.0;
    }
    let price_ratio = (100.0 + price_change_24h) / 100.0;
    if price_ratio <= 0.0 {
        return 0.0;
    }
    let il_multiplier = 2.0 * price_ratio.sqrt() / (1.0 + price_ratio);
    ((il_multiplier - 1.0) * 100.0).abs()
}

/// Recent changes weigh more heavily. 0..=100.
pub fn calculate_volatility(change_1h: f64, change_6h: f64, change_24h: f64) -> f64 {
    let weighted = change_1h.abs() * 0.5 + change_6h.abs() * 0.3 + change_24h.abs() * 0.2;
    (weighted * 2.0).min(100.0)
}

/// Composite danger score from liquidity thinness, turnover and volatility.
/// 0..=100.
pub fn calculate_risk(liquidity_usd: f64, volume_24h: f64, volatility_score: f64) -> f64 {
    let liquidity_risk = if liquidity_usd > 10_000_000.0 {
        5.0
    } else if liquidity_usd > 1_000_000.0 {
        15.0
    } else if liquidity_usd > 100_000.0 {
        30.0
    } else {
        50.0
    };

    let volume_ratio = volume_24h / liquidity_usd.max(1.0);
    let volume_risk = if volume_ratio > 0.3 {
        5.0
    } else if volume_ratio > 0.1 {
        15.0
    } else if volume_ratio > 0.05 {
        25.0
    } else {
        40.0
    };

    let volatility_risk = (volatility_score * 0.4).min(30.0);

    (liquidity_risk + volume_risk + volatility_risk).min(100.0)
}

/// Composite quality score blending liquidity, volume, APY range and
/// stability, minus a risk penalty. Clamped to 0..=100.
pub fn calculate_health(
    liquidity_usd: f64,
    volume_24h: f64,
    apy: f64,
    risk_score: f64,
    volatility_score: f64,
) -> f64 {
    let liquidity_health = if liquidity_usd > 50_000_000.0 {
        30.0
    } else if liquidity_usd > 10_000_000.0 {
        25.0
    } else if liquidity_usd > 1_000_000.0 {
        20.0
    } else if liquidity_usd > 100_000.0 {
        10.0
    } else {
        5.0
    };

    let volume_health = if volume_24h > 1_000_000.0 {
        25.0
    } else if volume_24h > 100_000.0 {
        20.0
    } else if volume_24h > 10_000.0 {
        15.0
    } else if volume_24h > 1_000.0 {
        10.0
    } else {
        5.0
    };

    // 10-50% APY is the sustainable sweet spot; triple digits read as bait
    let apy_health = if (10.0..=50.0).contains(&apy) {
        20.0
    } else if (5.0..=100.0).contains(&apy) {
        15.0
    } else if apy > 100.0 {
        5.0
    } else {
        10.0
    };

    let stability_bonus = (15.0 - volatility_score * 0.3).max(0.0);
    let risk_penalty = (risk_score / 100.0) * 30.0;

    (liquidity_health + volume_health + apy_health + stability_bonus - risk_penalty)
        .clamp(0.0, 100.0)
}

pub fn analyze_trend(change_1h: f64, change_6h: f64, change_24h: f64, volume_24h: f64) -> TrendDirection {
    if change_1h > 2.0 && change_6h > 1.0 && volume_24h > 50_000.0 {
        TrendDirection::StrongBullish
    } else if change_1h < -2.0 && change_6h < -1.0 && volume_24h > 50_000.0 {
        TrendDirection::StrongBearish
    } else if change_24h > 5.0 && volume_24h > 100_000.0 {
        TrendDirection::Bullish
    } else if change_24h < -5.0 && volume_24h > 100_000.0 {
        TrendDirection::Bearish
    } else if change_24h.abs() < 2.0 {
        TrendDirection::Sideways
    } else {
        TrendDirection::Uncertain
    }
}
