//! Dark-pool and meme-token metric derivation
//!
//! Contract-safety and sentiment inputs come from external oracles and may be
//! absent. Absent data stays unknown: scoring terms that depend on it are
//! skipped, never replaced with synthesized values.

use crate::types::{ContractSafety, DarkPoolMetrics, PoolSnapshot};

const MEME_KEYWORDS: &[&str] = &[
    "doge", "shib", "pepe", "wojak", "chad", "moon", "rocket", "safe", "baby", "mini", "elon",
    "floki", "inu", "akita", "bonk", "wif", "pump", "gem", "x1000", "lambo", "diamond", "hodl",
    "ape",
];

const ANIMAL_KEYWORDS: &[&str] = &[
    "dog", "cat", "ape", "monkey", "frog", "penguin", "bear", "bull",
];

const MEME_EMOJI: &[char] = &['🚀', '🌙', '💎', '🦍', '🐕', '🐸'];

const HYPE_PREFIXES: &[&str] = &["safe", "baby", "mini", "micro"];

/// Derives the full dark-pool metric set. Pure given its inputs; `None`
/// safety/sentiment propagates as unknown through the dependent fields.
pub fn derive_dark(
    snapshot: &PoolSnapshot,
    safety: Option<&ContractSafety>,
    social_sentiment: Option<f64>,
) -> DarkPoolMetrics {
    let meme_score = calculate_meme_score(&snapshot.token0, &snapshot.name);
    let rug_pull_risk = calculate_rug_pull_risk(snapshot.liquidity_usd, snapshot.age_hours, safety);
    let pump_potential = calculate_pump_potential(
        snapshot.volume_24h,
        snapshot.market_cap,
        snapshot.age_hours,
        social_sentiment,
    );
    let dump_risk = calculate_dump_risk(rug_pull_risk, safety);

    let honeypot_risk = safety
        .and_then(|s| s.is_honeypot)
        .map(|hp| if hp { 1.0 } else { 0.0 });

    DarkPoolMetrics {
        pool_address: snapshot.address.clone(),
        pool_name: snapshot.name.clone(),
        network: snapshot.network.clone(),
        market_cap: snapshot.market_cap,
        liquidity_usd: snapshot.liquidity_usd,
        volume_24h: snapshot.volume_24h,
        age_hours: snapshot.age_hours,
        holder_count: None,
        honeypot_risk,
        rug_pull_risk,
        whale_concentration: None,
        social_sentiment,
        meme_score,
        pump_potential,
        dump_risk,
        creator_verified: safety.and_then(|s| s.verified_contract),
        contract_renounced: safety.and_then(|s| s.ownership_renounced),
        liquidity_locked: safety.and_then(|s| s.liquidity_locked),
        computed_at: snapshot.observed_at,
    }
}

/// How meme-like the token reads, from name/symbol heuristics. 0..=1.
pub fn calculate_meme_score(token_symbol: &str, token_name: &str) -> f64 {
    let name = token_name.to_lowercase();
    let symbol = token_symbol.to_lowercase();

    let mut score: f64 = 0.0;

    for keyword in MEME_KEYWORDS {
        if name.contains(keyword) || symbol.contains(keyword) {
            score += 0.15;
        }
    }

    if name.chars().any(|c| c.is_ascii_digit()) || symbol.chars().any(|c| c.is_ascii_digit()) {
        score += 0.1;
    }

    if token_name.chars().any(|c| MEME_EMOJI.contains(&c)) {
        score += 0.2;
    }

    if HYPE_PREFIXES.iter().any(|p| name.starts_with(p)) {
        score += 0.25;
    }

    if ANIMAL_KEYWORDS.iter().any(|a| name.contains(a)) {
        score += 0.2;
    }

    score.min(1.0)
}

/// Additive rug-pull risk from liquidity, age and contract posture. Terms
/// that need contract data are skipped when the oracle had nothing. 0..=1.
pub fn calculate_rug_pull_risk(
    liquidity_usd: f64,
    age_hours: f64,
    safety: Option<&ContractSafety>,
) -> f64 {
    let mut risk: f64 = 0.0;

    if liquidity_usd < 10_000.0 {
        risk += 0.3;
    } else if liquidity_usd < 50_000.0 {
        risk += 0.2;
    } else if liquidity_usd < 100_000.0 {
        risk += 0.1;
    }

    if age_hours < 1.0 {
        risk += 0.3;
    } else if age_hours < 6.0 {
        risk += 0.2;
    } else if age_hours < 24.0 {
        risk += 0.1;
    }

    if let Some(safety) = safety {
        if let Some(tax) = safety.transfer_tax_pct {
            if tax > 10.0 {
                risk += 0.25;
            } else if tax > 5.0 {
                risk += 0.15;
            }
        }
        if safety.ownership_renounced == Some(false) {
            risk += 0.2;
        }
        if safety.liquidity_locked == Some(false) {
            risk += 0.15;
        }
        if safety.verified_contract == Some(false) {
            risk += 0.1;
        }
    }

    risk.min(1.0)
}

/// Additive pump potential from turnover, market cap, age and sentiment.
/// The sentiment term applies only when data exists. 0..=1.
pub fn calculate_pump_potential(
    volume_24h: f64,
    market_cap: f64,
    age_hours: f64,
    social_sentiment: Option<f64>,
) -> f64 {
    let mut score: f64 = 0.0;

    if market_cap > 0.0 {
        let volume_ratio = volume_24h / market_cap;
        if volume_ratio > 2.0 {
            score += 0.3;
        } else if volume_ratio > 1.0 {
            score += 0.2;
        } else if volume_ratio > 0.5 {
            score += 0.1;
        }
    }

    if let Some(sentiment) = social_sentiment {
        if sentiment > 0.7 {
            score += 0.25;
        } else if sentiment > 0.5 {
            score += 0.15;
        }
    }

    if market_cap > 0.0 {
        if market_cap < 100_000.0 {
            score += 0.2;
        } else if market_cap < 1_000_000.0 {
            score += 0.15;
        } else if market_cap < 10_000_000.0 {
            score += 0.1;
        }
    }

    // narrative sweet spot: old enough to be real, new enough to run
    if (6.0..=72.0).contains(&age_hours) {
        score += 0.15;
    }

    score.min(1.0)
}

pub fn calculate_dump_risk(rug_pull_risk: f64, safety: Option<&ContractSafety>) -> f64 {
    let tax_risk = safety
        .and_then(|s| s.transfer_tax_pct)
        .map(|tax| tax / 20.0)
        .unwrap_or(0.0);
    rug_pull_risk.max(tax_risk).min(1.0)
}
