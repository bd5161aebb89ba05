//! Standard buy/sell/hold classifier

use chrono::Utc;

use crate::types::{DerivedMetrics, SignalType, TradingSignal, TrendDirection};

pub struct Rule {
    pub name: &'static str,
    applies: fn(&DerivedMetrics) -> bool,
    emit: fn(&DerivedMetrics) -> Outcome,
}

struct Outcome {
    signal_type: SignalType,
    strength: f64,
    confidence: f64,
    reasoning: String,
}

/// Priority-ordered rule table. First match wins.
pub const RULES: &[Rule] = &[
    Rule {
        name: "strong_buy",
        applies: |m| {
            m.health_score > 80.0
                && m.trend_direction.is_bullish()
                && m.risk_score < 30.0
                && (15.0..=80.0).contains(&m.apy)
                && m.volatility_score < 40.0
        },
        emit: |m| Outcome {
            signal_type: SignalType::Buy,
            strength: 0.85,
            confidence: 0.8,
            reasoning: format!(
                "Excellent fundamentals: health {:.1}, APY {:.1}%, low risk {:.1}",
                m.health_score, m.apy, m.risk_score
            ),
        },
    },
    Rule {
        name: "moderate_buy",
        applies: |m| {
            m.health_score > 60.0
                && m.trend_direction == TrendDirection::Bullish
                && m.risk_score < 50.0
                && m.apy > 10.0
        },
        emit: |m| Outcome {
            signal_type: SignalType::Buy,
            strength: 0.65,
            confidence: 0.65,
            reasoning: format!(
                "Good opportunity: health {:.1}, APY {:.1}%",
                m.health_score, m.apy
            ),
        },
    },
    Rule {
        name: "sell",
        applies: |m| {
            m.health_score < 30.0
                || m.risk_score > 75.0
                || m.trend_direction == TrendDirection::StrongBearish
                || m.apy < 2.0
        },
        emit: |m| Outcome {
            signal_type: SignalType::Sell,
            strength: 0.8,
            confidence: 0.75,
            reasoning: format!(
                "High risk: health {:.1}, risk {:.1}",
                m.health_score, m.risk_score
            ),
        },
    },
    Rule {
        name: "caution_hold",
        applies: |m| m.volatility_score > 60.0,
        emit: |m| Outcome {
            signal_type: SignalType::Hold,
            strength: 0.3,
            confidence: 0.9,
            reasoning: format!(
                "Excessive volatility {:.1}, await stabilization",
                m.volatility_score
            ),
        },
    },
    Rule {
        name: "default_hold",
        applies: |_| true,
        emit: |_| Outcome {
            signal_type: SignalType::Hold,
            strength: 0.5,
            confidence: 0.5,
            reasoning: "Neutral market conditions".to_string(),
        },
    },
];

pub fn classify_standard(metrics: &DerivedMetrics) -> TradingSignal {
    let rule = RULES
        .iter()
        .find(|r| (r.applies)(metrics))
        .unwrap_or_else(|| &RULES[RULES.len() - 1]);
    let outcome = (rule.emit)(metrics);

    TradingSignal {
        pool_address: metrics.pool_address.clone(),
        pool_name: metrics.pool_name.clone(),
        network: metrics.network.clone(),
        signal_type: outcome.signal_type,
        strength: outcome.strength,
        confidence: outcome.confidence,
        reasoning: outcome.reasoning,
        timestamp: Utc::now(),
        target_price: None,
        stop_loss: None,
    }
}
