//! Meme / dark-pool classifier

use chrono::Utc;

use crate::types::{DarkPoolMetrics, MemeRiskLevel, MemeSignal, MemeSignalType, Urgency};

pub struct MemeRule {
    pub name: &'static str,
    applies: fn(&DarkPoolMetrics) -> bool,
    emit: fn(&DarkPoolMetrics) -> MemeOutcome,
}

struct MemeOutcome {
    signal_type: MemeSignalType,
    urgency: Urgency,
    target_multiplier: f64,
    risk_level: MemeRiskLevel,
    reasoning: String,
}

fn honeypot_risk_of(m: &DarkPoolMetrics) -> f64 {
    // unknown honeypot status never triggers the scam rule on its own
    m.honeypot_risk.unwrap_or(0.0)
}

/// Priority-ordered rule table. First match wins.
pub const MEME_RULES: &[MemeRule] = &[
    MemeRule {
        name: "avoid_scam",
        applies: |m| m.rug_pull_risk > 0.7 || honeypot_risk_of(m) > 0.5,
        emit: |m| MemeOutcome {
            signal_type: MemeSignalType::AvoidScam,
            urgency: Urgency::Immediate,
            target_multiplier: 1.0,
            risk_level: MemeRiskLevel::Extreme,
            reasoning: format!(
                "High scam risk: rug pull {:.2}, honeypot {:.2}",
                m.rug_pull_risk,
                honeypot_risk_of(m)
            ),
        },
    },
    MemeRule {
        name: "pump_incoming",
        applies: |m| m.pump_potential > 0.7 && m.rug_pull_risk < 0.3,
        emit: |m| MemeOutcome {
            signal_type: MemeSignalType::PumpIncoming,
            urgency: if m.social_sentiment.unwrap_or(0.0) > 0.8 {
                Urgency::WithinHour
            } else {
                Urgency::WithinDay
            },
            target_multiplier: 2.0 + m.pump_potential * 8.0,
            risk_level: if m.meme_score > 0.5 {
                MemeRiskLevel::VeryHigh
            } else {
                MemeRiskLevel::High
            },
            reasoning: format!(
                "Strong pump potential: {:.2}, good fundamentals",
                m.pump_potential
            ),
        },
    },
    MemeRule {
        name: "dump_warning",
        applies: |m| m.dump_risk > 0.6,
        emit: |m| MemeOutcome {
            signal_type: MemeSignalType::DumpWarning,
            urgency: Urgency::WithinHour,
            target_multiplier: 1.0,
            risk_level: MemeRiskLevel::VeryHigh,
            reasoning: format!("Dump risk detected: {:.2}", m.dump_risk),
        },
    },
    MemeRule {
        name: "meme_momentum",
        applies: |m| m.meme_score > 0.6 && m.rug_pull_risk < 0.4,
        emit: |m| MemeOutcome {
            signal_type: MemeSignalType::PumpIncoming,
            urgency: Urgency::WithinDay,
            target_multiplier: 1.5 + m.meme_score * 3.0,
            risk_level: MemeRiskLevel::High,
            reasoning: format!("Meme potential detected: score {:.2}", m.meme_score),
        },
    },
    MemeRule {
        name: "hold_steady",
        applies: |_| true,
        emit: |_| MemeOutcome {
            signal_type: MemeSignalType::HoldSteady,
            urgency: Urgency::Monitor,
            target_multiplier: 1.0,
            risk_level: MemeRiskLevel::Medium,
            reasoning: "Standard meme token posture, keep watching".to_string(),
        },
    },
];

pub fn classify_meme(metrics: &DarkPoolMetrics) -> MemeSignal {
    let rule = MEME_RULES
        .iter()
        .find(|r| (r.applies)(metrics))
        .unwrap_or_else(|| &MEME_RULES[MEME_RULES.len() - 1]);
    let outcome = (rule.emit)(metrics);

    let mut social_indicators = Vec::new();
    let mut technical_indicators = Vec::new();
    if outcome.signal_type == MemeSignalType::PumpIncoming {
        if metrics.social_sentiment.unwrap_or(0.0) > 0.7 {
            social_indicators.push("high_social_buzz".to_string());
        }
        if metrics.volume_24h > metrics.liquidity_usd {
            technical_indicators.push("high_volume_ratio".to_string());
        }
        if metrics.age_hours < 48.0 {
            technical_indicators.push("new_token_momentum".to_string());
        }
    }

    MemeSignal {
        pool_address: metrics.pool_address.clone(),
        pool_name: metrics.pool_name.clone(),
        network: metrics.network.clone(),
        signal_type: outcome.signal_type,
        urgency: outcome.urgency,
        pump_probability: metrics.pump_potential,
        target_multiplier: outcome.target_multiplier,
        risk_level: outcome.risk_level,
        reasoning: outcome.reasoning,
        social_indicators,
        technical_indicators,
        timestamp: Utc::now(),
    }
}
