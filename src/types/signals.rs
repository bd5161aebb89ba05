//! Trading signal types for standard and meme classification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    Buy,
    Sell,
    Hold,
}

/// Signal produced by the standard buy/sell/hold classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub pool_address: String,
    pub pool_name: String,
    pub network: String,
    pub signal_type: SignalType,
    /// 0..=1
    pub strength: f64,
    /// 0..=1
    pub confidence: f64,
    pub reasoning: String,
    pub timestamp: DateTime<Utc>,
    pub target_price: Option<f64>,
    pub stop_loss: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemeSignalType {
    PumpIncoming,
    DumpWarning,
    HoldSteady,
    AvoidScam,
}

/// How quickly a meme signal should be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Immediate,
    WithinHour,
    WithinDay,
    Monitor,
}

impl Urgency {
    /// Only the two fastest tiers are tradeable by the meme risk gate.
    pub fn is_actionable(&self) -> bool {
        matches!(self, Urgency::Immediate | Urgency::WithinHour)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemeRiskLevel {
    Extreme,
    VeryHigh,
    High,
    Medium,
}

/// Signal produced by the meme/dark-pool classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemeSignal {
    pub pool_address: String,
    pub pool_name: String,
    pub network: String,
    pub signal_type: MemeSignalType,
    pub urgency: Urgency,
    /// 0..=1
    pub pump_probability: f64,
    /// Expected price multiplier when the signal plays out (2x, 10x, ...).
    pub target_multiplier: f64,
    pub risk_level: MemeRiskLevel,
    pub reasoning: String,
    pub social_indicators: Vec<String>,
    pub technical_indicators: Vec<String>,
    pub timestamp: DateTime<Utc>,
}
