//! Admission control for trading signals
//!
//! A rejection is a normal outcome: it is logged by the caller and simply
//! means no position is opened this cycle.

use crate::config::{RiskManagement, MAX_MEME_TRADES_PER_DAY};
use crate::types::{DerivedMetrics, MemeSignal, OrchestratorState, TradingSignal};

const MAX_ADMISSIBLE_RISK_SCORE: f64 = 60.0;
const MIN_SIGNAL_CONFIDENCE: f64 = 0.7;
const MIN_PUMP_PROBABILITY: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    Admitted,
    Rejected(RejectReason),
}

impl GateVerdict {
    pub fn is_admitted(&self) -> bool {
        matches!(self, GateVerdict::Admitted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    DailyTradeLimit { trades_today: u32, limit: u32 },
    RiskScoreTooHigh { risk_score: u32 },
    ConfidenceTooLow { confidence: u32 },
    MemeDailyLimit { meme_trades_today: u32 },
    UrgencyNotActionable,
    PumpProbabilityTooLow { pump_probability: u32 },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::DailyTradeLimit { trades_today, limit } => {
                write!(f, "daily trade limit reached ({trades_today}/{limit})")
            }
            RejectReason::RiskScoreTooHigh { risk_score } => {
                write!(f, "risk score too high ({risk_score} > 60)")
            }
            RejectReason::ConfidenceTooLow { confidence } => {
                write!(f, "confidence too low (0.{confidence:02} < 0.70)")
            }
            RejectReason::MemeDailyLimit { meme_trades_today } => {
                write!(f, "daily meme trade limit reached ({meme_trades_today}/{MAX_MEME_TRADES_PER_DAY})")
            }
            RejectReason::UrgencyNotActionable => {
                write!(f, "urgency tier not actionable")
            }
            RejectReason::PumpProbabilityTooLow { pump_probability } => {
                write!(f, "pump probability too low (0.{pump_probability:02} < 0.60)")
            }
        }
    }
}

/// Standard gate: daily limit, pool risk ceiling, signal confidence floor.
pub fn admit_standard(
    signal: &TradingSignal,
    metrics: &DerivedMetrics,
    state: &OrchestratorState,
    risk: &RiskManagement,
) -> GateVerdict {
    if state.trades_today >= risk.max_daily_trades {
        return GateVerdict::Rejected(RejectReason::DailyTradeLimit {
            trades_today: state.trades_today,
            limit: risk.max_daily_trades,
        });
    }
    if metrics.risk_score > MAX_ADMISSIBLE_RISK_SCORE {
        return GateVerdict::Rejected(RejectReason::RiskScoreTooHigh {
            risk_score: metrics.risk_score as u32,
        });
    }
    if signal.confidence < MIN_SIGNAL_CONFIDENCE {
        return GateVerdict::Rejected(RejectReason::ConfidenceTooLow {
            confidence: (signal.confidence * 100.0) as u32,
        });
    }
    GateVerdict::Admitted
}

/// Meme gate: smaller separate daily counter, only the fastest urgency tiers,
/// and a pump probability floor.
pub fn admit_meme(signal: &MemeSignal, state: &OrchestratorState) -> GateVerdict {
    if state.meme_trades_today >= MAX_MEME_TRADES_PER_DAY {
        return GateVerdict::Rejected(RejectReason::MemeDailyLimit {
            meme_trades_today: state.meme_trades_today,
        });
    }
    if !signal.urgency.is_actionable() {
        return GateVerdict::Rejected(RejectReason::UrgencyNotActionable);
    }
    if signal.pump_probability < MIN_PUMP_PROBABILITY {
        return GateVerdict::Rejected(RejectReason::PumpProbabilityTooLow {
            pump_probability: (signal.pump_probability * 100.0) as u32,
        });
    }
    GateVerdict::Admitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RiskManagement;
    use crate::signals::{classify_meme, classify_standard};
    use crate::testutil::{dark_metrics, metrics};
    use crate::types::TrendDirection;

    fn strong_buy_inputs() -> (TradingSignal, DerivedMetrics) {
        let m = metrics(85.0, 20.0, 30.0, 25.0, TrendDirection::Bullish);
        (classify_standard(&m), m)
    }

    #[test]
    fn strong_buy_is_admitted_under_limits() {
        let (signal, m) = strong_buy_inputs();
        let state = OrchestratorState::default();
        let verdict = admit_standard(&signal, &m, &state, &RiskManagement::default());
        assert!(verdict.is_admitted());
    }

    #[test]
    fn daily_limit_rejects_even_the_strongest_signal() {
        let (signal, m) = strong_buy_inputs();
        let state = OrchestratorState {
            trades_today: 10,
            ..Default::default()
        };
        let verdict = admit_standard(&signal, &m, &state, &RiskManagement::default());
        assert_eq!(
            verdict,
            GateVerdict::Rejected(RejectReason::DailyTradeLimit {
                trades_today: 10,
                limit: 10
            })
        );
    }

    #[test]
    fn risk_score_ceiling_is_inclusive_of_sixty() {
        let (signal, mut m) = strong_buy_inputs();
        let state = OrchestratorState::default();
        m.risk_score = 60.0;
        assert!(admit_standard(&signal, &m, &state, &RiskManagement::default()).is_admitted());
        m.risk_score = 60.5;
        assert!(!admit_standard(&signal, &m, &state, &RiskManagement::default()).is_admitted());
    }

    #[test]
    fn low_confidence_is_rejected() {
        let (mut signal, m) = strong_buy_inputs();
        signal.confidence = 0.65;
        let state = OrchestratorState::default();
        let verdict = admit_standard(&signal, &m, &state, &RiskManagement::default());
        assert!(matches!(
            verdict,
            GateVerdict::Rejected(RejectReason::ConfidenceTooLow { .. })
        ));
    }

    #[test]
    fn meme_gate_enforces_its_own_daily_counter() {
        let mut m = dark_metrics(0.6, 0.2, 0.8, 0.3);
        m.social_sentiment = Some(0.9);
        let signal = classify_meme(&m);

        let open = OrchestratorState::default();
        assert!(admit_meme(&signal, &open).is_admitted());

        // standard counter full, meme counter empty: still admitted
        let standard_full = OrchestratorState {
            trades_today: 10,
            ..Default::default()
        };
        assert!(admit_meme(&signal, &standard_full).is_admitted());

        let meme_full = OrchestratorState {
            meme_trades_today: 3,
            ..Default::default()
        };
        assert_eq!(
            admit_meme(&signal, &meme_full),
            GateVerdict::Rejected(RejectReason::MemeDailyLimit { meme_trades_today: 3 })
        );
    }

    #[test]
    fn slow_urgency_and_weak_pumps_are_rejected() {
        let state = OrchestratorState::default();

        // within_day urgency (sentiment not hot enough)
        let mut m = dark_metrics(0.6, 0.2, 0.8, 0.3);
        m.social_sentiment = Some(0.5);
        let slow = classify_meme(&m);
        assert_eq!(
            admit_meme(&slow, &state),
            GateVerdict::Rejected(RejectReason::UrgencyNotActionable)
        );

        let mut hot = dark_metrics(0.6, 0.2, 0.8, 0.3);
        hot.social_sentiment = Some(0.9);
        let mut weak = classify_meme(&hot);
        weak.pump_probability = 0.5;
        assert!(matches!(
            admit_meme(&weak, &state),
            GateVerdict::Rejected(RejectReason::PumpProbabilityTooLow { .. })
        ));
    }
}
