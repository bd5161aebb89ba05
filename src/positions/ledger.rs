//! Position ledger: none -> open -> closed
//!
//! Positions are created only for gate-admitted signals, swept every cycle
//! against the valuer, and closed when an inclusive stop-loss/take-profit
//! boundary is crossed. Execution failures leave state untouched.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info, warn};

use crate::config::RiskManagement;
use crate::errors::BotResult;
use crate::oracles::{Notification, NotificationSink, PositionValuer, TradeExecutor, TradeRequest};
use crate::types::{
    CloseReason, ClosedTrade, OrchestratorState, Position, PositionKind, PositionStatus,
};

const MEME_POSITION_CAP: Decimal = dec!(200);

/// Sizing rule per position kind.
pub fn position_amount(kind: PositionKind, risk: &RiskManagement, recommended: Decimal) -> Decimal {
    match kind {
        PositionKind::Standard => risk.max_position_size.min(recommended),
        PositionKind::Meme => MEME_POSITION_CAP.min(risk.max_position_size * dec!(0.2)),
    }
}

#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub pool_address: String,
    pub pool_name: String,
    pub network: String,
    pub kind: PositionKind,
    pub recommended_amount: Decimal,
    pub expected_apy: f64,
}

/// Opens a position for an admitted signal. Returns `Ok(None)` when the pool
/// already has an open position (one per address, no exceptions).
pub async fn open_position(
    state: &mut OrchestratorState,
    request: OpenRequest,
    risk: &RiskManagement,
    executor: &dyn TradeExecutor,
    notifier: &dyn NotificationSink,
) -> BotResult<Option<Position>> {
    if state.has_open_position(&request.pool_address) {
        debug!(pool = %request.pool_name, "Position already open, skipping");
        return Ok(None);
    }

    let amount = position_amount(request.kind, risk, request.recommended_amount);
    let trade = TradeRequest {
        pool_address: request.pool_address.clone(),
        pool_name: request.pool_name.clone(),
        network: request.network.clone(),
        kind: request.kind,
        amount,
    };

    // a failed open must not leave a partial position behind
    let receipt = executor.open(&trade).await?;

    let position = Position {
        id: uuid::Uuid::new_v4().to_string(),
        pool_address: request.pool_address,
        pool_name: request.pool_name,
        network: request.network,
        kind: request.kind,
        amount,
        entry_time: Utc::now(),
        expected_apy: request.expected_apy,
        status: PositionStatus::Open,
    };

    state.active_positions.push(position.clone());
    state.total_trades += 1;
    match request.kind {
        PositionKind::Standard => state.trades_today += 1,
        PositionKind::Meme => state.meme_trades_today += 1,
    }

    info!(
        pool = %position.pool_name,
        amount = %position.amount,
        kind = ?position.kind,
        tx = %receipt.tx_hash,
        "Opened position"
    );

    notifier
        .notify(Notification {
            kind: "trade_executed".to_string(),
            message: format!("Opened {} position in {}", position.amount, position.pool_name),
            details: serde_json::to_value(&position).unwrap_or_default(),
        })
        .await;

    Ok(Some(position))
}

/// Sweeps every open position: recomputes PnL from the valuer and closes
/// positions at or beyond the configured boundaries. Both boundaries are
/// inclusive.
pub async fn monitor_positions(
    state: &mut OrchestratorState,
    risk: &RiskManagement,
    valuer: &dyn PositionValuer,
    executor: &dyn TradeExecutor,
    notifier: &dyn NotificationSink,
) -> Vec<ClosedTrade> {
    let mut closed = Vec::new();

    for position in state.active_positions.clone() {
        // a hand-edited state file can carry a degenerate amount
        if position.amount <= Decimal::ZERO {
            warn!(
                pool = %position.pool_name,
                amount = %position.amount,
                "Position has a non-positive amount, skipping sweep"
            );
            continue;
        }
        let current_value = match valuer.current_value(&position).await {
            Ok(value) => value,
            Err(e) => {
                warn!(pool = %position.pool_name, "Valuation failed, position stays open: {e}");
                continue;
            }
        };

        let pnl = current_value - position.amount;
        let pnl_percentage = pnl / position.amount;

        let reason = if pnl_percentage <= -risk.stop_loss_threshold {
            CloseReason::StopLoss
        } else if pnl_percentage >= risk.take_profit_threshold {
            CloseReason::TakeProfit
        } else {
            continue;
        };

        match executor.close(&position, reason).await {
            Ok(_receipt) => {
                state
                    .active_positions
                    .retain(|p| p.pool_address != position.pool_address);
                state.daily_pnl += pnl;
                state.total_pnl += pnl;

                let mut archived = position.clone();
                archived.status = PositionStatus::Closed;
                let trade = ClosedTrade {
                    position: archived,
                    close_reason: reason,
                    pnl,
                    pnl_percentage,
                    closed_at: Utc::now(),
                };

                info!(
                    pool = %position.pool_name,
                    reason = ?reason,
                    pnl = %pnl,
                    "Closed position"
                );

                notifier
                    .notify(Notification {
                        kind: "position_closed".to_string(),
                        message: format!(
                            "Closed {} ({:?}), PnL {}",
                            position.pool_name, reason, pnl
                        ),
                        details: serde_json::to_value(&trade).unwrap_or_default(),
                    })
                    .await;

                closed.push(trade);
            }
            Err(e) => {
                warn!(
                    pool = %position.pool_name,
                    "Close execution failed, position stays open: {e}"
                );
            }
        }
    }

    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BotError;
    use crate::types::ExecutionReceipt;
    use async_trait::async_trait;
    use rust_decimal::prelude::*;

    struct OkExecutor;

    #[async_trait]
    impl TradeExecutor for OkExecutor {
        async fn open(&self, _request: &TradeRequest) -> BotResult<ExecutionReceipt> {
            Ok(receipt())
        }
        async fn close(&self, _position: &Position, _reason: CloseReason) -> BotResult<ExecutionReceipt> {
            Ok(receipt())
        }
    }

    struct FailingExecutor;

    #[async_trait]
    impl TradeExecutor for FailingExecutor {
        async fn open(&self, request: &TradeRequest) -> BotResult<ExecutionReceipt> {
            Err(BotError::Execution {
                pool: request.pool_name.clone(),
                message: "venue down".to_string(),
            })
        }
        async fn close(&self, position: &Position, _reason: CloseReason) -> BotResult<ExecutionReceipt> {
            Err(BotError::Execution {
                pool: position.pool_name.clone(),
                message: "venue down".to_string(),
            })
        }
    }

    /// Values every position at amount * factor.
    struct FixedValuer {
        factor: Decimal,
    }

    #[async_trait]
    impl PositionValuer for FixedValuer {
        async fn current_value(&self, position: &Position) -> BotResult<Decimal> {
            Ok(position.amount * self.factor)
        }
    }

    struct NullNotifier;

    #[async_trait]
    impl NotificationSink for NullNotifier {
        async fn notify(&self, _notification: Notification) {}
    }

    fn receipt() -> ExecutionReceipt {
        ExecutionReceipt {
            id: "r1".to_string(),
            tx_hash: "0xabc".to_string(),
            gas_used: 150_000,
            execution_time_ms: 5,
            timestamp: Utc::now(),
        }
    }

    fn open_request(kind: PositionKind) -> OpenRequest {
        OpenRequest {
            pool_address: "0xpool".to_string(),
            pool_name: "WETH / USDC".to_string(),
            network: "eth".to_string(),
            kind,
            recommended_amount: dec!(5000),
            expected_apy: 30.0,
        }
    }

    #[test]
    fn sizing_caps_standard_and_meme_positions() {
        let risk = RiskManagement::default();
        assert_eq!(
            position_amount(PositionKind::Standard, &risk, dec!(5000)),
            dec!(1000)
        );
        assert_eq!(
            position_amount(PositionKind::Standard, &risk, dec!(400)),
            dec!(400)
        );
        // min(200, 1000 * 0.2)
        assert_eq!(position_amount(PositionKind::Meme, &risk, dec!(5000)), dec!(200));

        let small = RiskManagement {
            max_position_size: dec!(500),
            ..Default::default()
        };
        assert_eq!(position_amount(PositionKind::Meme, &small, dec!(5000)), dec!(100));
    }

    #[tokio::test]
    async fn open_updates_counters_per_kind() {
        let mut state = OrchestratorState::default();
        let risk = RiskManagement::default();

        let position = open_position(&mut state, open_request(PositionKind::Standard), &risk, &OkExecutor, &NullNotifier)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(position.status, PositionStatus::Open);
        assert_eq!(state.trades_today, 1);
        assert_eq!(state.meme_trades_today, 0);
        assert_eq!(state.total_trades, 1);

        let mut meme = open_request(PositionKind::Meme);
        meme.pool_address = "0xmeme".to_string();
        open_position(&mut state, meme, &risk, &OkExecutor, &NullNotifier)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(state.trades_today, 1);
        assert_eq!(state.meme_trades_today, 1);
        assert_eq!(state.total_trades, 2);
    }

    #[tokio::test]
    async fn second_open_on_same_pool_is_refused() {
        let mut state = OrchestratorState::default();
        let risk = RiskManagement::default();

        open_position(&mut state, open_request(PositionKind::Standard), &risk, &OkExecutor, &NullNotifier)
            .await
            .unwrap()
            .unwrap();
        let duplicate = open_position(&mut state, open_request(PositionKind::Standard), &risk, &OkExecutor, &NullNotifier)
            .await
            .unwrap();
        assert!(duplicate.is_none());
        assert_eq!(state.active_positions.len(), 1);
        assert_eq!(state.total_trades, 1);
    }

    #[tokio::test]
    async fn failed_open_leaves_state_unchanged() {
        let mut state = OrchestratorState::default();
        let risk = RiskManagement::default();

        let result = open_position(
            &mut state,
            open_request(PositionKind::Standard),
            &risk,
            &FailingExecutor,
            &NullNotifier,
        )
        .await;
        assert!(result.is_err());
        assert!(state.active_positions.is_empty());
        assert_eq!(state.trades_today, 0);
        assert_eq!(state.total_trades, 0);
    }

    #[tokio::test]
    async fn stop_loss_boundary_is_inclusive() {
        let mut state = OrchestratorState::default();
        let risk = RiskManagement::default();
        open_position(&mut state, open_request(PositionKind::Standard), &risk, &OkExecutor, &NullNotifier)
            .await
            .unwrap()
            .unwrap();

        // amount 1000, valued at exactly -5%
        let closed = monitor_positions(
            &mut state,
            &risk,
            &FixedValuer { factor: dec!(0.95) },
            &OkExecutor,
            &NullNotifier,
        )
        .await;

        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].close_reason, CloseReason::StopLoss);
        assert_eq!(closed[0].pnl, dec!(-50));
        assert_eq!(closed[0].pnl_percentage, dec!(-0.05));
        assert!(state.active_positions.is_empty());
        assert_eq!(state.daily_pnl, dec!(-50));
        assert_eq!(state.total_pnl, dec!(-50));
    }

    #[tokio::test]
    async fn take_profit_boundary_is_inclusive() {
        let mut state = OrchestratorState::default();
        let risk = RiskManagement::default();
        open_position(&mut state, open_request(PositionKind::Standard), &risk, &OkExecutor, &NullNotifier)
            .await
            .unwrap()
            .unwrap();

        let closed = monitor_positions(
            &mut state,
            &risk,
            &FixedValuer { factor: dec!(1.15) },
            &OkExecutor,
            &NullNotifier,
        )
        .await;

        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].close_reason, CloseReason::TakeProfit);
        assert_eq!(state.daily_pnl, dec!(150));
    }

    #[tokio::test]
    async fn position_inside_bounds_stays_open() {
        let mut state = OrchestratorState::default();
        let risk = RiskManagement::default();
        open_position(&mut state, open_request(PositionKind::Standard), &risk, &OkExecutor, &NullNotifier)
            .await
            .unwrap()
            .unwrap();

        let closed = monitor_positions(
            &mut state,
            &risk,
            &FixedValuer { factor: dec!(1.02) },
            &OkExecutor,
            &NullNotifier,
        )
        .await;

        assert!(closed.is_empty());
        assert_eq!(state.active_positions.len(), 1);
        assert_eq!(state.daily_pnl, Decimal::ZERO);
    }

    #[tokio::test]
    async fn zero_amount_position_is_skipped_not_divided() {
        let mut state = OrchestratorState::default();
        let risk = RiskManagement::default();
        state.active_positions.push(Position {
            id: "p0".to_string(),
            pool_address: "0xpool".to_string(),
            pool_name: "WETH / USDC".to_string(),
            network: "eth".to_string(),
            kind: PositionKind::Standard,
            amount: Decimal::ZERO,
            entry_time: Utc::now(),
            expected_apy: 30.0,
            status: PositionStatus::Open,
        });

        let closed = monitor_positions(
            &mut state,
            &risk,
            &FixedValuer { factor: dec!(0.5) },
            &OkExecutor,
            &NullNotifier,
        )
        .await;

        assert!(closed.is_empty());
        assert_eq!(state.active_positions.len(), 1);
    }

    #[tokio::test]
    async fn failed_close_keeps_position_open() {
        let mut state = OrchestratorState::default();
        let risk = RiskManagement::default();
        open_position(&mut state, open_request(PositionKind::Standard), &risk, &OkExecutor, &NullNotifier)
            .await
            .unwrap()
            .unwrap();

        let closed = monitor_positions(
            &mut state,
            &risk,
            &FixedValuer { factor: dec!(0.80) },
            &FailingExecutor,
            &NullNotifier,
        )
        .await;

        assert!(closed.is_empty());
        assert_eq!(state.active_positions.len(), 1);
        assert_eq!(state.daily_pnl, Decimal::ZERO);
    }
}
