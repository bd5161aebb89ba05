//! Position valuation collaborator

use async_trait::async_trait;
use rust_decimal::prelude::*;

use crate::errors::BotResult;
use crate::types::Position;

/// Supplies the current mark for an open position. The monitor sweep derives
/// pnl_percentage from this.
#[async_trait]
pub trait PositionValuer: Send + Sync {
    async fn current_value(&self, position: &Position) -> BotResult<Decimal>;
}

/// Simulated mark-to-market: a bounded random drift around entry. Isolated
/// here so the rest of the pipeline stays deterministic.
pub struct SimulatedValuer;

#[async_trait]
impl PositionValuer for SimulatedValuer {
    async fn current_value(&self, position: &Position) -> BotResult<Decimal> {
        // drift in [-10%, +20%]
        let drift = -0.10 + rand::random::<f64>() * 0.30;
        let factor = Decimal::from_f64(1.0 + drift).unwrap_or(Decimal::ONE);
        Ok(position.amount * factor)
    }
}
