//! Trade execution collaborator
//!
//! Execution is simulated; the trait keeps the pipeline decoupled from any
//! real settlement path and gives tests a deterministic double.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::time::{Duration, Instant};
use tracing::info;

use crate::errors::{BotError, BotResult};
use crate::types::{CloseReason, ExecutionReceipt, Position, PositionKind};

#[derive(Debug, Clone)]
pub struct TradeRequest {
    pub pool_address: String,
    pub pool_name: String,
    pub network: String,
    pub kind: PositionKind,
    pub amount: Decimal,
}

#[async_trait]
pub trait TradeExecutor: Send + Sync {
    async fn open(&self, request: &TradeRequest) -> BotResult<ExecutionReceipt>;
    async fn close(&self, position: &Position, reason: CloseReason) -> BotResult<ExecutionReceipt>;
}

/// Models execution latency and occasional failure. Randomness stays inside
/// this collaborator; nothing in the scoring path depends on it.
pub struct SimulatedExecutor {
    pub success_rate: f64,
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self { success_rate: 0.95 }
    }
}

impl SimulatedExecutor {
    async fn simulate(&self, context: &str, pool: &str) -> BotResult<ExecutionReceipt> {
        let started = Instant::now();
        tokio::time::sleep(Duration::from_millis(100)).await;

        if rand::random::<f64>() >= self.success_rate {
            return Err(BotError::Execution {
                pool: pool.to_string(),
                message: format!("simulated {context} rejected by venue"),
            });
        }

        let receipt = ExecutionReceipt {
            id: uuid::Uuid::new_v4().to_string(),
            tx_hash: format!("0x{}", uuid::Uuid::new_v4().simple()),
            gas_used: 150_000,
            execution_time_ms: started.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        };

        info!(
            receipt_id = %receipt.id,
            pool = %pool,
            "Simulated {context} executed"
        );

        Ok(receipt)
    }
}

#[async_trait]
impl TradeExecutor for SimulatedExecutor {
    async fn open(&self, request: &TradeRequest) -> BotResult<ExecutionReceipt> {
        self.simulate("liquidity provision", &request.pool_name).await
    }

    async fn close(&self, position: &Position, reason: CloseReason) -> BotResult<ExecutionReceipt> {
        self.simulate(
            match reason {
                CloseReason::StopLoss => "stop-loss withdrawal",
                CloseReason::TakeProfit => "take-profit withdrawal",
            },
            &position.pool_name,
        )
        .await
    }
}
