//! Contract-safety and social-sentiment oracles

use async_trait::async_trait;

use crate::errors::BotResult;
use crate::types::ContractSafety;

/// Analyzes a token contract for honeypot/rug indicators. `Ok(None)` means
/// the oracle had no data; callers must treat that as unknown, never as safe.
#[async_trait]
pub trait ContractSafetyOracle: Send + Sync {
    async fn analyze(&self, token_address: &str, network: &str) -> BotResult<Option<ContractSafety>>;
}

/// Social sentiment for a token, 0..=1. `Ok(None)` means no data.
#[async_trait]
pub trait SentimentOracle: Send + Sync {
    async fn sentiment(&self, token_symbol: &str) -> BotResult<Option<f64>>;
}

/// Stand-in used when no safety provider is configured. Reports every lookup
/// as unknown instead of inventing plausible-looking flags.
pub struct UnavailableSafetyOracle;

#[async_trait]
impl ContractSafetyOracle for UnavailableSafetyOracle {
    async fn analyze(&self, _token_address: &str, _network: &str) -> BotResult<Option<ContractSafety>> {
        Ok(None)
    }
}

/// Stand-in used when no sentiment provider is configured.
pub struct UnavailableSentimentOracle;

#[async_trait]
impl SentimentOracle for UnavailableSentimentOracle {
    async fn sentiment(&self, _token_symbol: &str) -> BotResult<Option<f64>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unavailable_oracles_report_unknown_not_safe() {
        let safety = UnavailableSafetyOracle
            .analyze("0xtoken", "eth")
            .await
            .unwrap();
        assert_eq!(safety, None);

        let sentiment = UnavailableSentimentOracle.sentiment("PEPE").await.unwrap();
        assert_eq!(sentiment, None);
    }
}
