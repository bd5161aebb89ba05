//! Market data client for pool snapshots
//!
//! Talks to a GeckoTerminal-compatible REST API. Records with missing or
//! malformed numeric fields are excluded from the result set rather than
//! silently zero-filled, so downstream scoring never runs on fabricated data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::retry::{retry_with_backoff, RetryConfig};
use crate::config::FETCH_TIMEOUT_SECS;
use crate::errors::{BotError, BotResult};
use crate::types::PoolSnapshot;

const DEFAULT_BASE_URL: &str = "https://api.geckoterminal.com/api/v2";

/// Default fee tier assumed when the API does not expose one (0.3%).
const DEFAULT_FEE_TIER: f64 = 0.003;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Top pools for a network, paginated.
    async fn list_pools(&self, network: &str, page: u32) -> BotResult<Vec<PoolSnapshot>>;

    /// Trending pools for a network.
    async fn list_trending(&self, network: &str) -> BotResult<Vec<PoolSnapshot>>;

    /// Recently created pools, at least `min_age_minutes` old so they have
    /// enough history to be worth scoring.
    async fn list_new_pools(&self, network: &str, min_age_minutes: u32)
        -> BotResult<Vec<PoolSnapshot>>;
}

pub struct GeckoTerminalClient {
    http: Client,
    base_url: String,
    retry: RetryConfig,
}

impl GeckoTerminalClient {
    pub fn new() -> BotResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> BotResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| BotError::Network {
                message: "building HTTP client".to_string(),
                source: Some(e.into()),
                retry_count: 0,
            })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            retry: RetryConfig::default(),
        })
    }

    async fn fetch_pools(&self, path: &str, network: &str) -> BotResult<Vec<PoolSnapshot>> {
        let url = format!("{}{}", self.base_url, path);
        let body = retry_with_backoff(
            || async {
                let response = self.http.get(&url).send().await?;
                if !response.status().is_success() {
                    anyhow::bail!("HTTP {} from {}", response.status(), url);
                }
                Ok(response.json::<Value>().await?)
            },
            &self.retry,
            path,
        )
        .await?;

        let data = body["data"].as_array().ok_or_else(|| BotError::Api {
            provider: "geckoterminal".to_string(),
            message: format!("missing data array in response from {path}"),
        })?;

        let mut pools = Vec::with_capacity(data.len());
        for entry in data {
            match parse_pool(entry, network) {
                Ok(pool) => pools.push(pool),
                Err(e) => {
                    warn!("Excluding pool record from {}: {}", path, e);
                }
            }
        }
        debug!("Fetched {}/{} valid pools from {}", pools.len(), data.len(), path);
        Ok(pools)
    }
}

#[async_trait]
impl MarketDataProvider for GeckoTerminalClient {
    async fn list_pools(&self, network: &str, page: u32) -> BotResult<Vec<PoolSnapshot>> {
        self.fetch_pools(&format!("/networks/{network}/pools?page={page}"), network)
            .await
    }

    async fn list_trending(&self, network: &str) -> BotResult<Vec<PoolSnapshot>> {
        self.fetch_pools(&format!("/networks/{network}/trending_pools"), network)
            .await
    }

    async fn list_new_pools(
        &self,
        network: &str,
        min_age_minutes: u32,
    ) -> BotResult<Vec<PoolSnapshot>> {
        let pools = self
            .fetch_pools(&format!("/networks/{network}/new_pools"), network)
            .await?;
        let min_age_hours = f64::from(min_age_minutes) / 60.0;
        Ok(pools
            .into_iter()
            .filter(|p| p.age_hours >= min_age_hours)
            .collect())
    }
}

fn parse_pool(entry: &Value, network: &str) -> BotResult<PoolSnapshot> {
    let attrs = &entry["attributes"];

    let address = string_attr(attrs, "address")?;
    let name = string_attr(attrs, "name")?;
    let (token0, token1) = split_pair(&name);

    let created_at = string_attr(attrs, "pool_created_at")?;
    let created_at: DateTime<Utc> = created_at
        .parse()
        .map_err(|_| invalid_field("pool_created_at", &created_at))?;
    let age_hours = (Utc::now() - created_at).num_minutes() as f64 / 60.0;

    let snapshot = PoolSnapshot {
        address,
        name,
        token0,
        token1,
        network: network.to_string(),
        liquidity_usd: numeric_attr(attrs, "reserve_in_usd")?,
        volume_24h: numeric_attr(&attrs["volume_usd"], "h24")?,
        price_change_1h: numeric_attr(&attrs["price_change_percentage"], "h1")?,
        price_change_6h: numeric_attr(&attrs["price_change_percentage"], "h6")?,
        price_change_24h: numeric_attr(&attrs["price_change_percentage"], "h24")?,
        fee_tier: DEFAULT_FEE_TIER,
        age_hours: age_hours.max(0.0),
        // fdv is not always published; 0 skips market-cap scoring terms
        market_cap: numeric_attr(attrs, "fdv_usd").unwrap_or(0.0),
        observed_at: Utc::now(),
    };
    snapshot.validate()?;
    Ok(snapshot)
}

fn string_attr(attrs: &Value, field: &str) -> BotResult<String> {
    attrs[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BotError::Validation {
            field: field.to_string(),
            reason: "missing or not a string".to_string(),
        })
}

/// The API serializes most numbers as strings; accept either form.
fn numeric_attr(attrs: &Value, field: &str) -> BotResult<f64> {
    match &attrs[field] {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid_field(field, &n.to_string())),
        Value::String(s) => s.parse().map_err(|_| invalid_field(field, s)),
        other => Err(invalid_field(field, &other.to_string())),
    }
}

fn invalid_field(field: &str, value: &str) -> BotError {
    BotError::Validation {
        field: field.to_string(),
        reason: format!("invalid numeric value: {value}"),
    }
}

/// "WETH / USDC 0.3%" style pair names; fall back to the raw name.
fn split_pair(name: &str) -> (String, String) {
    let mut parts = name.split('/').map(str::trim);
    match (parts.next(), parts.next()) {
        (Some(t0), Some(t1)) => {
            let t1 = t1.split_whitespace().next().unwrap_or(t1);
            (t0.to_string(), t1.to_string())
        }
        _ => (name.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn pool_json(address: &str, created_hours_ago: i64) -> Value {
        let created = Utc::now() - ChronoDuration::hours(created_hours_ago);
        serde_json::json!({
            "id": format!("eth_{address}"),
            "type": "pool",
            "attributes": {
                "address": address,
                "name": "WETH / USDC 0.3%",
                "pool_created_at": created.to_rfc3339(),
                "reserve_in_usd": "250000.50",
                "fdv_usd": "1200000",
                "volume_usd": { "h24": "84000.25" },
                "price_change_percentage": { "h1": "1.2", "h6": "-3.4", "h24": "8.9" }
            }
        })
    }

    #[test]
    fn parses_string_numerics_and_pair_name() {
        let pool = parse_pool(&pool_json("0xabc", 48), "eth").unwrap();
        assert_eq!(pool.address, "0xabc");
        assert_eq!(pool.token0, "WETH");
        assert_eq!(pool.token1, "USDC");
        assert_eq!(pool.liquidity_usd, 250000.50);
        assert_eq!(pool.volume_24h, 84000.25);
        assert_eq!(pool.price_change_6h, -3.4);
        assert_eq!(pool.market_cap, 1200000.0);
        assert!(pool.age_hours > 47.9 && pool.age_hours < 48.1);
    }

    #[test]
    fn missing_numeric_field_is_a_validation_error() {
        let mut entry = pool_json("0xabc", 48);
        entry["attributes"]["volume_usd"]
            .as_object_mut()
            .unwrap()
            .remove("h24");
        match parse_pool(&entry, "eth").unwrap_err() {
            BotError::Validation { field, .. } => assert_eq!(field, "h24"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_fdv_defaults_market_cap_to_zero() {
        let mut entry = pool_json("0xabc", 48);
        entry["attributes"].as_object_mut().unwrap().remove("fdv_usd");
        let pool = parse_pool(&entry, "eth").unwrap();
        assert_eq!(pool.market_cap, 0.0);
    }

    #[tokio::test]
    async fn invalid_records_are_excluded_not_zeroed() {
        let mut server = mockito::Server::new_async().await;
        let mut bad = pool_json("0xbad", 12);
        bad["attributes"]["reserve_in_usd"] = Value::String("not-a-number".to_string());
        let body = serde_json::json!({ "data": [pool_json("0xgood", 12), bad] });

        let mock = server
            .mock("GET", "/networks/eth/pools?page=1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = GeckoTerminalClient::with_base_url(server.url()).unwrap();
        let pools = client.list_pools("eth", 1).await.unwrap();

        mock.assert_async().await;
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].address, "0xgood");
    }

    #[tokio::test]
    async fn new_pools_below_min_age_are_filtered() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "data": [pool_json("0xfresh", 0), pool_json("0xseasoned", 2)]
        });
        server
            .mock("GET", "/networks/bsc/new_pools")
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = GeckoTerminalClient::with_base_url(server.url()).unwrap();
        let pools = client.list_new_pools("bsc", 30).await.unwrap();
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].address, "0xseasoned");
    }

    #[tokio::test]
    async fn http_error_surfaces_as_network_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/networks/eth/trending_pools")
            .with_status(500)
            .expect_at_least(1)
            .create_async()
            .await;

        let client = GeckoTerminalClient::with_base_url(server.url()).unwrap();
        let result = client.list_trending("eth").await;
        assert!(matches!(result, Err(BotError::Network { .. })));
    }
}
