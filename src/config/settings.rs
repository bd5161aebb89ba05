//! Bot configuration settings and file handling

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::errors::{BotError, BotResult};
use crate::storage::write_json_atomic;

// Configuration bounds
pub const MIN_ANALYSIS_INTERVAL_SECS: u64 = 30;
pub const MAX_DAILY_TRADES_CEILING: u32 = 50;
pub const MAX_MEME_TRADES_PER_DAY: u32 = 3;
pub const MIN_POSITION_SIZE: Decimal = dec!(10);
pub const FETCH_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskManagement {
    pub max_daily_trades: u32,
    pub max_position_size: Decimal,
    /// Fractional loss that forces a close, e.g. 0.05 for -5%.
    pub stop_loss_threshold: Decimal,
    /// Fractional gain that forces a close, e.g. 0.15 for +15%.
    pub take_profit_threshold: Decimal,
}

impl Default for RiskManagement {
    fn default() -> Self {
        Self {
            max_daily_trades: 10,
            max_position_size: dec!(1000),
            stop_loss_threshold: dec!(0.05),
            take_profit_threshold: dec!(0.15),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub email_enabled: bool,
    pub webhook_enabled: bool,
    pub browser_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_enabled: false,
            webhook_enabled: false,
            browser_notifications: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds between analysis cycles.
    pub analysis_interval: u64,
    /// Seconds between scoring-oracle retraining runs.
    pub ai_training_interval: u64,
    pub automation_enabled: bool,
    pub risk_management: RiskManagement,
    pub networks: Vec<String>,
    pub notification_settings: NotificationSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis_interval: 300,
            ai_training_interval: 3600,
            automation_enabled: true,
            risk_management: RiskManagement::default(),
            networks: vec![
                "eth".to_string(),
                "polygon".to_string(),
                "bsc".to_string(),
                "arbitrum".to_string(),
            ],
            notification_settings: NotificationSettings::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/config.json"))
    }

    /// Loads configuration from a JSON file over the defaults. A missing file
    /// gets the defaults written to it; a malformed one is an error.
    pub fn load(path: &Path) -> BotResult<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|e| BotError::Storage {
                context: format!("reading config {}", path.display()),
                source: e.into(),
            })?;
            let loaded: Config = serde_json::from_str(&raw).map_err(|e| BotError::DataParsing {
                context: format!("config file {}", path.display()),
                source: e.into(),
            })?;
            info!("Configuration loaded from {}", path.display());
            loaded
        } else {
            info!("No config file at {}, writing defaults", path.display());
            let defaults = Config::default();
            defaults.save(path)?;
            defaults
        };

        config.clamp_bounds();
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> BotResult<()> {
        write_json_atomic(path, self).map_err(|e| BotError::Storage {
            context: format!("writing config {}", path.display()),
            source: e,
        })
    }

    fn clamp_bounds(&mut self) {
        if self.analysis_interval < MIN_ANALYSIS_INTERVAL_SECS {
            warn!(
                "analysis_interval {}s below minimum, clamping to {}s",
                self.analysis_interval, MIN_ANALYSIS_INTERVAL_SECS
            );
            self.analysis_interval = MIN_ANALYSIS_INTERVAL_SECS;
        }
        if self.risk_management.max_daily_trades > MAX_DAILY_TRADES_CEILING {
            warn!(
                "max_daily_trades {} above ceiling, clamping to {}",
                self.risk_management.max_daily_trades, MAX_DAILY_TRADES_CEILING
            );
            self.risk_management.max_daily_trades = MAX_DAILY_TRADES_CEILING;
        }
        if self.risk_management.max_position_size < MIN_POSITION_SIZE {
            self.risk_management.max_position_size = MIN_POSITION_SIZE;
        }
    }
}
