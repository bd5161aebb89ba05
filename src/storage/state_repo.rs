//! Orchestrator state persistence

use std::path::PathBuf;
use tracing::info;

use super::write_json_atomic;
use crate::errors::{BotError, BotResult};
use crate::types::OrchestratorState;

/// Load/save boundary for [`OrchestratorState`]. The file on disk is the
/// source of truth after a restart.
pub struct StateRepository {
    path: PathBuf,
}

impl StateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing file means a fresh start, not an error.
    pub fn load(&self) -> BotResult<OrchestratorState> {
        if !self.path.exists() {
            info!("No state file at {}, starting fresh", self.path.display());
            return Ok(OrchestratorState::default());
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| BotError::Storage {
            context: format!("reading state {}", self.path.display()),
            source: e.into(),
        })?;
        let state = serde_json::from_str(&raw).map_err(|e| BotError::DataParsing {
            context: format!("state file {}", self.path.display()),
            source: e.into(),
        })?;
        info!("State loaded from {}", self.path.display());
        Ok(state)
    }

    pub fn save(&self, state: &OrchestratorState) -> BotResult<()> {
        write_json_atomic(&self.path, state).map_err(|e| BotError::Storage {
            context: format!("writing state {}", self.path.display()),
            source: e,
        })
    }
}
