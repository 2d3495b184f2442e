//! Sync configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PURGE_WINDOW_DAYS, DEFAULT_SEARCH_PADDING_DAYS, MAX_WINDOW_DAYS};
use crate::error::{ShiftCalError, ShiftCalResult};

/// Knobs for reconciliation and purging, usually read from a `sync.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Days searched on each side of a candidate for existing events.
    pub search_padding_days: i64,

    /// Days cleared by a purge, starting at today's midnight.
    pub purge_window_days: i64,

    /// Scan existing events in start order instead of the order the remote returns them.
    pub sort_existing_by_start: bool,

    /// When replacing a stale event, give the new one the stale SEQUENCE + 1.
    pub bump_sequence_on_replace: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            search_padding_days: DEFAULT_SEARCH_PADDING_DAYS,
            purge_window_days: DEFAULT_PURGE_WINDOW_DAYS,
            sort_existing_by_start: true,
            bump_sequence_on_replace: false,
        }
    }
}

impl SyncConfig {
    pub fn from_toml_str(content: &str) -> ShiftCalResult<Self> {
        let config: SyncConfig =
            toml::from_str(content).map_err(|e| ShiftCalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> ShiftCalResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> ShiftCalResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ShiftCalError::Config(e.to_string()))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    fn validate(&self) -> ShiftCalResult<()> {
        for (name, days) in [
            ("search_padding_days", self.search_padding_days),
            ("purge_window_days", self.purge_window_days),
        ] {
            if !(0..=MAX_WINDOW_DAYS).contains(&days) {
                return Err(ShiftCalError::Config(format!(
                    "{} must be between 0 and {} (got {})",
                    name, MAX_WINDOW_DAYS, days
                )));
            }
        }
        Ok(())
    }
}
