//! JSON-backed settings persistence.
//!
//! One record under one file, `<data_dir>/settings.json`. The store does
//! no validation beyond what serde coerces; range clamping belongs to
//! [`SessionConfig`] and is applied on load so stale out-of-range values
//! never reach the engine.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{ConfigError, Result};
use crate::session::SessionConfig;

/// Returns `~/.config/breathbox[-dev]/` based on BREATHBOX_ENV.
///
/// Set BREATHBOX_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("BREATHBOX_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("breathbox-dev")
    } else {
        base_dir.join("breathbox")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Load/save handle for the single settings record.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the default location in the app data directory.
    pub fn open() -> Result<Self> {
        Ok(Self {
            path: data_dir()?.join("settings.json"),
        })
    }

    /// Store at an explicit path. Used by tests and the dev environment.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted record, substituting defaults for missing or
    /// unreadable data and clamping every field into range.
    pub fn load(&self) -> SessionConfig {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<SessionConfig>(&content) {
                Ok(cfg) => cfg.clamped(),
                Err(e) => {
                    warn!("unreadable settings at {}: {e}; using defaults", self.path.display());
                    SessionConfig::default()
                }
            },
            Err(_) => SessionConfig::default(),
        }
    }

    /// Persist the record as pretty JSON.
    ///
    /// # Errors
    /// Returns an error if the record cannot be serialized or written.
    pub fn save(&self, config: &SessionConfig) -> Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, content).map_err(|e| ConfigError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
