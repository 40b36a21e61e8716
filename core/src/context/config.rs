//! Plugin configuration
//!
//! This module re-exports the shared types from respawn-types and provides
//! persistence for TimerConfig.

use std::path::Path;

use respawn_types::TimerConfig;

use super::ConfigError;

/// confy application name
pub const APP_NAME: &str = "respawn-timers";
/// confy configuration file name
pub const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// TimerConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for TimerConfig persistence
pub trait TimerConfigExt: Sized {
    /// Load from the default location, falling back to defaults on any error
    fn load() -> Self;
    /// Load from the default location
    fn try_load() -> Result<Self, ConfigError>;
    /// Load from an explicit file. A missing file is created with defaults.
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn save_to(&self, path: &Path) -> Result<(), ConfigError>;
}

impl TimerConfigExt for TimerConfig {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        confy::load_path(path).map_err(|source| ConfigError::LoadPath {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self).map_err(|source| ConfigError::SavePath {
            path: path.to_path_buf(),
            source,
        })
    }
}
