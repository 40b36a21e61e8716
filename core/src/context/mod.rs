mod config;
mod error;

pub use config::{APP_NAME, CONFIG_NAME, TimerConfigExt};
pub use error::ConfigError;
pub use respawn_types::{BackendConfig, TimeSourceConfig, TimerConfig};
