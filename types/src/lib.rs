//! Shared configuration types for the respawn timer
//!
//! This crate contains serializable configuration types that are shared between
//! the engine (respawn-core) and the simulation host (respawn-cli).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Largest number of seconds the timer will ever display.
pub const MAX_SECONDS: u32 = 3600;

/// Smallest update interval the scheduler accepts.
pub const MIN_UPDATE_INTERVAL_SECS: f32 = 0.05;

/// Largest update interval the scheduler accepts.
pub const MAX_UPDATE_INTERVAL_SECS: f32 = MAX_SECONDS as f32;

/// Placeholder substituted with the `MM:SS` time in [`TimerConfig::format`].
pub const TIME_PLACEHOLDER: &str = "{time}";

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_update_interval() -> f32 {
    1.0
}
fn default_hint_duration() -> f32 {
    2.0
}
fn default_format() -> String {
    "<align=\"center\"><size=24><b>Respawn in {time}</b></size></align>".to_string()
}
fn default_channel_id() -> String {
    "respawn_timer".to_string()
}
fn default_time_source_module() -> String {
    "Assembly-CSharp".to_string()
}
fn default_time_source_type() -> String {
    "Respawning.RespawnManager".to_string()
}
fn default_singleton_accessor() -> String {
    "Singleton".to_string()
}
fn default_backend_module() -> String {
    "RueI".to_string()
}

/// Member names probed on the time-source singleton, highest priority first.
pub const DEFAULT_CANDIDATE_MEMBERS: [&str; 11] = [
    "TimeTillRespawn",
    "TimeTillNextRespawn",
    "TimeToNextRespawn",
    "TimeToNextWave",
    "SecondsToNextRespawn",
    "SecondsToNextWave",
    "_timeToNextRespawn",
    "_timeTillRespawn",
    "_respawnTime",
    "_nextRespawnTime",
    "NextRespawnTime",
];

fn default_candidates() -> Vec<String> {
    DEFAULT_CANDIDATE_MEMBERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Time Source
// ─────────────────────────────────────────────────────────────────────────────

/// Where the "seconds until next respawn" value is looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSourceConfig {
    /// Module expected to contain the respawn manager type
    #[serde(default = "default_time_source_module")]
    pub module: String,
    /// Fully-qualified name of the respawn manager type
    #[serde(default = "default_time_source_type")]
    pub type_name: String,
    /// Static property or field holding the instance
    #[serde(default = "default_singleton_accessor")]
    pub singleton: String,
    /// Ordered member names; the first one present and numeric wins
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
}

impl Default for TimeSourceConfig {
    fn default() -> Self {
        Self {
            module: default_time_source_module(),
            type_name: default_time_source_type(),
            singleton: default_singleton_accessor(),
            candidates: default_candidates(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display Backend
// ─────────────────────────────────────────────────────────────────────────────

/// Optional hint backend searched at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Module name, matched case-insensitively
    #[serde(default = "default_backend_module")]
    pub module: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            module: default_backend_module(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Timer Config
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level plugin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Only show the timer to spectators
    #[serde(default = "default_true")]
    pub spectators_only: bool,

    #[serde(default = "default_update_interval")]
    pub update_interval_secs: f32,

    /// How long each shown hint stays up (refreshed every tick anyway)
    #[serde(default = "default_hint_duration")]
    pub hint_duration_secs: f32,

    /// Hint text; `{time}` is replaced with `MM:SS`
    #[serde(default = "default_format")]
    pub format: String,

    /// Key addressing the on-screen element so updates replace it
    #[serde(default = "default_channel_id")]
    pub channel_id: String,

    #[serde(default)]
    pub time_source: TimeSourceConfig,

    #[serde(default)]
    pub backend: BackendConfig,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spectators_only: true,
            update_interval_secs: default_update_interval(),
            hint_duration_secs: default_hint_duration(),
            format: default_format(),
            channel_id: default_channel_id(),
            time_source: TimeSourceConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

impl TimerConfig {
    /// Update interval in seconds, clamped to
    /// [`MIN_UPDATE_INTERVAL_SECS`]..=[`MAX_UPDATE_INTERVAL_SECS`].
    /// Non-finite values fall back to the default interval.
    pub fn effective_interval_secs(&self) -> f32 {
        if !self.update_interval_secs.is_finite() {
            return default_update_interval();
        }
        self.update_interval_secs
            .clamp(MIN_UPDATE_INTERVAL_SECS, MAX_UPDATE_INTERVAL_SECS)
    }

    /// [`Self::effective_interval_secs`] as a [`Duration`]
    pub fn effective_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.effective_interval_secs())
            .unwrap_or_else(|_| Duration::from_secs(1))
    }

    /// Hint duration, never negative.
    pub fn effective_duration_secs(&self) -> f32 {
        if self.hint_duration_secs.is_finite() {
            self.hint_duration_secs.max(0.0)
        } else {
            default_hint_duration()
        }
    }
}
