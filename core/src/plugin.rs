//! Plugin entry points
//!
//! Wires configuration, the time-source resolver, the hint backend and the
//! host's fallback into a scheduler, and exposes the calls the host makes:
//! enable, disable, and client-left.

use std::sync::Arc;

use respawn_types::TimerConfig;

use crate::display::{DiscoveredRenderer, FallbackDisplay, OverlayRenderer};
use crate::host::HostRuntime;
use crate::roster::{ClientRoster, PlayerId};
use crate::scheduler::{Scheduler, SchedulerError, SchedulerSettings};
use crate::time_source::{ProbingTimeSource, RemainingSecondsSource};

pub struct RespawnTimerPlugin {
    config: TimerConfig,
    scheduler: Scheduler,
}

impl RespawnTimerPlugin {
    pub const NAME: &'static str = "RespawnTimers";
    pub const DESCRIPTION: &'static str =
        "Shows spectators a mm:ss timer until the next respawn wave.";
    pub const AUTHOR: &'static str = "respawn-timers contributors";
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    /// Build the plugin against a host runtime, discovering the time source
    /// and hint backend from the modules it has loaded.
    pub fn new(
        config: TimerConfig,
        runtime: Arc<HostRuntime>,
        fallback: Arc<dyn FallbackDisplay>,
        roster: Arc<dyn ClientRoster>,
    ) -> Self {
        let source = Arc::new(ProbingTimeSource::new(
            Arc::clone(&runtime),
            config.time_source.clone(),
        ));
        let renderer = Arc::new(DiscoveredRenderer::new(runtime, config.backend.module.clone()));
        Self::with_parts(config, source, renderer, fallback, roster)
    }

    /// Build the plugin from explicit parts, e.g. a statically registered backend.
    pub fn with_parts(
        config: TimerConfig,
        source: Arc<dyn RemainingSecondsSource>,
        renderer: Arc<dyn OverlayRenderer>,
        fallback: Arc<dyn FallbackDisplay>,
        roster: Arc<dyn ClientRoster>,
    ) -> Self {
        let scheduler = Scheduler::new(
            SchedulerSettings::from(&config),
            source,
            renderer,
            fallback,
            roster,
        );
        Self { config, scheduler }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Host enable hook. Does nothing when the plugin is disabled in config.
    pub fn enable(&mut self) -> Result<(), SchedulerError> {
        if !self.config.enabled {
            tracing::info!(plugin = Self::NAME, "Disabled in configuration, not starting");
            return Ok(());
        }
        tracing::info!(plugin = Self::NAME, version = Self::VERSION, "Enabling");
        self.scheduler.enable()
    }

    /// Host disable hook
    pub fn disable(&mut self) -> Result<(), SchedulerError> {
        tracing::info!(plugin = Self::NAME, "Disabling");
        self.scheduler.disable()
    }

    /// Host client-left notification
    pub fn on_client_left(&self, id: PlayerId) {
        self.scheduler.on_client_left(id);
    }
}
