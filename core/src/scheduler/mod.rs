//! Fixed-interval update loop
//!
//! Each tick reads the remaining time, renders the hint text, and shows it to
//! every eligible client through the backend, falling back to the host's own
//! primitive when the backend declines.
//!
//! ```text
//!   Idle ──enable()──▶ Running ──disable()──▶ Stopped (terminal)
//!     └──────────────disable()──────────────────▲
//! ```

mod error;
mod tags;
mod tick;


pub use error::SchedulerError;
pub use tags::{DisplayTag, DisplayTagCache};
pub use tick::TickReport;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use respawn_types::TimerConfig;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::display::{FallbackDisplay, OverlayRenderer};
use crate::roster::{ClientRoster, PlayerId};
use crate::time_source::RemainingSecondsSource;
use tick::Ticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped,
}

/// Tick parameters taken from [`TimerConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerSettings {
    pub interval: Duration,
    pub duration_secs: f32,
    pub template: String,
    pub channel_id: String,
    pub spectators_only: bool,
}

impl From<&TimerConfig> for SchedulerSettings {
    fn from(config: &TimerConfig) -> Self {
        Self {
            interval: config.effective_interval(),
            duration_secs: config.effective_duration_secs(),
            template: config.format.clone(),
            channel_id: config.channel_id.clone(),
            spectators_only: config.spectators_only,
        }
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self::from(&TimerConfig::default())
    }
}

/// Owns the tick lifecycle and the per-player tag cache.
pub struct Scheduler {
    ticker: Arc<Ticker>,
    state: SchedulerState,
    running: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(
        settings: SchedulerSettings,
        source: Arc<dyn RemainingSecondsSource>,
        renderer: Arc<dyn OverlayRenderer>,
        fallback: Arc<dyn FallbackDisplay>,
        roster: Arc<dyn ClientRoster>,
    ) -> Self {
        Self {
            ticker: Arc::new(Ticker::new(settings, source, renderer, fallback, roster)),
            state: SchedulerState::Idle,
            running: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.ticker.settings
    }

    /// Start the interval timer on the current tokio runtime.
    pub fn enable(&mut self) -> Result<(), SchedulerError> {
        if self.state != SchedulerState::Idle {
            return Err(SchedulerError::InvalidTransition {
                from: self.state,
                to: SchedulerState::Running,
            });
        }
        let handle = tokio::runtime::Handle::try_current().map_err(SchedulerError::NoRuntime)?;

        self.running.store(true, Ordering::SeqCst);
        let ticker = Arc::clone(&self.ticker);
        let running = Arc::clone(&self.running);
        let period = self.ticker.settings.interval;
        self.task = Some(handle.spawn(run_loop(ticker, running, period)));
        self.state = SchedulerState::Running;

        tracing::info!(interval = ?period, "Respawn timer started");
        Ok(())
    }

    /// Stop the timer, clear any hints still on screen, and forget all tags.
    ///
    /// A tick already in progress is allowed to finish before this returns;
    /// no tick starts afterwards. Waiting for that tick blocks the calling
    /// thread, including a runtime worker when called from async code.
    pub fn disable(&mut self) -> Result<(), SchedulerError> {
        if self.state == SchedulerState::Stopped {
            return Err(SchedulerError::InvalidTransition {
                from: self.state,
                to: SchedulerState::Stopped,
            });
        }

        self.running.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.ticker.stop();
        self.state = SchedulerState::Stopped;

        let channel_id = &self.ticker.settings.channel_id;
        let renderer = &self.ticker.renderer;
        if panic::catch_unwind(AssertUnwindSafe(|| renderer.try_hide_all(channel_id))).is_err() {
            tracing::warn!("Hint backend panicked while clearing hints");
        }
        self.ticker.tags.clear();

        tracing::info!("Respawn timer stopped");
        Ok(())
    }

    /// Run one tick on the caller's thread, for hosts that drive their own timer.
    ///
    /// `None` once the scheduler is stopped, or if the tick was abandoned.
    pub fn run_tick(&self) -> Option<TickReport> {
        guarded_tick(&self.ticker)
    }

    /// Forget a disconnecting player's tag
    pub fn on_client_left(&self, id: PlayerId) {
        if self.ticker.tags.evict(id) {
            tracing::debug!(player = %id, "Evicted display tag");
        }
    }

    pub fn tags(&self) -> &DisplayTagCache {
        &self.ticker.tags
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_loop(ticker: Arc<Ticker>, running: Arc<AtomicBool>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    // A slow tick delays the next one rather than causing a burst
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if !running.load(Ordering::SeqCst) {
            break;
        }

        guarded_tick(&ticker);
    }
}

/// Run a tick, abandoning it (not the loop) if anything tick-wide panics
fn guarded_tick(ticker: &Ticker) -> Option<TickReport> {
    match panic::catch_unwind(AssertUnwindSafe(|| ticker.run_tick())) {
        Ok(None) => None,
        Ok(Some(report)) => {
            tracing::debug!(
                remaining = report.remaining.seconds(),
                eligible = report.eligible,
                via_backend = report.via_backend,
                via_fallback = report.via_fallback,
                failed = report.failed,
                evicted = report.evicted,
                "Respawn timer tick"
            );
            Some(report)
        }
        Err(_) => {
            tracing::warn!("Respawn timer tick abandoned after a panic");
            None
        }
    }
}
