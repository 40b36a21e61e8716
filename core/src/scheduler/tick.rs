use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::SchedulerSettings;
use super::tags::{DisplayTag, DisplayTagCache};
use crate::display::{DisplayError, FallbackDisplay, OverlayRenderer};
use crate::format::render_template;
use crate::roster::{Client, ClientRoster, PlayerId};
use crate::time_source::{RemainingSecondsSource, RemainingTime};

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickReport {
    pub remaining: RemainingTime,
    pub text: String,
    /// Targets that passed the eligibility filter
    pub eligible: usize,
    /// Shown through the discovered backend
    pub via_backend: usize,
    /// Shown through the host's fallback primitive
    pub via_fallback: usize,
    /// Targets whose display failed (error or panic)
    pub failed: usize,
    /// Tags dropped for players no longer connected or eligible
    pub evicted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Backend,
    Fallback,
}

/// Everything a tick needs, shared between the scheduler and its timer task.
pub(crate) struct Ticker {
    pub(crate) settings: SchedulerSettings,
    pub(crate) source: Arc<dyn RemainingSecondsSource>,
    pub(crate) renderer: Arc<dyn OverlayRenderer>,
    pub(crate) fallback: Arc<dyn FallbackDisplay>,
    pub(crate) roster: Arc<dyn ClientRoster>,
    pub(crate) tags: DisplayTagCache,
    /// Held for a whole tick so ticks never interleave
    tick_lock: Mutex<()>,
    stopped: AtomicBool,
}

impl Ticker {
    pub(crate) fn new(
        settings: SchedulerSettings,
        source: Arc<dyn RemainingSecondsSource>,
        renderer: Arc<dyn OverlayRenderer>,
        fallback: Arc<dyn FallbackDisplay>,
        roster: Arc<dyn ClientRoster>,
    ) -> Self {
        Self {
            settings,
            source,
            renderer,
            fallback,
            roster,
            tags: DisplayTagCache::new(),
            tick_lock: Mutex::new(()),
            stopped: AtomicBool::new(false),
        }
    }

    fn serialize(&self) -> MutexGuard<'_, ()> {
        self.tick_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Refuse all future ticks. Waits for a tick in progress to finish first.
    pub(crate) fn stop(&self) {
        let _serial = self.serialize();
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn is_eligible(&self, client: &Client) -> bool {
        !self.settings.spectators_only || client.is_spectator()
    }

    /// Run one update, or `None` once stopped. Per-target failures are counted, not propagated.
    pub(crate) fn run_tick(&self) -> Option<TickReport> {
        let _serial = self.serialize();
        if self.stopped.load(Ordering::SeqCst) {
            return None;
        }

        let remaining = self.source.remaining_seconds();
        let text = render_template(&self.settings.template, remaining);

        let targets: Vec<Client> = self
            .roster
            .snapshot()
            .into_iter()
            .filter(|c| self.is_eligible(c))
            .collect();
        let ids: Vec<PlayerId> = targets.iter().map(|c| c.id).collect();
        let evicted = self.tags.retain_only(&ids);

        let mut report = TickReport {
            remaining,
            eligible: targets.len(),
            evicted,
            ..TickReport::default()
        };

        for target in &targets {
            let tag = self.tags.touch(target.id, &self.settings.channel_id);
            match panic::catch_unwind(AssertUnwindSafe(|| self.show(target, &tag, &text))) {
                Ok(Ok(Route::Backend)) => report.via_backend += 1,
                Ok(Ok(Route::Fallback)) => report.via_fallback += 1,
                Ok(Err(e)) => {
                    report.failed += 1;
                    tracing::warn!(player = %target.id, error = %e, "Failed to show respawn timer");
                }
                Err(_) => {
                    report.failed += 1;
                    tracing::warn!(player = %target.id, "Display panicked while showing respawn timer");
                }
            }
        }

        report.text = text;
        Some(report)
    }

    fn show(&self, target: &Client, tag: &DisplayTag, text: &str) -> Result<Route, DisplayError> {
        let duration = self.settings.duration_secs;
        if self
            .renderer
            .try_show(target, &tag.channel_id, text, duration)
        {
            return Ok(Route::Backend);
        }
        self.fallback.show(target, text, duration)?;
        Ok(Route::Fallback)
    }
}
