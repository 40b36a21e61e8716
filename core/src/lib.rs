pub mod context;
pub mod display;
pub mod format;
pub mod host;
pub mod plugin;
pub mod roster;
pub mod scheduler;
pub mod time_source;


// Re-exports for convenience
pub use context::{ConfigError, TimerConfigExt};
pub use display::{DiscoveredRenderer, DisplayError, FallbackDisplay, NullRenderer, OverlayRenderer};
pub use format::{format_mm_ss, render_template};
pub use host::{HostError, HostRuntime, Value};
pub use plugin::RespawnTimerPlugin;
pub use roster::{Client, ClientRole, ClientRoster, InMemoryRoster, PlayerId, SessionHandle};
pub use scheduler::{Scheduler, SchedulerError, SchedulerSettings, SchedulerState, TickReport};
pub use time_source::{ProbingTimeSource, RemainingSecondsSource, RemainingTime};
