//! Error types for scheduler lifecycle

use thiserror::Error;

use super::SchedulerState;

/// Errors from enabling or disabling the update loop
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("cannot go from {from:?} to {to:?}")]
    InvalidTransition {
        from: SchedulerState,
        to: SchedulerState,
    },

    #[error("no tokio runtime available to drive the update loop")]
    NoRuntime(#[source] tokio::runtime::TryCurrentError),
}
