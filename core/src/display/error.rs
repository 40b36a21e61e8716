//! Error types for hint display

use thiserror::Error;

use crate::roster::PlayerId;

/// Errors raised by the host's fallback hint primitive
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("client {client} is no longer connected")]
    Disconnected { client: PlayerId },

    #[error("hint rejected for client {client}: {reason}")]
    Rejected { client: PlayerId, reason: String },
}
