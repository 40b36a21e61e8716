//! Error types for host runtime access

use thiserror::Error;

/// Errors raised by host-provided members and methods
#[derive(Debug, Clone, Error)]
pub enum HostError {
    #[error("failed to read member '{member}': {reason}")]
    MemberAccess { member: String, reason: String },

    #[error("invocation of '{method}' failed: {reason}")]
    Invocation { method: String, reason: String },

    #[error("failed to load types from module '{module}': {reason}")]
    TypeLoad { module: String, reason: String },
}
