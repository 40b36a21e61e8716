//! Hint display seams
//!
//! - **OverlayRenderer**: optional backend, may refuse any call (`try_show` -> false)
//! - **FallbackDisplay**: the host's own hint primitive, always present
//!
//! The scheduler asks the renderer first and falls back when it declines.

mod bridge;
mod error;

#[cfg(test)]
mod bridge_tests;

pub use bridge::{DiscoveredRenderer, Discovery, EntryPoint, bind_hide_args, bind_show_args, discover};
pub use error::DisplayError;

use crate::roster::Client;

/// A display backend that may or may not be able to render.
pub trait OverlayRenderer: Send + Sync {
    /// Show `text` to `target` under `channel_id`. Returns whether the backend
    /// was called successfully, not whether anything became visible.
    fn try_show(&self, target: &Client, channel_id: &str, text: &str, duration_secs: f32) -> bool;

    /// Best-effort clear of everything shown under `channel_id`.
    fn try_hide_all(&self, channel_id: &str);
}

/// Renderer with no backend; every call falls through to the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl OverlayRenderer for NullRenderer {
    fn try_show(&self, _target: &Client, _channel_id: &str, _text: &str, _duration_secs: f32) -> bool {
        false
    }

    fn try_hide_all(&self, _channel_id: &str) {}
}

/// The host's built-in hint primitive.
pub trait FallbackDisplay: Send + Sync {
    fn show(&self, target: &Client, text: &str, duration_secs: f32) -> Result<(), DisplayError>;
}
