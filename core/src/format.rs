//! Hint text formatting

use respawn_types::TIME_PLACEHOLDER;

use crate::time_source::RemainingTime;

/// Format as zero-padded `MM:SS`. 3600 seconds renders as `60:00`.
pub fn format_mm_ss(time: RemainingTime) -> String {
    format!("{:02}:{:02}", time.minutes_part(), time.seconds_part())
}

/// Substitute the `MM:SS` time into every `{time}` placeholder of `template`.
/// A template without a placeholder is returned unchanged.
pub fn render_template(template: &str, time: RemainingTime) -> String {
    template.replace(TIME_PLACEHOLDER, &format_mm_ss(time))
}
