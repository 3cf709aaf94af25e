use std::time::Duration;

/// Timing and buffering options for the [`LoginController`](super::LoginController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSettings {
    /// Pause before calling the auth service, so the loading indicator is visible.
    pub ux_delay: Duration,
    /// Pause between reporting success and asking the app to navigate away, so the welcome
    /// message can be read.
    pub success_delay: Duration,
    /// Number of events buffered per subscriber. Slow subscribers lose the oldest events.
    pub event_capacity: usize,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            ux_delay: Duration::from_millis(500),
            success_delay: Duration::from_millis(1000),
            event_capacity: 16,
        }
    }
}

impl LoginSettings {
    /// Default settings with both delays removed.
    pub fn without_delays() -> Self {
        Self {
            ux_delay: Duration::ZERO,
            success_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
