use chrono::{DateTime, Utc};
use std::fmt;

/// Whole seconds left until an instant. Formats as zero-padded `HH:MM:SS`;
/// hours are not wrapped at 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Countdown(u64);

impl Countdown {
    /// Time from `now` to `target`, floored to whole seconds. An instant that
    /// has already passed counts as zero.
    pub fn between(now: DateTime<Utc>, target: DateTime<Utc>) -> Self {
        let seconds = (target - now).num_seconds().max(0);
        Self(seconds as u64)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}
