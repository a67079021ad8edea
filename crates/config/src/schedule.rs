#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Schedule {
    /// Seconds between two evaluations of the prayer schedule (clamped to
    /// 1..=60).
    #[serde_as(as = "serde_with::DurationSeconds")]
    pub tick: Duration,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
        }
    }
}

impl Schedule {
    pub fn clamp(self) -> Self {
        Self {
            tick: self.tick.clamp(Duration::from_secs(1), Duration::from_secs(60)),
        }
    }
}
