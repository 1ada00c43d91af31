//! Fixed delay before a transfer commits.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A non-negative delay, serialized as whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct Delay(Duration);

impl Delay {
    pub const ZERO: Self = Self(Duration::ZERO);

    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    /// True when the transfer should commit synchronously.
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn as_duration(self) -> Duration {
        self.0
    }

    pub fn as_millis(self) -> u64 {
        u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)
    }
}

impl From<u64> for Delay {
    fn from(millis: u64) -> Self {
        Self::from_millis(millis)
    }
}

impl From<Delay> for u64 {
    fn from(delay: Delay) -> Self {
        delay.as_millis()
    }
}
