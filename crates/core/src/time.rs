//! Wall-clock stamps for when an attempt starts and is submitted.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Where session timestamps come from.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    /// Frozen at a given instant; only moves through `advance`.
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn default_clock() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(at) = self {
            *at += delta;
        }
    }
}

/// Time spent on an attempt, shown as `1m 05s`.
///
/// Negative spans (clock moved backwards) display as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed(Duration);

impl Elapsed {
    #[must_use]
    pub fn between(started_at: DateTime<Utc>, completed_at: DateTime<Utc>) -> Self {
        Self(completed_at - started_at)
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.0.num_seconds().max(0);
        write!(f, "{}m {:02}s", seconds / 60, seconds % 60)
    }
}

/// 2023-11-14T22:13:20Z, used by deterministic tests.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
