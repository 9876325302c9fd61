use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::tally::StatusTally;

/// Timestamp layout used in benchmark rows.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const MICROS_PER_CENTISECOND: u128 = 10_000;
const HALF_CENTISECOND_MICROS: u128 = 5_000;

/// Latency in hundredths of a second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct LatencyX100(u64);

impl LatencyX100 {
    /// Rounds half-up to two decimal places.
    #[must_use]
    pub fn from_duration(duration: Duration) -> Self {
        let centis = duration
            .as_micros()
            .saturating_add(HALF_CENTISECOND_MICROS)
            .checked_div(MICROS_PER_CENTISECOND)
            .unwrap_or(0);
        Self(u64::try_from(centis).unwrap_or(u64::MAX))
    }

    #[must_use]
    pub const fn from_centis(centis: u64) -> Self {
        Self(centis)
    }

    #[must_use]
    pub const fn centis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.to_string().parse().unwrap_or_default()
    }
}

impl fmt::Display for LatencyX100 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for LatencyX100 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_secs_f64())
    }
}

/// Aggregate outcome of one probe batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    started_at: DateTime<Utc>,
    elapsed: Duration,
    concurrency: usize,
    tally: StatusTally,
}

impl ProbeResult {
    pub(crate) const fn new(
        started_at: DateTime<Utc>,
        elapsed: Duration,
        concurrency: usize,
        tally: StatusTally,
    ) -> Self {
        Self {
            started_at,
            elapsed,
            concurrency,
            tally,
        }
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn timestamp(&self) -> String {
        self.started_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Wall-clock time of the whole batch, unrounded.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Wall-clock time of the whole batch, rounded to two decimals.
    #[must_use]
    pub fn latency(&self) -> LatencyX100 {
        LatencyX100::from_duration(self.elapsed)
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    #[must_use]
    pub const fn tally(&self) -> &StatusTally {
        &self.tally
    }

    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.tally.all_succeeded()
    }
}
