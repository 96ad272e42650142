// Observation samples: one capture of collector counter state plus pool usage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Legacy integer encoding of [`CollectionCount::Unavailable`].
pub const COUNT_UNAVAILABLE: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("collection count must be >= 0 or -1 (unavailable), got {0}")]
    NegativeCount(i64),
}

/// Cumulative collection count reported by the collector at capture time.
/// Serializes as a number, or `null` when the source had no authoritative counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<u64>", into = "Option<u64>")]
pub enum CollectionCount {
    Known(u64),
    /// Time-based polling; no counter was available.
    #[default]
    Unavailable,
}

impl CollectionCount {
    pub fn known(self) -> Option<u64> {
        match self {
            CollectionCount::Known(n) => Some(n),
            CollectionCount::Unavailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, CollectionCount::Known(_))
    }
}

impl From<Option<u64>> for CollectionCount {
    fn from(value: Option<u64>) -> Self {
        value.map_or(CollectionCount::Unavailable, CollectionCount::Known)
    }
}

impl From<CollectionCount> for Option<u64> {
    fn from(value: CollectionCount) -> Self {
        value.known()
    }
}

impl TryFrom<i64> for CollectionCount {
    type Error = SampleError;

    /// Decode the sentinel form used by polling sources (`-1` = unavailable).
    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw == COUNT_UNAVAILABLE {
            return Ok(CollectionCount::Unavailable);
        }
        u64::try_from(raw)
            .map(CollectionCount::Known)
            .map_err(|_| SampleError::NegativeCount(raw))
    }
}

/// Pool usage in bytes. `max` is the pool capacity; 0 means undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    pub used: u64,
    pub max: u64,
}

impl MemoryUsage {
    pub fn new(used: u64, max: u64) -> Self {
        Self { used, max }
    }

    /// Share of capacity in use, rounded to the nearest whole percent.
    pub fn percent_used(&self) -> u32 {
        crate::aggregation::usage_percent(self.used, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcSample {
    /// Capture time in milliseconds since an arbitrary (monotonic) epoch.
    pub timestamp: u64,
    #[serde(default)]
    pub collection_count: CollectionCount,
    pub usage: MemoryUsage,
}

impl GcSample {
    /// Sample from a collection notification, carrying the collector's counter.
    pub fn observed(timestamp: u64, count: u64, usage: MemoryUsage) -> Self {
        Self {
            timestamp,
            collection_count: CollectionCount::Known(count),
            usage,
        }
    }

    /// Sample from time-based polling; no counter available.
    pub fn polled(timestamp: u64, usage: MemoryUsage) -> Self {
        Self {
            timestamp,
            collection_count: CollectionCount::Unavailable,
            usage,
        }
    }
}
