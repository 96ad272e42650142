// Statistics snapshot derived from one window of samples, plus the two-pool report.

use serde::Serialize;

use super::GcSample;

/// Collection statistics for one sample set. Computed once at construction; never mutated.
///
/// Serializes as a camelCase record. An undefined rate (NaN) serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GcStats {
    pub(crate) rate: f64,
    pub(crate) average_used: u64,
    pub(crate) max_capacity: u64,
    pub(crate) effective_count: u64,
    pub(crate) usage_percent: u32,
}

impl GcStats {
    /// Samples must be in non-decreasing timestamp order; this is not checked.
    pub fn from_samples(samples: &[GcSample]) -> Self {
        crate::aggregation::compute_stats(samples)
    }

    /// Collections per second. NaN with fewer than two samples; infinite when every
    /// kept sample shares one timestamp.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// True when the rate is a finite number.
    pub fn has_rate(&self) -> bool {
        self.rate.is_finite()
    }

    /// Occupied bytes weighted per collection.
    pub fn average_used(&self) -> u64 {
        self.average_used
    }

    pub fn max_capacity(&self) -> u64 {
        self.max_capacity
    }

    pub fn effective_count(&self) -> u64 {
        self.effective_count
    }

    pub fn usage_percent(&self) -> u32 {
        self.usage_percent
    }
}

impl Default for GcStats {
    fn default() -> Self {
        Self::from_samples(&[])
    }
}

/// Heap and non-heap statistics taken from the same moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryReport {
    pub heap: GcStats,
    pub non_heap: GcStats,
}
