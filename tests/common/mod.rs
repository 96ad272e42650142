// Shared test helpers

use gcstats::models::{GcSample, MemoryUsage};

pub const CAPACITY: u64 = 1000;

/// Notification sample with a collector counter.
pub fn observed(timestamp: u64, count: u64, used: u64) -> GcSample {
    GcSample::observed(timestamp, count, MemoryUsage::new(used, CAPACITY))
}

/// Polling sample with no counter.
#[allow(dead_code)]
pub fn polled(timestamp: u64, used: u64) -> GcSample {
    GcSample::polled(timestamp, MemoryUsage::new(used, CAPACITY))
}
