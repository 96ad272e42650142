// Domain models: samples in, statistics out.

mod sample;
mod stats;

pub use sample::{COUNT_UNAVAILABLE, CollectionCount, GcSample, MemoryUsage, SampleError};
pub use stats::{GcStats, MemoryReport};
