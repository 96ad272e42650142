// Garbage-collection statistics for worker health monitoring.

pub mod aggregation;
pub mod config;
pub mod models;
pub mod window;

pub use models::{CollectionCount, GcSample, GcStats, MemoryReport, MemoryUsage};
pub use window::{PoolKind, PoolWindows, SampleWindow};
