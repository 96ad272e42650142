// Bounded sliding windows of recent samples, one per memory pool.
// Statistics are always computed over a frozen copy of the window contents.

use std::collections::VecDeque;

use crate::config::StatsConfig;
use crate::models::{GcSample, GcStats, MemoryReport};
use tracing::trace;

/// Samples kept per pool when not configured.
pub const DEFAULT_WINDOW_CAPACITY: usize = 20;

/// Which pool a sample was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    /// Tenured/old-generation heap, usually fed by collection notifications.
    Heap,
    /// Metaspace and friends, usually fed by polling without a counter.
    NonHeap,
}

impl PoolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PoolKind::Heap => "heap",
            PoolKind::NonHeap => "non_heap",
        }
    }
}

/// FIFO of the most recent samples; the oldest is evicted once `capacity` is reached.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<GcSample>,
    capacity: usize,
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

impl SampleWindow {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a sample, evicting the oldest when full. Returns the evicted sample.
    pub fn push(&mut self, sample: GcSample) -> Option<GcSample> {
        let evicted = if self.samples.len() >= self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        if let Some(old) = &evicted {
            trace!(
                capacity = self.capacity,
                evicted_timestamp = old.timestamp,
                "sample window full; evicted oldest"
            );
        }
        self.samples.push_back(sample);
        evicted
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    /// Samples oldest-first.
    pub fn samples(&self) -> impl Iterator<Item = &GcSample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&GcSample> {
        self.samples.back()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Copies the current contents into a freshly allocated `Vec` and aggregates the copy.
    pub fn stats(&self) -> GcStats {
        let frozen: Vec<GcSample> = self.samples.iter().copied().collect();
        GcStats::from_samples(&frozen)
    }
}

impl From<&SampleWindow> for GcStats {
    fn from(window: &SampleWindow) -> Self {
        window.stats()
    }
}

/// One window per pool.
#[derive(Debug, Clone, Default)]
pub struct PoolWindows {
    heap: SampleWindow,
    non_heap: SampleWindow,
}

impl PoolWindows {
    pub fn new(heap_capacity: usize, non_heap_capacity: usize) -> Self {
        Self {
            heap: SampleWindow::new(heap_capacity),
            non_heap: SampleWindow::new(non_heap_capacity),
        }
    }

    pub fn from_config(config: &StatsConfig) -> Self {
        Self::new(config.window.heap_capacity, config.window.non_heap_capacity)
    }

    pub fn record(&mut self, pool: PoolKind, sample: GcSample) {
        if self.window_mut(pool).push(sample).is_some() {
            trace!(pool = pool.as_str(), "pool window rolled");
        }
    }

    pub fn window(&self, pool: PoolKind) -> &SampleWindow {
        match pool {
            PoolKind::Heap => &self.heap,
            PoolKind::NonHeap => &self.non_heap,
        }
    }

    fn window_mut(&mut self, pool: PoolKind) -> &mut SampleWindow {
        match pool {
            PoolKind::Heap => &mut self.heap,
            PoolKind::NonHeap => &mut self.non_heap,
        }
    }

    pub fn stats(&self, pool: PoolKind) -> GcStats {
        self.window(pool).stats()
    }

    pub fn report(&self) -> MemoryReport {
        MemoryReport {
            heap: self.heap.stats(),
            non_heap: self.non_heap.stats(),
        }
    }
}
