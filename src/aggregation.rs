// Pure aggregation over a window of GC samples: count, rate, weighted usage, capacity.
// No I/O and no failure modes; every degenerate input has a defined result (0 or NaN).

use crate::models::{CollectionCount, GcSample, GcStats};
use tracing::{debug, instrument};

const MS_PER_SECOND: f64 = 1000.0;

/// Fold state shared by the rate and usage derivations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Walk {
    last_kept: CollectionCount,
    first_ts: Option<u64>,
    last_ts: Option<u64>,
    kept: usize,
    weighted_used: u128,
}

/// True when a sample carries no new collection: it repeats the last kept counter or
/// reports zero. Samples without a counter are never redundant.
pub fn is_redundant(count: CollectionCount, last_kept: CollectionCount) -> bool {
    match count {
        CollectionCount::Known(0) => true,
        CollectionCount::Known(_) => count == last_kept,
        CollectionCount::Unavailable => false,
    }
}

/// Number of collections a sample stands for: the counter delta since the last kept sample,
/// the whole counter for the first counted sample, and 1 for a polled sample.
fn collection_weight(count: CollectionCount, last_kept: CollectionCount) -> u64 {
    match (count, last_kept) {
        (CollectionCount::Known(n), CollectionCount::Known(prev)) => n.saturating_sub(prev),
        (CollectionCount::Known(n), CollectionCount::Unavailable) => n,
        (CollectionCount::Unavailable, _) => 1,
    }
}

fn walk(samples: &[GcSample]) -> Walk {
    samples.iter().fold(Walk::default(), |mut acc, sample| {
        let count = sample.collection_count;
        if is_redundant(count, acc.last_kept) {
            return acc;
        }

        let weight = collection_weight(count, acc.last_kept);
        acc.weighted_used = acc
            .weighted_used
            .saturating_add(u128::from(sample.usage.used) * u128::from(weight));

        if acc.first_ts.is_none() {
            acc.first_ts = Some(sample.timestamp);
        } else {
            acc.last_ts = Some(sample.timestamp);
        }
        acc.last_kept = count;
        acc.kept += 1;
        acc
    })
}

/// Best-known total: the last kept counter, or one collection per sample when the
/// walk ended on a polled sample.
fn total_collections(last_kept: CollectionCount, sample_count: usize) -> u64 {
    last_kept.known().unwrap_or(sample_count as u64)
}

fn rate_from_walk(walk: &Walk, sample_count: usize) -> f64 {
    let first = walk.first_ts.unwrap_or(0);
    let last = walk.last_ts.unwrap_or(first);
    let elapsed_ms = last.saturating_sub(first) as f64;
    // The first kept sample is the baseline, not an elapsed collection.
    let collections = total_collections(walk.last_kept, sample_count).saturating_sub(1) as f64;
    collections / elapsed_ms * MS_PER_SECOND
}

fn average_from_walk(walk: &Walk, sample_count: usize) -> u64 {
    let divisor = total_collections(walk.last_kept, sample_count);
    if divisor == 0 {
        return 0;
    }
    u64::try_from(walk.weighted_used / u128::from(divisor)).unwrap_or(u64::MAX)
}

/// Counter of the last sample, or the number of samples when that sample was polled.
pub fn compute_count(samples: &[GcSample]) -> u64 {
    match samples.last() {
        Some(last) => total_collections(last.collection_count, samples.len()),
        None => 0,
    }
}

/// Collections per second across the kept samples. NaN with fewer than two samples.
/// Zero elapsed time yields infinity (or NaN when no collection elapsed).
pub fn compute_rate(samples: &[GcSample]) -> f64 {
    if samples.len() < 2 {
        return f64::NAN;
    }
    rate_from_walk(&walk(samples), samples.len())
}

/// Occupied bytes averaged per collection rather than per sample. Truncating division.
pub fn compute_average_used(samples: &[GcSample]) -> u64 {
    if samples.is_empty() {
        return 0;
    }
    average_from_walk(&walk(samples), samples.len())
}

/// Pool capacity is fixed, so the first sample's max is taken. 0 with fewer than two samples.
pub fn compute_max_capacity(samples: &[GcSample]) -> u64 {
    if samples.len() < 2 {
        return 0;
    }
    samples.first().map_or(0, |s| s.usage.max)
}

/// Rounded whole percent of `used` over `capacity`; 0 when capacity is 0.
pub fn usage_percent(used: u64, capacity: u64) -> u32 {
    if capacity == 0 {
        return 0;
    }
    let capacity = u128::from(capacity);
    let pct = (u128::from(used) * 100 + capacity / 2) / capacity;
    u32::try_from(pct).unwrap_or(u32::MAX)
}

/// Runs all derivations over one walk of the samples.
#[instrument(level = "trace", skip_all, fields(samples = samples.len()))]
pub fn compute_stats(samples: &[GcSample]) -> GcStats {
    let sample_count = samples.len();
    let walk = walk(samples);

    let rate = if sample_count < 2 {
        f64::NAN
    } else {
        rate_from_walk(&walk, sample_count)
    };
    if sample_count >= 2 && !rate.is_finite() {
        debug!(
            operation = "compute_stats",
            samples = sample_count,
            kept = walk.kept,
            rate,
            "collection rate undefined: kept samples span no elapsed time"
        );
    }

    let average_used = if sample_count == 0 {
        0
    } else {
        average_from_walk(&walk, sample_count)
    };
    let max_capacity = compute_max_capacity(samples);

    GcStats {
        rate,
        average_used,
        max_capacity,
        effective_count: compute_count(samples),
        usage_percent: usage_percent(average_used, max_capacity),
    }
}
