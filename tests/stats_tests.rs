// GcStats derivation tests: count, rate, weighted usage, capacity, usage percent

mod common;

use common::{observed, polled};
use gcstats::aggregation::{
    compute_average_used, compute_count, compute_max_capacity, compute_rate, usage_percent,
};
use gcstats::models::{GcSample, GcStats, MemoryUsage};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn empty_samples_yield_defined_values() {
    let stats = GcStats::from_samples(&[]);
    assert_eq!(stats.effective_count(), 0);
    assert!(stats.rate().is_nan());
    assert!(!stats.has_rate());
    assert_eq!(stats.max_capacity(), 0);
    assert_eq!(stats.average_used(), 0);
    assert_eq!(stats.usage_percent(), 0);
}

#[test]
fn single_polled_sample() {
    let samples = vec![GcSample::polled(0, MemoryUsage::new(100, 1000))];
    let stats = GcStats::from_samples(&samples);
    assert_eq!(stats.effective_count(), 1);
    assert!(stats.rate().is_nan());
    assert_eq!(stats.max_capacity(), 0);
    assert_eq!(stats.average_used(), 100);
    assert_eq!(stats.usage_percent(), 0);
}

#[test]
fn two_observed_samples() {
    let samples = vec![observed(0, 5, 200), observed(1000, 8, 500)];
    let stats = GcStats::from_samples(&samples);
    assert_eq!(stats.effective_count(), 8);
    assert_close(stats.rate(), 7.0);
    assert!(stats.has_rate());
    assert_eq!(stats.average_used(), 312);
    assert_eq!(stats.max_capacity(), 1000);
    assert_eq!(stats.usage_percent(), 31);
}

#[test]
fn snapshot_matches_individual_derivations() {
    let samples = vec![
        observed(0, 2, 100),
        observed(250, 2, 900),
        polled(400, 300),
        observed(900, 6, 400),
        observed(1400, 0, 800),
    ];
    let stats = GcStats::from_samples(&samples);
    assert_eq!(stats.effective_count(), compute_count(&samples));
    assert_eq!(stats.average_used(), compute_average_used(&samples));
    assert_eq!(stats.max_capacity(), compute_max_capacity(&samples));
    assert_close(stats.rate(), compute_rate(&samples));
    assert_eq!(
        stats.usage_percent(),
        usage_percent(stats.average_used(), stats.max_capacity())
    );
}

#[test]
fn duplicate_count_is_excluded_from_rate_and_usage() {
    let samples = vec![
        observed(0, 5, 200),
        observed(500, 5, 900_000),
        observed(1000, 8, 500),
    ];
    let stats = GcStats::from_samples(&samples);
    assert_eq!(stats.average_used(), 312);
    assert_close(stats.rate(), 7.0);
}

#[test]
fn duplicate_at_end_does_not_move_the_window_end() {
    let samples = vec![
        observed(0, 5, 200),
        observed(1000, 8, 500),
        observed(3000, 8, 900_000),
    ];
    let stats = GcStats::from_samples(&samples);
    assert_close(stats.rate(), 7.0);
    assert_eq!(stats.average_used(), 312);
    assert_eq!(stats.effective_count(), 8);
}

#[test]
fn zero_count_is_excluded_like_a_duplicate() {
    let samples = vec![
        observed(0, 0, 900_000),
        observed(0, 5, 200),
        observed(1000, 8, 500),
    ];
    let stats = GcStats::from_samples(&samples);
    assert_eq!(stats.average_used(), 312);
    assert_close(stats.rate(), 7.0);
}

#[test]
fn polled_samples_weigh_one_each() {
    let samples = vec![polled(0, 100), polled(1000, 200), polled(2000, 300)];
    let stats = GcStats::from_samples(&samples);
    assert_eq!(stats.effective_count(), 3);
    assert_eq!(stats.average_used(), 200);
    // (3 samples - 1) over 2 seconds
    assert_close(stats.rate(), 1.0);
    assert_eq!(stats.max_capacity(), 1000);
    assert_eq!(stats.usage_percent(), 20);
}

#[test]
fn observed_after_polled_uses_whole_counter_as_weight() {
    let samples = vec![polled(0, 100), observed(1000, 4, 200)];
    let stats = GcStats::from_samples(&samples);
    // (100 + 200 * 4) / 4
    assert_eq!(stats.average_used(), 225);
    assert_close(stats.rate(), 3.0);
    assert_eq!(stats.effective_count(), 4);
}

#[test]
fn constant_usage_averages_to_itself() {
    let usage = 4096;
    let samples: Vec<GcSample> = (1..=10)
        .map(|i| observed(i * 100, i * 3, usage))
        .collect();
    let stats = GcStats::from_samples(&samples);
    assert_eq!(stats.average_used(), usage);
}

#[test]
fn rate_with_zero_elapsed_time_is_infinite() {
    let samples = vec![observed(500, 1, 10), observed(500, 4, 10)];
    let stats = GcStats::from_samples(&samples);
    assert!(stats.rate().is_infinite());
    assert!(!stats.has_rate());
    assert_eq!(stats.average_used(), 10);
}

#[test]
fn rate_divides_before_scaling_to_seconds() {
    let samples = vec![observed(0, 1, 0), observed(9, 2, 0)];
    let expected = 1.0_f64 / 9.0 * 1000.0;
    assert_eq!(compute_rate(&samples).to_bits(), expected.to_bits());
    assert_eq!(
        GcStats::from_samples(&samples).rate().to_bits(),
        expected.to_bits()
    );
}

#[test]
fn all_zero_counts_keep_nothing() {
    let samples = vec![observed(0, 0, 100), observed(1000, 0, 300)];
    let stats = GcStats::from_samples(&samples);
    // No kept samples: zero elapsed time over (2 samples - 1) collections
    assert!(stats.rate().is_infinite() && stats.rate().is_sign_positive());
    assert_eq!(stats.average_used(), 0);
    assert_eq!(stats.effective_count(), 0);
    assert_eq!(stats.usage_percent(), 0);
}

#[test]
fn single_kept_sample_among_several_has_zero_elapsed_time() {
    let samples = vec![observed(100, 3, 50), observed(900, 0, 70)];
    let stats = GcStats::from_samples(&samples);
    assert!(stats.rate().is_infinite() && stats.rate().is_sign_positive());
    assert!(!stats.has_rate());
    assert_eq!(stats.average_used(), 50);
}

#[test]
fn polled_sample_resets_the_counter_baseline() {
    let samples = vec![observed(0, 5, 100), polled(500, 200), observed(1000, 5, 300)];
    let stats = GcStats::from_samples(&samples);
    // 100*5 + 200*1 + 300*5 (third sample weighs its whole counter), over 5
    assert_eq!(stats.average_used(), 440);
    assert_close(stats.rate(), 4.0);
    assert_eq!(stats.effective_count(), 5);
}

#[test]
fn rate_with_zero_elapsed_time_and_no_new_collection_is_nan() {
    let samples = vec![observed(500, 1, 10), observed(500, 1, 10)];
    assert!(compute_rate(&samples).is_nan());
}

#[test]
fn max_capacity_comes_from_first_sample() {
    let samples = vec![
        GcSample::observed(0, 1, MemoryUsage::new(10, 2048)),
        GcSample::observed(10, 2, MemoryUsage::new(10, 4096)),
    ];
    assert_eq!(compute_max_capacity(&samples), 2048);
    assert_eq!(compute_max_capacity(&samples[..1]), 0);
}

#[test]
fn usage_percent_is_bounded_when_usage_fits_capacity() {
    for capacity in [1_u64, 3, 7, 1000, 1 << 40] {
        for used in [0, capacity / 3, capacity / 2, capacity] {
            let pct = usage_percent(used, capacity);
            assert!(pct <= 100, "{used}/{capacity} gave {pct}");
        }
    }
    assert_eq!(usage_percent(500, 0), 0);
}

#[test]
fn stats_default_is_the_empty_snapshot() {
    let stats = GcStats::default();
    assert_eq!(stats.effective_count(), 0);
    assert!(stats.rate().is_nan());
}
