//! Prometheus metrics for transfer outcomes.

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

/// Granules copied into the archive.
pub static GRANULES_COPIED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "moraine_granules_copied_total",
        "Total granules copied into the archive",
    )
    .unwrap()
});

/// Granules skipped by reason.
pub static GRANULES_SKIPPED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("moraine_granules_skipped_total", "Total granules skipped"),
        &["reason"], // "already_archived", "job_running", "job_failed"
    )
    .unwrap()
});

/// Transfer tasks that hit infrastructure failures.
pub static TRANSFER_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "moraine_transfer_failures_total",
        "Total transfer tasks that failed with infrastructure errors",
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(GRANULES_COPIED.clone()),
        Box::new(GRANULES_SKIPPED.clone()),
        Box::new(TRANSFER_FAILURES.clone()),
    ]
}
