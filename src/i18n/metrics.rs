//! Translation metrics and observability.
//!
//! Each manager owns its own counters, so independent managers (and tests)
//! never see each other's numbers.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for loading and applying translations.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of resource fetches attempted
    loads: AtomicUsize,

    /// Number of fetches that failed for any reason
    load_failures: AtomicUsize,

    /// Number of times a failed language fell back to the default
    fallbacks: AtomicUsize,

    /// Number of times the map ended up empty because the default failed too
    degraded: AtomicUsize,

    /// Marker keys found in the active map during apply
    keys_applied: AtomicUsize,

    /// Marker keys absent from the active map during apply
    keys_missing: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_degraded(&self) {
        self.degraded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_key_applied(&self) {
        self.keys_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_key_missing(&self) {
        self.keys_missing.fetch_add(1, Ordering::Relaxed);
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn degraded(&self) -> usize {
        self.degraded.load(Ordering::Relaxed)
    }

    pub fn keys_applied(&self) -> usize {
        self.keys_applied.load(Ordering::Relaxed)
    }

    pub fn keys_missing(&self) -> usize {
        self.keys_missing.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let loads = self.loads();
        let failures = self.load_failures();
        let load_success_rate = if loads > 0 {
            (loads.saturating_sub(failures) as f64 / loads as f64) * 100.0
        } else {
            0.0
        };

        let applied = self.keys_applied();
        let missing = self.keys_missing();
        let total_keys = applied + missing;
        let key_coverage = if total_keys > 0 {
            (applied as f64 / total_keys as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            loads,
            load_failures: failures,
            load_success_rate,
            fallbacks: self.fallbacks(),
            degraded: self.degraded(),
            keys_applied: applied,
            keys_missing: missing,
            key_coverage,
        }
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub loads: usize,
    pub load_failures: usize,

    /// Successful loads as a percentage (0-100)
    pub load_success_rate: f64,

    pub fallbacks: usize,
    pub degraded: usize,
    pub keys_applied: usize,
    pub keys_missing: usize,

    /// Applied keys as a percentage of all marker keys seen (0-100)
    pub key_coverage: f64,
}

impl MetricsReport {
    /// Format the report as a human-readable string.
    pub fn format(&self) -> String {
        format!(
            "Translation Metrics:\n\
             - Loads: {} ({} failed, {:.1}% success)\n\
             - Fallbacks to default: {}\n\
             - Degraded to no translations: {}\n\
             - Marker keys: {} applied, {} missing ({:.1}% coverage)",
            self.loads,
            self.load_failures,
            self.load_success_rate,
            self.fallbacks,
            self.degraded,
            self.keys_applied,
            self.keys_missing,
            self.key_coverage
        )
    }
}
