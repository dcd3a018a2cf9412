//! Switcher metrics.
//!
//! Counters for catalog loads and element updates. Each `LanguageSwitcher`
//! owns one instance so tests never share state.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct SwitcherMetrics {
    /// Number of loads started (one per `load_translations` call)
    loads_started: AtomicUsize,

    /// Number of loads whose catalog was applied to the document
    loads_applied: AtomicUsize,

    /// Number of loads that failed to fetch or parse the catalog
    loads_failed: AtomicUsize,

    /// Number of loads discarded because a newer request was issued
    loads_superseded: AtomicUsize,

    /// Number of element texts replaced with a translation
    elements_updated: AtomicUsize,

    /// Number of element lookups that found no translation
    missing_keys: AtomicUsize,
}

impl SwitcherMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_load_started(&self) {
        self.loads_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_applied(&self, updated: usize, missing: usize) {
        self.loads_applied.fetch_add(1, Ordering::Relaxed);
        self.elements_updated.fetch_add(updated, Ordering::Relaxed);
        self.missing_keys.fetch_add(missing, Ordering::Relaxed);
    }

    pub fn record_load_failed(&self) {
        self.loads_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_superseded(&self) {
        self.loads_superseded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn loads_started(&self) -> usize {
        self.loads_started.load(Ordering::Relaxed)
    }

    pub fn loads_applied(&self) -> usize {
        self.loads_applied.load(Ordering::Relaxed)
    }

    pub fn loads_failed(&self) -> usize {
        self.loads_failed.load(Ordering::Relaxed)
    }

    pub fn loads_superseded(&self) -> usize {
        self.loads_superseded.load(Ordering::Relaxed)
    }

    pub fn elements_updated(&self) -> usize {
        self.elements_updated.load(Ordering::Relaxed)
    }

    pub fn missing_keys(&self) -> usize {
        self.missing_keys.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let applied = self.loads_applied();
        let failed = self.loads_failed();
        let finished = applied + failed;
        let load_success_rate = if finished > 0 {
            (applied as f64 / finished as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            loads_started: self.loads_started(),
            loads_applied: applied,
            loads_failed: failed,
            loads_superseded: self.loads_superseded(),
            load_success_rate,
            elements_updated: self.elements_updated(),
            missing_keys: self.missing_keys(),
        }
    }
}

/// Snapshot of the switcher counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub loads_started: usize,
    pub loads_applied: usize,
    pub loads_failed: usize,
    pub loads_superseded: usize,

    /// Applied loads as a percentage (0-100) of loads that finished
    /// (superseded loads are excluded)
    pub load_success_rate: f64,

    pub elements_updated: usize,
    pub missing_keys: usize,
}
