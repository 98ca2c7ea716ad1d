//! Bulk operation statistics.
//!
//! Thread-safe counters for emails processed during bulk operations, plus
//! categorized error and warning counts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, WarningType};

/// Thread-safe statistics tracker for bulk operations.
///
/// Counters are atomics so a single instance can be shared across concurrent
/// fetch tasks (by reference or behind an `Arc`). Every `ErrorType` and
/// `WarningType` is initialized to zero on creation.
pub struct BulkStats {
    emails_attempted: AtomicUsize,
    emails_extracted: AtomicUsize,
    errors: HashMap<ErrorType, AtomicUsize>,
    warnings: HashMap<WarningType, AtomicUsize>,
}

impl BulkStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut warnings = HashMap::new();
        for warning in WarningType::iter() {
            warnings.insert(warning, AtomicUsize::new(0));
        }

        BulkStats {
            emails_attempted: AtomicUsize::new(0),
            emails_extracted: AtomicUsize::new(0),
            errors,
            warnings,
        }
    }

    /// Records that a content fetch was started.
    pub fn record_attempt(&self) {
        self.emails_attempted.fetch_add(1, Ordering::Relaxed);
    }

    /// Records that an email yielded non-empty HTML.
    pub fn record_extracted(&self) {
        self.emails_extracted.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in BulkStats initialization.",
                error
            );
        }
    }

    /// Increment a warning counter.
    pub fn increment_warning(&self, warning: WarningType) {
        if let Some(counter) = self.warnings.get(&warning) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment warning counter for {:?} which is not in the map. \
                 This indicates a bug in BulkStats initialization.",
                warning
            );
        }
    }

    pub fn emails_attempted(&self) -> usize {
        self.emails_attempted.load(Ordering::SeqCst)
    }

    pub fn emails_extracted(&self) -> usize {
        self.emails_extracted.load(Ordering::SeqCst)
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for a warning type.
    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings
            .get(&warning)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.warnings.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }
}

impl Default for BulkStats {
    fn default() -> Self {
        Self::new()
    }
}
