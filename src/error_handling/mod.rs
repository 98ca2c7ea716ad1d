//! Error handling and bulk statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, API, analysis)
//! - Categorization of API errors for reporting
//! - Thread-safe counters for bulk operations

mod categorization;
mod stats;
mod types;

pub use categorization::{categorize_api_error, update_error_stats};
pub use stats::BulkStats;
pub use types::{AnalysisError, ApiError, ErrorType, InitializationError, WarningType};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_bulk_stats_initialization() {
        let stats = BulkStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for warning_type in WarningType::iter() {
            assert_eq!(stats.get_warning_count(warning_type), 0);
        }
        assert_eq!(stats.emails_attempted(), 0);
        assert_eq!(stats.emails_extracted(), 0);
    }

    #[test]
    fn test_bulk_stats_increment() {
        let stats = BulkStats::new();
        stats.increment_error(ErrorType::HttpRequestNotFound);
        assert_eq!(stats.get_error_count(ErrorType::HttpRequestNotFound), 1);

        stats.increment_warning(WarningType::MissingHtml);
        stats.increment_warning(WarningType::MissingHtml);
        assert_eq!(stats.get_warning_count(WarningType::MissingHtml), 2);
    }

    #[test]
    fn test_bulk_stats_totals() {
        let stats = BulkStats::new();
        stats.record_attempt();
        stats.record_attempt();
        stats.record_extracted();
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        stats.increment_error(ErrorType::HttpRequestServerError);
        stats.increment_warning(WarningType::MissingActionId);

        assert_eq!(stats.emails_attempted(), 2);
        assert_eq!(stats.emails_extracted(), 1);
        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total_warnings(), 1);
    }

    #[test]
    fn test_bulk_stats_shared_across_threads() {
        let stats = std::sync::Arc::new(BulkStats::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let stats = std::sync::Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        stats.record_attempt();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }
        assert_eq!(stats.emails_attempted(), 100);
    }
}
