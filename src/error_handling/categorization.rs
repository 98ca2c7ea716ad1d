//! Error categorization.
//!
//! Maps API client errors onto the `ErrorType` categories counted in
//! `BulkStats`.

use reqwest::StatusCode;

use super::stats::BulkStats;
use super::types::{ApiError, ErrorType};

fn categorize_status(status: StatusCode) -> ErrorType {
    match status.as_u16() {
        401 => ErrorType::HttpRequestUnauthorized,
        403 => ErrorType::HttpRequestForbidden,
        404 => ErrorType::HttpRequestNotFound,
        429 => ErrorType::HttpRequestTooManyRequests,
        _ if status.is_server_error() => ErrorType::HttpRequestServerError,
        _ => ErrorType::HttpRequestStatusError,
    }
}

/// Categorizes an `ApiError` into an `ErrorType`.
///
/// Status codes take precedence; transport errors are then classified by the
/// underlying `reqwest::Error` kind.
pub fn categorize_api_error(error: &ApiError) -> ErrorType {
    match error {
        ApiError::Status { status, .. } => categorize_status(*status),
        ApiError::Decode { .. } => ErrorType::HttpRequestDecodeError,
        ApiError::Request { source, .. } => {
            if let Some(status) = source.status() {
                categorize_status(status)
            } else if source.is_timeout() {
                ErrorType::HttpRequestTimeoutError
            } else if source.is_connect() {
                ErrorType::HttpRequestConnectError
            } else if source.is_decode() {
                ErrorType::HttpRequestDecodeError
            } else {
                ErrorType::HttpRequestOtherError
            }
        }
    }
}

/// Records an API error in the statistics.
pub fn update_error_stats(stats: &BulkStats, error: &ApiError) {
    let error_type = categorize_api_error(error);
    log::debug!("Categorized API error as {:?}: {}", error_type, error);
    stats.increment_error(error_type);
}
