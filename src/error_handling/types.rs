//! Error type definitions.
//!
//! This module defines the error types returned by the library and the
//! categories used to count failures during bulk operations.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use reqwest::StatusCode;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Configuration rejected before any client was built.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Errors returned by the Klaviyo API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS, ...).
    #[error("Request to '{endpoint}' failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: ReqwestError,
    },

    /// The API answered with a non-2xx status.
    #[error("API returned {status} for '{endpoint}'")]
    Status { status: StatusCode, endpoint: String },

    /// The response body was not valid JSON.
    #[error("Invalid JSON from '{endpoint}': {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: ReqwestError,
    },
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request { source, .. } | ApiError::Decode { source, .. } => source.status(),
        }
    }
}

/// Errors returned by the HTML analysis core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The input is not textual data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Categories of failures counted while running bulk operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestOtherError,
    HttpRequestDecodeError,
    // Specific HTTP status code errors
    HttpRequestUnauthorized,    // 401 Unauthorized
    HttpRequestForbidden,       // 403 Forbidden
    HttpRequestNotFound,        // 404 Not Found
    HttpRequestTooManyRequests, // 429 Too Many Requests
    HttpRequestServerError,     // 5xx
    HttpRequestStatusError,     // any other non-2xx status
}

/// Notable but non-fatal outcomes during bulk operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    MissingHtml,     // Rendered message has no html attribute
    MissingActionId, // Flow action without an id
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpRequestDecodeError => "HTTP response decode error",
            ErrorType::HttpRequestUnauthorized => "Unauthorized (401)",
            ErrorType::HttpRequestForbidden => "Forbidden (403)",
            ErrorType::HttpRequestNotFound => "Not Found (404)",
            ErrorType::HttpRequestTooManyRequests => "Too many requests (429)",
            ErrorType::HttpRequestServerError => "Server error (5xx)",
            ErrorType::HttpRequestStatusError => "HTTP status error",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MissingHtml => "Missing HTML content",
            WarningType::MissingActionId => "Missing action id",
        }
    }
}
