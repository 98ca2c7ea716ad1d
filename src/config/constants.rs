//! Configuration constants.
//!
//! This module defines the constants used throughout the application: API
//! endpoints, request limits, default output paths and the fixed
//! recommendation texts produced by the analyzer.

/// Base URL of the Klaviyo REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://a.klaviyo.com/api";

/// Environment variable holding the private API key.
pub const API_KEY_ENV: &str = "KLAVIYO_API_KEY";
/// Environment variable overriding the API base URL.
pub const API_BASE_URL_ENV: &str = "KLAVIYO_API_BASE_URL";

// Endpoints (relative to the base URL)
pub const FLOWS_ENDPOINT: &str = "v1/flows";
/// Endpoint requested by the connection check.
pub const CONNECTION_CHECK_ENDPOINT: &str = "flows";

/// Page size requested when listing flows and flow actions.
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Query parameter carrying the page size.
pub const PAGE_SIZE_PARAM: &str = "page[size]";

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of email contents fetched concurrently during bulk operations.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// User-Agent sent with every API request.
pub const DEFAULT_USER_AGENT: &str = concat!("flow_email_extractor/", env!("CARGO_PKG_VERSION"));

// Defaults applied to missing API fields
pub const UNNAMED_FLOW: &str = "Unnamed Flow";
pub const UNNAMED_EMAIL: &str = "Unnamed Email";
pub const UNKNOWN_FIELD: &str = "Unknown";
pub const NO_SUBJECT: &str = "No subject";
pub const NO_PREVIEW_TEXT: &str = "No preview text";

// Default output file names
pub const ALL_FLOWS_ARCHIVE_NAME: &str = "all_flow_templates.tar.gz";
pub const FLOW_ARCHIVE_SUFFIX: &str = "_templates.tar.gz";
pub const REPORT_FILE_NAME: &str = "template_analysis_report.csv";

// Compatibility recommendations, emitted in this order
pub const RECOMMEND_DOCTYPE: &str = "Add a DOCTYPE declaration at the top of your HTML";
pub const RECOMMEND_NO_FORMS: &str =
    "Remove <form> elements since many email clients don't support forms";
pub const RECOMMEND_NO_VIDEO: &str = "Avoid <video> tags; convert videos to a GIF or static image";
pub const RECOMMEND_NO_JAVASCRIPT: &str =
    "Remove JavaScript; it's not supported in most email clients";

// Template advice
pub const RECOMMEND_MEDIA_QUERIES: &str = "Add media queries for better mobile responsiveness";

/// Maximum HTML preview length in characters used in debug logging.
pub const MAX_HTML_PREVIEW_CHARS: usize = 200;
