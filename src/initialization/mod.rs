//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON)
//! - HTTP client
//! - Authenticated API client built from a `Config`

mod client;
mod logger;

pub use client::init_client;
pub use logger::init_logger_with;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error_handling::InitializationError;

/// Validates the configuration and builds an `ApiClient` from it.
///
/// # Errors
///
/// Returns `InitializationError::ConfigError` for an invalid config and
/// `InitializationError::HttpClientError` if the HTTP client cannot be built.
pub fn init_api_client(config: &Config) -> Result<ApiClient, InitializationError> {
    config.validate().map_err(InitializationError::ConfigError)?;
    let http = init_client(config)?;
    Ok(ApiClient::new(
        http,
        config.base_url.clone(),
        config.api_key.clone(),
        config.page_size,
    ))
}
