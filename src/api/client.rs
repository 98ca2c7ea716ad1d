//! Klaviyo REST API client.

use std::sync::Arc;

use serde_json::Value;

use super::models::{parse_flow_actions, parse_flows, FlowAction, FlowSummary};
use crate::config::{CONNECTION_CHECK_ENDPOINT, FLOWS_ENDPOINT, PAGE_SIZE_PARAM};
use crate::error_handling::ApiError;

/// Authenticated client for the endpoints used by the application.
///
/// Cheap to clone: the underlying `reqwest::Client` is shared.
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<reqwest::Client>,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl ApiClient {
    pub fn new(http: Arc<reqwest::Client>, base_url: String, api_key: String, page_size: u32) -> Self {
        ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            page_size,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn page_params(&self) -> Vec<(&'static str, String)> {
        vec![(PAGE_SIZE_PARAM, self.page_size.to_string())]
    }

    /// Sends an authenticated GET to `{base_url}/{endpoint}` and parses the JSON body.
    ///
    /// # Errors
    ///
    /// - `ApiError::Request` if the request could not be sent
    /// - `ApiError::Status` for any non-2xx response
    /// - `ApiError::Decode` if the body is not JSON
    pub async fn request(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        log::debug!("GET {} {:?}", url, params);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} returned {}", endpoint, status);
            return Err(ApiError::Status {
                status,
                endpoint: endpoint.to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| ApiError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })
    }

    /// Verifies the API key with a one-item flow listing.
    ///
    /// Returns `Ok(false)` when the API answers 2xx without a `data` member.
    pub async fn check_connection(&self) -> Result<bool, ApiError> {
        let response = self
            .request(CONNECTION_CHECK_ENDPOINT, &[(PAGE_SIZE_PARAM, "1".to_string())])
            .await?;
        Ok(response.get("data").is_some())
    }

    pub async fn get_flows(&self) -> Result<Value, ApiError> {
        self.request(FLOWS_ENDPOINT, &self.page_params()).await
    }

    pub async fn get_flow_actions(&self, flow_id: &str) -> Result<Value, ApiError> {
        self.request(&format!("{FLOWS_ENDPOINT}/{flow_id}/actions"), &self.page_params())
            .await
    }

    /// Rendered content of one email action.
    pub async fn get_email_content(&self, action_id: &str) -> Result<Value, ApiError> {
        self.request(&format!("v1/content_actions/{action_id}/render"), &[])
            .await
    }

    pub async fn get_flow_metrics(&self, flow_id: &str) -> Result<Value, ApiError> {
        self.request(&format!("{FLOWS_ENDPOINT}/{flow_id}/metrics"), &[])
            .await
    }

    pub async fn get_message_metrics(&self, message_id: &str) -> Result<Value, ApiError> {
        self.request(&format!("v1/metrics/{message_id}"), &[]).await
    }

    /// Flows of the account, typed.
    pub async fn list_flows(&self) -> Result<Vec<FlowSummary>, ApiError> {
        Ok(parse_flows(&self.get_flows().await?))
    }

    /// Actions of one flow, typed.
    pub async fn list_flow_actions(&self, flow_id: &str) -> Result<Vec<FlowAction>, ApiError> {
        Ok(parse_flow_actions(&self.get_flow_actions(flow_id).await?))
    }
}
