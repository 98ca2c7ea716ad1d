//! Klaviyo API access.
//!
//! `ApiClient` issues authenticated GET requests and returns parsed JSON;
//! `models` turns flow and flow-action listings into typed rows.

mod client;
mod models;

pub use client::ApiClient;
pub use models::{parse_flow_actions, parse_flows, FlowAction, FlowSummary};
