//! flow_email_extractor library: Klaviyo flow email extraction and analysis
//!
//! This library fetches the rendered HTML of the emails in Klaviyo flows and
//! analyzes it for structure and email-client compatibility.
//!
//! # Example
//!
//! ```no_run
//! use flow_email_extractor::initialization::init_api_client;
//! use flow_email_extractor::{analyze_template, extract_html, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     api_key: "pk_live_123".to_string(),
//!     ..Default::default()
//! };
//! let client = init_api_client(&config)?;
//!
//! let message = client.get_email_content("ACTION_ID").await?;
//! let html = extract_html(&message);
//! let analysis = analyze_template(&html.raw);
//! println!("{} elements, {} issues",
//!          analysis.structure.total_elements,
//!          analysis.compatibility.issue_count());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! API calls require a Tokio runtime. Extraction and analysis are synchronous
//! and need no runtime.

pub mod analysis;
pub mod api;
pub mod app;
pub mod bulk;
pub mod cli;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod extract;
pub mod initialization;
pub mod utils;

// Re-export public API
pub use analysis::{
    analyze_structure, analyze_template, check_compatibility, CompatibilityReport,
    StructureReport, TemplateAnalysis,
};
pub use api::{ApiClient, FlowAction, FlowSummary};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{AnalysisError, ApiError, BulkStats};
pub use extract::{extract_html, template_info, ExtractedHtml, TemplateInfo};
