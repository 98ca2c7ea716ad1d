//! Command-line interface definition.
//!
//! The CLI is a thin layer over the library: options map onto a `Config`
//! and each subcommand onto one operation in `app::commands`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    Config, LogFormat, LogLevel, API_BASE_URL_ENV, API_KEY_ENV, DEFAULT_API_BASE_URL,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # List the flows of the account (key read from KLAVIYO_API_KEY or .env)
/// flow_email_extractor flows
///
/// # Analyze a template saved on disk, as JSON
/// flow_email_extractor analyze --file welcome.html --json
///
/// # Archive every email of one flow
/// flow_email_extractor export-flow XyZ123 --output welcome.tar.gz
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "flow_email_extractor",
    version,
    about = "Extracts and analyzes the HTML templates of Klaviyo flow emails."
)]
pub struct Cli {
    /// Klaviyo private API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, env = API_BASE_URL_ENV, default_value = DEFAULT_API_BASE_URL, global = true)]
    pub base_url: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// Maximum concurrent email fetches in bulk operations
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY, global = true)]
    pub max_concurrency: usize,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the template to analyze comes from.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct AnalyzeSource {
    /// Email action id to fetch from the API
    #[arg(long)]
    pub action: Option<String>,

    /// Local HTML file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify the API key
    Check,

    /// List the flows of the account
    Flows,

    /// Show the actions and metrics of one flow
    Flow {
        /// Flow id
        id: String,
    },

    /// Print or save the HTML of one email
    Extract {
        /// Email action id
        action_id: String,

        /// Write the HTML to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Use the pretty-printed HTML
        #[arg(long)]
        pretty: bool,
    },

    /// Run structure and compatibility analysis on one template
    Analyze {
        #[command(flatten)]
        source: AnalyzeSource,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Archive the templates of one flow
    ExportFlow {
        /// Flow id
        flow_id: String,

        /// Archive path (default: `{flow name}_templates.tar.gz`)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Archive the templates of every flow
    ExportAll {
        /// Archive path (default: `all_flow_templates.tar.gz`)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Analyze every template of the given flows and write a CSV report
    Report {
        /// Flow ids
        #[arg(required = true)]
        flow_ids: Vec<String>,

        /// Report path (default: `template_analysis_report.csv`)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl Command {
    /// Whether the command talks to the API.
    pub fn needs_api(&self) -> bool {
        !matches!(
            self,
            Command::Analyze {
                source: AnalyzeSource { action: None, .. },
                ..
            }
        )
    }
}

impl Cli {
    /// Library configuration for these options. A missing API key becomes an
    /// empty one, which `Config::validate` rejects.
    pub fn to_config(&self) -> Config {
        Config {
            api_key: self.api_key.clone().unwrap_or_default(),
            base_url: self.base_url.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            timeout_seconds: self.timeout_seconds,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrency: self.max_concurrency,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
