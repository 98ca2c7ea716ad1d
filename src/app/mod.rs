//! Main application modules.
//!
//! This module runs the CLI subcommands and prints the statistics of bulk
//! operations.

pub mod commands;
pub mod statistics;

// Re-export public API
pub use commands::{render_analysis, run};
pub use statistics::{print_bulk_statistics, print_error_statistics, print_report_summary};
