//! Export of extracted templates and analysis results.
//!
//! Templates are bundled into `.tar.gz` archives with one HTML file per
//! email; analysis results are written as a CSV report.

mod archive;
mod report;
mod types;

pub use archive::{write_archive, write_archive_file};
pub use report::{export_report, summarize_report, write_report_csv};
pub use types::{ArchiveEntry, ReportRow, ReportSummary};
