//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{BulkStats, ErrorType, WarningType};
use crate::export::ReportSummary;

/// Logs a one-line summary of a bulk run followed by error and warning counts.
pub fn print_bulk_statistics(stats: &BulkStats, elapsed_seconds: f64) {
    let attempted = stats.emails_attempted();
    info!(
        "Fetched {} email{} ({} with HTML, {} failed) in {:.1}s",
        attempted,
        if attempted == 1 { "" } else { "s" },
        stats.emails_extracted(),
        stats.total_errors(),
        elapsed_seconds
    );
    print_error_statistics(stats);
}

/// Prints error and warning statistics to the log.
pub fn print_error_statistics(stats: &BulkStats) {
    let total_errors = stats.total_errors();
    let total_warnings = stats.total_warnings();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_warnings > 0 {
        info!("Warning Counts ({} total):", total_warnings);
        for warning_type in WarningType::iter() {
            let count = stats.get_warning_count(warning_type);
            if count > 0 {
                info!("   {}: {}", warning_type.as_str(), count);
            }
        }
    }
}

/// Logs the aggregate statistics of a template report.
pub fn print_report_summary(summary: &ReportSummary) {
    info!("Templates analyzed: {}", summary.total_templates);
    info!(
        "Mobile responsive: {}/{}",
        summary.responsive_templates, summary.total_templates
    );
    info!("Average elements: {:.1}", summary.avg_elements);
    info!("Average images: {:.1}", summary.avg_images);
    for (template, issues) in &summary.issues_by_template {
        if *issues > 0 {
            info!("   {}: {} issue{}", template, issues, if *issues == 1 { "" } else { "s" });
        }
    }
}
