//! Template analysis report: CSV export and summary statistics.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::{self, Write};
use std::path::Path;

use super::types::{ReportRow, ReportSummary};

/// Writes report rows as CSV (header row first) into `writer`.
pub fn write_report_csv<W: Write>(rows: &[ReportRow], writer: W) -> Result<W> {
    let mut writer = Writer::from_writer(writer);
    if rows.is_empty() {
        // serde only emits the header alongside the first record
        writer.write_record([
            "Flow",
            "Email",
            "Elements",
            "Images",
            "Links",
            "Tables",
            "Mobile Responsive",
            "Issues",
            "Recommendations",
        ])?;
    }
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write report row for {}", row.template_label()))?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))
}

/// Writes the report to `output`, or to stdout when `output` is `None`.
pub fn export_report(rows: &[ReportRow], output: Option<&Path>) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(io::BufWriter::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(io::stdout()),
    };
    writer = write_report_csv(rows, writer)?;
    writer.flush().context("Failed to flush report output")?;
    if let Some(path) = output {
        log::info!("Wrote report with {} rows to {}", rows.len(), path.display());
    }
    Ok(())
}

/// Computes aggregate statistics over report rows.
///
/// Averages are zero for an empty report.
pub fn summarize_report(rows: &[ReportRow]) -> ReportSummary {
    let total = rows.len();
    if total == 0 {
        return ReportSummary::default();
    }
    let sum_elements: usize = rows.iter().map(|r| r.elements).sum();
    let sum_images: usize = rows.iter().map(|r| r.images).sum();

    ReportSummary {
        total_templates: total,
        responsive_templates: rows.iter().filter(|r| r.mobile_responsive).count(),
        avg_elements: sum_elements as f64 / total as f64,
        avg_images: sum_images as f64 / total as f64,
        issues_by_template: rows
            .iter()
            .map(|r| (r.template_label(), r.issues))
            .collect(),
    }
}
