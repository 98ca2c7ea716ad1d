//! Export row and summary types.

use serde::{Serialize, Serializer};

use crate::analysis::{CompatibilityReport, StructureReport};

/// One file inside a template archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Relative path inside the archive (`Flow_Name/Email_Name.html`)
    pub path: String,
    pub html: String,
}

fn yes_no<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "Yes" } else { "No" })
}

/// One line of the template analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Flow")]
    pub flow: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Elements")]
    pub elements: usize,
    #[serde(rename = "Images")]
    pub images: usize,
    #[serde(rename = "Links")]
    pub links: usize,
    #[serde(rename = "Tables")]
    pub tables: usize,
    /// True when the template has media queries
    #[serde(rename = "Mobile Responsive", serialize_with = "yes_no")]
    pub mobile_responsive: bool,
    /// Number of problematic constructs found
    #[serde(rename = "Issues")]
    pub issues: usize,
    /// Number of compatibility recommendations
    #[serde(rename = "Recommendations")]
    pub recommendations: usize,
}

impl ReportRow {
    pub fn new(
        flow: impl Into<String>,
        email: impl Into<String>,
        structure: &StructureReport,
        compatibility: &CompatibilityReport,
    ) -> Self {
        ReportRow {
            flow: flow.into(),
            email: email.into(),
            elements: structure.total_elements,
            images: structure.elements.images,
            links: structure.elements.links,
            tables: structure.elements.tables,
            mobile_responsive: structure.responsiveness.has_media_queries,
            issues: compatibility.issue_count(),
            recommendations: compatibility.recommendations.len(),
        }
    }

    /// Label used in per-template listings.
    pub fn template_label(&self) -> String {
        format!("{}: {}", self.flow, self.email)
    }
}

/// Aggregate statistics over a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_templates: usize,
    pub responsive_templates: usize,
    pub avg_elements: f64,
    pub avg_images: f64,
    pub issues_by_template: Vec<(String, usize)>,
}
