//! Static analysis of email HTML.
//!
//! Two independent reports are produced from an HTML string:
//! - `analyze_structure`: element counts, image accessibility, responsive signals
//! - `check_compatibility`: constructs that break in email clients, plus
//!   fixed-text recommendations
//!
//! Both are pure and never fail. Each call parses its own document, so they can
//! run in any order or concurrently.

mod advice;
mod compatibility;
mod document;
mod structure;

#[cfg(test)]
mod tests;

pub use advice::template_recommendations;
pub use compatibility::{
    check_compatibility, CompatibilityReport, GeneralCompatibility, LayoutCompatibility,
    ProblematicElement, ProblematicElements,
};
pub use document::HtmlDocument;
pub use structure::{
    analyze_structure, ElementCounts, ImageStats, Responsiveness, StructureReport,
};

use serde::Serialize;

use crate::error_handling::AnalysisError;

/// Both reports for one template, plus the derived advice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateAnalysis {
    pub structure: StructureReport,
    pub compatibility: CompatibilityReport,
    pub advice: Vec<String>,
}

/// Runs both analyses on `html`.
pub fn analyze_template(html: &str) -> TemplateAnalysis {
    let structure = analyze_structure(html);
    let compatibility = check_compatibility(html);
    let advice = template_recommendations(&structure, &compatibility);
    TemplateAnalysis {
        structure,
        compatibility,
        advice,
    }
}

/// Interprets raw bytes (an uploaded file, say) as HTML text.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the bytes are not valid UTF-8.
pub fn html_from_bytes(bytes: &[u8]) -> Result<&str, AnalysisError> {
    std::str::from_utf8(bytes).map_err(|e| {
        AnalysisError::InvalidInput(format!("HTML is not valid UTF-8 text: {e}"))
    })
}
