//! Template-level advice derived from the structure and compatibility reports.

use super::compatibility::CompatibilityReport;
use super::structure::StructureReport;
use crate::config::RECOMMEND_MEDIA_QUERIES;

/// Builds the template recommendations shown alongside an analysis.
///
/// Order: missing alt text, missing media queries, then one entry per
/// problematic construct in reporting order.
pub fn template_recommendations(
    structure: &StructureReport,
    compatibility: &CompatibilityReport,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let missing_alt = structure.images.without_alt_text;
    if missing_alt > 0 {
        recommendations.push(format!(
            "Add alt text to {missing_alt} images for accessibility and when images are blocked"
        ));
    }

    if !structure.responsiveness.has_media_queries {
        recommendations.push(RECOMMEND_MEDIA_QUERIES.to_string());
    }

    for element in compatibility.problematic_elements.flagged() {
        recommendations.push(format!(
            "Remove {} as it may cause compatibility issues in some email clients",
            element.display_name()
        ));
    }

    recommendations
}
