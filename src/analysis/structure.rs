//! Structure analysis: element counts, image accessibility and responsive
//! design signals.

use serde::{Deserialize, Serialize};

use super::document::HtmlDocument;

const MEDIA_QUERY_TOKEN: &str = "@media";
const MAX_WIDTH_TOKEN: &str = "max-width";

/// Counts of the elements that matter most in email templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCounts {
    pub images: usize,
    pub links: usize,
    pub tables: usize,
}

/// Image accessibility metrics.
///
/// `with_alt_text + without_alt_text == count` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageStats {
    pub count: usize,
    pub with_alt_text: usize,
    pub without_alt_text: usize,
    pub with_width_height: usize,
}

impl ImageStats {
    /// Percentage (0-100) of images carrying alt text; 0 when there are no images.
    pub fn alt_text_coverage(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.with_alt_text as f64 / self.count as f64 * 100.0
    }
}

/// Responsive design signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responsiveness {
    pub has_media_queries: bool,
    pub media_query_count: usize,
    pub has_viewport_meta: bool,
    pub has_max_width: bool,
}

/// Result of `analyze_structure`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureReport {
    pub total_elements: usize,
    pub elements: ElementCounts,
    pub images: ImageStats,
    pub responsiveness: Responsiveness,
}

fn image_stats(document: &HtmlDocument) -> ImageStats {
    let mut stats = ImageStats::default();
    for img in document.elements_named("img") {
        stats.count += 1;
        if HtmlDocument::has_attr(&img, "alt") {
            stats.with_alt_text += 1;
        } else {
            stats.without_alt_text += 1;
        }
        if HtmlDocument::has_attr(&img, "width") && HtmlDocument::has_attr(&img, "height") {
            stats.with_width_height += 1;
        }
    }
    stats
}

/// Responsive signals. `@media` and `max-width` are searched in the raw
/// source so rules inside `<style>` blocks are seen; the viewport meta tag
/// comes from the parsed tree.
fn responsiveness(source: &str, document: &HtmlDocument) -> Responsiveness {
    let media_query_count = source.matches(MEDIA_QUERY_TOKEN).count();
    Responsiveness {
        has_media_queries: media_query_count > 0,
        media_query_count,
        has_viewport_meta: document
            .elements_named("meta")
            .any(|meta| meta.value().attr("name") == Some("viewport")),
        has_max_width: source.contains(MAX_WIDTH_TOKEN),
    }
}

/// Analyzes the structure of an HTML string.
///
/// Total over all inputs: malformed markup is recovered by the parser and the
/// counts reflect whatever structure was recovered.
pub fn analyze_structure(html: &str) -> StructureReport {
    let document = HtmlDocument::parse(html);

    let report = StructureReport {
        total_elements: document.element_count(),
        elements: ElementCounts {
            images: document.elements_named("img").count(),
            links: document.elements_named("a").count(),
            tables: document.elements_named("table").count(),
        },
        images: image_stats(&document),
        responsiveness: responsiveness(html, &document),
    };
    log::debug!(
        "Structure: {} elements, {} images, {} links, {} tables, {} media queries",
        report.total_elements,
        report.elements.images,
        report.elements.links,
        report.elements.tables,
        report.responsiveness.media_query_count
    );
    report
}
