//! Email client compatibility checks.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum_macros::EnumIter;

use super::document::HtmlDocument;
use crate::config::{
    RECOMMEND_DOCTYPE, RECOMMEND_NO_FORMS, RECOMMEND_NO_JAVASCRIPT, RECOMMEND_NO_VIDEO,
};

const BACKGROUND_STYLE_PATTERN: &str = r"background(-image)?:";
const DOCTYPE_PREFIX: &str = "<!doctype";
const HTML5_SECTIONING_TAGS: &[&str] = &["section", "article", "header", "footer", "nav"];

static BACKGROUND_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(BACKGROUND_STYLE_PATTERN)
        .expect("Failed to compile background style regex - this is a bug")
});

/// Document-level properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralCompatibility {
    pub has_doctype: bool,
    pub uses_html5_elements: bool,
}

/// Layout technique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCompatibility {
    pub uses_tables_for_layout: bool,
}

/// Constructs that many email clients strip or mis-render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblematicElements {
    pub background_images: bool,
    pub forms: bool,
    pub video: bool,
    pub javascript: bool,
}

/// One of the flags in `ProblematicElements`, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ProblematicElement {
    BackgroundImages,
    Forms,
    Video,
    Javascript,
}

impl ProblematicElement {
    /// Field name as serialized in the report.
    pub fn key(&self) -> &'static str {
        match self {
            ProblematicElement::BackgroundImages => "background_images",
            ProblematicElement::Forms => "forms",
            ProblematicElement::Video => "video",
            ProblematicElement::Javascript => "javascript",
        }
    }

    /// Human-readable name ("background images").
    pub fn display_name(&self) -> String {
        self.key().replace('_', " ")
    }
}

impl ProblematicElements {
    /// Returns the flag for `element`.
    pub fn is_set(&self, element: ProblematicElement) -> bool {
        match element {
            ProblematicElement::BackgroundImages => self.background_images,
            ProblematicElement::Forms => self.forms,
            ProblematicElement::Video => self.video,
            ProblematicElement::Javascript => self.javascript,
        }
    }

    /// Flags that are set, in reporting order.
    pub fn flagged(&self) -> Vec<ProblematicElement> {
        use strum::IntoEnumIterator;
        ProblematicElement::iter()
            .filter(|element| self.is_set(*element))
            .collect()
    }
}

/// Result of `check_compatibility`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub general: GeneralCompatibility,
    pub layout: LayoutCompatibility,
    pub problematic_elements: ProblematicElements,
    pub recommendations: Vec<String>,
}

impl CompatibilityReport {
    /// Number of problematic flags that are set.
    pub fn issue_count(&self) -> usize {
        self.problematic_elements.flagged().len()
    }
}

fn has_doctype(source: &str) -> bool {
    source.trim().to_lowercase().starts_with(DOCTYPE_PREFIX)
}

/// Recommendations derived from the flags, always in the same order.
fn recommendations(general: &GeneralCompatibility, problems: &ProblematicElements) -> Vec<String> {
    let mut out = Vec::new();
    if !general.has_doctype {
        out.push(RECOMMEND_DOCTYPE.to_string());
    }
    if problems.forms {
        out.push(RECOMMEND_NO_FORMS.to_string());
    }
    if problems.video {
        out.push(RECOMMEND_NO_VIDEO.to_string());
    }
    if problems.javascript {
        out.push(RECOMMEND_NO_JAVASCRIPT.to_string());
    }
    out
}

/// Checks an HTML string for constructs that break in email clients.
///
/// The doctype check runs on the raw source; every other flag comes from the
/// parsed tree. Never fails.
pub fn check_compatibility(html: &str) -> CompatibilityReport {
    let document = HtmlDocument::parse(html);

    let problematic_elements = ProblematicElements {
        background_images: document
            .elements_with_style(&BACKGROUND_STYLE_RE)
            .next()
            .is_some(),
        forms: document.has_element("form"),
        video: document.has_element("video"),
        javascript: document.has_element("script"),
    };
    let general = GeneralCompatibility {
        has_doctype: has_doctype(html),
        uses_html5_elements: document.has_any_element(HTML5_SECTIONING_TAGS),
    };
    let layout = LayoutCompatibility {
        uses_tables_for_layout: document.has_element("table"),
    };

    let recommendations = recommendations(&general, &problematic_elements);
    log::debug!(
        "Compatibility: doctype={}, {} problematic flags, {} recommendations",
        general.has_doctype,
        problematic_elements.flagged().len(),
        recommendations.len()
    );

    CompatibilityReport {
        general,
        layout,
        problematic_elements,
        recommendations,
    }
}
