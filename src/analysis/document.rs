//! Tolerant HTML document wrapper.
//!
//! Parsing goes through `scraper` (html5ever), which never fails: malformed
//! markup is recovered following the WHATWG tree-construction rules. The
//! parser always synthesizes `html`, `head` and `body`; those wrappers are
//! hidden from element iteration unless the source actually contains the
//! corresponding start tag, so counts reflect the markup as written.

use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

// A comment, or a start tag whose quoted attribute values are consumed with it.
// Unterminated comments and quotes run to the end of input, as in the tokenizer.
const MARKUP_TOKEN_PATTERN: &str = r#"(?s)<!--.*?(?:-->|\z)|<(?P<tag>[A-Za-z][^\s/>]*)(?:[^>"']|"[^"]*(?:"|\z)|'[^']*(?:'|\z))*>?"#;

static MARKUP_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(MARKUP_TOKEN_PATTERN).expect("Failed to compile markup token regex - this is a bug")
});

// Elements whose content the tokenizer reads as text up to the matching end tag.
const TEXT_CONTENT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "noscript", "title", "textarea",
];

/// Which document wrappers appear as start tags in the source text.
#[derive(Debug, Clone, Copy, Default)]
struct WrittenWrappers {
    html: bool,
    head: bool,
    body: bool,
}

impl WrittenWrappers {
    /// Walks start tags in source order, skipping comments, attribute values
    /// and the text content of script-like elements.
    fn scan(source: &str) -> Self {
        let lower = source.to_ascii_lowercase();
        let mut written = WrittenWrappers::default();
        let mut pos = 0;

        while let Some(caps) = MARKUP_TOKEN_RE.captures_at(&lower, pos) {
            let Some(token) = caps.get(0) else { break };
            pos = token.end();
            let Some(tag) = caps.name("tag") else { continue };

            match tag.as_str() {
                "html" => written.html = true,
                "head" => written.head = true,
                "body" => written.body = true,
                // Everything after <plaintext> is text.
                "plaintext" => break,
                name if TEXT_CONTENT_ELEMENTS.contains(&name) => {
                    match lower[pos..].find(&format!("</{name}")) {
                        Some(offset) => pos += offset,
                        None => break,
                    }
                }
                _ => {}
            }
        }
        written
    }
}

/// A parsed HTML document.
///
/// Immutable once parsed. Element iteration is in document order.
pub struct HtmlDocument {
    html: Html,
    written: WrittenWrappers,
}

impl HtmlDocument {
    /// Parses `source` tolerantly. Never fails.
    pub fn parse(source: &str) -> Self {
        HtmlDocument {
            html: Html::parse_document(source),
            written: WrittenWrappers::scan(source),
        }
    }

    /// The underlying `scraper` document.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Returns true if `element` is a wrapper the parser added on its own.
    pub fn is_implied_wrapper(&self, element: &ElementRef<'_>) -> bool {
        match element.value().name() {
            "html" => !self.written.html,
            "head" => !self.written.head,
            "body" => !self.written.body,
            _ => false,
        }
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |element| !self.is_implied_wrapper(element))
    }

    /// Number of elements in the document.
    pub fn element_count(&self) -> usize {
        self.elements().count()
    }

    /// Elements with the given (lowercase) tag name.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.elements()
            .filter(move |element| element.value().name() == name)
    }

    /// Returns true if at least one element has the given tag name.
    pub fn has_element(&self, name: &str) -> bool {
        self.elements_named(name).next().is_some()
    }

    /// Returns true if at least one element has any of the given tag names.
    pub fn has_any_element(&self, names: &[&str]) -> bool {
        self.elements()
            .any(|element| names.contains(&element.value().name()))
    }

    /// Elements whose inline `style` attribute matches `pattern`.
    pub fn elements_with_style<'a>(
        &'a self,
        pattern: &'a Regex,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.elements().filter(move |element| {
            element
                .value()
                .attr("style")
                .is_some_and(|style| pattern.is_match(style))
        })
    }

    /// Returns true if `attr` is present on `element` with a non-blank value.
    pub fn has_attr(element: &ElementRef<'_>, attr: &str) -> bool {
        element
            .value()
            .attr(attr)
            .is_some_and(|value| !value.trim().is_empty())
    }
}
