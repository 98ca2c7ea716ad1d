//! HTML extraction from rendered email messages.
//!
//! The content render endpoint returns a JSON:API resource. The HTML body is
//! looked up through optional nesting levels:
//!
//! 1. `data.attributes` if present and non-empty,
//! 2. otherwise the top-level `attributes`,
//! 3. then the `html` string inside it.
//!
//! Missing fields are not errors; they yield empty strings.

mod pretty;

pub use pretty::prettify;

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::analysis::HtmlDocument;
use crate::config::{MAX_HTML_PREVIEW_CHARS, NO_PREVIEW_TEXT, NO_SUBJECT};

/// HTML found in a message, as sent and pretty-printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedHtml {
    pub raw: String,
    pub pretty: String,
}

impl ExtractedHtml {
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Splits into `(raw, pretty)`.
    pub fn into_parts(self) -> (String, String) {
        (self.raw, self.pretty)
    }
}

/// Template metadata shown next to the extracted HTML.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateInfo {
    pub subject: String,
    pub preview_text: String,
    /// All other attributes except `html`, `subject` and `preview_text`.
    pub other: BTreeMap<String, Value>,
}

/// JSON truthiness: null, false, 0 and empty strings/arrays/objects are "empty".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Locates the attributes object of a message.
pub fn message_attributes(message: &Value) -> Option<&Map<String, Value>> {
    let object = message.as_object()?;
    object
        .get("data")
        .and_then(|data| data.get("attributes"))
        .filter(|attrs| is_truthy(attrs))
        .or_else(|| object.get("attributes"))
        .and_then(Value::as_object)
}

/// The raw HTML body of a rendered message, or `""` when there is none.
pub fn raw_html(message: &Value) -> &str {
    message_attributes(message)
        .and_then(|attrs| attrs.get("html"))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Extracts the HTML body of a rendered message, with a pretty-printed copy.
///
/// Never fails: a message without HTML, or one that is not a JSON object at
/// all, yields two empty strings.
pub fn extract_html(message: &Value) -> ExtractedHtml {
    let raw = raw_html(message);

    if raw.is_empty() {
        log::debug!("Message has no HTML content");
        return ExtractedHtml::default();
    }

    log::debug!(
        "Extracted {} bytes of HTML: {:?}",
        raw.len(),
        raw.chars().take(MAX_HTML_PREVIEW_CHARS).collect::<String>()
    );
    ExtractedHtml {
        raw: raw.to_string(),
        pretty: prettify(&HtmlDocument::parse(raw)),
    }
}

/// Reads subject, preview text and remaining attributes of a message.
pub fn template_info(message: &Value) -> TemplateInfo {
    let Some(attrs) = message_attributes(message) else {
        return TemplateInfo {
            subject: NO_SUBJECT.to_string(),
            preview_text: NO_PREVIEW_TEXT.to_string(),
            other: BTreeMap::new(),
        };
    };

    let text_or = |key: &str, default: &str| {
        attrs
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    TemplateInfo {
        subject: text_or("subject", NO_SUBJECT),
        preview_text: text_or("preview_text", NO_PREVIEW_TEXT),
        other: attrs
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "html" | "subject" | "preview_text"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    }
}
