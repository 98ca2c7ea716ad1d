//! Indented re-serialization of a parsed document.
//!
//! One tag, text run, comment or doctype per line, indented one space per
//! nesting level. Only whitespace changes: tags, attributes and text are kept,
//! and whitespace inside `pre`-like elements is left alone.

use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::node::{Doctype, Element};
use scraper::{ElementRef, Node};

use crate::analysis::HtmlDocument;

const INDENT: &str = " ";

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

// Content of these is emitted as-is, never escaped. The parser runs with
// scripting enabled, so noscript content is text too.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "noscript",
];

// Whitespace inside these is content.
const PREFORMATTED_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

fn is_html_named(element: &Element, names: &[&str]) -> bool {
    &*element.name.ns == HTML_NAMESPACE && names.contains(&element.name())
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push('\n');
}

// Non-breaking spaces are content in email templates, so only ASCII
// whitespace is trimmed.
fn trim_ascii(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii_whitespace())
}

fn format_doctype(doctype: &Doctype) -> String {
    let mut line = format!("<!DOCTYPE {}", doctype.name());
    if !doctype.public_id().is_empty() {
        line.push_str(&format!(" PUBLIC \"{}\"", doctype.public_id()));
    }
    if !doctype.system_id().is_empty() {
        line.push_str(&format!(" \"{}\"", doctype.system_id()));
    }
    line.push('>');
    line
}

fn format_comment(comment: &str) -> String {
    format!("<!--{comment}-->")
}

/// Start tag with every attribute, namespaced ones (`xlink:href`) keeping their prefix.
fn format_start_tag(element: &Element) -> String {
    let mut tag = format!("<{}", element.name());
    for (name, value) in element.attrs.iter() {
        let value: &str = value;
        let value = encode_double_quoted_attribute(value);
        match &name.prefix {
            Some(prefix) => tag.push_str(&format!(" {}:{}=\"{}\"", prefix, name.local, value)),
            None => tag.push_str(&format!(" {}=\"{}\"", name.local, value)),
        }
    }
    tag.push('>');
    tag
}

/// Visits the children of `element`. Template contents sit in a fragment
/// below the template element and are visited in its place.
fn for_each_child<'a>(element: ElementRef<'a>, mut visit: impl FnMut(&'a Node, Option<ElementRef<'a>>)) {
    for child in element.children() {
        if child.value().is_fragment() {
            for node in child.children() {
                visit(node.value(), ElementRef::wrap(node));
            }
        } else {
            visit(child.value(), ElementRef::wrap(child));
        }
    }
}

/// Serializes a node without adding or removing any whitespace.
fn write_inline(node: &Node, element: Option<ElementRef<'_>>, out: &mut String) {
    match (node, element) {
        (Node::Element(data), Some(element)) => {
            out.push_str(&format_start_tag(data));
            if is_html_named(data, VOID_ELEMENTS) {
                return;
            }
            if is_html_named(data, RAW_TEXT_ELEMENTS) {
                out.extend(element.text());
            } else {
                for_each_child(element, |child, child_element| {
                    write_inline(child, child_element, out)
                });
            }
            out.push_str(&format!("</{}>", data.name()));
        }
        (Node::Text(text), _) => out.push_str(&encode_text(&**text)),
        (Node::Comment(comment), _) => out.push_str(&format_comment(comment)),
        _ => {}
    }
}

fn write_node(
    document: &HtmlDocument,
    node: &Node,
    element: Option<ElementRef<'_>>,
    depth: usize,
    out: &mut String,
) {
    match (node, element) {
        (Node::Element(_), Some(element)) => write_element(document, element, depth, out),
        (Node::Text(text), _) => {
            let trimmed = trim_ascii(text);
            if !trimmed.is_empty() {
                push_line(out, depth, &encode_text(trimmed));
            }
        }
        (Node::Comment(comment), _) => push_line(out, depth, &format_comment(comment)),
        _ => {}
    }
}

fn write_element(document: &HtmlDocument, element: ElementRef<'_>, depth: usize, out: &mut String) {
    // Wrappers the parser invented are transparent.
    if document.is_implied_wrapper(&element) {
        for_each_child(element, |child, child_element| {
            write_node(document, child, child_element, depth, out)
        });
        return;
    }

    let data = element.value();
    let name = data.name();
    if is_html_named(data, PREFORMATTED_ELEMENTS) {
        let mut content = String::new();
        for_each_child(element, |child, child_element| {
            write_inline(child, child_element, &mut content)
        });
        // The parser drops one newline right after the start tag.
        if content.starts_with('\n') {
            content.insert(0, '\n');
        }
        push_line(
            out,
            depth,
            &format!("{}{}</{}>", format_start_tag(data), content, name),
        );
        return;
    }

    push_line(out, depth, &format_start_tag(data));
    if is_html_named(data, VOID_ELEMENTS) {
        return;
    }

    if is_html_named(data, RAW_TEXT_ELEMENTS) {
        let content: String = element.text().collect();
        let content = trim_ascii(&content);
        if !content.is_empty() {
            push_line(out, depth + 1, content);
        }
    } else {
        for_each_child(element, |child, child_element| {
            write_node(document, child, child_element, depth + 1, out)
        });
    }
    push_line(out, depth, &format!("</{name}>"));
}

/// Pretty-prints a parsed document.
pub fn prettify(document: &HtmlDocument) -> String {
    let mut out = String::new();
    for node in document.html().tree.root().children() {
        match node.value() {
            Node::Doctype(doctype) => push_line(&mut out, 0, &format_doctype(doctype)),
            other => write_node(document, other, ElementRef::wrap(node), 0, &mut out),
        }
    }
    out
}
