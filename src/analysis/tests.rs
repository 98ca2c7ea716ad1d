//! Cross-report invariants checked over a corpus of well-formed and broken markup.

use super::*;

const CORPUS: &[&str] = &[
    "",
    "   ",
    "plain text, no markup",
    "<img src='x.png'>",
    "<p>Hi</p>",
    "<!DOCTYPE html><html><head><meta name=\"viewport\" content=\"width=device-width\"></head><body></body></html>",
    "<table><tr><td><img alt='a'><img alt=''><img></td></tr></table>",
    "<div><table><tr><td>unclosed",
    "<table><table><table>",
    "</table></div></p>",
    "<<<>>> <img <a href=",
    "<!-- <table> --><p>commented table</p>",
    "<template><table></table></template>",
    "<script>document.write('<table>')</script>",
    "<style>@media (max-width: 480px) { .a { display:none } }</style><form><input></form>",
    "<svg><a href='#'><image href='x.png'/></a></svg>",
    "<video src='a.mp4'></video><section><nav></nav></section>",
    "<p>x</p><!-- <body> -->",
    "<script>var s = '<html>';</script>",
    "<a title=\"<head>\">x</a>",
    "<noscript><img src=\"a.png\"></noscript>",
    "<svg><use xlink:href=\"#i\"></use></svg>",
    "<pre>  a\n   b  </pre>",
    "<pre><b>bold</b>  tail</pre>",
    "<textarea>\n\n line</textarea>",
];

fn reformatted(html: &str) -> String {
    crate::extract::prettify(&HtmlDocument::parse(html))
}

/// Tag names with their attributes, in document order.
fn element_sequence(html: &str) -> Vec<(String, Vec<(String, String)>)> {
    HtmlDocument::parse(html)
        .elements()
        .map(|element| {
            let attrs = element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            (element.value().name().to_string(), attrs)
        })
        .collect()
}

fn text_runs(html: &str) -> Vec<String> {
    let doc = HtmlDocument::parse(html);
    doc.html()
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            scraper::Node::Text(text) => Some(text.trim().to_string()),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .collect()
}

#[test]
fn test_alt_text_counts_partition_images() {
    for html in CORPUS {
        let images = analyze_structure(html).images;
        assert_eq!(
            images.with_alt_text + images.without_alt_text,
            images.count,
            "alt partition broken for {html:?}"
        );
        assert!(images.with_width_height <= images.count);
    }
}

#[test]
fn test_table_count_agrees_with_layout_flag() {
    for html in CORPUS {
        let tables = analyze_structure(html).elements.tables;
        let layout = check_compatibility(html).layout.uses_tables_for_layout;
        assert_eq!(tables > 0, layout, "table/layout disagreement for {html:?}");
    }
}

#[test]
fn test_image_count_matches_element_count() {
    for html in CORPUS {
        let report = analyze_structure(html);
        assert_eq!(report.elements.images, report.images.count);
    }
}

#[test]
fn test_analysis_is_idempotent() {
    for html in CORPUS {
        assert_eq!(analyze_structure(html), analyze_structure(html));
        let first = serde_json::to_string(&check_compatibility(html)).expect("serializes");
        let second = serde_json::to_string(&check_compatibility(html)).expect("serializes");
        assert_eq!(first, second, "compatibility not deterministic for {html:?}");
    }
}

#[test]
fn test_reformatted_markup_analyzes_the_same() {
    for html in CORPUS {
        let pretty = reformatted(html);
        let before = analyze_structure(html);
        let after = analyze_structure(&pretty);
        assert_eq!(before.total_elements, after.total_elements, "{html:?} became {pretty:?}");
        assert_eq!(before.elements, after.elements, "{html:?} became {pretty:?}");
        assert_eq!(before.images, after.images, "{html:?} became {pretty:?}");
    }
}

#[test]
fn test_reformatting_keeps_tags_attributes_and_text() {
    for html in CORPUS {
        let pretty = reformatted(html);
        assert_eq!(element_sequence(html), element_sequence(&pretty), "{pretty:?}");
        assert_eq!(text_runs(html), text_runs(&pretty), "{pretty:?}");
    }
}

#[test]
fn test_recommendations_follow_fixed_sequence() {
    let fixed = [
        crate::config::RECOMMEND_DOCTYPE,
        crate::config::RECOMMEND_NO_FORMS,
        crate::config::RECOMMEND_NO_VIDEO,
        crate::config::RECOMMEND_NO_JAVASCRIPT,
    ];
    for html in CORPUS {
        let recommendations = check_compatibility(html).recommendations;
        let positions: Vec<usize> = recommendations
            .iter()
            .map(|r| {
                fixed
                    .iter()
                    .position(|f| f == r)
                    .expect("recommendation text must be one of the fixed messages")
            })
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "recommendations out of order for {html:?}: {recommendations:?}"
        );
    }
}

#[test]
fn test_script_content_is_not_parsed_as_markup() {
    let report = analyze_structure("<script>document.write('<table>')</script>");
    assert_eq!(report.elements.tables, 0);
    assert_eq!(report.total_elements, 1);
}

#[test]
fn test_commented_markup_is_ignored() {
    let report = analyze_structure("<!-- <table> --><p>commented table</p>");
    assert_eq!(report.elements.tables, 0);
    assert_eq!(report.total_elements, 1);
}

#[test]
fn test_compatibility_report_field_names() {
    let value = serde_json::to_value(check_compatibility("<form></form>")).expect("serializes");
    assert_eq!(value["general"]["has_doctype"], false);
    assert_eq!(value["general"]["uses_html5_elements"], false);
    assert_eq!(value["layout"]["uses_tables_for_layout"], false);
    assert_eq!(value["problematic_elements"]["forms"], true);
    assert_eq!(value["problematic_elements"]["background_images"], false);
    assert_eq!(value["recommendations"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_analyze_template_combines_reports() {
    let html = "<img src='x.png'><form></form>";
    let analysis = analyze_template(html);
    assert_eq!(analysis.structure, analyze_structure(html));
    assert_eq!(analysis.compatibility, check_compatibility(html));
    assert_eq!(
        analysis.advice,
        template_recommendations(&analysis.structure, &analysis.compatibility)
    );
}

#[test]
fn test_html_from_bytes() {
    assert_eq!(html_from_bytes(b"<p>ok</p>"), Ok("<p>ok</p>"));
    assert!(matches!(
        html_from_bytes(&[0xff, 0xfe, 0x00]),
        Err(crate::error_handling::AnalysisError::InvalidInput(_))
    ));
}
