//! Subcommand execution.

use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::statistics::{print_bulk_statistics, print_report_summary};
use crate::analysis::{analyze_template, html_from_bytes, TemplateAnalysis};
use crate::api::ApiClient;
use crate::bulk::{
    extract_all_flow_templates, extract_flow_templates, generate_template_report, select_flows,
};
use crate::cli::{AnalyzeSource, Cli, Command};
use crate::config::{ALL_FLOWS_ARCHIVE_NAME, FLOW_ARCHIVE_SUFFIX, REPORT_FILE_NAME};
use crate::error_handling::BulkStats;
use crate::export::{export_report, summarize_report, write_archive_file};
use crate::extract::{extract_html, raw_html, template_info};
use crate::initialization::init_api_client;
use crate::utils::sanitize::file_stem;

/// Runs the subcommand selected on the command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.to_config();

    if !cli.command.needs_api() {
        if let Command::Analyze { source, json } = &cli.command {
            return analyze(None, source, *json).await;
        }
    }

    let client = init_api_client(&config).with_context(|| {
        format!(
            "Failed to set up API client (pass --api-key or set {})",
            crate::config::API_KEY_ENV
        )
    })?;
    let concurrency = config.max_concurrency;

    match &cli.command {
        Command::Check => check(&client).await,
        Command::Flows => list_flows(&client).await,
        Command::Flow { id } => show_flow(&client, id).await,
        Command::Extract {
            action_id,
            output,
            pretty,
        } => extract(&client, action_id, output.as_deref(), *pretty).await,
        Command::Analyze { source, json } => analyze(Some(&client), source, *json).await,
        Command::ExportFlow { flow_id, output } => {
            export_flow(&client, flow_id, output.clone(), concurrency).await
        }
        Command::ExportAll { output } => export_all(&client, output.clone(), concurrency).await,
        Command::Report { flow_ids, output } => {
            report(&client, flow_ids, output.clone(), concurrency).await
        }
    }
}

async fn check(client: &ApiClient) -> Result<()> {
    let connected = client
        .check_connection()
        .await
        .context("Connection check failed")?;
    if !connected {
        bail!("API responded without flow data; check the API key permissions");
    }
    println!("✅ Connected to {}", client.base_url());
    Ok(())
}

async fn list_flows(client: &ApiClient) -> Result<()> {
    let flows = client.list_flows().await.context("Failed to list flows")?;
    if flows.is_empty() {
        println!("No flows found");
        return Ok(());
    }
    for flow in &flows {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            flow.id, flow.name, flow.status, flow.trigger_type, flow.updated
        );
    }
    info!("{} flows", flows.len());
    Ok(())
}

async fn show_flow(client: &ApiClient, flow_id: &str) -> Result<()> {
    let actions = client
        .list_flow_actions(flow_id)
        .await
        .with_context(|| format!("Failed to list actions of flow {flow_id}"))?;
    if actions.is_empty() {
        println!("No actions found in flow {flow_id}");
    }
    for action in &actions {
        println!(
            "{}\t{}\t{}\t{}",
            action.id.as_deref().unwrap_or("-"),
            action.name,
            action.action_type,
            action.status
        );
    }

    // Metrics are informational; the action listing stands on its own.
    match client.get_flow_metrics(flow_id).await {
        Ok(metrics) => println!(
            "{}",
            serde_json::to_string_pretty(&metrics).context("Failed to format metrics")?
        ),
        Err(e) => warn!("Could not load metrics for flow {}: {}", flow_id, e),
    }
    Ok(())
}

async fn extract(
    client: &ApiClient,
    action_id: &str,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let message = client
        .get_email_content(action_id)
        .await
        .with_context(|| format!("Failed to fetch content of email {action_id}"))?;

    let extracted = extract_html(&message);
    if extracted.is_empty() {
        bail!("Email {action_id} has no HTML content");
    }

    let info = template_info(&message);
    info!("Subject: {}", info.subject);
    info!("Preview text: {}", info.preview_text);
    for (key, value) in &info.other {
        info!("{}: {}", key, value);
    }

    let (raw, formatted) = extracted.into_parts();
    let html = if pretty { formatted } else { raw };
    match output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Saved {} bytes of HTML to {}", html.len(), path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

async fn analyze(client: Option<&ApiClient>, source: &AnalyzeSource, json: bool) -> Result<()> {
    let html = match (&source.action, &source.file, client) {
        (Some(action_id), _, Some(client)) => {
            let message = client
                .get_email_content(action_id)
                .await
                .with_context(|| format!("Failed to fetch content of email {action_id}"))?;
            let html = raw_html(&message).to_string();
            if html.is_empty() {
                bail!("Email {action_id} has no HTML content");
            }
            html
        }
        (_, Some(path), _) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            html_from_bytes(&bytes)
                .with_context(|| format!("Cannot analyze {}", path.display()))?
                .to_string()
        }
        _ => bail!("Either --action or --file is required"),
    };

    let analysis = analyze_template(&html);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&analysis).context("Failed to serialize analysis")?
        );
    } else {
        print!("{}", render_analysis(&analysis));
    }
    Ok(())
}

/// Human-readable rendering of an analysis.
pub fn render_analysis(analysis: &TemplateAnalysis) -> String {
    let structure = &analysis.structure;
    let compatibility = &analysis.compatibility;
    let yes_no = |flag: bool| if flag { "Yes" } else { "No" };
    let mut out = String::new();

    let _ = writeln!(out, "Structure");
    let _ = writeln!(out, "  Total elements: {}", structure.total_elements);
    let _ = writeln!(
        out,
        "  Images: {}  Links: {}  Tables: {}",
        structure.elements.images, structure.elements.links, structure.elements.tables
    );
    let _ = writeln!(
        out,
        "  Images with alt text: {}/{} ({:.0}%)",
        structure.images.with_alt_text,
        structure.images.count,
        structure.images.alt_text_coverage()
    );
    let _ = writeln!(
        out,
        "  Images with width and height: {}",
        structure.images.with_width_height
    );
    let _ = writeln!(
        out,
        "  Media queries: {}  Viewport meta: {}  max-width: {}",
        structure.responsiveness.media_query_count,
        yes_no(structure.responsiveness.has_viewport_meta),
        yes_no(structure.responsiveness.has_max_width)
    );

    let _ = writeln!(out, "Compatibility");
    let _ = writeln!(out, "  DOCTYPE: {}", yes_no(compatibility.general.has_doctype));
    let _ = writeln!(
        out,
        "  HTML5 elements: {}",
        yes_no(compatibility.general.uses_html5_elements)
    );
    let _ = writeln!(
        out,
        "  Table layout: {}",
        yes_no(compatibility.layout.uses_tables_for_layout)
    );
    let flagged = compatibility.problematic_elements.flagged();
    if !flagged.is_empty() {
        let names: Vec<String> = flagged.iter().map(|e| e.display_name()).collect();
        let _ = writeln!(out, "  Problematic: {}", names.join(", "));
    }

    if !compatibility.recommendations.is_empty() {
        let _ = writeln!(out, "Recommendations");
        for recommendation in &compatibility.recommendations {
            let _ = writeln!(out, "  - {recommendation}");
        }
    }
    if !analysis.advice.is_empty() {
        let _ = writeln!(out, "Advice");
        for advice in &analysis.advice {
            let _ = writeln!(out, "  - {advice}");
        }
    }
    out
}

async fn flow_name(client: &ApiClient, flow_id: &str) -> Result<String> {
    let flows = client.list_flows().await.context("Failed to list flows")?;
    Ok(flows
        .into_iter()
        .find(|flow| flow.id == flow_id)
        .map(|flow| flow.name)
        .unwrap_or_else(|| flow_id.to_string()))
}

async fn export_flow(
    client: &ApiClient,
    flow_id: &str,
    output: Option<PathBuf>,
    concurrency: usize,
) -> Result<()> {
    let start = Instant::now();
    let stats = BulkStats::new();
    let entries = extract_flow_templates(client, flow_id, concurrency, &stats).await?;
    print_bulk_statistics(&stats, start.elapsed().as_secs_f64());

    if entries.is_empty() {
        warn!("No templates found in flow {}", flow_id);
        return Ok(());
    }
    let path = match output {
        Some(path) => path,
        None => PathBuf::from(format!(
            "{}{}",
            file_stem(&flow_name(client, flow_id).await?),
            FLOW_ARCHIVE_SUFFIX
        )),
    };
    write_archive_file(&entries, &path)?;
    println!("Saved {} templates to {}", entries.len(), path.display());
    Ok(())
}

async fn export_all(client: &ApiClient, output: Option<PathBuf>, concurrency: usize) -> Result<()> {
    let start = Instant::now();
    let stats = BulkStats::new();
    let entries = extract_all_flow_templates(client, concurrency, &stats).await?;
    print_bulk_statistics(&stats, start.elapsed().as_secs_f64());

    if entries.is_empty() {
        warn!("No templates found in any flow");
        return Ok(());
    }
    let path = output.unwrap_or_else(|| PathBuf::from(ALL_FLOWS_ARCHIVE_NAME));
    write_archive_file(&entries, &path)?;
    println!("Saved {} templates to {}", entries.len(), path.display());
    Ok(())
}

async fn report(
    client: &ApiClient,
    flow_ids: &[String],
    output: Option<PathBuf>,
    concurrency: usize,
) -> Result<()> {
    let start = Instant::now();
    let flows = client.list_flows().await.context("Failed to list flows")?;
    let selected = select_flows(&flows, flow_ids)?;

    let stats = BulkStats::new();
    let rows = generate_template_report(client, &selected, concurrency, &stats).await?;
    print_bulk_statistics(&stats, start.elapsed().as_secs_f64());

    if rows.is_empty() {
        warn!("No templates found in the selected flows");
        return Ok(());
    }
    let path = output.unwrap_or_else(|| PathBuf::from(REPORT_FILE_NAME));
    export_report(&rows, Some(&path))?;
    print_report_summary(&summarize_report(&rows));
    println!("Saved report for {} templates to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_analysis_mentions_problems_and_advice() {
        let analysis = analyze_template(r#"<form></form><img src="a.png">"#);
        let text = render_analysis(&analysis);
        assert!(text.contains("DOCTYPE: No"));
        assert!(text.contains("Problematic: forms"));
        assert!(text.contains("Images with alt text: 0/1 (0%)"));
        assert!(text.contains("Advice"));
    }

    #[test]
    fn test_render_analysis_clean_template() {
        let html = r#"<!DOCTYPE html><html><head><style>@media (max-width: 600px) {}</style></head><body><table><tr><td>Hi</td></tr></table></body></html>"#;
        let text = render_analysis(&analyze_template(html));
        assert!(text.contains("DOCTYPE: Yes"));
        assert!(text.contains("Table layout: Yes"));
        assert!(!text.contains("Problematic"));
        assert!(!text.contains("Recommendations"));
    }

    #[tokio::test]
    async fn test_analyze_file_without_client() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("template.html");
        std::fs::write(&path, "<p>Hello</p>").expect("write template");
        let source = AnalyzeSource {
            action: None,
            file: Some(path),
        };
        analyze(None, &source, true).await.expect("file analysis");
    }

    #[tokio::test]
    async fn test_analyze_rejects_binary_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("template.html");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).expect("write bytes");
        let source = AnalyzeSource {
            action: None,
            file: Some(path),
        };
        let err = analyze(None, &source, false).await.expect_err("not utf-8");
        assert!(format!("{err:#}").contains("UTF-8"));
    }
}
