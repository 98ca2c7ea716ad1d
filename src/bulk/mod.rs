//! Bulk template operations across flows.
//!
//! Content fetches for the emails of a flow run concurrently, bounded by the
//! configured concurrency, and results keep the order of the flow's actions.
//! A failed fetch of one email is logged, counted in `BulkStats` and skipped;
//! failing to list flows or actions aborts the whole operation.

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};

use crate::analysis::{analyze_structure, check_compatibility};
use crate::api::{ApiClient, FlowAction, FlowSummary};
use crate::error_handling::{update_error_stats, BulkStats, WarningType};
use crate::export::{ArchiveEntry, ReportRow};
use crate::extract::raw_html;
use crate::utils::sanitize::file_stem;

/// An email action together with its HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedEmail {
    pub action: FlowAction,
    pub html: String,
}

impl FetchedEmail {
    /// Archive file name of the email (`{name}.html`).
    pub fn file_name(&self) -> String {
        format!("{}.html", file_stem(&self.action.name))
    }
}

async fn fetch_email(
    client: &ApiClient,
    action_id: String,
    action: FlowAction,
    stats: &BulkStats,
) -> Option<FetchedEmail> {
    stats.record_attempt();
    let message = match client.get_email_content(&action_id).await {
        Ok(message) => message,
        Err(e) => {
            log::warn!("Skipping email '{}' ({}): {}", action.name, action_id, e);
            update_error_stats(stats, &e);
            return None;
        }
    };

    let html = raw_html(&message);
    if html.is_empty() {
        log::debug!("Email '{}' ({}) has no HTML", action.name, action_id);
        stats.increment_warning(WarningType::MissingHtml);
        return None;
    }

    stats.record_extracted();
    Some(FetchedEmail {
        html: html.to_string(),
        action,
    })
}

/// Fetches the HTML of every email in a flow, in action order.
///
/// Actions without an id or without HTML are skipped and counted as warnings.
///
/// # Errors
///
/// Returns an error if the flow's actions cannot be listed.
pub async fn fetch_flow_emails(
    client: &ApiClient,
    flow_id: &str,
    concurrency: usize,
    stats: &BulkStats,
) -> Result<Vec<FetchedEmail>> {
    let actions = client
        .list_flow_actions(flow_id)
        .await
        .with_context(|| format!("Failed to list actions of flow {flow_id}"))?;
    log::info!("Flow {} has {} actions", flow_id, actions.len());

    let with_ids: Vec<(String, FlowAction)> = actions
        .into_iter()
        .filter_map(|action| match action.id.clone() {
            Some(id) => Some((id, action)),
            None => {
                log::debug!("Action '{}' has no id", action.name);
                stats.increment_warning(WarningType::MissingActionId);
                None
            }
        })
        .collect();

    let emails = stream::iter(with_ids)
        .map(|(id, action)| fetch_email(client, id, action, stats))
        .buffered(concurrency.max(1))
        .filter_map(|email| async move { email })
        .collect::<Vec<_>>()
        .await;
    Ok(emails)
}

/// Archive entries (`{email}.html`) for every email of one flow.
pub async fn extract_flow_templates(
    client: &ApiClient,
    flow_id: &str,
    concurrency: usize,
    stats: &BulkStats,
) -> Result<Vec<ArchiveEntry>> {
    let emails = fetch_flow_emails(client, flow_id, concurrency, stats).await?;
    Ok(emails
        .into_iter()
        .map(|email| ArchiveEntry {
            path: email.file_name(),
            html: email.html,
        })
        .collect())
}

/// Archive entries (`{flow}/{email}.html`) for every email of every flow.
pub async fn extract_all_flow_templates(
    client: &ApiClient,
    concurrency: usize,
    stats: &BulkStats,
) -> Result<Vec<ArchiveEntry>> {
    let flows = client.list_flows().await.context("Failed to list flows")?;
    log::info!("Extracting templates from {} flows", flows.len());

    let mut entries = Vec::new();
    for flow in &flows {
        let folder = file_stem(&flow.name);
        let emails = fetch_flow_emails(client, &flow.id, concurrency, stats).await?;
        entries.extend(emails.into_iter().map(|email| ArchiveEntry {
            path: format!("{}/{}", folder, email.file_name()),
            html: email.html,
        }));
    }
    Ok(entries)
}

/// Picks the flows named by `ids`, in the order given.
///
/// An empty `ids` selects every flow.
///
/// # Errors
///
/// Returns an error naming the first id that is not among `flows`.
pub fn select_flows(flows: &[FlowSummary], ids: &[String]) -> Result<Vec<FlowSummary>> {
    if ids.is_empty() {
        return Ok(flows.to_vec());
    }
    ids.iter()
        .map(|id| {
            flows
                .iter()
                .find(|flow| &flow.id == id)
                .cloned()
                .with_context(|| format!("Unknown flow id: {id}"))
        })
        .collect()
}

/// Analyzes every email of the given flows, one `ReportRow` per email.
pub async fn generate_template_report(
    client: &ApiClient,
    flows: &[FlowSummary],
    concurrency: usize,
    stats: &BulkStats,
) -> Result<Vec<ReportRow>> {
    let mut rows = Vec::new();
    for flow in flows {
        let emails = fetch_flow_emails(client, &flow.id, concurrency, stats).await?;
        for email in emails {
            let structure = analyze_structure(&email.html);
            let compatibility = check_compatibility(&email.html);
            rows.push(ReportRow::new(
                flow.name.as_str(),
                email.action.name.as_str(),
                &structure,
                &compatibility,
            ));
        }
    }
    log::info!("Analyzed {} templates across {} flows", rows.len(), flows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(id: &str, name: &str) -> FlowSummary {
        FlowSummary {
            id: id.to_string(),
            name: name.to_string(),
            status: "live".to_string(),
            created: "Unknown".to_string(),
            updated: "Unknown".to_string(),
            trigger_type: "Unknown".to_string(),
        }
    }

    #[test]
    fn test_select_flows_keeps_requested_order() {
        let flows = vec![flow("a", "A"), flow("b", "B"), flow("c", "C")];
        let selected =
            select_flows(&flows, &["c".to_string(), "a".to_string()]).expect("known ids");
        let ids: Vec<&str> = selected.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_select_flows_empty_selects_all() {
        let flows = vec![flow("a", "A"), flow("b", "B")];
        assert_eq!(select_flows(&flows, &[]).expect("all flows"), flows);
    }

    #[test]
    fn test_select_flows_unknown_id() {
        let flows = vec![flow("a", "A")];
        let err = select_flows(&flows, &["zzz".to_string()]).expect_err("unknown id");
        assert!(err.to_string().contains("zzz"));
    }

    #[test]
    fn test_fetched_email_file_name() {
        let email = FetchedEmail {
            action: FlowAction {
                id: Some("1".to_string()),
                name: "Welcome Email 1".to_string(),
                action_type: "EMAIL".to_string(),
                status: "live".to_string(),
                created: "Unknown".to_string(),
                updated: "Unknown".to_string(),
            },
            html: "<p>x</p>".to_string(),
        };
        assert_eq!(email.file_name(), "Welcome_Email_1.html");
    }
}
