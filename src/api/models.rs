//! Typed views over Klaviyo JSON:API resources.
//!
//! Only the fields the application displays are read; anything missing falls
//! back to a placeholder instead of failing.

use serde::Serialize;
use serde_json::Value;

use crate::config::{UNKNOWN_FIELD, UNNAMED_EMAIL, UNNAMED_FLOW};

/// One flow as listed by the flow browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created: String,
    pub updated: String,
    pub trigger_type: String,
}

/// One action (step) of a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowAction {
    pub id: Option<String>,
    pub name: String,
    pub action_type: String,
    pub status: String,
    pub created: String,
    pub updated: String,
}

/// Resources of a response: the `data` array of a document, or a bare array.
fn resources(response: &Value) -> &[Value] {
    let list = match response {
        Value::Object(object) => object.get("data").and_then(Value::as_array),
        Value::Array(array) => Some(array),
        _ => None,
    };
    list.map(Vec::as_slice).unwrap_or_default()
}

/// Ids may come back as strings or numbers.
fn resource_id(resource: &Value) -> Option<String> {
    match resource.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn attribute(resource: &Value, key: &str, default: &str) -> String {
    match resource.get("attributes").and_then(|attrs| attrs.get(key)) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Reads the flows of a flow listing; non-flow resources and flows without an
/// id are dropped.
pub fn parse_flows(response: &Value) -> Vec<FlowSummary> {
    resources(response)
        .iter()
        .filter(|resource| resource.get("type").and_then(Value::as_str) == Some("flow"))
        .filter_map(|resource| {
            let Some(id) = resource_id(resource) else {
                log::debug!("Skipping flow without id");
                return None;
            };
            Some(FlowSummary {
                id,
                name: attribute(resource, "name", UNNAMED_FLOW),
                status: attribute(resource, "status", UNKNOWN_FIELD),
                created: attribute(resource, "created", UNKNOWN_FIELD),
                updated: attribute(resource, "updated", UNKNOWN_FIELD),
                trigger_type: attribute(resource, "trigger_type", UNKNOWN_FIELD),
            })
        })
        .collect()
}

/// Reads the actions of a flow-actions listing.
pub fn parse_flow_actions(response: &Value) -> Vec<FlowAction> {
    resources(response)
        .iter()
        .filter(|resource| resource.is_object())
        .map(|resource| FlowAction {
            id: resource_id(resource),
            name: attribute(resource, "name", UNNAMED_EMAIL),
            action_type: attribute(resource, "action_type", UNKNOWN_FIELD),
            status: attribute(resource, "status", UNKNOWN_FIELD),
            created: attribute(resource, "created", UNKNOWN_FIELD),
            updated: attribute(resource, "updated", UNKNOWN_FIELD),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_flows_filters_and_defaults() {
        let response = json!({"data": [
            {"type": "flow", "id": "F1", "attributes": {"name": "Welcome", "status": "live",
                "created": "2024-01-01", "updated": "2024-02-01", "trigger_type": "List"}},
            {"type": "flow", "id": "F2", "attributes": {}},
            {"type": "campaign", "id": "C1", "attributes": {"name": "Not a flow"}},
            {"type": "flow", "attributes": {"name": "No id"}}
        ]});
        let flows = parse_flows(&response);
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].name, "Welcome");
        assert_eq!(flows[0].trigger_type, "List");
        assert_eq!(flows[1].id, "F2");
        assert_eq!(flows[1].name, "Unnamed Flow");
        assert_eq!(flows[1].status, "Unknown");
    }

    #[test]
    fn test_parse_flows_without_data() {
        assert!(parse_flows(&json!({"errors": []})).is_empty());
        assert!(parse_flows(&json!("nope")).is_empty());
    }

    #[test]
    fn test_parse_flow_actions_document_and_array() {
        let action = json!({"id": "A1", "attributes": {"name": "Email #1", "action_type": "SEND_EMAIL"}});
        let from_document = parse_flow_actions(&json!({"data": [action.clone()]}));
        let from_array = parse_flow_actions(&json!([action]));
        assert_eq!(from_document, from_array);
        assert_eq!(from_document[0].id.as_deref(), Some("A1"));
        assert_eq!(from_document[0].action_type, "SEND_EMAIL");
        assert_eq!(from_document[0].status, "Unknown");
    }

    #[test]
    fn test_parse_flow_actions_missing_fields() {
        let actions = parse_flow_actions(&json!({"data": [{"attributes": {}}, {"id": 7}]}));
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].id, None);
        assert_eq!(actions[0].name, "Unnamed Email");
        assert_eq!(actions[1].id.as_deref(), Some("7"));
    }

    #[test]
    fn test_non_string_attribute_rendered_as_json() {
        let flows = parse_flows(&json!({"data": [
            {"type": "flow", "id": "F", "attributes": {"status": 3}}
        ]}));
        assert_eq!(flows[0].status, "3");
    }
}
