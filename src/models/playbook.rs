use serde::{Deserialize, Serialize};

/// Request body for triggering a playbook run.
///
/// Both fields are optional; the backend falls back to the playbook's
/// default inventory and variables when they are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunPlaybookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_vars: Option<serde_json::Map<String, serde_json::Value>>,
}
