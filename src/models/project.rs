use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project: a Git-backed bundle of playbooks registered with the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub git_url: Option<String>,
    #[serde(default)]
    pub git_branch: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Source repository for display, e.g. "https://... (main)"
    pub fn display_source(&self) -> String {
        match (&self.git_url, &self.git_branch) {
            (Some(url), Some(branch)) => format!("{} ({})", url, branch),
            (Some(url), None) => url.clone(),
            _ => "No repository".to_string(),
        }
    }
}

/// Payload for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
}

/// Partial update payload; absent fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
}

/// Outcome of syncing a project with its Git repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSync {
    pub status: String,
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_with_mongo_id() {
        let json = r#"{"_id": "665f1a2b9c", "name": "site", "git_url": "https://git.example.com/site.git"}"#;
        let project: Project = serde_json::from_str(json).expect("Failed to parse project JSON");
        assert_eq!(project.id, "665f1a2b9c");
        assert_eq!(project.name, "site");
        assert!(project.description.is_none());
        assert_eq!(project.display_source(), "https://git.example.com/site.git");
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = ProjectUpdate {
            name: Some("renamed".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).expect("Failed to serialize update");
        assert_eq!(json, r#"{"name":"renamed"}"#);
    }
}
