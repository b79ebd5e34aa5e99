use serde::{Deserialize, Serialize};

/// Lifecycle state of a playbook execution task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Running,
    Success,
    Error,
}

impl TaskStatus {
    /// A task stops changing once it has left `Running`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Running)
    }
}

/// Status and result of a playbook execution task.
///
/// `data` carries the runner's JSON output once the task succeeds;
/// `error` carries the failure detail when it does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub status: TaskStatus,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Handle returned when a run is queued; poll the task endpoint with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskHandle {
    pub task_id: String,
}
