//! Process instance domain types

use serde::{Deserialize, Serialize};

/// A single execution of a process definition, possibly nested under a
/// parent instance.
///
/// Field names follow the data-index `ProcessInstances` query shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstance {
    pub id: String,
    pub process_id: String,
    #[serde(default)]
    pub process_name: Option<String>,
    pub state: ProcessInstanceState,
    /// Direct parent, `None` for top-level instances.
    #[serde(default)]
    pub parent_process_instance_id: Option<String>,
    /// Top-level ancestor, `None` for top-level instances.
    #[serde(default)]
    pub root_process_instance_id: Option<String>,
    /// Base URL of the runtime service owning this instance; management
    /// calls are built against it.
    #[serde(default)]
    pub service_url: Option<String>,
    /// Runtime endpoint of the process itself (service URL plus process
    /// path), used for variable updates.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub start: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub end: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub addons: Vec<String>,
    /// Client-local annotation set after a failed management call.
    /// Never sent back to the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Process instance lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessInstanceState {
    Active,
    Completed,
    Aborted,
    Suspended,
    Error,
}

impl ProcessInstanceState {
    /// Wire name used by the data-index GraphQL schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessInstanceState::Active => "ACTIVE",
            ProcessInstanceState::Completed => "COMPLETED",
            ProcessInstanceState::Aborted => "ABORTED",
            ProcessInstanceState::Suspended => "SUSPENDED",
            ProcessInstanceState::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for ProcessInstanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node instance inside a process instance (task, gateway, timer).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInstance {
    pub id: String,
    pub node_id: String,
    pub name: String,
    pub definition_id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub enter: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub exit: Option<chrono::DateTime<chrono::Utc>>,
}
