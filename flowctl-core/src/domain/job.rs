//! Job domain types

use serde::{Deserialize, Serialize};

/// A scheduled unit of work (e.g. a timer) tied to a process instance.
///
/// Fetched read-only from the data index; cancel and reschedule calls go
/// through the callback endpoint the job carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub process_id: String,
    pub process_instance_id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub retries: u32,
    /// Callback URL for cancel/reschedule calls.
    pub endpoint: String,
    #[serde(default)]
    pub expiration_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub repeat_interval: Option<i64>,
    #[serde(default)]
    pub repeat_limit: Option<i64>,
    #[serde(default)]
    pub last_update: Option<chrono::DateTime<chrono::Utc>>,
    /// Client-local annotation set after a failed cancel attempt.
    /// Never sent back to the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Scheduled,
    Executed,
    Canceled,
    Error,
    Retry,
}

impl JobStatus {
    /// Wire name used by the data-index GraphQL schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Scheduled => "SCHEDULED",
            JobStatus::Executed => "EXECUTED",
            JobStatus::Canceled => "CANCELED",
            JobStatus::Error => "ERROR",
            JobStatus::Retry => "RETRY",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
