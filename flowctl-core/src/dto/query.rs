//! Data-index query envelopes
//!
//! The data index exposes a GraphQL surface; these are the minimal
//! request/response shapes the client needs to unwrap results into
//! domain types.

use serde::{Deserialize, Serialize};

use crate::domain::job::Job;
use crate::domain::process::ProcessInstance;

/// A GraphQL request with optional variables.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<QueryError>,
}

/// A single GraphQL error entry.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryError {
    pub message: String,
}

/// `data` payload of `ProcessInstances` queries.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessInstanceData {
    #[serde(rename = "ProcessInstances")]
    pub process_instances: Vec<ProcessInstance>,
}

/// `data` payload of `Jobs` queries.
#[derive(Debug, Clone, Deserialize)]
pub struct JobData {
    #[serde(rename = "Jobs")]
    pub jobs: Vec<Job>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::process::ProcessInstanceState;

    #[test]
    fn test_process_instance_envelope_deserializes() {
        let body = serde_json::json!({
            "data": {
                "ProcessInstances": [{
                    "id": "8035b580-6ae4-4aa8-9ec0-e18e19809e0b",
                    "processId": "travels",
                    "processName": "Travels",
                    "state": "ACTIVE",
                    "parentProcessInstanceId": null,
                    "rootProcessInstanceId": null,
                    "serviceUrl": "http://localhost:4000",
                    "addons": ["process-management"]
                }]
            }
        });

        let envelope: QueryResponse<ProcessInstanceData> =
            serde_json::from_value(body).unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.process_instances.len(), 1);
        assert_eq!(data.process_instances[0].state, ProcessInstanceState::Active);
        assert!(data.process_instances[0].parent_process_instance_id.is_none());
    }

    #[test]
    fn test_error_envelope_deserializes_without_data() {
        let body = serde_json::json!({
            "errors": [{ "message": "Validation error" }]
        });

        let envelope: QueryResponse<JobData> = serde_json::from_value(body).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors[0].message, "Validation error");
    }
}
