//! Data-index query client
//!
//! The data index is a read-only GraphQL surface; this client issues the
//! handful of queries the consoles need and unwraps the envelopes into
//! domain types.

use flowctl_core::domain::job::{Job, JobStatus};
use flowctl_core::domain::process::{ProcessInstance, ProcessInstanceState};
use flowctl_core::dto::query::{JobData, ProcessInstanceData, QueryRequest, QueryResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};

const INSTANCE_FIELDS: &str = "id processId processName state parentProcessInstanceId \
     rootProcessInstanceId serviceUrl endpoint start end addons";
const JOB_FIELDS: &str = "id processId processInstanceId status priority retries endpoint \
     expirationTime repeatInterval repeatLimit lastUpdate";

/// Client for the data-index GraphQL endpoint
#[derive(Debug, Clone)]
pub struct DataIndexClient {
    /// Base URL of the data index (e.g., "http://localhost:4000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl DataIndexClient {
    /// Create a new data-index client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a data-index client with a custom HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the data index
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Process Instances
    // =============================================================================

    /// List top-level process instances, optionally filtered by state.
    pub async fn process_instances(
        &self,
        states: &[ProcessInstanceState],
    ) -> Result<Vec<ProcessInstance>> {
        let filter = if states.is_empty() {
            "parentProcessInstanceId: { isNull: true }".to_string()
        } else {
            let names = states
                .iter()
                .map(|state| state.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("parentProcessInstanceId: {{ isNull: true }}, state: {{ in: [{names}] }}")
        };
        let query = format!(
            "{{ ProcessInstances(where: {{ {filter} }}) {{ {INSTANCE_FIELDS} }} }}"
        );

        let data: ProcessInstanceData = self.query(query).await?;
        Ok(data.process_instances)
    }

    /// Look up a single process instance by id.
    pub async fn process_instance(&self, id: &str) -> Result<ProcessInstance> {
        let query = format!(
            "{{ ProcessInstances(where: {{ id: {{ equal: \"{id}\" }} }}) {{ {INSTANCE_FIELDS} }} }}"
        );

        let data: ProcessInstanceData = self.query(query).await?;
        data.process_instances
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(format!("process instance {id}")))
    }

    /// Fetch the children of a process instance.
    ///
    /// The result feeds straight into the selection tree's `load_children`.
    pub async fn child_instances(
        &self,
        root_process_instance_id: &str,
    ) -> Result<Vec<ProcessInstance>> {
        let query = format!(
            "{{ ProcessInstances(where: {{ rootProcessInstanceId: {{ equal: \
             \"{root_process_instance_id}\" }} }}) {{ {INSTANCE_FIELDS} }} }}"
        );

        let data: ProcessInstanceData = self.query(query).await?;
        Ok(data.process_instances)
    }

    // =============================================================================
    // Jobs
    // =============================================================================

    /// List jobs, optionally filtered by status.
    pub async fn jobs(&self, statuses: &[JobStatus]) -> Result<Vec<Job>> {
        let query = if statuses.is_empty() {
            format!("{{ Jobs {{ {JOB_FIELDS} }} }}")
        } else {
            let names = statuses
                .iter()
                .map(|status| status.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{ Jobs(where: {{ status: {{ in: [{names}] }} }}) {{ {JOB_FIELDS} }} }}")
        };

        let data: JobData = self.query(query).await?;
        Ok(data.jobs)
    }

    /// Look up a single job by id.
    pub async fn job(&self, id: &str) -> Result<Job> {
        let query =
            format!("{{ Jobs(where: {{ id: {{ equal: \"{id}\" }} }}) {{ {JOB_FIELDS} }} }}");

        let data: JobData = self.query(query).await?;
        data.jobs
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(format!("job {id}")))
    }

    // =============================================================================
    // Query Plumbing
    // =============================================================================

    /// Post a GraphQL query and unwrap the response envelope.
    ///
    /// A GraphQL-level error entry is surfaced as an `ApiError` even when
    /// the HTTP status is 200.
    async fn query<T: DeserializeOwned>(&self, query: String) -> Result<T> {
        let url = format!("{}/graphql", self.base_url);
        tracing::debug!("data-index query: {}", query);
        let request = QueryRequest {
            query,
            variables: None,
        };
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let envelope: QueryResponse<T> = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse query response: {}", e))
        })?;

        if let Some(error) = envelope.errors.first() {
            return Err(ClientError::api_error(status.as_u16(), error.message.clone()));
        }

        envelope
            .data
            .ok_or_else(|| ClientError::ParseError("query response carried no data".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = DataIndexClient::new("http://localhost:4000/");
        assert_eq!(client.base_url(), "http://localhost:4000");
    }

    #[tokio::test]
    async fn test_child_instances_filters_by_root_id() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "data": {
                "ProcessInstances": [{
                    "id": "child-1",
                    "processId": "flight",
                    "state": "COMPLETED",
                    "parentProcessInstanceId": "root-1",
                    "rootProcessInstanceId": "root-1",
                    "serviceUrl": "http://localhost:8080"
                }]
            }
        });
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("rootProcessInstanceId"))
            .and(body_string_contains("root-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = DataIndexClient::new(server.uri());
        let children = client.child_instances("root-1").await.unwrap();

        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, "child-1");
        assert_eq!(
            children[0].parent_process_instance_id.as_deref(),
            Some("root-1")
        );
    }

    #[tokio::test]
    async fn test_graphql_errors_map_to_api_errors() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "errors": [{ "message": "Validation error" }]
        });
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = DataIndexClient::new(server.uri());
        let err = client.jobs(&[]).await.unwrap_err();

        match err {
            ClientError::ApiError { message, .. } => assert_eq!(message, "Validation error"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_instance_is_not_found() {
        let server = MockServer::start().await;
        let body = serde_json::json!({ "data": { "ProcessInstances": [] } });
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = DataIndexClient::new(server.uri());
        let err = client.process_instance("nope").await.unwrap_err();

        assert!(err.is_not_found());
    }
}
