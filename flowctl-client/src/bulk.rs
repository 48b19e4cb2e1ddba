//! Bulk action executor
//!
//! Applies one management operation to a set of selected items, one item at
//! a time, and partitions the outcome into succeeded and failed sets.
//! Sequential execution is a policy, not a limitation: it bounds the load on
//! the runtime services and keeps result order equal to input order.
//!
//! The executor never fails as a whole; each item's error is captured on the
//! item itself and reported through the failed set.

use flowctl_core::domain::job::Job;
use flowctl_core::domain::process::ProcessInstance;
use flowctl_core::dto::bulk::BulkActionResult;
use indexmap::IndexMap;

use crate::ManagementClient;

/// Management operation applied by a bulk run over process instances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOperation {
    Abort,
    Skip,
    Retry,
}

impl ManagementClient {
    /// Apply `operation` to every instance in `instances`, in insertion order.
    ///
    /// A failed item never stops the remaining items from being processed.
    /// No retries, no backoff and no timeout beyond the transport's own; a
    /// transport failure simply becomes that item's error annotation.
    pub async fn perform_bulk_action(
        &self,
        instances: IndexMap<String, ProcessInstance>,
        operation: BulkOperation,
    ) -> BulkActionResult<ProcessInstance> {
        let mut result = BulkActionResult::new();

        for (id, mut instance) in instances {
            let outcome = match operation {
                BulkOperation::Abort => self.abort_instance(&mut instance).await,
                BulkOperation::Skip => self.skip_instance(&instance).await,
                BulkOperation::Retry => self.retry_instance(&instance).await,
            };
            match outcome {
                Ok(()) => result.success_items.push(instance),
                Err(error) => {
                    tracing::warn!("bulk {:?} failed for instance {}: {}", operation, id, error);
                    instance.error_message = Some(error.to_string());
                    result.failed_items.insert(id, instance);
                }
            }
        }

        tracing::info!(
            "bulk {:?} finished: {} succeeded, {} failed",
            operation,
            result.success_items.len(),
            result.failed_items.len()
        );

        result
    }

    /// Cancel every job in `jobs`, in insertion order.
    ///
    /// Same partitioning contract as [`Self::perform_bulk_action`].
    pub async fn perform_bulk_cancel(&self, jobs: IndexMap<String, Job>) -> BulkActionResult<Job> {
        let mut result = BulkActionResult::new();

        for (id, mut job) in jobs {
            match self.cancel_job(&job).await {
                Ok(()) => result.success_items.push(job),
                Err(error) => {
                    tracing::warn!("bulk cancel failed for job {}: {}", id, error);
                    job.error_message = Some(error.to_string());
                    result.failed_items.insert(id, job);
                }
            }
        }

        tracing::info!(
            "bulk cancel finished: {} succeeded, {} failed",
            result.success_items.len(),
            result.failed_items.len()
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowctl_core::domain::job::JobStatus;
    use flowctl_core::domain::process::ProcessInstanceState;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn instance(id: &str, service_url: &str) -> ProcessInstance {
        ProcessInstance {
            id: id.to_string(),
            process_id: "trav".to_string(),
            process_name: None,
            state: ProcessInstanceState::Active,
            parent_process_instance_id: None,
            root_process_instance_id: None,
            service_url: Some(service_url.to_string()),
            endpoint: None,
            start: None,
            end: None,
            addons: vec![],
            error_message: None,
        }
    }

    fn job(id: &str, endpoint: &str) -> Job {
        Job {
            id: id.to_string(),
            process_id: "travels".to_string(),
            process_instance_id: "pi-1".to_string(),
            status: JobStatus::Scheduled,
            priority: 0,
            retries: 0,
            endpoint: endpoint.to_string(),
            expiration_time: None,
            repeat_interval: None,
            repeat_limit: None,
            last_update: None,
            error_message: None,
        }
    }

    #[tokio::test]
    async fn test_bulk_abort_success_marks_instances_aborted() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/management/processes/trav/instances/p1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = ManagementClient::new();
        let mut input = IndexMap::new();
        input.insert("p1".to_string(), instance("p1", &server.uri()));

        let result = client.perform_bulk_action(input, BulkOperation::Abort).await;

        assert_eq!(result.success_items.len(), 1);
        assert!(result.failed_items.is_empty());
        assert_eq!(result.success_items[0].state, ProcessInstanceState::Aborted);
        assert!(result.success_items[0].error_message.is_none());
    }

    #[tokio::test]
    async fn test_bulk_retry_failure_is_captured_in_band() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/management/processes/trav/instances/p1/retrigger"))
            .respond_with(ResponseTemplate::new(403).set_body_string("403 error"))
            .mount(&server)
            .await;

        let client = ManagementClient::new();
        let mut input = IndexMap::new();
        input.insert("p1".to_string(), instance("p1", &server.uri()));

        let result = client.perform_bulk_action(input, BulkOperation::Retry).await;

        assert!(result.success_items.is_empty());
        let failed = result.failed_items.get("p1").unwrap();
        let message = failed.error_message.as_deref().unwrap();
        assert!(message.contains("403"), "unexpected message: {message}");
    }

    #[tokio::test]
    async fn test_mixed_batch_partitions_without_short_circuiting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/management/processes/trav/instances/p1/skip"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/management/processes/trav/instances/p2/skip"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ManagementClient::new();
        let mut input = IndexMap::new();
        input.insert("p1".to_string(), instance("p1", &server.uri()));
        input.insert("p2".to_string(), instance("p2", &server.uri()));

        let result = client.perform_bulk_action(input, BulkOperation::Skip).await;

        assert_eq!(result.len(), 2);
        assert_eq!(result.success_items.len(), 1);
        assert_eq!(result.success_items[0].id, "p1");
        assert_eq!(result.failed_items.len(), 1);
        assert!(result.failed_items.contains_key("p2"));
    }

    #[tokio::test]
    async fn test_failure_before_success_does_not_block_later_items() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/management/processes/trav/instances/p1/retrigger"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/management/processes/trav/instances/p2/retrigger"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = ManagementClient::new();
        let mut input = IndexMap::new();
        input.insert("p1".to_string(), instance("p1", &server.uri()));
        input.insert("p2".to_string(), instance("p2", &server.uri()));

        let result = client.perform_bulk_action(input, BulkOperation::Retry).await;

        assert!(result.failed_items.contains_key("p1"));
        assert_eq!(result.success_items[0].id, "p2");
    }

    #[tokio::test]
    async fn test_instance_without_service_url_fails_in_band() {
        let client = ManagementClient::new();
        let mut broken = instance("p1", "");
        broken.service_url = None;
        let mut input = IndexMap::new();
        input.insert("p1".to_string(), broken);

        let result = client.perform_bulk_action(input, BulkOperation::Skip).await;

        let failed = result.failed_items.get("p1").unwrap();
        assert!(failed.error_message.as_deref().unwrap().contains("service URL"));
    }

    #[tokio::test]
    async fn test_bulk_cancel_partitions_jobs() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/jobs/j1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/jobs/j2"))
            .respond_with(ResponseTemplate::new(404).set_body_string("unknown job"))
            .mount(&server)
            .await;

        let client = ManagementClient::new();
        let endpoint = format!("{}/jobs", server.uri());
        let mut input = IndexMap::new();
        input.insert("j1".to_string(), job("j1", &endpoint));
        input.insert("j2".to_string(), job("j2", &endpoint));

        let result = client.perform_bulk_cancel(input).await;

        assert_eq!(result.success_items.len(), 1);
        assert_eq!(result.success_items[0].id, "j1");
        let failed = result.failed_items.get("j2").unwrap();
        assert!(failed.error_message.as_deref().unwrap().contains("404"));
    }
}
