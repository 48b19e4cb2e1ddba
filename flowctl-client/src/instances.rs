//! Process instance management endpoints

use flowctl_core::domain::process::{NodeInstance, ProcessInstance, ProcessInstanceState};

use crate::ManagementClient;
use crate::error::{ClientError, Result};

impl ManagementClient {
    // =============================================================================
    // Instance Operations
    // =============================================================================

    /// Abort a process instance.
    ///
    /// On success the local `state` field is set to `Aborted` so views can
    /// show the terminal state before the next data-index refresh catches up.
    pub async fn abort_instance(&self, instance: &mut ProcessInstance) -> Result<()> {
        let url = format!(
            "{}/management/processes/{}/instances/{}",
            self.instance_base(instance)?,
            instance.process_id,
            instance.id
        );
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await?;
        instance.state = ProcessInstanceState::Aborted;
        Ok(())
    }

    /// Skip the failed node of a process instance in error state.
    pub async fn skip_instance(&self, instance: &ProcessInstance) -> Result<()> {
        let url = format!(
            "{}/management/processes/{}/instances/{}/skip",
            self.instance_base(instance)?,
            instance.process_id,
            instance.id
        );
        let response = self.client.post(&url).send().await?;

        self.handle_empty_response(response).await
    }

    /// Re-trigger the failed node of a process instance in error state.
    pub async fn retry_instance(&self, instance: &ProcessInstance) -> Result<()> {
        let url = format!(
            "{}/management/processes/{}/instances/{}/retrigger",
            self.instance_base(instance)?,
            instance.process_id,
            instance.id
        );
        let response = self.client.post(&url).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Node Instance Operations
    // =============================================================================

    /// Re-trigger a single node instance within a process instance.
    pub async fn retrigger_node(
        &self,
        instance: &ProcessInstance,
        node: &NodeInstance,
    ) -> Result<()> {
        let url = format!(
            "{}/management/processes/{}/instances/{}/nodeInstances/{}",
            self.instance_base(instance)?,
            instance.process_id,
            instance.id,
            node.id
        );
        let response = self.client.post(&url).send().await?;

        self.handle_empty_response(response).await
    }

    /// Cancel a single node instance within a process instance.
    pub async fn cancel_node(&self, instance: &ProcessInstance, node: &NodeInstance) -> Result<()> {
        let url = format!(
            "{}/management/processes/{}/instances/{}/nodeInstances/{}",
            self.instance_base(instance)?,
            instance.process_id,
            instance.id,
            node.id
        );
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Variables
    // =============================================================================

    /// Replace the process variables of an instance.
    ///
    /// The runtime exposes variables at `{endpoint}/{id}`, where `endpoint`
    /// already includes the process path. Returns the updated variables as
    /// reported by the runtime.
    pub async fn update_variables(
        &self,
        instance: &ProcessInstance,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let endpoint = instance.endpoint.as_deref().ok_or_else(|| {
            ClientError::InvalidRequest(format!(
                "process instance {} carries no endpoint",
                instance.id
            ))
        })?;
        let url = format!("{}/{}", endpoint.trim_end_matches('/'), instance.id);
        let response = self.client.put(&url).json(&variables).send().await?;

        self.handle_response(response).await
    }

    fn instance_base<'a>(&self, instance: &'a ProcessInstance) -> Result<&'a str> {
        instance
            .service_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!(
                    "process instance {} carries no service URL",
                    instance.id
                ))
            })
    }
}
