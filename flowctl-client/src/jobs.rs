//! Job management endpoints

use flowctl_core::domain::job::Job;
use flowctl_core::dto::job::RescheduleRequest;

use crate::ManagementClient;
use crate::error::Result;

impl ManagementClient {
    /// Cancel a scheduled job.
    pub async fn cancel_job(&self, job: &Job) -> Result<()> {
        let url = format!("{}/{}", job.endpoint.trim_end_matches('/'), job.id);
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }

    /// Reschedule a job to a new expiration time.
    ///
    /// Returns the updated job as reported by the job service.
    pub async fn reschedule_job(&self, job: &Job, req: &RescheduleRequest) -> Result<Job> {
        let url = format!("{}/{}", job.endpoint.trim_end_matches('/'), job.id);
        let response = self.client.patch(&url).json(req).send().await?;

        self.handle_response(response).await
    }
}
