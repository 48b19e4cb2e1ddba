//! Flowctl HTTP clients
//!
//! Typed clients for the two external surfaces the consoles depend on:
//!
//! - [`ManagementClient`]: the process/job management REST surface (abort,
//!   skip, retry, node operations, job cancel/reschedule, bulk runs).
//!   Endpoints are built from each item's own service URL, so one client
//!   serves any number of runtime services.
//! - [`DataIndexClient`]: the read-only data-index query surface that lists
//!   process instances, child hierarchies and jobs.
//!
//! # Example
//!
//! ```no_run
//! use flowctl_client::{BulkOperation, DataIndexClient, ManagementClient};
//!
//! #[tokio::main]
//! async fn main() -> flowctl_client::Result<()> {
//!     let index = DataIndexClient::new("http://localhost:4000");
//!     let instances = index.process_instances(&[]).await?;
//!
//!     let management = ManagementClient::new();
//!     let input = instances
//!         .into_iter()
//!         .map(|instance| (instance.id.clone(), instance))
//!         .collect();
//!     let result = management
//!         .perform_bulk_action(input, BulkOperation::Retry)
//!         .await;
//!
//!     println!("{} retried, {} failed", result.success_items.len(), result.failed_items.len());
//!     Ok(())
//! }
//! ```

pub mod bulk;
mod data_index;
pub mod error;
mod instances;
mod jobs;

// Re-export commonly used types
pub use bulk::BulkOperation;
pub use data_index::DataIndexClient;
pub use error::{ClientError, Result};
pub use flowctl_core::dto::bulk::BulkActionResult;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// Client for the process/job management REST surface
///
/// Methods are organized into logical groups across this crate:
/// - Process instance operations (abort, skip, retry, node ops, variables)
/// - Job operations (cancel, reschedule)
/// - Bulk runs over selected instances or jobs
#[derive(Debug, Clone, Default)]
pub struct ManagementClient {
    /// HTTP client instance
    client: Client,
}

impl ManagementClient {
    /// Create a new management client
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a management client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use flowctl_client::ManagementClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ManagementClient::with_client(http_client);
    /// ```
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
