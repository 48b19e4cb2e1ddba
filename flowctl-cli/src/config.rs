//! Configuration module
//!
//! Handles CLI configuration including the data-index URL and other settings.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the data-index service
    pub data_index_url: String,
}
