//! Client configuration.

use std::time::Duration;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API (e.g., "https://api.ledgerlink.com/api/v1").
    pub base_url: String,
    /// Timeout for individual requests.
    pub timeout: Duration,
    /// Delay between connection polls.
    pub poll_interval: Duration,
    /// Hard cap on pages followed by a paginated fetch.
    pub max_pages: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.ledgerlink.com/api/v1".to_string(),
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(3),
            max_pages: 100,
        }
    }
}
