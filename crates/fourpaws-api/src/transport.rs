// Transport configuration for building the shared reqwest::Client.
//
// One client per ApiClient instance; connection pooling and TLS live
// here so endpoint code never touches builder details.

use std::time::Duration;

use url::Url;

const USER_AGENT: &str = concat!("fourpaws/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the FourPaws backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend origin, e.g. `https://fourpaws-back.onrender.com`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(crate::error::Error::Transport)
    }
}
