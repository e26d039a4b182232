// ── Platform configuration ──

use std::time::Duration;

use url::Url;

use crate::detail::RetryPolicy;

/// The hosted backend the published app talks to.
pub const DEFAULT_BACKEND_URL: &str = "https://fourpaws-back.onrender.com";

/// Connection and behavior settings for a [`Platform`].
///
/// [`Platform`]: crate::Platform
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Backend origin all requests are issued against.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry tuning for the community-detail load.
    pub retry: RetryPolicy,
}

impl PlatformConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend URL is valid"),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}
