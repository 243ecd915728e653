//! High-level client — `DashboardClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the accessor methods.

use crate::domain::chart::client::Charts;
use crate::domain::coin::client::Coins;
use crate::error::SdkError;
use crate::http::{DashboardHttp, RetryPolicy};
use crate::network::{CLIENT_TIMEOUT_SECS, DEFAULT_PROXY_URL};

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::chart::client::Charts as ChartsClient;
pub use crate::domain::coin::client::Coins as CoinsClient;

/// The primary entry point for fetching dashboard data from the proxy.
///
/// Provides nested sub-client accessors for each domain:
/// `client.coins()`, `client.charts()`.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    pub(crate) http: DashboardHttp,
}

impl DashboardClient {
    pub fn builder() -> DashboardClientBuilder {
        DashboardClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn coins(&self) -> Coins<'_> {
        Coins {
            client: self,
            cancel: None,
        }
    }

    pub fn charts(&self) -> Charts<'_> {
        Charts {
            client: self,
            cancel: None,
        }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct DashboardClientBuilder {
    base_url: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl Default for DashboardClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROXY_URL.to_string(),
            timeout: Duration::from_secs(CLIENT_TIMEOUT_SECS),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl DashboardClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Per-attempt timeout for calls to the proxy.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn build(self) -> Result<DashboardClient, SdkError> {
        Ok(DashboardClient {
            http: DashboardHttp::new(&self.base_url, self.timeout, self.retry_policy)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = DashboardClient::builder().build().unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert!(matches!(
            client.http.retry_policy(),
            RetryPolicy::Classified
        ));
    }

    #[test]
    fn test_builder_overrides() {
        let client = DashboardClient::builder()
            .base_url("http://127.0.0.1:8080/")
            .timeout(Duration::from_secs(5))
            .retry_policy(RetryPolicy::Uniform)
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
        assert!(matches!(client.http.retry_policy(), RetryPolicy::Uniform));
    }
}
