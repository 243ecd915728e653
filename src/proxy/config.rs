//! Proxy configuration, read from the environment.

use crate::error::ConfigError;
use crate::network::{COINGECKO_API_URL, DEFAULT_BIND_ADDR, UPSTREAM_TIMEOUT_SECS};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

pub const ENV_API_KEY: &str = "COINGECKO_API_KEY";
/// Name the key had when it lived in the browser bundle; still honoured.
pub const ENV_API_KEY_LEGACY: &str = "NEXT_PUBLIC_COINGECKO_API_KEY";
pub const ENV_API_URL: &str = "COINGECKO_API_URL";
pub const ENV_BIND: &str = "CRYPTODASH_BIND";
pub const ENV_UPSTREAM_TIMEOUT: &str = "CRYPTODASH_UPSTREAM_TIMEOUT_SECS";

#[derive(Clone, PartialEq)]
pub struct ProxyConfig {
    /// CoinGecko demo key. `None` makes every data route fail with 500.
    pub api_key: Option<String>,
    pub upstream_url: String,
    pub bind_addr: SocketAddr,
    pub upstream_timeout: Duration,
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("upstream_url", &self.upstream_url)
            .field("bind_addr", &self.bind_addr)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            upstream_url: COINGECKO_API_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            upstream_timeout: Duration::from_secs(UPSTREAM_TIMEOUT_SECS),
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = var(ENV_API_KEY).or_else(|| var(ENV_API_KEY_LEGACY));

        let upstream_url = var(ENV_API_URL)
            .unwrap_or_else(|| COINGECKO_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let bind = var(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBindAddr {
                value: bind.clone(),
                reason: e.to_string(),
            })?;

        let upstream_timeout = match var(ENV_UPSTREAM_TIMEOUT) {
            None => Duration::from_secs(UPSTREAM_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        Ok(Self {
            api_key,
            upstream_url,
            bind_addr,
            upstream_timeout,
        })
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_upstream_url(mut self, url: &str) -> Self {
        self.upstream_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }
}
