//! Network constants.

/// CoinGecko v3 REST API base URL.
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying the CoinGecko demo API key.
pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Default proxy base URL the client talks to.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000";

/// Default proxy bind address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Upstream timeout applied by the proxy to every CoinGecko call, in seconds.
pub const UPSTREAM_TIMEOUT_SECS: u64 = 20;

/// Client-side timeout for calls to the proxy, in seconds.
pub const CLIENT_TIMEOUT_SECS: u64 = 30;

/// Largest page CoinGecko serves from `/coins/markets`.
pub const MAX_PER_PAGE: u32 = 250;
