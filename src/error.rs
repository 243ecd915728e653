//! Unified error types.
//!
//! `UpstreamError` is the proxy-side taxonomy of CoinGecko failures. The proxy
//! turns it into an [`ErrorEnvelope`] with a matching HTTP status, and the client
//! turns that envelope back into an [`HttpError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Watchlist error: {0}")]
    Watchlist(#[from] WatchlistError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// The user-facing bucket this error falls into.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SdkError::Http(e) => e.category(),
            other => ErrorCategory::from_message(&other.to_string()),
        }
    }

    /// The message a presentation layer shows next to its retry button.
    pub fn user_message(&self) -> &'static str {
        self.category().user_message()
    }
}

/// Client-side errors from calling the proxy.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Proxy error {status}: {message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl HttpError {
    /// Build the error for a non-2xx proxy response.
    pub fn from_status(status: u16, envelope: Option<ErrorEnvelope>) -> Self {
        let (message, code) = match envelope {
            Some(env) => (env.error, env.code),
            None => (format!("HTTP {}", status), None),
        };
        match (status, code) {
            (_, Some(ErrorCode::Timeout)) | (408, None) => HttpError::Timeout(message),
            (_, Some(ErrorCode::RateLimited)) | (429, None) => HttpError::RateLimited(message),
            _ => HttpError::Api {
                status,
                code,
                message,
            },
        }
    }

    /// Whether retrying the same call can succeed.
    ///
    /// Configuration errors, client errors and locally detected shape
    /// mismatches are permanent; everything transport-related is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::Reqwest(e) => {
                e.is_connect() || e.is_timeout() || e.is_request() || e.is_body() || e.is_decode()
            }
            HttpError::Timeout(_) | HttpError::RateLimited(_) => true,
            HttpError::Api { status, code, .. } => match code {
                Some(ErrorCode::Configuration) | Some(ErrorCode::BadRequest) => false,
                Some(ErrorCode::MalformedResponse) | Some(ErrorCode::Network) => true,
                _ => *status >= 500 || *status == 408 || *status == 429,
            },
            HttpError::InvalidResponse(_) => false,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            HttpError::Timeout(_) => ErrorCategory::Timeout,
            HttpError::RateLimited(_) => ErrorCategory::RateLimit,
            HttpError::Reqwest(e) if e.is_timeout() => ErrorCategory::Timeout,
            other => ErrorCategory::from_message(&other.to_string()),
        }
    }
}

// ─── Upstream (proxy side) ───────────────────────────────────────────────────

/// Classified failure of a CoinGecko call, as seen by the proxy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    #[error("API key is missing. Please set COINGECKO_API_KEY environment variable.")]
    Configuration,

    #[error("Request timeout - CoinGecko API is taking too long to respond.")]
    Timeout,

    #[error("CoinGecko API returned an unexpected response. Check your API key or try again later.")]
    MalformedResponse { status: u16 },

    #[error("Rate limit exceeded. Please wait a moment and try again.")]
    RateLimited,

    #[error("CoinGecko API error: {status} - {reason}")]
    Upstream { status: u16, reason: String },

    #[error("Failed to fetch cryptocurrency data.")]
    Network(String),

    #[error("{0}")]
    BadRequest(String),
}

impl UpstreamError {
    /// HTTP status the proxy answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            UpstreamError::Configuration => 500,
            UpstreamError::Timeout => 408,
            UpstreamError::MalformedResponse { .. } => 500,
            UpstreamError::RateLimited => 429,
            UpstreamError::Upstream { status, .. } => *status,
            UpstreamError::Network(_) => 500,
            UpstreamError::BadRequest(_) => 400,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            UpstreamError::Configuration => ErrorCode::Configuration,
            UpstreamError::Timeout => ErrorCode::Timeout,
            UpstreamError::MalformedResponse { .. } => ErrorCode::MalformedResponse,
            UpstreamError::RateLimited => ErrorCode::RateLimited,
            UpstreamError::Upstream { .. } => ErrorCode::Upstream,
            UpstreamError::Network(_) => ErrorCode::Network,
            UpstreamError::BadRequest(_) => ErrorCode::BadRequest,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: self.to_string(),
            code: Some(self.code()),
        }
    }
}

/// Machine-readable class carried next to the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Configuration,
    Timeout,
    MalformedResponse,
    RateLimited,
    Upstream,
    Network,
    BadRequest,
    #[serde(other)]
    Unknown,
}

/// JSON error body returned by every proxy route: `{"error": "...", "code": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

// ─── Proxy configuration ─────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid bind address {value:?}: {reason}")]
    InvalidBindAddr { value: String, reason: String },

    #[error("Invalid upstream timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
}

// ─── User-facing categories ──────────────────────────────────────────────────

/// The small fixed vocabulary a presentation layer switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Timeout,
    RateLimit,
    Generic,
}

impl ErrorCategory {
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("timeout") || lower.contains("timed out") {
            ErrorCategory::Timeout
        } else if lower.contains("rate limit") {
            ErrorCategory::RateLimit
        } else {
            ErrorCategory::Generic
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorCategory::Timeout => "Request timed out. Please try again.",
            ErrorCategory::RateLimit => "Rate limit exceeded. Please wait a moment and try again.",
            ErrorCategory::Generic => "Failed to load cryptocurrency data. Please try again.",
        }
    }
}

// ─── Watchlist / storage ─────────────────────────────────────────────────────

/// Watchlist container errors.
#[derive(Error, Debug)]
pub enum WatchlistError {
    #[error("Watchlist is not loaded yet")]
    NotLoaded,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Key/value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid stored value: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}
