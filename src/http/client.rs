//! Low-level HTTP client — `DashboardHttp`.
//!
//! One method per proxy route. Responses are validated for shape before they
//! are deserialized, and the whole attempt (request, status, validation) is
//! what the retry loop repeats.

use crate::domain::chart::ChartPoint;
use crate::domain::coin::wire::MarketsQuery;
use crate::domain::coin::{Coin, CoinDetail};
use crate::error::{ErrorEnvelope, HttpError, SdkError};
use crate::http::cancel::{cancellable, CancelToken};
use crate::http::retry::{RetryOn, RetryPolicy};
use crate::shared::{ChartWindow, CoinId};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub(crate) const NO_DATA: &str = "No data received from API";
pub(crate) const INVALID_FORMAT: &str = "Invalid data format received from API";

/// Top-level JSON shape a route is expected to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Sequence,
    Object,
}

/// Low-level HTTP client for the dashboard proxy.
#[derive(Debug, Clone)]
pub struct DashboardHttp {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl DashboardHttp {
    pub fn new(base_url: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    // ── Coins ────────────────────────────────────────────────────────────

    pub async fn get_markets(
        &self,
        query: &MarketsQuery,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<Coin>, SdkError> {
        let url = format!("{}/api/coins/markets?{}", self.base_url, query.query_string());
        self.get(&url, Shape::Sequence, cancel).await
    }

    pub async fn get_coin(
        &self,
        id: &CoinId,
        cancel: Option<&CancelToken>,
    ) -> Result<CoinDetail, SdkError> {
        let url = format!("{}/api/coins/{}", self.base_url, urlencoding::encode(id.as_str()));
        self.get(&url, Shape::Object, cancel).await
    }

    // ── Charts ───────────────────────────────────────────────────────────

    pub async fn get_market_chart(
        &self,
        id: &CoinId,
        window: ChartWindow,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<ChartPoint>, SdkError> {
        let url = format!(
            "{}/api/coins/{}/market_chart?days={}",
            self.base_url,
            urlencoding::encode(id.as_str()),
            window.as_str()
        );
        self.get(&url, Shape::Sequence, cancel).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        shape: Shape,
        cancel: Option<&CancelToken>,
    ) -> Result<T, SdkError> {
        cancellable(cancel, async {
            self.request_with_retry(url, shape).await.map_err(SdkError::from)
        })
        .await
    }

    async fn request_with_retry<T: DeserializeOwned>(
        &self,
        url: &str,
        shape: Shape,
    ) -> Result<T, HttpError> {
        let Some(config) = self.retry.config() else {
            return self.do_request(url, shape).await;
        };

        let mut attempt = 0;
        loop {
            let error = match self.do_request::<T>(url, shape).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };

            let should_retry = match config.retry_on {
                RetryOn::AnyError => true,
                RetryOn::Retryable => error.is_retryable(),
            };

            if !should_retry || attempt >= config.max_retries {
                tracing::debug!(
                    attempts = attempt + 1,
                    error = %error,
                    "Giving up on request to {}",
                    url
                );
                return Err(error);
            }

            let delay = config.delay_for_attempt(attempt);
            tracing::debug!(
                attempt = attempt + 1,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Retrying request to {}",
                url
            );
            futures_timer::Delay::new(delay).await;
            attempt += 1;
        }
    }

    async fn do_request<T: DeserializeOwned>(&self, url: &str, shape: Shape) -> Result<T, HttpError> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(classify_transport)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(classify_transport)?;

        if status.is_success() {
            return parse_body(&body, shape);
        }

        let envelope = serde_json::from_slice::<ErrorEnvelope>(&body).ok();
        Err(HttpError::from_status(status.as_u16(), envelope))
    }
}

fn classify_transport(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout(e.to_string())
    } else {
        HttpError::Reqwest(e)
    }
}

/// Validate the top-level shape of a 2xx body, then deserialize it.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8], shape: Shape) -> Result<T, HttpError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(HttpError::InvalidResponse(NO_DATA.to_string()));
    }

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| HttpError::InvalidResponse(INVALID_FORMAT.to_string()))?;

    let shape_ok = match (&value, shape) {
        (serde_json::Value::Null, _) => {
            return Err(HttpError::InvalidResponse(NO_DATA.to_string()));
        }
        (serde_json::Value::Array(_), Shape::Sequence) => true,
        (serde_json::Value::Object(_), Shape::Object) => true,
        _ => false,
    };
    if !shape_ok {
        return Err(HttpError::InvalidResponse(INVALID_FORMAT.to_string()));
    }

    serde_json::from_value(value).map_err(|e| HttpError::InvalidResponse(e.to_string()))
}
