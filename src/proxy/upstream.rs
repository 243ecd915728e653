//! CoinGecko client used by the proxy routes.
//!
//! Every call goes through [`CoinGeckoUpstream::fetch`], which attaches the
//! key, applies the fixed timeout and classifies failures into
//! [`UpstreamError`].

use crate::domain::chart::wire::MarketChartResponse;
use crate::domain::chart::ChartPoint;
use crate::domain::coin::wire::{MarketsQuery, DETAIL_QUERY};
use crate::error::UpstreamError;
use crate::network::API_KEY_HEADER;
use crate::proxy::config::ProxyConfig;
use crate::shared::{ChartWindow, CoinId};

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Instant;

#[derive(Clone)]
pub struct CoinGeckoUpstream {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl fmt::Debug for CoinGeckoUpstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinGeckoUpstream")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl CoinGeckoUpstream {
    pub fn new(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.upstream_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.upstream_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// `/coins/markets`, body passed through untouched.
    pub async fn markets(&self, query: &MarketsQuery) -> Result<Value, UpstreamError> {
        self.fetch(&format!("/coins/markets?{}", query.query_string()))
            .await
    }

    /// `/coins/{id}` with market data only.
    pub async fn coin(&self, id: &CoinId) -> Result<Value, UpstreamError> {
        self.fetch(&format!(
            "/coins/{}?{}",
            urlencoding::encode(id.as_str()),
            DETAIL_QUERY
        ))
        .await
    }

    /// `/coins/{id}/market_chart` in USD, reduced to the price series.
    pub async fn market_chart(
        &self,
        id: &CoinId,
        window: ChartWindow,
    ) -> Result<Vec<ChartPoint>, UpstreamError> {
        let body = self
            .fetch(&format!(
                "/coins/{}/market_chart?vs_currency=usd&days={}",
                urlencoding::encode(id.as_str()),
                window.as_str()
            ))
            .await?;
        let chart: MarketChartResponse = serde_json::from_value(body).map_err(|e| {
            tracing::warn!(coin = %id, error = %e, "Market chart body has an unexpected shape");
            UpstreamError::MalformedResponse { status: 200 }
        })?;
        Ok(chart.into_points())
    }

    /// The configured key, or the configuration error every route answers with.
    pub(crate) fn require_key(&self) -> Result<&str, UpstreamError> {
        self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("CoinGecko API key is not configured");
            UpstreamError::Configuration
        })
    }

    async fn fetch(&self, path_and_query: &str) -> Result<Value, UpstreamError> {
        let api_key = self.require_key()?;

        let url = format!("{}{}", self.base_url, path_and_query);
        let started = Instant::now();
        tracing::debug!(path = path_and_query, "Calling CoinGecko");

        let resp = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| classify_transport(path_and_query, e))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| classify_transport(path_and_query, e))?;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let result = classify_response(status, &body);
        match &result {
            Ok(_) => tracing::info!(
                path = path_and_query,
                status = status.as_u16(),
                elapsed_ms,
                "CoinGecko responded"
            ),
            Err(e) => tracing::warn!(
                path = path_and_query,
                status = status.as_u16(),
                elapsed_ms,
                error = %e,
                "CoinGecko call failed"
            ),
        }
        result
    }
}

fn classify_transport(path: &str, e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        tracing::warn!(path, "CoinGecko call timed out");
        UpstreamError::Timeout
    } else {
        // The path is already a log field.
        let e = e.without_url();
        tracing::warn!(path, error = %e, "CoinGecko call failed before a response");
        UpstreamError::Network(e.to_string())
    }
}

/// Map an upstream status and body to a JSON value or a classified error.
///
/// An HTML body wins over the status: CoinGecko answers some auth and
/// rate-limit failures with an HTML page.
pub(crate) fn classify_response(status: StatusCode, body: &[u8]) -> Result<Value, UpstreamError> {
    if looks_like_html(body) {
        return Err(UpstreamError::MalformedResponse {
            status: status.as_u16(),
        });
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(UpstreamError::RateLimited);
    }
    if !status.is_success() {
        return Err(UpstreamError::Upstream {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }
    serde_json::from_slice(body).map_err(|_| UpstreamError::MalformedResponse {
        status: status.as_u16(),
    })
}

pub(crate) fn looks_like_html(body: &[u8]) -> bool {
    let start = body
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(body.len());
    let head = &body[start..];
    let starts_with = |prefix: &[u8]| {
        head.len() >= prefix.len() && head[..prefix.len()].eq_ignore_ascii_case(prefix)
    };
    starts_with(b"<!doctype html") || starts_with(b"<html")
}
