//! Route handlers for the proxy.

use crate::domain::chart::ChartPoint;
use crate::domain::coin::wire::MarketsQuery;
use crate::error::UpstreamError;
use crate::network::MAX_PER_PAGE;
use crate::proxy::AppState;
use crate::shared::{ChartWindow, CoinId};

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, field, instrument};

/// Raw `/api/coins/markets` query. Everything is optional text so that
/// missing, empty and unparsable values all fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct MarketsParams {
    pub vs_currency: Option<String>,
    pub order: Option<String>,
    pub per_page: Option<String>,
    pub page: Option<String>,
    pub sparkline: Option<String>,
    pub price_change_percentage: Option<String>,
    pub ids: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl MarketsParams {
    pub fn into_query(self) -> MarketsQuery {
        let defaults = MarketsQuery::default();
        MarketsQuery {
            vs_currency: present(self.vs_currency).unwrap_or(defaults.vs_currency),
            order: present(self.order).unwrap_or(defaults.order),
            per_page: present(self.per_page)
                .and_then(|v| v.parse::<u32>().ok())
                .map(|n| n.clamp(1, MAX_PER_PAGE))
                .unwrap_or(defaults.per_page),
            page: present(self.page)
                .and_then(|v| v.parse::<u32>().ok())
                .map(|n| n.max(1))
                .unwrap_or(defaults.page),
            sparkline: present(self.sparkline)
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(defaults.sparkline),
            price_change_percentage: present(self.price_change_percentage)
                .unwrap_or(defaults.price_change_percentage),
            ids: present(self.ids),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartParams {
    pub days: Option<String>,
}

impl ChartParams {
    /// Absent or blank means the default week; anything else must be a known window.
    pub fn window(&self) -> Result<ChartWindow, UpstreamError> {
        match self.days.as_deref().map(str::trim) {
            None | Some("") => Ok(ChartWindow::default()),
            Some(raw) => raw.parse().map_err(|_| {
                UpstreamError::BadRequest(format!(
                    "Invalid days parameter: {}. Expected one of 1, 7, 30, 90.",
                    raw
                ))
            }),
        }
    }
}

/// GET /api/coins/markets
#[instrument(skip_all, fields(page = field::Empty, per_page = field::Empty, ids = field::Empty))]
pub async fn markets(
    State(state): State<AppState>,
    Query(params): Query<MarketsParams>,
) -> Result<Json<Value>, UpstreamError> {
    let query = params.into_query();
    let span = tracing::Span::current();
    span.record("page", query.page);
    span.record("per_page", query.per_page);
    if let Some(ids) = &query.ids {
        span.record("ids", ids.as_str());
    }
    debug!("Fetching markets");
    Ok(Json(state.upstream.markets(&query).await?))
}

/// GET /api/coins/{id}
#[instrument(skip_all, fields(coin = %id))]
pub async fn coin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, UpstreamError> {
    debug!("Fetching coin detail");
    Ok(Json(state.upstream.coin(&CoinId::new(id)).await?))
}

/// GET /api/coins/{id}/market_chart?days=N
#[instrument(skip_all, fields(coin = %id, days = ?params.days))]
pub async fn market_chart(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ChartParams>,
) -> Result<Json<Vec<ChartPoint>>, UpstreamError> {
    state.upstream.require_key()?;
    let window = params.window()?;
    debug!(window = window.as_str(), "Fetching market chart");
    Ok(Json(
        state.upstream.market_chart(&CoinId::new(id), window).await?,
    ))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
