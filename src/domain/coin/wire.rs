//! Wire types for the coin endpoints: query parameters shared by the client
//! (building proxy URLs) and the proxy (building CoinGecko URLs).

use crate::network::MAX_PER_PAGE;
use crate::shared::{join_ids, CoinId};
use serde::{Deserialize, Serialize};

/// Query parameters for `/coins/markets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketsQuery {
    pub vs_currency: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
    pub price_change_percentage: String,
    /// Comma-joined identifier filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<String>,
}

impl Default for MarketsQuery {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            order: "market_cap_desc".to_string(),
            per_page: 50,
            page: 1,
            sparkline: false,
            price_change_percentage: "24h".to_string(),
            ids: None,
        }
    }
}

impl MarketsQuery {
    /// One page of the listing. `page` starts at 1; `per_page` is capped at 250.
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
            ..Self::default()
        }
    }

    /// The listing restricted to `ids`, as a single page of 250.
    pub fn by_ids(ids: &[CoinId]) -> Self {
        Self {
            ids: Some(join_ids(ids)),
            per_page: MAX_PER_PAGE,
            page: 1,
            ..Self::default()
        }
    }

    /// URL-encoded query string, parameters in a fixed order.
    pub fn query_string(&self) -> String {
        let mut params = vec![
            format!("vs_currency={}", urlencoding::encode(&self.vs_currency)),
            format!("order={}", urlencoding::encode(&self.order)),
            format!("per_page={}", self.per_page),
            format!("page={}", self.page),
            format!("sparkline={}", self.sparkline),
            format!(
                "price_change_percentage={}",
                urlencoding::encode(&self.price_change_percentage)
            ),
        ];
        if let Some(ids) = &self.ids {
            params.push(format!("ids={}", urlencoding::encode(ids)));
        }
        params.join("&")
    }
}

/// Fixed query for `/coins/{id}`: market data only, none of the heavy blocks.
pub const DETAIL_QUERY: &str = "localization=false&tickers=false&market_data=true\
&community_data=false&developer_data=false&sparkline=false";
