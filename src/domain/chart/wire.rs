//! Wire types for CoinGecko's `/coins/{id}/market_chart`.

use serde::{Deserialize, Serialize};

/// `[timestamp_ms, value]` pair. CoinGecko occasionally sends `null` values.
pub type RawPoint = (f64, Option<f64>);

/// Raw market chart response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<RawPoint>,
    #[serde(default)]
    pub market_caps: Vec<RawPoint>,
    #[serde(default)]
    pub total_volumes: Vec<RawPoint>,
}
