//! Coin domain — market listing rows and per-coin detail.

pub mod client;
pub mod view;
pub mod wire;

use crate::shared::CoinId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

pub use view::{has_next_page, MarketView, SortKey, SortOrder};
pub use wire::MarketsQuery;

// ─── Coin ────────────────────────────────────────────────────────────────────

/// One row of the `/coins/markets` listing.
///
/// Numeric fields are optional because CoinGecko sends `null` for coins it has
/// no figure for (fresh listings, coins without a supply cap, ...). Text
/// fields read `null` as empty so one incomplete row never fails a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: CoinId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub fully_diluted_valuation: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
    #[serde(default)]
    pub price_change_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub max_supply: Option<f64>,
    #[serde(default)]
    pub ath: Option<f64>,
    #[serde(default)]
    pub atl: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Coin {
    /// Whether the 24h change is zero or positive. Missing data counts as flat.
    pub fn is_up_24h(&self) -> bool {
        self.price_change_percentage_24h.unwrap_or(0.0) >= 0.0
    }
}

// ─── CoinDetail ──────────────────────────────────────────────────────────────

/// Per-currency figures, keyed by lowercase currency code (`"usd"`, `"eur"`, ...).
pub type CurrencyMap = HashMap<String, Option<f64>>;

/// Full detail for one coin, from `/coins/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: CoinId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Description text keyed by language code.
    #[serde(default)]
    pub description: HashMap<String, String>,
    #[serde(default)]
    pub links: CoinLinks,
    #[serde(default)]
    pub image: CoinImage,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub market_data: Option<MarketData>,
}

impl CoinDetail {
    /// English description, if CoinGecko has one.
    pub fn description_en(&self) -> Option<&str> {
        self.description
            .get("en")
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinLinks {
    #[serde(default)]
    pub homepage: Vec<String>,
    #[serde(default)]
    pub blockchain_site: Vec<String>,
    #[serde(default)]
    pub subreddit_url: Option<String>,
}

impl CoinLinks {
    /// First non-empty homepage. CoinGecko pads the list with empty strings.
    pub fn homepage(&self) -> Option<&str> {
        self.homepage
            .iter()
            .map(String::as_str)
            .find(|url| !url.is_empty())
    }

    pub fn explorers(&self) -> impl Iterator<Item = &str> {
        self.blockchain_site
            .iter()
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinImage {
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// The nested `market_data` block of a coin detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub current_price: CurrencyMap,
    #[serde(default)]
    pub market_cap: CurrencyMap,
    #[serde(default)]
    pub total_volume: CurrencyMap,
    #[serde(default)]
    pub high_24h: CurrencyMap,
    #[serde(default)]
    pub low_24h: CurrencyMap,
    #[serde(default)]
    pub ath: CurrencyMap,
    #[serde(default)]
    pub atl: CurrencyMap,
    #[serde(default)]
    pub price_change_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub max_supply: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

fn in_currency(map: &CurrencyMap, currency: &str) -> Option<f64> {
    map.get(&currency.to_lowercase()).copied().flatten()
}

impl MarketData {
    pub fn price(&self, currency: &str) -> Option<f64> {
        in_currency(&self.current_price, currency)
    }

    pub fn market_cap(&self, currency: &str) -> Option<f64> {
        in_currency(&self.market_cap, currency)
    }

    pub fn volume(&self, currency: &str) -> Option<f64> {
        in_currency(&self.total_volume, currency)
    }

    pub fn ath(&self, currency: &str) -> Option<f64> {
        in_currency(&self.ath, currency)
    }

    pub fn atl(&self, currency: &str) -> Option<f64> {
        in_currency(&self.atl, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_deserialize_markets_row() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 50000,
            "market_cap": 980000000000,
            "market_cap_rank": 1,
            "fully_diluted_valuation": null,
            "total_volume": 25000000000.5,
            "price_change_percentage_24h": -1.25,
            "max_supply": 21000000,
            "roi": null,
            "last_updated": "2024-03-01T12:00:00.000Z"
        }"#;
        let coin: Coin = serde_json::from_str(json).unwrap();
        assert_eq!(coin.id, CoinId::from("bitcoin"));
        assert_eq!(coin.current_price, Some(50000.0));
        assert_eq!(coin.market_cap_rank, Some(1));
        assert_eq!(coin.fully_diluted_valuation, None);
        assert_eq!(coin.max_supply, Some(21_000_000.0));
        assert!(coin.last_updated.is_some());
        assert!(!coin.is_up_24h());
    }

    #[test]
    fn test_coin_minimal_row() {
        let coin: Coin =
            serde_json::from_str(r#"{"id":"x","symbol":"x","name":"X"}"#).unwrap();
        assert_eq!(coin.image, "");
        assert!(coin.current_price.is_none());
        assert!(coin.is_up_24h());
    }

    #[test]
    fn test_null_text_fields_keep_the_page() {
        let json = r#"[
            {"id":"bitcoin","symbol":"btc","name":"Bitcoin","image":"b.png","market_cap":900},
            {"id":"weird","symbol":"w","name":null,"image":null}
        ]"#;
        let coins: Vec<Coin> = serde_json::from_str(json).unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[1].name, "");
        assert_eq!(coins[1].image, "");

        let rows = MarketView::new().apply(&coins);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, CoinId::from("bitcoin"));
    }

    #[test]
    fn test_coin_detail_market_data() {
        let json = r#"{
            "id": "ethereum",
            "symbol": "eth",
            "name": "Ethereum",
            "description": {"en": "Ethereum is a platform.", "de": ""},
            "links": {"homepage": ["", "https://ethereum.org"], "blockchain_site": ["https://etherscan.io", ""]},
            "image": {"thumb": "t.png", "small": "s.png", "large": "l.png"},
            "market_cap_rank": 2,
            "market_data": {
                "current_price": {"usd": 3000.5, "eur": 2800, "xdr": null},
                "market_cap": {"usd": 360000000000},
                "total_volume": {"usd": 12000000000},
                "ath": {"usd": 4878.26},
                "atl": {"usd": 0.432979},
                "price_change_percentage_24h": 2.5,
                "circulating_supply": 120000000,
                "max_supply": null
            }
        }"#;
        let detail: CoinDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.description_en(), Some("Ethereum is a platform."));
        assert_eq!(detail.links.homepage(), Some("https://ethereum.org"));
        assert_eq!(detail.links.explorers().count(), 1);

        let md = detail.market_data.unwrap();
        assert_eq!(md.price("usd"), Some(3000.5));
        assert_eq!(md.price("EUR"), Some(2800.0));
        assert_eq!(md.price("xdr"), None);
        assert_eq!(md.price("jpy"), None);
        assert_eq!(md.market_cap("usd"), Some(360_000_000_000.0));
        assert_eq!(md.atl("usd"), Some(0.432979));
        assert_eq!(md.max_supply, None);
    }
}
