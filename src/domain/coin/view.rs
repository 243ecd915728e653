//! Client-side search, sort and pagination over one fetched page of coins.

use super::Coin;
use std::cmp::Ordering;
use std::str::FromStr;

/// Column a market listing can be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    MarketCap,
    PriceChange24h,
    TotalVolume,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarketCap => "market_cap",
            Self::PriceChange24h => "price_change_percentage_24h",
            Self::TotalVolume => "total_volume",
        }
    }

    /// The sort value of a coin; missing figures sort as zero.
    fn value(&self, coin: &Coin) -> f64 {
        let value = match self {
            Self::MarketCap => coin.market_cap,
            Self::PriceChange24h => coin.price_change_percentage_24h,
            Self::TotalVolume => coin.total_volume,
        };
        value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "market_cap" => Ok(Self::MarketCap),
            "price_change_percentage_24h" => Ok(Self::PriceChange24h),
            "total_volume" => Ok(Self::TotalVolume),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Search term plus sort selection applied to an already-fetched page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketView {
    pub search: String,
    pub sort: SortKey,
    pub order: SortOrder,
}

impl MarketView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_sort(mut self, sort: SortKey, order: SortOrder) -> Self {
        self.sort = sort;
        self.order = order;
        self
    }

    /// Parse a `"<key>-<order>"` selector such as `"total_volume-asc"`.
    pub fn parse_selector(selector: &str) -> Result<(SortKey, SortOrder), String> {
        let (key, order) = selector
            .rsplit_once('-')
            .ok_or_else(|| format!("Invalid sort selector: {}", selector))?;
        Ok((key.parse()?, order.parse()?))
    }

    /// The selector string for the current sort, the inverse of [`Self::parse_selector`].
    pub fn selector(&self) -> String {
        format!("{}-{}", self.sort.as_str(), self.order.as_str())
    }

    /// Case-insensitive substring match on name or symbol. Rows missing either
    /// never match.
    pub fn matches(&self, coin: &Coin) -> bool {
        if coin.name.is_empty() || coin.symbol.is_empty() {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        coin.name.to_lowercase().contains(&needle) || coin.symbol.to_lowercase().contains(&needle)
    }

    /// Filter then stable-sort.
    pub fn apply<'a>(&self, coins: &'a [Coin]) -> Vec<&'a Coin> {
        let mut rows: Vec<&Coin> = coins.iter().filter(|c| self.matches(c)).collect();
        rows.sort_by(|a, b| compare_by(self.sort, self.order, a, b));
        rows
    }
}

/// A next page exists only when the current one came back full.
pub fn has_next_page(returned: usize, per_page: u32) -> bool {
    per_page > 0 && returned >= per_page as usize
}

/// Compare two coins on `key`, missing figures as zero.
pub fn compare_by(key: SortKey, order: SortOrder, a: &Coin, b: &Coin) -> Ordering {
    let ordering = key.value(a).total_cmp(&key.value(b));
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}
