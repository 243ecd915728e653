//! Coins sub-client — market listing, lookup by ids, detail, watchlist rows.

use crate::client::DashboardClient;
use crate::domain::coin::wire::MarketsQuery;
use crate::domain::coin::{Coin, CoinDetail};
use crate::domain::watchlist::Watchlist;
use crate::error::{SdkError, WatchlistError};
use crate::http::CancelToken;
use crate::network::MAX_PER_PAGE;
use crate::shared::CoinId;

/// Sub-client for coin operations.
pub struct Coins<'a> {
    pub(crate) client: &'a DashboardClient,
    pub(crate) cancel: Option<&'a CancelToken>,
}

impl<'a> Coins<'a> {
    /// Tie every call made through this sub-client to `token`.
    pub fn with_cancel(self, token: &'a CancelToken) -> Self {
        Self {
            cancel: Some(token),
            ..self
        }
    }

    /// One page of the market listing, ordered by market cap descending.
    pub async fn markets(&self, page: u32, per_page: u32) -> Result<Vec<Coin>, SdkError> {
        let query = MarketsQuery::page(page, per_page);
        self.client.http.get_markets(&query, self.cancel).await
    }

    /// The first page of 50.
    pub async fn markets_default(&self) -> Result<Vec<Coin>, SdkError> {
        self.client
            .http
            .get_markets(&MarketsQuery::default(), self.cancel)
            .await
    }

    /// Market rows for exactly these ids, in one proxy call.
    ///
    /// An empty list answers `[]` without touching the network. Only the first
    /// 250 ids are requested.
    pub async fn by_ids(&self, ids: &[CoinId]) -> Result<Vec<Coin>, SdkError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let limit = MAX_PER_PAGE as usize;
        let ids = if ids.len() > limit {
            tracing::warn!(
                requested = ids.len(),
                kept = limit,
                "Too many ids for one page; extra ids dropped"
            );
            &ids[..limit]
        } else {
            ids
        };
        let query = MarketsQuery::by_ids(ids);
        self.client.http.get_markets(&query, self.cancel).await
    }

    /// Full detail for one coin.
    pub async fn details(&self, id: &CoinId) -> Result<CoinDetail, SdkError> {
        self.client.http.get_coin(id, self.cancel).await
    }

    /// Market rows for everything on `watchlist`.
    pub async fn watchlist(&self, watchlist: &Watchlist) -> Result<Vec<Coin>, SdkError> {
        if !watchlist.is_loaded() {
            return Err(WatchlistError::NotLoaded.into());
        }
        self.by_ids(watchlist.ids()).await
    }
}
