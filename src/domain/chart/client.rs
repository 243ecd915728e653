//! Charts sub-client.

use crate::client::DashboardClient;
use crate::domain::chart::ChartPoint;
use crate::error::SdkError;
use crate::http::CancelToken;
use crate::shared::{ChartWindow, CoinId};

/// Sub-client for price charts.
pub struct Charts<'a> {
    pub(crate) client: &'a DashboardClient,
    pub(crate) cancel: Option<&'a CancelToken>,
}

impl<'a> Charts<'a> {
    pub fn with_cancel(self, token: &'a CancelToken) -> Self {
        Self {
            cancel: Some(token),
            ..self
        }
    }

    /// USD price series for `id` over `window`, oldest point first.
    pub async fn get(&self, id: &CoinId, window: ChartWindow) -> Result<Vec<ChartPoint>, SdkError> {
        self.client
            .http
            .get_market_chart(id, window, self.cancel)
            .await
    }
}
