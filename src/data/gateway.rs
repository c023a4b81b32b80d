use async_trait::async_trait;

use crate::data::responses::{MarketChartResponse, MarketCoin, SimplePriceResponse};
use crate::domain::{HistoryParams, RankingParams};
use crate::error::FetchError;

/// Abstract interface to the remote market-data API.
///
/// Implementations return decoded wire shapes; turning those into payloads is the fetch
/// operation's job.
#[async_trait]
pub trait MarketGateway: Send + Sync {
    /// `/simple/price` for the cross product of `asset_ids` and `currencies`.
    async fn simple_price(
        &self,
        asset_ids: &[String],
        currencies: &[String],
    ) -> Result<SimplePriceResponse, FetchError>;

    /// `/coins/markets`, ordered by market cap.
    async fn coins_markets(&self, params: &RankingParams) -> Result<Vec<MarketCoin>, FetchError>;

    /// `/coins/{id}/market_chart`.
    async fn market_chart(&self, params: &HistoryParams)
    -> Result<MarketChartResponse, FetchError>;
}
