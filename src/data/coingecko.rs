use std::time::Duration;

use async_trait::async_trait;
use itertools::Itertools;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::config::GATEWAY;
use crate::data::gateway::MarketGateway;
use crate::data::responses::{MarketChartResponse, MarketCoin, SimplePriceResponse};
use crate::domain::{FetchKind, HistoryParams, RankingParams};
use crate::error::FetchError;

/// Longest slice of an error body kept in an `Http` failure message.
const ERROR_BODY_LIMIT: usize = 200;

/// HTTP implementation of [`MarketGateway`] against the CoinGecko v3 REST API.
#[derive(Debug, Clone)]
pub struct CoinGeckoGateway {
    client: Client,
    base_url: Url,
}

impl CoinGeckoGateway {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
            .ok_or_else(|| {
                FetchError::Transport(format!(
                    "invalid base url '{}': must start with http:// or https://",
                    trimmed
                ))
            })?;

        // Every fetch drives this client from its own short-lived runtime, and pooled
        // connections would be bound to a runtime that no longer exists.
        let client = Client::builder()
            .user_agent(GATEWAY.user_agent)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to create HTTP client: {}", e)))?;

        log::info!("CoinGecko gateway ready: base_url='{}'", base_url);
        Ok(Self { client, base_url })
    }

    /// Base URL plus the endpoint's path segments. `{id}` segments become `asset_id`,
    /// percent-encoded so it can never leave its own segment.
    fn endpoint_url(&self, endpoint: &str, asset_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(
                endpoint
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(|s| if s == "{id}" { asset_id } else { s }),
            );
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, FetchError> {
        log::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .header(ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(FetchError::Http {
                status: status.as_u16(),
                message: format!("{} for url {} {}", status, url, body.trim()),
            });
        }

        let body = response.text().await.map_err(|e| classify(e, timeout))?;
        serde_json::from_str(&body).map_err(FetchError::from)
    }
}

/// reqwest errors, with the timeout we actually configured.
fn classify(err: reqwest::Error, timeout: Duration) -> FetchError {
    match FetchError::from(err) {
        FetchError::Timeout(_) => FetchError::Timeout(timeout),
        other => other,
    }
}

#[async_trait]
impl MarketGateway for CoinGeckoGateway {
    async fn simple_price(
        &self,
        asset_ids: &[String],
        currencies: &[String],
    ) -> Result<SimplePriceResponse, FetchError> {
        let query = [
            ("ids", asset_ids.iter().join(",")),
            ("vs_currencies", currencies.iter().join(",")),
            ("include_24hr_vol", "true".to_string()),
            ("include_24hr_change", "true".to_string()),
            ("include_last_updated_at", "true".to_string()),
        ];
        let url = self.endpoint_url(GATEWAY.endpoints.simple_price, "");
        self.get_json(url, &query, FetchKind::SinglePrice.timeout())
            .await
    }

    async fn coins_markets(&self, params: &RankingParams) -> Result<Vec<MarketCoin>, FetchError> {
        let query = [
            ("vs_currency", params.currency.clone()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", params.top_n.to_string()),
            ("page", params.page.to_string()),
            ("sparkline", "false".to_string()),
            ("price_change_percentage", "1h,24h,7d".to_string()),
        ];
        let url = self.endpoint_url(GATEWAY.endpoints.coins_markets, "");
        self.get_json(url, &query, FetchKind::MarketRanking.timeout())
            .await
    }

    async fn market_chart(
        &self,
        params: &HistoryParams,
    ) -> Result<MarketChartResponse, FetchError> {
        let url = self.endpoint_url(GATEWAY.endpoints.market_chart, &params.asset_id);
        let query = [
            ("vs_currency", params.currency.clone()),
            ("days", params.days.to_string()),
            ("interval", params.interval.clone()),
        ];
        self.get_json(url, &query, FetchKind::HistoricalSeries.timeout())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_validated_and_trimmed() {
        let gw = CoinGeckoGateway::new(" https://example.test/api/v3/ ").unwrap();
        assert_eq!(gw.base_url.as_str(), "https://example.test/api/v3");
        assert!(CoinGeckoGateway::new("ftp://example.test").is_err());
        assert!(CoinGeckoGateway::new("not a url").is_err());
    }

    #[test]
    fn endpoint_paths_are_joined_onto_the_base() {
        let gw = CoinGeckoGateway::new("https://example.test/api/v3").unwrap();
        assert_eq!(
            gw.endpoint_url(GATEWAY.endpoints.simple_price, "").as_str(),
            "https://example.test/api/v3/simple/price"
        );
        assert_eq!(
            gw.endpoint_url(GATEWAY.endpoints.market_chart, "bitcoin").as_str(),
            "https://example.test/api/v3/coins/bitcoin/market_chart"
        );
    }

    #[test]
    fn asset_id_stays_inside_its_path_segment() {
        let gw = CoinGeckoGateway::new("https://example.test/api/v3").unwrap();
        let url = gw.endpoint_url(GATEWAY.endpoints.market_chart, "a/b?c#d");
        assert_eq!(
            url.as_str(),
            "https://example.test/api/v3/coins/a%2Fb%3Fc%23d/market_chart"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_failure() {
        // Port 9 (discard) on localhost is closed on any sane test machine.
        let gw = CoinGeckoGateway::new("http://127.0.0.1:9").unwrap();
        let err = gw
            .simple_price(&["bitcoin".to_string()], &["usd".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "got {:?}", err);
    }
}
