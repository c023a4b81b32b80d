//! The fetch operation: one request in, one `FetchResult` out.
//!
//! Network calls go through [`MarketGateway`]; everything after the call is a pure shaping
//! function from wire shape to payload, so it can be tested without a runtime.

use crate::data::{ChartSample, MarketChartResponse, MarketCoin, MarketGateway, SimplePriceResponse};
use crate::domain::{
    AssetQuotes, ConversionParams, ConversionQuote, CurrencyQuote, FetchRequest,
    HistoricalSeries, HistoryParams, MarketRanking, Payload, PriceParams, PriceQuote, RankedCoin,
    RankingParams, SeriesPoint, WatchlistEntryResult, WatchlistParams, WatchlistSnapshot,
};
use crate::engine::messages::{FetchFailure, FetchResult, MissingScope};
use crate::trace_time;
use crate::utils::{epoch_ms_to_local, format_last_updated};

/// Runs `request` against `gateway`. Never returns an error: every failure is a value.
pub async fn execute(gateway: &dyn MarketGateway, request: &FetchRequest) -> FetchResult {
    log::debug!("Fetch start: {}", request);

    let outcome = trace_time!("Fetch operation", 5_000_000, {
        match request {
            FetchRequest::SinglePrice(p) => {
                fetch_single_price(gateway, p).await.map(Payload::SinglePrice)
            }
            FetchRequest::WatchlistPrices(p) => {
                fetch_watchlist(gateway, p).await.map(Payload::Watchlist)
            }
            FetchRequest::MarketRanking(p) => fetch_ranking(gateway, p).await.map(Payload::Ranking),
            FetchRequest::HistoricalSeries(p) => {
                fetch_history(gateway, p).await.map(Payload::Historical)
            }
            FetchRequest::ConversionRate(p) => {
                fetch_conversion(gateway, p).await.map(Payload::Conversion)
            }
        }
    });

    match &outcome {
        Ok(payload) => log::info!("Fetch done: {} -> {}", request, payload.variant_name()),
        Err(failure) => log::error!("Fetch failed: {} -> {}", request, failure),
    }
    outcome.into()
}

async fn fetch_single_price(
    gateway: &dyn MarketGateway,
    params: &PriceParams,
) -> Result<PriceQuote, FetchFailure> {
    let response = gateway
        .simple_price(
            std::slice::from_ref(&params.asset_id),
            std::slice::from_ref(&params.currency),
        )
        .await?;
    shape_single_price(&response, params)
}

async fn fetch_watchlist(
    gateway: &dyn MarketGateway,
    params: &WatchlistParams,
) -> Result<WatchlistSnapshot, FetchFailure> {
    if params.asset_ids.is_empty() || params.currencies.is_empty() {
        return Err(FetchFailure::unexpected(
            "Asset list and currency list must not be empty.",
        ));
    }
    let response = gateway
        .simple_price(&params.asset_ids, &params.currencies)
        .await?;
    Ok(shape_watchlist(&response, params))
}

async fn fetch_ranking(
    gateway: &dyn MarketGateway,
    params: &RankingParams,
) -> Result<MarketRanking, FetchFailure> {
    let coins = gateway.coins_markets(params).await?;
    Ok(shape_ranking(&coins, params))
}

async fn fetch_history(
    gateway: &dyn MarketGateway,
    params: &HistoryParams,
) -> Result<HistoricalSeries, FetchFailure> {
    let chart = gateway.market_chart(params).await?;
    shape_history(&chart, params)
}

async fn fetch_conversion(
    gateway: &dyn MarketGateway,
    params: &ConversionParams,
) -> Result<ConversionQuote, FetchFailure> {
    let rate = fetch_single_price(gateway, &params.rate_lookup()).await?;
    Ok(ConversionQuote {
        amount: params.amount,
        from_asset: params.from_asset.clone(),
        to_currency: params.to_currency.clone(),
        rate,
    })
}

pub fn shape_single_price(
    response: &SimplePriceResponse,
    params: &PriceParams,
) -> Result<PriceQuote, FetchFailure> {
    let fields = response
        .get(&params.asset_id)
        .filter(|f| f.has_currency(&params.currency))
        .ok_or_else(|| {
            FetchFailure::missing(
                MissingScope::Total,
                format!(
                    "No data found for {} in {}.",
                    params.asset_id,
                    params.currency.to_uppercase()
                ),
            )
        })?;

    let last_updated_at = fields.last_updated_at();
    Ok(PriceQuote {
        asset_id: params.asset_id.clone(),
        currency: params.currency.to_uppercase(),
        price: fields.price(&params.currency),
        change_24h: fields.change_24h(&params.currency),
        volume_24h: fields.volume_24h(&params.currency),
        last_updated_at,
        last_updated: format_last_updated(last_updated_at),
    })
}

/// One entry per requested asset, in request order. A missing asset fails alone.
pub fn shape_watchlist(response: &SimplePriceResponse, params: &WatchlistParams) -> WatchlistSnapshot {
    let entries = params
        .asset_ids
        .iter()
        .map(|asset_id| {
            let outcome = match response.get(asset_id) {
                Some(fields) => {
                    let quotes = params
                        .currencies
                        .iter()
                        .filter(|ccy| fields.has_currency(ccy))
                        .map(|ccy| {
                            (
                                ccy.clone(),
                                CurrencyQuote {
                                    price: fields.price(ccy),
                                    change_24h: fields.change_24h(ccy),
                                    volume_24h: fields.volume_24h(ccy),
                                },
                            )
                        })
                        .collect();
                    Ok(AssetQuotes {
                        quotes,
                        last_updated: format_last_updated(fields.last_updated_at()),
                    })
                }
                None => Err(FetchFailure::missing(
                    MissingScope::Partial,
                    format!("No data found for {}.", asset_id),
                )),
            };
            WatchlistEntryResult {
                asset_id: asset_id.clone(),
                outcome,
            }
        })
        .collect();

    WatchlistSnapshot {
        currencies: params.currencies.clone(),
        entries,
    }
}

/// Keeps response order. Upstream rank wins; otherwise the position on the requested page.
pub fn shape_ranking(coins: &[MarketCoin], params: &RankingParams) -> MarketRanking {
    let page_offset = params.page.saturating_sub(1) * params.top_n;
    let coins = coins
        .iter()
        .enumerate()
        .map(|(idx, coin)| RankedCoin {
            rank: coin
                .market_cap_rank
                .unwrap_or(page_offset + idx as u32 + 1),
            id: coin.id.clone().unwrap_or_default(),
            symbol: coin.symbol.as_deref().unwrap_or_default().to_uppercase(),
            name: coin.name.clone().unwrap_or_default(),
            current_price: coin.current_price,
            market_cap: coin.market_cap,
            total_volume: coin.total_volume,
            change_1h: coin.price_change_percentage_1h_in_currency,
            change_24h: coin.price_change_percentage_24h,
            change_7d: coin.price_change_percentage_7d_in_currency,
        })
        .collect();

    MarketRanking {
        currency: params.currency.to_uppercase(),
        coins,
    }
}

/// Zips the three parallel arrays on the price series. Samples without a price are dropped;
/// a series that ends up empty is a failure, never an empty success.
pub fn shape_history(
    chart: &MarketChartResponse,
    params: &HistoryParams,
) -> Result<HistoricalSeries, FetchFailure> {
    let value_at = |samples: &[ChartSample], i: usize| samples.get(i).and_then(|s| s.1);

    let points: Vec<SeriesPoint> = chart
        .prices
        .iter()
        .enumerate()
        .filter_map(|(i, sample)| {
            let price = sample.1.filter(|p| p.is_finite())?;
            let timestamp = sample.0 as i64;
            Some(SeriesPoint {
                timestamp,
                date: epoch_ms_to_local(timestamp),
                price,
                market_cap: value_at(&chart.market_caps, i),
                total_volume: value_at(&chart.total_volumes, i),
            })
        })
        .collect();

    if points.is_empty() {
        return Err(FetchFailure::missing(
            MissingScope::Total,
            format!("No historical price data found for {}.", params.asset_id),
        ));
    }

    Ok(HistoricalSeries {
        asset_id: params.asset_id.clone(),
        vs_currency: params.currency.clone(),
        days: params.days,
        points,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::data::mock::MockGateway;
    use crate::domain::DayWindow;
    use crate::engine::messages::FailureCategory;
    use crate::error::FetchError;
    use crate::utils::epoch_secs_to_local;

    const BTC_USD: &str = r#"{"bitcoin":{"usd":50000,"usd_24h_change":2.5,"usd_24h_vol":1.2e10,"last_updated_at":1700000000}}"#;

    fn price_request(asset: &str, ccy: &str) -> FetchRequest {
        FetchRequest::SinglePrice(PriceParams::parse(asset, ccy).unwrap())
    }

    fn history_request() -> FetchRequest {
        FetchRequest::HistoricalSeries(HistoryParams::parse("bitcoin", "usd", "7").unwrap())
    }

    #[tokio::test]
    async fn single_price_matches_the_source_fields() {
        let gw = MockGateway::with_simple_price(BTC_USD);
        let result = execute(&gw, &price_request("bitcoin", "usd")).await;

        let FetchResult::Success(Payload::SinglePrice(q)) = result else {
            panic!("expected a price quote, got {:?}", result);
        };
        assert_eq!(q.price, Some(50000.0));
        assert_eq!(q.change_24h, Some(2.5));
        assert_eq!(q.volume_24h, Some(1.2e10));
        assert_eq!(q.currency, "USD");
        assert_eq!(q.last_updated_at, Some(1_700_000_000));
        assert_eq!(q.last_updated, epoch_secs_to_local(1_700_000_000));
        assert_eq!(gw.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_pair_is_a_total_failure() {
        let gw = MockGateway::with_simple_price(BTC_USD);
        let result = execute(&gw, &price_request("bitcoin", "eur")).await;

        let failure = result.failure().unwrap();
        assert_eq!(
            failure.category,
            FailureCategory::UpstreamDataMissing(MissingScope::Total)
        );
        assert!(failure.message.contains("bitcoin"));
    }

    #[tokio::test]
    async fn timeout_becomes_a_timeout_failure() {
        let gw = MockGateway::failing(FetchError::Timeout(Duration::from_secs(10)));
        let result = execute(&gw, &price_request("bitcoin", "usd")).await;

        assert_eq!(result.failure().unwrap().category, FailureCategory::Timeout);
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_failure() {
        let gw = MockGateway::with_simple_price("<html>rate limited</html>");
        let result = execute(&gw, &price_request("bitcoin", "usd")).await;

        assert_eq!(result.failure().unwrap().category, FailureCategory::Decode);
    }

    #[tokio::test]
    async fn watchlist_isolates_the_missing_asset() {
        let gw = MockGateway::with_simple_price(
            r#"{"bitcoin":{"usd":50000,"eur":46000,"last_updated_at":1700000000},
                "ethereum":{"usd":3000,"eur":2800}}"#,
        );
        let request = FetchRequest::WatchlistPrices(WatchlistParams {
            asset_ids: vec!["bitcoin".into(), "notacoin".into(), "ethereum".into()],
            currencies: vec!["usd".into(), "eur".into()],
        });

        let FetchResult::Success(Payload::Watchlist(snapshot)) = execute(&gw, &request).await
        else {
            panic!("watchlist should succeed as a whole");
        };
        assert_eq!(snapshot.entries.len(), 3);
        assert_eq!(snapshot.failed_count(), 1);

        let ids: Vec<_> = snapshot.entries.iter().map(|e| e.asset_id.as_str()).collect();
        assert_eq!(ids, ["bitcoin", "notacoin", "ethereum"]);

        let missing = snapshot.entries[1].outcome.as_ref().unwrap_err();
        assert_eq!(
            missing.category,
            FailureCategory::UpstreamDataMissing(MissingScope::Partial)
        );
        let eth = snapshot.entries[2].outcome.as_ref().unwrap();
        assert_eq!(eth.quote("eur").unwrap().price, Some(2800.0));
        assert_eq!(eth.last_updated, "N/A");
    }

    #[tokio::test]
    async fn watchlist_with_no_assets_fails_without_a_call() {
        let gw = MockGateway::with_simple_price("{}");
        let request = FetchRequest::WatchlistPrices(WatchlistParams {
            asset_ids: vec![],
            currencies: vec!["usd".into()],
        });

        assert!(!execute(&gw, &request).await.is_success());
        assert_eq!(gw.call_count(), 0);
    }

    #[tokio::test]
    async fn ranking_falls_back_to_response_order() {
        let gw = MockGateway::with_markets(
            r#"[{"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":50000,"market_cap_rank":1,
                 "price_change_percentage_1h_in_currency":0.1},
                {"id":"mystery","symbol":"mys","name":"Mystery","current_price":null}]"#,
        );
        let request = FetchRequest::MarketRanking(RankingParams::parse(10, "usd").unwrap());

        let FetchResult::Success(Payload::Ranking(ranking)) = execute(&gw, &request).await else {
            panic!("ranking should succeed");
        };
        assert_eq!(ranking.currency, "USD");
        assert_eq!(ranking.coins[0].rank, 1);
        assert_eq!(ranking.coins[0].symbol, "BTC");
        assert_eq!(ranking.coins[0].change_1h, Some(0.1));
        assert_eq!(ranking.coins[0].change_7d, None);
        assert_eq!(ranking.coins[1].rank, 2);
        assert_eq!(ranking.coins[1].current_price, None);
    }

    #[test]
    fn ranking_fallback_accounts_for_the_page() {
        let coins = vec![MarketCoin::default()];
        let params = RankingParams {
            currency: "usd".into(),
            top_n: 20,
            page: 2,
        };
        assert_eq!(shape_ranking(&coins, &params).coins[0].rank, 21);
    }

    #[tokio::test]
    async fn empty_price_series_is_a_failure() {
        let gw = MockGateway::with_chart(r#"{"prices":[],"market_caps":[],"total_volumes":[]}"#);
        let result = execute(&gw, &history_request()).await;

        assert_eq!(
            result.failure().unwrap().category,
            FailureCategory::UpstreamDataMissing(MissingScope::Total)
        );
    }

    #[tokio::test]
    async fn history_zips_the_parallel_arrays() {
        let gw = MockGateway::with_chart(
            r#"{"prices":[[1700000000000,37000.0],[1700086400000,37500.0]],
                "market_caps":[[1700000000000,7.2e11]],
                "total_volumes":[[1700000000000,1.5e10],[1700086400000,1.6e10]]}"#,
        );

        let FetchResult::Success(Payload::Historical(series)) =
            execute(&gw, &history_request()).await
        else {
            panic!("history should succeed");
        };
        assert_eq!(series.days, DayWindow::Days(7));
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].timestamp, 1_700_000_000_000);
        assert_eq!(series.points[0].market_cap, Some(7.2e11));
        assert_eq!(series.points[1].market_cap, None);
        assert_eq!(series.points[1].total_volume, Some(1.6e10));
    }

    #[tokio::test]
    async fn conversion_carries_amount_and_rate() {
        let gw = MockGateway::with_simple_price(r#"{"bitcoin":{"eur":30000}}"#);
        let request =
            FetchRequest::ConversionRate(ConversionParams::parse("2", "bitcoin", "eur").unwrap());

        let FetchResult::Success(Payload::Conversion(c)) = execute(&gw, &request).await else {
            panic!("conversion should succeed");
        };
        assert_eq!(c.amount, 2.0);
        assert_eq!(c.rate.currency, "EUR");
        assert_eq!(c.converted_amount(), Some(60000.0));
    }
}
