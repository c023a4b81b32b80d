use serde::Serialize;

use crate::domain::request::DayWindow;
use crate::engine::FetchFailure;

/// Price, 24h change, 24h volume and freshness of one (asset, currency) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub asset_id: String,
    /// Upper-case currency code
    pub currency: String,
    pub price: Option<f64>,
    pub change_24h: Option<f64>,
    pub volume_24h: Option<f64>,
    /// Epoch seconds as reported upstream
    pub last_updated_at: Option<i64>,
    /// Local-time rendering of `last_updated_at`, "N/A" when absent
    pub last_updated: String,
}

/// The three per-currency fields of a watchlist cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyQuote {
    pub price: Option<f64>,
    pub change_24h: Option<f64>,
    pub volume_24h: Option<f64>,
}

/// All requested currencies for one watched asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetQuotes {
    /// In request order; a currency missing upstream is simply absent
    pub quotes: Vec<(String, CurrencyQuote)>,
    pub last_updated: String,
}

impl AssetQuotes {
    pub fn quote(&self, currency: &str) -> Option<&CurrencyQuote> {
        self.quotes
            .iter()
            .find(|(ccy, _)| ccy == currency)
            .map(|(_, q)| q)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistEntryResult {
    pub asset_id: String,
    pub outcome: Result<AssetQuotes, FetchFailure>,
}

/// One row per requested asset, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistSnapshot {
    pub currencies: Vec<String>,
    pub entries: Vec<WatchlistEntryResult>,
}

impl WatchlistSnapshot {
    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_err()).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCoin {
    pub rank: u32,
    pub id: String,
    /// Upper-case ticker
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub change_1h: Option<f64>,
    pub change_24h: Option<f64>,
    pub change_7d: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketRanking {
    /// Upper-case currency code
    pub currency: String,
    pub coins: Vec<RankedCoin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: i64,
    pub date: String,
    pub price: f64,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
}

/// Time-ordered history of one asset. Never empty when delivered as a success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
    pub asset_id: String,
    pub vs_currency: String,
    #[serde(skip)]
    pub days: DayWindow,
    #[serde(rename = "data_points")]
    pub points: Vec<SeriesPoint>,
}

/// Rate lookup plus what the consumer needs to do the multiplication itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionQuote {
    pub amount: f64,
    pub from_asset: String,
    pub to_currency: String,
    pub rate: PriceQuote,
}

impl ConversionQuote {
    /// `amount * rate`, or None when upstream gave no usable rate.
    pub fn converted_amount(&self) -> Option<f64> {
        self.rate
            .price
            .filter(|r| r.is_finite())
            .map(|rate| self.amount * rate)
    }
}

/// Success payload, one shape per request kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    SinglePrice(PriceQuote),
    Watchlist(WatchlistSnapshot),
    Ranking(MarketRanking),
    Historical(HistoricalSeries),
    Conversion(ConversionQuote),
}

impl Payload {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Payload::SinglePrice(_) => "single price",
            Payload::Watchlist(_) => "watchlist",
            Payload::Ranking(_) => "ranking",
            Payload::Historical(_) => "historical series",
            Payload::Conversion(_) => "conversion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(price: Option<f64>) -> PriceQuote {
        PriceQuote {
            asset_id: "bitcoin".into(),
            currency: "EUR".into(),
            price,
            change_24h: None,
            volume_24h: None,
            last_updated_at: None,
            last_updated: "N/A".into(),
        }
    }

    #[test]
    fn conversion_multiplies_on_the_consumer_side() {
        let c = ConversionQuote {
            amount: 2.0,
            from_asset: "bitcoin".into(),
            to_currency: "eur".into(),
            rate: quote(Some(30_000.0)),
        };
        assert_eq!(c.converted_amount(), Some(60_000.0));
    }

    #[test]
    fn conversion_without_rate_is_none() {
        let c = ConversionQuote {
            amount: 2.0,
            from_asset: "bitcoin".into(),
            to_currency: "eur".into(),
            rate: quote(None),
        };
        assert_eq!(c.converted_amount(), None);
    }
}
