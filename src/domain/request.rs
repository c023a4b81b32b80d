use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::config::GATEWAY;
use crate::domain::watchlist::normalize_asset_id;
use crate::error::InputError;

/// Which gateway operation a request maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FetchKind {
    #[strum(to_string = "single price")]
    SinglePrice,
    #[strum(to_string = "watchlist")]
    WatchlistPrices,
    #[strum(to_string = "market ranking")]
    MarketRanking,
    #[strum(to_string = "historical series")]
    HistoricalSeries,
    #[strum(to_string = "conversion rate")]
    ConversionRate,
}

impl FetchKind {
    /// The single timeout applied to the HTTP call behind this kind of fetch.
    pub fn timeout(self) -> Duration {
        match self {
            Self::HistoricalSeries => GATEWAY.timeouts.history,
            _ => GATEWAY.timeouts.simple,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceParams {
    pub asset_id: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistParams {
    pub asset_ids: Vec<String>,
    pub currencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingParams {
    pub currency: String,
    pub top_n: u32,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryParams {
    pub asset_id: String,
    pub currency: String,
    pub days: DayWindow,
    pub interval: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionParams {
    pub amount: f64,
    pub from_asset: String,
    pub to_currency: String,
}

/// One unit of work for a fetch operation. Moved into the worker that executes it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    SinglePrice(PriceParams),
    WatchlistPrices(WatchlistParams),
    MarketRanking(RankingParams),
    HistoricalSeries(HistoryParams),
    ConversionRate(ConversionParams),
}

impl FetchRequest {
    pub fn kind(&self) -> FetchKind {
        match self {
            Self::SinglePrice(_) => FetchKind::SinglePrice,
            Self::WatchlistPrices(_) => FetchKind::WatchlistPrices,
            Self::MarketRanking(_) => FetchKind::MarketRanking,
            Self::HistoricalSeries(_) => FetchKind::HistoricalSeries,
            Self::ConversionRate(_) => FetchKind::ConversionRate,
        }
    }

}

impl fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinglePrice(p) => write!(f, "price {}/{}", p.asset_id, p.currency),
            Self::WatchlistPrices(p) => write!(
                f,
                "watchlist [{}] in [{}]",
                p.asset_ids.join(","),
                p.currencies.join(",")
            ),
            Self::MarketRanking(p) => {
                write!(f, "ranking top {} in {} (page {})", p.top_n, p.currency, p.page)
            }
            Self::HistoricalSeries(p) => write!(
                f,
                "history {}/{} {}d ({})",
                p.asset_id, p.currency, p.days, p.interval
            ),
            Self::ConversionRate(p) => {
                write!(f, "convert {} {} to {}", p.amount, p.from_asset, p.to_currency)
            }
        }
    }
}

/// `days` parameter of `/market_chart`: a number of days or the whole history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayWindow {
    Days(u32),
    Max,
}

impl Default for DayWindow {
    fn default() -> Self {
        DayWindow::Days(30)
    }
}

impl fmt::Display for DayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayWindow::Days(d) => write!(f, "{}", d),
            DayWindow::Max => write!(f, "max"),
        }
    }
}

impl FromStr for DayWindow {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("max") {
            return Ok(DayWindow::Max);
        }
        match s.parse::<u32>() {
            Ok(0) => Err(InputError::NotPositive("period")),
            Ok(d) => Ok(DayWindow::Days(d)),
            Err(_) => Err(InputError::BadDayWindow(s.to_string())),
        }
    }
}

fn required_asset(raw: &str, field: &'static str) -> Result<String, InputError> {
    normalize_asset_id(raw).ok_or(InputError::Empty(field))
}

/// Lower-cased, trimmed quote currency, or None if nothing is left.
pub fn normalize_currency(raw: &str) -> Option<String> {
    let ccy = raw.trim().to_lowercase();
    (!ccy.is_empty()).then_some(ccy)
}

fn required_currency(raw: &str) -> Result<String, InputError> {
    normalize_currency(raw).ok_or(InputError::Empty("currency"))
}

impl PriceParams {
    pub fn parse(asset_id: &str, currency: &str) -> Result<Self, InputError> {
        Ok(Self {
            asset_id: required_asset(asset_id, "asset id")?,
            currency: required_currency(currency)?,
        })
    }
}

impl WatchlistParams {
    pub fn parse(asset_ids: &[String], currency: &str) -> Result<Self, InputError> {
        let asset_ids: Vec<String> = asset_ids
            .iter()
            .filter_map(|id| normalize_asset_id(id))
            .unique()
            .collect();
        if asset_ids.is_empty() {
            return Err(InputError::Empty("watchlist"));
        }
        Ok(Self {
            asset_ids,
            currencies: vec![required_currency(currency)?],
        })
    }
}

impl RankingParams {
    pub fn parse(top_n: u32, currency: &str) -> Result<Self, InputError> {
        if top_n == 0 {
            return Err(InputError::NotPositive("number of results"));
        }
        Ok(Self {
            currency: required_currency(currency)?,
            top_n,
            page: crate::config::constants::ranking::FIRST_PAGE,
        })
    }
}

impl HistoryParams {
    pub fn parse(asset_id: &str, currency: &str, days: &str) -> Result<Self, InputError> {
        if days.trim().is_empty() {
            return Err(InputError::Empty("period"));
        }
        Ok(Self {
            asset_id: required_asset(asset_id, "asset id")?,
            currency: required_currency(currency)?,
            days: days.parse()?,
            interval: crate::config::constants::HISTORY_INTERVAL.to_string(),
        })
    }
}

impl ConversionParams {
    pub fn parse(amount: &str, from_asset: &str, to_currency: &str) -> Result<Self, InputError> {
        let amount_str = amount.trim();
        if amount_str.is_empty() {
            return Err(InputError::Empty("amount"));
        }
        let from_asset = required_asset(from_asset, "source asset")?;
        let to_currency = required_currency(to_currency)?;
        let amount: f64 = amount_str
            .parse()
            .map_err(|_| InputError::NotANumber(amount_str.to_string()))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(InputError::NotPositive("amount"));
        }
        Ok(Self {
            amount,
            from_asset,
            to_currency,
        })
    }

    /// The lookup this conversion delegates to.
    pub fn rate_lookup(&self) -> PriceParams {
        PriceParams {
            asset_id: self.from_asset.clone(),
            currency: self.to_currency.clone(),
        }
    }
}
