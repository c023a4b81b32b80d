use anyhow::Result;

use super::format::{money, percent, whole};
use super::{Notice, ViewUpdate, wrong_payload};
use crate::config::constants::truncate;
use crate::domain::{Payload, RankedCoin};
use crate::engine::FetchResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    pub rank: String,
    pub name: String,
    pub price: String,
    pub change_1h: String,
    pub change_24h: String,
    pub change_7d: String,
    pub market_cap: String,
    pub volume_24h: String,
}

impl From<&RankedCoin> for RankingRow {
    fn from(coin: &RankedCoin) -> Self {
        Self {
            rank: coin.rank.to_string(),
            name: format!("{} ({})", coin.name, coin.symbol),
            price: money(coin.current_price),
            change_1h: percent(coin.change_1h),
            change_24h: percent(coin.change_24h),
            change_7d: percent(coin.change_7d),
            market_cap: whole(coin.market_cap),
            volume_24h: whole(coin.total_volume),
        }
    }
}

impl RankingRow {
    pub fn cells(&self) -> [&str; 8] {
        [
            self.rank.as_str(),
            self.name.as_str(),
            self.price.as_str(),
            self.change_1h.as_str(),
            self.change_24h.as_str(),
            self.change_7d.as_str(),
            self.market_cap.as_str(),
            self.volume_24h.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingView {
    pub headers: [String; 8],
    pub rows: Vec<RankingRow>,
}

impl RankingView {
    pub fn empty(currency: &str) -> Self {
        Self {
            headers: headers(currency),
            rows: Vec::new(),
        }
    }

    /// `currency` labels the headers when the request failed.
    pub fn map(result: &FetchResult, currency: &str) -> Result<ViewUpdate<Self>> {
        match result {
            FetchResult::Success(Payload::Ranking(ranking)) => Ok(ViewUpdate::new(
                Self {
                    headers: headers(&ranking.currency),
                    rows: ranking.coins.iter().map(RankingRow::from).collect(),
                },
                "Ranking updated!",
            )),
            FetchResult::Success(other) => Err(wrong_payload("Ranking", other)),
            FetchResult::Failure(f) => Ok(ViewUpdate::new(
                Self::empty(currency),
                format!("Ranking API error: {}", f.display_message(truncate::STATUS)),
            )
            .with_notice(Notice::error(
                "Ranking API Error",
                format!("Could not load the ranking:\n{}", f.message),
            ))),
        }
    }
}

pub fn headers(currency: &str) -> [String; 8] {
    let ccy = currency.to_uppercase();
    [
        "Rank".to_string(),
        "Name (Symbol)".to_string(),
        format!("Price ({})", ccy),
        "1h %".to_string(),
        "24h %".to_string(),
        "7d %".to_string(),
        format!("Market Cap ({})", ccy),
        format!("Volume 24h ({})", ccy),
    ]
}
