// Domain types and value objects
mod payload;
mod request;
mod watchlist;

pub use payload::{
    AssetQuotes, ConversionQuote, CurrencyQuote, HistoricalSeries, MarketRanking, Payload,
    PriceQuote, RankedCoin, SeriesPoint, WatchlistEntryResult, WatchlistSnapshot,
};
pub use request::{
    ConversionParams, DayWindow, FetchKind, FetchRequest, HistoryParams, PriceParams,
    RankingParams, WatchlistParams, normalize_currency,
};
pub use watchlist::{Watchlist, normalize_asset_id};
