mod coingecko;
mod export;
mod gateway;
mod responses;

pub use {
    coingecko::CoinGeckoGateway,
    export::{ExportFormat, default_file_name, write_series},
    gateway::MarketGateway,
    responses::{AssetPriceFields, ChartSample, MarketChartResponse, MarketCoin, SimplePriceResponse},
};

#[cfg(test)]
pub(crate) use gateway::mock;
