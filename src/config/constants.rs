use std::time::Duration;

/// Log fetches that run longer than their `trace_time!` threshold.
pub const LOG_PERFORMANCE: bool = true;

/// Cadence of every tab's poll loop.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Currencies offered by the price, converter, ranking and download tabs.
pub const COMMON_CURRENCIES: &[&str] = &["usd", "eur", "gbp", "jpy", "btc", "eth", "cad", "aud", "chf"];

/// Chart tab fallback when `common_currencies` is missing from the settings file.
pub const CHART_FALLBACK_CURRENCIES: &[&str] = &["usd", "eur", "gbp", "jpy", "btc", "eth"];

/// Day windows offered by the chart and download tabs.
pub const DAY_WINDOW_OPTIONS: &[&str] = &["7", "30", "90", "180", "365", "max"];

/// `interval` parameter sent to `/market_chart`.
pub const HISTORY_INTERVAL: &str = "daily";

pub mod truncate {
    /// Inline status text on most tabs
    pub const STATUS: usize = 70;
    /// Inline status text on the download tab
    pub const DOWNLOAD_STATUS: usize = 100;
    /// Reason column of a failed watchlist row
    pub const WATCHLIST_ROW: usize = 30;
}

pub mod ranking {
    pub const TOP_N_MIN: u32 = 5;
    pub const TOP_N_MAX: u32 = 100;
    pub const TOP_N_STEP: u32 = 5;
    pub const FIRST_PAGE: u32 = 1;
}
