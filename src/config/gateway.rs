use std::time::Duration;

/// Per-endpoint timeouts. There is no retry: a request that times out becomes a failure.
pub struct Timeouts {
    /// `/simple/price` and `/coins/markets`
    pub simple: Duration,
    /// `/coins/{id}/market_chart` can return a lot of points
    pub history: Duration,
}

pub struct Endpoints {
    pub simple_price: &'static str,
    pub coins_markets: &'static str,
    /// `{id}` is replaced with the asset id
    pub market_chart: &'static str,
}

pub struct GatewayConfig {
    pub base_url: &'static str,
    pub user_agent: &'static str,
    pub endpoints: Endpoints,
    pub timeouts: Timeouts,
}

pub const GATEWAY: GatewayConfig = GatewayConfig {
    base_url: "https://api.coingecko.com/api/v3",
    user_agent: concat!("crypto-desk/", env!("CARGO_PKG_VERSION")),
    endpoints: Endpoints {
        simple_price: "/simple/price",
        coins_markets: "/coins/markets",
        market_chart: "/coins/{id}/market_chart",
    },
    timeouts: Timeouts {
        simple: Duration::from_secs(10),
        history: Duration::from_secs(20),
    },
};
