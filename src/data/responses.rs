//! Wire shapes of the three gateway endpoints, validated at the boundary.
//!
//! Numeric fields are read leniently: a missing, null or non-numeric value becomes `None`
//! instead of failing the whole response.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `/simple/price`: asset id -> fields of that asset.
pub type SimplePriceResponse = BTreeMap<String, AssetPriceFields>;

/// The per-asset object of `/simple/price`. Keys depend on the requested currencies
/// (`usd`, `usd_24h_change`, `usd_24h_vol`, ...) so they are kept as a map.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct AssetPriceFields(pub HashMap<String, Value>);

impl AssetPriceFields {
    fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// True when upstream returned anything at all for this currency.
    pub fn has_currency(&self, currency: &str) -> bool {
        self.0.contains_key(currency)
    }

    pub fn price(&self, currency: &str) -> Option<f64> {
        self.number(currency)
    }

    pub fn change_24h(&self, currency: &str) -> Option<f64> {
        self.number(&format!("{}_24h_change", currency))
    }

    pub fn volume_24h(&self, currency: &str) -> Option<f64> {
        self.number(&format!("{}_24h_vol", currency))
    }

    /// Epoch seconds.
    pub fn last_updated_at(&self) -> Option<i64> {
        let v = self.0.get("last_updated_at")?;
        v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
    }
}

/// One element of the `/coins/markets` array.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MarketCoin {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient_rank")]
    pub market_cap_rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price_change_percentage_1h_in_currency: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price_change_percentage_7d_in_currency: Option<f64>,
}

/// `[epoch_ms, value]`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ChartSample(pub f64, pub Option<f64>);

/// `/coins/{id}/market_chart`: three parallel arrays.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<ChartSample>,
    #[serde(default)]
    pub market_caps: Vec<ChartSample>,
    #[serde(default)]
    pub total_volumes: Vec<ChartSample>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}

fn lenient_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|r| u32::try_from(r).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_price_fields_are_read_per_currency() {
        let raw = r#"{"bitcoin":{"usd":50000,"usd_24h_change":2.5,"usd_24h_vol":1.2e10,"last_updated_at":1700000000}}"#;
        let parsed: SimplePriceResponse = serde_json::from_str(raw).unwrap();
        let btc = &parsed["bitcoin"];

        assert!(btc.has_currency("usd"));
        assert!(!btc.has_currency("eur"));
        assert_eq!(btc.price("usd"), Some(50000.0));
        assert_eq!(btc.change_24h("usd"), Some(2.5));
        assert_eq!(btc.volume_24h("usd"), Some(1.2e10));
        assert_eq!(btc.last_updated_at(), Some(1_700_000_000));
    }

    #[test]
    fn market_coin_tolerates_junk_numbers() {
        let raw = r#"{"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":"n/a","market_cap":null,"market_cap_rank":1}"#;
        let coin: MarketCoin = serde_json::from_str(raw).unwrap();

        assert_eq!(coin.current_price, None);
        assert_eq!(coin.market_cap, None);
        assert_eq!(coin.market_cap_rank, Some(1));
        assert_eq!(coin.price_change_percentage_7d_in_currency, None);
    }

    #[test]
    fn chart_samples_are_pairs() {
        let raw = r#"{"prices":[[1700000000000,37000.5]],"market_caps":[[1700000000000,null]]}"#;
        let chart: MarketChartResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(chart.prices, vec![ChartSample(1.7e12, Some(37000.5))]);
        assert_eq!(chart.market_caps[0].1, None);
        assert!(chart.total_volumes.is_empty());
    }
}
