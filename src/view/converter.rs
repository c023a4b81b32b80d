use anyhow::Result;

use super::format::{amount, capitalize};
use super::{Notice, ViewUpdate, wrong_payload};
use crate::config::constants::truncate;
use crate::domain::Payload;
use crate::engine::FetchResult;

/// Conversion figures are shown with 8 decimals.
const DECIMALS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterView {
    pub result: String,
    pub rate: String,
}

impl Default for ConverterView {
    fn default() -> Self {
        Self {
            result: "-".into(),
            rate: String::new(),
        }
    }
}

impl ConverterView {
    pub fn map(result: &FetchResult) -> Result<ViewUpdate<Self>> {
        match result {
            FetchResult::Success(Payload::Conversion(c)) => {
                let ccy = c.to_currency.to_uppercase();
                let asset = capitalize(&c.from_asset);

                let Some(converted) = c.converted_amount() else {
                    return Ok(ViewUpdate::new(
                        Self {
                            result: "Error".into(),
                            rate: "-".into(),
                        },
                        "Error: missing rate data.",
                    )
                    .with_notice(Notice::warning(
                        "Missing Data",
                        "The API did not provide a valid exchange rate.",
                    )));
                };

                let view = Self {
                    result: format!("{} {}", amount(Some(converted), DECIMALS), ccy),
                    rate: format!(
                        "(1 {} = {} {})",
                        asset,
                        amount(c.rate.price, DECIMALS),
                        ccy
                    ),
                };
                let body = format!("{} {} = {}\n{}", c.amount, asset, view.result, view.rate);
                Ok(ViewUpdate::new(view, "Conversion complete.")
                    .with_notice(Notice::info("Conversion Successful", body)))
            }
            FetchResult::Success(other) => Err(wrong_payload("Converter", other)),
            FetchResult::Failure(f) => Ok(ViewUpdate::new(
                Self {
                    result: "Error".into(),
                    rate: format!("Detail: {}", f.display_message(truncate::STATUS)),
                },
                "API error.",
            )
            .with_notice(Notice::error(
                "Conversion API Error",
                format!("Could not get the exchange rate:\n{}", f.message),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConversionQuote, PriceQuote};
    use crate::view::NoticeLevel;

    fn conversion(rate: Option<f64>) -> FetchResult {
        FetchResult::Success(Payload::Conversion(ConversionQuote {
            amount: 2.0,
            from_asset: "bitcoin".into(),
            to_currency: "eur".into(),
            rate: PriceQuote {
                asset_id: "bitcoin".into(),
                currency: "EUR".into(),
                price: rate,
                change_24h: None,
                volume_24h: None,
                last_updated_at: None,
                last_updated: "N/A".into(),
            },
        }))
    }

    #[test]
    fn success_multiplies_and_formats() {
        let update = ConverterView::map(&conversion(Some(30_000.5))).unwrap();
        assert_eq!(update.view.result, "60,001.00000000 EUR");
        assert_eq!(update.view.rate, "(1 Bitcoin = 30,000.50000000 EUR)");

        let notice = update.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert!(notice.body.starts_with("2 Bitcoin = 60,001.00000000 EUR"));
    }

    #[test]
    fn missing_rate_warns() {
        let update = ConverterView::map(&conversion(None)).unwrap();
        assert_eq!(update.view.result, "Error");
        assert_eq!(update.notice.unwrap().level, NoticeLevel::Warning);
    }
}
