use anyhow::Result;

use super::format::{money, percent};
use super::{Notice, ViewUpdate, wrong_payload};
use crate::config::constants::truncate;
use crate::domain::Payload;
use crate::engine::FetchResult;

const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceView {
    pub price: String,
    pub change_24h: String,
    pub volume_24h: String,
    pub last_updated: String,
}

impl Default for PriceView {
    fn default() -> Self {
        Self {
            price: PLACEHOLDER.into(),
            change_24h: PLACEHOLDER.into(),
            volume_24h: PLACEHOLDER.into(),
            last_updated: PLACEHOLDER.into(),
        }
    }
}

impl PriceView {
    pub fn map(result: &FetchResult) -> Result<ViewUpdate<Self>> {
        match result {
            FetchResult::Success(Payload::SinglePrice(q)) => {
                let view = Self {
                    price: format!("{} {}", money(q.price), q.currency),
                    change_24h: percent(q.change_24h),
                    volume_24h: format!("{} {}", money(q.volume_24h), q.currency),
                    last_updated: q.last_updated.clone(),
                };
                Ok(ViewUpdate::new(view, format!("Data for {} updated!", q.asset_id)))
            }
            FetchResult::Success(other) => Err(wrong_payload("Price", other)),
            FetchResult::Failure(f) => {
                let short = f.display_message(truncate::STATUS);
                let view = Self {
                    price: "Error".into(),
                    change_24h: format!("Detail: {}", short),
                    ..Self::default()
                };
                Ok(ViewUpdate::new(view, format!("API error: {}", short)).with_notice(
                    Notice::error("API Error", format!("Could not fetch the data:\n{}", f.message)),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceQuote;
    use crate::engine::{FailureCategory, FetchFailure};

    #[test]
    fn success_renders_all_fields() {
        let result = FetchResult::Success(Payload::SinglePrice(PriceQuote {
            asset_id: "bitcoin".into(),
            currency: "USD".into(),
            price: Some(50000.0),
            change_24h: Some(2.5),
            volume_24h: None,
            last_updated_at: None,
            last_updated: "N/A".into(),
        }));

        let update = PriceView::map(&result).unwrap();
        assert_eq!(update.view.price, "50,000.00 USD");
        assert_eq!(update.view.change_24h, "2.50%");
        assert_eq!(update.view.volume_24h, "N/A USD");
        assert_eq!(update.status, "Data for bitcoin updated!");
        assert!(update.notice.is_none());
    }

    #[test]
    fn failure_truncates_status_and_raises_notice() {
        let long = "x".repeat(200);
        let result = FetchResult::Failure(FetchFailure::new(FailureCategory::Transport, &long));

        let update = PriceView::map(&result).unwrap();
        assert_eq!(update.view.price, "Error");
        assert_eq!(update.status.chars().count(), "API error: ".len() + 73);
        let notice = update.notice.unwrap();
        assert!(notice.body.ends_with(&long));
    }

    #[test]
    fn wrong_payload_is_an_error() {
        let result = FetchResult::Success(Payload::Ranking(crate::domain::MarketRanking {
            currency: "USD".into(),
            coins: vec![],
        }));
        assert!(PriceView::map(&result).is_err());
    }
}
