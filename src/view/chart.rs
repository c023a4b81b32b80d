use anyhow::Result;

use super::format::capitalize;
use super::{Notice, ViewUpdate, wrong_payload};
use crate::config::constants::truncate;
use crate::domain::Payload;
use crate::engine::FetchResult;

pub const PLACEHOLDER: &str = "The chart will appear here.";

/// Price line ready for plotting: x is epoch seconds, y is price.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartView {
    pub title: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
}

impl ChartView {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn map(result: &FetchResult) -> Result<ViewUpdate<Self>> {
        match result {
            FetchResult::Success(Payload::Historical(series)) => {
                let asset = capitalize(&series.asset_id);
                let ccy = series.vs_currency.to_uppercase();
                let view = Self {
                    title: format!("{} price ({})", asset, ccy),
                    y_label: format!("Price in {}", ccy),
                    points: series
                        .points
                        .iter()
                        .map(|p| [p.timestamp as f64 / 1000.0, p.price])
                        .collect(),
                };
                Ok(ViewUpdate::new(view, format!("Chart for {} displayed.", asset)))
            }
            FetchResult::Success(other) => Err(wrong_payload("Chart", other)),
            FetchResult::Failure(f) => Ok(ViewUpdate::new(
                Self::default(),
                format!("Chart API error: {}", f.display_message(truncate::STATUS)),
            )
            .with_notice(Notice::error(
                "Chart API Error",
                format!("Could not load the chart data:\n{}", f.message),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayWindow, HistoricalSeries, SeriesPoint};

    #[test]
    fn points_are_seconds_and_price() {
        let result = FetchResult::Success(Payload::Historical(HistoricalSeries {
            asset_id: "ethereum".into(),
            vs_currency: "usd".into(),
            days: DayWindow::Days(7),
            points: vec![SeriesPoint {
                timestamp: 1_700_000_000_000,
                date: String::new(),
                price: 2000.0,
                market_cap: None,
                total_volume: None,
            }],
        }));

        let update = ChartView::map(&result).unwrap();
        assert_eq!(update.view.title, "Ethereum price (USD)");
        assert_eq!(update.view.points, vec![[1_700_000_000.0, 2000.0]]);
        assert_eq!(update.status, "Chart for Ethereum displayed.");
    }

    #[test]
    fn failure_resets_to_placeholder() {
        let result = FetchResult::Failure(crate::engine::FetchFailure::unexpected("nope"));
        let update = ChartView::map(&result).unwrap();
        assert!(update.view.is_empty());
        assert!(update.notice.is_some());
    }
}
