use anyhow::Result;
use itertools::Itertools;

use super::format::{capitalize, money, percent};
use super::{Notice, ViewUpdate, wrong_payload};
use crate::config::{SettingsStore, WatchlistEdit};
use crate::config::constants::truncate;
use crate::domain::Payload;
use crate::engine::FetchResult;
use crate::error::SettingsError;

pub const EMPTY_HINT: &str = "Watchlist is empty. Add assets below.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistRow {
    pub asset_id: String,
    pub asset: String,
    pub price: String,
    pub change_24h: String,
    pub volume_24h: String,
    pub last_updated: String,
    /// Error rows are shown but cannot be selected for removal.
    pub failed: bool,
}

impl WatchlistRow {
    pub fn cells(&self) -> [&str; 5] {
        [
            self.asset.as_str(),
            self.price.as_str(),
            self.change_24h.as_str(),
            self.volume_24h.as_str(),
            self.last_updated.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistView {
    pub headers: [String; 5],
    pub rows: Vec<WatchlistRow>,
}

impl WatchlistView {
    pub fn empty(currency: &str) -> Self {
        Self {
            headers: headers(currency),
            rows: Vec::new(),
        }
    }

    /// `currency` is the single column currency, lower-case as requested.
    pub fn map(result: &FetchResult, currency: &str) -> Result<ViewUpdate<Self>> {
        match result {
            FetchResult::Success(Payload::Watchlist(snapshot)) => {
                let rows = snapshot
                    .entries
                    .iter()
                    .map(|entry| match &entry.outcome {
                        Ok(quotes) => {
                            let q = quotes.quote(currency);
                            WatchlistRow {
                                asset_id: entry.asset_id.clone(),
                                asset: capitalize(&entry.asset_id),
                                price: money(q.and_then(|q| q.price)),
                                change_24h: percent(q.and_then(|q| q.change_24h)),
                                volume_24h: money(q.and_then(|q| q.volume_24h)),
                                last_updated: quotes.last_updated.clone(),
                                failed: false,
                            }
                        }
                        Err(f) => WatchlistRow {
                            asset_id: entry.asset_id.clone(),
                            asset: capitalize(&entry.asset_id),
                            price: "Error".into(),
                            change_24h: f.display_message(truncate::WATCHLIST_ROW),
                            volume_24h: "-".into(),
                            last_updated: "-".into(),
                            failed: true,
                        },
                    })
                    .collect();

                let failed = snapshot.failed_count();
                let status = if failed == 0 {
                    "Watchlist updated.".to_string()
                } else {
                    format!("Watchlist updated ({} of {} unavailable).", failed, snapshot.entries.len())
                };
                Ok(ViewUpdate::new(
                    Self {
                        headers: headers(currency),
                        rows,
                    },
                    status,
                ))
            }
            FetchResult::Success(other) => Err(wrong_payload("Watchlist", other)),
            FetchResult::Failure(f) => Ok(ViewUpdate::new(
                Self::empty(currency),
                format!("Watchlist API error: {}", f.display_message(truncate::STATUS)),
            )
            .with_notice(Notice::error(
                "Watchlist API Error",
                format!("Could not update the watchlist:\n{}", f.message),
            ))),
        }
    }

    /// Asset ids of the rows that may be removed.
    pub fn removable_ids(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter(|r| !r.failed)
            .map(|r| r.asset_id.as_str())
    }
}

pub fn headers(currency: &str) -> [String; 5] {
    let ccy = currency.to_uppercase();
    [
        "Asset ID".to_string(),
        format!("Price ({})", ccy),
        "24h Change (%)".to_string(),
        format!("Volume 24h ({})", ccy),
        "Last Updated".to_string(),
    ]
}

/// Notice to show after an edit, and whether the watchlist must be fetched again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub notice: Notice,
    pub refresh: bool,
}

impl EditOutcome {
    fn notice_only(notice: Notice) -> Self {
        Self {
            notice,
            refresh: false,
        }
    }
}

pub fn add_asset(store: &mut SettingsStore, raw_id: &str) -> EditOutcome {
    match store.add_to_watchlist(raw_id) {
        Ok(WatchlistEdit::Added(id)) => EditOutcome {
            notice: Notice::info(
                "Watchlist Updated",
                format!("'{}' added to the watchlist and settings saved.", capitalize(&id)),
            ),
            refresh: true,
        },
        Ok(WatchlistEdit::AlreadyPresent(id)) => EditOutcome::notice_only(Notice::info(
            "Asset Exists",
            format!("'{}' is already in the watchlist.", capitalize(&id)),
        )),
        Err(SettingsError::EmptyAssetId) => EditOutcome::notice_only(Notice::warning(
            "Empty Input",
            "Enter an asset id to add.",
        )),
        Err(e) => EditOutcome::notice_only(Notice::error(
            "Save Error",
            format!("Could not save the updated settings:\n{}", e),
        )),
    }
}

pub fn remove_assets(store: &mut SettingsStore, selected: &[String]) -> EditOutcome {
    if selected.is_empty() {
        return EditOutcome::notice_only(Notice::warning(
            "No Selection",
            "Select one or more assets to remove from the watchlist.",
        ));
    }

    match store.remove_from_watchlist(selected) {
        Ok(removed) if removed.is_empty() => EditOutcome::notice_only(Notice::info(
            "No Changes",
            "No valid asset selected for removal, or assets already removed.",
        )),
        Ok(removed) => EditOutcome {
            notice: Notice::info(
                "Watchlist Updated",
                format!(
                    "{} asset(s) ({}) removed from the watchlist and settings saved.",
                    removed.len(),
                    removed.iter().map(|id| capitalize(id)).join(", ")
                ),
            ),
            refresh: true,
        },
        Err(e) => EditOutcome::notice_only(Notice::error(
            "Save Error",
            format!("Could not save the settings after removal:\n{}", e),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::domain::{AssetQuotes, CurrencyQuote, WatchlistEntryResult, WatchlistSnapshot};
    use crate::engine::{FetchFailure, MissingScope};
    use crate::utils::NOT_AVAILABLE;
    use crate::view::NoticeLevel;
    use tempfile::tempdir;

    fn snapshot() -> FetchResult {
        FetchResult::Success(Payload::Watchlist(WatchlistSnapshot {
            currencies: vec!["eur".into()],
            entries: vec![
                WatchlistEntryResult {
                    asset_id: "bitcoin".into(),
                    outcome: Ok(AssetQuotes {
                        quotes: vec![(
                            "eur".into(),
                            CurrencyQuote {
                                price: Some(46_000.0),
                                change_24h: Some(-1.234),
                                volume_24h: None,
                            },
                        )],
                        last_updated: "2023-11-14 22:13:20".into(),
                    }),
                },
                WatchlistEntryResult {
                    asset_id: "notacoin".into(),
                    outcome: Err(FetchFailure::missing(
                        MissingScope::Partial,
                        "No data found for notacoin, which is a long asset id.",
                    )),
                },
            ],
        }))
    }

    #[test]
    fn rows_and_headers_follow_the_currency() {
        let update = WatchlistView::map(&snapshot(), "eur").unwrap();
        let view = update.view;

        assert_eq!(view.headers[1], "Price (EUR)");
        assert_eq!(view.headers[3], "Volume 24h (EUR)");
        assert_eq!(view.rows[0].asset, "Bitcoin");
        assert_eq!(view.rows[0].price, "46,000.00");
        assert_eq!(view.rows[0].change_24h, "-1.23%");
        assert_eq!(view.rows[0].volume_24h, NOT_AVAILABLE);
        assert_eq!(update.status, "Watchlist updated (1 of 2 unavailable).");
        assert!(update.notice.is_none());
    }

    #[test]
    fn failed_rows_are_marked_and_not_removable() {
        let view = WatchlistView::map(&snapshot(), "eur").unwrap().view;
        let err_row = &view.rows[1];

        assert!(err_row.failed);
        assert_eq!(err_row.price, "Error");
        assert_eq!(err_row.change_24h.chars().count(), 33);
        assert_eq!(view.removable_ids().collect::<Vec<_>>(), ["bitcoin"]);
    }

    #[test]
    fn total_failure_clears_rows_with_a_notice() {
        let result = FetchResult::Failure(FetchFailure::unexpected("boom"));
        let update = WatchlistView::map(&result, "usd").unwrap();

        assert!(update.view.rows.is_empty());
        assert_eq!(update.notice.unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn edits_refresh_only_when_something_changed() {
        let dir = tempdir().unwrap();
        let mut store = SettingsStore::new(dir.path().join("config.json"), Settings::default());

        let added = add_asset(&mut store, "Polkadot");
        assert!(added.refresh);
        assert!(store.watchlist().contains("polkadot"));

        let dup = add_asset(&mut store, "polkadot");
        assert!(!dup.refresh);
        assert_eq!(dup.notice.title, "Asset Exists");

        let empty = add_asset(&mut store, "   ");
        assert_eq!(empty.notice.level, NoticeLevel::Warning);

        let none = remove_assets(&mut store, &[]);
        assert!(!none.refresh);

        let removed = remove_assets(&mut store, &["polkadot".into(), "ghost".into()]);
        assert!(removed.refresh);
        assert!(removed.notice.body.starts_with("1 asset(s) (Polkadot)"));
    }

    #[test]
    fn failed_save_reports_an_error_notice() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("config.json");
        let mut store = SettingsStore::new(path, Settings::default());

        let outcome = add_asset(&mut store, "polkadot");
        assert!(!outcome.refresh);
        assert_eq!(outcome.notice.level, NoticeLevel::Error);
        assert!(!store.watchlist().contains("polkadot"));
    }
}
