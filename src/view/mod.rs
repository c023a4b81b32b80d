//! Toolkit-independent view state. Each tab module maps a `FetchResult` into what the
//! tab shows (rows, labels, status line) plus an optional modal notice.

mod chart;
mod converter;
mod download;
mod price;
mod ranking;
mod watchlist;

pub mod format;

pub use chart::{ChartView, PLACEHOLDER as CHART_PLACEHOLDER};
pub use converter::ConverterView;
pub use download::{PendingSave, SaveOutcome};
pub use price::PriceView;
pub use ranking::{RankingRow, RankingView};
pub use watchlist::{EMPTY_HINT, EditOutcome, WatchlistRow, WatchlistView, add_asset, remove_assets};

use crate::domain::Payload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Blocking, modal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, body)
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, body)
    }

    fn new(level: NoticeLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Work the consumer must do on its own thread after applying a result.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PromptSave(PendingSave),
}

/// Everything a tab needs to re-render after one applied result.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate<V> {
    pub view: V,
    pub status: String,
    pub notice: Option<Notice>,
    pub effect: Option<Effect>,
}

impl<V> ViewUpdate<V> {
    pub fn new(view: V, status: impl Into<String>) -> Self {
        Self {
            view,
            status: status.into(),
            notice: None,
            effect: None,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// Status line and notice for a fault raised while applying a result.
pub fn fault(tab: &str, reason: &str) -> (String, Notice) {
    (
        format!("{} UI error: {}", tab, reason),
        Notice::error(
            "Interface Error",
            format!("An error occurred in the {} interface:\n{}", tab, reason),
        ),
    )
}

fn wrong_payload(tab: &str, payload: &Payload) -> anyhow::Error {
    anyhow::anyhow!(
        "{} tab received an unexpected {} payload",
        tab,
        payload.variant_name()
    )
}
