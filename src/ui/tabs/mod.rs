//! One module per tab. Every tab owns its inputs, its view state and a poll loop fed by
//! the worker threads it spawns.

mod chart;
mod converter;
mod download;
mod price;
mod ranking;
mod watchlist;

pub(crate) use chart::ChartTab;
pub(crate) use converter::ConverterTab;
pub(crate) use download::DownloadTab;
pub(crate) use price::PriceTab;
pub(crate) use ranking::RankingTab;
pub(crate) use watchlist::WatchlistTab;

use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::SettingsStore;
use crate::data::MarketGateway;
use crate::domain::FetchRequest;
use crate::engine::{FetchResult, PollLoop, TickOutcome, spawn_fetch};
use crate::error::InputError;
use crate::ui::UI_TEXT;
use crate::view::format::capitalize;
use crate::view::{self, Effect, Notice, ViewUpdate};

/// Shared state a tab may touch while it draws or polls. All of it lives on the UI thread.
pub(crate) struct TabContext<'a> {
    pub gateway: &'a Arc<dyn MarketGateway>,
    pub store: &'a mut SettingsStore,
    pub notices: &'a mut VecDeque<Notice>,
}

impl TabContext<'_> {
    pub fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    pub fn reject_input(&mut self, err: InputError) {
        log::warn!("Input rejected: {}", err);
        self.notify(Notice::warning(
            UI_TEXT.error_input_title.as_str(),
            capitalize(&err.to_string()),
        ));
    }

    /// Spawns a worker for `request` on `poll`. Returns false when the thread could not be
    /// started, in which case the user has already been told.
    pub fn dispatch(&mut self, poll: &mut PollLoop<FetchResult>, request: FetchRequest) -> bool {
        log::debug!("Dispatching {}", request);
        let label = request.to_string();
        match spawn_fetch(Arc::clone(self.gateway), request, poll.dispatch(), |r| r) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Could not start worker for {}: {}", label, e);
                self.notify(Notice::error(
                    "Thread Error",
                    format!("Could not start the request:\n{}", e),
                ));
                false
            }
        }
    }
}

/// Drains at most one result from `poll` into the tab. Returns the mapped view and any
/// effect when something was applied.
pub(crate) fn poll_results<V, M>(
    poll: &mut PollLoop<FetchResult>,
    tab: &str,
    status: &mut String,
    ctx: &mut TabContext<'_>,
    map: M,
) -> Option<(V, Option<Effect>)>
where
    M: FnOnce(&FetchResult) -> anyhow::Result<ViewUpdate<V>>,
{
    let mut applied = None;
    let outcome = poll.tick(|result| {
        let update = map(&result)?;
        *status = update.status;
        if let Some(notice) = update.notice {
            ctx.notices.push_back(notice);
        }
        applied = Some((update.view, update.effect));
        Ok(())
    });

    if let TickOutcome::Fault(reason) = outcome {
        let (line, notice) = view::fault(tab, &reason);
        *status = line;
        ctx.notify(notice);
    }
    applied
}

/// Currency choices for a combo box, keeping a custom value from the settings visible.
pub(crate) fn currency_options(current: &str, base: &[&str]) -> Vec<String> {
    let mut options: Vec<String> = base.iter().map(|c| c.to_string()).collect();
    if !current.is_empty() && !options.iter().any(|c| c == current) {
        options.insert(0, current.to_string());
    }
    options
}
