use std::collections::VecDeque;
use std::sync::Arc;

use eframe::egui::{
    Align2, CentralPanel, Context, Id, Key, Order, RichText, Spinner, TopBottomPanel, Visuals, Window,
};
use eframe::{Frame, Storage};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::config::{POLL_INTERVAL, SettingsStore};
use crate::data::MarketGateway;
use crate::ui::styles::UiStyleExt;
use crate::ui::tabs::{
    ChartTab, ConverterTab, DownloadTab, PriceTab, RankingTab, TabContext, WatchlistTab,
};
use crate::ui::{UI_CONFIG, UI_TEXT};
use crate::view::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
pub enum Tab {
    #[default]
    Price,
    Watchlist,
    Converter,
    Ranking,
    Download,
    Chart,
}

impl Tab {
    fn label(self) -> &'static str {
        match self {
            Tab::Price => UI_TEXT.tab_price.as_str(),
            Tab::Watchlist => UI_TEXT.tab_watchlist.as_str(),
            Tab::Converter => UI_TEXT.tab_converter.as_str(),
            Tab::Ranking => UI_TEXT.tab_ranking.as_str(),
            Tab::Download => UI_TEXT.tab_download.as_str(),
            Tab::Chart => UI_TEXT.tab_chart.as_str(),
        }
    }
}

/// UI-only state kept in eframe's storage between sessions.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PersistedUi {
    pub active_tab: Tab,
}

pub struct CryptoDeskApp {
    ui_state: PersistedUi,
    gateway: Arc<dyn MarketGateway>,
    store: SettingsStore,
    notices: VecDeque<Notice>,

    price: PriceTab,
    watchlist: WatchlistTab,
    converter: ConverterTab,
    ranking: RankingTab,
    download: DownloadTab,
    chart: ChartTab,
}

impl CryptoDeskApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        mut store: SettingsStore,
        gateway: Arc<dyn MarketGateway>,
    ) -> Self {
        let ui_state: PersistedUi = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            PersistedUi::default()
        };

        setup_custom_visuals(&cc.egui_ctx);

        let settings = store.settings().clone();
        let mut notices = VecDeque::new();

        // Watchlist and ranking start loading as soon as they exist.
        let (watchlist, ranking) = {
            let mut ctx = TabContext {
                gateway: &gateway,
                store: &mut store,
                notices: &mut notices,
            };
            (WatchlistTab::new(&mut ctx), RankingTab::new(&mut ctx))
        };

        log::info!(
            "Started with {} watched assets, settings at {}",
            store.watchlist().len(),
            store.path().display()
        );

        Self {
            ui_state,
            price: PriceTab::new(&settings),
            converter: ConverterTab::new(&settings),
            download: DownloadTab::new(&settings),
            chart: ChartTab::new(&settings),
            watchlist,
            ranking,
            gateway,
            store,
            notices,
        }
    }

    /// Runs one tick of every tab's poll loop, visible or not.
    fn poll_tabs(&mut self) {
        let Self {
            gateway,
            store,
            notices,
            price,
            watchlist,
            converter,
            ranking,
            download,
            chart,
            ..
        } = self;
        let mut ctx = TabContext {
            gateway,
            store,
            notices,
        };

        price.poll(&mut ctx);
        watchlist.poll(&mut ctx);
        converter.poll(&mut ctx);
        ranking.poll(&mut ctx);
        download.poll(&mut ctx);
        chart.poll(&mut ctx);
    }

    fn render_active_tab(&mut self, ui: &mut eframe::egui::Ui) {
        let Self {
            ui_state,
            gateway,
            store,
            notices,
            price,
            watchlist,
            converter,
            ranking,
            download,
            chart,
        } = self;
        let mut ctx = TabContext {
            gateway,
            store,
            notices,
        };

        match ui_state.active_tab {
            Tab::Price => price.ui(ui, &mut ctx),
            Tab::Watchlist => watchlist.ui(ui, &mut ctx),
            Tab::Converter => converter.ui(ui, &mut ctx),
            Tab::Ranking => ranking.ui(ui, &mut ctx),
            Tab::Download => download.ui(ui, &mut ctx),
            Tab::Chart => chart.ui(ui, &mut ctx),
        }
    }

    /// Shows the oldest queued notice until the user acknowledges it.
    fn render_notice(&mut self, ctx: &Context) {
        let Some(notice) = self.notices.front() else {
            return;
        };

        let mut acknowledged = false;
        Window::new(notice.title.as_str())
            .id(Id::new("notice_window"))
            .order(Order::Tooltip)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_max_width(420.0);
                ui.label(RichText::new(notice.body.as_str()).color(UI_CONFIG.notice_color(notice.level)));
                ui.add_space(8.0);
                if ui.button(UI_TEXT.notice_ok.as_str()).clicked() {
                    acknowledged = true;
                }
            });

        if acknowledged || ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.notices.pop_front();
        }
    }

    fn any_busy(&self) -> bool {
        [
            self.price.is_busy(),
            self.watchlist.is_busy(),
            self.converter.is_busy(),
            self.ranking.is_busy(),
            self.download.is_busy(),
            self.chart.is_busy(),
        ]
        .into_iter()
        .any(|b| b)
    }
}

/// Sets up custom visuals for the entire application
fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

impl eframe::App for CryptoDeskApp {
    fn save(&mut self, storage: &mut dyn Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.ui_state);
    }

    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.poll_tabs();

        TopBottomPanel::top("tab_bar")
            .frame(UI_CONFIG.top_panel_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for tab in Tab::iter() {
                        ui.selectable_value(&mut self.ui_state.active_tab, tab, tab.label());
                    }
                });
            });

        let busy = self.any_busy();
        TopBottomPanel::bottom("status_bar")
            .frame(UI_CONFIG.bottom_panel_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label_subdued(format!("Settings: {}", self.store.path().display()));
                    if busy {
                        ui.separator();
                        ui.add(Spinner::new());
                    }
                });
            });

        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| self.render_active_tab(ui));

        self.render_notice(ctx);

        // Poll loops are driven by frames, so keep frames coming while idle.
        ctx.request_repaint_after(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_ui_survives_a_round_trip() {
        let restored: PersistedUi = serde_json::from_str("{}").unwrap();
        assert_eq!(restored.active_tab, Tab::Price);

        let saved = serde_json::to_string(&PersistedUi {
            active_tab: Tab::Chart,
        })
        .unwrap();
        let restored: PersistedUi = serde_json::from_str(&saved).unwrap();
        assert_eq!(restored.active_tab, Tab::Chart);
    }

    #[test]
    fn every_tab_has_a_label() {
        assert_eq!(Tab::iter().count(), 6);
        assert!(Tab::iter().all(|t| !t.label().is_empty()));
    }
}
