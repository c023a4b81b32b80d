use std::collections::BTreeSet;

use eframe::egui::{Button, Grid, Key, RichText, ScrollArea, TextEdit, Ui};

use super::{TabContext, poll_results};
use crate::config::Settings;
use crate::domain::{FetchRequest, WatchlistParams, normalize_currency};
use crate::engine::{FetchResult, PollLoop};
use crate::ui::styles::{UiStyleExt, change_color};
use crate::ui::{UI_CONFIG, UI_TEXT};
use crate::view::{EMPTY_HINT, EditOutcome, WatchlistView, add_asset, remove_assets};

pub(crate) struct WatchlistTab {
    currency: String,
    view: WatchlistView,
    selected: BTreeSet<String>,
    add_input: String,
    status: String,
    poll: PollLoop<FetchResult>,
}

impl WatchlistTab {
    /// Builds the tab and immediately loads prices for the saved watchlist.
    pub fn new(ctx: &mut TabContext<'_>) -> Self {
        let currency = normalize_currency(&ctx.store.settings().default_vs_currency)
            .unwrap_or_else(|| Settings::default().default_vs_currency);
        let mut tab = Self {
            view: WatchlistView::empty(&currency),
            currency,
            selected: BTreeSet::new(),
            add_input: String::new(),
            status: String::new(),
            poll: PollLoop::default(),
        };
        tab.refresh(ctx);
        tab
    }

    pub fn is_busy(&self) -> bool {
        self.poll.is_busy()
    }

    pub fn poll(&mut self, ctx: &mut TabContext<'_>) {
        let currency = self.currency.clone();
        if let Some((view, _)) = poll_results(&mut self.poll, "Watchlist", &mut self.status, ctx, |r| {
            WatchlistView::map(r, &currency)
        }) {
            // Selections of assets no longer listed are meaningless.
            self.selected
                .retain(|id| view.removable_ids().any(|r| r == id.as_str()));
            self.view = view;
        }
    }

    fn refresh(&mut self, ctx: &mut TabContext<'_>) {
        let ids = ctx.store.watchlist().ids().to_vec();
        if ids.is_empty() {
            self.view = WatchlistView::empty(&self.currency);
            self.selected.clear();
            self.status = EMPTY_HINT.to_string();
            return;
        }

        let params = match WatchlistParams::parse(&ids, &self.currency) {
            Ok(params) => params,
            Err(e) => return ctx.reject_input(e),
        };
        self.status = format!("Loading prices for {} assets...", params.asset_ids.len());
        ctx.dispatch(&mut self.poll, FetchRequest::WatchlistPrices(params));
    }

    fn apply_edit(&mut self, outcome: EditOutcome, ctx: &mut TabContext<'_>) {
        let refresh = outcome.refresh;
        ctx.notify(outcome.notice);
        if refresh {
            self.refresh(ctx);
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, ctx: &mut TabContext<'_>) {
        let busy = self.poll.is_busy();

        ui.horizontal(|ui| {
            let button = Button::new(ui.button_text_primary(UI_TEXT.wl_refresh.as_str()));
            if ui.add_enabled(!busy, button).clicked() {
                self.refresh(ctx);
            }
            ui.label_subdued(format!("{} assets", ctx.store.watchlist().len()));
        });

        ui.add_space(8.0);
        self.table(ui);
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label(UI_TEXT.wl_add_label.as_str());
            let input = ui.add(
                TextEdit::singleline(&mut self.add_input)
                    .hint_text(UI_TEXT.hint_asset_id.as_str())
                    .desired_width(UI_CONFIG.input_width),
            );
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.button(UI_TEXT.wl_add_button.as_str()).clicked() || submitted {
                let outcome = add_asset(ctx.store, &self.add_input);
                if outcome.refresh {
                    self.add_input.clear();
                }
                self.apply_edit(outcome, ctx);
            }

            ui.separator();

            let remove = Button::new(UI_TEXT.wl_remove_button.as_str());
            if ui.add_enabled(!busy, remove).clicked() {
                let selected: Vec<String> = std::mem::take(&mut self.selected).into_iter().collect();
                let outcome = remove_assets(ctx.store, &selected);
                self.apply_edit(outcome, ctx);
            }
        });

        ui.add_space(8.0);
        ui.status_line(&self.status);
    }

    fn table(&mut self, ui: &mut Ui) {
        let height = UI_CONFIG.table_row_height * 14.0;
        ScrollArea::vertical()
            .max_height(height)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                Grid::new("watchlist_grid")
                    .num_columns(6)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.label("");
                        for header in &self.view.headers {
                            ui.label(RichText::new(header.as_str()).strong());
                        }
                        ui.end_row();

                        for row in &self.view.rows {
                            if row.failed {
                                ui.label("");
                            } else {
                                let mut checked = self.selected.contains(&row.asset_id);
                                if ui.checkbox(&mut checked, "").changed() {
                                    if checked {
                                        self.selected.insert(row.asset_id.clone());
                                    } else {
                                        self.selected.remove(&row.asset_id);
                                    }
                                }
                            }

                            let [asset, price, change, volume, updated] = row.cells();
                            let text_color = if row.failed {
                                UI_CONFIG.colors.error_row
                            } else {
                                UI_CONFIG.colors.status
                            };
                            ui.label(RichText::new(asset).strong());
                            ui.label(RichText::new(price).color(text_color));
                            let change_tint = if row.failed {
                                UI_CONFIG.colors.error_row
                            } else {
                                change_color(change)
                            };
                            ui.label(RichText::new(change).color(change_tint));
                            ui.label(RichText::new(volume).color(text_color));
                            ui.label(RichText::new(updated).color(text_color));
                            ui.end_row();
                        }
                    });
            });
    }
}
