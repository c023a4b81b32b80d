use eframe::egui::{Button, Grid, RichText, ScrollArea, Slider, Ui};

use super::{TabContext, currency_options, poll_results};
use crate::config::constants::{COMMON_CURRENCIES, ranking};
use crate::domain::{FetchRequest, RankingParams};
use crate::engine::{FetchResult, PollLoop};
use crate::ui::styles::{UiStyleExt, change_color};
use crate::ui::{UI_CONFIG, UI_TEXT};
use crate::view::RankingView;

/// Columns holding a signed percentage.
const CHANGE_COLUMNS: [usize; 3] = [3, 4, 5];

pub(crate) struct RankingTab {
    top_n: u32,
    currency: String,
    currencies: Vec<String>,
    view: RankingView,
    status: String,
    poll: PollLoop<FetchResult>,
}

impl RankingTab {
    /// Builds the tab and immediately loads the default ranking.
    pub fn new(ctx: &mut TabContext<'_>) -> Self {
        let settings = ctx.store.settings();
        let currency = settings.default_vs_currency.clone();
        let top_n = settings
            .default_rank_top_n
            .clamp(ranking::TOP_N_MIN, ranking::TOP_N_MAX);
        let mut tab = Self {
            top_n,
            currencies: currency_options(&currency, COMMON_CURRENCIES),
            view: RankingView::empty(&currency),
            currency,
            status: String::new(),
            poll: PollLoop::default(),
        };
        tab.fetch(ctx);
        tab
    }

    pub fn is_busy(&self) -> bool {
        self.poll.is_busy()
    }

    pub fn poll(&mut self, ctx: &mut TabContext<'_>) {
        let currency = self.currency.clone();
        if let Some((view, _)) = poll_results(&mut self.poll, "Ranking", &mut self.status, ctx, |r| {
            RankingView::map(r, &currency)
        }) {
            self.view = view;
        }
    }

    fn fetch(&mut self, ctx: &mut TabContext<'_>) {
        match RankingParams::parse(self.top_n, &self.currency) {
            Ok(params) => {
                self.status = format!(
                    "Loading top {} by market cap in {}...",
                    params.top_n,
                    params.currency.to_uppercase()
                );
                ctx.dispatch(&mut self.poll, FetchRequest::MarketRanking(params));
            }
            Err(e) => ctx.reject_input(e),
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, ctx: &mut TabContext<'_>) {
        ui.horizontal(|ui| {
            ui.label(UI_TEXT.rank_top_n.as_str());
            ui.add(
                Slider::new(&mut self.top_n, ranking::TOP_N_MIN..=ranking::TOP_N_MAX)
                    .step_by(ranking::TOP_N_STEP as f64),
            );
            ui.label(UI_TEXT.label_currency.as_str());
            ui.currency_picker("ranking_currency", &mut self.currency, &self.currencies);

            let button = Button::new(ui.button_text_primary(UI_TEXT.rank_button.as_str()));
            if ui.add_enabled(!self.poll.is_busy(), button).clicked() {
                self.fetch(ctx);
            }
        });

        ui.add_space(8.0);
        ui.status_line(&self.status);
        ui.add_space(8.0);

        ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            Grid::new("ranking_grid")
                .num_columns(self.view.headers.len())
                .spacing([20.0, 8.0])
                .striped(true)
                .show(ui, |ui| {
                    for header in &self.view.headers {
                        ui.label(RichText::new(header.as_str()).strong());
                    }
                    ui.end_row();

                    for row in &self.view.rows {
                        for (col, cell) in row.cells().into_iter().enumerate() {
                            let color = if CHANGE_COLUMNS.contains(&col) {
                                change_color(cell)
                            } else {
                                UI_CONFIG.colors.status
                            };
                            ui.label(RichText::new(cell).color(color));
                        }
                        ui.end_row();
                    }
                });
        });
    }
}
