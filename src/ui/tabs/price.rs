use eframe::egui::{Button, Grid, RichText, Ui};

use super::{TabContext, currency_options, poll_results};
use crate::config::Settings;
use crate::config::constants::COMMON_CURRENCIES;
use crate::domain::{FetchRequest, PriceParams};
use crate::engine::{FetchResult, PollLoop};
use crate::ui::styles::{UiStyleExt, change_color};
use crate::ui::{UI_CONFIG, UI_TEXT};
use crate::view::PriceView;

pub(crate) struct PriceTab {
    asset_id: String,
    currency: String,
    currencies: Vec<String>,
    view: PriceView,
    status: String,
    poll: PollLoop<FetchResult>,
}

impl PriceTab {
    pub fn new(settings: &Settings) -> Self {
        Self {
            asset_id: settings.price_tab_default_asset_id.clone(),
            currency: settings.price_tab_default_currency.clone(),
            currencies: currency_options(&settings.price_tab_default_currency, COMMON_CURRENCIES),
            view: PriceView::default(),
            status: String::new(),
            poll: PollLoop::default(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.poll.is_busy()
    }

    pub fn poll(&mut self, ctx: &mut TabContext<'_>) {
        if let Some((view, _)) =
            poll_results(&mut self.poll, "Price", &mut self.status, ctx, PriceView::map)
        {
            self.view = view;
        }
    }

    fn fetch(&mut self, ctx: &mut TabContext<'_>) {
        match PriceParams::parse(&self.asset_id, &self.currency) {
            Ok(params) => {
                self.status = format!("Fetching price for {}...", params.asset_id);
                ctx.dispatch(&mut self.poll, FetchRequest::SinglePrice(params));
            }
            Err(e) => ctx.reject_input(e),
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, ctx: &mut TabContext<'_>) {
        ui.horizontal(|ui| {
            ui.label(UI_TEXT.label_asset_id.as_str());
            ui.asset_input(&mut self.asset_id);
            ui.label(UI_TEXT.label_currency.as_str());
            ui.currency_picker("price_currency", &mut self.currency, &self.currencies);

            let button = Button::new(ui.button_text_primary(UI_TEXT.price_button.as_str()));
            if ui.add_enabled(!self.poll.is_busy(), button).clicked() {
                self.fetch(ctx);
            }
        });

        ui.add_space(12.0);
        ui.label_subheader(UI_TEXT.price_results.as_str());

        let c = &UI_CONFIG.colors;
        let rows = [
            (&UI_TEXT.price_label, &self.view.price, c.heading),
            (
                &UI_TEXT.price_change_label,
                &self.view.change_24h,
                change_color(&self.view.change_24h),
            ),
            (&UI_TEXT.price_volume_label, &self.view.volume_24h, c.status),
            (&UI_TEXT.price_updated_label, &self.view.last_updated, c.status),
        ];
        Grid::new("price_results")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                for (label, value, color) in rows {
                    ui.label(RichText::new(label.as_str()).color(c.label));
                    ui.label(RichText::new(value.as_str()).strong().color(color));
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.status_line(&self.status);
    }
}
