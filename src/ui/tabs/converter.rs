use eframe::egui::{Button, Grid, TextEdit, Ui};

use super::{TabContext, currency_options, poll_results};
use crate::config::Settings;
use crate::config::constants::COMMON_CURRENCIES;
use crate::domain::{ConversionParams, FetchRequest};
use crate::engine::{FetchResult, PollLoop};
use crate::ui::styles::UiStyleExt;
use crate::ui::{UI_CONFIG, UI_TEXT};
use crate::view::ConverterView;

pub(crate) struct ConverterTab {
    amount: String,
    from_asset: String,
    to_currency: String,
    currencies: Vec<String>,
    view: ConverterView,
    status: String,
    poll: PollLoop<FetchResult>,
}

impl ConverterTab {
    pub fn new(settings: &Settings) -> Self {
        Self {
            amount: settings.converter_tab_default_amount.clone(),
            from_asset: settings.converter_tab_default_from_asset.clone(),
            to_currency: settings.converter_tab_default_to_currency.clone(),
            currencies: currency_options(
                &settings.converter_tab_default_to_currency,
                COMMON_CURRENCIES,
            ),
            view: ConverterView::default(),
            status: String::new(),
            poll: PollLoop::default(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.poll.is_busy()
    }

    pub fn poll(&mut self, ctx: &mut TabContext<'_>) {
        if let Some((view, _)) = poll_results(
            &mut self.poll,
            "Converter",
            &mut self.status,
            ctx,
            ConverterView::map,
        ) {
            self.view = view;
        }
    }

    fn convert(&mut self, ctx: &mut TabContext<'_>) {
        match ConversionParams::parse(&self.amount, &self.from_asset, &self.to_currency) {
            Ok(params) => {
                self.status = format!(
                    "Converting {} {} to {}...",
                    params.amount,
                    params.from_asset,
                    params.to_currency.to_uppercase()
                );
                self.view = ConverterView::default();
                ctx.dispatch(&mut self.poll, FetchRequest::ConversionRate(params));
            }
            Err(e) => ctx.reject_input(e),
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, ctx: &mut TabContext<'_>) {
        Grid::new("converter_inputs")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                ui.label(UI_TEXT.conv_amount.as_str());
                ui.add(TextEdit::singleline(&mut self.amount).desired_width(UI_CONFIG.input_width));
                ui.end_row();

                ui.label(UI_TEXT.conv_from.as_str());
                ui.asset_input(&mut self.from_asset);
                ui.end_row();

                ui.label(UI_TEXT.conv_to.as_str());
                ui.currency_picker("converter_currency", &mut self.to_currency, &self.currencies);
                ui.end_row();
            });

        ui.add_space(8.0);
        let button = Button::new(ui.button_text_primary(UI_TEXT.conv_button.as_str()));
        if ui.add_enabled(!self.poll.is_busy(), button).clicked() {
            self.convert(ctx);
        }

        ui.add_space(12.0);
        ui.metric(&UI_TEXT.conv_result, &self.view.result, UI_CONFIG.colors.heading);
        if !self.view.rate.is_empty() {
            ui.label_subdued(self.view.rate.as_str());
        }

        ui.add_space(8.0);
        ui.status_line(&self.status);
    }
}
