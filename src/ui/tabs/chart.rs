use eframe::egui::{Button, ComboBox, Direction, Layout, RichText, Ui};
use egui_plot::{Axis, AxisHints, HPlacement, Line, Plot, PlotPoints};

use super::{TabContext, currency_options, poll_results};
use crate::config::Settings;
use crate::config::constants::{CHART_FALLBACK_CURRENCIES, DAY_WINDOW_OPTIONS};
use crate::domain::{FetchRequest, HistoryParams};
use crate::engine::{FetchResult, PollLoop};
use crate::ui::styles::UiStyleExt;
use crate::ui::{UI_CONFIG, UI_TEXT};
use crate::utils::epoch_secs_to_date;
use crate::view::{CHART_PLACEHOLDER, ChartView, format};

const DEFAULT_WINDOW: &str = "30";

pub(crate) struct ChartTab {
    asset_id: String,
    currency: String,
    currencies: Vec<String>,
    days: String,
    view: ChartView,
    status: String,
    poll: PollLoop<FetchResult>,
}

impl ChartTab {
    pub fn new(settings: &Settings) -> Self {
        let currencies = chart_currencies(settings);
        let currency = if currencies.contains(&settings.default_vs_currency) {
            settings.default_vs_currency.clone()
        } else {
            currencies.first().cloned().unwrap_or_default()
        };
        Self {
            asset_id: settings.price_tab_default_asset_id.clone(),
            currency,
            currencies,
            days: DEFAULT_WINDOW.to_string(),
            view: ChartView::default(),
            status: String::new(),
            poll: PollLoop::default(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.poll.is_busy()
    }

    pub fn poll(&mut self, ctx: &mut TabContext<'_>) {
        if let Some((view, _)) =
            poll_results(&mut self.poll, "Chart", &mut self.status, ctx, ChartView::map)
        {
            self.view = view;
        }
    }

    fn fetch(&mut self, ctx: &mut TabContext<'_>) {
        match HistoryParams::parse(&self.asset_id, &self.currency, &self.days) {
            Ok(params) => {
                self.status = format!(
                    "Loading chart for {} ({} days)...",
                    params.asset_id, params.days
                );
                ctx.dispatch(&mut self.poll, FetchRequest::HistoricalSeries(params));
            }
            Err(e) => ctx.reject_input(e),
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, ctx: &mut TabContext<'_>) {
        ui.horizontal(|ui| {
            ui.label(UI_TEXT.label_asset_id.as_str());
            ui.asset_input(&mut self.asset_id);
            ui.label(UI_TEXT.label_currency.as_str());
            ui.currency_picker("chart_currency", &mut self.currency, &self.currencies);
            ui.label(UI_TEXT.label_period.as_str());
            ComboBox::from_id_salt("chart_days")
                .selected_text(self.days.as_str())
                .width(60.0)
                .show_ui(ui, |ui| {
                    for window in DAY_WINDOW_OPTIONS {
                        ui.selectable_value(&mut self.days, window.to_string(), *window);
                    }
                });

            let button = Button::new(ui.button_text_primary(UI_TEXT.chart_button.as_str()));
            if ui.add_enabled(!self.poll.is_busy(), button).clicked() {
                self.fetch(ctx);
            }
        });

        ui.add_space(4.0);
        ui.status_line(&self.status);
        ui.add_space(4.0);

        if self.view.is_empty() {
            ui.with_layout(Layout::centered_and_justified(Direction::TopDown), |ui| {
                ui.label_subdued(CHART_PLACEHOLDER);
            });
            return;
        }

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(self.view.title.as_str())
                    .heading()
                    .color(UI_CONFIG.colors.heading),
            );
        });
        self.plot(ui);
    }

    fn plot(&self, ui: &mut Ui) {
        let time_axis = AxisHints::new(Axis::X)
            .label(UI_TEXT.chart_x_axis.as_str())
            .formatter(|mark, _range| epoch_secs_to_date(mark.value));
        let price_axis = AxisHints::new_y()
            .label(self.view.y_label.clone())
            .formatter(|mark, _range| format::money(Some(mark.value)))
            .placement(HPlacement::Left);

        let line = Line::new("", PlotPoints::new(self.view.points.clone()))
            .color(UI_CONFIG.colors.plot_line)
            .width(1.5);

        Plot::new("price_chart")
            .height(UI_CONFIG.plot_height)
            .custom_x_axes(vec![time_axis])
            .custom_y_axes(vec![price_axis])
            .label_formatter(|_, point| {
                format!(
                    "{}\n{}",
                    epoch_secs_to_date(point.x),
                    format::money(Some(point.y))
                )
            })
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.line(line);
            });
    }
}

/// `common_currencies` from the settings, or a fixed list when it is absent or empty.
fn chart_currencies(settings: &Settings) -> Vec<String> {
    match &settings.common_currencies {
        Some(list) if !list.is_empty() => list.iter().map(|c| c.trim().to_lowercase()).collect(),
        _ => currency_options("", CHART_FALLBACK_CURRENCIES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currencies_fall_back_when_unset() {
        let settings = Settings::default();
        assert_eq!(chart_currencies(&settings).len(), CHART_FALLBACK_CURRENCIES.len());

        let custom = Settings {
            common_currencies: Some(vec!["SEK".into(), "usd".into()]),
            ..Settings::default()
        };
        let tab = ChartTab::new(&custom);
        assert_eq!(tab.currencies, ["sek", "usd"]);
        assert_eq!(tab.currency, "usd");
    }

    #[test]
    fn default_currency_outside_the_list_picks_the_first() {
        let custom = Settings {
            common_currencies: Some(vec!["chf".into()]),
            ..Settings::default()
        };
        assert_eq!(ChartTab::new(&custom).currency, "chf");
    }
}
