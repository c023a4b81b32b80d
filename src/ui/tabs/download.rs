use std::path::PathBuf;

use eframe::egui::{Align2, Button, ComboBox, Context, DragValue, Grid, Order, TextEdit, Ui, Window};
use strum::IntoEnumIterator;

use super::{TabContext, currency_options, poll_results};
use crate::config::Settings;
use crate::config::constants::COMMON_CURRENCIES;
use crate::data::ExportFormat;
use crate::domain::{FetchRequest, HistoryParams};
use crate::engine::{FetchResult, PollLoop};
use crate::ui::styles::UiStyleExt;
use crate::ui::{UI_CONFIG, UI_TEXT};
use crate::view::{Effect, PendingSave};

/// Upper bound of the day spinner.
const MAX_DOWNLOAD_DAYS: u32 = 3650;

/// A series waiting on the save prompt, plus the path being edited.
struct SavePrompt {
    pending: PendingSave,
    path: String,
}

pub(crate) struct DownloadTab {
    asset_id: String,
    currency: String,
    currencies: Vec<String>,
    days: u32,
    format: ExportFormat,
    prompt: Option<SavePrompt>,
    status: String,
    poll: PollLoop<FetchResult>,
}

impl DownloadTab {
    pub fn new(settings: &Settings) -> Self {
        Self {
            asset_id: settings.download_tab_default_asset_id.clone(),
            currency: settings.default_vs_currency.clone(),
            currencies: currency_options(&settings.default_vs_currency, COMMON_CURRENCIES),
            days: settings.default_download_days.clamp(1, MAX_DOWNLOAD_DAYS),
            format: ExportFormat::from_setting(&settings.download_tab_default_file_format),
            prompt: None,
            status: String::new(),
            poll: PollLoop::default(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.poll.is_busy()
    }

    pub fn poll(&mut self, ctx: &mut TabContext<'_>) {
        let format = self.format;
        let applied = poll_results(&mut self.poll, "Download", &mut self.status, ctx, |r| {
            PendingSave::map(r, format)
        });
        if let Some((_, Some(Effect::PromptSave(pending)))) = applied {
            self.prompt = Some(SavePrompt {
                path: pending.suggested_name.clone(),
                pending,
            });
        }
    }

    fn fetch(&mut self, ctx: &mut TabContext<'_>) {
        match HistoryParams::parse(&self.asset_id, &self.currency, &self.days.to_string()) {
            Ok(params) => {
                self.status = format!(
                    "Downloading {} days of {} in {}...",
                    params.days,
                    params.asset_id,
                    params.currency.to_uppercase()
                );
                ctx.dispatch(&mut self.poll, FetchRequest::HistoricalSeries(params));
            }
            Err(e) => ctx.reject_input(e),
        }
    }

    fn finish_save(&mut self, path: Option<PathBuf>, ctx: &mut TabContext<'_>) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let outcome = prompt.pending.save(path.as_deref());
        self.status = outcome.status;
        if let Some(notice) = outcome.notice {
            ctx.notify(notice);
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, ctx: &mut TabContext<'_>) {
        Grid::new("download_inputs")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                ui.label(UI_TEXT.label_asset_id.as_str());
                ui.asset_input(&mut self.asset_id);
                ui.end_row();

                ui.label(UI_TEXT.label_currency.as_str());
                ui.currency_picker("download_currency", &mut self.currency, &self.currencies);
                ui.end_row();

                ui.label(UI_TEXT.dl_days.as_str());
                ui.add(DragValue::new(&mut self.days).range(1..=MAX_DOWNLOAD_DAYS));
                ui.end_row();

                ui.label(UI_TEXT.dl_format.as_str());
                ComboBox::from_id_salt("download_format")
                    .selected_text(self.format.to_string())
                    .show_ui(ui, |ui| {
                        for format in ExportFormat::iter() {
                            ui.selectable_value(&mut self.format, format, format.to_string());
                        }
                    });
                ui.end_row();
            });

        ui.add_space(8.0);
        let idle = !self.poll.is_busy() && self.prompt.is_none();
        let button = Button::new(ui.button_text_primary(UI_TEXT.dl_button.as_str()));
        if ui.add_enabled(idle, button).clicked() {
            self.fetch(ctx);
        }

        ui.add_space(8.0);
        ui.status_line(&self.status);

        self.save_prompt(ui.ctx(), ctx);
    }

    /// Asks for the destination of a downloaded series. Runs on the UI thread.
    fn save_prompt(&mut self, egui_ctx: &Context, ctx: &mut TabContext<'_>) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };

        let mut answer: Option<Option<PathBuf>> = None;
        Window::new(UI_TEXT.dl_save_title.as_str())
            .order(Order::Tooltip)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(egui_ctx, |ui| {
                ui.label_subdued(format!(
                    "{} data points, {}",
                    prompt.pending.series.points.len(),
                    prompt.pending.format
                ));
                ui.horizontal(|ui| {
                    ui.label(UI_TEXT.dl_save_path.as_str());
                    ui.add(TextEdit::singleline(&mut prompt.path).desired_width(UI_CONFIG.input_width * 2.0));
                });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let can_save = !prompt.path.trim().is_empty();
                    if ui.add_enabled(can_save, Button::new(UI_TEXT.dl_save.as_str())).clicked() {
                        answer = Some(Some(PathBuf::from(prompt.path.trim())));
                    }
                    if ui.button(UI_TEXT.dl_cancel.as_str()).clicked() {
                        answer = Some(None);
                    }
                });
            });

        if let Some(path) = answer {
            self.finish_save(path, ctx);
        }
    }
}
