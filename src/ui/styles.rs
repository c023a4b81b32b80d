use {
    crate::{
        ui::{UI_CONFIG, UI_TEXT},
        utils::NOT_AVAILABLE,
    },
    eframe::egui::{Color32, ComboBox, RichText, TextEdit, Ui},
};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Green for gains, red for losses, neutral for "N/A" and placeholders.
pub fn change_color(formatted: &str) -> Color32 {
    if formatted == NOT_AVAILABLE || formatted == "-" {
        UI_CONFIG.colors.label
    } else if formatted.starts_with('-') {
        UI_CONFIG.colors.negative
    } else {
        UI_CONFIG.colors.positive
    }
}

pub(crate) trait UiStyleExt {
    fn label_subdued(&mut self, text: impl Into<String>);
    fn metric(&mut self, label: &str, value: &str, color: Color32);
    fn label_subheader(&mut self, text: impl Into<String>);
    fn status_line(&mut self, text: &str);
    fn button_text_primary(&self, text: impl Into<String>) -> RichText;
    fn asset_input(&mut self, value: &mut String);
    fn currency_picker(&mut self, id_salt: &str, value: &mut String, options: &[String]);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            ui.label(RichText::new(format!("{}:", label)).color(UI_CONFIG.colors.label));
            ui.label(RichText::new(value).strong().color(color));
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }

    fn status_line(&mut self, text: &str) {
        if !text.is_empty() {
            self.label(RichText::new(text).italics().color(UI_CONFIG.colors.status));
        }
    }

    fn button_text_primary(&self, text: impl Into<String>) -> RichText {
        RichText::new(text).strong().color(Color32::GREEN)
    }

    fn asset_input(&mut self, value: &mut String) {
        self.add(
            TextEdit::singleline(value)
                .hint_text(UI_TEXT.hint_asset_id.as_str())
                .desired_width(UI_CONFIG.input_width),
        );
    }

    fn currency_picker(&mut self, id_salt: &str, value: &mut String, options: &[String]) {
        ComboBox::from_id_salt(id_salt)
            .selected_text(value.as_str())
            .width(80.0)
            .show_ui(self, |ui| {
                for ccy in options {
                    ui.selectable_value(value, ccy.clone(), ccy.as_str());
                }
            });
    }
}
