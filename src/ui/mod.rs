mod app;
mod styles;
mod tabs;
mod ui_config;
mod ui_text;

pub use app::{CryptoDeskApp, PersistedUi, Tab};

pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
