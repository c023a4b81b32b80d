#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ui;
pub mod utils;
pub mod view;

use std::path::PathBuf;
use std::sync::Arc;

pub use config::{GATEWAY, PERSISTENCE, SettingsStore};
pub use data::{CoinGeckoGateway, MarketGateway};
pub use ui::CryptoDeskApp;

// CLI argument parsing
use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON settings file. Created with defaults when missing.
    #[arg(long, default_value = PERSISTENCE.settings.path)]
    pub settings: PathBuf,

    /// Market-data API base URL
    #[arg(long, default_value = GATEWAY.base_url)]
    pub api_base: String,

    /// Log level for this crate (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<LevelFilter>,
}

/// Global level for dependencies plus a crate-specific level; `crate_level` overrides the
/// build-profile default.
pub fn init_logging(crate_level: Option<LevelFilter>) {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (LevelFilter::Warn, LevelFilter::Info)
    } else {
        (LevelFilter::Error, LevelFilter::Error)
    };

    let _ = env_logger::Builder::new()
        .filter(None, global_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), crate_level.unwrap_or(my_code_level))
        .try_init();
}

/// Main application entry point - creates the GUI app
pub fn run_app(
    cc: &eframe::CreationContext<'_>,
    store: SettingsStore,
    gateway: Arc<dyn MarketGateway>,
) -> CryptoDeskApp {
    CryptoDeskApp::new(cc, store, gateway)
}
