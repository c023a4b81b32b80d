#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // Windows release: hide console window
use {
    clap::Parser,
    crypto_desk::{
        CoinGeckoGateway, Cli, MarketGateway, PERSISTENCE, SettingsStore, config::Settings,
        init_logging, run_app,
    },
    eframe::NativeOptions,
    std::{panic, path::PathBuf, process, sync::Arc},
};

fn main() -> eframe::Result {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let args = Cli::parse();
    init_logging(args.log_level);

    let store = match SettingsStore::load(&args.settings) {
        Ok(store) => store,
        Err(e) => {
            // Keep running on defaults; edits will retry the write.
            log::error!("Could not write settings file {}: {}", args.settings.display(), e);
            SettingsStore::new(&args.settings, Settings::default())
        }
    };

    let gateway: Arc<dyn MarketGateway> = match CoinGeckoGateway::new(&args.api_base) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            log::error!("Invalid API base URL '{}': {}", args.api_base, e);
            eprintln!("Invalid API base URL '{}': {}", args.api_base, e);
            process::exit(2);
        }
    };

    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(PERSISTENCE.app.state_path)),
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_title("Crypto Desk - CoinGecko market data"),
        ..Default::default()
    };

    eframe::run_native(
        "Crypto Desk",
        options,
        Box::new(move |cc| Ok(Box::new(run_app(cc, store, gateway)))),
    )
}
