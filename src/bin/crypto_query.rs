//! Headless front end: runs one fetch through the same operation path as the desktop app
//! and prints the resulting view as a table.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use tabled::builder::Builder;
use tabled::settings::Style;

use crypto_desk::config::{Settings, SettingsStore};
use crypto_desk::data::{CoinGeckoGateway, ExportFormat, default_file_name, write_series};
use crypto_desk::domain::{
    ConversionParams, FetchRequest, HistoryParams, Payload, PriceParams, RankingParams,
    WatchlistParams,
};
use crypto_desk::engine::{FetchResult, run_fetch_blocking};
use crypto_desk::view::format::{money, whole};
use crypto_desk::view::{
    ConverterView, EMPTY_HINT, NoticeLevel, PriceView, RankingView, ViewUpdate, WatchlistView,
};
use crypto_desk::{GATEWAY, PERSISTENCE, init_logging};

#[derive(Parser, Debug)]
#[command(author, version, about = "Query CoinGecko market data from the terminal", long_about = None)]
struct QueryCli {
    /// JSON settings file supplying defaults and the watchlist
    #[arg(long, global = true, default_value = PERSISTENCE.settings.path)]
    settings: PathBuf,

    /// Market-data API base URL
    #[arg(long, global = true, default_value = GATEWAY.base_url)]
    api_base: String,

    /// Log level for the library (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Current price, 24h change and volume of one asset
    Price {
        /// Asset id, e.g. bitcoin (default from settings)
        asset: Option<String>,
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Prices for every asset on the saved watchlist
    Watchlist {
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Top assets by market capitalization
    Rank {
        #[arg(short = 'n', long)]
        top: Option<u32>,
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Daily price history, optionally exported to a file
    History {
        asset: Option<String>,
        #[arg(short, long)]
        currency: Option<String>,
        /// Number of days, or "max"
        #[arg(short, long)]
        days: Option<String>,
        /// Write the series to this file (or to the default name with --export-default)
        #[arg(long)]
        export: Option<PathBuf>,
        #[arg(long, conflicts_with = "export")]
        export_default: bool,
        /// csv or json (default from settings)
        #[arg(long)]
        format: Option<String>,
    },
    /// Convert an amount of an asset into a currency
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
    },
}

fn main() -> ExitCode {
    let args = QueryCli::parse();
    init_logging(args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: QueryCli) -> Result<()> {
    let settings = match SettingsStore::load(&args.settings) {
        Ok(store) => store.settings().clone(),
        Err(e) => {
            log::warn!("Using default settings: {}", e);
            Settings::default()
        }
    };
    let gateway = CoinGeckoGateway::new(&args.api_base).context("Invalid API base URL")?;

    match args.command {
        Command::Price { asset, currency } => {
            let asset = asset.unwrap_or_else(|| settings.price_tab_default_asset_id.clone());
            let currency = currency.unwrap_or_else(|| settings.price_tab_default_currency.clone());
            let request = FetchRequest::SinglePrice(PriceParams::parse(&asset, &currency)?);
            let update = PriceView::map(&run_fetch_blocking(&gateway, &request))?;
            let view = &update.view;
            print_table(
                ["Price", "24h Change", "24h Volume", "Last Updated"],
                [[
                    view.price.as_str(),
                    view.change_24h.as_str(),
                    view.volume_24h.as_str(),
                    view.last_updated.as_str(),
                ]],
            );
            finish(&update)
        }

        Command::Watchlist { currency } => {
            let currency = currency.unwrap_or_else(|| settings.default_vs_currency.clone());
            if settings.watchlist_ids.is_empty() {
                println!("{}", EMPTY_HINT);
                return Ok(());
            }
            let params = WatchlistParams::parse(settings.watchlist_ids.ids(), &currency)?;
            let currency = params.currencies[0].clone();
            let request = FetchRequest::WatchlistPrices(params);
            let update = WatchlistView::map(&run_fetch_blocking(&gateway, &request), &currency)?;
            print_table(&update.view.headers, update.view.rows.iter().map(|r| r.cells()));
            finish(&update)
        }

        Command::Rank { top, currency } => {
            let currency = currency.unwrap_or_else(|| settings.default_vs_currency.clone());
            let top = top.unwrap_or(settings.default_rank_top_n);
            let request = FetchRequest::MarketRanking(RankingParams::parse(top, &currency)?);
            let update = RankingView::map(&run_fetch_blocking(&gateway, &request), &currency)?;
            print_table(&update.view.headers, update.view.rows.iter().map(|r| r.cells()));
            finish(&update)
        }

        Command::History {
            asset,
            currency,
            days,
            export,
            export_default,
            format,
        } => {
            let asset = asset.unwrap_or_else(|| settings.download_tab_default_asset_id.clone());
            let currency = currency.unwrap_or_else(|| settings.default_vs_currency.clone());
            let days = days.unwrap_or_else(|| settings.default_download_days.to_string());
            let format = ExportFormat::from_setting(
                format
                    .as_deref()
                    .unwrap_or(&settings.download_tab_default_file_format),
            );
            let request =
                FetchRequest::HistoricalSeries(HistoryParams::parse(&asset, &currency, &days)?);

            let series = match run_fetch_blocking(&gateway, &request) {
                FetchResult::Success(Payload::Historical(series)) => series,
                FetchResult::Success(other) => {
                    bail!("unexpected {} payload", other.variant_name())
                }
                FetchResult::Failure(f) => bail!("{}", f),
            };

            print_table(
                ["Date", "Price", "Market Cap", "Volume"],
                series.points.iter().map(|p| {
                    [
                        p.date.clone(),
                        money(Some(p.price)),
                        whole(p.market_cap),
                        whole(p.total_volume),
                    ]
                }),
            );

            let target = match (export, export_default) {
                (Some(path), _) => Some(path),
                (None, true) => Some(PathBuf::from(default_file_name(&series, format))),
                (None, false) => None,
            };
            if let Some(path) = target {
                write_series(&path, &series, format)?;
                println!("Data saved to: {}", path.display());
            }
            Ok(())
        }

        Command::Convert { amount, from, to } => {
            let from = from.unwrap_or_else(|| settings.converter_tab_default_from_asset.clone());
            let to = to.unwrap_or_else(|| settings.converter_tab_default_to_currency.clone());
            let request = FetchRequest::ConversionRate(ConversionParams::parse(&amount, &from, &to)?);
            let update = ConverterView::map(&run_fetch_blocking(&gateway, &request))?;
            println!("{} {}", update.view.result, update.view.rate);
            finish(&update)
        }
    }
}

fn print_table<H, R, C>(headers: H, rows: R)
where
    H: IntoIterator,
    H::Item: ToString,
    R: IntoIterator,
    R::Item: IntoIterator<Item = C>,
    C: ToString,
{
    let mut builder = Builder::default();
    builder.push_record(headers.into_iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row.into_iter().map(|c| c.to_string()));
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);
}

/// Prints the status line; a failure notice becomes the process error.
fn finish<V>(update: &ViewUpdate<V>) -> Result<()> {
    match &update.notice {
        Some(notice) if notice.level == NoticeLevel::Error => {
            bail!("{}: {}", notice.title, notice.body)
        }
        Some(notice) => {
            println!("{}", update.status);
            eprintln!("{}: {}", notice.title, notice.body);
            Ok(())
        }
        None => {
            println!("{}", update.status);
            Ok(())
        }
    }
}
