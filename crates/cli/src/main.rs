mod input;
mod notifier;
mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coin_pulse_core::models::alert::AlertMode;
use coin_pulse_core::models::command::Command;
use coin_pulse_core::models::settings::{
    Settings, DEFAULT_ALERT_SOUND_URL, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TARGET_PERCENT,
    DEFAULT_TICKER_URL,
};
use coin_pulse_core::models::symbol::Symbol;
use coin_pulse_core::poller::Poller;
use coin_pulse_core::providers::bitkub::BitkubProvider;
use coin_pulse_core::services::price_service::PriceService;
use coin_pulse_core::storage::kv::FileStore;
use coin_pulse_core::PortfolioTracker;

use input::{parse_line, Input, HELP};
use notifier::TerminalNotifier;

#[derive(Parser)]
#[command(name = "coin-pulse", about = "Track THB crypto buys against live prices")]
struct Args {
    /// File holding the recorded buys
    #[arg(long, default_value = "coin-pulse-store.json")]
    store: PathBuf,

    /// Coin to chart (KUB, VELO or UNI)
    #[arg(short, long, default_value = "KUB")]
    coin: Symbol,

    /// Profit target in percent
    #[arg(short, long, default_value_t = DEFAULT_TARGET_PERCENT, allow_negative_numbers = true)]
    target: f64,

    /// Delay between price polls, in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    interval_ms: u64,

    /// Alert once per target crossing instead of on every update
    #[arg(long)]
    alert_once: bool,

    /// Market ticker endpoint
    #[arg(long, default_value = DEFAULT_TICKER_URL)]
    ticker_url: String,

    /// Sound clip announced with each alert
    #[arg(long, default_value = DEFAULT_ALERT_SOUND_URL)]
    alert_sound_url: String,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            selected_symbol: self.coin,
            target_percent: self.target,
            poll_interval_ms: self.interval_ms,
            alert_mode: if self.alert_once {
                AlertMode::EdgeTriggered
            } else {
                AlertMode::EveryEvaluation
            },
            ticker_url: self.ticker_url.clone(),
            alert_sound_url: self.alert_sound_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = args.settings();

    let store = FileStore::open(&args.store)
        .with_context(|| format!("opening store {}", args.store.display()))?;
    let tracker = PortfolioTracker::open(Box::new(store), settings.clone())?;
    info!(
        store = %args.store.display(),
        positions = tracker.position_count(),
        "ledger loaded"
    );

    let provider = Arc::new(BitkubProvider::with_url(settings.ticker_url.clone()));
    let poller = Poller::new(
        PriceService::new(provider),
        Arc::new(TerminalNotifier),
        Duration::from_millis(settings.poll_interval_ms),
    );
    let mut handle = poller.spawn(tracker);

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,

            changed = handle.views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = handle.views.borrow_and_update().clone();
                println!("{}", render::dashboard(&view));
            }

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Ok(None) => {}
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(Input::Help)) => println!("{HELP}"),
                    Ok(Some(Input::Export)) => {
                        let positions = handle.views.borrow().positions();
                        println!("{}", serde_json::to_string_pretty(&positions)?);
                    }
                    Ok(Some(Input::Buy(price))) => {
                        handle.commands.send(Command::SetPriceInput(price)).await?;
                        handle.commands.send(Command::SubmitPriceInput).await?;
                    }
                    Ok(Some(Input::Command(command))) => handle.commands.send(command).await?,
                    Err(message) => warn!("{message}"),
                }
            }
        }
    }

    let tracker = handle.shutdown().await?;
    info!(positions = tracker.position_count(), "bye");
    Ok(())
}
