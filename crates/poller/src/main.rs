use std::fs::File;
use std::sync::Mutex;

use herald_common::config::AppConfig;
use herald_common::types::PollCursor;
use herald_notifier::telegram::TelegramSender;
use herald_poller::fetcher::PracticumClient;
use herald_poller::watcher::{PollIntervals, ReviewWatcher};

const DEFAULT_LOG_FILTER: &str = "herald_poller=info,herald_notifier=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    init_tracing(&config)?;

    tracing::info!("Review herald starting...");
    tracing::debug!(?config, "Configuration loaded");

    let source = PracticumClient::new(&config)?;
    let sink = TelegramSender::new(&config.telegram_token, config.telegram_chat_id);

    tracing::info!(
        endpoint = source.endpoint(),
        chat_id = sink.chat_id(),
        "Status source and Telegram sender ready"
    );

    let mut watcher = ReviewWatcher::new(
        source,
        sink,
        PollCursor::now(),
        PollIntervals::from(&config),
    );

    // Run until Ctrl+C; the loop itself never exits
    tokio::select! {
        _ = watcher.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping...");
        }
    }

    tracing::info!("Review herald stopped.");
    Ok(())
}

/// Structured JSON logs to stdout, or to `LOG_FILE` (truncated on start) when set.
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .json();

    match &config.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.init(),
    }

    Ok(())
}
