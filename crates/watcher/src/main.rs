use herald_common::config::AppConfig;
use herald_notifier::TelegramNotifier;
use herald_watcher::client::PracticumClient;
use herald_watcher::poller::StatusPoller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "herald_watcher=info,herald_notifier=info,herald_common=info".into()
            }),
        )
        .json()
        .init();

    tracing::info!("Homework Herald watcher starting...");

    // Missing credentials are fatal before the loop starts
    let config = AppConfig::from_env()?;

    let client = PracticumClient::new(config.endpoint.clone(), config.practicum_token.clone());
    let notifier = TelegramNotifier::new(
        config.telegram_api_url.clone(),
        config.telegram_token.clone(),
        config.telegram_chat_id.clone(),
    );

    let mut poller = StatusPoller::new(client, notifier, config.retry_interval);

    tracing::info!(endpoint = %config.endpoint, "Starting homework status poller");

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("Homework Herald watcher stopped.");
    Ok(())
}
