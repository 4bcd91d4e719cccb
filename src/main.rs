//! Main entry point for the campsite watcher.
//!
//! Polls Recreation.gov monthly availability for a fixed set of Olympic
//! peninsula campgrounds and pushes a notification when new dates open up.

use std::sync::Arc;

use campground_watch::{RecGovClient, WatchConfig, WatchExecutor};
use ntfy_notify::{Notifier, NtfyClient};

/// ntfy.sh topic that notifications are published to.
const NTFY_TOPIC: &str = "aolinpike-2025aug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let notifier = Arc::new(NtfyClient::new(NTFY_TOPIC)?);

    if std::env::args().nth(1).as_deref() == Some("-test") {
        let message = "✅ This is a test notification from your Olympic campsite watcher.";
        match notifier.notify(message).await {
            Ok(()) => log::info!("✅ Test notification sent"),
            Err(e) => log::error!("❌ Test notification failed: {}", e),
        }
        return Ok(());
    }

    let config = WatchConfig::default();
    log::info!(
        "🚀 Starting campsite watcher for {} campgrounds ({}-{:02}, days {}-{})",
        config.campgrounds.len(),
        config.year,
        config.month,
        config.checkin_day,
        config.checkout_day
    );

    let client = Arc::new(RecGovClient::new()?);
    let mut executor = WatchExecutor::new(client, notifier, config);
    executor.start().await?;

    Ok(())
}
