use std::sync::Arc;

use anyhow::Context;

use found_pet_bot::bot;
use found_pet_bot::channels::{Channel, CliChannel, TelegramChannel};
use found_pet_bot::config::BotConfig;
use found_pet_bot::error::Error;
use found_pet_bot::publish::Publisher;
use found_pet_bot::storage::ReportStore;
use found_pet_bot::submission::Submission;
use found_pet_bot::wizard::WizardManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = BotConfig::from_env()
        .map_err(Error::from)
        .context("invalid configuration")?;

    eprintln!("🐾 Found-pet bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Max photos: {}", config.wizard.max_photos);
    eprintln!("   Data dir: {}", config.data_dir.display());
    eprintln!(
        "   Publishing: {}",
        match (&config.publish.channel_id, config.publish.admin_ids.len()) {
            (Some(channel), _) => format!("channel {channel}"),
            (None, 0) => "none (reports are accepted as-is)".to_string(),
            (None, n) => format!("{n} admin(s) for review"),
        }
    );
    if let Some(ref chat) = config.publish.notification_chat_id {
        eprintln!("   Notifications: {chat}");
    }

    // ── Channel ─────────────────────────────────────────────────────────
    let channel: Arc<dyn Channel> = match config.bot_token.clone() {
        Some(token) => {
            let telegram = TelegramChannel::new(token);
            telegram
                .health_check()
                .await
                .context("Telegram bot token rejected")?;
            eprintln!("   Channel: telegram\n");
            Arc::new(telegram)
        }
        None => {
            eprintln!("   Channel: cli (set TELEGRAM_BOT_TOKEN to use Telegram)");
            eprintln!("   Commands: /start, /cancel · buttons: #action · geo: @lat,lon · photo: +photo <path>\n");
            Arc::new(CliChannel::new())
        }
    };

    // ── Wizard ──────────────────────────────────────────────────────────
    let submission = Submission::new(
        Publisher::new(config.publish.clone()),
        ReportStore::new(config.data_dir.clone()),
    );
    let manager = Arc::new(WizardManager::new(
        Arc::clone(&channel),
        config.wizard.clone(),
        Arc::new(submission),
    ));

    bot::run(channel, manager).await?;

    Ok(())
}
