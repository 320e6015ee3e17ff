//! hoyo-checkin - one daily check-in run for every configured account

mod args;

use anyhow::{bail, Context};
use args::Args;
use clap::Parser;
use hoyo_core::AppConfig;
use hoyo_engine::{CheckInRunner, ErrorLog, Notifier};
use hoyo_networking::{HttpClient, PortalClient, TelegramClient};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hoyo_checkin=info,hoyo_engine=info,hoyo_networking=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    config.accounts = args.filter_accounts(std::mem::take(&mut config.accounts));

    if config.accounts.is_empty() {
        error!("No accounts found. Please check configuration.");
        bail!("no accounts configured");
    }

    info!(
        "Starting check-in for {} account(s) across {} game profile(s)",
        config.accounts.len(),
        config.games.len()
    );

    let http = HttpClient::new(&config).context("Failed to build HTTP client")?;

    let chat = match (&config.telegram.bot_token, args.no_notify) {
        (_, true) => {
            info!("Notifications disabled by --no-notify");
            None
        }
        (Some(token), false) => Some(TelegramClient::new(http.clone(), token.clone())),
        (None, false) => {
            warn!("Telegram bot token not configured. Notifications will be disabled.");
            None
        }
    };

    let runner = CheckInRunner::new(PortalClient::new(http), &config);
    let reports = runner.run_all(&config.accounts).await;

    let notifier = Notifier::new(chat, ErrorLog::new(config.error_log_path.clone()));
    let summary = notifier.dispatch(&reports).await;
    if summary.failed > 0 {
        error!("{} notification(s) could not be delivered", summary.failed);
    }

    info!("Check-in run finished");
    Ok(())
}
